#![allow(dead_code)]

use scoreboard::prelude::*;

pub struct Harness {
    pub host: RecordingHost,
    pub coordinator: Coordinator,
    pub control: WindowId,
}

impl Harness {
    /// App ready only: the control window exists but has not reported
    /// ready-to-show, so no scoreboard has been created yet.
    pub fn with_control(config: AppConfig) -> Self {
        let mut host = RecordingHost::new();
        let mut coordinator = Coordinator::new(config);
        coordinator.handle(&mut host, HostEvent::AppReady);

        let control = coordinator
            .registry()
            .control()
            .expect("control window after app ready");

        Self {
            host,
            coordinator,
            control,
        }
    }

    /// Full startup: control shown, scoreboard #1 created and shown.
    pub fn started(config: AppConfig) -> Self {
        let mut harness = Self::with_control(config);
        harness.event(HostEvent::ReadyToShow(harness.control));
        let first = harness.scoreboard(1);
        harness.event(HostEvent::ReadyToShow(first));
        harness
    }

    pub fn confirming() -> Self {
        Self::started(AppConfig::default())
    }

    pub fn testing() -> Self {
        Self::started(AppConfig::default().with_testing(true))
    }

    pub fn event(&mut self, event: HostEvent) {
        self.coordinator.handle(&mut self.host, event);
        self.host.pump(&mut self.coordinator);
    }

    pub fn try_event(&mut self, event: HostEvent) -> Result<(), CoordinatorError> {
        let result = self.coordinator.try_handle(&mut self.host, event);
        self.host.pump(&mut self.coordinator);
        result
    }

    pub fn from_control(&mut self, message: InboundMessage) {
        let sender = self.control;
        self.event(HostEvent::Message { sender, message });
    }

    pub fn try_from_control(
        &mut self,
        message: InboundMessage,
    ) -> Result<(), CoordinatorError> {
        let sender = self.control;
        self.try_event(HostEvent::Message { sender, message })
    }

    pub fn scoreboard(&self, number: usize) -> WindowId {
        self.coordinator
            .registry()
            .scoreboard(number)
            .unwrap_or_else(|_| panic!("scoreboard #{number} should be live"))
    }

    pub fn control_messages(&self) -> Vec<OutboundMessage> {
        self.host.messages_to(self.control)
    }

    pub fn created_numbers(&self) -> Vec<usize> {
        self.control_messages()
            .into_iter()
            .filter_map(|message| match message {
                OutboundMessage::CreateScoreboard(number) => Some(number),
                _ => None,
            })
            .collect()
    }
}
