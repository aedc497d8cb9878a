//! In-memory [`WindowHost`] that records every call. Lets the coordinator run
//! headless in tests and in tools that replay window traffic.

use std::collections::VecDeque;

use indexmap::IndexMap;

use super::coordinator::Coordinator;
use super::events::{HostEvent, WindowId};
use super::host::{AboutInfo, ConfirmPrompt, ContentRef, WindowHost, WindowOptions};
use super::menu::MenuRole;
use super::messages::OutboundMessage;
use crate::error::HostError;

#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    CreateWindow(WindowId, WindowOptions),
    LoadContent(WindowId, ContentRef),
    Send(WindowId, OutboundMessage),
    Show(WindowId),
    Close(WindowId),
    Destroy(WindowId),
    OpenDevTools(WindowId),
    InstallMenu(WindowId, MenuRole),
    RequestConfirmation(WindowId, ConfirmPrompt),
    DismissConfirmation(WindowId),
    ShowAbout(AboutInfo),
    Quit,
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
    // Live windows and their current titles.
    live: IndexMap<WindowId, String>,
    next_id: u64,
    queued: VecDeque<HostEvent>,
    fail_next_create: bool,
    fail_next_load: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn is_live(&self, window: WindowId) -> bool {
        self.live.contains_key(&window)
    }

    pub fn live_windows(&self) -> Vec<WindowId> {
        self.live.keys().copied().collect()
    }

    pub fn set_title(&mut self, window: WindowId, title: impl Into<String>) {
        if let Some(current) = self.live.get_mut(&window) {
            *current = title.into();
        }
    }

    pub fn fail_next_create(&mut self) {
        self.fail_next_create = true;
    }

    pub fn fail_next_load(&mut self) {
        self.fail_next_load = true;
    }

    pub fn messages_to(&self, window: WindowId) -> Vec<OutboundMessage> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Send(target, message) if *target == window => {
                    Some(message.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub fn destroyed(&self) -> Vec<WindowId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Destroy(window) => Some(*window),
                _ => None,
            })
            .collect()
    }

    pub fn confirmation_count(&self) -> usize {
        self.count(|call| matches!(call, HostCall::RequestConfirmation(..)))
    }

    pub fn quit_count(&self) -> usize {
        self.count(|call| matches!(call, HostCall::Quit))
    }

    pub fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn queue_event(&mut self, event: HostEvent) {
        self.queued.push_back(event);
    }

    /// Feeds queued host events (such as the close requests produced by
    /// [`WindowHost::close`]) to the coordinator until none are left.
    pub fn pump(&mut self, coordinator: &mut Coordinator) {
        while let Some(event) = self.queued.pop_front() {
            coordinator.handle(self, event);
        }
    }

    fn require_live(&self, window: WindowId) -> Result<(), HostError> {
        if self.live.contains_key(&window) {
            Ok(())
        } else {
            Err(HostError::UnknownWindow(window))
        }
    }
}

impl WindowHost for RecordingHost {
    fn create_window(
        &mut self,
        options: &WindowOptions,
    ) -> Result<WindowId, HostError> {
        if std::mem::take(&mut self.fail_next_create) {
            return Err(HostError::WindowBuild("scripted failure".to_string()));
        }

        self.next_id += 1;
        let window = WindowId::new(self.next_id);
        self.live.insert(window, options.title.clone());
        self.calls
            .push(HostCall::CreateWindow(window, options.clone()));
        Ok(window)
    }

    fn load_content(
        &mut self,
        window: WindowId,
        content: ContentRef,
    ) -> Result<(), HostError> {
        self.require_live(window)?;
        if std::mem::take(&mut self.fail_next_load) {
            return Err(HostError::Content(format!(
                "{} missing",
                content.file_name()
            )));
        }
        self.calls.push(HostCall::LoadContent(window, content));
        Ok(())
    }

    fn send(
        &mut self,
        window: WindowId,
        message: &OutboundMessage,
    ) -> Result<(), HostError> {
        self.require_live(window)?;
        if let OutboundMessage::TitleSet(title) = message {
            self.set_title(window, title.clone());
        }
        self.calls.push(HostCall::Send(window, message.clone()));
        Ok(())
    }

    fn show(&mut self, window: WindowId) -> Result<(), HostError> {
        self.require_live(window)?;
        self.calls.push(HostCall::Show(window));
        Ok(())
    }

    fn close(&mut self, window: WindowId) -> Result<(), HostError> {
        self.require_live(window)?;
        self.calls.push(HostCall::Close(window));
        self.queued.push_back(HostEvent::CloseRequested(window));
        Ok(())
    }

    fn destroy(&mut self, window: WindowId) -> Result<(), HostError> {
        if self.live.shift_remove(&window).is_none() {
            return Err(HostError::UnknownWindow(window));
        }
        self.calls.push(HostCall::Destroy(window));
        Ok(())
    }

    fn open_dev_tools(&mut self, window: WindowId) -> Result<(), HostError> {
        self.require_live(window)?;
        self.calls.push(HostCall::OpenDevTools(window));
        Ok(())
    }

    fn title(&self, window: WindowId) -> Option<String> {
        self.live.get(&window).cloned()
    }

    fn install_menu(
        &mut self,
        window: WindowId,
        role: MenuRole,
    ) -> Result<(), HostError> {
        self.require_live(window)?;
        self.calls.push(HostCall::InstallMenu(window, role));
        Ok(())
    }

    fn request_confirmation(
        &mut self,
        window: WindowId,
        prompt: &ConfirmPrompt,
    ) -> Result<(), HostError> {
        self.require_live(window)?;
        self.calls
            .push(HostCall::RequestConfirmation(window, prompt.clone()));
        Ok(())
    }

    fn dismiss_confirmation(&mut self, window: WindowId) {
        self.calls.push(HostCall::DismissConfirmation(window));
    }

    fn show_about(&mut self, about: &AboutInfo) {
        self.calls.push(HostCall::ShowAbout(about.clone()));
    }

    fn quit(&mut self) {
        self.calls.push(HostCall::Quit);
    }
}
