use log::{debug, error, info, trace, warn};

use super::close_gate::{CloseGate, CloseOutcome};
use super::events::{ConfirmChoice, HostEvent, WindowId};
use super::host::{
    AboutInfo, ConfirmPrompt, ContentRef, WindowHost, WindowOptions,
    scoreboard_title,
};
use super::menu::{Accelerator, MenuCommand, MenuRole};
use super::messages::{InboundMessage, OutboundMessage, ShutdownCommand};
use super::registry::{WindowRegistry, WindowRole};
use crate::error::{CoordinatorError, HostError};
use crate::framework::config::AppConfig;

type Result<T> = std::result::Result<T, CoordinatorError>;

/// Owns the window registry and close gate and routes every lifecycle event
/// through them. The host is lent to each call so the coordinator can be
/// driven by the desktop event loop or by an in-memory host in tests.
#[derive(Debug)]
pub struct Coordinator {
    config: AppConfig,
    about: AboutInfo,
    registry: WindowRegistry,
    gate: CloseGate,
    first_scoreboard_requested: bool,
    terminated: bool,
}

impl Coordinator {
    pub fn new(config: AppConfig) -> Self {
        let about = AboutInfo::new(config.version.clone());
        Self {
            config,
            about,
            registry: WindowRegistry::new(),
            gate: CloseGate::new(),
            first_scoreboard_requested: false,
            terminated: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn gate(&self) -> &CloseGate {
        &self.gate
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Entry point for the event loop. Errors are logged, never propagated.
    pub fn handle<H: WindowHost>(&mut self, host: &mut H, event: HostEvent) {
        if self.terminated {
            trace!("ignoring {:?} after termination", event);
            return;
        }

        let starting = matches!(event, HostEvent::AppReady);

        if let Err(err) = self.try_handle(host, event) {
            if err.is_fatal() {
                error!("{}", err);
            } else {
                warn!("{}", err);
            }

            if starting {
                error!("startup failed; shutting down");
                self.quit_all(host);
            }
        }
    }

    pub fn try_handle<H: WindowHost>(
        &mut self,
        host: &mut H,
        event: HostEvent,
    ) -> Result<()> {
        trace!("handling {:?}", event);

        match event {
            HostEvent::AppReady => self.start(host).map(|_| ()),
            HostEvent::ReadyToShow(window) => {
                self.on_ready_to_show(host, window)
            }
            HostEvent::CloseRequested(window) => {
                self.on_close_requested(host, window)
            }
            HostEvent::Destroyed(window) => self.on_destroyed(host, window),
            HostEvent::Message { sender, message } => {
                self.dispatch(host, sender, message)
            }
            HostEvent::ConfirmationResolved { window, choice } => {
                self.resolve_confirmation(host, window, choice)
            }
            HostEvent::Menu { window, command } => {
                self.on_menu_command(host, window, command)
            }
        }
    }

    /// Creates the control window. The first scoreboard follows once the
    /// control window reports it is ready to show.
    pub fn start<H: WindowHost>(&mut self, host: &mut H) -> Result<WindowId> {
        info!(
            "starting scoreboard {} (testing mode: {})",
            self.config.version, self.config.testing
        );
        self.create_control(host)
    }

    pub fn dispatch<H: WindowHost>(
        &mut self,
        host: &mut H,
        sender: WindowId,
        message: InboundMessage,
    ) -> Result<()> {
        debug!("{} sent {:?}", sender, message);

        match message {
            InboundMessage::CreateScoreboard => {
                self.create_scoreboard(host).map(|_| ())
            }
            InboundMessage::Shutdown(command) => {
                self.handle_shutdown(host, sender, command)
            }
            InboundMessage::Close(number) => self.handle_close(host, number),
            InboundMessage::OpenAbout => {
                host.show_about(&self.about);
                Ok(())
            }
            InboundMessage::Accelerator(accelerator) => {
                self.on_accelerator(host, sender, accelerator)
            }
        }
    }

    pub fn create_control<H: WindowHost>(
        &mut self,
        host: &mut H,
    ) -> Result<WindowId> {
        if self.registry.control().is_some() {
            return Err(CoordinatorError::DuplicateControlWindow);
        }

        let window = host.create_window(&WindowOptions::control())?;
        self.registry.set_control(window)?;

        host.load_content(window, ContentRef::Control)?;
        host.install_menu(window, menu_role(WindowRole::Control))?;

        if self.config.dev_tools {
            host.open_dev_tools(window)?;
        }

        info!("created control window {}", window);
        Ok(window)
    }

    pub fn create_scoreboard<H: WindowHost>(
        &mut self,
        host: &mut H,
    ) -> Result<usize> {
        let control = self.registry.require_control()?;
        let number = self.registry.next_number();

        let window = host.create_window(&WindowOptions::scoreboard(number))?;

        // The registry only learns about the window once every host call
        // has succeeded; a failed setup tears the window down again.
        if let Err(err) = self.open_scoreboard(host, control, window, number) {
            if let Err(destroy_err) = host.destroy(window) {
                warn!("failed to discard half-built {}: {}", window, destroy_err);
            }
            return Err(err.into());
        }

        let number = self.registry.reserve_number();
        self.registry.insert_scoreboard(number, window);

        info!("created scoreboard #{} as {}", number, window);
        Ok(number)
    }

    pub fn handle_shutdown<H: WindowHost>(
        &mut self,
        host: &mut H,
        sender: WindowId,
        command: ShutdownCommand,
    ) -> Result<()> {
        match command {
            ShutdownCommand::Minimize => {
                let window = self
                    .gate
                    .latest()
                    .ok_or(CoordinatorError::NoPendingConfirmation)?;
                self.gate.resolve(window)?;
                host.dismiss_confirmation(window);
                debug!("confirmation for {} put away", window);
                Ok(())
            }
            ShutdownCommand::DestroySelf => {
                match self.registry.role_of(sender) {
                    Some(WindowRole::Scoreboard(number)) => {
                        self.destroy_scoreboard(host, number, true)
                    }
                    Some(WindowRole::Control) => {
                        self.quit_all(host);
                        Ok(())
                    }
                    None => Err(CoordinatorError::UnknownWindow(sender)),
                }
            }
            ShutdownCommand::QuitAll => {
                self.quit_all(host);
                Ok(())
            }
            ShutdownCommand::DestroyIndex(number) => {
                self.destroy_scoreboard(host, number, false)
            }
        }
    }

    /// Asks the host to close scoreboard `number`; the close comes back
    /// through the gate as a regular close request.
    pub fn handle_close<H: WindowHost>(
        &mut self,
        host: &mut H,
        number: usize,
    ) -> Result<()> {
        let window = self.registry.scoreboard(number)?;
        host.close(window)?;
        Ok(())
    }

    pub fn resolve_confirmation<H: WindowHost>(
        &mut self,
        host: &mut H,
        window: WindowId,
        choice: ConfirmChoice,
    ) -> Result<()> {
        self.gate.resolve(window)?;

        match choice {
            ConfirmChoice::Cancel => {
                debug!("close of {} cancelled", window);
                Ok(())
            }
            ConfirmChoice::Quit => {
                let role = self
                    .registry
                    .role_of(window)
                    .ok_or(CoordinatorError::UnknownWindow(window))?;
                self.confirm_close(host, role)
            }
        }
    }

    fn open_scoreboard<H: WindowHost>(
        &self,
        host: &mut H,
        control: WindowId,
        window: WindowId,
        number: usize,
    ) -> std::result::Result<(), HostError> {
        host.load_content(window, ContentRef::Scoreboard)?;
        host.install_menu(window, menu_role(WindowRole::Scoreboard(number)))?;

        if self.config.dev_tools {
            host.open_dev_tools(window)?;
        }

        host.send(control, &OutboundMessage::CreateScoreboard(number))
    }

    fn on_ready_to_show<H: WindowHost>(
        &mut self,
        host: &mut H,
        window: WindowId,
    ) -> Result<()> {
        match self.registry.role_of(window) {
            Some(WindowRole::Control) => {
                if self.first_scoreboard_requested {
                    return Ok(());
                }
                self.first_scoreboard_requested = true;
                self.create_scoreboard(host).map(|_| ())
            }
            Some(WindowRole::Scoreboard(number)) => {
                let title = scoreboard_title(number);
                host.send(window, &OutboundMessage::TitleSet(title))?;
                host.show(window)?;
                Ok(())
            }
            None => Err(CoordinatorError::UnknownWindow(window)),
        }
    }

    fn on_close_requested<H: WindowHost>(
        &mut self,
        host: &mut H,
        window: WindowId,
    ) -> Result<()> {
        let role = self
            .registry
            .role_of(window)
            .ok_or(CoordinatorError::UnknownWindow(window))?;

        match self.gate.request_close(window, self.config.testing)? {
            CloseOutcome::Immediate => self.confirm_close(host, role),
            CloseOutcome::AwaitConfirmation => {
                let prompt = match role {
                    WindowRole::Control => ConfirmPrompt::for_control(),
                    WindowRole::Scoreboard(number) => {
                        let page_title = host.title(window).unwrap_or_default();
                        ConfirmPrompt::for_scoreboard(number, &page_title)
                    }
                };

                if let Err(err) = host.request_confirmation(window, &prompt) {
                    self.gate.forget(window);
                    return Err(err.into());
                }
                Ok(())
            }
        }
    }

    fn on_destroyed<H: WindowHost>(
        &mut self,
        host: &mut H,
        window: WindowId,
    ) -> Result<()> {
        self.gate.forget(window);

        match self.registry.role_of(window) {
            Some(WindowRole::Scoreboard(number)) => {
                self.registry.remove_scoreboard(number)?;
                warn!("scoreboard #{} went away unexpectedly", number);
                let control = self.registry.require_control()?;
                let message = OutboundMessage::DestroyScoreboard(number);
                host.send(control, &message)?;
                Ok(())
            }
            Some(WindowRole::Control) => {
                warn!("control window went away; closing all scoreboards");
                self.registry.take_control();
                self.quit_all(host);
                Ok(())
            }
            None => {
                trace!("{} already removed", window);
                Ok(())
            }
        }
    }

    /// Key presses reported by the page itself. The web view usually holds
    /// keyboard focus, so the native window never sees them.
    fn on_accelerator<H: WindowHost>(
        &mut self,
        host: &mut H,
        sender: WindowId,
        accelerator: Accelerator,
    ) -> Result<()> {
        let role = self
            .registry
            .role_of(sender)
            .ok_or(CoordinatorError::UnknownWindow(sender))?;

        match menu_role(role).command_for(accelerator) {
            Some(command) => self.on_menu_command(host, sender, command),
            None => {
                trace!("{:?} is not bound in {}", accelerator, sender);
                Ok(())
            }
        }
    }

    fn on_menu_command<H: WindowHost>(
        &mut self,
        host: &mut H,
        window: WindowId,
        command: MenuCommand,
    ) -> Result<()> {
        debug!("menu command {:?} from {}", command, window);

        match command {
            MenuCommand::NewScoreboard => {
                self.create_scoreboard(host).map(|_| ())
            }
            MenuCommand::CloseWindow => self.on_close_requested(host, window),
            MenuCommand::Quit => {
                let control = self.registry.require_control()?;
                self.on_close_requested(host, control)
            }
            MenuCommand::About => {
                host.show_about(&self.about);
                Ok(())
            }
            MenuCommand::ToggleDevTools => {
                host.open_dev_tools(window)?;
                Ok(())
            }
        }
    }

    fn confirm_close<H: WindowHost>(
        &mut self,
        host: &mut H,
        role: WindowRole,
    ) -> Result<()> {
        match role {
            WindowRole::Control => {
                self.quit_all(host);
                Ok(())
            }
            WindowRole::Scoreboard(number) => {
                self.destroy_scoreboard(host, number, true)
            }
        }
    }

    fn destroy_scoreboard<H: WindowHost>(
        &mut self,
        host: &mut H,
        number: usize,
        notify_control: bool,
    ) -> Result<()> {
        let window = self.registry.remove_scoreboard(number)?;
        self.gate.forget(window);

        let notified = match (notify_control, self.registry.control()) {
            (true, Some(control)) => {
                host.send(control, &OutboundMessage::DestroyScoreboard(number))
            }
            _ => Ok(()),
        };

        host.destroy(window)?;
        info!("destroyed scoreboard #{}", number);
        notified?;
        Ok(())
    }

    /// Destroys every scoreboard, then the control window, then terminates.
    /// Runs at most once.
    fn quit_all<H: WindowHost>(&mut self, host: &mut H) {
        if self.terminated {
            return;
        }

        for (number, window) in self.registry.drain_scoreboards() {
            if let Err(err) = host.destroy(window) {
                warn!("failed to destroy scoreboard #{}: {}", number, err);
            }
        }

        if let Some(control) = self.registry.take_control() {
            if let Err(err) = host.destroy(control) {
                warn!("failed to destroy control window: {}", err);
            }
        }

        self.gate.clear();
        self.terminated = true;
        info!("all windows closed; quitting");
        host.quit();
    }
}

fn menu_role(role: WindowRole) -> MenuRole {
    match role {
        WindowRole::Control => MenuRole::Control { about: true },
        WindowRole::Scoreboard(number) => MenuRole::Scoreboard { number },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::recording_host::{HostCall, RecordingHost};

    fn started() -> (Coordinator, RecordingHost, WindowId) {
        let mut host = RecordingHost::new();
        let mut coordinator = Coordinator::new(AppConfig::default());
        let control = coordinator.start(&mut host).expect("start");
        (coordinator, host, control)
    }

    #[test]
    fn create_scoreboard_announces_number_to_control() {
        let (mut coordinator, mut host, control) = started();

        let number = coordinator.create_scoreboard(&mut host).unwrap();

        assert_eq!(number, 1);
        assert_eq!(
            host.messages_to(control),
            vec![OutboundMessage::CreateScoreboard(1)]
        );
    }

    #[test]
    fn scoreboard_stays_hidden_until_ready() {
        let (mut coordinator, mut host, _) = started();
        coordinator.create_scoreboard(&mut host).unwrap();
        let window = coordinator.registry().scoreboard(1).unwrap();

        assert!(!host.calls().contains(&HostCall::Show(window)));

        coordinator.handle(&mut host, HostEvent::ReadyToShow(window));
        assert!(host.calls().contains(&HostCall::Show(window)));
    }

    #[test]
    fn close_of_unknown_number_does_not_touch_host() {
        let (mut coordinator, mut host, _) = started();
        host.clear_calls();

        let err = coordinator.handle_close(&mut host, 7).unwrap_err();

        assert!(matches!(err, CoordinatorError::UnknownWindowIndex(7)));
        assert!(!err.is_fatal());
        assert!(host.calls().is_empty());
    }
}
