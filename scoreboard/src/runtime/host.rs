use super::events::WindowId;
use super::menu::MenuRole;
use super::messages::OutboundMessage;
use crate::error::HostError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentRef {
    Control,
    Scoreboard,
}

impl ContentRef {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Control => "control.html",
            Self::Scoreboard => "scoreboard.html",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowOptions {
    pub title: String,
    pub visible: bool,
    pub auto_hide_menu_bar: bool,
}

impl WindowOptions {
    pub fn control() -> Self {
        Self {
            title: "Scoreboard Control".to_string(),
            visible: true,
            auto_hide_menu_bar: false,
        }
    }

    /// Scoreboards stay hidden until their content is ready to show.
    pub fn scoreboard(number: usize) -> Self {
        Self {
            title: scoreboard_title(number),
            visible: false,
            auto_hide_menu_bar: true,
        }
    }
}

pub fn scoreboard_title(number: usize) -> String {
    format!("Scoreboard #{number}")
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub detail: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmPrompt {
    pub fn for_scoreboard(number: usize, page_title: &str) -> Self {
        Self {
            title: "Quit Scoreboard".to_string(),
            message: format!("Close Scoreboard #{number}: {page_title}"),
            detail: format!(
                "Are you sure you would like to quit Scoreboard #{number}: \
                 {page_title}?"
            ),
            ..Self::buttons()
        }
    }

    pub fn for_control() -> Self {
        Self {
            title: "Quit Scoreboard".to_string(),
            message: "Close all scoreboards from Scoreboard".to_string(),
            detail: "Are you sure you would like to quit Scoreboard? \
                     (WARNING: This will close all open scoreboards.)"
                .to_string(),
            ..Self::buttons()
        }
    }

    fn buttons() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            detail: String::new(),
            confirm_label: "Quit".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AboutInfo {
    pub name: String,
    pub version: String,
    pub copyright: String,
    pub license: String,
}

impl AboutInfo {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            name: "Open IAS Scoreboard".to_string(),
            version: version.into(),
            copyright: "Copyright (C) 2019 Gary Kim".to_string(),
            license: "GNU Affero General Public License, version 3"
                .to_string(),
        }
    }

    pub fn description(&self) -> String {
        format!(
            "{} {}\n{}\nLicensed under the {}.",
            self.name, self.version, self.copyright, self.license
        )
    }
}

/// The GUI runtime the coordinator drives. Implementations own the real
/// windows; the coordinator only ever sees [`WindowId`]s.
pub trait WindowHost {
    fn create_window(
        &mut self,
        options: &WindowOptions,
    ) -> Result<WindowId, HostError>;

    fn load_content(
        &mut self,
        window: WindowId,
        content: ContentRef,
    ) -> Result<(), HostError>;

    fn send(
        &mut self,
        window: WindowId,
        message: &OutboundMessage,
    ) -> Result<(), HostError>;

    fn show(&mut self, window: WindowId) -> Result<(), HostError>;

    /// Graceful close. Must come back as a `CloseRequested` event so it passes
    /// through the close gate; never destroys directly.
    fn close(&mut self, window: WindowId) -> Result<(), HostError>;

    fn destroy(&mut self, window: WindowId) -> Result<(), HostError>;

    fn open_dev_tools(&mut self, window: WindowId) -> Result<(), HostError>;

    /// Title of the page currently shown in `window`.
    fn title(&self, window: WindowId) -> Option<String>;

    fn install_menu(
        &mut self,
        window: WindowId,
        role: MenuRole,
    ) -> Result<(), HostError>;

    /// Shows the prompt and answers later with a `ConfirmationResolved` event.
    fn request_confirmation(
        &mut self,
        window: WindowId,
        prompt: &ConfirmPrompt,
    ) -> Result<(), HostError>;

    /// Puts away the prompt for `window` without answering it.
    fn dismiss_confirmation(&mut self, window: WindowId);

    fn show_about(&mut self, about: &AboutInfo);

    fn quit(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoreboard_prompt_names_window() {
        let prompt = ConfirmPrompt::for_scoreboard(3, "Basketball");
        assert_eq!(prompt.title, "Quit Scoreboard");
        assert_eq!(prompt.message, "Close Scoreboard #3: Basketball");
        assert_eq!(
            prompt.detail,
            "Are you sure you would like to quit Scoreboard #3: Basketball?"
        );
        assert_eq!(prompt.confirm_label, "Quit");
        assert_eq!(prompt.cancel_label, "Cancel");
    }

    #[test]
    fn control_prompt_warns_about_all_scoreboards() {
        let prompt = ConfirmPrompt::for_control();
        assert!(prompt.detail.contains("This will close all open scoreboards"));
    }

    #[test]
    fn scoreboard_windows_start_hidden() {
        let options = WindowOptions::scoreboard(1);
        assert!(!options.visible);
        assert_eq!(options.title, "Scoreboard #1");
        assert!(WindowOptions::control().visible);
    }

    #[test]
    fn about_description_includes_version() {
        let about = AboutInfo::new("1.2.3");
        assert!(about.description().starts_with("Open IAS Scoreboard 1.2.3"));
    }
}
