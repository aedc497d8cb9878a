//! Per-window command tables. Hosts translate their native key events into an
//! [`Accelerator`] and look up the [`MenuCommand`] bound for the window's
//! [`MenuRole`]; the command then goes through the coordinator like any other
//! event.

use serde::{Deserialize, Serialize};

use crate::error::MessageError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuRole {
    Control { about: bool },
    Scoreboard { number: usize },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuCommand {
    NewScoreboard,
    CloseWindow,
    Quit,
    About,
    ToggleDevTools,
}

/// Pages name keys the way `KeyboardEvent.key` does: a single character or
/// `F1` through `F24`.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Char(char),
    F(u8),
}

impl TryFrom<String> for Key {
    type Error = MessageError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c));
        }

        name.strip_prefix('F')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=24).contains(n))
            .map(Self::F)
            .ok_or(MessageError::UnknownKey(name))
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => c.to_string(),
            Key::F(n) => format!("F{n}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct Accelerator {
    pub key: Key,
    /// Control on Linux/Windows, Command on macOS.
    #[serde(default)]
    pub ctrl: bool,
}

impl Accelerator {
    pub const fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
        }
    }

    pub const fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    fn normalized(self) -> Self {
        match self.key {
            Key::Char(c) => Self {
                key: Key::Char(c.to_ascii_lowercase()),
                ..self
            },
            Key::F(_) => self,
        }
    }
}

impl MenuRole {
    pub fn label(&self) -> String {
        match self {
            Self::Control { .. } => "Scoreboard Control".to_string(),
            Self::Scoreboard { number } => format!("Scoreboard #{number}"),
        }
    }

    pub fn bindings(&self) -> Vec<(Accelerator, MenuCommand)> {
        match self {
            Self::Control { about } => {
                let mut bindings = vec![
                    (Accelerator::ctrl('n'), MenuCommand::NewScoreboard),
                    (Accelerator::ctrl('q'), MenuCommand::Quit),
                    (Accelerator::plain(Key::F(12)), MenuCommand::ToggleDevTools),
                ];
                if *about {
                    bindings
                        .push((Accelerator::plain(Key::F(1)), MenuCommand::About));
                }
                bindings
            }
            Self::Scoreboard { .. } => vec![
                (Accelerator::ctrl('w'), MenuCommand::CloseWindow),
                (Accelerator::plain(Key::F(12)), MenuCommand::ToggleDevTools),
            ],
        }
    }

    pub fn command_for(&self, accelerator: Accelerator) -> Option<MenuCommand> {
        let accelerator = accelerator.normalized();
        self.bindings()
            .into_iter()
            .find(|(bound, _)| *bound == accelerator)
            .map(|(_, command)| command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_menu_creates_and_quits() {
        let role = MenuRole::Control { about: true };
        assert_eq!(
            role.command_for(Accelerator::ctrl('n')),
            Some(MenuCommand::NewScoreboard)
        );
        assert_eq!(
            role.command_for(Accelerator::ctrl('Q')),
            Some(MenuCommand::Quit)
        );
        assert_eq!(
            role.command_for(Accelerator::plain(Key::F(1))),
            Some(MenuCommand::About)
        );
        assert_eq!(role.command_for(Accelerator::ctrl('w')), None);
    }

    #[test]
    fn key_names_follow_keyboard_event() {
        assert_eq!(Key::try_from("n".to_string()).unwrap(), Key::Char('n'));
        assert_eq!(Key::try_from("F12".to_string()).unwrap(), Key::F(12));
        assert!(Key::try_from("F0".to_string()).is_err());
        assert!(Key::try_from("Enter".to_string()).is_err());
        assert_eq!(String::from(Key::F(1)), "F1");
    }

    #[test]
    fn about_requires_capability() {
        let role = MenuRole::Control { about: false };
        assert_eq!(role.command_for(Accelerator::plain(Key::F(1))), None);
    }

    #[test]
    fn scoreboard_menu_only_closes_itself() {
        let role = MenuRole::Scoreboard { number: 2 };
        assert_eq!(role.label(), "Scoreboard #2");
        assert_eq!(
            role.command_for(Accelerator::ctrl('w')),
            Some(MenuCommand::CloseWindow)
        );
        assert_eq!(role.command_for(Accelerator::ctrl('n')), None);
        assert_eq!(role.command_for(Accelerator::plain(Key::Char('w'))), None);
    }
}
