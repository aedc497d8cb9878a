use indexmap::IndexMap;

use super::events::WindowId;
use crate::error::CoordinatorError;

/// Scoreboard number 0 is never handed out: the first real scoreboard is #1
/// and `0` stays free to mean "quit all" on the `shutdown` channel.
pub const FIRST_SCOREBOARD_NUMBER: usize = 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowRole {
    Control,
    Scoreboard(usize),
}

#[derive(Debug)]
pub struct WindowRegistry {
    control: Option<WindowId>,
    scoreboards: IndexMap<usize, WindowId>,
    next_number: usize,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self {
            control: None,
            scoreboards: IndexMap::new(),
            next_number: FIRST_SCOREBOARD_NUMBER,
        }
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control(&self) -> Option<WindowId> {
        self.control
    }

    pub fn require_control(&self) -> Result<WindowId, CoordinatorError> {
        self.control.ok_or(CoordinatorError::ControlWindowMissing)
    }

    pub fn set_control(
        &mut self,
        window: WindowId,
    ) -> Result<(), CoordinatorError> {
        if self.control.is_some() {
            return Err(CoordinatorError::DuplicateControlWindow);
        }
        self.control = Some(window);
        Ok(())
    }

    pub fn take_control(&mut self) -> Option<WindowId> {
        self.control.take()
    }

    /// Hands out the next scoreboard number. Numbers only ever grow, so a
    /// destroyed scoreboard's number is never given to a new window.
    pub fn reserve_number(&mut self) -> usize {
        let number = self.next_number;
        self.next_number += 1;
        number
    }

    pub fn next_number(&self) -> usize {
        self.next_number
    }

    pub fn insert_scoreboard(&mut self, number: usize, window: WindowId) {
        debug_assert!(number < self.next_number, "number was not reserved");
        self.scoreboards.insert(number, window);
    }

    pub fn scoreboard(&self, number: usize) -> Result<WindowId, CoordinatorError> {
        self.scoreboards
            .get(&number)
            .copied()
            .ok_or(CoordinatorError::UnknownWindowIndex(number))
    }

    pub fn remove_scoreboard(
        &mut self,
        number: usize,
    ) -> Result<WindowId, CoordinatorError> {
        self.scoreboards
            .shift_remove(&number)
            .ok_or(CoordinatorError::UnknownWindowIndex(number))
    }

    /// Empties the scoreboard table, returning the windows in number order.
    pub fn drain_scoreboards(&mut self) -> Vec<(usize, WindowId)> {
        self.scoreboards.drain(..).collect()
    }

    pub fn role_of(&self, window: WindowId) -> Option<WindowRole> {
        if self.control == Some(window) {
            return Some(WindowRole::Control);
        }

        self.scoreboards
            .iter()
            .find(|(_, id)| **id == window)
            .map(|(number, _)| WindowRole::Scoreboard(*number))
    }

    pub fn scoreboard_numbers(&self) -> Vec<usize> {
        self.scoreboards.keys().copied().collect()
    }

    pub fn scoreboard_count(&self) -> usize {
        self.scoreboards.len()
    }
}
