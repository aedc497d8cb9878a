use indexmap::IndexSet;

use super::events::WindowId;
use crate::error::CoordinatorError;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GateState {
    #[default]
    Open,
    PendingConfirmation,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CloseOutcome {
    /// Testing mode: skip the dialog and close now.
    Immediate,
    AwaitConfirmation,
}

/// Per-window close interception. Windows not tracked here are `Open`.
#[derive(Debug, Default)]
pub struct CloseGate {
    // Insertion order doubles as request order; the last entry is the most
    // recent prompt.
    pending: IndexSet<WindowId>,
}

impl CloseGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, window: WindowId) -> GateState {
        if self.pending.contains(&window) {
            GateState::PendingConfirmation
        } else {
            GateState::Open
        }
    }

    pub fn request_close(
        &mut self,
        window: WindowId,
        testing: bool,
    ) -> Result<CloseOutcome, CoordinatorError> {
        if self.pending.contains(&window) {
            return Err(CoordinatorError::ConfirmationAlreadyPending(window));
        }

        if testing {
            return Ok(CloseOutcome::Immediate);
        }

        self.pending.insert(window);
        Ok(CloseOutcome::AwaitConfirmation)
    }

    pub fn resolve(&mut self, window: WindowId) -> Result<(), CoordinatorError> {
        if self.pending.shift_remove(&window) {
            Ok(())
        } else {
            Err(CoordinatorError::NoPendingConfirmation)
        }
    }

    pub fn latest(&self) -> Option<WindowId> {
        self.pending.last().copied()
    }

    pub fn forget(&mut self, window: WindowId) {
        self.pending.shift_remove(&window);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
