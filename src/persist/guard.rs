use crate::foundation::core::ElementId;

/// Sync guard state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Idle,
    /// Attributes of `target` are being read into memory. Writes are refused until the settle
    /// tick tagged `epoch` fires.
    Restoring { target: ElementId, epoch: u64 },
}

/// Blocks attribute write-back while a selection is being restored.
///
/// Each [`SyncGuard::begin`] starts a new epoch; a settle notification from an older epoch (an
/// abandoned selection) is ignored.
#[derive(Debug, Default)]
pub struct SyncGuard {
    state: GuardState,
    epoch: u64,
}

impl SyncGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn is_restoring(&self) -> bool {
        matches!(self.state, GuardState::Restoring { .. })
    }

    /// Raise the guard for `target`, returning the epoch its settle tick must carry.
    pub fn begin(&mut self, target: ElementId) -> u64 {
        self.epoch += 1;
        self.state = GuardState::Restoring {
            target,
            epoch: self.epoch,
        };
        tracing::trace!(%target, epoch = self.epoch, "sync guard raised");
        self.epoch
    }

    /// Lower the guard if `epoch` is the current restore. Returns whether it was lowered.
    pub fn settle(&mut self, epoch: u64) -> bool {
        match self.state {
            GuardState::Restoring { target, epoch: e } if e == epoch => {
                self.state = GuardState::Idle;
                tracing::trace!(%target, epoch, "sync guard lowered");
                true
            }
            _ => false,
        }
    }

    /// Drop any restore in progress without settling it.
    pub fn abandon(&mut self) {
        self.state = GuardState::Idle;
    }

    /// Whether attribute writes to `target` are allowed right now.
    pub fn allows_write(&self, target: ElementId) -> bool {
        match self.state {
            GuardState::Idle => true,
            GuardState::Restoring { target: t, .. } => {
                if t == target {
                    tracing::trace!(%target, "attribute write blocked during restore");
                }
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/guard.rs"]
mod tests;
