//! Two-phase transaction tracking

use serde::Serialize;
use status_datastore::{ChangeEvent, TransactionId};

use crate::error::{Error, Result};

/// Where the handler stands in the change protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    /// Verified and waiting for apply
    Verifying(TransactionId),
    Applying(TransactionId),
}

/// Enforces the allowed phase transitions.
///
/// Verify starts from `Idle`. Apply starts from `Idle` or from the verify of
/// the same transaction. Abort of the transaction in flight returns to
/// `Idle`. Anything else is [`Error::TransactionInFlight`].
#[derive(Debug, Clone, Default)]
pub struct PhaseTracker {
    phase: Phase,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn begin_verify(&mut self, txn: TransactionId) -> Result<()> {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Verifying(txn);
                Ok(())
            }
            Phase::Verifying(active) | Phase::Applying(active) => Err(Error::TransactionInFlight {
                event: ChangeEvent::Verify,
                active,
                requested: txn,
            }),
        }
    }

    pub fn begin_apply(&mut self, txn: TransactionId) -> Result<()> {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Applying(txn);
                Ok(())
            }
            Phase::Verifying(active) if active == txn => {
                self.phase = Phase::Applying(txn);
                Ok(())
            }
            Phase::Verifying(active) | Phase::Applying(active) => Err(Error::TransactionInFlight {
                event: ChangeEvent::Apply,
                active,
                requested: txn,
            }),
        }
    }

    /// Abort `txn`. Aborting while idle is a no-op.
    pub fn abort(&mut self, txn: TransactionId) -> Result<()> {
        match self.phase {
            Phase::Idle => Ok(()),
            Phase::Verifying(active) | Phase::Applying(active) if active == txn => {
                self.phase = Phase::Idle;
                Ok(())
            }
            Phase::Verifying(active) | Phase::Applying(active) => Err(Error::TransactionInFlight {
                event: ChangeEvent::Abort,
                active,
                requested: txn,
            }),
        }
    }

    /// Return to `Idle` once `txn` is finished, successfully or not.
    pub fn finish(&mut self, txn: TransactionId) {
        match self.phase {
            Phase::Verifying(active) | Phase::Applying(active) if active == txn => {
                self.phase = Phase::Idle;
            }
            _ => {}
        }
    }
}
