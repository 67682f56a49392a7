//! Relay slots — the unit of monthly commitment.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::month::Month;

/// Occupancy of a slot. The donor reference is weak — lookup only, the slot
/// does not own the guardian record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotStatus {
  Open,
  Confirmed { donor: Uuid },
}

impl SlotStatus {
  pub fn is_open(&self) -> bool { matches!(self, Self::Open) }

  /// The occupying donor, if any.
  pub fn donor(&self) -> Option<Uuid> {
    match self {
      Self::Open => None,
      Self::Confirmed { donor } => Some(*donor),
    }
  }
}

/// One monthly commitment in a patient's relay, keyed by
/// `(patient_id, month)`. At most one guardian occupies a slot at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySlot {
  pub patient_id: Uuid,
  pub month:      Month,
  pub status:     SlotStatus,
}
