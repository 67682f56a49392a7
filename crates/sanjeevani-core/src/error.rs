//! Error types for `sanjeevani-core`.
//!
//! Every error is a deterministic business-rule outcome returned synchronously
//! to the caller; nothing here is transient or retryable. [`Error::kind`]
//! exposes the coarse taxonomy transport layers map onto status codes.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{guardian::ScreeningStatus, month::Month};

/// Coarse classification of a domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  Validation,
  Conflict,
  Capacity,
  NotFound,
  State,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("month {month} is outside the relay window for patient {patient}")]
  InvalidMonth { patient: Uuid, month: Month },

  #[error("units_needed must be positive")]
  InvalidUnits,

  #[error("the {month} slot for patient {patient} is already confirmed")]
  SlotTaken { patient: Uuid, month: Month },

  #[error("guardian {guardian} already holds a slot for patient {patient}")]
  DuplicateMembership { patient: Uuid, guardian: Uuid },

  #[error("guardian {guardian} does not hold the {month} slot for patient {patient}")]
  NotSlotHolder {
    patient:  Uuid,
    guardian: Uuid,
    month:    Month,
  },

  #[error("action {0} cannot be recorded directly")]
  UnsupportedAction(&'static str),

  #[error("all relay slots for patient {0} are confirmed")]
  RelayFull(Uuid),

  #[error("patient not found: {0}")]
  PatientNotFound(Uuid),

  #[error("guardian not found: {0}")]
  GuardianNotFound(Uuid),

  #[error("illegal screening transition from {from} to {to}")]
  ScreeningTransition {
    from: ScreeningStatus,
    to:   ScreeningStatus,
  },
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::InvalidMonth { .. } | Self::InvalidUnits => ErrorKind::Validation,
      Self::SlotTaken { .. }
      | Self::DuplicateMembership { .. }
      | Self::NotSlotHolder { .. }
      | Self::UnsupportedAction(_) => ErrorKind::Conflict,
      Self::RelayFull(_) => ErrorKind::Capacity,
      Self::PatientNotFound(_) | Self::GuardianNotFound(_) => {
        ErrorKind::NotFound
      }
      Self::ScreeningTransition { .. } => ErrorKind::State,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
