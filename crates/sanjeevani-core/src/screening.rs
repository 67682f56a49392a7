//! Screening state machine — transition rules for the genetic-screening
//! initiative.
//!
//! ```text
//! not_interested ⇄ interested ── verified   (terminal)
//!        ▲              │
//!        │              └────── rejected    (may re-enter interested)
//!        └────────────────────────┘
//! ```
//!
//! Opting in and out is guardian intent; the move out of `interested` happens
//! only through the external verification collaborator's callback.

use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  guardian::ScreeningStatus,
};

/// The lab result delivered by the verification collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
  Verified,
  Rejected,
}

/// Guardian opts in. Permitted from `not_interested` and from `rejected`
/// (retry after a failed cycle); idempotent when already `interested`.
pub fn opt_in(current: ScreeningStatus) -> Result<ScreeningStatus> {
  match current {
    ScreeningStatus::NotInterested
    | ScreeningStatus::Rejected
    | ScreeningStatus::Interested => Ok(ScreeningStatus::Interested),
    ScreeningStatus::Verified => Err(Error::ScreeningTransition {
      from: current,
      to:   ScreeningStatus::Interested,
    }),
  }
}

/// Guardian opts out. `verified` is permanent and cannot be withdrawn.
pub fn opt_out(current: ScreeningStatus) -> Result<ScreeningStatus> {
  match current {
    ScreeningStatus::NotInterested
    | ScreeningStatus::Interested
    | ScreeningStatus::Rejected => Ok(ScreeningStatus::NotInterested),
    ScreeningStatus::Verified => Err(Error::ScreeningTransition {
      from: current,
      to:   ScreeningStatus::NotInterested,
    }),
  }
}

/// Apply the verification collaborator's outcome. Only a guardian who opted
/// in can be verified or rejected.
pub fn apply_outcome(
  current: ScreeningStatus,
  outcome: VerificationOutcome,
) -> Result<ScreeningStatus> {
  let to = match outcome {
    VerificationOutcome::Verified => ScreeningStatus::Verified,
    VerificationOutcome::Rejected => ScreeningStatus::Rejected,
  };
  match current {
    ScreeningStatus::Interested => Ok(to),
    _ => Err(Error::ScreeningTransition { from: current, to }),
  }
}
