//! Activity facts — the append-only record of guardian actions.
//!
//! Facts are never updated or deleted. Badge eligibility is evaluated as a
//! pure read over the accumulated log, so every datum a badge rule needs
//! (e.g. which patient a relay join was for) travels in the action payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A guardian action. The variant name serves as the action discriminant in
/// serialised form and in error messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
  /// Committed to a monthly slot in `patient`'s relay.
  JoinRelay { patient: Uuid },
  /// Completed a blood donation.
  CompleteDonation,
  /// Joined a community initiative.
  JoinInitiative,
  /// Created an awareness poster.
  CreatePoster,
  /// Passed the genetic-screening verification.
  ScreeningVerified,
}

impl Action {
  /// The discriminant string matching the serde tags above.
  pub fn discriminant(&self) -> &'static str {
    match self {
      Self::JoinRelay { .. } => "join_relay",
      Self::CompleteDonation => "complete_donation",
      Self::JoinInitiative => "join_initiative",
      Self::CreatePoster => "create_poster",
      Self::ScreeningVerified => "screening_verified",
    }
  }

  /// Fixed award table consumed by the progression engine.
  pub fn points(&self) -> u64 {
    match self {
      Self::JoinRelay { .. } => 50,
      Self::CompleteDonation => 100,
      Self::JoinInitiative => 25,
      Self::CreatePoster => 10,
      Self::ScreeningVerified => 75,
    }
  }
}

/// An immutable record of one guardian action. Once appended, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFact {
  pub guardian_id: Uuid,
  pub action:      Action,
  /// Engine-assigned timestamp; never changes after the append.
  pub recorded_at: DateTime<Utc>,
}
