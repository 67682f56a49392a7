//! Guardian records and the derived progress read model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progression::Badge;

// ─── Screening status ────────────────────────────────────────────────────────

/// Where a guardian stands in the genetic-screening initiative. Transition
/// rules live in [`crate::screening`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScreeningStatus {
  #[default]
  NotInterested,
  Interested,
  Verified,
  Rejected,
}

// ─── Guardian ────────────────────────────────────────────────────────────────

/// A registered volunteer accumulating points and badges.
///
/// `level` is never stored — it is always recomputed from `points` (see
/// [`crate::progression::compute_level`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guardian {
  pub guardian_id: Uuid,
  pub created_at:  DateTime<Utc>,
  /// Monotonic non-decreasing; awards are never reverted.
  pub points:      u64,
  /// Permanent credentials, each awarded at most once and never removed.
  pub badges:      BTreeSet<Badge>,
  pub screening:   ScreeningStatus,
}

// ─── Progress view ───────────────────────────────────────────────────────────

/// The computed progress snapshot for a guardian — never stored, always
/// derived.
#[derive(Debug, Clone, Serialize)]
pub struct GuardianProgress {
  pub guardian_id: Uuid,
  pub points:      u64,
  pub level:       u32,
  /// Fraction of progress toward the next level, in `[0, 1]`. Display only.
  pub progress:    f64,
  /// Earned badges in badge order.
  pub badges:      Vec<Badge>,
  pub screening:   ScreeningStatus,
}
