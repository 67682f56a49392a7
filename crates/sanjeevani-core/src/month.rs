//! Calendar months and the per-patient relay window.
//!
//! A relay window is the run of [`RELAY_WINDOW_LEN`] consecutive months in
//! which a patient's care team accepts donor commitments. The anchor month is
//! fixed when the patient is registered and never moves afterwards.

use serde::{Deserialize, Serialize};

/// The number of monthly slots in a patient's relay window.
pub const RELAY_WINDOW_LEN: usize = 4;

// ─── Month ───────────────────────────────────────────────────────────────────

/// A calendar month label. Ordering is calendar order, January first.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Month {
  January,
  February,
  March,
  April,
  May,
  June,
  July,
  August,
  September,
  October,
  November,
  December,
}

impl Month {
  /// All twelve months in calendar order.
  pub const ALL: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
  ];

  fn index(self) -> usize { self as usize }
}

// ─── RelayWindow ─────────────────────────────────────────────────────────────

/// A patient's four active relay months, consecutive from `start` and
/// wrapping across the year boundary (a window starting in November covers
/// November through February).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayWindow {
  start: Month,
}

impl RelayWindow {
  /// A window of [`RELAY_WINDOW_LEN`] consecutive months anchored at `start`.
  pub fn starting(start: Month) -> Self { Self { start } }

  /// The window's months in window order.
  pub fn months(&self) -> [Month; RELAY_WINDOW_LEN] {
    std::array::from_fn(|i| Month::ALL[(self.start.index() + i) % Month::ALL.len()])
  }

  /// Zero-based position of `month` within the window, or `None` when the
  /// month lies outside it.
  pub fn position(&self, month: Month) -> Option<usize> {
    self.months().iter().position(|m| *m == month)
  }

  pub fn contains(&self, month: Month) -> bool {
    self.position(month).is_some()
  }
}
