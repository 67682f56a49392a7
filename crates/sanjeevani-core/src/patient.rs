//! Registration records supplied by external collaborators.
//!
//! A [`PatientCareNeed`] is immutable once registered; the engine only
//! manages the occupancy of the slots created alongside it. [`Donor`] and
//! [`BloodBank`] records are read-only reference data — the engine never
//! mutates them and holds them only so collaborators can exchange an
//! explicitly tagged [`Registrant`] instead of probing fields.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::month::{Month, RelayWindow};

// ─── Blood typing ────────────────────────────────────────────────────────────

/// The eight ABO/Rh blood types.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum BloodType {
  #[serde(rename = "A+")]
  APositive,
  #[serde(rename = "A-")]
  ANegative,
  #[serde(rename = "B+")]
  BPositive,
  #[serde(rename = "B-")]
  BNegative,
  #[serde(rename = "AB+")]
  AbPositive,
  #[serde(rename = "AB-")]
  AbNegative,
  #[serde(rename = "O+")]
  OPositive,
  #[serde(rename = "O-")]
  ONegative,
}

/// How urgently a patient needs the next transfusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
  High,
  Medium,
  Low,
}

// ─── Patient ─────────────────────────────────────────────────────────────────

/// A patient requiring regular transfusions. Immutable once registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCareNeed {
  pub patient_id:   Uuid,
  pub blood_type:   BloodType,
  pub urgency:      Urgency,
  pub units_needed: u32,
  pub description:  String,
  /// Server-assigned timestamp; never changes after registration.
  pub created_at:   DateTime<Utc>,
  /// The four months in which this patient's relay accepts commitments.
  pub window:       RelayWindow,
}

/// Input to [`crate::coordinator::RelayCoordinator::register_patient`].
/// `patient_id` and `created_at` are always set by the coordinator.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPatient {
  pub blood_type:   BloodType,
  pub urgency:      Urgency,
  pub units_needed: u32,
  pub description:  String,
  /// Anchor month for the patient's relay window.
  pub window_start: Month,
}

// ─── Reference records ───────────────────────────────────────────────────────

/// A registered donor, as supplied by the account collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
  pub donor_id:      Uuid,
  pub blood_type:    BloodType,
  pub last_donation: Option<NaiveDate>,
  pub available:     bool,
}

/// A blood bank with a per-type unit inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodBank {
  pub bank_id:   Uuid,
  pub name:      String,
  pub inventory: BTreeMap<BloodType, u32>,
  pub contact:   String,
}

// ─── Registrant ──────────────────────────────────────────────────────────────

/// An explicitly tagged registration record exchanged with collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Registrant {
  Patient(PatientCareNeed),
  Donor(Donor),
  Bank(BloodBank),
}
