//! [`SlotLedger`] — the authoritative record of slot occupancy.
//!
//! `reserve` is a single check-and-set: every precondition is verified
//! against current state before the one status write, so a failed call
//! leaves the ledger untouched. Callers needing mutual exclusion across
//! threads hold the ledger behind the coordinator's lock; `&mut self` makes
//! the check-and-set exclusive within it.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
  error::{Error, Result},
  month::Month,
  patient::PatientCareNeed,
  slot::{RelaySlot, SlotStatus},
};

struct PatientEntry {
  need:  PatientCareNeed,
  /// Always exactly one slot per window month, kept in window order.
  slots: Vec<RelaySlot>,
}

/// Per-patient monthly relay slots and their occupancy.
#[derive(Default)]
pub struct SlotLedger {
  patients: HashMap<Uuid, PatientEntry>,
}

impl SlotLedger {
  pub fn new() -> Self { Self::default() }

  /// Create the need record and its open slots. Called once per patient at
  /// registration; the coordinator assigns the id, so the key is fresh.
  pub fn register(&mut self, need: PatientCareNeed) {
    let slots = need
      .window
      .months()
      .iter()
      .map(|month| RelaySlot {
        patient_id: need.patient_id,
        month:      *month,
        status:     SlotStatus::Open,
      })
      .collect();
    self
      .patients
      .insert(need.patient_id, PatientEntry { need, slots });
  }

  fn entry(&self, patient_id: Uuid) -> Result<&PatientEntry> {
    self
      .patients
      .get(&patient_id)
      .ok_or(Error::PatientNotFound(patient_id))
  }

  /// Confirm `donor_id` into the `(patient_id, month)` slot.
  ///
  /// Fails with [`Error::InvalidMonth`] outside the patient's window,
  /// [`Error::DuplicateMembership`] if the donor already holds a slot for
  /// this patient, [`Error::RelayFull`] when every window month is
  /// confirmed, and [`Error::SlotTaken`] when the requested slot is.
  pub fn reserve(
    &mut self,
    patient_id: Uuid,
    month: Month,
    donor_id: Uuid,
  ) -> Result<RelaySlot> {
    let entry = self
      .patients
      .get_mut(&patient_id)
      .ok_or(Error::PatientNotFound(patient_id))?;

    let Some(index) = entry.need.window.position(month) else {
      return Err(Error::InvalidMonth {
        patient: patient_id,
        month,
      });
    };

    if entry
      .slots
      .iter()
      .any(|slot| slot.status.donor() == Some(donor_id))
    {
      return Err(Error::DuplicateMembership {
        patient:  patient_id,
        guardian: donor_id,
      });
    }

    if entry.slots.iter().all(|slot| !slot.status.is_open()) {
      return Err(Error::RelayFull(patient_id));
    }

    let slot = &mut entry.slots[index];
    if !slot.status.is_open() {
      return Err(Error::SlotTaken {
        patient: patient_id,
        month,
      });
    }

    slot.status = SlotStatus::Confirmed { donor: donor_id };
    Ok(*slot)
  }

  /// Revert the `(patient_id, month)` slot to open. Idempotent on a slot
  /// that is already open.
  pub fn release(&mut self, patient_id: Uuid, month: Month) -> Result<RelaySlot> {
    let entry = self
      .patients
      .get_mut(&patient_id)
      .ok_or(Error::PatientNotFound(patient_id))?;

    let Some(index) = entry.need.window.position(month) else {
      return Err(Error::InvalidMonth {
        patient: patient_id,
        month,
      });
    };

    let slot = &mut entry.slots[index];
    slot.status = SlotStatus::Open;
    Ok(*slot)
  }

  /// Current state of one slot.
  pub fn slot(&self, patient_id: Uuid, month: Month) -> Result<RelaySlot> {
    let entry = self.entry(patient_id)?;
    let index =
      entry
        .need
        .window
        .position(month)
        .ok_or(Error::InvalidMonth {
          patient: patient_id,
          month,
        })?;
    Ok(entry.slots[index])
  }

  /// Open slots for a patient, in window order. Pure read; the iterator
  /// holds no ledger state beyond the borrow.
  pub fn open_slots(
    &self,
    patient_id: Uuid,
  ) -> Result<impl Iterator<Item = &RelaySlot>> {
    let entry = self.entry(patient_id)?;
    Ok(entry.slots.iter().filter(|slot| slot.status.is_open()))
  }

  /// How many of the patient's slots are confirmed. Never exceeds the
  /// window length.
  pub fn confirmed_count(&self, patient_id: Uuid) -> Result<usize> {
    let entry = self.entry(patient_id)?;
    Ok(
      entry
        .slots
        .iter()
        .filter(|slot| !slot.status.is_open())
        .count(),
    )
  }
}
