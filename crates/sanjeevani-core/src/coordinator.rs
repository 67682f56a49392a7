//! [`RelayCoordinator`] — the sole mutation entry point.
//!
//! Composes the slot ledger, the progression engine, and the screening state
//! machine into single observable units of work. All writers serialise on one
//! mutex, which gives `reserve` the per-`(patient, month)` critical section
//! the occupancy invariants require: among concurrent `join` calls for the
//! same slot exactly one wins and the rest observe `SlotTaken`.
//!
//! Every operation validates against current state before its first write,
//! so a failed call leaves slots, points, and facts unchanged.

use std::{
  collections::BTreeSet,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
  activity::Action,
  error::{Error, Result},
  event::{DomainEvent, EventSink},
  guardian::{Guardian, GuardianProgress, ScreeningStatus},
  ledger::SlotLedger,
  month::{Month, RelayWindow},
  patient::{NewPatient, PatientCareNeed},
  progression::{Badge, ProgressionEngine},
  screening::{self, VerificationOutcome},
  slot::RelaySlot,
};

struct CoreState {
  ledger:      SlotLedger,
  progression: ProgressionEngine,
}

/// Result of a successful [`RelayCoordinator::join`].
#[derive(Debug, Clone, Serialize)]
pub struct JoinOutcome {
  pub slot:         RelaySlot,
  pub points_total: u64,
}

/// Process-scoped engine facade. Starts empty (no patients, no guardians,
/// zero points); session teardown discards the in-memory state unless an
/// external persistence collaborator is wired in.
pub struct RelayCoordinator {
  state: Mutex<CoreState>,
  sink:  Arc<dyn EventSink>,
}

impl RelayCoordinator {
  pub fn new(sink: Arc<dyn EventSink>) -> Self {
    Self {
      state: Mutex::new(CoreState {
        ledger:      SlotLedger::new(),
        progression: ProgressionEngine::new(),
      }),
      sink,
    }
  }

  fn lock(&self) -> MutexGuard<'_, CoreState> {
    // A poisoned lock means a panic mid-operation; the state is still the
    // best record we have, so keep serving it.
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  // ── Registration intake ───────────────────────────────────────────────

  /// Register a patient care need and create its open relay slots.
  pub fn register_patient(&self, input: NewPatient) -> Result<PatientCareNeed> {
    if input.units_needed == 0 {
      return Err(Error::InvalidUnits);
    }
    let need = PatientCareNeed {
      patient_id:   Uuid::new_v4(),
      blood_type:   input.blood_type,
      urgency:      input.urgency,
      units_needed: input.units_needed,
      description:  input.description,
      created_at:   Utc::now(),
      window:       RelayWindow::starting(input.window_start),
    };
    self.lock().ledger.register(need.clone());
    Ok(need)
  }

  /// Register a guardian with zero points. The welcome badge is granted
  /// through the normal evaluation path so the award is observable.
  pub fn register_guardian(&self) -> Guardian {
    let guardian = Guardian {
      guardian_id: Uuid::new_v4(),
      created_at:  Utc::now(),
      points:      0,
      badges:      BTreeSet::new(),
      screening:   ScreeningStatus::default(),
    };
    let mut state = self.lock();
    state.progression.register(guardian.clone());
    // Cannot fail: the guardian was just inserted.
    let newly = state
      .progression
      .evaluate_badges(guardian.guardian_id)
      .unwrap_or_default();
    self.publish_badges(guardian.guardian_id, &newly);

    match state.progression.guardian(guardian.guardian_id) {
      Ok(current) => current.clone(),
      Err(_) => guardian,
    }
  }

  // ── Relay membership ──────────────────────────────────────────────────

  /// Join a patient's relay for one month.
  ///
  /// Reserves the slot, appends the `join_relay` fact, awards points, and
  /// emits [`DomainEvent::RelayJoined`] (plus any badge awards). If the
  /// reservation fails, the operation fails with that error and no other
  /// state changes.
  pub fn join(
    &self,
    guardian_id: Uuid,
    patient_id: Uuid,
    month: Month,
  ) -> Result<JoinOutcome> {
    let mut state = self.lock();
    state.progression.guardian(guardian_id)?;

    let slot = state.ledger.reserve(patient_id, month, guardian_id)?;

    let action = Action::JoinRelay {
      patient: patient_id,
    };
    let points_awarded = action.points();
    state
      .progression
      .record_fact(guardian_id, action.clone(), Utc::now());
    let points_total = state.progression.award(guardian_id, &action)?;
    let newly = state.progression.evaluate_badges(guardian_id)?;

    self.sink.publish(DomainEvent::RelayJoined {
      patient: patient_id,
      month,
      guardian: guardian_id,
      points_awarded,
    });
    self.publish_badges(guardian_id, &newly);

    Ok(JoinOutcome { slot, points_total })
  }

  /// Leave a relay slot. Points already awarded are sunk — good-faith
  /// commitments that later change are not penalised. Releasing a slot held
  /// by a different guardian is a conflict; releasing an open slot is a
  /// no-op.
  pub fn leave(
    &self,
    guardian_id: Uuid,
    patient_id: Uuid,
    month: Month,
  ) -> Result<RelaySlot> {
    let mut state = self.lock();
    state.progression.guardian(guardian_id)?;

    let slot = state.ledger.slot(patient_id, month)?;
    if let Some(holder) = slot.status.donor()
      && holder != guardian_id
    {
      return Err(Error::NotSlotHolder {
        patient: patient_id,
        guardian: guardian_id,
        month,
      });
    }
    state.ledger.release(patient_id, month)
  }

  // ── Activity intake ───────────────────────────────────────────────────

  /// Record a standalone guardian action (donation, initiative, poster):
  /// appends the fact, awards points, re-evaluates badges. Returns the new
  /// point total.
  ///
  /// `join_relay` and `screening_verified` have dedicated paths and are
  /// rejected here.
  pub fn record_action(&self, guardian_id: Uuid, action: Action) -> Result<u64> {
    match action {
      Action::JoinRelay { .. } | Action::ScreeningVerified => {
        return Err(Error::UnsupportedAction(action.discriminant()));
      }
      Action::CompleteDonation | Action::JoinInitiative | Action::CreatePoster => {}
    }

    let mut state = self.lock();
    state.progression.guardian(guardian_id)?;
    state
      .progression
      .record_fact(guardian_id, action.clone(), Utc::now());
    let points_total = state.progression.award(guardian_id, &action)?;
    let newly = state.progression.evaluate_badges(guardian_id)?;
    self.publish_badges(guardian_id, &newly);

    Ok(points_total)
  }

  // ── Screening ─────────────────────────────────────────────────────────

  /// Guardian opts in to (or out of) the screening initiative.
  pub fn set_screening_interest(
    &self,
    guardian_id: Uuid,
    interested: bool,
  ) -> Result<ScreeningStatus> {
    let mut state = self.lock();
    let current = state.progression.screening_status(guardian_id)?;
    let next = if interested {
      screening::opt_in(current)?
    } else {
      screening::opt_out(current)?
    };
    state.progression.set_screening_status(guardian_id, next)?;
    Ok(next)
  }

  /// Callback from the external verification collaborator. A `verified`
  /// outcome awards points, appends the fact, and emits
  /// [`DomainEvent::ScreeningVerified`] plus any badge awards.
  pub fn on_verification_result(
    &self,
    guardian_id: Uuid,
    outcome: VerificationOutcome,
  ) -> Result<ScreeningStatus> {
    let mut state = self.lock();
    let current = state.progression.screening_status(guardian_id)?;
    let next = screening::apply_outcome(current, outcome)?;
    state.progression.set_screening_status(guardian_id, next)?;

    if next == ScreeningStatus::Verified {
      let action = Action::ScreeningVerified;
      let points_awarded = action.points();
      state
        .progression
        .record_fact(guardian_id, action.clone(), Utc::now());
      state.progression.award(guardian_id, &action)?;
      let newly = state.progression.evaluate_badges(guardian_id)?;

      self.sink.publish(DomainEvent::ScreeningVerified {
        guardian: guardian_id,
        points_awarded,
      });
      self.publish_badges(guardian_id, &newly);
    }
    Ok(next)
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Open slots for a patient, in window order.
  pub fn open_slots(&self, patient_id: Uuid) -> Result<Vec<RelaySlot>> {
    let state = self.lock();
    Ok(state.ledger.open_slots(patient_id)?.copied().collect())
  }

  /// How many of the patient's slots are confirmed.
  pub fn confirmed_count(&self, patient_id: Uuid) -> Result<usize> {
    self.lock().ledger.confirmed_count(patient_id)
  }

  /// The derived progress snapshot for a guardian.
  pub fn guardian_progress(&self, guardian_id: Uuid) -> Result<GuardianProgress> {
    self.lock().progression.progress(guardian_id)
  }

  fn publish_badges(&self, guardian_id: Uuid, badges: &[Badge]) {
    for badge in badges {
      self.sink.publish(DomainEvent::BadgeAwarded {
        guardian: guardian_id,
        badge:    *badge,
      });
    }
  }
}
