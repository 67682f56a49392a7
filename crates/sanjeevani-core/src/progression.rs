//! [`ProgressionEngine`] — points, derived levels, and badge credentials.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  activity::{Action, ActivityFact},
  error::{Error, Result},
  guardian::{Guardian, GuardianProgress, ScreeningStatus},
};

/// Cumulative points required per level step.
pub const POINTS_PER_LEVEL: u64 = 200;

/// Distinct patients required for [`Badge::RelayChampion`].
pub const RELAY_CHAMPION_PATIENTS: usize = 3;

/// Completed donations required for [`Badge::LifeSaver`].
pub const LIFE_SAVER_DONATIONS: usize = 10;

/// Posters required for [`Badge::AwarenessWarrior`].
pub const AWARENESS_WARRIOR_POSTERS: usize = 10;

// ─── Badges ──────────────────────────────────────────────────────────────────

/// A permanent credential. Once earned, never revoked.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Badge {
  NewMember,
  FirstDonation,
  RelayChampion,
  AwarenessWarrior,
  GeneticGuardian,
  LifeSaver,
}

impl Badge {
  /// Human-readable badge name shown by UI collaborators.
  pub fn display_name(&self) -> &'static str {
    match self {
      Self::NewMember => "New Member",
      Self::FirstDonation => "First Drop",
      Self::RelayChampion => "Relay Champion",
      Self::AwarenessWarrior => "Awareness Warrior",
      Self::GeneticGuardian => "Genetic Guardian",
      Self::LifeSaver => "Life Saver",
    }
  }
}

// ─── Derived values ──────────────────────────────────────────────────────────

/// Level 1 starts at 0 points; each level requires [`POINTS_PER_LEVEL`] more
/// cumulative points than the last threshold. Monotonic in `points`.
pub fn compute_level(points: u64) -> u32 {
  (points / POINTS_PER_LEVEL) as u32 + 1
}

/// Fraction of progress toward the next level, clamped to `[0, 1]`.
/// Display only; nothing else derives from it.
pub fn progress_to_next_level(points: u64) -> f64 {
  let next = u64::from(compute_level(points)) * POINTS_PER_LEVEL;
  (points as f64 / next as f64).clamp(0.0, 1.0)
}

/// The badge set a guardian's fact history currently satisfies. Pure; does
/// not consult or modify previously earned badges.
pub fn satisfied_badges(
  facts: &[ActivityFact],
  guardian_id: Uuid,
  screening: ScreeningStatus,
) -> BTreeSet<Badge> {
  let mut donations = 0usize;
  let mut posters = 0usize;
  let mut relay_patients = BTreeSet::new();

  for fact in facts.iter().filter(|f| f.guardian_id == guardian_id) {
    match &fact.action {
      Action::JoinRelay { patient } => {
        relay_patients.insert(*patient);
      }
      Action::CompleteDonation => donations += 1,
      Action::CreatePoster => posters += 1,
      Action::JoinInitiative | Action::ScreeningVerified => {}
    }
  }

  let mut earned = BTreeSet::from([Badge::NewMember]);
  if donations >= 1 {
    earned.insert(Badge::FirstDonation);
  }
  if donations >= LIFE_SAVER_DONATIONS {
    earned.insert(Badge::LifeSaver);
  }
  if relay_patients.len() >= RELAY_CHAMPION_PATIENTS {
    earned.insert(Badge::RelayChampion);
  }
  if posters >= AWARENESS_WARRIOR_POSTERS {
    earned.insert(Badge::AwarenessWarrior);
  }
  if screening == ScreeningStatus::Verified {
    earned.insert(Badge::GeneticGuardian);
  }
  earned
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Single source of truth for guardian balances, badges, and the append-only
/// activity log.
#[derive(Default)]
pub struct ProgressionEngine {
  guardians: HashMap<Uuid, Guardian>,
  facts:     Vec<ActivityFact>,
}

impl ProgressionEngine {
  pub fn new() -> Self { Self::default() }

  /// Insert a freshly created guardian record. The coordinator assigns the
  /// id, so the key is fresh.
  pub fn register(&mut self, guardian: Guardian) {
    self.guardians.insert(guardian.guardian_id, guardian);
  }

  pub fn guardian(&self, guardian_id: Uuid) -> Result<&Guardian> {
    self
      .guardians
      .get(&guardian_id)
      .ok_or(Error::GuardianNotFound(guardian_id))
  }

  fn guardian_mut(&mut self, guardian_id: Uuid) -> Result<&mut Guardian> {
    self
      .guardians
      .get_mut(&guardian_id)
      .ok_or(Error::GuardianNotFound(guardian_id))
  }

  /// Add the action's fixed point value to the guardian's balance. Points
  /// only ever increase. Returns the new balance.
  pub fn award(&mut self, guardian_id: Uuid, action: &Action) -> Result<u64> {
    let guardian = self.guardian_mut(guardian_id)?;
    guardian.points += action.points();
    Ok(guardian.points)
  }

  /// Append to the activity log. Facts are never edited or deleted.
  pub fn record_fact(
    &mut self,
    guardian_id: Uuid,
    action: Action,
    recorded_at: DateTime<Utc>,
  ) {
    self.facts.push(ActivityFact {
      guardian_id,
      action,
      recorded_at,
    });
  }

  /// Re-evaluate badge rules against the guardian's fact history and merge
  /// any newly satisfied badges into the earned set. Earned badges are never
  /// removed, so re-evaluation with no new facts is a no-op. Returns the
  /// newly earned badges in badge order.
  pub fn evaluate_badges(&mut self, guardian_id: Uuid) -> Result<Vec<Badge>> {
    let screening = self.guardian(guardian_id)?.screening;
    let satisfied = satisfied_badges(&self.facts, guardian_id, screening);

    let guardian = self.guardian_mut(guardian_id)?;
    let newly = satisfied
      .into_iter()
      .filter(|badge| guardian.badges.insert(*badge))
      .collect();
    Ok(newly)
  }

  pub fn screening_status(&self, guardian_id: Uuid) -> Result<ScreeningStatus> {
    Ok(self.guardian(guardian_id)?.screening)
  }

  pub fn set_screening_status(
    &mut self,
    guardian_id: Uuid,
    status: ScreeningStatus,
  ) -> Result<()> {
    self.guardian_mut(guardian_id)?.screening = status;
    Ok(())
  }

  /// Materialise the derived progress snapshot for a guardian.
  pub fn progress(&self, guardian_id: Uuid) -> Result<GuardianProgress> {
    let guardian = self.guardian(guardian_id)?;
    Ok(GuardianProgress {
      guardian_id,
      points:    guardian.points,
      level:     compute_level(guardian.points),
      progress:  progress_to_next_level(guardian.points),
      badges:    guardian.badges.iter().copied().collect(),
      screening: guardian.screening,
    })
  }

  /// The full activity log, oldest first.
  pub fn facts(&self) -> &[ActivityFact] { &self.facts }
}
