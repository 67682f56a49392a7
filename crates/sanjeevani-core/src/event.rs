//! Domain events and the notification-collaborator seam.

use serde::Serialize;
use uuid::Uuid;

use crate::{month::Month, progression::Badge};

/// An observable unit-of-work outcome, delivered synchronously to the
/// notification collaborator. User-visible delivery is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
  RelayJoined {
    patient:        Uuid,
    month:          Month,
    guardian:       Uuid,
    points_awarded: u64,
  },
  BadgeAwarded {
    guardian: Uuid,
    badge:    Badge,
  },
  ScreeningVerified {
    guardian:       Uuid,
    points_awarded: u64,
  },
}

/// Subscriber seam for emitted domain events. Implementations must not call
/// back into the coordinator; events are published while its lock is held.
pub trait EventSink: Send + Sync {
  fn publish(&self, event: DomainEvent);
}

/// Sink that discards everything, for deployments without a notification
/// collaborator.
pub struct NullSink;

impl EventSink for NullSink {
  fn publish(&self, _event: DomainEvent) {}
}
