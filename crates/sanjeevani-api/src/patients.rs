//! Handlers for `/patients` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/patients` | Body: [`NewPatient`]; returns 201 + the need record |
//! | `GET`  | `/patients/:id/slots` | Open slots in window order |
//! | `POST` | `/patients/:id/join`  | Body: [`MembershipBody`]; returns slot + point total |
//! | `POST` | `/patients/:id/leave` | Body: [`MembershipBody`]; returns the released slot |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use sanjeevani_core::{
  coordinator::{JoinOutcome, RelayCoordinator},
  month::Month,
  patient::NewPatient,
  slot::RelaySlot,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// `POST /patients` — collaborator intake for a new care need. Returns 201
/// plus the registered record (with its server-assigned id and window).
pub async fn create(
  State(coordinator): State<Arc<RelayCoordinator>>,
  Json(body): Json<NewPatient>,
) -> Result<impl IntoResponse, ApiError> {
  let need = coordinator.register_patient(body)?;
  Ok((StatusCode::CREATED, Json(need)))
}

/// `GET /patients/:id/slots`
pub async fn open_slots(
  State(coordinator): State<Arc<RelayCoordinator>>,
  Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<RelaySlot>>, ApiError> {
  Ok(Json(coordinator.open_slots(patient_id)?))
}

/// JSON body accepted by the join and leave endpoints.
#[derive(Debug, Deserialize)]
pub struct MembershipBody {
  pub guardian_id: Uuid,
  pub month:       Month,
}

/// `POST /patients/:id/join`
pub async fn join(
  State(coordinator): State<Arc<RelayCoordinator>>,
  Path(patient_id): Path<Uuid>,
  Json(body): Json<MembershipBody>,
) -> Result<Json<JoinOutcome>, ApiError> {
  let outcome = coordinator.join(body.guardian_id, patient_id, body.month)?;
  Ok(Json(outcome))
}

/// `POST /patients/:id/leave`
pub async fn leave(
  State(coordinator): State<Arc<RelayCoordinator>>,
  Path(patient_id): Path<Uuid>,
  Json(body): Json<MembershipBody>,
) -> Result<Json<RelaySlot>, ApiError> {
  let slot = coordinator.leave(body.guardian_id, patient_id, body.month)?;
  Ok(Json(slot))
}
