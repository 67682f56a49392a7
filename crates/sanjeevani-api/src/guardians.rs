//! Handlers for `/guardians` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/guardians` | Returns 201 + the new guardian record |
//! | `GET`  | `/guardians/:id/progress` | Points, derived level, badges, screening |
//! | `POST` | `/guardians/:id/actions` | Body: an [`Action`]; returns the new point total |
//! | `POST` | `/guardians/:id/screening/interest` | Body: `{"interested": bool}` |
//! | `POST` | `/guardians/:id/screening/result` | Verification-collaborator callback |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use sanjeevani_core::{
  activity::Action,
  coordinator::RelayCoordinator,
  guardian::{GuardianProgress, ScreeningStatus},
  screening::VerificationOutcome,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// `POST /guardians` — account-collaborator intake. Returns 201 plus the
/// zero-point guardian record.
pub async fn create(
  State(coordinator): State<Arc<RelayCoordinator>>,
) -> impl IntoResponse {
  let guardian = coordinator.register_guardian();
  (StatusCode::CREATED, Json(guardian))
}

/// `GET /guardians/:id/progress`
pub async fn progress(
  State(coordinator): State<Arc<RelayCoordinator>>,
  Path(guardian_id): Path<Uuid>,
) -> Result<Json<GuardianProgress>, ApiError> {
  Ok(Json(coordinator.guardian_progress(guardian_id)?))
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
  pub points_total: u64,
}

/// `POST /guardians/:id/actions` — body is the tagged action, e.g.
/// `{"action":"complete_donation"}`.
pub async fn record_action(
  State(coordinator): State<Arc<RelayCoordinator>>,
  Path(guardian_id): Path<Uuid>,
  Json(action): Json<Action>,
) -> Result<Json<PointsResponse>, ApiError> {
  let points_total = coordinator.record_action(guardian_id, action)?;
  Ok(Json(PointsResponse { points_total }))
}

#[derive(Debug, Deserialize)]
pub struct InterestBody {
  pub interested: bool,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
  pub screening: ScreeningStatus,
}

/// `POST /guardians/:id/screening/interest`
pub async fn set_screening_interest(
  State(coordinator): State<Arc<RelayCoordinator>>,
  Path(guardian_id): Path<Uuid>,
  Json(body): Json<InterestBody>,
) -> Result<Json<ScreeningResponse>, ApiError> {
  let screening =
    coordinator.set_screening_interest(guardian_id, body.interested)?;
  Ok(Json(ScreeningResponse { screening }))
}

#[derive(Debug, Deserialize)]
pub struct ResultBody {
  pub outcome: VerificationOutcome,
}

/// `POST /guardians/:id/screening/result` — called by the external
/// verification collaborator once the lab result is processed.
pub async fn verification_result(
  State(coordinator): State<Arc<RelayCoordinator>>,
  Path(guardian_id): Path<Uuid>,
  Json(body): Json<ResultBody>,
) -> Result<Json<ScreeningResponse>, ApiError> {
  let screening =
    coordinator.on_verification_result(guardian_id, body.outcome)?;
  Ok(Json(ScreeningResponse { screening }))
}
