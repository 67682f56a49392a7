//! JSON REST API for the Sanjeevani relay engine.
//!
//! Exposes an axum [`Router`] over a shared
//! [`sanjeevani_core::coordinator::RelayCoordinator`]. Auth, TLS, and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sanjeevani_api::api_router(coordinator.clone()))
//! ```

pub mod error;
pub mod guardians;
pub mod patients;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use sanjeevani_core::coordinator::RelayCoordinator;

pub use error::ApiError;

/// Build a fully-materialised API router for `coordinator`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router(coordinator: Arc<RelayCoordinator>) -> Router<()> {
  Router::new()
    // Patients & relay slots
    .route("/patients", post(patients::create))
    .route("/patients/{id}/slots", get(patients::open_slots))
    .route("/patients/{id}/join", post(patients::join))
    .route("/patients/{id}/leave", post(patients::leave))
    // Guardians & progression
    .route("/guardians", post(guardians::create))
    .route("/guardians/{id}/progress", get(guardians::progress))
    .route("/guardians/{id}/actions", post(guardians::record_action))
    // Screening
    .route(
      "/guardians/{id}/screening/interest",
      post(guardians::set_screening_interest),
    )
    .route(
      "/guardians/{id}/screening/result",
      post(guardians::verification_result),
    )
    .with_state(coordinator)
}
