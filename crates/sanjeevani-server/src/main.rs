//! sanjeevani server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), builds an
//! empty in-memory relay engine, and serves the JSON API over HTTP. Emitted
//! domain events are handed to a tracing-backed notification sink; user
//! visible delivery is a downstream collaborator's concern.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use sanjeevani_core::{
  coordinator::RelayCoordinator,
  event::{DomainEvent, EventSink},
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Sanjeevani relay-coordination server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `SANJEEVANI_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  host: String,
  port: u16,
}

/// Notification sink that surfaces domain events on the server log. A real
/// deployment swaps this for a push-delivery collaborator.
struct TracingSink;

impl EventSink for TracingSink {
  fn publish(&self, event: DomainEvent) {
    match &event {
      DomainEvent::RelayJoined {
        patient,
        month,
        guardian,
        points_awarded,
      } => tracing::info!(
        %patient, %month, %guardian, points_awarded,
        "guardian joined relay"
      ),
      DomainEvent::BadgeAwarded { guardian, badge } => {
        tracing::info!(
          %guardian, %badge, name = badge.display_name(),
          "badge awarded"
        )
      }
      DomainEvent::ScreeningVerified {
        guardian,
        points_awarded,
      } => {
        tracing::info!(%guardian, points_awarded, "screening verified")
      }
    }
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 7200)?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SANJEEVANI"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Build the engine: empty ledgers, zero points. State lives for the
  // process lifetime; persistence is an external collaborator.
  let coordinator = Arc::new(RelayCoordinator::new(Arc::new(TracingSink)));

  let app = sanjeevani_api::api_router(coordinator)
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
