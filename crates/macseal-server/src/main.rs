//! macseal server
//!
//! Signs arbitrary JSON payloads with a Cloud KMS MAC key and verifies them
//! later. Configuration comes from the environment (see `macseal_core::Config`),
//! with an optional `.env` file for local development.
//!
//! Usage:
//!   GOOGLE_CLOUD_PROJECT=my-project KMS_KEY_RING=ring KMS_KEY=key \
//!     cargo run --package macseal-server

use anyhow::Context;
use macseal_core::{load_env_file, Config};
use macseal_http::{router, AppState};
use macseal_kms::CloudKmsClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "macseal_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Local development overrides; existing variables always win
    if load_env_file(".env").context("failed to read .env")? {
        tracing::info!("applied .env overrides");
    }

    let config = Config::from_env().context("invalid configuration")?;

    // Built once; immutable for the process lifetime
    let key = config.key_version_name();
    let backend = Arc::new(CloudKmsClient::new(
        config.kms_endpoint.clone(),
        config.access_token.clone(),
    ));

    tracing::info!(key = %key, "signing with key version");

    let app = router(AppState::new(key, backend))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("macseal server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
