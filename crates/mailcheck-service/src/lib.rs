//! Classification service: axum router, API-key middleware, handlers.
//!
//! Stateless across requests. The only shared data is the secret and the
//! injected `Classifier`, both read-only.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub use error::ApiError;
pub use routes::create_router;
pub use state::ServiceState;

/// Bind the listen address. Kept separate from `serve` so a bind failure is
/// reported at startup, before anything else runs.
pub async fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    TcpListener::bind(addr).await
}

/// Serve until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: ServiceState,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(
        addr = %addr,
        classifier = state.classifier.name(),
        "classification service listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("classification service stopped");
    Ok(())
}
