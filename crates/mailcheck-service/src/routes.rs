use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use mailcheck_core::wire::{CHECK_EMAILS_PATH, STATUS_PATH};

use crate::auth::require_api_key;
use crate::handlers;
use crate::state::ServiceState;

/// Create the router: `/status` is public, `/check_emails` needs the key.
pub fn create_router(state: ServiceState) -> Router {
    let public_routes: Router<ServiceState> =
        Router::new().route(STATUS_PATH, get(handlers::status));

    let protected_routes: Router<ServiceState> = Router::new()
        .route(CHECK_EMAILS_PATH, post(handlers::check_emails))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
