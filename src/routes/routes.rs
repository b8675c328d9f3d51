//! Route table for the export upload API.
//!
//! ## Structure
//! - **Export endpoint** (behind the API-key layer)
//!   - `POST /` -> store a JSON export, reply with a signed download URL
//!
//! - **Health endpoints** (open, mounted at root)
//!   - `GET /healthz` -> liveness
//!   - `GET /readyz`  -> bucket reachability
//!
//! The key check is attached with `route_layer` on the method router, so a
//! non-POST request to `/` is answered by the 405 method fallback (empty
//! body) before the layer ever runs.

use crate::{
    auth::require_api_key,
    handlers::{
        export_handlers::save_export,
        health_handlers::{healthz, readyz},
    },
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Build the router with shared state applied.
pub fn routes(state: AppState) -> Router {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // export endpoint, key-checked
        .route(
            "/",
            post(save_export).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_api_key,
            )),
        )
        .with_state(state)
}
