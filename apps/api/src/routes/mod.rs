pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::document::handlers as documents;
use crate::entitlement::handlers as entitlement;
use crate::generation::handlers as generation;
use crate::layout::handlers as layout;
use crate::share::handlers as share;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Templates
        .route("/api/v1/templates", get(layout::handle_list_templates))
        // Documents
        .route("/api/v1/documents/parse", post(documents::handle_parse))
        .route("/api/v1/documents/preview", post(documents::handle_preview))
        .route("/api/v1/documents/export", post(documents::handle_export))
        .route("/api/v1/documents/generate", post(generation::handle_generate))
        .route("/api/v1/audit", post(generation::handle_audit))
        // Sharing
        .route("/api/v1/share", post(share::handle_create_share))
        .route("/api/v1/share/decode", post(share::handle_decode_share))
        .route("/view", get(share::handle_view))
        // Entitlement
        .route(
            "/api/v1/entitlement",
            get(entitlement::handle_get_entitlement).delete(entitlement::handle_revoke),
        )
        .route(
            "/api/v1/entitlement/confirm",
            post(entitlement::handle_confirm),
        )
        .with_state(state)
}
