//! Axum route handlers for the premium entitlement.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EntitlementResponse {
    pub premium: bool,
    /// Where the flag is persisted (`redis` or `memory`).
    pub backend: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    /// Reference returned by the payment provider's checkout.
    pub payment_reference: String,
}

fn current(state: &AppState) -> EntitlementResponse {
    EntitlementResponse {
        premium: state.entitlement.snapshot().premium,
        backend: state.store.backend(),
    }
}

/// GET /api/v1/entitlement
pub async fn handle_get_entitlement(State(state): State<AppState>) -> Json<EntitlementResponse> {
    Json(current(&state))
}

/// POST /api/v1/entitlement/confirm
///
/// Records a completed purchase. The flag is persisted before it flips in
/// memory, so a store failure leaves the session unentitled.
pub async fn handle_confirm(
    State(state): State<AppState>,
    Json(request): Json<ConfirmRequest>,
) -> Result<Json<EntitlementResponse>, AppError> {
    let reference = request.payment_reference.trim();
    if reference.is_empty() {
        return Err(AppError::Validation(
            "payment_reference must not be empty".to_string(),
        ));
    }

    state.store.save(true).await?;
    state.entitlement.grant();
    info!(reference, backend = state.store.backend(), "Premium entitlement granted");

    Ok(Json(current(&state)))
}

/// DELETE /api/v1/entitlement
pub async fn handle_revoke(
    State(state): State<AppState>,
) -> Result<Json<EntitlementResponse>, AppError> {
    state.store.save(false).await?;
    state.entitlement.revoke();
    info!("Premium entitlement revoked");
    Ok(Json(current(&state)))
}
