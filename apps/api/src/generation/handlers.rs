//! Axum route handlers for generation and audit.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::audit::{deep_audit, quick_audit, DeepAudit, QuickAudit};
use crate::generation::generator::{generate_document, GenerateRequest, GeneratedDocument};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    pub text: String,
    #[serde(default)]
    pub target_role: String,
    /// Also run the premium LLM review.
    #[serde(default)]
    pub deep: bool,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub quick: QuickAudit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep: Option<DeepAudit>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/generate
///
/// Asks the generation backend for one document. 503 when no API key is configured.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedDocument>, AppError> {
    request.validate()?;
    let llm = state.llm()?;
    let document = generate_document(&request, llm).await?;
    Ok(Json(document))
}

/// POST /api/v1/audit
///
/// Quick audit is always returned. `deep: true` adds the LLM review and
/// requires premium.
pub async fn handle_audit(
    State(state): State<AppState>,
    Json(request): Json<AuditRequest>,
) -> Result<Json<AuditResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let entitlement = state.entitlement.snapshot();
    if request.deep && !entitlement.premium {
        return Err(AppError::PremiumRequired(
            "The deep résumé audit is a premium feature".to_string(),
        ));
    }

    let quick = quick_audit(&request.text);
    let deep = if request.deep {
        Some(deep_audit(&request.text, &request.target_role, state.llm()?).await?)
    } else {
        None
    };

    Ok(Json(AuditResponse { quick, deep }))
}
