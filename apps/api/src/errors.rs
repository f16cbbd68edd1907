use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::entitlement::store::StoreError;
use crate::llm_client::LlmError;
use crate::render::pdf::ExportError;
use crate::share::codec::ShareError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Premium required: {0}")]
    PremiumRequired(String),

    #[error("Share link has no data")]
    ShareMissing,

    #[error("Share link is corrupt: {0}")]
    ShareCorrupt(String),

    #[error("Document too large to share ({len} > {max})")]
    ShareTooLarge { len: usize, max: usize },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ShareError> for AppError {
    fn from(e: ShareError) -> Self {
        match e {
            ShareError::NoData => AppError::ShareMissing,
            ShareError::Corrupt(detail) => AppError::ShareCorrupt(detail),
            ShareError::TooLarge { len, max } | ShareError::TokenTooLong { len, max } => {
                AppError::ShareTooLarge { len, max }
            }
            ShareError::Serialize(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Locked { .. } => AppError::PremiumRequired(e.to_string()),
            ExportError::Pdf(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::PremiumRequired(_) => "PREMIUM_REQUIRED",
            AppError::ShareMissing => "SHARE_MISSING",
            AppError::ShareCorrupt(_) => "SHARE_CORRUPT",
            AppError::ShareTooLarge { .. } => "SHARE_TOO_LARGE",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Unavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PremiumRequired(msg) => (StatusCode::PAYMENT_REQUIRED, msg.clone()),
            AppError::ShareMissing => (
                StatusCode::BAD_REQUEST,
                "This link doesn't contain a shared résumé.".to_string(),
            ),
            AppError::ShareCorrupt(detail) => {
                tracing::warn!("Rejected share token: {detail}");
                (
                    StatusCode::BAD_REQUEST,
                    "This share link is damaged or incomplete. Ask the sender for a new link."
                        .to_string(),
                )
            }
            AppError::ShareTooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "This résumé is too long to share by link. Download the PDF instead.".to_string(),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Entitlement store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::templates::TemplateId;

    #[test]
    fn test_share_errors_map_to_distinct_codes() {
        assert_eq!(AppError::from(ShareError::NoData).code(), "SHARE_MISSING");
        assert_eq!(AppError::from(ShareError::Corrupt("x".into())).code(), "SHARE_CORRUPT");
        let too_large = AppError::from(ShareError::TooLarge { len: 5000, max: 4000 });
        assert_eq!(too_large.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
        let too_long = AppError::from(ShareError::TokenTooLong { len: 48_000, max: 12_000 });
        assert_eq!(too_long.code(), "SHARE_TOO_LARGE");
        assert_eq!(too_long.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_locked_export_is_payment_required() {
        let err = AppError::from(ExportError::Locked { template: TemplateId::Elegant });
        assert_eq!(err.code(), "PREMIUM_REQUIRED");
        assert_eq!(err.into_response().status(), StatusCode::PAYMENT_REQUIRED);
    }
}
