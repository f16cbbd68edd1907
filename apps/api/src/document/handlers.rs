//! Axum route handlers for parsing, preview and PDF export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::outline::{outline, OutlineSection};
use crate::document::sections::{analyze, ParsedDocument, SectionMap};
use crate::errors::AppError;
use crate::layout::templates::TemplateId;
use crate::models::contact::ContactInfo;
use crate::models::document::DocumentType;
use crate::render::pdf::export_pdf;
use crate::render::preview::{render_letter, render_text, VisualDocument};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub structured: bool,
    pub sections: SectionMap,
    /// Display outline; empty in raw mode.
    pub outline: Vec<OutlineSection>,
}

/// Shared body of the preview and export endpoints.
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub text: String,
    /// Unknown or missing ids fall back to Classic.
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub document_type: DocumentType,
}

impl DocumentRequest {
    fn template(&self) -> TemplateId {
        self.template
            .as_deref()
            .map(TemplateId::resolve)
            .unwrap_or_default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/parse
///
/// Never rejects input; unstructured text comes back with `structured: false`.
pub async fn handle_parse(Json(request): Json<ParseRequest>) -> Json<ParseResponse> {
    let parsed = analyze(&request.text);
    let display = match &parsed {
        ParsedDocument::Structured(map) => outline(map),
        ParsedDocument::Raw(_) => vec![],
    };
    Json(ParseResponse {
        structured: !parsed.is_raw(),
        outline: display,
        sections: match parsed {
            ParsedDocument::Structured(map) | ParsedDocument::Raw(map) => map,
        },
    })
}

/// POST /api/v1/documents/preview
///
/// Locked premium templates come back obscured with an unlock prompt, not as an error.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Json<VisualDocument> {
    let entitlement = state.entitlement.snapshot();
    let template = request.template();
    let document = match request.document_type {
        DocumentType::Resume => render_text(&request.text, template, &request.contact, &entitlement),
        DocumentType::CoverLetter => {
            render_letter(&request.text, template, &request.contact, &entitlement)
        }
    };
    Json(document)
}

/// POST /api/v1/documents/export
///
/// Returns the PDF as an attachment. Premium templates without entitlement
/// answer 402 and no file.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Result<Response, AppError> {
    let entitlement = state.entitlement.snapshot();
    let template = request.template();
    let app_name = state.config.app_name.clone();
    let DocumentRequest {
        text,
        contact,
        document_type,
        ..
    } = request;

    // Pagination is CPU-bound; keep it off the async workers.
    let artifact = tokio::task::spawn_blocking(move || {
        export_pdf(document_type, &text, template, &contact, &entitlement, &app_name)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("export task failed: {e}")))??;

    info!(
        file = %artifact.file_name,
        pages = artifact.page_count,
        "Serving PDF export"
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ),
    ];
    Ok((headers, artifact.bytes).into_response())
}
