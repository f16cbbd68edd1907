//! Axum route handlers for share links and the shared-preview viewer.

use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::layout::templates::TemplateId;
use crate::models::contact::ContactInfo;
use crate::render::preview::render_text;
use crate::share::codec::{decode, decode_query, encode, share_url, SharePayload, ShareError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateShareRequest {
    pub text: String,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub contact: ContactInfo,
}

#[derive(Debug, Serialize)]
pub struct CreateShareResponse {
    pub token: String,
    pub url: String,
}

/// Either a bare token or a full link; the token wins when both are sent.
#[derive(Debug, Deserialize)]
pub struct DecodeShareRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SharePayload {
    pub fn from_parts(contact: &ContactInfo, text: String, template: TemplateId) -> Self {
        SharePayload {
            n: contact.full_name.clone(),
            e: contact.email.clone(),
            p: contact.phone.clone(),
            r: text,
            t: template,
            l: contact.links.clone().filter(|l| !l.trim().is_empty()),
        }
    }

    pub fn contact(&self) -> ContactInfo {
        ContactInfo {
            full_name: self.n.clone(),
            email: self.e.clone(),
            phone: self.p.clone(),
            links: self.l.clone(),
            project_link: None,
        }
    }
}

/// POST /api/v1/share
pub async fn handle_create_share(
    State(state): State<AppState>,
    Json(request): Json<CreateShareRequest>,
) -> Result<Json<CreateShareResponse>, AppError> {
    let template = request
        .template
        .as_deref()
        .map(TemplateId::resolve)
        .unwrap_or_default();
    let payload = SharePayload::from_parts(&request.contact, request.text, template);
    let token = encode(&payload)?;
    let url = share_url(&state.config.share_base_url, &token);

    info!(template = %template.as_str(), token_len = token.len(), "Created share link");
    Ok(Json(CreateShareResponse { token, url }))
}

/// POST /api/v1/share/decode
pub async fn handle_decode_share(
    Json(request): Json<DecodeShareRequest>,
) -> Result<Json<SharePayload>, AppError> {
    let payload = match (request.token, request.url) {
        (Some(token), _) => decode(&token)?,
        (None, Some(url)) => decode_query(&url)?,
        (None, None) => return Err(ShareError::NoData.into()),
    };
    Ok(Json(payload))
}

/// GET /view
///
/// With a `shareData` parameter, renders the shared résumé under the viewer's
/// own entitlement. Without one, answers the normal application index.
pub async fn handle_view(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let payload = match decode_query(query.as_deref().unwrap_or_default()) {
        Ok(payload) => payload,
        Err(ShareError::NoData) => {
            return Ok(Json(json!({
                "app": state.config.app_name,
                "version": env!("CARGO_PKG_VERSION"),
                "shared": false,
            }))
            .into_response())
        }
        Err(e) => return Err(e.into()),
    };

    let entitlement = state.entitlement.snapshot();
    let document = render_text(&payload.r, payload.t, &payload.contact(), &entitlement);
    Ok(Json(document).into_response())
}
