//! Axum route handler for the template registry.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::layout::templates::{all_layouts, LayoutParameters};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    #[serde(flatten)]
    pub layout: &'static LayoutParameters,
    /// True when the current entitlement does not cover this template.
    pub locked: bool,
}

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<Vec<TemplateSummary>> {
    let entitlement = state.entitlement.snapshot();
    Json(
        all_layouts()
            .map(|layout| TemplateSummary {
                layout,
                locked: entitlement.is_locked(layout),
            })
            .collect(),
    )
}
