use std::sync::Arc;

use crate::config::Config;
use crate::entitlement::store::EntitlementStore;
use crate::entitlement::Entitlement;
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Live premium flag; handlers take one snapshot per request.
    pub entitlement: Entitlement,
    /// Pluggable persistence for the flag. Redis when configured, memory otherwise.
    pub store: Arc<dyn EntitlementStore>,
    /// `None` when no API key is configured.
    pub llm: Option<LlmClient>,
}

impl AppState {
    pub fn llm(&self) -> Result<&LlmClient, AppError> {
        self.llm.as_ref().ok_or_else(|| {
            AppError::Unavailable(
                "AI generation is not configured on this server".to_string(),
            )
        })
    }

    #[cfg(test)]
    pub fn for_tests(premium: bool) -> Self {
        use crate::entitlement::store::MemoryEntitlementStore;

        AppState {
            config: Config::for_tests(),
            entitlement: Entitlement::new(premium),
            store: Arc::new(MemoryEntitlementStore::new(premium)),
            llm: None,
        }
    }
}
