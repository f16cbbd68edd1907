//! Premium entitlement: one process-wide flag, snapshotted per request.
//!
//! Render and export never read the flag themselves; handlers take an
//! [`EntitlementContext`] snapshot up front and pass it down, so a flag change
//! mid-export cannot produce a partially gated document.

pub mod handlers;
pub mod store;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::layout::templates::LayoutParameters;

/// Live entitlement flag shared by all requests.
#[derive(Debug, Clone, Default)]
pub struct Entitlement {
    premium: Arc<AtomicBool>,
}

impl Entitlement {
    pub fn new(premium: bool) -> Self {
        Self {
            premium: Arc::new(AtomicBool::new(premium)),
        }
    }

    /// Single atomic read; callers keep the result for the whole request.
    pub fn snapshot(&self) -> EntitlementContext {
        EntitlementContext {
            premium: self.premium.load(Ordering::Acquire),
        }
    }

    pub fn grant(&self) {
        self.premium.store(true, Ordering::Release);
    }

    pub fn revoke(&self) {
        self.premium.store(false, Ordering::Release);
    }
}

/// Immutable view of the entitlement for one render or export call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EntitlementContext {
    pub premium: bool,
}

impl EntitlementContext {
    pub const FREE: EntitlementContext = EntitlementContext { premium: false };
    pub const PREMIUM: EntitlementContext = EntitlementContext { premium: true };

    pub fn allows(&self, layout: &LayoutParameters) -> bool {
        self.premium || !layout.premium_only
    }

    pub fn is_locked(&self, layout: &LayoutParameters) -> bool {
        !self.allows(layout)
    }
}
