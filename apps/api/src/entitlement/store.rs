//! Entitlement persistence.
//!
//! The flag lives under one fixed key. A missing key means "not entitled";
//! that is never an error.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;

/// Storage key of the premium flag.
pub const ENTITLEMENT_KEY: &str = "careerkit:premium_entitlement";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Backing store for the entitlement flag. Carried in `AppState` as
/// `Arc<dyn EntitlementStore>`.
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    async fn load(&self) -> Result<bool, StoreError>;
    async fn save(&self, premium: bool) -> Result<(), StoreError>;
    fn backend(&self) -> &'static str;
}

pub struct RedisEntitlementStore {
    client: redis::Client,
}

impl RedisEntitlementStore {
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: redis::Client::open(url)?,
        })
    }
}

#[async_trait]
impl EntitlementStore for RedisEntitlementStore {
    async fn load(&self) -> Result<bool, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(ENTITLEMENT_KEY).await?;
        Ok(matches!(value.as_deref(), Some("true") | Some("1")))
    }

    async fn save(&self, premium: bool) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        if premium {
            conn.set::<_, _, ()>(ENTITLEMENT_KEY, "true").await?;
        } else {
            conn.del::<_, ()>(ENTITLEMENT_KEY).await?;
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

/// Process-local store, used when no Redis URL is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryEntitlementStore {
    premium: AtomicBool,
}

impl MemoryEntitlementStore {
    pub fn new(premium: bool) -> Self {
        Self {
            premium: AtomicBool::new(premium),
        }
    }
}

#[async_trait]
impl EntitlementStore for MemoryEntitlementStore {
    async fn load(&self) -> Result<bool, StoreError> {
        Ok(self.premium.load(Ordering::Acquire))
    }

    async fn save(&self, premium: bool) -> Result<(), StoreError> {
        self.premium.store(premium, Ordering::Release);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
