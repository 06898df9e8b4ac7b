#![deny(clippy::all)]

use crate::domain::{Account, AccountId};
use async_trait::async_trait;
use bytes::Bytes;
use shared::{CacheError, Result};
use std::time::Duration;

// Ports are the pluggable extension points for persistence and caching

/// Port for the authoritative account store
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a brand-new account
    async fn add(&self, account: &Account) -> Result<()>;

    /// Find an account by ID
    async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>>;

    /// List accounts, optionally only those whose active flag matches
    async fn get_all(&self, is_active: Option<bool>) -> Result<Vec<Account>>;

    /// Overwrite the stored row with the same ID
    async fn update(&self, account: &Account) -> Result<()>;

    /// Physically remove an account; true if a row was removed
    async fn delete(&self, id: AccountId) -> Result<bool>;
}

/// Port for a byte-oriented cache with per-entry expiry (e.g., Moka)
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> std::result::Result<Option<Bytes>, CacheError>;

    /// Store `value` until `ttl` has elapsed since this write
    async fn set(&self, key: &str, value: Bytes, ttl: Duration)
    -> std::result::Result<(), CacheError>;

    async fn remove(&self, key: &str) -> std::result::Result<(), CacheError>;
}

pub const CACHE_KEY_PREFIX: &str = "account:";

pub fn cache_key(id: AccountId) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_cache_key_scheme() {
        let uuid = Uuid::parse_str("0b7c6d8e-1f2a-4b3c-9d4e-5f6a7b8c9d0e").unwrap();
        assert_eq!(
            cache_key(AccountId::from(uuid)),
            "account:0b7c6d8e-1f2a-4b3c-9d4e-5f6a7b8c9d0e"
        );
    }
}
