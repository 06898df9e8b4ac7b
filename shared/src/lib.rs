// shared/src/lib.rs

/// Failures raised by a durable account store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("storage: {0}")]
    Storage(String),
    #[error("serialization: {0}")]
    Serialization(String),
    #[error("account already exists: {0}")]
    Conflict(String),
    #[error("account does not exist: {0}")]
    Missing(String),
}

/// Failures raised by a cache backend. These never reach callers of the
/// account service; they degrade to a store round-trip.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub mod config;
