pub mod domain;
pub mod error;
pub mod persistence;
pub mod ports;
pub mod service;

// Re-export commonly used types
pub use domain::{Account, AccountId, AccountStatus};
pub use error::{AccountError, ValidationError};
pub use persistence::{InMemoryAccountRepository, SledAccountRepository};
pub use ports::{AccountRepository, CacheStore, cache_key};
pub use service::{AccountService, DEFAULT_CACHE_TTL};
