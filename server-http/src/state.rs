use accounts::{
    AccountRepository, AccountService, CacheStore, InMemoryAccountRepository,
    SledAccountRepository,
};
use shared::config::{Config, StoreBackend};
use std::path::Path;
use std::sync::Arc;
use storage_engine::MokaCache;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
}

impl AppState {
    pub fn new(accounts: Arc<AccountService>) -> Self {
        Self { accounts }
    }

    /// Wire the configured store and a Moka cache into an account service
    pub fn from_config(config: &Config) -> shared::Result<Self> {
        let repository: Arc<dyn AccountRepository> = match config.store_backend {
            StoreBackend::Sled => {
                let path = Path::new(&config.data_dir).join("accounts.sled");
                tracing::info!("Opening sled account store at {}", path.display());
                Arc::new(SledAccountRepository::new(path)?)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory account store; data will not survive restarts");
                Arc::new(InMemoryAccountRepository::new())
            }
        };

        let cache: Arc<dyn CacheStore> = Arc::new(MokaCache::new(
            "accounts".to_string(),
            config.cache_max_entries,
        ));

        let service = AccountService::new(repository, cache).with_cache_ttl(config.cache_ttl);

        Ok(Self::new(Arc::new(service)))
    }
}
