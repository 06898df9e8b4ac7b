use crate::domain::{Account, AccountId, AccountStatus, cpf};
use crate::error::{AccountError, ValidationError};
use crate::ports::{AccountRepository, CacheStore, cache_key};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lifetime of a cached account, measured from the cache write.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Entry point for the account lifecycle. Reads go through the cache,
/// writes go to the store, and cache trouble never fails an operation.
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
    cache: Arc<dyn CacheStore>,
    cache_ttl: Duration,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepository>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            repository,
            cache,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Validate and persist a new active account, returning its id
    pub async fn create_account(
        &self,
        holder_name: &str,
        tax_id: &str,
    ) -> Result<AccountId, AccountError> {
        if holder_name.trim().is_empty() {
            return Err(ValidationError::EmptyHolderName.into());
        }
        let tax_id = cpf::validate(tax_id)?;

        let account = Account::new(holder_name, &tax_id);
        self.repository.add(&account).await?;

        info!("CREATE_ACCOUNT: id={}", account.id());
        Ok(account.id())
    }

    /// Cache-aside lookup. `None` when the store has no such account.
    pub async fn get_account(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        let key = cache_key(id);

        if let Some(account) = self.read_cached(&key).await {
            debug!("Cache hit for {}", key);
            return Ok(Some(account));
        }
        debug!("Cache miss for {}", key);

        let Some(account) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        self.write_cached(&key, &account).await;
        Ok(Some(account))
    }

    /// Store-only listing. Unrecognized status tokens return every account.
    pub async fn list_accounts(
        &self,
        status_token: Option<&str>,
    ) -> Result<Vec<Account>, AccountError> {
        let filter = AccountStatus::filter_from_token(status_token);
        Ok(self.repository.get_all(filter).await?)
    }

    /// Overwrite name, tax id and status of an existing account, then drop
    /// its cache entry. The inputs are not re-validated here.
    pub async fn update_account(
        &self,
        id: AccountId,
        holder_name: &str,
        tax_id: &str,
        status_token: &str,
    ) -> Result<bool, AccountError> {
        let Some(mut account) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };

        account.rename_holder(holder_name);
        account.change_tax_id(tax_id);
        account.set_status(AccountStatus::from_update_token(status_token));

        self.repository.update(&account).await?;
        info!(
            "UPDATE_ACCOUNT: id={}, active={}",
            account.id(),
            account.is_active()
        );

        let key = cache_key(id);
        if let Err(e) = self.cache.remove(&key).await {
            warn!("Failed to invalidate {}: {}", key, e);
        }

        Ok(true)
    }

    /// Soft delete. The cached copy, if any, is left to expire on its own.
    pub async fn deactivate_account(&self, id: AccountId) -> Result<bool, AccountError> {
        let Some(mut account) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };

        account.deactivate();
        self.repository.update(&account).await?;

        info!("DEACTIVATE_ACCOUNT: id={}", id);
        Ok(true)
    }

    async fn read_cached(&self, key: &str) -> Option<Account> {
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_slice::<Account>(&bytes) {
            Ok(account) => Some(account),
            Err(e) => {
                warn!("Evicting unreadable cache entry {}: {}", key, e);
                if let Err(e) = self.cache.remove(key).await {
                    warn!("Failed to evict {}: {}", key, e);
                }
                None
            }
        }
    }

    async fn write_cached(&self, key: &str, account: &Account) {
        let payload = match serde_json::to_vec(account) {
            Ok(payload) => Bytes::from(payload),
            Err(e) => {
                warn!("Failed to serialize {} for caching: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key, payload, self.cache_ttl).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
    }
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}
