use crate::domain::{Account, AccountId};
use crate::ports::AccountRepository;
use async_trait::async_trait;
use shared::{Result, StoreError};
use sled::Db;
use std::path::Path;

const ACCOUNTS_TREE: &str = "accounts";

fn storage_error(err: sled::Error) -> StoreError {
    StoreError::Storage(err.to_string())
}

fn serialization_error(err: serde_json::Error) -> StoreError {
    StoreError::Serialization(err.to_string())
}

/// Sled-backed account store, one JSON row per account keyed by UUID bytes
#[derive(Clone)]
pub struct SledAccountRepository {
    db: Db,
}

impl SledAccountRepository {
    /// Open (or create) the database at `path`
    /// Creates the parent directory if it doesn't exist
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Storage(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path).map_err(storage_error)?;
        Ok(Self { db })
    }

    fn accounts_tree(&self) -> Result<sled::Tree> {
        self.db.open_tree(ACCOUNTS_TREE).map_err(storage_error)
    }

    async fn flush(&self) -> Result<()> {
        self.db.flush_async().await.map_err(storage_error)?;
        Ok(())
    }

    fn decode(bytes: &[u8]) -> Result<Account> {
        serde_json::from_slice(bytes).map_err(serialization_error)
    }
}

#[async_trait]
impl AccountRepository for SledAccountRepository {
    async fn add(&self, account: &Account) -> Result<()> {
        let tree = self.accounts_tree()?;
        let row = serde_json::to_vec(account).map_err(serialization_error)?;

        // Insert only if the key is vacant
        tree.compare_and_swap(account.id().as_uuid().as_bytes(), None as Option<&[u8]>, Some(row))
            .map_err(storage_error)?
            .map_err(|_| StoreError::Conflict(account.id().to_string()))?;

        self.flush().await
    }

    async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let tree = self.accounts_tree()?;

        match tree.get(id.as_uuid().as_bytes()).map_err(storage_error)? {
            Some(row) => Ok(Some(Self::decode(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self, is_active: Option<bool>) -> Result<Vec<Account>> {
        let tree = self.accounts_tree()?;
        let mut accounts = Vec::new();

        for item in tree.iter() {
            let (_, row) = item.map_err(storage_error)?;
            let account = Self::decode(&row)?;

            if is_active.is_none_or(|wanted| account.is_active() == wanted) {
                accounts.push(account);
            }
        }

        Ok(accounts)
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let tree = self.accounts_tree()?;
        let key = account.id().as_uuid().as_bytes().to_vec();

        if !tree.contains_key(&key).map_err(storage_error)? {
            return Err(StoreError::Missing(account.id().to_string()));
        }

        let row = serde_json::to_vec(account).map_err(serialization_error)?;
        tree.insert(key, row).map_err(storage_error)?;

        self.flush().await
    }

    async fn delete(&self, id: AccountId) -> Result<bool> {
        let tree = self.accounts_tree()?;
        let removed = tree
            .remove(id.as_uuid().as_bytes())
            .map_err(storage_error)?
            .is_some();

        self.flush().await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_repo(dir: &TempDir) -> SledAccountRepository {
        SledAccountRepository::new(dir.path().join("accounts.sled")).unwrap()
    }

    #[tokio::test]
    async fn test_sled_add_get_update_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = open_repo(&temp_dir);

        let mut account = Account::new("Maria Silva", "123.456.789-01");
        repo.add(&account).await.unwrap();

        let fetched = repo.get_by_id(account.id()).await.unwrap();
        assert_eq!(fetched.as_ref(), Some(&account));

        account.rename_holder("Maria S.");
        account.deactivate();
        repo.update(&account).await.unwrap();

        let fetched = repo.get_by_id(account.id()).await.unwrap().unwrap();
        assert_eq!(fetched.holder_name(), "Maria S.");
        assert!(!fetched.is_active());

        assert!(repo.delete(account.id()).await.unwrap());
        assert!(repo.get_by_id(account.id()).await.unwrap().is_none());
        assert!(!repo.delete(account.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_sled_add_conflict() {
        let temp_dir = TempDir::new().unwrap();
        let repo = open_repo(&temp_dir);

        let account = Account::new("Maria Silva", "12345678901");
        repo.add(&account).await.unwrap();

        let result = repo.add(&account).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_sled_update_missing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = open_repo(&temp_dir);

        let result = repo.update(&Account::new("Ghost", "12345678901")).await;
        assert!(matches!(result, Err(StoreError::Missing(_))));
    }

    #[tokio::test]
    async fn test_sled_get_all_with_filter() {
        let temp_dir = TempDir::new().unwrap();
        let repo = open_repo(&temp_dir);

        let active = Account::new("Ativa", "11111111111");
        let mut inactive = Account::new("Inativa", "22222222222");
        inactive.deactivate();
        repo.add(&active).await.unwrap();
        repo.add(&inactive).await.unwrap();

        assert_eq!(repo.get_all(None).await.unwrap().len(), 2);
        assert_eq!(repo.get_all(Some(true)).await.unwrap(), vec![active]);
        assert_eq!(repo.get_all(Some(false)).await.unwrap(), vec![inactive]);
    }
}
