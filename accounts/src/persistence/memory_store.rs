use crate::domain::{Account, AccountId};
use crate::ports::AccountRepository;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shared::{Result, StoreError};
use std::sync::Arc;

/// In-memory account store. Rows are lost when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    rows: Arc<DashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn add(&self, account: &Account) -> Result<()> {
        match self.rows.entry(account.id()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(account.id().to_string())),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(())
            }
        }
    }

    async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    async fn get_all(&self, is_active: Option<bool>) -> Result<Vec<Account>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| is_active.is_none_or(|wanted| row.is_active() == wanted))
            .map(|row| row.value().clone())
            .collect())
    }

    async fn update(&self, account: &Account) -> Result<()> {
        match self.rows.get_mut(&account.id()) {
            Some(mut row) => {
                *row = account.clone();
                Ok(())
            }
            None => Err(StoreError::Missing(account.id().to_string())),
        }
    }

    async fn delete(&self, id: AccountId) -> Result<bool> {
        Ok(self.rows.remove(&id).is_some())
    }
}
