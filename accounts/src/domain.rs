use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of an account, assigned once when the account is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    id: AccountId,
    holder_name: String,
    tax_id: String,
    is_active: bool,
}

impl Account {
    /// New active account with a fresh id. The tax id is stored in its
    /// digits-only form.
    pub fn new(holder_name: impl Into<String>, tax_id: &str) -> Self {
        Self {
            id: AccountId::new(),
            holder_name: holder_name.into(),
            tax_id: cpf::normalize(tax_id),
            is_active: true,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn status(&self) -> AccountStatus {
        if self.is_active {
            AccountStatus::Active
        } else {
            AccountStatus::Inactive
        }
    }

    pub fn rename_holder(&mut self, holder_name: impl Into<String>) {
        self.holder_name = holder_name.into();
    }

    /// Replaces the tax id with its digits-only form. No digit-count check.
    pub fn change_tax_id(&mut self, tax_id: &str) {
        self.tax_id = cpf::normalize(tax_id);
    }

    pub fn set_status(&mut self, status: AccountStatus) {
        match status {
            AccountStatus::Active => self.activate(),
            AccountStatus::Inactive => self.deactivate(),
        }
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    const ACTIVE_TOKEN: &'static str = "ativo";
    const INACTIVE_TOKEN: &'static str = "inativo";

    /// List filter. Unrecognized or absent tokens mean "no filter".
    pub fn filter_from_token(token: Option<&str>) -> Option<bool> {
        match token.map(str::to_lowercase).as_deref() {
            Some(Self::ACTIVE_TOKEN) => Some(true),
            Some(Self::INACTIVE_TOKEN) => Some(false),
            _ => None,
        }
    }

    /// Fail-closed: anything other than the active token is Inactive.
    pub fn from_update_token(token: &str) -> Self {
        if token.to_lowercase() == Self::ACTIVE_TOKEN {
            AccountStatus::Active
        } else {
            AccountStatus::Inactive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Ativo",
            AccountStatus::Inactive => "Inativo",
        }
    }
}

pub mod cpf {
    use crate::error::ValidationError;

    pub const CPF_DIGITS: usize = 11;

    /// Keep ASCII digits only. Other Unicode digits (full-width, Arabic-Indic)
    /// are stripped like punctuation, so the stored form is always `[0-9]{11}`.
    pub fn normalize(raw: &str) -> String {
        raw.chars().filter(char::is_ascii_digit).collect()
    }

    /// Format check only: exactly eleven digits once punctuation is removed.
    pub fn validate(raw: &str) -> Result<String, ValidationError> {
        let digits = normalize(raw);
        if digits.len() != CPF_DIGITS {
            return Err(ValidationError::InvalidTaxId {
                digits: digits.len(),
            });
        }
        Ok(digits)
    }
}
