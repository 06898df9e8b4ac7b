use shared::StoreError;
use thiserror::Error;

/// Input rejected before any store or cache interaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Holder name is required")]
    EmptyHolderName,

    #[error("Invalid CPF: expected 11 digits, found {digits}")]
    InvalidTaxId { digits: usize },
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
