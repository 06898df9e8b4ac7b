pub mod account_ops;
pub mod health;

pub use account_ops::{
    create_account, deactivate_account, get_account, list_accounts, update_account,
};
pub use health::health_check;
