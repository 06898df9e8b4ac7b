pub mod requests;
pub mod responses;

pub use requests::{CreateAccountRequest, ListAccountsQuery, UpdateAccountRequest};
pub use responses::{
    AccountResponse, CreateAccountResponse, ErrorResponse, HealthResponse, MessageResponse,
};
