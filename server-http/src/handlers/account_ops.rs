use crate::api::{
    AccountResponse, CreateAccountRequest, CreateAccountResponse, ErrorResponse,
    ListAccountsQuery, MessageResponse, UpdateAccountRequest,
};
use crate::state::AppState;
use accounts::{AccountError, AccountId};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};
use uuid::Uuid;

type ApiError = (StatusCode, Json<ErrorResponse>);

const ACCOUNT_NOT_FOUND: &str = "Account not found";

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(ACCOUNT_NOT_FOUND)),
    )
}

fn into_api_error(err: AccountError) -> ApiError {
    match err {
        AccountError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ),
        AccountError::Store(e) => {
            error!("Account store failure: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Account store unavailable")),
            )
        }
    }
}

/// POST /api/accounts
pub async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<CreateAccountResponse>), ApiError> {
    let id = state
        .accounts
        .create_account(&req.holder_name, &req.cpf)
        .await
        .map_err(into_api_error)?;

    Ok((StatusCode::CREATED, Json(id.into())))
}

/// GET /api/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, ApiError> {
    info!("GET_ACCOUNT: id={}", id);

    match state.accounts.get_account(AccountId::from(id)).await {
        Ok(Some(account)) => Ok(Json(account.into())),
        Ok(None) => Err(not_found()),
        Err(e) => Err(into_api_error(e)),
    }
}

/// GET /api/accounts?status=ativo|inativo
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let accounts = state
        .accounts
        .list_accounts(query.status.as_deref())
        .await
        .map_err(into_api_error)?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// PUT /api/accounts/{id}
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let updated = state
        .accounts
        .update_account(AccountId::from(id), &req.holder_name, &req.cpf, &req.status)
        .await
        .map_err(into_api_error)?;

    if !updated {
        return Err(not_found());
    }

    Ok(Json(MessageResponse::new("Account updated")))
}

/// DELETE /api/accounts/{id} - soft delete
pub async fn deactivate_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deactivated = state
        .accounts
        .deactivate_account(AccountId::from(id))
        .await
        .map_err(into_api_error)?;

    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
