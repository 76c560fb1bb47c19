//! API Routes
//!
//! HTTP endpoint definitions.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, rejection::PathRejection, Extension, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::domain::{OperationContext, OperationType, Wallet};
use crate::error::AppError;
use crate::handlers::{BalanceCommand, CreateWalletCommand, WalletHandler};
use crate::store::BalanceStore;

/// Router state: the shared ledger core
pub type LedgerState<S> = Arc<WalletHandler<S>>;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletOperationRequest {
    pub wallet_id: Uuid,
    pub operation_type: OperationType,
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalanceResponse {
    pub wallet_id: Uuid,
    pub balance: i64,
}

impl From<Wallet> for WalletBalanceResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            wallet_id: wallet.id,
            balance: wallet.balance,
        }
    }
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router<S: BalanceStore + 'static>() -> Router<LedgerState<S>> {
    Router::new()
        .route("/wallets", post(create_wallet::<S>))
        .route("/wallets/:wallet_id", get(get_wallet::<S>))
        .route("/wallet", post(process_operation::<S>))
}

// =========================================================================
// POST /wallets
// =========================================================================

/// Create a wallet; an empty body or a body without `walletId` gets a
/// generated id
async fn create_wallet<S: BalanceStore>(
    State(ledger): State<LedgerState<S>>,
    Extension(context): Extension<OperationContext>,
    body: Bytes,
) -> Result<(StatusCode, Json<WalletBalanceResponse>), AppError> {
    let request: CreateWalletRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateWalletRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::InvalidRequest(format!("Malformed JSON: {}", e)))?
    };

    let command = match request.wallet_id {
        Some(wallet_id) => CreateWalletCommand::new().with_wallet_id(wallet_id),
        None => CreateWalletCommand::new(),
    };

    let span = tracing::info_span!(
        "create_wallet",
        correlation_id = ?context.correlation_id,
        requested_id = ?request.wallet_id,
    );
    let wallet = ledger.create_wallet(command).instrument(span).await?;

    Ok((StatusCode::CREATED, Json(wallet.into())))
}

// =========================================================================
// POST /wallet
// =========================================================================

/// Deposit into or withdraw from a wallet
async fn process_operation<S: BalanceStore>(
    State(ledger): State<LedgerState<S>>,
    Extension(context): Extension<OperationContext>,
    request: Result<Json<WalletOperationRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = request.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let command = BalanceCommand::new(request.wallet_id, request.operation_type, request.amount);

    let span = tracing::info_span!(
        "wallet_operation",
        correlation_id = ?context.correlation_id,
        wallet_id = %command.wallet_id,
        operation = %command.operation_type,
        amount = command.amount,
    );
    ledger.execute(command).instrument(span).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// GET /wallets/:wallet_id
// =========================================================================

/// Get wallet balance
async fn get_wallet<S: BalanceStore>(
    State(ledger): State<LedgerState<S>>,
    Extension(context): Extension<OperationContext>,
    wallet_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<WalletBalanceResponse>, AppError> {
    let Path(wallet_id) =
        wallet_id.map_err(|_| AppError::InvalidRequest("Invalid walletId".to_string()))?;

    let span = tracing::info_span!(
        "get_wallet",
        correlation_id = ?context.correlation_id,
        wallet_id = %wallet_id,
    );
    let wallet = ledger.get_wallet(wallet_id).instrument(span).await?;

    Ok(Json(wallet.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_request_wire_format() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"walletId":"{}","operationType":"WITHDRAW","amount":300}}"#,
            id
        );

        let request: WalletOperationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.wallet_id, id);
        assert_eq!(request.operation_type, OperationType::Withdraw);
        assert_eq!(request.amount, 300);
    }

    #[test]
    fn test_create_request_wallet_id_optional() {
        let request: CreateWalletRequest = serde_json::from_str("{}").unwrap();
        assert!(request.wallet_id.is_none());
    }

    #[test]
    fn test_balance_response_from_wallet() {
        let id = Uuid::new_v4();
        let response = WalletBalanceResponse::from(Wallet::new(id, 42));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["walletId"], id.to_string());
        assert_eq!(json["balance"], 42);
    }
}
