//! Wallet endpoints.

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, Envelope};
use crate::error::ApiError;

/// Wallet balance in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub balance: i64,
    pub currency: String,
}

/// A single wallet movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub id: String,
    /// Signed amount in minor units; negative for charges.
    pub amount: i64,
    /// "topup", "payment" or "refund".
    pub kind: String,
    /// RFC 3339 timestamp.
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApiClient {
    /// `GET /wallet`.
    pub async fn wallet(&self) -> Result<WalletBalance, ApiError> {
        let resp: Envelope<WalletBalance> = self.get("/wallet").await?;
        Ok(resp.data)
    }

    /// `GET /wallet/transactions`.
    pub async fn wallet_transactions(&self) -> Result<Vec<WalletTransaction>, ApiError> {
        let resp: Envelope<Vec<WalletTransaction>> = self.get("/wallet/transactions").await?;
        Ok(resp.data)
    }
}
