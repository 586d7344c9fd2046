use serde::{Deserialize, Serialize};

use crate::GenZError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MintRequest<'a> {
    pub player_id: &'a str,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransferRequest<'a> {
    pub from_player_id: &'a str,
    pub to_player_id: &'a str,
    pub amount: i64,
}

/// Acknowledgement returned by mint and transfer operations.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// On-chain transaction hash or ledger transaction id.
    pub transaction_id: String,
    /// Ledger-side mint record id; present on mint responses only.
    #[serde(default)]
    pub mint_id: Option<String>,
}

/// Wallet balance for one player.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub player_id: String,
    /// Balance as a decimal string; amounts can exceed an `f64` mantissa.
    pub balance: String,
}

/// Token economy metadata.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct EconomyInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(body: &str) -> crate::Result<T> {
    serde_json::from_str(body).map_err(|err| {
        GenZError::Decode(format!("invalid response JSON: {err}; body: {body}"))
    })
}
