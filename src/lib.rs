//! `genz-http` is an async HTTP client for the GenZ token-ledger API.
//!
//! The crate wraps the `/v1` ledger endpoints with ergonomic methods:
//! - [`GenZClient::mint`]
//! - [`GenZClient::transfer`]
//! - [`GenZClient::balance`]
//! - [`GenZClient::economy`]
//!
//! Transient failures (network errors and 5xx responses) are retried
//! automatically with capped exponential backoff. Statuses in the 4xx range
//! are surfaced immediately. Retry behavior is configured through
//! [`ClientOptions`].

mod client;
mod error;
mod operation;
mod options;
mod wire;

pub use client::GenZClient;
pub use error::GenZError;
pub use operation::Operation;
pub use options::ClientOptions;
pub use wire::{BalanceResponse, EconomyInfo, TransactionReceipt};

pub type Result<T> = std::result::Result<T, GenZError>;
