//! Ledger query client for the pact wallet link.
//!
//! Turns derived addresses into balance reads against the remote ledger's
//! view-function RPC (with a resource-fetch fallback for the native coin)
//! and forwards transfer requests to the external signing/broadcast
//! service. "Resource not found" is a valid zero-balance reading here, not
//! an error; real transport and HTTP failures are.

pub mod client;
pub mod config;
pub mod error;
pub mod snapshot;

pub use client::{LedgerQueryClient, TransferReceipt};
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use snapshot::BalanceSnapshot;
