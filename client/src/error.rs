//! Client error types

use curve_math::CurveError;
use thiserror::Error;

/// Errors surfaced by decoding, curve evaluation and account lookups.
///
/// A pool that simply cannot trade is not an error; quoting functions return
/// `Ok(None)` for that.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Account bytes do not match the expected layout
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Instruction bytes do not match any known instruction
    #[error("Invalid instruction data: {0}")]
    InvalidInstructionData(String),

    /// Pool parameters the curve cannot evaluate
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// RPC transport or node failure
    #[error("RPC error: {0}")]
    Rpc(Box<solana_client::client_error::ClientError>),
}

impl From<solana_client::client_error::ClientError> for ClientError {
    fn from(e: solana_client::client_error::ClientError) -> Self {
        ClientError::Rpc(Box::new(e))
    }
}
