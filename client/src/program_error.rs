//! Program error codes
//!
//! The program reports failures as `InstructionError::Custom(code)`; codes
//! start at Anchor's custom error offset (6000).

use solana_sdk::{instruction::InstructionError, transaction::TransactionError};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AmmProgramError {
    #[error("Wrong whitelist")]
    WrongWhitelist = 6000,

    #[error("Signer does not own the pool")]
    BadOwner = 6001,

    #[error("Mint proof does not match the pool whitelist")]
    BadMintProof = 6002,

    /// Quoted price moved past the caller's max amount / min amount
    #[error("Price mismatch")]
    PriceMismatch = 6003,

    #[error("Pool type does not support this operation")]
    WrongPoolType = 6004,

    #[error("Pool or shared escrow has insufficient balance")]
    InsufficientBalance = 6005,

    #[error("Pool has expired")]
    ExpiredPool = 6006,

    #[error("Arithmetic error")]
    ArithmeticError = 6007,

    #[error("Shared escrow pool reached its taker sell cap")]
    MaxTakerSellCountExceeded = 6008,

    #[error("Market maker fee is too high")]
    FeesTooHigh = 6009,

    #[error("Missing or wrong cosigner")]
    WrongCosigner = 6010,

    #[error("Pool still holds NFTs or funds")]
    PoolNotEmpty = 6011,

    #[error("Maker broker does not match the pool")]
    WrongMakerBroker = 6012,

    #[error("Invalid curve parameters")]
    InvalidCurve = 6013,
}

impl AmmProgramError {
    pub const ALL: [AmmProgramError; 14] = [
        AmmProgramError::WrongWhitelist,
        AmmProgramError::BadOwner,
        AmmProgramError::BadMintProof,
        AmmProgramError::PriceMismatch,
        AmmProgramError::WrongPoolType,
        AmmProgramError::InsufficientBalance,
        AmmProgramError::ExpiredPool,
        AmmProgramError::ArithmeticError,
        AmmProgramError::MaxTakerSellCountExceeded,
        AmmProgramError::FeesTooHigh,
        AmmProgramError::WrongCosigner,
        AmmProgramError::PoolNotEmpty,
        AmmProgramError::WrongMakerBroker,
        AmmProgramError::InvalidCurve,
    ];

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.code() == code)
    }

    /// Extract the program error from a failed transaction, if it is one of ours
    pub fn from_transaction_error(err: &TransactionError) -> Option<Self> {
        match err {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
                Self::from_code(*code)
            }
            _ => None,
        }
    }

    /// Same as [`Self::from_transaction_error`] for RPC client errors
    pub fn from_rpc_error(err: &solana_client::client_error::ClientError) -> Option<Self> {
        err.get_transaction_error()
            .and_then(|tx_err| Self::from_transaction_error(&tx_err))
    }
}
