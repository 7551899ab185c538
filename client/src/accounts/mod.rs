//! Program accounts and discriminator-based identification

pub mod nft_deposit_receipt;
pub mod pool;

pub use nft_deposit_receipt::*;
pub use pool::*;

/// Account kinds owned by the program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmAccountKind {
    Pool,
    NftDepositReceipt,
}

/// Identify an account by its 8-byte discriminator
pub fn identify_account(data: &[u8]) -> Option<AmmAccountKind> {
    let discriminator: [u8; 8] = data.get(..8)?.try_into().ok()?;

    if discriminator == Pool::discriminator() {
        Some(AmmAccountKind::Pool)
    } else if discriminator == NftDepositReceipt::discriminator() {
        Some(AmmAccountKind::NftDepositReceipt)
    } else {
        None
    }
}

/// Decoded program account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmmAccount {
    Pool(Box<Pool>),
    NftDepositReceipt(NftDepositReceipt),
}

/// Identify and decode an account; `Ok(None)` for foreign accounts
pub fn decode_account(data: &[u8]) -> Result<Option<AmmAccount>, crate::ClientError> {
    let account = match identify_account(data) {
        Some(AmmAccountKind::Pool) => AmmAccount::Pool(Box::new(Pool::from_bytes(data)?)),
        Some(AmmAccountKind::NftDepositReceipt) => {
            AmmAccount::NftDepositReceipt(NftDepositReceipt::from_bytes(data)?)
        }
        None => return Ok(None),
    };
    Ok(Some(account))
}
