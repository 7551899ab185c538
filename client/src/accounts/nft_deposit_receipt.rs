//! NFT deposit receipt - proves a pool holds a given mint

use crate::codec::{account_discriminator, AccountReader, AccountWriter};
use crate::ClientError;
use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NftDepositReceipt {
    pub bump: u8,
    pub mint: Pubkey,
    pub pool: Pubkey,
}

impl NftDepositReceipt {
    pub const LEN: usize = 8 + 1 + 32 + 32;

    pub fn discriminator() -> [u8; 8] {
        account_discriminator("NftDepositReceipt")
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, ClientError> {
        let mut reader = AccountReader::new(data);
        reader.expect_discriminator(&Self::discriminator())?;

        Ok(Self {
            bump: reader.read_u8()?,
            mint: reader.read_pubkey()?,
            pool: reader.read_pubkey()?,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = AccountWriter::with_capacity(Self::LEN);
        writer.write_bytes(&Self::discriminator());
        writer.write_u8(self.bump);
        writer.write_pubkey(&self.mint);
        writer.write_pubkey(&self.pool);
        writer.into_inner()
    }
}
