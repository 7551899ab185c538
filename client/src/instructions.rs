//! Instruction data for the price-consuming instructions
//!
//! Data is the 8-byte Anchor discriminator followed by little-endian args.
//! Callers supply account metas; the slippage helpers turn a quoted ask/bid
//! into the `max_amount` / `min_amount` argument the program checks against.

use crate::codec::{instruction_discriminator, AccountReader, AccountWriter};
use crate::ClientError;
use curve_math::BPS;
use solana_sdk::instruction::{AccountMeta, Instruction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmInstruction {
    /// Taker buys one NFT, paying at most `max_amount`
    BuyNft { max_amount: u64 },
    /// Taker sells one NFT into a Token pool for at least `min_amount`
    SellNftTokenPool { min_amount: u64 },
    /// Taker sells one NFT into a Trade pool for at least `min_amount`
    SellNftTradePool { min_amount: u64 },
    /// Owner funds a pool
    DepositSol { lamports: u64 },
    /// Owner withdraws from a pool
    WithdrawSol { lamports: u64 },
}

impl AmmInstruction {
    const NAMES: [&'static str; 5] = [
        "buy_nft",
        "sell_nft_token_pool",
        "sell_nft_trade_pool",
        "deposit_sol",
        "withdraw_sol",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AmmInstruction::BuyNft { .. } => Self::NAMES[0],
            AmmInstruction::SellNftTokenPool { .. } => Self::NAMES[1],
            AmmInstruction::SellNftTradePool { .. } => Self::NAMES[2],
            AmmInstruction::DepositSol { .. } => Self::NAMES[3],
            AmmInstruction::WithdrawSol { .. } => Self::NAMES[4],
        }
    }

    fn arg(&self) -> u64 {
        match *self {
            AmmInstruction::BuyNft { max_amount } => max_amount,
            AmmInstruction::SellNftTokenPool { min_amount }
            | AmmInstruction::SellNftTradePool { min_amount } => min_amount,
            AmmInstruction::DepositSol { lamports } | AmmInstruction::WithdrawSol { lamports } => {
                lamports
            }
        }
    }

    /// Serialized instruction data
    pub fn data(&self) -> Vec<u8> {
        let mut writer = AccountWriter::with_capacity(16);
        writer.write_bytes(&instruction_discriminator(self.name()));
        writer.write_u64(self.arg());
        writer.into_inner()
    }

    /// Parse instruction data produced by [`Self::data`]
    pub fn unpack(data: &[u8]) -> Result<Self, ClientError> {
        let mut reader = AccountReader::new(data);
        let discriminator = reader
            .read_bytes::<8>()
            .map_err(|e| ClientError::InvalidInstructionData(e.to_string()))?;
        let arg = reader
            .read_u64()
            .map_err(|e| ClientError::InvalidInstructionData(e.to_string()))?;

        let index = Self::NAMES
            .iter()
            .position(|name| instruction_discriminator(name) == discriminator)
            .ok_or_else(|| {
                ClientError::InvalidInstructionData(format!(
                    "unknown discriminator {:?}",
                    discriminator
                ))
            })?;

        Ok(match index {
            0 => AmmInstruction::BuyNft { max_amount: arg },
            1 => AmmInstruction::SellNftTokenPool { min_amount: arg },
            2 => AmmInstruction::SellNftTradePool { min_amount: arg },
            3 => AmmInstruction::DepositSol { lamports: arg },
            _ => AmmInstruction::WithdrawSol { lamports: arg },
        })
    }

    pub fn into_instruction(self, accounts: Vec<AccountMeta>) -> Instruction {
        Instruction {
            program_id: crate::ID,
            accounts,
            data: self.data(),
        }
    }
}

/// Highest amount a buyer should accept: ask raised by `slippage_bps`, rounded up
pub fn max_amount_with_slippage(ask: u64, slippage_bps: u16) -> u64 {
    let bps = u128::from(BPS);
    let scaled = u128::from(ask) * (bps + u128::from(slippage_bps));
    let max_amount = scaled.div_ceil(bps);
    u64::try_from(max_amount).unwrap_or(u64::MAX)
}

/// Lowest amount a seller should accept: bid lowered by `slippage_bps`, rounded down
pub fn min_amount_with_slippage(bid: u64, slippage_bps: u16) -> u64 {
    let bps = u128::from(BPS);
    let keep = bps.saturating_sub(u128::from(slippage_bps));
    // bid * keep / bps <= bid, always fits
    (u128::from(bid) * keep / bps) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    #[test]
    fn test_instruction_data_layout() {
        let ix = AmmInstruction::BuyNft {
            max_amount: 1_050_000,
        };
        let data = ix.data();

        assert_eq!(data.len(), 16);
        assert_eq!(&data[..8], &instruction_discriminator("buy_nft"));
        assert_eq!(&data[8..], &1_050_000u64.to_le_bytes());
    }

    #[test]
    fn test_unpack_all_variants() {
        let all = [
            AmmInstruction::BuyNft { max_amount: 1 },
            AmmInstruction::SellNftTokenPool { min_amount: 2 },
            AmmInstruction::SellNftTradePool { min_amount: 3 },
            AmmInstruction::DepositSol { lamports: 4 },
            AmmInstruction::WithdrawSol { lamports: 5 },
        ];

        for ix in all {
            assert_eq!(AmmInstruction::unpack(&ix.data()).unwrap(), ix);
        }
    }

    #[test]
    fn test_unpack_rejects_garbage() {
        assert!(AmmInstruction::unpack(&[0u8; 16]).is_err());
        assert!(AmmInstruction::unpack(&[1, 2, 3]).is_err());

        let mut truncated = AmmInstruction::DepositSol { lamports: 9 }.data();
        truncated.pop();
        assert!(matches!(
            AmmInstruction::unpack(&truncated),
            Err(ClientError::InvalidInstructionData(_))
        ));
    }

    #[test]
    fn test_into_instruction() {
        let pool = Pubkey::new_unique();
        let taker = Pubkey::new_unique();
        let ix = AmmInstruction::SellNftTradePool { min_amount: 990_000 }.into_instruction(vec![
            AccountMeta::new(pool, false),
            AccountMeta::new(taker, true),
        ]);

        assert_eq!(ix.program_id, crate::ID);
        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[1].is_signer);
    }

    #[test]
    fn test_slippage_limits() {
        assert_eq!(max_amount_with_slippage(1_000_000, 0), 1_000_000);
        assert_eq!(max_amount_with_slippage(1_000_000, 50), 1_005_000);
        // 3 * 1.0001 = 3.0003 -> 4
        assert_eq!(max_amount_with_slippage(3, 1), 4);
        assert_eq!(max_amount_with_slippage(u64::MAX, 100), u64::MAX);

        assert_eq!(min_amount_with_slippage(1_000_000, 0), 1_000_000);
        assert_eq!(min_amount_with_slippage(1_000_000, 50), 995_000);
        // 3 * 0.9999 = 2.9997 -> 2
        assert_eq!(min_amount_with_slippage(3, 1), 2);
        assert_eq!(min_amount_with_slippage(1_000_000, 20_000), 0);
    }
}
