//! Pool account - one AMM position for a whitelist/currency pair

use crate::codec::{account_discriminator, AccountReader, AccountWriter};
use crate::pda::find_pool_address;
use crate::ClientError;
use curve_math::CurveType;
use solana_sdk::pubkey::Pubkey;

/// Which sides a pool trades on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PoolType {
    /// Holds currency and only bids for NFTs
    Token = 0,
    /// Holds NFTs and only asks
    Nft = 1,
    /// Two-sided; bids one step below its ask and charges a market-maker fee
    Trade = 2,
}

impl TryFrom<u8> for PoolType {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PoolType::Token),
            1 => Ok(PoolType::Nft),
            2 => Ok(PoolType::Trade),
            _ => Err(ClientError::InvalidAccountData(format!(
                "unknown pool type {}",
                value
            ))),
        }
    }
}

/// Pricing configuration, fixed at pool creation (editable by the owner)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub pool_type: PoolType,
    pub curve_type: CurveType,
    /// Base price in lamports (or the currency's smallest unit)
    pub starting_price: u64,
    /// Absolute step for linear curves, bps per step for exponential curves
    pub delta: u64,
    /// Settlement-only; does not affect quoting
    pub mm_compound_fees: bool,
    /// Market-maker fee, meaningful for Trade pools only
    pub mm_fee_bps: Option<u16>,
}

impl PoolConfig {
    pub const LEN: usize = 1 + 1 + 8 + 8 + 1 + 2;

    fn read(reader: &mut AccountReader<'_>) -> Result<Self, ClientError> {
        let pool_type = PoolType::try_from(reader.read_u8()?)?;
        let curve_type = CurveType::try_from(reader.read_u8()?)?;
        let starting_price = reader.read_u64()?;
        let delta = reader.read_u64()?;
        let mm_compound_fees = reader.read_bool()?;
        // 0 encodes "no fee configured"
        let mm_fee_bps = Some(reader.read_u16()?).filter(|bps| *bps != 0);

        Ok(Self {
            pool_type,
            curve_type,
            starting_price,
            delta,
            mm_compound_fees,
            mm_fee_bps,
        })
    }

    fn write(&self, writer: &mut AccountWriter) {
        writer.write_u8(self.pool_type as u8);
        writer.write_u8(u8::from(self.curve_type));
        writer.write_u64(self.starting_price);
        writer.write_u64(self.delta);
        writer.write_bool(self.mm_compound_fees);
        writer.write_u16(self.mm_fee_bps.unwrap_or(0));
    }
}

/// Lifetime trade counters maintained by the program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub taker_sell_count: u32,
    pub taker_buy_count: u32,
    pub accumulated_mm_profit: u64,
}

impl PoolStats {
    pub const LEN: usize = 4 + 4 + 8;
}

/// Decoded pool snapshot
///
/// Layout (after the 8-byte discriminator): version, bump, pool_id,
/// timestamps, config, owner, whitelist, rent_payer, currency, amount,
/// price_offset, nfts_held, stats, shared_escrow, cosigner, maker_broker,
/// max_taker_sell_count, 100 reserved bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub version: u8,
    pub bump: u8,
    pub pool_id: [u8; 32],
    pub created_at: i64,
    pub updated_at: i64,
    /// Unix timestamp after which the pool no longer trades (0 = never)
    pub expiry: i64,
    pub config: PoolConfig,
    pub owner: Pubkey,
    pub whitelist: Pubkey,
    pub rent_payer: Pubkey,
    /// Default address means native SOL
    pub currency: Pubkey,
    /// Currency held by the pool itself (bid funding without shared escrow)
    pub amount: u64,
    /// Net trade steps from the starting price; taker sells increase it
    pub price_offset: i32,
    pub nfts_held: u32,
    pub stats: PoolStats,
    /// External escrow funding bids in place of `amount`
    pub shared_escrow: Option<Pubkey>,
    pub cosigner: Option<Pubkey>,
    pub maker_broker: Option<Pubkey>,
    /// Cap on taker sells for shared-escrow pools (0 = uncapped)
    pub max_taker_sell_count: u32,
}

impl Pool {
    pub const LEN: usize = 447;

    /// Byte offset of `owner`, used by getProgramAccounts filters
    pub const OWNER_OFFSET: usize = 8 + 1 + 1 + 32 + 8 + 8 + 8 + PoolConfig::LEN;

    /// Byte offset of `whitelist`
    pub const WHITELIST_OFFSET: usize = Self::OWNER_OFFSET + 32;

    const RESERVED_LEN: usize = 100;

    pub fn discriminator() -> [u8; 8] {
        account_discriminator("Pool")
    }

    /// Decode account data; trailing bytes beyond [`Pool::LEN`] are ignored
    pub fn from_bytes(data: &[u8]) -> Result<Self, ClientError> {
        if data.len() < Self::LEN {
            return Err(ClientError::InvalidAccountData(format!(
                "pool account is {} bytes, expected at least {}",
                data.len(),
                Self::LEN
            )));
        }

        let mut reader = AccountReader::new(data);
        reader.expect_discriminator(&Self::discriminator())?;

        let pool = Self {
            version: reader.read_u8()?,
            bump: reader.read_u8()?,
            pool_id: reader.read_bytes()?,
            created_at: reader.read_i64()?,
            updated_at: reader.read_i64()?,
            expiry: reader.read_i64()?,
            config: PoolConfig::read(&mut reader)?,
            owner: reader.read_pubkey()?,
            whitelist: reader.read_pubkey()?,
            rent_payer: reader.read_pubkey()?,
            currency: reader.read_pubkey()?,
            amount: reader.read_u64()?,
            price_offset: reader.read_i32()?,
            nfts_held: reader.read_u32()?,
            stats: PoolStats {
                taker_sell_count: reader.read_u32()?,
                taker_buy_count: reader.read_u32()?,
                accumulated_mm_profit: reader.read_u64()?,
            },
            shared_escrow: reader.read_nullable_pubkey()?,
            cosigner: reader.read_nullable_pubkey()?,
            maker_broker: reader.read_nullable_pubkey()?,
            max_taker_sell_count: reader.read_u32()?,
        };
        reader.skip(Self::RESERVED_LEN)?;

        Ok(pool)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = AccountWriter::with_capacity(Self::LEN);

        writer.write_bytes(&Self::discriminator());
        writer.write_u8(self.version);
        writer.write_u8(self.bump);
        writer.write_bytes(&self.pool_id);
        writer.write_i64(self.created_at);
        writer.write_i64(self.updated_at);
        writer.write_i64(self.expiry);
        self.config.write(&mut writer);
        writer.write_pubkey(&self.owner);
        writer.write_pubkey(&self.whitelist);
        writer.write_pubkey(&self.rent_payer);
        writer.write_pubkey(&self.currency);
        writer.write_u64(self.amount);
        writer.write_i32(self.price_offset);
        writer.write_u32(self.nfts_held);
        writer.write_u32(self.stats.taker_sell_count);
        writer.write_u32(self.stats.taker_buy_count);
        writer.write_u64(self.stats.accumulated_mm_profit);
        writer.write_nullable_pubkey(self.shared_escrow.as_ref());
        writer.write_nullable_pubkey(self.cosigner.as_ref());
        writer.write_nullable_pubkey(self.maker_broker.as_ref());
        writer.write_u32(self.max_taker_sell_count);
        writer.write_zeros(Self::RESERVED_LEN);

        writer.into_inner()
    }

    /// Pool PDA re-derived from `owner` and `pool_id`
    pub fn address(&self) -> Pubkey {
        find_pool_address(&self.owner, &self.pool_id).0
    }

    pub fn is_shared_escrow(&self) -> bool {
        self.shared_escrow.is_some()
    }

    /// Whether the pool has passed its expiry at `now` (unix seconds)
    pub fn is_expired(&self, now: i64) -> bool {
        self.expiry != 0 && now >= self.expiry
    }
}
