//! Price quotation
//!
//! Reproduces the program's current ask and bid for a pool snapshot. Curve
//! prices stay exact until the final rounding: asks round up so the taker
//! never underpays, bids round down so the pool never overpays.
//!
//! An unavailable side is `Ok(None)`. Decoding faults, curve faults and
//! lookup failures are `Err`.

use crate::lookup::{escrow_available_balance, AccountLookup};
use crate::{ClientError, Pool, PoolType};
use curve_math::{evaluate, CurvePrice};
use log::{debug, trace};
use solana_sdk::pubkey::Pubkey;

/// Which side of the pool the taker is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TakerSide {
    /// Taker buys an NFT from the pool (pool ask)
    Buy,
    /// Taker sells an NFT into the pool (pool bid)
    Sell,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteOptions {
    /// Added to the pool's price offset, e.g. to price the n-th NFT of a sweep
    pub extra_offset: i32,
    /// Skip the Trade-pool market-maker fee deduction on the bid
    pub exclude_mm_fee: bool,
}

/// Currency available to fund a bid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidLiquidity {
    /// Pool's own `amount`
    Pool(u64),
    /// Shared escrow balance above its rent-exempt minimum
    SharedEscrow(u64),
}

impl BidLiquidity {
    pub fn available(&self) -> u64 {
        match *self {
            BidLiquidity::Pool(amount) | BidLiquidity::SharedEscrow(amount) => amount,
        }
    }
}

/// Current best prices of one pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolQuote {
    pub ask: Option<u64>,
    pub bid: Option<u64>,
}

/// Unrounded curve price for `side`, `None` if the pool never trades that side
///
/// Trade pools bid one step past their ask. No fee is applied here.
pub fn curve_price(
    pool: &Pool,
    side: TakerSide,
    options: QuoteOptions,
) -> Result<Option<CurvePrice>, ClientError> {
    let pool_type = pool.config.pool_type;
    let spread = match (side, pool_type) {
        (TakerSide::Buy, PoolType::Token) | (TakerSide::Sell, PoolType::Nft) => return Ok(None),
        (TakerSide::Sell, PoolType::Trade) => 1,
        _ => 0,
    };

    let offset = i64::from(pool.price_offset) + i64::from(options.extra_offset) + spread;
    let price = evaluate(
        pool.config.curve_type,
        pool.config.starting_price,
        pool.config.delta,
        offset,
    )?;

    trace!(
        "{:?} curve price at offset {} ({:?} {:?} pool): {}",
        side,
        offset,
        pool_type,
        pool.config.curve_type,
        price
    );

    Ok(Some(price))
}

/// Price a taker pays to buy an NFT from the pool
pub fn ask_price(pool: &Pool) -> Result<Option<u64>, ClientError> {
    ask_price_with(pool, QuoteOptions::default())
}

pub fn ask_price_with(pool: &Pool, options: QuoteOptions) -> Result<Option<u64>, ClientError> {
    if pool.nfts_held < 1 {
        return Ok(None);
    }

    let Some(price) = curve_price(pool, TakerSide::Buy, options)? else {
        return Ok(None);
    };
    if price.is_negative() {
        debug!("Ask unavailable: curve price {} is negative", price);
        return Ok(None);
    }

    Ok(price.ceil_u64()?)
}

/// Whether a capped shared-escrow pool has taken all the sells it may
fn taker_sell_cap_reached(pool: &Pool) -> bool {
    pool.max_taker_sell_count != 0
        && pool.is_shared_escrow()
        && i64::from(pool.price_offset) == i64::from(pool.max_taker_sell_count)
}

/// Bid before the funding check
fn nominal_bid(pool: &Pool, options: QuoteOptions) -> Result<Option<u64>, ClientError> {
    if taker_sell_cap_reached(pool) {
        debug!(
            "Bid unavailable: taker sell cap {} reached",
            pool.max_taker_sell_count
        );
        return Ok(None);
    }

    let Some(mut price) = curve_price(pool, TakerSide::Sell, options)? else {
        return Ok(None);
    };

    if pool.config.pool_type == PoolType::Trade && !options.exclude_mm_fee {
        if let Some(fee_bps) = pool.config.mm_fee_bps {
            price = price.apply_bps_discount(fee_bps)?;
        }
    }

    match price.floor_u64()? {
        Some(0) | None => {
            debug!("Bid unavailable: price {} floors to nothing", price);
            Ok(None)
        }
        bid => Ok(bid),
    }
}

/// `bid` if `liquidity` covers all of it
fn funded(bid: u64, liquidity: BidLiquidity) -> Option<u64> {
    if liquidity.available() < bid {
        debug!("Bid {} unavailable: only {:?}", bid, liquidity);
        return None;
    }
    Some(bid)
}

/// Bid given already-known funding, the synchronous core of [`bid_price_with`]
pub fn bid_price_funded_by(
    pool: &Pool,
    liquidity: BidLiquidity,
    options: QuoteOptions,
) -> Result<Option<u64>, ClientError> {
    let Some(bid) = nominal_bid(pool, options)? else {
        return Ok(None);
    };
    Ok(funded(bid, liquidity))
}

/// Price the pool pays a taker for an NFT
///
/// Shared-escrow pools fetch the escrow's live balance through `lookup`;
/// other pools are funded from their own `amount` and never suspend.
pub async fn bid_price<L>(pool: &Pool, lookup: &L) -> Result<Option<u64>, ClientError>
where
    L: AccountLookup + ?Sized,
{
    bid_price_with(pool, lookup, QuoteOptions::default()).await
}

pub async fn bid_price_with<L>(
    pool: &Pool,
    lookup: &L,
    options: QuoteOptions,
) -> Result<Option<u64>, ClientError>
where
    L: AccountLookup + ?Sized,
{
    let Some(bid) = nominal_bid(pool, options)? else {
        return Ok(None);
    };

    let liquidity = bid_liquidity(pool, lookup).await?;
    Ok(funded(bid, liquidity))
}

/// Funding source of the pool's bids
pub async fn bid_liquidity<L>(pool: &Pool, lookup: &L) -> Result<BidLiquidity, ClientError>
where
    L: AccountLookup + ?Sized,
{
    match pool.shared_escrow {
        Some(escrow) => Ok(BidLiquidity::SharedEscrow(
            escrow_available_balance(lookup, &escrow).await?,
        )),
        None => Ok(BidLiquidity::Pool(pool.amount)),
    }
}

/// Both sides of `pool` at its current offset
pub async fn quote_pool<L>(pool: &Pool, lookup: &L) -> Result<PoolQuote, ClientError>
where
    L: AccountLookup + ?Sized,
{
    Ok(PoolQuote {
        ask: ask_price(pool)?,
        bid: bid_price(pool, lookup).await?,
    })
}

/// Shared escrows referenced by `pools`, deduplicated, for batch prefetching
pub fn shared_escrows<'a>(pools: impl IntoIterator<Item = &'a Pool>) -> Vec<Pubkey> {
    let mut escrows: Vec<Pubkey> = pools
        .into_iter()
        .filter_map(|pool| pool.shared_escrow)
        .collect();
    escrows.sort_unstable();
    escrows.dedup();
    escrows
}
