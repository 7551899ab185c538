//! NFT AMM Quoter
//!
//! Off-chain service that polls pools and logs the best executable bid/ask
//! across them, together with the slippage-adjusted instruction limits.

mod book;
mod config;

use anyhow::{Context, Result};
use book::{PoolEntry, QuoteBook};
use config::Config;
use futures::future::join_all;
use nft_amm_client::instructions::{max_amount_with_slippage, min_amount_with_slippage};
use nft_amm_client::rpc::{fetch_pools, fetch_pools_by_owner};
use nft_amm_client::{quote_pool, shared_escrows, AccountCache, Pool};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if std::env::args().any(|arg| arg == "--write-default-config") {
        return Config::write_default(&Config::path());
    }

    log::info!("Starting NFT AMM Quoter");

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({:#}), using default devnet config", e);
        Config::default_devnet()
    });

    log::info!("Connected to RPC: {}", config.rpc_url);
    log::info!(
        "Watching {} pools and {} owners",
        config.pools.len(),
        config.owners.len()
    );

    let client = RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());

    let mut book = QuoteBook::new();
    let mut interval = time::interval(Duration::from_secs(config.poll_interval_secs.max(1)));
    let mut tick: u64 = 0;

    loop {
        interval.tick().await;
        tick += 1;

        if let Err(e) = refresh_quotes(&mut book, &client, &config, tick).await {
            log::error!("Error refreshing quotes: {:#}", e);
            continue;
        }

        report(&book, config.slippage_bps);
    }
}

/// Re-fetch every watched pool and its escrow, then re-quote into `book`
async fn refresh_quotes(
    book: &mut QuoteBook,
    client: &RpcClient,
    config: &Config,
    tick: u64,
) -> Result<()> {
    let pools = load_pools(client, config).await?;
    if pools.is_empty() {
        log::debug!("No pools to quote");
        book.retain(&[]);
        return Ok(());
    }

    let escrows = shared_escrows(pools.values());
    let escrow_cache = AccountCache::prefetch(client, &escrows)
        .await
        .context("Failed to fetch shared escrows")?;

    let now = unix_timestamp();
    let live: Vec<(&Pubkey, &Pool)> = pools
        .iter()
        .filter(|(address, pool)| {
            let expired = pool.is_expired(now);
            if expired {
                log::debug!("Skipping expired pool {}", address);
            }
            !expired
        })
        .collect();

    let quotes = join_all(live.iter().map(|(address, pool)| {
        let cache = &escrow_cache;
        async move { (**address, quote_pool(pool, cache).await) }
    }))
    .await;

    let mut quoted = Vec::with_capacity(quotes.len());
    for (pool, result) in quotes {
        match result {
            Ok(quote) => {
                log::debug!("Pool {}: ask {:?}, bid {:?}", pool, quote.ask, quote.bid);
                book.update(PoolEntry {
                    pool,
                    quote,
                    updated_at: tick,
                });
                quoted.push(pool);
            }
            Err(e) => {
                log::error!("Failed to quote pool {}: {}", pool, e);
            }
        }
    }

    book.retain(&quoted);
    Ok(())
}

/// Configured pools plus pools discovered by owner, keyed by address
async fn load_pools(client: &RpcClient, config: &Config) -> Result<BTreeMap<Pubkey, Pool>> {
    let mut pools = BTreeMap::new();

    let configured = config.pool_addresses()?;
    for (address, pool) in fetch_pools(client, &configured)
        .await
        .context("Failed to fetch configured pools")?
    {
        pools.insert(address, pool);
    }

    for owner in config.owner_addresses()? {
        let owned = fetch_pools_by_owner(client, &owner)
            .await
            .context(format!("Failed to discover pools of {}", owner))?;
        pools.extend(owned);
    }

    Ok(pools)
}

fn report(book: &QuoteBook, slippage_bps: u16) {
    match book.best_bid() {
        Some((pool, bid)) => log::info!(
            "Best bid: {} from {} (min_amount {})",
            bid,
            pool,
            min_amount_with_slippage(bid, slippage_bps)
        ),
        None => log::info!("No bids"),
    }

    match book.best_ask() {
        Some((pool, ask)) => log::info!(
            "Best ask: {} from {} (max_amount {})",
            ask,
            pool,
            max_amount_with_slippage(ask, slippage_bps)
        ),
        None => log::info!("No asks"),
    }

    log::debug!("Quote book size: {}", book.len());
}

fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
