//! Quote book across pools (best bid = highest, best ask = lowest)

use nft_amm_client::PoolQuote;
use priority_queue::PriorityQueue;
use solana_sdk::pubkey::Pubkey;
use std::cmp::Reverse;
use std::collections::HashMap;

/// One pool's latest quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolEntry {
    pub pool: Pubkey,
    pub quote: PoolQuote,
    /// Slot or tick the quote was taken at
    pub updated_at: u64,
}

/// Best executable prices over the watched pools
pub struct QuoteBook {
    /// Max-heap: highest bid first
    bids: PriorityQueue<Pubkey, u64>,
    /// Min-heap: lowest ask first
    asks: PriorityQueue<Pubkey, Reverse<u64>>,
    entries: HashMap<Pubkey, PoolEntry>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self {
            bids: PriorityQueue::new(),
            asks: PriorityQueue::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or replace a pool's quote; an unavailable side leaves that queue
    pub fn update(&mut self, entry: PoolEntry) {
        let pool = entry.pool;

        match entry.quote.bid {
            Some(bid) => {
                self.bids.push(pool, bid);
            }
            None => {
                self.bids.remove(&pool);
            }
        }
        match entry.quote.ask {
            Some(ask) => {
                self.asks.push(pool, Reverse(ask));
            }
            None => {
                self.asks.remove(&pool);
            }
        }

        self.entries.insert(pool, entry);
    }

    pub fn remove(&mut self, pool: &Pubkey) -> Option<PoolEntry> {
        self.bids.remove(pool);
        self.asks.remove(pool);
        self.entries.remove(pool)
    }

    /// Pool paying the most for an NFT
    pub fn best_bid(&self) -> Option<(Pubkey, u64)> {
        self.bids.peek().map(|(pool, bid)| (*pool, *bid))
    }

    /// Pool selling an NFT for the least
    pub fn best_ask(&self) -> Option<(Pubkey, u64)> {
        self.asks.peek().map(|(pool, Reverse(ask))| (*pool, *ask))
    }

    pub fn get(&self, pool: &Pubkey) -> Option<&PoolEntry> {
        self.entries.get(pool)
    }

    /// Drop pools not in `keep`, e.g. closed or no longer configured
    pub fn retain(&mut self, keep: &[Pubkey]) {
        let stale: Vec<Pubkey> = self
            .entries
            .keys()
            .filter(|pool| !keep.contains(pool))
            .copied()
            .collect();

        for pool in stale {
            self.remove(&pool);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QuoteBook {
    fn default() -> Self {
        Self::new()
    }
}
