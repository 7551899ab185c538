//! NFT AMM Integration Tests
//!
//! Fixtures that build pools the way the program stores them: encoded
//! account bytes owned by the program id, loaded into an `AccountCache`.

use nft_amm_client::{AccountCache, CurveType, Pool, PoolConfig, PoolStats, PoolType};
use solana_sdk::{account::Account, pubkey::Pubkey, rent::Rent, system_program};

/// Pool with sensible defaults; tests override the fields they care about
pub struct PoolBuilder {
    pool: Pool,
}

impl PoolBuilder {
    pub fn new(pool_type: PoolType, curve_type: CurveType) -> Self {
        Self {
            pool: Pool {
                version: 1,
                bump: 255,
                pool_id: Pubkey::new_unique().to_bytes(),
                created_at: 1_700_000_000,
                updated_at: 1_700_000_000,
                expiry: 0,
                config: PoolConfig {
                    pool_type,
                    curve_type,
                    starting_price: 1_000_000_000,
                    delta: 0,
                    mm_compound_fees: false,
                    mm_fee_bps: None,
                },
                owner: Pubkey::new_unique(),
                whitelist: Pubkey::new_unique(),
                rent_payer: Pubkey::new_unique(),
                currency: Pubkey::default(),
                amount: 0,
                price_offset: 0,
                nfts_held: 0,
                stats: PoolStats::default(),
                shared_escrow: None,
                cosigner: None,
                maker_broker: None,
                max_taker_sell_count: 0,
            },
        }
    }

    pub fn starting_price(mut self, starting_price: u64) -> Self {
        self.pool.config.starting_price = starting_price;
        self
    }

    pub fn delta(mut self, delta: u64) -> Self {
        self.pool.config.delta = delta;
        self
    }

    pub fn mm_fee_bps(mut self, fee_bps: u16) -> Self {
        self.pool.config.mm_fee_bps = Some(fee_bps);
        self
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.pool.amount = amount;
        self
    }

    pub fn price_offset(mut self, price_offset: i32) -> Self {
        self.pool.price_offset = price_offset;
        self
    }

    pub fn nfts_held(mut self, nfts_held: u32) -> Self {
        self.pool.nfts_held = nfts_held;
        self
    }

    pub fn shared_escrow(mut self, escrow: Pubkey, max_taker_sell_count: u32) -> Self {
        self.pool.shared_escrow = Some(escrow);
        self.pool.max_taker_sell_count = max_taker_sell_count;
        self
    }

    pub fn build(self) -> Pool {
        self.pool
    }
}

/// Pool account as returned by the RPC
pub fn pool_account(pool: &Pool) -> Account {
    let data = pool.to_bytes();
    Account {
        lamports: Rent::default().minimum_balance(data.len()),
        data,
        owner: nft_amm_client::ID,
        executable: false,
        rent_epoch: 0,
    }
}

/// Shared escrow holding `spendable` lamports above its rent-exempt minimum
pub fn escrow_account(spendable: u64, data_len: usize) -> Account {
    Account {
        lamports: Rent::default().minimum_balance(data_len) + spendable,
        data: vec![0u8; data_len],
        owner: system_program::ID,
        executable: false,
        rent_epoch: 0,
    }
}

/// Cache holding the pool account under its PDA
pub fn cache_with_pool(pool: &Pool) -> AccountCache {
    let mut cache = AccountCache::new();
    cache.insert(pool.address(), pool_account(pool));
    cache
}

/// Decode the pool back out of the cache, as a client would after a fetch
pub fn reload_pool(cache: &AccountCache, address: &Pubkey) -> Pool {
    let account = cache.get(address).expect("pool account cached");
    assert_eq!(account.owner, nft_amm_client::ID);
    Pool::from_bytes(&account.data).expect("pool decodes")
}
