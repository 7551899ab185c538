//! Account-state lookups for bid funding checks
//!
//! Shared-escrow pools fund bids from an external account whose balance is
//! not part of the pool snapshot. [`AccountLookup`] is the seam that fetches
//! it; [`AccountCache`] answers from accounts fetched up front.

use crate::ClientError;
use async_trait::async_trait;
use log::{debug, trace};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{account::Account, pubkey::Pubkey, rent::Rent};
use std::collections::HashMap;

/// getMultipleAccounts accepts at most this many keys per request
pub(crate) const MAX_MULTIPLE_ACCOUNTS: usize = 100;

/// Live balance and size of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountState {
    pub lamports: u64,
    pub data_len: usize,
}

impl From<&Account> for AccountState {
    fn from(account: &Account) -> Self {
        Self {
            lamports: account.lamports,
            data_len: account.data.len(),
        }
    }
}

#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Current lamports and data length; `None` if the account does not exist
    async fn account_state(&self, address: &Pubkey) -> Result<Option<AccountState>, ClientError>;

    /// Minimum lamports to keep an account of `data_len` bytes rent exempt
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize)
        -> Result<u64, ClientError>;
}

/// Lamports a shared escrow can spend: balance above its rent-exempt minimum
///
/// A missing escrow account has nothing to spend.
pub async fn escrow_available_balance<L>(lookup: &L, escrow: &Pubkey) -> Result<u64, ClientError>
where
    L: AccountLookup + ?Sized,
{
    let Some(state) = lookup.account_state(escrow).await? else {
        debug!("Shared escrow {} not found, treating as empty", escrow);
        return Ok(0);
    };

    let rent_exempt = lookup
        .minimum_balance_for_rent_exemption(state.data_len)
        .await?;
    let available = state.lamports.saturating_sub(rent_exempt);

    trace!(
        "Shared escrow {}: lamports={} rent_exempt={} available={}",
        escrow,
        state.lamports,
        rent_exempt,
        available
    );

    Ok(available)
}

#[async_trait]
impl AccountLookup for RpcClient {
    async fn account_state(&self, address: &Pubkey) -> Result<Option<AccountState>, ClientError> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await?;
        Ok(response.value.as_ref().map(AccountState::from))
    }

    async fn minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ClientError> {
        Ok(self.get_minimum_balance_for_rent_exemption(data_len).await?)
    }
}

/// In-memory account snapshot
///
/// Rent is computed locally from `rent`, so lookups never touch the network.
#[derive(Debug, Clone, Default)]
pub struct AccountCache {
    accounts: HashMap<Pubkey, Account>,
    rent: Rent,
}

impl AccountCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rent(rent: Rent) -> Self {
        Self {
            accounts: HashMap::new(),
            rent,
        }
    }

    /// Fetch `addresses` in batches; missing accounts are simply absent
    pub async fn prefetch(client: &RpcClient, addresses: &[Pubkey]) -> Result<Self, ClientError> {
        let mut cache = Self::new();

        for chunk in addresses.chunks(MAX_MULTIPLE_ACCOUNTS) {
            let accounts = client.get_multiple_accounts(chunk).await?;
            for (address, account) in chunk.iter().zip(accounts) {
                if let Some(account) = account {
                    cache.insert(*address, account);
                }
            }
        }

        debug!(
            "Prefetched {} of {} accounts",
            cache.len(),
            addresses.len()
        );
        Ok(cache)
    }

    pub fn insert(&mut self, address: Pubkey, account: Account) {
        self.accounts.insert(address, account);
    }

    pub fn get(&self, address: &Pubkey) -> Option<&Account> {
        self.accounts.get(address)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountLookup for AccountCache {
    async fn account_state(&self, address: &Pubkey) -> Result<Option<AccountState>, ClientError> {
        Ok(self.accounts.get(address).map(AccountState::from))
    }

    async fn minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ClientError> {
        Ok(self.rent.minimum_balance(data_len))
    }
}
