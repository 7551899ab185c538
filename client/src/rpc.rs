//! Pool account fetching

use crate::lookup::MAX_MULTIPLE_ACCOUNTS;
use crate::{ClientError, Pool};
use log::{debug, warn};
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{account::Account, pubkey::Pubkey};

/// Fetch and decode one pool; `None` if the account does not exist
pub async fn fetch_pool(client: &RpcClient, address: &Pubkey) -> Result<Option<Pool>, ClientError> {
    let response = client
        .get_account_with_commitment(address, client.commitment())
        .await?;

    response
        .value
        .map(|account| decode_pool_account(address, &account))
        .transpose()
}

/// Fetch several pools in batched requests, skipping missing accounts
pub async fn fetch_pools(
    client: &RpcClient,
    addresses: &[Pubkey],
) -> Result<Vec<(Pubkey, Pool)>, ClientError> {
    let mut pools = Vec::with_capacity(addresses.len());

    for chunk in addresses.chunks(MAX_MULTIPLE_ACCOUNTS) {
        let accounts = client.get_multiple_accounts(chunk).await?;
        for (address, account) in chunk.iter().zip(accounts) {
            match account {
                Some(account) => pools.push((*address, decode_pool_account(address, &account)?)),
                None => warn!("Pool {} not found", address),
            }
        }
    }
    Ok(pools)
}

/// All pools owned by `owner`, via getProgramAccounts
pub async fn fetch_pools_by_owner(
    client: &RpcClient,
    owner: &Pubkey,
) -> Result<Vec<(Pubkey, Pool)>, ClientError> {
    let config = RpcProgramAccountsConfig {
        filters: Some(vec![
            RpcFilterType::DataSize(Pool::LEN as u64),
            RpcFilterType::Memcmp(Memcmp::new_base58_encoded(0, &Pool::discriminator())),
            RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                Pool::OWNER_OFFSET,
                owner.as_ref(),
            )),
        ]),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            commitment: Some(client.commitment()),
            ..RpcAccountInfoConfig::default()
        },
        ..RpcProgramAccountsConfig::default()
    };

    let accounts = client
        .get_program_accounts_with_config(&crate::ID, config)
        .await?;
    debug!("Found {} pools owned by {}", accounts.len(), owner);

    accounts
        .iter()
        .map(|(address, account)| Ok((*address, decode_pool_account(address, account)?)))
        .collect()
}

fn decode_pool_account(address: &Pubkey, account: &Account) -> Result<Pool, ClientError> {
    if account.owner != crate::ID {
        return Err(ClientError::InvalidAccountData(format!(
            "{} is owned by {}, not the AMM program",
            address, account.owner
        )));
    }
    Pool::from_bytes(&account.data)
}
