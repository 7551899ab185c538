//! Program derived addresses

use solana_sdk::pubkey::Pubkey;

pub const POOL_SEED: &[u8] = b"pool";
pub const SHARED_ESCROW_SEED: &[u8] = b"shared_escrow";
pub const NFT_RECEIPT_SEED: &[u8] = b"nft_receipt";

/// Get the pool PDA and bump seed
pub fn find_pool_address(owner: &Pubkey, pool_id: &[u8; 32]) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_SEED, owner.as_ref(), pool_id.as_ref()], &crate::ID)
}

/// Get the shared escrow PDA and bump seed
pub fn find_shared_escrow_address(owner: &Pubkey, escrow_id: &[u8; 32]) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[SHARED_ESCROW_SEED, owner.as_ref(), escrow_id.as_ref()],
        &crate::ID,
    )
}

/// Get the NFT deposit receipt PDA for a mint held by `pool`
pub fn find_nft_deposit_receipt_address(mint: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[NFT_RECEIPT_SEED, mint.as_ref(), pool.as_ref()], &crate::ID)
}

/// Get the pool seeds with bump for signing
pub fn pool_signer_seeds<'a>(
    owner: &'a Pubkey,
    pool_id: &'a [u8; 32],
    bump_seed: &'a [u8],
) -> [&'a [u8]; 4] {
    [POOL_SEED, owner.as_ref(), pool_id.as_ref(), bump_seed]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_address_is_deterministic() {
        let owner = Pubkey::new_unique();
        let pool_id = [9u8; 32];

        let (a, bump_a) = find_pool_address(&owner, &pool_id);
        let (b, bump_b) = find_pool_address(&owner, &pool_id);
        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
        assert!(!a.is_on_curve());
    }

    #[test]
    fn test_pool_address_depends_on_inputs() {
        let owner = Pubkey::new_unique();
        let (a, _) = find_pool_address(&owner, &[1u8; 32]);
        let (b, _) = find_pool_address(&owner, &[2u8; 32]);
        let (c, _) = find_pool_address(&Pubkey::new_unique(), &[1u8; 32]);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_seed_namespaces_do_not_collide() {
        let owner = Pubkey::new_unique();
        let id = [5u8; 32];
        assert_ne!(
            find_pool_address(&owner, &id).0,
            find_shared_escrow_address(&owner, &id).0
        );
    }

    #[test]
    fn test_signer_seeds_recreate_pool_address() {
        let owner = Pubkey::new_unique();
        let pool_id = [3u8; 32];
        let (pool, bump) = find_pool_address(&owner, &pool_id);

        let bump_seed = [bump];
        let seeds = pool_signer_seeds(&owner, &pool_id, &bump_seed);
        let created = Pubkey::create_program_address(&seeds, &crate::ID).unwrap();
        assert_eq!(created, pool);
    }

    #[test]
    fn test_receipt_address() {
        let mint = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let (receipt, _) = find_nft_deposit_receipt_address(&mint, &pool);
        assert_ne!(receipt, find_nft_deposit_receipt_address(&pool, &mint).0);
    }
}
