//! NFT AMM client
//!
//! Account codecs, PDA derivation, program error mapping and instruction data
//! for the NFT AMM program, plus the quotation engine that reproduces the
//! program's current bid/ask for a pool snapshot.

pub mod accounts;
pub mod codec;
pub mod error;
pub mod instructions;
pub mod lookup;
pub mod pda;
pub mod program_error;
pub mod quote;
pub mod rpc;

pub use accounts::*;
pub use error::*;
pub use lookup::*;
pub use program_error::*;
pub use quote::*;

pub use curve_math::{CurvePrice, CurveType};

solana_sdk::declare_id!("TAMM6ub33ij1mbetoMyVBLeKY5iP41i4UPUJQGkhfsg");
