//! Pure Rust price curve math for NFT AMM pools
//! No Solana dependencies, no unwrap/panic, rounding only where the caller asks for it

pub mod curve;
pub mod error;
pub mod pow;
pub mod price;

// Re-export commonly used types
pub use curve::*;
pub use error::*;
pub use pow::*;
pub use price::*;
