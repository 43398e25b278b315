use lpstake_types::{Address, Asset};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("insufficient {asset} balance for {owner}: need {needed}, available {available}")]
    InsufficientBalance {
        asset: Asset,
        owner: Address,
        needed: u128,
        available: u128,
    },

    #[error("insufficient {asset} allowance from {owner} to {spender}: need {needed}, approved {approved}")]
    InsufficientAllowance {
        asset: Asset,
        owner: Address,
        spender: Address,
        needed: u128,
        approved: u128,
    },

    #[error("{asset} balance overflow for {owner}")]
    Overflow { owner: Address, asset: Asset },

    #[error("asset ledger backend error: {0}")]
    Backend(String),
}
