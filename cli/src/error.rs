//! Simulator errors.

use lpstake_pool::{PoolError, SnapshotError};
use lpstake_types::{AddressError, AmountError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("invalid amount: {0}")]
    Amount(#[from] AmountError),

    #[error("invalid address: {0}")]
    Address(#[from] AddressError),
}
