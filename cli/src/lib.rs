//! Building blocks of the `lpstake` simulator binary.
//!
//! A simulation replays a JSON script of steps against a [`StakingPool`]
//! backed by an in-memory asset ledger and a manually advanced clock.
//!
//! [`StakingPool`]: lpstake_pool::StakingPool

pub mod config;
pub mod error;
pub mod inspect;
pub mod script;

pub use config::{resolve_account, PoolConfig, StakingConfig};
pub use error::CliError;
pub use inspect::{inspect, SnapshotView};
pub use script::{parse_script, Simulator, Step, StepOutput, StepResult};
