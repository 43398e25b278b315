//! Dual-asset time-locked staking pool.
//!
//! Users stake USDC together with a fixed multiple of BRBC and receive a
//! transferable position. The admin distributes USDC rewards over the staked
//! principal; positions accrue their share through a single growth
//! accumulator. Exits go through a request → fund → withdraw queue, with a
//! penalty on requests made before the position's lock deadline.
//!
//! This crate handles:
//! - Whitelist and main staking windows, per-call, per-wallet and pool caps
//! - Reward injection and per-position settlement
//! - The withdrawal queue and early-exit penalty
//! - Owner-only position transfers
//! - Snapshots, events and reporting views

pub mod accounting;
pub mod engine;
pub mod error;
pub mod events;
pub mod math;
pub mod position;
pub mod report;
pub mod rewards;
pub mod shared;
pub mod snapshot;
pub mod transfer;
pub mod whitelist;
pub mod window;
pub mod withdrawal;

pub use accounting::PoolAccounting;
pub use engine::{ExitReceipt, Payout, StakingPool};
pub use error::{ErrorKind, PoolError, SnapshotError};
pub use events::{EventBus, PoolEvent};
pub use position::{Position, PositionId, PositionStore};
pub use report::{PoolSummary, PositionReport};
pub use shared::SharedPool;
pub use snapshot::{PoolSnapshot, SNAPSHOT_VERSION};
pub use whitelist::WhitelistRegistry;
pub use window::{StakingPhase, StakingSchedule};
pub use withdrawal::{ExitQuote, WithdrawalState};
