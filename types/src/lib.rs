//! Fundamental types for the lpstake ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, the two staked assets and their raw-unit amounts, timestamps and
//! the clock abstraction, and the tunable staking parameters.

pub mod address;
pub mod amount;
pub mod error;
pub mod params;
pub mod time;

pub use address::Address;
pub use amount::{
    format_units, parse_units, units, Asset, ASSET_DECIMALS, ASSET_UNIT, BPS_DENOMINATOR,
    REWARD_GROWTH_SCALE,
};
pub use error::{AddressError, AmountError, ParamsError};
pub use params::StakingParams;
pub use time::{Clock, SystemClock, Timestamp};
