//! The two staking windows measured from pool genesis.
//!
//! ```text
//! genesis ── whitelist window ──> main opens ── lock duration ──> main closes
//! ```
//!
//! Both windows are half-open: the whitelist window is `[genesis, main_opens)`
//! and the main window is `[main_opens, main_closes)`.

use crate::error::PoolError;
use lpstake_types::{StakingParams, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakingPhase {
    NotStarted,
    WhitelistOpen,
    MainOpen,
    Closed,
}

impl fmt::Display for StakingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::WhitelistOpen => "whitelist open",
            Self::MainOpen => "main open",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingSchedule {
    pub genesis: Timestamp,
    pub whitelist_secs: u64,
    pub main_secs: u64,
}

impl StakingSchedule {
    pub fn new(genesis: Timestamp, params: &StakingParams) -> Self {
        Self {
            genesis,
            whitelist_secs: params.whitelist_duration_secs,
            main_secs: params.lock_duration_secs,
        }
    }

    pub fn main_opens_at(&self) -> Timestamp {
        self.genesis.plus_secs(self.whitelist_secs)
    }

    pub fn main_closes_at(&self) -> Timestamp {
        self.main_opens_at().plus_secs(self.main_secs)
    }

    pub fn phase_at(&self, now: Timestamp) -> StakingPhase {
        if now < self.genesis {
            StakingPhase::NotStarted
        } else if now < self.main_opens_at() {
            StakingPhase::WhitelistOpen
        } else if now < self.main_closes_at() {
            StakingPhase::MainOpen
        } else {
            StakingPhase::Closed
        }
    }

    pub fn check_whitelist_entry(&self, now: Timestamp) -> Result<(), PoolError> {
        match self.phase_at(now) {
            StakingPhase::WhitelistOpen => Ok(()),
            StakingPhase::NotStarted => Err(PoolError::StakingNotOpen),
            StakingPhase::MainOpen | StakingPhase::Closed => Err(PoolError::WhitelistWindowClosed),
        }
    }

    pub fn check_main_entry(&self, now: Timestamp) -> Result<(), PoolError> {
        match self.phase_at(now) {
            StakingPhase::MainOpen => Ok(()),
            StakingPhase::NotStarted | StakingPhase::WhitelistOpen => {
                Err(PoolError::StakingNotOpen)
            }
            StakingPhase::Closed => Err(PoolError::StakingEnded),
        }
    }
}
