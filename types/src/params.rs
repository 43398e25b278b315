//! Staking parameters: every bound, ratio and duration the pool enforces.
//!
//! The defaults are the values the deployed pool was observed to use. All of
//! them can be overridden from configuration before a pool is created.

use crate::amount::{units, BPS_DENOMINATOR};
use crate::error::ParamsError;
use serde::{Deserialize, Serialize};

/// Tunable parameters of a staking pool. Amounts are raw USDC units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingParams {
    // ── Entry bounds ─────────────────────────────────────────────────────
    /// Smallest principal accepted by either staking path. Default: 500 USDC.
    pub min_stake: u128,

    /// Largest principal per whitelist-stake call. Default: 800 USDC.
    pub whitelist_max_stake: u128,

    /// Largest principal per main-stake call. Default: 5000 USDC.
    pub max_stake: u128,

    /// Lifetime principal one wallet may enter across both paths. Default: 5000 USDC.
    pub max_wallet_stake: u128,

    /// Initial cap on total staked principal. Adjustable by the admin.
    pub max_pool_usdc: u128,

    /// BRBC allocated per unit of USDC principal.
    pub brbc_per_usdc: u128,

    // ── Schedule ─────────────────────────────────────────────────────────
    /// Length of the whitelist-only window after genesis. Default: 1 day.
    pub whitelist_duration_secs: u64,

    /// Personal lock of each position, and length of the main window. Default: 61 days.
    pub lock_duration_secs: u64,

    // ── Exit ─────────────────────────────────────────────────────────────
    /// Principal haircut for requests before the deadline (basis points). Default: 10%.
    pub early_exit_penalty_bps: u32,

    /// Wait between a withdrawal request and the payout. Default: 1 day.
    pub withdraw_cooldown_secs: u64,
}

impl StakingParams {
    pub const DAY_SECS: u64 = 86_400;

    pub fn observed_defaults() -> Self {
        Self {
            min_stake: units(500),
            whitelist_max_stake: units(800),
            max_stake: units(5_000),
            max_wallet_stake: units(5_000),
            max_pool_usdc: units(7_500),
            brbc_per_usdc: 4,

            whitelist_duration_secs: Self::DAY_SECS,
            lock_duration_secs: 61 * Self::DAY_SECS, // 5_270_400

            early_exit_penalty_bps: 1_000, // 10%
            withdraw_cooldown_secs: Self::DAY_SECS,
        }
    }

    /// Check internal consistency of the bounds.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.min_stake == 0 {
            return Err(ParamsError::ZeroMinimum);
        }
        for max in [self.whitelist_max_stake, self.max_stake] {
            if self.min_stake > max {
                return Err(ParamsError::InvertedBounds {
                    min: self.min_stake,
                    max,
                });
            }
        }
        if u128::from(self.early_exit_penalty_bps) > BPS_DENOMINATOR {
            return Err(ParamsError::PenaltyTooHigh(self.early_exit_penalty_bps));
        }
        if self.brbc_per_usdc == 0 {
            return Err(ParamsError::ZeroRatio);
        }
        if self.lock_duration_secs == 0 {
            return Err(ParamsError::ZeroLockDuration);
        }
        Ok(())
    }

    /// Companion BRBC amount for a USDC principal.
    pub fn brbc_for(&self, usdc: u128) -> Option<u128> {
        usdc.checked_mul(self.brbc_per_usdc)
    }
}

impl Default for StakingParams {
    fn default() -> Self {
        Self::observed_defaults()
    }
}
