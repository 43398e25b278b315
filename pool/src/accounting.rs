//! Pool-wide aggregates: staked totals, reward growth, pending withdrawals.

use crate::error::PoolError;
use serde::{Deserialize, Serialize};

/// The pool's running totals.
///
/// Operations stage changes on a clone and commit it by assignment once the
/// asset movements have settled, so a rejected call never leaves a partial
/// update behind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolAccounting {
    /// USDC principal of all staked positions.
    pub pool_usdc: u128,
    /// BRBC principal of all staked positions.
    pub pool_brbc: u128,
    /// Cumulative reward per unit of principal, scaled by `REWARD_GROWTH_SCALE`.
    pub reward_growth: u128,
    /// Post-penalty USDC requested since the last funding.
    pub requested_amount: u128,
    /// Completed `fund_requests` calls. A request made in round `n` is
    /// funded once this exceeds `n`.
    pub funding_rounds: u64,
    pub max_pool_usdc: u128,

    pub total_rewards_added: u128,
    pub total_rewards_claimed: u128,
    pub total_funded_usdc: u128,
    pub total_withdrawn_usdc: u128,
}

impl PoolAccounting {
    pub fn new(max_pool_usdc: u128) -> Self {
        Self {
            max_pool_usdc,
            ..Self::default()
        }
    }

    /// Principal that can still enter before the cap is reached.
    pub fn remaining_capacity(&self) -> u128 {
        self.max_pool_usdc.saturating_sub(self.pool_usdc)
    }

    pub fn add_stake(&mut self, usdc: u128, brbc: u128) -> Result<(), PoolError> {
        let available = self.remaining_capacity();
        if usdc > available {
            return Err(PoolError::PoolCapExceeded {
                amount: usdc,
                available,
            });
        }
        self.pool_usdc = checked_add(self.pool_usdc, usdc)?;
        self.pool_brbc = checked_add(self.pool_brbc, brbc)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, usdc: u128, brbc: u128) -> Result<(), PoolError> {
        self.pool_usdc = self.pool_usdc.checked_sub(usdc).ok_or(PoolError::Overflow)?;
        self.pool_brbc = self.pool_brbc.checked_sub(brbc).ok_or(PoolError::Overflow)?;
        Ok(())
    }

    pub fn record_request(&mut self, usdc: u128) -> Result<(), PoolError> {
        self.requested_amount = checked_add(self.requested_amount, usdc)?;
        Ok(())
    }

    /// Clear the pending request total, returning what needs funding.
    pub fn take_requested(&mut self) -> Result<u128, PoolError> {
        let amount = std::mem::take(&mut self.requested_amount);
        if amount == 0 {
            return Err(PoolError::NothingToFund);
        }
        self.total_funded_usdc = checked_add(self.total_funded_usdc, amount)?;
        self.funding_rounds = self.funding_rounds.checked_add(1).ok_or(PoolError::Overflow)?;
        Ok(amount)
    }

    pub fn record_injection(&mut self, amount: u128, growth_delta: u128) -> Result<(), PoolError> {
        self.reward_growth = checked_add(self.reward_growth, growth_delta)?;
        self.total_rewards_added = checked_add(self.total_rewards_added, amount)?;
        Ok(())
    }

    pub fn record_claim(&mut self, amount: u128) -> Result<(), PoolError> {
        self.total_rewards_claimed = checked_add(self.total_rewards_claimed, amount)?;
        Ok(())
    }

    pub fn record_withdrawal(&mut self, usdc: u128) -> Result<(), PoolError> {
        self.total_withdrawn_usdc = checked_add(self.total_withdrawn_usdc, usdc)?;
        Ok(())
    }
}

fn checked_add(a: u128, b: u128) -> Result<u128, PoolError> {
    a.checked_add(b).ok_or(PoolError::Overflow)
}
