//! Growth-accumulator reward accounting.
//!
//! Injecting `r` rewards over `P` staked principal raises the pool growth by
//! `r × S / P`. A position with principal `a` that last settled at growth `g₀`
//! is owed `a × (g − g₀) / S`. Injection is O(1) regardless of how many
//! positions exist.

use crate::accounting::PoolAccounting;
use crate::error::PoolError;
use crate::math;
use crate::position::Position;

/// Reward a position could claim at the given pool growth.
///
/// Non-staked and retired positions, including the sentinel, accrue nothing.
pub fn pending_reward(position: &Position, reward_growth: u128) -> Result<u128, PoolError> {
    if !position.is_active() {
        return Ok(0);
    }
    math::accrued_reward(
        position.usdc_amount,
        reward_growth,
        position.last_reward_growth,
    )
    .ok_or(PoolError::Overflow)
}

/// Distribute `amount` over the staked principal. Returns the new growth.
pub fn inject(accounting: &mut PoolAccounting, amount: u128) -> Result<u128, PoolError> {
    if amount == 0 {
        return Err(PoolError::ZeroAmount);
    }
    if accounting.pool_usdc == 0 {
        return Err(PoolError::EmptyPool);
    }
    let delta = math::growth_delta(amount, accounting.pool_usdc).ok_or(PoolError::Overflow)?;
    accounting.record_injection(amount, delta)?;
    Ok(accounting.reward_growth)
}

/// Settle a position against the current growth: compute what it is owed and
/// advance its cursor. Returns the amount to pay out, possibly zero.
pub fn settle(position: &mut Position, accounting: &mut PoolAccounting) -> Result<u128, PoolError> {
    let reward = pending_reward(position, accounting.reward_growth)?;
    position.last_reward_growth = accounting.reward_growth;
    accounting.record_claim(reward)?;
    Ok(reward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpstake_types::units;

    fn staked(usdc: u128, growth: u128) -> Position {
        Position {
            id: 1,
            usdc_amount: usdc,
            brbc_amount: usdc * 4,
            last_reward_growth: growth,
            is_staked: true,
            ..Position::default()
        }
    }

    #[test]
    fn injection_requires_principal() {
        let mut acc = PoolAccounting::new(units(10_000));
        assert_eq!(inject(&mut acc, units(1)), Err(PoolError::EmptyPool));
        acc.pool_usdc = units(600);
        assert_eq!(inject(&mut acc, 0), Err(PoolError::ZeroAmount));
    }

    #[test]
    fn sole_staker_receives_whole_injection() {
        let mut acc = PoolAccounting::new(units(10_000));
        acc.add_stake(units(500), units(2_000)).unwrap();
        let mut position = staked(units(500), acc.reward_growth);

        inject(&mut acc, units(100)).unwrap();
        assert_eq!(pending_reward(&position, acc.reward_growth).unwrap(), units(100));

        assert_eq!(settle(&mut position, &mut acc).unwrap(), units(100));
        assert_eq!(pending_reward(&position, acc.reward_growth).unwrap(), 0);
        assert_eq!(acc.total_rewards_claimed, units(100));
        assert_eq!(acc.total_rewards_added, units(100));
    }

    #[test]
    fn inactive_positions_accrue_nothing() {
        let mut position = staked(units(600), 0);
        position.is_staked = false;
        assert_eq!(pending_reward(&position, u128::MAX).unwrap(), 0);
        assert_eq!(pending_reward(&Position::sentinel(), u128::MAX).unwrap(), 0);
    }

    #[test]
    fn late_entrant_shares_only_later_rewards() {
        let mut acc = PoolAccounting::new(units(10_000));
        acc.add_stake(units(1_000), units(4_000)).unwrap();
        let early = staked(units(1_000), acc.reward_growth);
        inject(&mut acc, units(100)).unwrap();

        acc.add_stake(units(1_000), units(4_000)).unwrap();
        let late = staked(units(1_000), acc.reward_growth);
        inject(&mut acc, units(100)).unwrap();

        assert_eq!(pending_reward(&early, acc.reward_growth).unwrap(), units(150));
        assert_eq!(pending_reward(&late, acc.reward_growth).unwrap(), units(50));
    }
}
