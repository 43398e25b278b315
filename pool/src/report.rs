//! Aggregate read-only views for dashboards and the simulator.

use crate::engine::StakingPool;
use crate::error::PoolError;
use crate::position::{Position, PositionId};
use crate::rewards;
use crate::window::StakingPhase;
use crate::withdrawal::{self, WithdrawalState};
use lpstake_assets::AssetLedger;
use lpstake_types::{Address, Clock, Timestamp};
use serde::Serialize;

/// Everything an owner needs to know about one of their positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PositionReport {
    pub id: PositionId,
    pub usdc_amount: u128,
    pub brbc_amount: u128,
    pub pending_reward: u128,
    /// USDC the owner would leave with if they requested now (or, once
    /// requested, the queued amount).
    pub exit_usdc: u128,
    pub exit_brbc: u128,
    pub penalty_applies: bool,
    pub lock_remaining_secs: u64,
    /// Seconds until a requested position may be withdrawn.
    pub cooldown_remaining_secs: Option<u64>,
    pub state: WithdrawalState,
    pub is_whitelisted: bool,
    pub start_time: Timestamp,
    pub deadline: Timestamp,
}

/// Pool-wide totals at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PoolSummary {
    pub phase: StakingPhase,
    pub now: Timestamp,
    pub pool_usdc: u128,
    pub pool_brbc: u128,
    pub reward_growth: u128,
    pub requested_amount: u128,
    pub owed_usdc: u128,
    pub max_pool_usdc: u128,
    pub remaining_capacity: u128,
    pub positions_issued: u64,
    pub whitelist_size: usize,
    pub vault_usdc: u128,
    pub vault_brbc: u128,
    pub total_rewards_added: u128,
    pub total_rewards_claimed: u128,
    pub total_funded_usdc: u128,
    pub total_withdrawn_usdc: u128,
}

impl<L: AssetLedger, C: Clock> StakingPool<L, C> {
    /// Reports for every position `owner` currently holds, in acquisition order.
    pub fn deposits_of(&self, owner: &Address) -> Result<Vec<PositionReport>, PoolError> {
        let now = self.clock.now();
        let (vault_usdc, vault_brbc) = self.vault_balances();
        self.tokens_of(owner)
            .iter()
            .filter_map(|&id| self.positions.get(id))
            .map(|position| self.report(position, now, vault_usdc, vault_brbc))
            .collect()
    }

    fn report(
        &self,
        position: &Position,
        now: Timestamp,
        vault_usdc: u128,
        vault_brbc: u128,
    ) -> Result<PositionReport, PoolError> {
        let (exit_usdc, exit_brbc, penalty_applies) = if position.requested {
            (position.usdc_amount, position.brbc_amount, false)
        } else {
            let quote = withdrawal::quote_exit(position, now, &self.params)?;
            (quote.usdc_after, quote.brbc_after, quote.penalized)
        };
        let cooldown_remaining_secs = if position.requested {
            withdrawal::ready_at(position, &self.params).map(|ready| ready.remaining_from(now))
        } else {
            None
        };
        Ok(PositionReport {
            id: position.id,
            usdc_amount: position.usdc_amount,
            brbc_amount: position.brbc_amount,
            pending_reward: rewards::pending_reward(position, self.accounting.reward_growth)?,
            exit_usdc,
            exit_brbc,
            penalty_applies,
            lock_remaining_secs: position.deadline.remaining_from(now),
            cooldown_remaining_secs,
            state: withdrawal::state_of(
                position,
                now,
                &self.params,
                self.accounting.funding_rounds,
                vault_usdc,
                vault_brbc,
            ),
            is_whitelisted: position.is_whitelisted,
            start_time: position.start_time,
            deadline: position.deadline,
        })
    }

    pub fn summary(&self) -> PoolSummary {
        let now = self.clock.now();
        let (vault_usdc, vault_brbc) = self.vault_balances();
        let acc = &self.accounting;
        PoolSummary {
            phase: self.schedule.phase_at(now),
            now,
            pool_usdc: acc.pool_usdc,
            pool_brbc: acc.pool_brbc,
            reward_growth: acc.reward_growth,
            requested_amount: acc.requested_amount,
            owed_usdc: self.owed_usdc(),
            max_pool_usdc: acc.max_pool_usdc,
            remaining_capacity: acc.remaining_capacity(),
            positions_issued: self.positions.issued(),
            whitelist_size: self.whitelist.len(),
            vault_usdc,
            vault_brbc,
            total_rewards_added: acc.total_rewards_added,
            total_rewards_claimed: acc.total_rewards_claimed,
            total_funded_usdc: acc.total_funded_usdc,
            total_withdrawn_usdc: acc.total_withdrawn_usdc,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::StakingPool;
    use crate::withdrawal::WithdrawalState;
    use lpstake_assets::AssetLedger;
    use lpstake_nullables::{NullAssetLedger, NullClock};
    use lpstake_types::{units, Address, Asset, StakingParams};
    use std::sync::Arc;

    const DAY: u64 = StakingParams::DAY_SECS;

    #[test]
    fn deposits_report_penalty_and_cooldown() {
        let admin = Address::from_label("admin");
        let vault = Address::from_label("vault");
        let alice = Address::from_label("alice");

        let mut ledger = NullAssetLedger::new();
        ledger.mint(Asset::Usdc, &alice, units(1_000));
        ledger.mint(Asset::Brbc, &alice, units(4_000));
        for asset in Asset::ALL {
            ledger.approve(asset, &alice, &vault, u128::MAX).unwrap();
        }
        let clock = Arc::new(NullClock::new(0));
        let mut pool =
            StakingPool::new(StakingParams::default(), admin, vault, ledger, Arc::clone(&clock))
                .unwrap();

        clock.advance(DAY);
        let first = pool.stake(&alice, units(500)).unwrap();
        let second = pool.stake(&alice, units(500)).unwrap();
        pool.request_withdraw(&alice, second).unwrap();

        let reports = pool.deposits_of(&alice).unwrap();
        assert_eq!(reports.len(), 2);

        let active = &reports[0];
        assert_eq!(active.id, first);
        assert_eq!(active.state, WithdrawalState::Active);
        assert!(active.penalty_applies);
        assert_eq!(active.exit_usdc, units(450));
        assert_eq!(active.lock_remaining_secs, 61 * DAY);
        assert_eq!(active.cooldown_remaining_secs, None);

        let queued = &reports[1];
        assert_eq!(queued.state, WithdrawalState::Requested);
        assert_eq!(queued.usdc_amount, units(450));
        assert_eq!(queued.cooldown_remaining_secs, Some(DAY));

        let summary = pool.summary();
        assert_eq!(summary.pool_usdc, units(500));
        assert_eq!(summary.requested_amount, units(450));
        assert_eq!(summary.owed_usdc, units(450));
        assert_eq!(summary.positions_issued, 2);
    }
}
