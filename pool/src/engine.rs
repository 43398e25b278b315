//! The staking pool: every mutating operation and the point-lookup views.
//!
//! Each operation reads the clock once, validates every precondition, stages
//! its changes on copies of the affected position and accounting, executes
//! the asset movements as one preflighted [`Settlement`], and only then
//! commits the staged state. A rejected call changes nothing.

use crate::accounting::PoolAccounting;
use crate::error::PoolError;
use crate::events::{EventBus, PoolEvent};
use crate::position::{Position, PositionId, PositionStore};
use crate::rewards;
use crate::whitelist::WhitelistRegistry;
use crate::window::{StakingPhase, StakingSchedule};
use crate::withdrawal::{self, WithdrawalState};
use lpstake_assets::{AssetLedger, Settlement};
use lpstake_types::{Address, Asset, Clock, StakingParams, Timestamp};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryPath {
    Whitelist,
    Main,
}

/// What a withdrawal request settled and queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ExitReceipt {
    pub id: PositionId,
    pub reward_paid: u128,
    pub usdc_requested: u128,
    pub brbc_requested: u128,
    pub penalty_usdc: u128,
}

/// Amounts moved by a funding or withdrawal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Payout {
    pub usdc: u128,
    pub brbc: u128,
}

/// A dual-asset staking pool over an asset ledger `L` and a clock `C`.
///
/// `admin` funds rewards and withdrawals and receives staked principal.
/// `vault` is the pool's own account: it holds rewards and funded
/// withdrawals, and acts as spender when pulling assets from users and admin.
pub struct StakingPool<L, C> {
    pub(crate) params: StakingParams,
    pub(crate) admin: Address,
    pub(crate) vault: Address,
    pub(crate) schedule: StakingSchedule,
    pub(crate) positions: PositionStore,
    pub(crate) whitelist: WhitelistRegistry,
    pub(crate) accounting: PoolAccounting,
    /// Lifetime principal each wallet has entered, across both paths.
    pub(crate) wallet_entered: BTreeMap<Address, u128>,
    pub(crate) events: EventBus,
    pub(crate) ledger: L,
    pub(crate) clock: C,
}

impl<L: AssetLedger, C: Clock> StakingPool<L, C> {
    /// Create a pool whose windows open at the clock's current reading.
    pub fn new(
        params: StakingParams,
        admin: Address,
        vault: Address,
        ledger: L,
        clock: C,
    ) -> Result<Self, PoolError> {
        params.validate()?;
        let genesis = clock.now();
        let schedule = StakingSchedule::new(genesis, &params);
        info!(
            admin = %admin,
            vault = %vault,
            genesis = genesis.as_secs(),
            main_opens = schedule.main_opens_at().as_secs(),
            main_closes = schedule.main_closes_at().as_secs(),
            "staking pool created"
        );
        Ok(Self {
            accounting: PoolAccounting::new(params.max_pool_usdc),
            params,
            admin,
            vault,
            schedule,
            positions: PositionStore::new(),
            whitelist: WhitelistRegistry::new(),
            wallet_entered: BTreeMap::new(),
            events: EventBus::new(),
            ledger,
            clock,
        })
    }

    // ── Staking ──────────────────────────────────────────────────────────

    /// Stake during the whitelist window. Caller must be a whitelist member.
    pub fn whitelist_stake(
        &mut self,
        caller: &Address,
        amount: u128,
    ) -> Result<PositionId, PoolError> {
        self.enter(caller, amount, EntryPath::Whitelist)
            .inspect_err(|e| debug!(caller = %caller, error = %e, "whitelist stake rejected"))
    }

    /// Stake during the main window.
    pub fn stake(&mut self, caller: &Address, amount: u128) -> Result<PositionId, PoolError> {
        self.enter(caller, amount, EntryPath::Main)
            .inspect_err(|e| debug!(caller = %caller, error = %e, "stake rejected"))
    }

    fn enter(
        &mut self,
        caller: &Address,
        amount: u128,
        path: EntryPath,
    ) -> Result<PositionId, PoolError> {
        let now = self.clock.now();
        let max = match path {
            EntryPath::Whitelist => {
                self.schedule.check_whitelist_entry(now)?;
                if !self.whitelist.contains(caller) {
                    return Err(PoolError::NotWhitelisted(*caller));
                }
                self.params.whitelist_max_stake
            }
            EntryPath::Main => {
                self.schedule.check_main_entry(now)?;
                self.params.max_stake
            }
        };

        if amount < self.params.min_stake {
            return Err(PoolError::BelowMinimum {
                amount,
                min: self.params.min_stake,
            });
        }
        if amount > max {
            return Err(PoolError::AboveMaximum { amount, max });
        }
        let entered = self.wallet_entered(caller);
        let total = entered.checked_add(amount).ok_or(PoolError::Overflow)?;
        if total > self.params.max_wallet_stake {
            return Err(PoolError::WalletCapExceeded {
                wallet: *caller,
                total,
                cap: self.params.max_wallet_stake,
            });
        }

        let brbc = self.params.brbc_for(amount).ok_or(PoolError::Overflow)?;
        let mut accounting = self.accounting.clone();
        accounting.add_stake(amount, brbc)?;

        Settlement::new()
            .pull(Asset::Usdc, self.vault, *caller, self.admin, amount)
            .pull(Asset::Brbc, self.vault, *caller, self.admin, brbc)
            .execute(&mut self.ledger)?;

        let whitelisted = path == EntryPath::Whitelist;
        let id = self.positions.insert(Position {
            id: 0,
            owner: *caller,
            usdc_amount: amount,
            brbc_amount: brbc,
            start_time: now,
            deadline: now.plus_secs(self.params.lock_duration_secs),
            last_reward_growth: accounting.reward_growth,
            is_staked: true,
            is_whitelisted: whitelisted,
            requested: false,
            requested_at: None,
            request_round: 0,
            retired: false,
        });
        self.accounting = accounting;
        self.wallet_entered.insert(*caller, total);

        info!(
            id,
            owner = %caller,
            usdc = %amount,
            brbc = %brbc,
            whitelisted,
            "position staked"
        );
        self.events.emit(&PoolEvent::Staked {
            id,
            owner: *caller,
            usdc: amount,
            brbc,
            whitelisted,
        });
        Ok(id)
    }

    // ── Rewards ──────────────────────────────────────────────────────────

    /// Admin: distribute `amount` USDC over the currently staked principal.
    /// Returns the new reward growth.
    pub fn add_rewards(&mut self, caller: &Address, amount: u128) -> Result<u128, PoolError> {
        self.try_add_rewards(caller, amount)
            .inspect_err(|e| debug!(caller = %caller, error = %e, "reward injection rejected"))
    }

    fn try_add_rewards(&mut self, caller: &Address, amount: u128) -> Result<u128, PoolError> {
        self.ensure_admin(caller)?;
        let mut accounting = self.accounting.clone();
        let growth = rewards::inject(&mut accounting, amount)?;

        Settlement::new()
            .pull(Asset::Usdc, self.vault, self.admin, self.vault, amount)
            .execute(&mut self.ledger)?;
        self.accounting = accounting;

        info!(amount = %amount, reward_growth = %growth, "rewards added");
        self.events.emit(&PoolEvent::RewardsAdded {
            amount,
            reward_growth: growth,
        });
        Ok(growth)
    }

    /// Pay out the reward accrued by a position. Returns the amount paid.
    pub fn claim_rewards(&mut self, caller: &Address, id: PositionId) -> Result<u128, PoolError> {
        self.try_claim(caller, id)
            .inspect_err(|e| debug!(caller = %caller, id, error = %e, "claim rejected"))
    }

    fn try_claim(&mut self, caller: &Address, id: PositionId) -> Result<u128, PoolError> {
        let mut position = self.owned(caller, id)?.clone();
        let mut accounting = self.accounting.clone();
        let reward = rewards::settle(&mut position, &mut accounting)?;
        if reward == 0 {
            return Err(PoolError::ZeroRewards(id));
        }

        Settlement::new()
            .push(Asset::Usdc, self.vault, *caller, reward)
            .execute(&mut self.ledger)?;
        self.positions.update(position);
        self.accounting = accounting;

        info!(id, owner = %caller, amount = %reward, "rewards claimed");
        self.events.emit(&PoolEvent::RewardsClaimed {
            id,
            owner: *caller,
            amount: reward,
        });
        Ok(reward)
    }

    // ── Withdrawal queue ─────────────────────────────────────────────────

    /// Leave the pool: settle pending reward, apply any early-exit penalty and
    /// queue the principal for funding.
    pub fn request_withdraw(
        &mut self,
        caller: &Address,
        id: PositionId,
    ) -> Result<ExitReceipt, PoolError> {
        self.try_request(caller, id)
            .inspect_err(|e| debug!(caller = %caller, id, error = %e, "withdraw request rejected"))
    }

    fn try_request(&mut self, caller: &Address, id: PositionId) -> Result<ExitReceipt, PoolError> {
        let now = self.clock.now();
        let mut position = self.owned(caller, id)?.clone();
        if position.requested {
            return Err(PoolError::AlreadyRequested(id));
        }
        if !position.is_staked {
            return Err(PoolError::NotStaked(id));
        }

        let mut accounting = self.accounting.clone();
        let reward = rewards::settle(&mut position, &mut accounting)?;
        let quote = withdrawal::quote_exit(&position, now, &self.params)?;
        withdrawal::apply_request(&mut position, &mut accounting, &quote, now)?;

        Settlement::new()
            .push(Asset::Usdc, self.vault, *caller, reward)
            .execute(&mut self.ledger)?;
        self.positions.update(position);
        self.accounting = accounting;

        info!(
            id,
            owner = %caller,
            reward = %reward,
            usdc = %quote.usdc_after,
            penalty = %quote.penalty_usdc,
            "withdrawal requested"
        );
        if reward > 0 {
            self.events.emit(&PoolEvent::RewardsClaimed {
                id,
                owner: *caller,
                amount: reward,
            });
        }
        self.events.emit(&PoolEvent::WithdrawRequested {
            id,
            owner: *caller,
            usdc: quote.usdc_after,
            brbc: quote.brbc_after,
            penalty_usdc: quote.penalty_usdc,
        });
        Ok(ExitReceipt {
            id,
            reward_paid: reward,
            usdc_requested: quote.usdc_after,
            brbc_requested: quote.brbc_after,
            penalty_usdc: quote.penalty_usdc,
        })
    }

    /// Admin: move the outstanding request total from the admin into the vault.
    pub fn fund_requests(&mut self, caller: &Address) -> Result<Payout, PoolError> {
        self.try_fund(caller)
            .inspect_err(|e| debug!(caller = %caller, error = %e, "funding rejected"))
    }

    fn try_fund(&mut self, caller: &Address) -> Result<Payout, PoolError> {
        self.ensure_admin(caller)?;
        let mut accounting = self.accounting.clone();
        let (usdc, brbc) = withdrawal::take_funding(&mut accounting, &self.params)?;

        Settlement::new()
            .pull(Asset::Usdc, self.vault, self.admin, self.vault, usdc)
            .pull(Asset::Brbc, self.vault, self.admin, self.vault, brbc)
            .execute(&mut self.ledger)?;
        self.accounting = accounting;

        info!(usdc = %usdc, brbc = %brbc, "withdrawal requests funded");
        self.events.emit(&PoolEvent::RequestsFunded { usdc, brbc });
        Ok(Payout { usdc, brbc })
    }

    /// Pay out a requested, cooled-down, funded position and retire it.
    pub fn withdraw(&mut self, caller: &Address, id: PositionId) -> Result<Payout, PoolError> {
        self.try_withdraw(caller, id)
            .inspect_err(|e| debug!(caller = %caller, id, error = %e, "withdraw rejected"))
    }

    fn try_withdraw(&mut self, caller: &Address, id: PositionId) -> Result<Payout, PoolError> {
        let now = self.clock.now();
        let position = self.owned(caller, id)?;
        let (vault_usdc, vault_brbc) = self.vault_balances();
        withdrawal::check_withdrawable(
            position,
            now,
            &self.params,
            self.accounting.funding_rounds,
            vault_usdc,
            vault_brbc,
        )?;
        let payout = Payout {
            usdc: position.usdc_amount,
            brbc: position.brbc_amount,
        };

        let mut accounting = self.accounting.clone();
        accounting.record_withdrawal(payout.usdc)?;

        Settlement::new()
            .push(Asset::Usdc, self.vault, *caller, payout.usdc)
            .push(Asset::Brbc, self.vault, *caller, payout.brbc)
            .execute(&mut self.ledger)?;
        self.positions.retire(id);
        self.accounting = accounting;

        info!(
            id,
            owner = %caller,
            usdc = %payout.usdc,
            brbc = %payout.brbc,
            "position withdrawn"
        );
        self.events.emit(&PoolEvent::Withdrawn {
            id,
            owner: *caller,
            usdc: payout.usdc,
            brbc: payout.brbc,
        });
        Ok(payout)
    }

    // ── Admin ────────────────────────────────────────────────────────────

    /// Admin: add addresses to the whitelist. Returns how many were new.
    pub fn set_whitelist(
        &mut self,
        caller: &Address,
        addresses: &[Address],
    ) -> Result<usize, PoolError> {
        self.ensure_admin(caller)?;
        let added = self.whitelist.extend(addresses);
        info!(added, members = self.whitelist.len(), "whitelist extended");
        self.events.emit(&PoolEvent::WhitelistUpdated { added, removed: 0 });
        Ok(added)
    }

    /// Admin: remove addresses from the whitelist. Returns how many were members.
    pub fn remove_from_whitelist(
        &mut self,
        caller: &Address,
        addresses: &[Address],
    ) -> Result<usize, PoolError> {
        self.ensure_admin(caller)?;
        let removed = self.whitelist.remove(addresses);
        info!(removed, members = self.whitelist.len(), "whitelist reduced");
        self.events.emit(&PoolEvent::WhitelistUpdated { added: 0, removed });
        Ok(removed)
    }

    /// Admin: change the cap on total staked principal. Existing positions are
    /// unaffected; the new cap applies to later entries.
    pub fn set_max_pool_usdc(&mut self, caller: &Address, amount: u128) -> Result<(), PoolError> {
        self.ensure_admin(caller)?;
        let previous = std::mem::replace(&mut self.accounting.max_pool_usdc, amount);
        info!(previous = %previous, current = %amount, "max pool size changed");
        self.events.emit(&PoolEvent::MaxPoolChanged {
            previous,
            current: amount,
        });
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────────

    pub fn position(&self, id: PositionId) -> Option<&Position> {
        self.positions.get(id)
    }

    /// Reward currently claimable by a position. Zero for the sentinel, unknown
    /// ids, and positions that are no longer staked.
    pub fn view_rewards(&self, id: PositionId) -> u128 {
        self.positions
            .get(id)
            .and_then(|p| rewards::pending_reward(p, self.accounting.reward_growth).ok())
            .unwrap_or(0)
    }

    pub fn tokens_of(&self, owner: &Address) -> &[PositionId] {
        self.positions.tokens_of(owner)
    }

    pub fn pool_usdc(&self) -> u128 {
        self.accounting.pool_usdc
    }

    pub fn pool_brbc(&self) -> u128 {
        self.accounting.pool_brbc
    }

    pub fn reward_growth(&self) -> u128 {
        self.accounting.reward_growth
    }

    pub fn requested_amount(&self) -> u128 {
        self.accounting.requested_amount
    }

    pub fn max_pool_usdc(&self) -> u128 {
        self.accounting.max_pool_usdc
    }

    /// USDC principal of every requested position not yet withdrawn.
    /// Saturates; principals the pool pulled from one ledger cannot overflow.
    pub fn owed_usdc(&self) -> u128 {
        self.positions.owed_usdc().unwrap_or(u128::MAX)
    }

    pub fn accounting(&self) -> &PoolAccounting {
        &self.accounting
    }

    pub fn phase(&self) -> StakingPhase {
        self.schedule.phase_at(self.clock.now())
    }

    pub fn is_whitelisted(&self, address: &Address) -> bool {
        self.whitelist.contains(address)
    }

    /// Exit lifecycle state of a position. `None` for the sentinel and unknown ids.
    pub fn withdrawal_state(&self, id: PositionId) -> Option<WithdrawalState> {
        let position = self.positions.get(id).filter(|_| id != 0)?;
        let (vault_usdc, vault_brbc) = self.vault_balances();
        Some(withdrawal::state_of(
            position,
            self.clock.now(),
            &self.params,
            self.accounting.funding_rounds,
            vault_usdc,
            vault_brbc,
        ))
    }

    /// Lifetime principal `wallet` has entered across both staking paths.
    pub fn wallet_entered(&self, wallet: &Address) -> u128 {
        self.wallet_entered.get(wallet).copied().unwrap_or(0)
    }

    pub fn params(&self) -> &StakingParams {
        &self.params
    }

    pub fn schedule(&self) -> &StakingSchedule {
        &self.schedule
    }

    pub fn genesis(&self) -> Timestamp {
        self.schedule.genesis
    }

    pub fn admin(&self) -> &Address {
        &self.admin
    }

    pub fn vault(&self) -> &Address {
        &self.vault
    }

    pub fn positions(&self) -> &PositionStore {
        &self.positions
    }

    pub fn whitelist(&self) -> &WhitelistRegistry {
        &self.whitelist
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Direct access to the asset ledger, for minting and approvals by hosts.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&PoolEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    /// The live position `id`, if `caller` owns it.
    pub(crate) fn owned(&self, caller: &Address, id: PositionId) -> Result<&Position, PoolError> {
        match self.positions.get(id) {
            Some(position) if id != 0 && !position.retired && position.owner == *caller => {
                Ok(position)
            }
            _ => Err(PoolError::NotOwner {
                id,
                caller: *caller,
            }),
        }
    }

    fn ensure_admin(&self, caller: &Address) -> Result<(), PoolError> {
        if *caller == self.admin {
            Ok(())
        } else {
            Err(PoolError::NotAdmin(*caller))
        }
    }

    pub(crate) fn vault_balances(&self) -> (u128, u128) {
        (
            self.ledger.balance_of(Asset::Usdc, &self.vault),
            self.ledger.balance_of(Asset::Brbc, &self.vault),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpstake_nullables::{NullAssetLedger, NullClock};
    use lpstake_types::units;
    use std::sync::Arc;

    const DAY: u64 = StakingParams::DAY_SECS;

    fn admin() -> Address {
        Address::from_label("admin")
    }

    fn vault() -> Address {
        Address::from_label("vault")
    }

    fn alice() -> Address {
        Address::from_label("alice")
    }

    fn make_pool() -> StakingPool<NullAssetLedger, Arc<NullClock>> {
        let mut ledger = NullAssetLedger::new();
        for (who, usdc) in [(alice(), units(10_000)), (admin(), units(100_000))] {
            ledger.mint(Asset::Usdc, &who, usdc);
            ledger.mint(Asset::Brbc, &who, usdc * 4);
            for asset in Asset::ALL {
                ledger.approve(asset, &who, &vault(), u128::MAX).unwrap();
            }
        }
        let clock = Arc::new(NullClock::new(1_000));
        StakingPool::new(StakingParams::default(), admin(), vault(), ledger, clock).unwrap()
    }

    fn open_main(pool: &StakingPool<NullAssetLedger, Arc<NullClock>>) {
        pool.clock().advance(DAY);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = StakingParams {
            min_stake: 0,
            ..StakingParams::default()
        };
        let result = StakingPool::new(
            params,
            admin(),
            vault(),
            NullAssetLedger::new(),
            NullClock::new(0),
        );
        assert!(matches!(result, Err(PoolError::InvalidParams(_))));
    }

    #[test]
    fn stake_creates_position_and_moves_funds_to_admin() {
        let mut pool = make_pool();
        open_main(&pool);
        let id = pool.stake(&alice(), units(600)).unwrap();
        assert_eq!(id, 1);

        let position = pool.position(id).unwrap();
        assert_eq!(position.owner, alice());
        assert_eq!(position.brbc_amount, units(2_400));
        assert_eq!(position.deadline, position.start_time.plus_secs(61 * DAY));
        assert!(position.is_staked && !position.is_whitelisted);

        assert_eq!(pool.pool_usdc(), units(600));
        assert_eq!(pool.pool_brbc(), units(2_400));
        assert_eq!(pool.tokens_of(&alice()), &[1]);
        assert_eq!(pool.ledger().balance_of(Asset::Usdc, &admin()), units(100_600));
        assert_eq!(pool.ledger().balance_of(Asset::Usdc, &vault()), 0);
        assert_eq!(pool.wallet_entered(&alice()), units(600));
    }

    #[test]
    fn stake_checks_bounds_in_order() {
        let mut pool = make_pool();
        open_main(&pool);
        assert_eq!(
            pool.stake(&alice(), units(499)),
            Err(PoolError::BelowMinimum {
                amount: units(499),
                min: units(500)
            })
        );
        assert_eq!(
            pool.stake(&alice(), units(5_001)),
            Err(PoolError::AboveMaximum {
                amount: units(5_001),
                max: units(5_000)
            })
        );
        pool.stake(&alice(), units(4_500)).unwrap();
        assert_eq!(
            pool.stake(&alice(), units(550)),
            Err(PoolError::WalletCapExceeded {
                wallet: alice(),
                total: units(5_050),
                cap: units(5_000)
            })
        );
    }

    #[test]
    fn failed_pull_leaves_pool_untouched() {
        let mut pool = make_pool();
        open_main(&pool);
        let broke = Address::from_label("broke");
        let err = pool.stake(&broke, units(500)).unwrap_err();
        assert!(matches!(err, PoolError::Asset(_)));
        assert_eq!(pool.pool_usdc(), 0);
        assert_eq!(pool.positions().issued(), 0);
        assert_eq!(pool.wallet_entered(&broke), 0);
    }

    #[test]
    fn admin_operations_require_admin() {
        let mut pool = make_pool();
        assert_eq!(
            pool.set_whitelist(&alice(), &[alice()]),
            Err(PoolError::NotAdmin(alice()))
        );
        assert_eq!(
            pool.set_max_pool_usdc(&alice(), 1),
            Err(PoolError::NotAdmin(alice()))
        );
        assert_eq!(
            pool.fund_requests(&alice()),
            Err(PoolError::NotAdmin(alice()))
        );
        assert_eq!(
            pool.add_rewards(&alice(), units(1)),
            Err(PoolError::NotAdmin(alice()))
        );
        assert_eq!(pool.set_whitelist(&admin(), &[alice()]), Ok(1));
        assert!(pool.is_whitelisted(&alice()));
        assert_eq!(pool.remove_from_whitelist(&admin(), &[alice()]), Ok(1));
        assert!(!pool.is_whitelisted(&alice()));
    }

    #[test]
    fn sentinel_is_never_owned() {
        let mut pool = make_pool();
        assert_eq!(
            pool.claim_rewards(&Address::ZERO, 0),
            Err(PoolError::NotOwner {
                id: 0,
                caller: Address::ZERO
            })
        );
        assert_eq!(pool.view_rewards(0), 0);
        assert_eq!(pool.withdrawal_state(0), None);
    }

    #[test]
    fn phase_follows_clock() {
        let pool = make_pool();
        assert_eq!(pool.phase(), StakingPhase::WhitelistOpen);
        open_main(&pool);
        assert_eq!(pool.phase(), StakingPhase::MainOpen);
        pool.clock().advance(61 * DAY);
        assert_eq!(pool.phase(), StakingPhase::Closed);
    }

    #[test]
    fn events_follow_commits_only() {
        use std::sync::Mutex;

        let mut pool = make_pool();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        pool.subscribe(Box::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        }));

        open_main(&pool);
        let _ = pool.stake(&alice(), units(1));
        let id = pool.stake(&alice(), units(500)).unwrap();

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], PoolEvent::Staked { id: staked, .. } if staked == id));
    }
}
