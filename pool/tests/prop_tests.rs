use std::sync::Arc;

use proptest::prelude::*;

use lpstake_assets::AssetLedger;
use lpstake_nullables::{NullAssetLedger, NullClock};
use lpstake_pool::math::{accrued_reward, apply_penalty, growth_delta, mul_div};
use lpstake_pool::{PoolError, StakingPool};
use lpstake_types::{units, Address, Asset, StakingParams, ASSET_UNIT, REWARD_GROWTH_SCALE};

const DAY: u64 = StakingParams::DAY_SECS;

fn admin() -> Address {
    Address::from_label("admin")
}

fn vault() -> Address {
    Address::from_label("vault")
}

fn staker(i: usize) -> Address {
    Address::from_label(&format!("staker-{i}"))
}

/// A pool in its main window with `count` funded, pre-approved stakers.
fn main_window_pool(count: usize) -> (StakingPool<NullAssetLedger, Arc<NullClock>>, Arc<NullClock>) {
    let mut ledger = NullAssetLedger::new();
    ledger.mint(Asset::Usdc, &admin(), units(10_000_000));
    ledger.mint(Asset::Brbc, &admin(), units(40_000_000));
    for asset in Asset::ALL {
        ledger.approve(asset, &admin(), &vault(), u128::MAX).unwrap();
    }
    for i in 0..count {
        ledger.mint(Asset::Usdc, &staker(i), units(5_000));
        ledger.mint(Asset::Brbc, &staker(i), units(20_000));
        for asset in Asset::ALL {
            ledger.approve(asset, &staker(i), &vault(), u128::MAX).unwrap();
        }
    }
    let clock = Arc::new(NullClock::new(0));
    let params = StakingParams {
        max_pool_usdc: units(1_000_000),
        ..StakingParams::default()
    };
    let pool = StakingPool::new(params, admin(), vault(), ledger, Arc::clone(&clock)).unwrap();
    clock.advance(DAY);
    (pool, clock)
}

#[derive(Clone, Debug)]
enum Op {
    Stake { who: usize, whole: u64 },
    Reward { whole: u64 },
    Claim { who: usize },
    Request { who: usize },
    Fund,
    Withdraw { who: usize },
    Transfer { who: usize, to: usize },
    Advance { secs: u64 },
}

fn op_strategy(stakers: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..stakers, 400u64..1_200).prop_map(|(who, whole)| Op::Stake { who, whole }),
        (1u64..2_000).prop_map(|whole| Op::Reward { whole }),
        (0..stakers).prop_map(|who| Op::Claim { who }),
        (0..stakers).prop_map(|who| Op::Request { who }),
        Just(Op::Fund),
        (0..stakers).prop_map(|who| Op::Withdraw { who }),
        (0..stakers, 0..stakers).prop_map(|(who, to)| Op::Transfer { who, to }),
        (0u64..3 * DAY).prop_map(|secs| Op::Advance { secs }),
    ]
}

proptest! {
    /// mul_div agrees with native arithmetic whenever the product fits.
    #[test]
    fn mul_div_matches_native(a in 0u128..u64::MAX as u128, b in 0u128..u64::MAX as u128, d in 1u128..u128::MAX) {
        prop_assert_eq!(mul_div(a, b, d), Some(a * b / d));
    }

    /// Multiplying then dividing by the same factor is the identity.
    #[test]
    fn mul_div_cancels(a in any::<u128>(), d in 1u128..) {
        prop_assert_eq!(mul_div(a, d, d), Some(a));
    }

    /// Two stakers share an injection pro rata. Dust is bounded by one raw unit
    /// per whole token of principal plus one per position.
    #[test]
    fn two_way_split_within_dust(a in 500u64..5_000, b in 500u64..5_000, r in 1u64..1_000_000) {
        let (a, b, r) = (units(a), units(b), units(r));
        let growth = growth_delta(r, a + b).unwrap();
        let ra = accrued_reward(a, growth, 0).unwrap();
        let rb = accrued_reward(b, growth, 0).unwrap();
        prop_assert!(ra + rb <= r);
        prop_assert!(r - (ra + rb) <= (a + b) / REWARD_GROWTH_SCALE + 2);
        prop_assert!(ra <= mul_div(r, a, a + b).unwrap());
    }

    /// Penalty split keeps every unit and never exceeds the configured rate.
    #[test]
    fn penalty_conserves_principal(amount in 0u128..u128::MAX / 2, bps in 0u32..=10_000) {
        let (kept, penalty) = apply_penalty(amount, bps).unwrap();
        prop_assert_eq!(kept + penalty, amount);
        prop_assert!(penalty <= amount / 10_000 * u128::from(bps) + u128::from(bps));
    }

    /// Under any interleaving of operations the pool totals match the staked
    /// positions, BRBC stays at 4× USDC, the vault never pays out more than
    /// it received, and a rejected operation changes neither the pool nor
    /// the ledger.
    #[test]
    fn invariants_hold_under_random_ops(ops in prop::collection::vec(op_strategy(4), 1..60)) {
        let (mut pool, clock) = main_window_pool(4);
        let mut last_growth = 0u128;

        for op in ops {
            let pool_before = pool.snapshot();
            let ledger_before = pool.ledger().clone();
            let result: Result<(), PoolError> = match op {
                Op::Stake { who, whole } => pool.stake(&staker(who), units(whole)).map(|_| ()),
                Op::Reward { whole } => pool.add_rewards(&admin(), units(whole)).map(|_| ()),
                Op::Claim { who } => match pool.tokens_of(&staker(who)).first().copied() {
                    Some(id) => pool.claim_rewards(&staker(who), id).map(|_| ()),
                    None => Ok(()),
                },
                Op::Request { who } => match pool.tokens_of(&staker(who)).first().copied() {
                    Some(id) => pool.request_withdraw(&staker(who), id).map(|_| ()),
                    None => Ok(()),
                },
                Op::Fund => pool.fund_requests(&admin()).map(|_| ()),
                Op::Withdraw { who } => match pool.tokens_of(&staker(who)).first().copied() {
                    Some(id) => pool.withdraw(&staker(who), id).map(|_| ()),
                    None => Ok(()),
                },
                Op::Transfer { who, to } => match pool.tokens_of(&staker(who)).last().copied() {
                    Some(id) => pool.transfer(&staker(who), &staker(to), id),
                    None => Ok(()),
                },
                Op::Advance { secs } => {
                    clock.advance(secs);
                    Ok(())
                }
            };
            if result.is_err() {
                prop_assert_eq!(&pool.snapshot(), &pool_before);
                prop_assert_eq!(pool.ledger(), &ledger_before);
            }

            let (usdc, brbc) = pool.positions().staked_totals().unwrap();
            prop_assert_eq!(pool.pool_usdc(), usdc);
            prop_assert_eq!(pool.pool_brbc(), brbc);
            prop_assert!(pool.reward_growth() >= last_growth);
            last_growth = pool.reward_growth();
            for position in pool.positions().iter() {
                prop_assert_eq!(position.brbc_amount, position.usdc_amount * 4);
                if !position.is_staked {
                    prop_assert_eq!(pool.view_rewards(position.id), 0);
                }
            }
            prop_assert!(pool.positions().check_consistency().is_ok());
            prop_assert!(pool.owed_usdc() >= pool.requested_amount());
            prop_assert!(pool.snapshot().validate().is_ok());

            let acc = pool.accounting();
            prop_assert!(acc.total_rewards_claimed <= acc.total_rewards_added);
            prop_assert!(acc.total_withdrawn_usdc <= acc.total_funded_usdc);
        }
    }

    /// Staking any valid amount leaves exactly that amount in the pool and
    /// moves both assets from the staker to the admin.
    #[test]
    fn stake_moves_exact_amounts(whole in 500u64..=5_000) {
        let (mut pool, _clock) = main_window_pool(1);
        let id = pool.stake(&staker(0), units(whole)).unwrap();
        let position = pool.position(id).unwrap();
        prop_assert_eq!(position.usdc_amount, units(whole));
        prop_assert_eq!(pool.ledger().balance_of(Asset::Usdc, &staker(0)), units(5_000 - whole));
        prop_assert_eq!(
            pool.ledger().balance_of(Asset::Brbc, &staker(0)),
            units(20_000) - 4 * units(whole)
        );
        prop_assert_eq!(
            pool.ledger().balance_of(Asset::Usdc, &admin()),
            units(10_000_000) + units(whole)
        );
    }

    /// Sub-unit stake amounts near the minimum are judged on raw units.
    #[test]
    fn minimum_is_exact(shortfall in 1u128..ASSET_UNIT) {
        let (mut pool, _clock) = main_window_pool(1);
        let amount = units(500) - shortfall;
        let rejected = matches!(
            pool.stake(&staker(0), amount),
            Err(PoolError::BelowMinimum { .. })
        );
        prop_assert!(rejected);
    }
}
