//! Request → fund → withdraw exit queue.
//!
//! A request takes the position out of the staked totals and, before the lock
//! deadline, cuts its principal by the early-exit penalty. The admin then
//! funds the vault with the sum of outstanding requests; once the cooldown
//! has passed, the request has been funded and the vault holds enough, the
//! owner withdraws.

use crate::accounting::PoolAccounting;
use crate::error::PoolError;
use crate::math;
use crate::position::Position;
use lpstake_types::{StakingParams, Timestamp};
use serde::{Deserialize, Serialize};

/// Where a position sits in the exit lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalState {
    Active,
    Requested,
    /// Requested, cooled down, and the vault holds the payout.
    Funded,
    Withdrawn,
}

/// Amounts a position would leave with if it were requested now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitQuote {
    pub usdc_before: u128,
    pub brbc_before: u128,
    pub usdc_after: u128,
    pub brbc_after: u128,
    pub penalty_usdc: u128,
    pub penalized: bool,
}

/// Price an exit at `now`. Requests strictly before the deadline are penalized.
pub fn quote_exit(
    position: &Position,
    now: Timestamp,
    params: &StakingParams,
) -> Result<ExitQuote, PoolError> {
    let penalized = now < position.deadline;
    let (usdc_after, penalty_usdc) = if penalized {
        math::apply_penalty(position.usdc_amount, params.early_exit_penalty_bps)
            .ok_or(PoolError::Overflow)?
    } else {
        (position.usdc_amount, 0)
    };
    let brbc_after = if penalized {
        params.brbc_for(usdc_after).ok_or(PoolError::Overflow)?
    } else {
        position.brbc_amount
    };
    Ok(ExitQuote {
        usdc_before: position.usdc_amount,
        brbc_before: position.brbc_amount,
        usdc_after,
        brbc_after,
        penalty_usdc,
        penalized,
    })
}

/// Move a settled position into the queue using a quote priced at `now`.
pub fn apply_request(
    position: &mut Position,
    accounting: &mut PoolAccounting,
    quote: &ExitQuote,
    now: Timestamp,
) -> Result<(), PoolError> {
    if position.requested {
        return Err(PoolError::AlreadyRequested(position.id));
    }
    if !position.is_active() {
        return Err(PoolError::NotStaked(position.id));
    }
    accounting.remove_stake(quote.usdc_before, quote.brbc_before)?;
    accounting.record_request(quote.usdc_after)?;

    position.usdc_amount = quote.usdc_after;
    position.brbc_amount = quote.brbc_after;
    position.is_staked = false;
    position.requested = true;
    position.requested_at = Some(now);
    position.request_round = accounting.funding_rounds;
    Ok(())
}

/// When the cooldown of a requested position ends.
pub fn ready_at(position: &Position, params: &StakingParams) -> Option<Timestamp> {
    position
        .requested_at
        .map(|at| at.plus_secs(params.withdraw_cooldown_secs))
}

/// Check a payout is allowed at `now`: cooled down, funded by a
/// `fund_requests` call made after the request, and covered by the vault.
pub fn check_withdrawable(
    position: &Position,
    now: Timestamp,
    params: &StakingParams,
    funding_rounds: u64,
    vault_usdc: u128,
    vault_brbc: u128,
) -> Result<(), PoolError> {
    let ready = match ready_at(position, params) {
        Some(ready) if position.requested => ready,
        _ => return Err(PoolError::NotRequested(position.id)),
    };
    if now < ready {
        return Err(PoolError::CooldownActive {
            id: position.id,
            ready_at: ready,
        });
    }
    if !position.is_funded(funding_rounds)
        || vault_usdc < position.usdc_amount
        || vault_brbc < position.brbc_amount
    {
        return Err(PoolError::FundsNotArrived(position.id));
    }
    Ok(())
}

/// Lifecycle state of a position at `now`.
pub fn state_of(
    position: &Position,
    now: Timestamp,
    params: &StakingParams,
    funding_rounds: u64,
    vault_usdc: u128,
    vault_brbc: u128,
) -> WithdrawalState {
    if position.retired {
        WithdrawalState::Withdrawn
    } else if !position.requested {
        WithdrawalState::Active
    } else if check_withdrawable(position, now, params, funding_rounds, vault_usdc, vault_brbc)
        .is_ok()
    {
        WithdrawalState::Funded
    } else {
        WithdrawalState::Requested
    }
}

/// Drain the outstanding request total into `(usdc, brbc)` amounts to fund.
pub fn take_funding(
    accounting: &mut PoolAccounting,
    params: &StakingParams,
) -> Result<(u128, u128), PoolError> {
    let usdc = accounting.take_requested()?;
    let brbc = params.brbc_for(usdc).ok_or(PoolError::Overflow)?;
    Ok((usdc, brbc))
}
