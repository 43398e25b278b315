//! Fixed-point arithmetic for reward growth and exit penalties.
//!
//! Reward growth is scaled by [`REWARD_GROWTH_SCALE`] (10^18), so products such
//! as `principal × growth` routinely exceed 128 bits. [`mul_div`] computes
//! `a × b / d` through a 256-bit intermediate and floors the result.

use lpstake_types::{BPS_DENOMINATOR, REWARD_GROWTH_SCALE};

/// `floor(a × b / denominator)` without intermediate overflow.
///
/// Returns `None` if `denominator` is zero or the quotient does not fit in 128 bits.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let (hi, lo) = widening_mul(a, b);
    if hi == 0 {
        return Some(lo / denominator);
    }
    if hi >= denominator {
        return None;
    }

    // Long division of the 256-bit (hi, lo) by a 128-bit denominator.
    let mut remainder = hi;
    let mut quotient = 0u128;
    for bit in (0..128).rev() {
        let carry = remainder >> 127;
        remainder = (remainder << 1) | ((lo >> bit) & 1);
        if carry == 1 || remainder >= denominator {
            remainder = remainder.wrapping_sub(denominator);
            quotient |= 1u128 << bit;
        }
    }
    Some(quotient)
}

/// Full 256-bit product of two 128-bit values as `(high, low)` halves.
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a_hi, a_lo) = (a >> 64, a & MASK);
    let (b_hi, b_lo) = (b >> 64, b & MASK);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let lo = (ll & MASK) | (mid << 64);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

/// Growth added by distributing `reward` over `pool_usdc` of staked principal.
pub fn growth_delta(reward: u128, pool_usdc: u128) -> Option<u128> {
    mul_div(reward, REWARD_GROWTH_SCALE, pool_usdc)
}

/// Reward earned by `principal` while growth moved from `last` to `current`.
pub fn accrued_reward(principal: u128, current: u128, last: u128) -> Option<u128> {
    mul_div(principal, current.saturating_sub(last), REWARD_GROWTH_SCALE)
}

/// Split `amount` into `(kept, penalty)` for a penalty of `bps` basis points.
pub fn apply_penalty(amount: u128, bps: u32) -> Option<(u128, u128)> {
    let penalty = mul_div(amount, u128::from(bps), BPS_DENOMINATOR)?;
    Some((amount.checked_sub(penalty)?, penalty))
}
