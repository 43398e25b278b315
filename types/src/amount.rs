//! The two staked assets and their raw-unit amounts.
//!
//! Amounts are fixed-point integers (u128) with 18 decimals, never floating point.
//! The smallest unit is 1 raw; one whole token is [`ASSET_UNIT`] raw.

use crate::error::AmountError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimals shared by both assets.
pub const ASSET_DECIMALS: u32 = 18;

/// One whole token in raw units (10^18).
pub const ASSET_UNIT: u128 = 1_000_000_000_000_000_000;

/// Basis-point denominator (100% = 10_000 bps).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Fixed-point scale of the reward-growth accumulator (10^18).
///
/// The accumulator holds a cumulative reward-to-principal ratio of up to
/// about 3.4 × 10^20 before it overflows.
pub const REWARD_GROWTH_SCALE: u128 = 1_000_000_000_000_000_000;

/// Which of the two fungible assets a balance or transfer refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    /// Principal and reward asset.
    Usdc,
    /// Companion asset, allocated at a fixed ratio to the principal.
    Brbc,
}

impl Asset {
    pub const ALL: [Asset; 2] = [Asset::Usdc, Asset::Brbc];

    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Usdc => "USDC",
            Asset::Brbc => "BRBC",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Whole tokens to raw units.
pub const fn units(whole: u64) -> u128 {
    whole as u128 * ASSET_UNIT
}

/// Parse a decimal string such as `"600"` or `"454.5"` into raw units.
pub fn parse_units(s: &str, decimals: u32) -> Result<u128, AmountError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }
    let scale = 10u128.checked_pow(decimals).ok_or(AmountError::Overflow)?;
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::Empty);
    }
    if frac.len() > decimals as usize {
        return Err(AmountError::TooPrecise { max: decimals });
    }

    let whole_raw = parse_digits(whole)?
        .checked_mul(scale)
        .ok_or(AmountError::Overflow)?;
    let frac_scale = 10u128
        .checked_pow(decimals - frac.len() as u32)
        .ok_or(AmountError::Overflow)?;
    let frac_raw = parse_digits(frac)?
        .checked_mul(frac_scale)
        .ok_or(AmountError::Overflow)?;
    whole_raw.checked_add(frac_raw).ok_or(AmountError::Overflow)
}

fn parse_digits(digits: &str) -> Result<u128, AmountError> {
    digits.chars().try_fold(0u128, |acc, c| {
        let d = c
            .to_digit(10)
            .ok_or_else(|| AmountError::InvalidDigit(c.to_string()))?;
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(d as u128))
            .ok_or(AmountError::Overflow)
    })
}

/// Render raw units as a decimal string, trimming trailing fractional zeros.
pub fn format_units(raw: u128, decimals: u32) -> String {
    let Some(scale) = 10u128.checked_pow(decimals) else {
        return raw.to_string();
    };
    let whole = raw / scale;
    let frac = raw % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let padded = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}
