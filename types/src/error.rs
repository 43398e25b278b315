//! Errors raised while parsing or validating the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must be 20 bytes, got {0}")]
    InvalidLength(usize),

    #[error("address is not valid hex: {0}")]
    InvalidHex(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount string is empty")]
    Empty,

    #[error("invalid digit in amount: {0}")]
    InvalidDigit(String),

    #[error("amount has more than {max} fractional digits")]
    TooPrecise { max: u32 },

    #[error("amount does not fit in 128 bits")]
    Overflow,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("minimum stake must be non-zero")]
    ZeroMinimum,

    #[error("stake bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: u128, max: u128 },

    #[error("early exit penalty {0} bps exceeds 10000")]
    PenaltyTooHigh(u32),

    #[error("BRBC per USDC ratio must be non-zero")]
    ZeroRatio,

    #[error("lock duration must be non-zero")]
    ZeroLockDuration,
}
