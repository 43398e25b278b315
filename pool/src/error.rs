//! Pool errors and their coarse classification.

use crate::position::PositionId;
use lpstake_assets::AssetError;
use lpstake_types::{Address, ParamsError, Timestamp};
use thiserror::Error;

/// Every way a pool operation can be rejected.
///
/// A rejected operation leaves positions, pool accounting and asset balances
/// exactly as they were before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("{caller} is not the owner of position {id}")]
    NotOwner { id: PositionId, caller: Address },

    #[error("{0} is not in the whitelist")]
    NotWhitelisted(Address),

    #[error("{0} is not the pool admin")]
    NotAdmin(Address),

    #[error("whitelist staking period has ended")]
    WhitelistWindowClosed,

    #[error("staking period has not started yet")]
    StakingNotOpen,

    #[error("staking period has ended")]
    StakingEnded,

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("stake {amount} is below the minimum {min}")]
    BelowMinimum { amount: u128, min: u128 },

    #[error("stake {amount} exceeds the per-call maximum {max}")]
    AboveMaximum { amount: u128, max: u128 },

    #[error("wallet {wallet} would reach {total}, above the per-wallet cap {cap}")]
    WalletCapExceeded {
        wallet: Address,
        total: u128,
        cap: u128,
    },

    #[error("stake {amount} exceeds remaining pool capacity {available}")]
    PoolCapExceeded { amount: u128, available: u128 },

    #[error("position {0} is already requested for withdrawal")]
    AlreadyRequested(PositionId),

    #[error("position {0} is not staked")]
    NotStaked(PositionId),

    #[error("position {0} must be requested for withdrawal first")]
    NotRequested(PositionId),

    #[error("withdrawal of position {id} is in process until {ready_at}")]
    CooldownActive { id: PositionId, ready_at: Timestamp },

    #[error("funds for position {0} have not arrived yet")]
    FundsNotArrived(PositionId),

    #[error("no withdrawal requests need funding")]
    NothingToFund,

    #[error("position {0} has no rewards to claim")]
    ZeroRewards(PositionId),

    #[error("no principal is staked, rewards cannot be distributed")]
    EmptyPool,

    #[error("cannot transfer to {0}: null address or the sender itself")]
    InvalidRecipient(Address),

    #[error("position approvals are disabled")]
    ApprovalDisabled,

    #[error("delegated position transfers are disabled")]
    TransferFromDisabled,

    #[error("asset movement failed: {0}")]
    Asset(#[from] AssetError),

    #[error("invalid staking parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    #[error("arithmetic overflow in pool computation")]
    Overflow,
}

/// Coarse category of a [`PoolError`], for callers that only branch on the class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authorization,
    WindowClosed,
    AmountBounds,
    State,
    InvalidTarget,
    DisabledOperation,
    Asset,
    Configuration,
    Arithmetic,
}

impl PoolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner { .. } | Self::NotWhitelisted(_) | Self::NotAdmin(_) => {
                ErrorKind::Authorization
            }
            Self::WhitelistWindowClosed | Self::StakingNotOpen | Self::StakingEnded => {
                ErrorKind::WindowClosed
            }
            Self::ZeroAmount
            | Self::BelowMinimum { .. }
            | Self::AboveMaximum { .. }
            | Self::WalletCapExceeded { .. }
            | Self::PoolCapExceeded { .. } => ErrorKind::AmountBounds,
            Self::AlreadyRequested(_)
            | Self::NotStaked(_)
            | Self::NotRequested(_)
            | Self::CooldownActive { .. }
            | Self::FundsNotArrived(_)
            | Self::NothingToFund
            | Self::ZeroRewards(_)
            | Self::EmptyPool => ErrorKind::State,
            Self::InvalidRecipient(_) => ErrorKind::InvalidTarget,
            Self::ApprovalDisabled | Self::TransferFromDisabled => ErrorKind::DisabledOperation,
            Self::Asset(_) => ErrorKind::Asset,
            Self::InvalidParams(_) => ErrorKind::Configuration,
            Self::Overflow => ErrorKind::Arithmetic,
        }
    }
}

/// Failures while encoding, decoding or validating a pool snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encode(String),

    #[error("snapshot decoding failed: {0}")]
    Decode(String),

    #[error("snapshot is truncated ({0} bytes)")]
    Truncated(usize),

    #[error("snapshot digest mismatch: expected {expected}, computed {computed}")]
    DigestMismatch { expected: String, computed: String },

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("snapshot state is inconsistent: {0}")]
    Inconsistent(String),

    #[error(transparent)]
    Params(#[from] ParamsError),
}
