//! Position ownership transfers.
//!
//! Only the owner may move a position, and only directly. The delegated
//! surface (approvals, operator transfers) exists so callers get a clear
//! rejection, but every entry point fails unconditionally.

use crate::engine::StakingPool;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::position::PositionId;
use lpstake_assets::AssetLedger;
use lpstake_types::{Address, Clock};
use tracing::{debug, info};

/// A recipient must be a real account other than the sender.
pub fn check_recipient(from: &Address, to: &Address) -> Result<(), PoolError> {
    if to.is_zero() || to == from {
        return Err(PoolError::InvalidRecipient(*to));
    }
    Ok(())
}

impl<L: AssetLedger, C: Clock> StakingPool<L, C> {
    /// Hand position `id` to `to`. Flags, amounts and pending reward travel
    /// with it; allowed in every lifecycle state.
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        id: PositionId,
    ) -> Result<(), PoolError> {
        let result = self
            .owned(caller, id)
            .and_then(|_| check_recipient(caller, to));
        if let Err(e) = result {
            debug!(caller = %caller, to = %to, id, error = %e, "transfer rejected");
            return Err(e);
        }

        self.positions.reassign(id, *to);
        info!(id, from = %caller, to = %to, "position transferred");
        self.events.emit(&PoolEvent::Transferred {
            id,
            from: *caller,
            to: *to,
        });
        Ok(())
    }

    pub fn approve(
        &mut self,
        _caller: &Address,
        _spender: &Address,
        _id: PositionId,
    ) -> Result<(), PoolError> {
        Err(PoolError::ApprovalDisabled)
    }

    pub fn get_approved(&self, _id: PositionId) -> Result<Address, PoolError> {
        Err(PoolError::ApprovalDisabled)
    }

    pub fn set_approval_for_all(
        &mut self,
        _caller: &Address,
        _operator: &Address,
        _approved: bool,
    ) -> Result<(), PoolError> {
        Err(PoolError::ApprovalDisabled)
    }

    pub fn is_approved_for_all(
        &self,
        _owner: &Address,
        _operator: &Address,
    ) -> Result<bool, PoolError> {
        Err(PoolError::ApprovalDisabled)
    }

    pub fn transfer_from(
        &mut self,
        _caller: &Address,
        _from: &Address,
        _to: &Address,
        _id: PositionId,
    ) -> Result<(), PoolError> {
        Err(PoolError::TransferFromDisabled)
    }

    /// Rejected with or without attached `data`.
    pub fn safe_transfer_from(
        &mut self,
        _caller: &Address,
        _from: &Address,
        _to: &Address,
        _id: PositionId,
        _data: Option<&[u8]>,
    ) -> Result<(), PoolError> {
        Err(PoolError::TransferFromDisabled)
    }
}
