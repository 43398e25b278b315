//! Fungible-asset ledger trait.

use crate::AssetError;
use lpstake_types::{Address, Asset};

/// Two independent fungible balances (one per [`Asset`]) with transfer/approve semantics.
///
/// Each method affects a single asset and is atomic on its own. Batches that must
/// land together go through [`crate::Settlement`], which preflights every leg first.
pub trait AssetLedger {
    fn balance_of(&self, asset: Asset, owner: &Address) -> u128;

    /// Amount `spender` may still pull from `owner`.
    fn allowance(&self, asset: Asset, owner: &Address, spender: &Address) -> u128;

    fn approve(
        &mut self,
        asset: Asset,
        owner: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<(), AssetError>;

    /// Move `amount` of `from`'s own balance to `to`.
    fn transfer(
        &mut self,
        asset: Asset,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError>;

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming allowance.
    fn transfer_from(
        &mut self,
        asset: Asset,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError>;
}
