//! Nullable asset ledger: in-memory balances and allowances for both assets.

use lpstake_assets::{AssetError, AssetLedger};
use lpstake_types::{Address, Asset};
use std::collections::HashMap;

/// An in-memory two-asset ledger.
///
/// Behaves like a pair of plain fungible token contracts: transfers fail on
/// insufficient balance, pulls fail on insufficient allowance, and nothing
/// else is ever rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NullAssetLedger {
    balances: HashMap<(Asset, Address), u128>,
    allowances: HashMap<(Asset, Address, Address), u128>,
}

impl NullAssetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` out of thin air.
    pub fn mint(&mut self, asset: Asset, to: &Address, amount: u128) {
        let balance = self.balances.entry((asset, *to)).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Sum of every balance held in `asset`.
    pub fn total_supply(&self, asset: Asset) -> u128 {
        self.balances
            .iter()
            .filter(|((a, _), _)| *a == asset)
            .map(|(_, v)| *v)
            .sum()
    }

    fn debit(&mut self, asset: Asset, owner: &Address, amount: u128) -> Result<(), AssetError> {
        let available = self.balance_of(asset, owner);
        let remaining = available
            .checked_sub(amount)
            .ok_or(AssetError::InsufficientBalance {
                asset,
                owner: *owner,
                needed: amount,
                available,
            })?;
        self.balances.insert((asset, *owner), remaining);
        Ok(())
    }

    fn credit(&mut self, asset: Asset, owner: &Address, amount: u128) -> Result<(), AssetError> {
        let balance = self.balances.entry((asset, *owner)).or_default();
        *balance = balance.checked_add(amount).ok_or(AssetError::Overflow {
            owner: *owner,
            asset,
        })?;
        Ok(())
    }
}

impl AssetLedger for NullAssetLedger {
    fn balance_of(&self, asset: Asset, owner: &Address) -> u128 {
        self.balances.get(&(asset, *owner)).copied().unwrap_or(0)
    }

    fn allowance(&self, asset: Asset, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(&(asset, *owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn approve(
        &mut self,
        asset: Asset,
        owner: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        self.allowances.insert((asset, *owner, *spender), amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        asset: Asset,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        self.debit(asset, from, amount)?;
        self.credit(asset, to, amount)
    }

    fn transfer_from(
        &mut self,
        asset: Asset,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        let approved = self.allowance(asset, from, spender);
        if approved < amount {
            return Err(AssetError::InsufficientAllowance {
                asset,
                owner: *from,
                spender: *spender,
                needed: amount,
                approved,
            });
        }
        self.debit(asset, from, amount)?;
        self.credit(asset, to, amount)?;
        self.allowances
            .insert((asset, *from, *spender), approved - amount);
        Ok(())
    }
}
