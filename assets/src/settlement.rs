//! All-or-nothing transfer batches.
//!
//! A pool operation that moves both assets (or pays a reward and then principal)
//! must never leave one leg applied and the other rejected. [`Settlement`] collects
//! the legs, checks every debtor's balance and allowance against the summed debits,
//! and only then applies them in order.

use crate::{AssetError, AssetLedger};
use lpstake_types::{Address, Asset};
use std::collections::BTreeMap;

/// One leg of a settlement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Movement {
    /// `spender` pulls from `from` under an allowance.
    Pull {
        asset: Asset,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    },
    /// `from` sends from its own balance.
    Push {
        asset: Asset,
        from: Address,
        to: Address,
        amount: u128,
    },
}

impl Movement {
    pub fn asset(&self) -> Asset {
        match self {
            Movement::Pull { asset, .. } | Movement::Push { asset, .. } => *asset,
        }
    }

    pub fn amount(&self) -> u128 {
        match self {
            Movement::Pull { amount, .. } | Movement::Push { amount, .. } => *amount,
        }
    }

    fn debtor(&self) -> &Address {
        match self {
            Movement::Pull { from, .. } | Movement::Push { from, .. } => from,
        }
    }
}

/// An ordered batch of movements applied all-or-nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    movements: Vec<Movement>,
}

impl Settlement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pull(
        mut self,
        asset: Asset,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Self {
        if amount > 0 {
            self.movements.push(Movement::Pull {
                asset,
                spender,
                from,
                to,
                amount,
            });
        }
        self
    }

    pub fn push(mut self, asset: Asset, from: Address, to: Address, amount: u128) -> Self {
        if amount > 0 {
            self.movements.push(Movement::Push {
                asset,
                from,
                to,
                amount,
            });
        }
        self
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Verify every leg can be applied against the ledger's current state.
    ///
    /// Credits earlier in the batch are not counted towards later debits.
    pub fn preflight<L: AssetLedger + ?Sized>(&self, ledger: &L) -> Result<(), AssetError> {
        let mut debits: BTreeMap<(Asset, Address), u128> = BTreeMap::new();
        let mut pulls: BTreeMap<(Asset, Address, Address), u128> = BTreeMap::new();

        for movement in &self.movements {
            let debit = debits
                .entry((movement.asset(), *movement.debtor()))
                .or_default();
            *debit = debit.checked_add(movement.amount()).ok_or(AssetError::Overflow {
                owner: *movement.debtor(),
                asset: movement.asset(),
            })?;

            if let Movement::Pull {
                asset,
                spender,
                from,
                amount,
                ..
            } = movement
            {
                let pulled = pulls.entry((*asset, *from, *spender)).or_default();
                *pulled = pulled.checked_add(*amount).ok_or(AssetError::Overflow {
                    owner: *from,
                    asset: *asset,
                })?;
            }
        }

        for ((asset, owner), needed) in &debits {
            let available = ledger.balance_of(*asset, owner);
            if available < *needed {
                return Err(AssetError::InsufficientBalance {
                    asset: *asset,
                    owner: *owner,
                    needed: *needed,
                    available,
                });
            }
        }
        for ((asset, owner, spender), needed) in &pulls {
            let approved = ledger.allowance(*asset, owner, spender);
            if approved < *needed {
                return Err(AssetError::InsufficientAllowance {
                    asset: *asset,
                    owner: *owner,
                    spender: *spender,
                    needed: *needed,
                    approved,
                });
            }
        }
        Ok(())
    }

    /// Preflight, then apply every leg in order.
    pub fn execute<L: AssetLedger + ?Sized>(&self, ledger: &mut L) -> Result<(), AssetError> {
        self.preflight(ledger)?;
        for movement in &self.movements {
            match movement {
                Movement::Pull {
                    asset,
                    spender,
                    from,
                    to,
                    amount,
                } => ledger.transfer_from(*asset, spender, from, to, *amount)?,
                Movement::Push {
                    asset,
                    from,
                    to,
                    amount,
                } => ledger.transfer(*asset, from, to, *amount)?,
            }
        }
        Ok(())
    }
}
