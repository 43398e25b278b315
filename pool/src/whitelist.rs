//! Addresses admitted to the whitelist staking window.

use lpstake_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistRegistry {
    members: BTreeSet<Address>,
}

impl WhitelistRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add addresses, returning how many were not already members.
    pub fn extend<'a>(&mut self, addresses: impl IntoIterator<Item = &'a Address>) -> usize {
        addresses
            .into_iter()
            .filter(|address| self.members.insert(**address))
            .count()
    }

    /// Remove addresses, returning how many were members.
    pub fn remove<'a>(&mut self, addresses: impl IntoIterator<Item = &'a Address>) -> usize {
        addresses
            .into_iter()
            .filter(|address| self.members.remove(*address))
            .count()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }
}
