//! Staking positions and the owner-indexed position store.

use lpstake_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sequential position identifier. Id 0 is reserved for the null sentinel.
pub type PositionId = u64;

/// One stake: principal in both assets, its lock deadline and reward cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub owner: Address,
    pub usdc_amount: u128,
    pub brbc_amount: u128,
    pub start_time: Timestamp,
    /// End of the personal lock. Requests before this point pay the early-exit penalty.
    pub deadline: Timestamp,
    /// Reward growth at the last settlement of this position.
    pub last_reward_growth: u128,
    pub is_staked: bool,
    pub is_whitelisted: bool,
    pub requested: bool,
    pub requested_at: Option<Timestamp>,
    /// Funding round open when the request was made.
    pub request_round: u64,
    /// Set once the position has been paid out. Retired positions are never reused.
    pub retired: bool,
}

impl Position {
    /// The zero-valued record that occupies id 0.
    pub fn sentinel() -> Self {
        Self::default()
    }

    /// Still counted in the pool totals and earning rewards.
    pub fn is_active(&self) -> bool {
        self.is_staked && !self.retired
    }

    /// Requested, not yet withdrawn: principal the pool still owes its owner.
    pub fn is_pending_exit(&self) -> bool {
        self.requested && !self.retired
    }

    /// A `fund_requests` call has completed since this position was requested.
    pub fn is_funded(&self, funding_rounds: u64) -> bool {
        self.requested && self.request_round < funding_rounds
    }
}

/// Arena of positions indexed by id, plus a per-owner index.
///
/// Slot 0 always holds the sentinel. The owner index lists exactly the
/// non-retired positions whose `owner` field names that address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionStore {
    positions: Vec<Position>,
    owners: BTreeMap<Address, Vec<PositionId>>,
}

impl PositionStore {
    pub fn new() -> Self {
        Self {
            positions: vec![Position::sentinel()],
            owners: BTreeMap::new(),
        }
    }

    /// Id the next inserted position will receive.
    pub fn next_id(&self) -> PositionId {
        self.positions.len() as PositionId
    }

    /// Number of positions ever issued, retired ones included.
    pub fn issued(&self) -> u64 {
        self.next_id() - 1
    }

    /// Append a position under the next id, overriding whatever id it carried.
    pub fn insert(&mut self, mut position: Position) -> PositionId {
        let id = self.next_id();
        position.id = id;
        self.owners.entry(position.owner).or_default().push(id);
        self.positions.push(position);
        id
    }

    /// Look up a position. Id 0 yields the sentinel.
    pub fn get(&self, id: PositionId) -> Option<&Position> {
        self.positions.get(arena_index(id)?)
    }

    /// Replace a stored position with an updated copy. The sentinel and the
    /// ownership fields are not writable through this path.
    pub(crate) fn update(&mut self, position: Position) {
        if position.id == 0 {
            return;
        }
        let Some(index) = arena_index(position.id) else {
            return;
        };
        if let Some(stored) = self.positions.get_mut(index) {
            debug_assert_eq!(stored.owner, position.owner);
            *stored = position;
        }
    }

    /// Move a position to a new owner, updating both index entries.
    pub(crate) fn reassign(&mut self, id: PositionId, to: Address) {
        let Some(slot) = arena_index(id)
            .and_then(|index| self.positions.get_mut(index))
            .filter(|_| id != 0)
        else {
            return;
        };
        let from = std::mem::replace(&mut slot.owner, to);
        self.unindex(&from, id);
        self.owners.entry(to).or_default().push(id);
    }

    /// Zero a paid-out position, hand it to the null address and drop it from
    /// the owner index. Returns the record as it was before retirement.
    pub(crate) fn retire(&mut self, id: PositionId) -> Option<Position> {
        if id == 0 {
            return None;
        }
        let slot = self.positions.get_mut(arena_index(id)?)?;
        let before = slot.clone();
        *slot = Position {
            id,
            start_time: before.start_time,
            deadline: before.deadline,
            is_whitelisted: before.is_whitelisted,
            requested_at: before.requested_at,
            request_round: before.request_round,
            retired: true,
            ..Position::default()
        };
        self.unindex(&before.owner, id);
        Some(before)
    }

    fn unindex(&mut self, owner: &Address, id: PositionId) {
        if let Some(ids) = self.owners.get_mut(owner) {
            ids.retain(|&held| held != id);
            if ids.is_empty() {
                self.owners.remove(owner);
            }
        }
    }

    /// Ids currently owned by `owner`, in acquisition order.
    pub fn tokens_of(&self, owner: &Address) -> &[PositionId] {
        self.owners.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every issued position, sentinel excluded.
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter().skip(1)
    }

    /// Principal of all active positions as `(usdc, brbc)`. `None` on overflow.
    pub fn staked_totals(&self) -> Option<(u128, u128)> {
        self.iter()
            .filter(|p| p.is_active())
            .try_fold((0u128, 0u128), |(usdc, brbc), p| {
                Some((
                    usdc.checked_add(p.usdc_amount)?,
                    brbc.checked_add(p.brbc_amount)?,
                ))
            })
    }

    /// USDC principal owed to requested, not yet withdrawn, positions.
    pub fn owed_usdc(&self) -> Option<u128> {
        self.pending_usdc(|_| true)
    }

    /// USDC principal of requested positions still waiting for a funding round.
    pub fn unfunded_usdc(&self, funding_rounds: u64) -> Option<u128> {
        self.pending_usdc(|p| !p.is_funded(funding_rounds))
    }

    fn pending_usdc(&self, include: impl Fn(&Position) -> bool) -> Option<u128> {
        self.iter()
            .filter(|p| p.is_pending_exit() && include(p))
            .try_fold(0u128, |sum, p| sum.checked_add(p.usdc_amount))
    }

    /// Structural checks used when restoring from a snapshot.
    pub fn check_consistency(&self) -> Result<(), String> {
        match self.positions.first() {
            Some(first) if *first == Position::sentinel() => {}
            _ => return Err("slot 0 does not hold the sentinel".into()),
        }
        for (index, position) in self.positions.iter().enumerate().skip(1) {
            if position.id != index as PositionId {
                return Err(format!("position at slot {index} carries id {}", position.id));
            }
            let listed = self
                .tokens_of(&position.owner)
                .iter()
                .filter(|&&id| id == position.id)
                .count();
            let expected = usize::from(!position.retired);
            if listed != expected {
                return Err(format!("owner index lists position {index} {listed} times"));
            }
        }
        let indexed: usize = self.owners.values().map(Vec::len).sum();
        let live = self.iter().filter(|p| !p.retired).count();
        if indexed != live {
            return Err(format!("owner index holds {indexed} ids for {live} live positions"));
        }
        Ok(())
    }
}

/// Arena index of `id`; `None` when it does not fit the platform's `usize`.
fn arena_index(id: PositionId) -> Option<usize> {
    usize::try_from(id).ok()
}

impl Default for PositionStore {
    fn default() -> Self {
        Self::new()
    }
}
