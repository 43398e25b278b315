//! Pool snapshots: capture the full pool state and restore it later.
//!
//! The encoded form is the Blake2b-256 digest of the bincode-serialized state
//! followed by the state itself. All collections in the state are ordered
//! maps and sets, so equal states always encode to equal bytes.

use crate::accounting::PoolAccounting;
use crate::engine::StakingPool;
use crate::error::SnapshotError;
use crate::events::EventBus;
use crate::position::PositionStore;
use crate::whitelist::WhitelistRegistry;
use crate::window::StakingSchedule;
use lpstake_assets::AssetLedger;
use lpstake_types::{Address, Clock, StakingParams, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

pub const SNAPSHOT_VERSION: u32 = 1;

const DIGEST_LEN: usize = 32;

/// Everything needed to rebuild a pool except the ledger and the clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub version: u32,
    pub taken_at: Timestamp,
    pub params: StakingParams,
    pub admin: Address,
    pub vault: Address,
    pub schedule: StakingSchedule,
    pub positions: PositionStore,
    pub whitelist: WhitelistRegistry,
    pub accounting: PoolAccounting,
    pub wallet_entered: BTreeMap<Address, u128>,
}

impl PoolSnapshot {
    /// Digest-prefixed bincode encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let body = bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))?;
        let mut out = Vec::with_capacity(DIGEST_LEN + body.len());
        out.extend_from_slice(&digest(&body));
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Decode and verify a snapshot produced by [`PoolSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < DIGEST_LEN {
            return Err(SnapshotError::Truncated(bytes.len()));
        }
        let (expected, body) = bytes.split_at(DIGEST_LEN);
        let computed = digest(body);
        if expected != computed.as_slice() {
            return Err(SnapshotError::DigestMismatch {
                expected: hex::encode(expected),
                computed: hex::encode(computed),
            });
        }
        let snapshot: Self =
            bincode::deserialize(body).map_err(|e| SnapshotError::Decode(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }

    /// Structural checks: valid params, consistent position index, positions
    /// that keep the BRBC ratio, pool totals that match the staked positions,
    /// and a request total equal to the unfunded requests (so never above
    /// the owed principal).
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.params.validate()?;
        self.positions
            .check_consistency()
            .map_err(SnapshotError::Inconsistent)?;

        for position in self.positions.iter() {
            if self.params.brbc_for(position.usdc_amount) != Some(position.brbc_amount) {
                return Err(inconsistent(format!(
                    "position {} holds {} BRBC for {} USDC",
                    position.id, position.brbc_amount, position.usdc_amount
                )));
            }
        }

        let (usdc, brbc) = self
            .positions
            .staked_totals()
            .ok_or_else(|| inconsistent("staked principal overflows".into()))?;
        if (usdc, brbc) != (self.accounting.pool_usdc, self.accounting.pool_brbc) {
            return Err(inconsistent(format!(
                "pool totals ({}, {}) differ from staked positions ({usdc}, {brbc})",
                self.accounting.pool_usdc, self.accounting.pool_brbc
            )));
        }

        self.positions
            .owed_usdc()
            .ok_or_else(|| inconsistent("owed principal overflows".into()))?;
        let unfunded = self
            .positions
            .unfunded_usdc(self.accounting.funding_rounds)
            .ok_or_else(|| inconsistent("unfunded principal overflows".into()))?;
        if self.accounting.requested_amount != unfunded {
            return Err(inconsistent(format!(
                "requested amount {} differs from unfunded requests {unfunded}",
                self.accounting.requested_amount
            )));
        }
        Ok(())
    }
}

fn inconsistent(reason: String) -> SnapshotError {
    SnapshotError::Inconsistent(reason)
}

fn digest(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    use blake2::digest::consts::U32;
    use blake2::{Blake2b, Digest};

    let mut hasher = Blake2b::<U32>::new();
    hasher.update(bytes);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

impl<L: AssetLedger, C: Clock> StakingPool<L, C> {
    /// Capture the pool state. Event listeners are not part of a snapshot.
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            version: SNAPSHOT_VERSION,
            taken_at: self.clock.now(),
            params: self.params.clone(),
            admin: self.admin,
            vault: self.vault,
            schedule: self.schedule,
            positions: self.positions.clone(),
            whitelist: self.whitelist.clone(),
            accounting: self.accounting.clone(),
            wallet_entered: self.wallet_entered.clone(),
        }
    }

    /// Rebuild a pool from a validated snapshot over the given ledger and clock.
    pub fn restore(snapshot: PoolSnapshot, ledger: L, clock: C) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        info!(
            positions = snapshot.positions.issued(),
            taken_at = snapshot.taken_at.as_secs(),
            "staking pool restored"
        );
        Ok(Self {
            params: snapshot.params,
            admin: snapshot.admin,
            vault: snapshot.vault,
            schedule: snapshot.schedule,
            positions: snapshot.positions,
            whitelist: snapshot.whitelist,
            accounting: snapshot.accounting,
            wallet_entered: snapshot.wallet_entered,
            events: EventBus::new(),
            ledger,
            clock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use lpstake_nullables::{NullAssetLedger, NullClock};
    use lpstake_types::{units, Asset};

    fn sample_pool() -> StakingPool<NullAssetLedger, NullClock> {
        let admin = Address::from_label("admin");
        let vault = Address::from_label("vault");
        let alice = Address::from_label("alice");
        let mut ledger = NullAssetLedger::new();
        ledger.mint(Asset::Usdc, &alice, units(800));
        ledger.mint(Asset::Brbc, &alice, units(3_200));
        for asset in Asset::ALL {
            ledger.approve(asset, &alice, &vault, u128::MAX).unwrap();
        }
        let mut pool =
            StakingPool::new(StakingParams::default(), admin, vault, ledger, NullClock::new(0))
                .unwrap();
        pool.set_whitelist(&admin, &[alice]).unwrap();
        pool.whitelist_stake(&alice, units(800)).unwrap();
        pool
    }

    #[test]
    fn encode_decode_restores_state() {
        let pool = sample_pool();
        let snapshot = pool.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        let decoded = PoolSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, snapshot);

        let restored =
            StakingPool::restore(decoded, pool.ledger().clone(), NullClock::new(10)).unwrap();
        assert_eq!(restored.pool_usdc(), units(800));
        assert_eq!(restored.tokens_of(&Address::from_label("alice")), &[1]);
        assert!(restored.is_whitelisted(&Address::from_label("alice")));
        assert_eq!(restored.genesis(), pool.genesis());
    }

    #[test]
    fn equal_state_encodes_identically() {
        let pool = sample_pool();
        let a = pool.snapshot().to_bytes().unwrap();
        let b = pool.snapshot().to_bytes().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tampered_bytes_fail_digest() {
        let mut bytes = sample_pool().snapshot().to_bytes().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        assert!(matches!(
            PoolSnapshot::from_bytes(&bytes),
            Err(SnapshotError::DigestMismatch { .. })
        ));
    }

    #[test]
    fn short_input_is_truncated() {
        assert!(matches!(
            PoolSnapshot::from_bytes(&[0u8; 8]),
            Err(SnapshotError::Truncated(8))
        ));
    }

    fn crafted(usdc: u128, brbc: u128, requested: bool) -> Position {
        Position {
            owner: Address::from_label("mallory"),
            usdc_amount: usdc,
            brbc_amount: brbc,
            is_staked: !requested,
            requested,
            ..Position::default()
        }
    }

    #[test]
    fn overflowing_principal_is_inconsistent() {
        let mut snapshot = sample_pool().snapshot();
        snapshot.params.brbc_per_usdc = 1;
        snapshot.positions = PositionStore::new();
        for _ in 0..2 {
            snapshot.positions.insert(crafted(u128::MAX, u128::MAX, false));
        }
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::Inconsistent(_))
        ));

        let bytes = snapshot.to_bytes().unwrap();
        let decoded = PoolSnapshot::from_bytes(&bytes).unwrap();
        let restored = StakingPool::restore(decoded, NullAssetLedger::new(), NullClock::new(0));
        assert!(matches!(restored, Err(SnapshotError::Inconsistent(_))));
    }

    #[test]
    fn overflowing_owed_principal_is_inconsistent() {
        let mut snapshot = sample_pool().snapshot();
        snapshot.params.brbc_per_usdc = 1;
        snapshot.positions = PositionStore::new();
        snapshot.accounting.pool_usdc = 0;
        snapshot.accounting.pool_brbc = 0;
        for _ in 0..2 {
            snapshot.positions.insert(crafted(u128::MAX, u128::MAX, true));
        }
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::Inconsistent(_))
        ));
    }

    #[test]
    fn broken_brbc_ratio_is_inconsistent() {
        let mut snapshot = sample_pool().snapshot();
        snapshot.positions = PositionStore::new();
        snapshot
            .positions
            .insert(crafted(units(800), units(3_199), false));
        snapshot.accounting.pool_brbc = units(3_199);
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::Inconsistent(reason)) if reason.contains("BRBC")
        ));
    }

    #[test]
    fn request_total_tracks_unfunded_requests() {
        let mut pool = sample_pool();
        let admin = Address::from_label("admin");
        let alice = Address::from_label("alice");
        pool.ledger_mut().mint(Asset::Usdc, &admin, units(720));
        pool.ledger_mut().mint(Asset::Brbc, &admin, units(2_880));
        for asset in Asset::ALL {
            let vault = *pool.vault();
            pool.ledger_mut().approve(asset, &admin, &vault, u128::MAX).unwrap();
        }
        pool.request_withdraw(&alice, 1).unwrap();

        let requested = pool.snapshot();
        requested.validate().unwrap();
        assert_eq!(requested.accounting.requested_amount, units(720));
        let mut inflated = requested.clone();
        inflated.accounting.requested_amount += 1;
        assert!(matches!(
            inflated.validate(),
            Err(SnapshotError::Inconsistent(_))
        ));

        pool.fund_requests(&admin).unwrap();
        let funded = pool.snapshot();
        funded.validate().unwrap();
        let mut stale = funded.clone();
        stale.accounting.requested_amount = units(720);
        assert!(matches!(
            stale.validate(),
            Err(SnapshotError::Inconsistent(_))
        ));
    }

    #[test]
    fn inconsistent_totals_are_rejected() {
        let mut snapshot = sample_pool().snapshot();
        snapshot.accounting.pool_usdc += 1;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::Inconsistent(_))
        ));
    }
}
