//! Read-only view of a saved pool snapshot.

use crate::error::CliError;
use lpstake_pool::{PoolAccounting, PoolSnapshot, Position, SnapshotError, StakingPhase};
use lpstake_types::{Address, Timestamp};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct SnapshotView {
    pub version: u32,
    pub taken_at: Timestamp,
    pub phase: StakingPhase,
    pub admin: Address,
    pub vault: Address,
    pub accounting: PoolAccounting,
    pub owed_usdc: u128,
    pub positions_issued: u64,
    pub whitelist: Vec<Address>,
    /// Positions that have not been withdrawn.
    pub positions: Vec<Position>,
}

/// Decode, verify and summarize snapshot bytes.
pub fn inspect(bytes: &[u8]) -> Result<SnapshotView, CliError> {
    let snapshot = PoolSnapshot::from_bytes(bytes)?;
    snapshot.validate()?;
    let owed_usdc = snapshot
        .positions
        .owed_usdc()
        .ok_or_else(|| SnapshotError::Inconsistent("owed principal overflows".into()))?;
    Ok(SnapshotView {
        version: snapshot.version,
        taken_at: snapshot.taken_at,
        phase: snapshot.schedule.phase_at(snapshot.taken_at),
        admin: snapshot.admin,
        vault: snapshot.vault,
        owed_usdc,
        positions_issued: snapshot.positions.issued(),
        whitelist: snapshot.whitelist.members().copied().collect(),
        positions: snapshot
            .positions
            .iter()
            .filter(|p| !p.retired)
            .cloned()
            .collect(),
        accounting: snapshot.accounting,
    })
}
