#![no_main]

use libfuzzer_sys::fuzz_target;

use lpstake_nullables::{NullAssetLedger, NullClock};
use lpstake_pool::{PoolSnapshot, StakingPool};

// Decoding and restoring arbitrary bytes must fail cleanly, never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = PoolSnapshot::from_bytes(data) else {
        return;
    };
    let taken_at = snapshot.taken_at.as_secs();
    let _ = StakingPool::restore(snapshot, NullAssetLedger::new(), NullClock::new(taken_at));
});
