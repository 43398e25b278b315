#![no_main]

use libfuzzer_sys::fuzz_target;

use lpstake_cli::{parse_script, PoolConfig, Simulator};

// Any script that parses must run to completion: rejected steps are reported, not panics.
fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(steps) = parse_script(json) else {
        return;
    };
    let Ok(mut simulator) = Simulator::new(&PoolConfig::default()) else {
        return;
    };
    let results = simulator.run(&steps);
    assert_eq!(results.len(), steps.len());
});
