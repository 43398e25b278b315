#![no_main]

use libfuzzer_sys::fuzz_target;

use lpstake_types::{format_units, parse_units, Address, ASSET_DECIMALS};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that parses must format back to a string that parses to the same value.
    if let Ok(raw) = parse_units(s, ASSET_DECIMALS) {
        let formatted = format_units(raw, ASSET_DECIMALS);
        assert_eq!(parse_units(&formatted, ASSET_DECIMALS), Ok(raw));
    }

    if let Ok(address) = s.parse::<Address>() {
        assert_eq!(address.to_string().parse::<Address>(), Ok(address));
    }
});
