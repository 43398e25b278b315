#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lpstake_pool::math::{accrued_reward, apply_penalty, growth_delta, mul_div};

#[derive(Debug, Arbitrary)]
struct Input {
    reward: u128,
    principal_a: u128,
    principal_b: u128,
    penalty_bps: u16,
}

// Pro-rata shares never exceed the injected reward and penalties conserve principal.
fuzz_target!(|input: Input| {
    let _ = mul_div(input.reward, input.principal_a, input.principal_b);

    let Some(total) = input.principal_a.checked_add(input.principal_b) else {
        return;
    };
    if let Some(growth) = growth_delta(input.reward, total) {
        let a = accrued_reward(input.principal_a, growth, 0);
        let b = accrued_reward(input.principal_b, growth, 0);
        if let (Some(a), Some(b)) = (a, b) {
            assert!(a.saturating_add(b) <= input.reward);
        }
    }

    let bps = u32::from(input.penalty_bps % 10_001);
    if let Some((kept, penalty)) = apply_penalty(input.principal_a, bps) {
        assert_eq!(kept + penalty, input.principal_a);
    }
});
