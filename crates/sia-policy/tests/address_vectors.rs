//! # Address Known-Answer Tests
//!
//! Expected digests were computed independently with a reference BLAKE2b
//! implementation over the byte layouts documented in `sia_policy::address`
//! and `sia_crypto::merkle`. A mismatch here means previously issued
//! addresses would no longer resolve to their policies.

use sia_core::{Address, CanonicalBytes, HasherPool};
use sia_crypto::PublicKey;
use sia_policy::{parse_spend_policy, standard_address, SpendPolicy, UnlockConditions};

fn key(b: u8) -> PublicKey {
    PublicKey([b; 32])
}

fn addr_hex(p: &SpendPolicy) -> String {
    p.address().to_hex()
}

#[test]
fn anyone_can_spend() {
    let p = SpendPolicy::anyone_can_spend();
    assert_eq!(CanonicalBytes::new(&p).to_hex(), "01030000");
    assert_eq!(
        addr_hex(&p),
        "a1b418e9905dd086e2d0c25ec3675568f849c18f401512d704eceafe1574ee19"
    );
}

#[test]
fn single_key_policies() {
    assert_eq!(
        standard_address(key(0)).to_hex(),
        "1cfa974ea2ba9fb51505f6c6136262d105d673450a33862eee7c2eaa2f4c1905"
    );
    assert_eq!(
        standard_address(key(1)).to_hex(),
        "3635ef8a735b78d4e10623cdd8ecb00e143f3ed0d88a60780abf916bfc4bcf80"
    );
}

#[test]
fn nested_threshold_from_text() {
    let text = format!(
        "thresh(1,[above(100),thresh(2,[pk({}),pk({})])])",
        "0".repeat(64),
        "11".repeat(32)
    );
    let p = parse_spend_policy(&text).unwrap();
    assert_eq!(
        addr_hex(&p),
        "69918ede71687b274b13b12486807f46c5288420e030378b8031356c33292c0a"
    );
}

#[test]
fn legacy_unlock_conditions() {
    let cases: &[(u64, Vec<PublicKey>, u8, &str)] = &[
        (
            0,
            vec![],
            0,
            "10628d8f8233d6a5afe65df26e6f82d61cbb8e7083056a061ce30705ec68dffb",
        ),
        (
            0,
            vec![key(1), key(2)],
            2,
            "84fa7cdda43034389e994de6f0d9dbc899711a66be688fee072c31bb2366e7ec",
        ),
        (
            100,
            (1..=6).map(key).collect(),
            3,
            "94c940d1777877a26c5fa9f050cd6d8990b0f8953bf1f16376ee03f7f714e47f",
        ),
    ];
    for (timelock, keys, sigs, expected) in cases {
        let p = SpendPolicy::unlock_conditions(UnlockConditions {
            timelock: *timelock,
            public_keys: keys.clone(),
            signatures_required: *sigs,
        });
        assert_eq!(
            addr_hex(&p),
            *expected,
            "uc({timelock}, {} keys, {sigs})",
            keys.len()
        );
    }
}

#[test]
fn address_is_stable_across_threads() {
    let policies: Vec<SpendPolicy> = (0..16)
        .map(|i| {
            SpendPolicy::threshold(
                1,
                vec![SpendPolicy::above(i), SpendPolicy::public_key(key(i as u8))],
            )
        })
        .collect();
    let expected: Vec<Address> = policies.iter().map(SpendPolicy::address).collect();
    let pool = HasherPool::with_max_idle(2);

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for (p, want) in policies.iter().zip(&expected) {
                    assert_eq!(&p.address_with(&pool), want);
                }
            });
        }
    });
    assert!(pool.idle() <= 2);
}
