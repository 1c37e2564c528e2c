#![no_main]

//! Fuzz harness for the guardian signature codec.
//!
//! | Target          | What we are looking for                                |
//! |-----------------|--------------------------------------------------------|
//! | `pack`/`unpack` | Canonical signatures survive the packed form unchanged |
//! | `decode_packed` | The recovery bit never leaks into `s`                  |
//! | `check_unique`  | Strict ordering never accepts what a scan rejects      |
//!
//! Recovery itself is not fuzzed here: the host rejects malformed points and
//! that path is covered by `vault_fuzz`.

use arbitrary::Arbitrary;
use common::{
    check_unique, decode_packed, decode_standard, is_canonical, pack, unpack, DedupMode,
};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{BytesN, Env, Vec};

#[derive(Arbitrary, Debug)]
pub struct CodecInput {
    standard: std::vec::Vec<[u8; 65]>,
    packed: std::vec::Vec<[u8; 64]>,
    signers: std::vec::Vec<Option<[u8; 20]>>,
}

fuzz_target!(|input: CodecInput| {
    let env = Env::default();

    for raw in input.standard.iter().take(16) {
        let sig = BytesN::from_array(&env, raw);
        let Ok(c) = decode_standard(&sig) else {
            assert!(pack(&env, &sig).is_err());
            continue;
        };
        match pack(&env, &sig) {
            Ok(packed) => {
                assert!(is_canonical(&c.r, &c.s));
                assert_eq!(decode_packed(&packed), c);
                assert_eq!(decode_standard(&unpack(&env, &packed)).ok(), Some(c));
            }
            Err(_) => assert!(!is_canonical(&c.r, &c.s)),
        }
    }

    for raw in input.packed.iter().take(16) {
        let c = decode_packed(&BytesN::from_array(&env, raw));
        assert_eq!(c.s[0] & 0x80, 0);
        assert!(c.v <= 1);
    }

    let mut signers = Vec::new(&env);
    for key in input.signers.iter().take(32) {
        signers.push_back(key.map(|k| BytesN::from_array(&env, &k)));
    }
    if check_unique(&signers, DedupMode::StrictlyIncreasing).is_ok() {
        assert!(check_unique(&signers, DedupMode::Scan).is_ok());
    }
    if check_unique(&signers, DedupMode::Scan).is_err() {
        assert!(check_unique(&signers, DedupMode::StrictlyIncreasing).is_err());
    }
});
