#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use solinas_pairing_auth::{Envelope, PairingEngine, TypeA};

// q = 1571, r = 131: small enough for subgroup checks on every input
const BLOCK: &str = "type a\nq 1571\nr 131\nh 12\nexp1 2\nexp2 7\nsign0 -1\nsign1 1\n";

fn engine() -> &'static TypeA {
    static ENGINE: OnceLock<TypeA> = OnceLock::new();
    ENGINE.get_or_init(|| TypeA::from_block(BLOCK).unwrap())
}

fuzz_target!(|data: &[u8]| {
    let engine = engine();
    let _ = engine.scalar_from_bytes(data);
    let _ = engine.g1_from_bytes(data);
    let _ = engine.gt_from_bytes(data);
    let _ = Envelope::from_bytes(engine, data);
});
