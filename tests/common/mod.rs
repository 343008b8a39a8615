//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use solinas_pairing_auth::{generate, PairingParameters, TypeA};

/// Plaintext that fits a 160-bit group order (19 bytes).
pub const SHORT_FOX: &[u8] = b"The quick brown fox";

/// Full pangram, 43 bytes; needs a group order of at least 345 bits.
pub const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

/// Initialize test tracing (call once at the beginning of tests).
///
/// Subsequent calls are safe and will be ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("solinas_pairing_auth=info");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Seed 1 parameters with `rbits = 160`, `qbits = 512`, generated once per test binary.
pub fn params() -> &'static PairingParameters {
    static PARAMS: OnceLock<PairingParameters> = OnceLock::new();
    PARAMS.get_or_init(|| generate(160, 512, 1).expect("Parameter search should succeed"))
}

/// Engine over [`params`].
pub fn engine() -> TypeA {
    TypeA::new(params()).expect("Generated parameters are consistent")
}
