#![no_main]

use libfuzzer_sys::fuzz_target;
use solinas_pairing_auth::{Gateway, PairingParameters, SeededRng, TypeA};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = PairingParameters::from_block(text);
        // An accepted block must yield an engine that can run setup.
        if let Ok(engine) = TypeA::from_block(text) {
            if engine.params().q.bits() <= 64 {
                let mut rng = SeededRng::from_seed(0);
                let gateway = Gateway::setup(engine, &mut rng);
                let _ = gateway.enroll(&gateway.identity_for("fuzz"));
            }
        }
    }
});
