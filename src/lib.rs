//! Type-A pairing parameters with Solinas-form group orders, and an anonymous
//! gateway-mediated authentication protocol between vehicles built on them.
//!
//! ```no_run
//! use solinas_pairing_auth::{generate, Handshake, SecureRng, TypeA};
//!
//! let params = generate(160, 512, 1).unwrap();
//! let engine = TypeA::new(&params).unwrap();
//! let mut rng = SecureRng::new();
//!
//! let handshake = Handshake::new(engine, &mut rng);
//! let a = handshake.enroll_named("vehicle-a").unwrap();
//! let b = handshake.enroll_named("vehicle-b").unwrap();
//! let outcome = handshake.run(&a, &b, b"hello", &mut rng).unwrap();
//! assert!(outcome.report.is_valid());
//! ```

/// Parameter generation configuration.
pub mod config;
/// Primality, hashing, encoding, randomness and the pairing engine trait.
pub mod crypto;
/// Error types.
pub mod error;
/// Concrete pairing engines.
pub mod groups;
/// Pairing parameters and their generation.
pub mod params;
/// The vehicle authentication protocol.
pub mod protocol;

pub use config::GeneratorConfig;
pub use crypto::{
    DomainHash, ElementRef, FieldCodec, GroupKind, PairingEngine, SecureRng, SeededRng,
};
pub use error::Error;
pub use groups::TypeA;
pub use params::{generate, PairingParameters, SearchConfig, Sign, SolinasGenerator};
pub use protocol::{
    Check, Credential, Envelope, Gateway, Handshake, HandshakeOutcome, InitiatorTranscript,
    PublicParameters, ResponderTranscript, Session, Vehicle, VerificationReport,
};

/// Result type for library operations.
pub type Result<T> = core::result::Result<T, Error>;
