//! Anonymous mutual authentication and key exchange between two vehicles.
//!
//! A trusted gateway issues long-term keys `identity^privGW`. Each session a vehicle
//! hides behind a fresh pseudonym `tid = identity^n`. The initiator masks a message
//! under a pairing-derived shared key and blinds its pseudonym; the responder
//! recovers both with its own private key and nonce.

/// Gateway setup and enrollment.
pub mod gateway;
/// Full pipeline driver.
pub mod handshake;
/// Envelope and transcripts.
pub mod message;
/// Terminal checks.
pub mod report;
/// Vehicle discovery, exchange and extraction.
pub mod vehicle;

pub use gateway::{Credential, Gateway, PublicParameters};
pub use handshake::{Handshake, HandshakeOutcome};
pub use message::{Envelope, InitiatorTranscript, ResponderTranscript};
pub use report::{Check, VerificationReport};
pub use vehicle::{Session, Vehicle};
