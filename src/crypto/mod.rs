/// Fixed-width message encoding into the scalar field.
pub mod codec;
/// Pairing engine trait and tagged element references.
pub mod group;
/// SHA-256 hash-to-scalar and hash-to-element.
pub mod hash;
/// Probabilistic primality testing.
pub mod prime;
/// Secure and seeded random number generation.
pub mod rng;

pub use codec::FieldCodec;
pub use group::{ElementRef, GroupKind, PairingEngine};
pub use hash::DomainHash;
pub use rng::{SecureRng, SeededRng};
