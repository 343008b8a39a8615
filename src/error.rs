//! Error types for the pairing toolkit and the authentication protocol.

use crate::protocol::Check;

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid parameters were provided (bit sizes, configuration, engine setup).
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// A scalar value is invalid or out of range.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// A group element is invalid or not in the correct subgroup.
    #[error("Invalid group element: {0}")]
    InvalidGroupElement(String),

    /// The plaintext does not fit into the scalar field.
    #[error("Message too long: {len} bytes exceed {capacity_bits} bits")]
    MessageTooLong {
        /// Length of the rejected message in bytes.
        len: usize,
        /// Number of bits available in the field encoding.
        capacity_bits: u64,
    },

    /// The Solinas search did not converge within its iteration bound.
    #[error("Parameter search exhausted after {iterations} iterations")]
    ParameterSearchExhausted {
        /// Number of outer iterations that were attempted.
        iterations: u64,
    },

    /// A terminal protocol check did not hold.
    #[error("Protocol verification failed: {check}")]
    ProtocolVerification {
        /// The check that failed.
        check: Check,
    },

    /// A pairing parameter block could not be parsed.
    #[error("Malformed parameter block: {0}")]
    MalformedParameterBlock(String),
}
