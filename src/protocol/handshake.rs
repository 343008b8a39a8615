use rand_core::CryptoRngCore;
use tracing::{debug, info};

use super::gateway::Gateway;
use super::message::{Envelope, InitiatorTranscript, ResponderTranscript};
use super::report::VerificationReport;
use super::vehicle::Vehicle;
use crate::crypto::PairingEngine;
use crate::Result;

/// Everything one run of the pipeline produced.
#[derive(Clone, Debug)]
pub struct HandshakeOutcome<E: PairingEngine> {
    /// The initiator's values.
    pub initiator: InitiatorTranscript<E>,
    /// The responder's recomputed values.
    pub responder: ResponderTranscript<E>,
    /// The envelope that went from initiator to responder.
    pub envelope: Envelope<E>,
    /// Terminal check results.
    pub report: VerificationReport,
}

/// Runs setup, enrollment, discovery, exchange, extraction and verification in one
/// process.
pub struct Handshake<E: PairingEngine> {
    gateway: Gateway<E>,
}

impl<E: PairingEngine> Handshake<E> {
    /// Sets up a fresh gateway.
    pub fn new<R: CryptoRngCore + ?Sized>(engine: E, rng: &mut R) -> Self {
        Self {
            gateway: Gateway::setup(engine, rng),
        }
    }

    /// Returns the gateway.
    pub fn gateway(&self) -> &Gateway<E> {
        &self.gateway
    }

    /// Enrolls `identity` and binds the credential to the gateway parameters.
    pub fn enroll(&self, identity: &E::G1) -> Result<Vehicle<E>> {
        let credential = self.gateway.enroll(identity)?;
        Vehicle::new(
            self.gateway.engine().clone(),
            self.gateway.public_parameters().clone(),
            credential,
        )
    }

    /// Enrolls the vehicle bound to `name`.
    pub fn enroll_named(&self, name: &str) -> Result<Vehicle<E>> {
        self.enroll(&self.gateway.identity_for(name))
    }

    /// Sends `plaintext` from `initiator` to `responder` and compares both views.
    ///
    /// A failed check is reported in the outcome, not as an error.
    pub fn run<R: CryptoRngCore + ?Sized>(
        &self,
        initiator: &Vehicle<E>,
        responder: &Vehicle<E>,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<HandshakeOutcome<E>> {
        let session_a = initiator.discover(rng);
        let session_b = responder.discover(rng);
        debug!("both vehicles completed discovery");

        let (envelope, sent) = initiator.seal(&session_a, session_b.tid(), plaintext, rng)?;
        let received = responder.extract(&session_b, &envelope)?;
        let report = VerificationReport::compare(&sent, &received);
        info!(valid = report.is_valid(), "handshake finished");

        Ok(HandshakeOutcome {
            initiator: sent,
            responder: received,
            envelope,
            report,
        })
    }
}
