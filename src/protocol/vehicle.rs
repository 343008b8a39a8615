use rand_core::CryptoRngCore;
use tracing::debug;
use zeroize::Zeroize;

use super::gateway::{Credential, PublicParameters};
use super::message::{Envelope, InitiatorTranscript, ResponderTranscript};
use crate::crypto::{DomainHash, ElementRef, FieldCodec, PairingEngine};
use crate::{Error, Result};

/// Per-session pseudonym material produced by discovery.
///
/// The nonce is wiped on drop. A session is never persisted.
#[derive(Debug)]
pub struct Session<E: PairingEngine> {
    nonce: E::Scalar,
    tid: E::G1,
    temp_public: E::G1,
}

impl<E: PairingEngine> Session<E> {
    /// Session pseudonym `tid = identity^n`.
    pub fn tid(&self) -> &E::G1 {
        &self.tid
    }

    /// Temporary public value `g^n`.
    pub fn temp_public(&self) -> &E::G1 {
        &self.temp_public
    }
}

impl<E: PairingEngine> Drop for Session<E> {
    fn drop(&mut self) {
        self.nonce.zeroize();
    }
}

/// An enrolled vehicle, able to act as initiator or responder.
#[derive(Clone, Debug)]
pub struct Vehicle<E: PairingEngine> {
    hash: DomainHash<E>,
    codec: FieldCodec,
    public: PublicParameters<E>,
    credential: Credential<E>,
}

impl<E: PairingEngine> Vehicle<E> {
    /// Binds a credential to the gateway's public parameters.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParams`] if the credential was not issued under
    /// `public`, i.e. `e(privKey, g) != e(identity, pubGW)`.
    pub fn new(engine: E, public: PublicParameters<E>, credential: Credential<E>) -> Result<Self> {
        let issued = engine.pairing(credential.private_key(), public.generator());
        let expected = engine.pairing(credential.identity(), public.public_key());
        if issued != expected {
            return Err(Error::InvalidParams(
                "Credential was not issued by this gateway".to_string(),
            ));
        }

        Ok(Self {
            codec: FieldCodec::for_order(engine.order()),
            hash: DomainHash::new(engine),
            public,
            credential,
        })
    }

    /// Returns the pairing engine.
    pub fn engine(&self) -> &E {
        self.hash.engine()
    }

    /// Returns the long-term identity.
    pub fn identity(&self) -> &E::G1 {
        self.credential.identity()
    }

    /// Returns the codec used for plaintexts.
    pub fn codec(&self) -> &FieldCodec {
        &self.codec
    }

    /// Draws a fresh session nonce and derives the session pseudonym.
    pub fn discover<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Session<E> {
        let engine = self.engine();
        let nonce = engine.random_scalar(rng);
        let tid = engine.g1_mul(self.identity(), &nonce);
        let temp_public = engine.g1_mul(self.public.generator(), &nonce);
        debug!("discovery produced a fresh pseudonym");

        Session {
            nonce,
            tid,
            temp_public,
        }
    }

    /// Masks `plaintext` for the peer behind `peer_tid` and builds the envelope.
    ///
    /// # Errors
    /// Returns [`Error::MessageTooLong`] if the plaintext does not fit the scalar
    /// field, and [`Error::InvalidGroupElement`] if `peer_tid` is the identity.
    pub fn seal<R: CryptoRngCore + ?Sized>(
        &self,
        session: &Session<E>,
        peer_tid: &E::G1,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<(Envelope<E>, InitiatorTranscript<E>)> {
        let engine = self.engine();
        if engine.g1_is_identity(peer_tid) {
            return Err(Error::InvalidGroupElement(
                "Peer pseudonym cannot be the group identity".to_string(),
            ));
        }
        let message = self.codec.encode_scalar(engine, plaintext)?;

        let r_a = engine.random_scalar(rng);
        let oti_a = engine.g1_mul(session.tid(), &r_a);

        let r_b = engine.random_scalar(rng);
        let oti_b = engine.g1_mul(self.public.generator(), &r_b);
        let t = engine.gt_pow(&engine.pairing(peer_tid, self.public.public_key()), &r_b);
        let temp = self.hash.hash_to_scalar(&[ElementRef::Gt(&t)]);
        let params_a = engine.scalar_add(&r_a, &temp);
        let params_b = engine.scalar_add(&r_b, &temp);

        let shared_key = engine.pairing(
            self.credential.private_key(),
            &engine.g1_mul(peer_tid, &session.nonce),
        );
        let mask = self.hash.hash_to_scalar(&[ElementRef::Gt(&shared_key)]);
        let cyphertext = engine.scalar_add(&message, &mask);
        let sign = self
            .hash
            .hash_to_scalar(&[ElementRef::Gt(&shared_key), ElementRef::Scalar(&message)]);
        debug!(len = plaintext.len(), "sealed envelope");

        let envelope = Envelope {
            tid_a: session.tid().clone(),
            oti_a,
            oti_b: oti_b.clone(),
            params_a,
            params_b,
            cyphertext,
            sign: sign.clone(),
        };
        let transcript = InitiatorTranscript {
            t,
            r_a,
            r_b,
            oti_b,
            tid_a: session.tid().clone(),
            message,
            shared_key,
            sign,
        };
        Ok((envelope, transcript))
    }

    /// Recovers the initiator pseudonym, the shared key and the message.
    ///
    /// # Errors
    /// Returns [`Error::InvalidScalar`] if the recovered `rA` is zero.
    pub fn extract(
        &self,
        session: &Session<E>,
        envelope: &Envelope<E>,
    ) -> Result<ResponderTranscript<E>> {
        let engine = self.engine();

        let t = engine.pairing(
            self.credential.private_key(),
            &engine.g1_mul(&envelope.oti_b, &session.nonce),
        );
        let temp = self.hash.hash_to_scalar(&[ElementRef::Gt(&t)]);
        let r_a = engine.scalar_sub(&envelope.params_a, &temp);
        let r_b = engine.scalar_sub(&envelope.params_b, &temp);
        let oti_b = engine.g1_mul(self.public.generator(), &r_b);

        let r_a_inv = engine
            .scalar_invert(&r_a)
            .ok_or_else(|| Error::InvalidScalar("Recovered rA is zero".to_string()))?;
        let tid_a = engine.g1_mul(&envelope.oti_a, &r_a_inv);

        let shared_key = engine.pairing(
            &engine.g1_mul(&tid_a, &session.nonce),
            self.credential.private_key(),
        );
        let mask = self.hash.hash_to_scalar(&[ElementRef::Gt(&shared_key)]);
        let message = engine.scalar_sub(&envelope.cyphertext, &mask);
        let sign = self
            .hash
            .hash_to_scalar(&[ElementRef::Gt(&shared_key), ElementRef::Scalar(&message)]);
        debug!("extracted envelope");

        Ok(ResponderTranscript {
            t,
            r_a,
            r_b,
            oti_b,
            tid_a,
            message,
            shared_key,
            sign,
        })
    }

    /// Decodes a recovered message into its padded plaintext bytes.
    pub fn plaintext(&self, transcript: &ResponderTranscript<E>) -> Result<Vec<u8>> {
        self.codec.decode_scalar(self.engine(), &transcript.message)
    }
}
