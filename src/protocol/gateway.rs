use rand_core::CryptoRngCore;
use tracing::debug;
use zeroize::Zeroize;

use crate::crypto::{DomainHash, PairingEngine};
use crate::{Error, Result};

/// Values published by the gateway at setup: the generator `g` and `pubGW = g^privGW`.
#[derive(Clone, Debug)]
pub struct PublicParameters<E: PairingEngine> {
    generator: E::G1,
    public_key: E::G1,
}

impl<E: PairingEngine> PublicParameters<E> {
    /// Returns the generator `g`.
    pub fn generator(&self) -> &E::G1 {
        &self.generator
    }

    /// Returns the gateway public key `pubGW`.
    pub fn public_key(&self) -> &E::G1 {
        &self.public_key
    }
}

/// Long-term key pair of an enrolled vehicle.
///
/// The private key is `identity^privGW`; it is issued once and never changes.
#[derive(Clone, Debug)]
pub struct Credential<E: PairingEngine> {
    identity: E::G1,
    private_key: E::G1,
}

impl<E: PairingEngine> Credential<E> {
    /// Returns the vehicle identity.
    pub fn identity(&self) -> &E::G1 {
        &self.identity
    }

    /// Returns the private key issued by the gateway.
    pub fn private_key(&self) -> &E::G1 {
        &self.private_key
    }
}

/// Trusted party that owns the master secret and issues vehicle credentials.
///
/// # Security
///
/// The master secret is wiped when the gateway is dropped. Uniqueness of enrolled
/// identities is the caller's responsibility.
pub struct Gateway<E: PairingEngine> {
    hash: DomainHash<E>,
    secret: E::Scalar,
    public: PublicParameters<E>,
}

impl<E: PairingEngine> Gateway<E> {
    /// Samples `g`, the master secret and `pubGW = g^privGW`.
    pub fn setup<R: CryptoRngCore + ?Sized>(engine: E, rng: &mut R) -> Self {
        let generator = loop {
            let g = engine.random_g1(rng);
            if !engine.g1_is_identity(&g) {
                break g;
            }
        };
        let secret = engine.random_scalar(rng);
        let public_key = engine.g1_mul(&generator, &secret);
        debug!(engine = engine.name(), "gateway setup complete");

        Self {
            hash: DomainHash::new(engine),
            secret,
            public: PublicParameters {
                generator,
                public_key,
            },
        }
    }

    /// Returns the pairing engine.
    pub fn engine(&self) -> &E {
        self.hash.engine()
    }

    /// Returns the published parameters.
    pub fn public_parameters(&self) -> &PublicParameters<E> {
        &self.public
    }

    /// Derives the identity bound to a vehicle name.
    pub fn identity_for(&self, name: &str) -> E::G1 {
        self.hash.hash_bytes_to_g1(name.as_bytes())
    }

    /// Issues `privKey = identity^privGW`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidGroupElement`] if `identity` is the group identity.
    pub fn enroll(&self, identity: &E::G1) -> Result<Credential<E>> {
        let engine = self.engine();
        if engine.g1_is_identity(identity) {
            return Err(Error::InvalidGroupElement(
                "Vehicle identity cannot be the group identity".to_string(),
            ));
        }

        let private_key = engine.g1_mul(identity, &self.secret);
        debug!("issued vehicle credential");
        Ok(Credential {
            identity: identity.clone(),
            private_key,
        })
    }
}

impl<E: PairingEngine> Drop for Gateway<E> {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SeededRng;
    use crate::groups::TypeA;
    use crate::params::tiny_params;

    #[test]
    fn credential_pairs_with_public_key() {
        let engine = TypeA::new(&tiny_params()).unwrap();
        let mut rng = SeededRng::from_seed(5);
        let gateway = Gateway::setup(engine.clone(), &mut rng);
        let public = gateway.public_parameters();

        let identity = gateway.identity_for("vehicle-a");
        let credential = gateway.enroll(&identity).unwrap();

        // e(id^s, g) == e(id, g^s)
        assert_eq!(
            engine.pairing(credential.private_key(), public.generator()),
            engine.pairing(credential.identity(), public.public_key())
        );
    }

    #[test]
    fn enroll_rejects_identity_element() {
        let engine = TypeA::new(&tiny_params()).unwrap();
        let mut rng = SeededRng::from_seed(6);
        let gateway = Gateway::setup(engine.clone(), &mut rng);
        assert!(matches!(
            gateway.enroll(&engine.g1_identity()),
            Err(Error::InvalidGroupElement(_))
        ));
    }

    #[test]
    fn identity_for_is_stable_per_name() {
        let engine = TypeA::new(&tiny_params()).unwrap();
        let mut rng = SeededRng::from_seed(7);
        let gateway = Gateway::setup(engine, &mut rng);
        assert_eq!(gateway.identity_for("truck"), gateway.identity_for("truck"));
    }
}
