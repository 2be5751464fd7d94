//! Key pairs
//!
//! - [`KeyPair`]: a curve25519 key pair, used for signing and key agreement
//! - [`IdentityKeyPair`]: the long-term identity of a device
//!
//! Both hand out serialized keys in the wire forms `sign` and `verify`
//! expect: 32 bytes for the private key, 33 for the public key.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::crypto::curve::{self, PrivateKey, PublicKey};
use crate::crypto::errors::{SignalError, SignatureError, SignatureResult};
use crate::crypto::signature;

/// Curve25519 key pair
#[derive(Debug)]
pub struct KeyPair {
    /// Public key (safe to share)
    pub public: PublicKey,
    /// Private key (never leaves device)
    private: PrivateKey,
}

impl KeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Self {
        Self::from_private(PrivateKey::generate())
    }

    /// Build the pair for an existing private key
    pub fn from_private(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { public, private }
    }

    /// Restore from serialized key bytes.
    ///
    /// The public key must be the one derived from the private key.
    pub fn from_bytes(public_bytes: &[u8], private_bytes: &[u8]) -> SignatureResult<Self> {
        let public = curve::decode_point(public_bytes).map_err(SignatureError::public_key)?;
        let private =
            curve::decode_private_point(private_bytes).map_err(SignatureError::private_key)?;

        if private.public_key() != public {
            return Err(SignatureError::public_key(SignalError::InvalidKey));
        }
        Ok(Self { public, private })
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// Serialized public key (33 bytes)
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.public.serialize()
    }

    /// Serialized private key (32 bytes, for secure storage)
    pub fn private_key_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.private.serialize()
    }

    /// X25519 agreement with a peer's public key
    pub fn calculate_agreement(
        &self,
        their_public: &PublicKey,
    ) -> SignatureResult<Zeroizing<[u8; 32]>> {
        curve::calculate_agreement(their_public, &self.private)
            .map_err(SignatureError::public_key)
    }
}

/// Long-term identity key pair
///
/// Used for:
/// - Signing prekeys and other payloads to prove ownership
/// - Key fingerprint generation for verification
#[derive(Debug)]
pub struct IdentityKeyPair {
    key_pair: KeyPair,
}

impl IdentityKeyPair {
    /// Generate a new random identity key pair
    pub fn generate() -> Self {
        Self {
            key_pair: KeyPair::generate(),
        }
    }

    /// Restore from existing key bytes
    pub fn from_bytes(public_bytes: &[u8], private_bytes: &[u8]) -> SignatureResult<Self> {
        Ok(Self {
            key_pair: KeyPair::from_bytes(public_bytes, private_bytes)?,
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.key_pair.public
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Get the serialized public key
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.key_pair.public_key_bytes()
    }

    /// Get the serialized private key (for secure storage)
    pub fn private_key_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.key_pair.private_key_bytes()
    }

    /// Sign a payload with this identity key
    pub fn sign(&self, payload: &[u8]) -> SignatureResult<Vec<u8>> {
        signature::sign(payload, &self.private_key_bytes())
    }

    /// Verify a signature made by this identity
    pub fn verify(&self, signature: &[u8], payload: &[u8]) -> SignatureResult<bool> {
        signature::verify(signature, payload, &self.public_key_bytes())
    }

    /// Compute a fingerprint for key verification
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.key_pair.public)
    }
}

/// Short hex fingerprint of a public key (first 8 bytes of its SHA-256)
pub fn fingerprint(public: &PublicKey) -> String {
    let hash = Sha256::digest(public.serialize());
    hex::encode(&hash[..8])
}
