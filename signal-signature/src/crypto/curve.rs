//! Curve25519 key handles
//!
//! Key encodings follow libsignal:
//! - Private keys are 32 raw bytes holding a clamped curve25519 scalar
//! - Public keys are 33 bytes: the type byte [`DJB_TYPE`] followed by the
//!   Montgomery u-coordinate
//!
//! Decoded keys are owned handles. [`PrivateKey`] wipes its scalar when it
//! is dropped, so releasing a key is just letting it go out of scope.

use std::fmt;

use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::Scalar;
use rand::rngs::OsRng;
use rand::RngCore;
use x25519_dalek::StaticSecret;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::errors::SignalError;

/// Type byte prefixed to serialized curve25519 public keys
pub const DJB_TYPE: u8 = 0x05;

/// Length of a raw curve25519 key
pub const DJB_KEY_LEN: usize = 32;

/// Length of a serialized public key (type byte + key)
pub const SERIALIZED_PUBLIC_KEY_LEN: usize = DJB_KEY_LEN + 1;

/// Length of an XEdDSA signature
pub const SIGNATURE_LEN: usize = 64;

/// Curve25519 private key
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; DJB_KEY_LEN],
}

impl PrivateKey {
    /// Generate a new random private key
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; DJB_KEY_LEN]);
        OsRng.fill_bytes(&mut bytes[..]);
        Self::from_scalar_bytes(&bytes)
    }

    fn from_scalar_bytes(bytes: &[u8; DJB_KEY_LEN]) -> Self {
        let mut key = Self { bytes: *bytes };
        key.bytes[0] &= 248;
        key.bytes[31] &= 127;
        key.bytes[31] |= 64;
        key
    }

    /// Derive the matching public key
    pub fn public_key(&self) -> PublicKey {
        let secret = StaticSecret::from(self.bytes);
        PublicKey {
            u: x25519_dalek::PublicKey::from(&secret).to_bytes(),
        }
    }

    /// Serialize to the 32-byte wire form
    pub fn serialize(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.bytes.to_vec())
    }

    pub(crate) fn as_bytes(&self) -> &[u8; DJB_KEY_LEN] {
        &self.bytes
    }

    pub(crate) fn scalar(&self) -> Scalar {
        Scalar::from_bytes_mod_order(self.bytes)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// Curve25519 public key
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey {
    u: [u8; DJB_KEY_LEN],
}

impl PublicKey {
    /// Build a public key from a raw Montgomery u-coordinate.
    ///
    /// The coordinate must be below 2^255 and must lie on curve25519 itself
    /// rather than its twist.
    pub fn from_montgomery(u: [u8; DJB_KEY_LEN]) -> Result<Self, SignalError> {
        if u[31] & 0x80 != 0 {
            return Err(SignalError::InvalidKey);
        }
        if MontgomeryPoint(u).to_edwards(0).is_none() {
            return Err(SignalError::InvalidKey);
        }
        Ok(Self { u })
    }

    /// Serialize to the 33-byte wire form
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SERIALIZED_PUBLIC_KEY_LEN);
        out.push(DJB_TYPE);
        out.extend_from_slice(&self.u);
        out
    }

    /// The raw Montgomery u-coordinate
    pub fn as_montgomery_bytes(&self) -> &[u8; DJB_KEY_LEN] {
        &self.u
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.u))
    }
}

/// Decode a 32-byte private key
pub fn decode_private_point(data: &[u8]) -> Result<PrivateKey, SignalError> {
    let bytes: &[u8; DJB_KEY_LEN] = data.try_into().map_err(|_| SignalError::InvalidKey)?;
    Ok(PrivateKey::from_scalar_bytes(bytes))
}

/// Decode a 33-byte serialized public key
pub fn decode_point(data: &[u8]) -> Result<PublicKey, SignalError> {
    let (&key_type, key) = data.split_first().ok_or(SignalError::InvalidKey)?;
    if key_type != DJB_TYPE {
        return Err(SignalError::InvalidKey);
    }
    let u: [u8; DJB_KEY_LEN] = key.try_into().map_err(|_| SignalError::InvalidKey)?;
    PublicKey::from_montgomery(u)
}

/// X25519 key agreement.
///
/// Fails if the peer key forces an all-zero shared secret.
pub fn calculate_agreement(
    public_key: &PublicKey,
    private_key: &PrivateKey,
) -> Result<Zeroizing<[u8; DJB_KEY_LEN]>, SignalError> {
    let secret = StaticSecret::from(private_key.bytes);
    let shared = secret.diffie_hellman(&x25519_dalek::PublicKey::from(public_key.u));
    if !shared.was_contributory() {
        return Err(SignalError::InvalidKey);
    }
    Ok(Zeroizing::new(shared.to_bytes()))
}
