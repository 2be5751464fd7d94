//! Curve primitive seam
//!
//! [`CurvePrimitive`] is the boundary between the signature API and the code
//! that does the elliptic-curve work. It keeps libsignal's calling
//! conventions: signing reports either an error or an optional output buffer,
//! and verification reports a single integer status.
//!
//! Implementations must be reentrant. [`XEdDsa`] holds no state and draws
//! nonces from the operating system RNG, which is safe to use from any
//! thread.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::crypto::buffer::SignalBuffer;
use crate::crypto::curve::{self, PrivateKey, PublicKey, SIGNATURE_LEN};
use crate::crypto::errors::SignalError;
use crate::crypto::xeddsa;

/// Verification status: the signature matches
pub const VERIFY_MATCH: i32 = 1;

/// Verification status: the signature does not match
pub const VERIFY_MISMATCH: i32 = 0;

/// Key decoding, signing and verification over curve25519
pub trait CurvePrimitive: Send + Sync {
    /// Decode a private key from its serialized form
    fn decode_private_point(&self, data: &[u8]) -> Result<PrivateKey, SignalError> {
        curve::decode_private_point(data)
    }

    /// Decode a public key from its serialized form
    fn decode_point(&self, data: &[u8]) -> Result<PublicKey, SignalError> {
        curve::decode_point(data)
    }

    /// Sign `message`.
    ///
    /// `Ok(None)` means the primitive claimed success without writing a
    /// signature. Callers treat that as a broken invariant.
    fn calculate_signature(
        &self,
        key: &PrivateKey,
        message: &[u8],
    ) -> Result<Option<SignalBuffer>, SignalError>;

    /// Verify `signature` over `message`.
    ///
    /// Returns [`VERIFY_MATCH`] on a match, a non-negative value other than
    /// [`VERIFY_MATCH`] on a mismatch, and a negative [`SignalError`] code
    /// when verification could not be attempted.
    fn verify_signature(&self, key: &PublicKey, message: &[u8], signature: &[u8]) -> i32;
}

/// In-process XEdDSA primitive
#[derive(Debug, Default, Clone, Copy)]
pub struct XEdDsa;

impl CurvePrimitive for XEdDsa {
    fn calculate_signature(
        &self,
        key: &PrivateKey,
        message: &[u8],
    ) -> Result<Option<SignalBuffer>, SignalError> {
        let mut random = Zeroizing::new([0u8; 64]);
        OsRng
            .try_fill_bytes(&mut random[..])
            .map_err(|_| SignalError::Unknown)?;

        let signature = xeddsa::sign(key, message, &random);
        Ok(Some(SignalBuffer::from(&signature[..])))
    }

    fn verify_signature(&self, key: &PublicKey, message: &[u8], signature: &[u8]) -> i32 {
        let Ok(signature) = <&[u8; SIGNATURE_LEN]>::try_from(signature) else {
            return SignalError::InvalidArgument.code();
        };

        if xeddsa::verify(key, message, signature) {
            VERIFY_MATCH
        } else {
            VERIFY_MISMATCH
        }
    }
}
