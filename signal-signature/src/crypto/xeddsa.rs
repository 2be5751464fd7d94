//! XEdDSA over curve25519
//!
//! Signs with a Montgomery (X25519) private key and produces a signature that
//! any Ed25519 verifier accepts once the Montgomery public key is mapped onto
//! the Edwards curve.
//!
//! ## Signing
//!
//! 1. A = a·B on the Edwards curve, where a is the clamped private scalar
//! 2. r = SHA-512(0xFE || 0xFF×31 || a || M || Z) mod ℓ, Z being 64 random bytes
//! 3. R = r·B
//! 4. h = SHA-512(R || A || M) mod ℓ
//! 5. S = h·a + r
//! 6. Signature = R || S, with the sign bit of A stored in the top bit of S
//!
//! ## Verifying
//!
//! The Edwards public key is rebuilt from the Montgomery u-coordinate and the
//! sign bit carried in the signature, the bit is cleared, and the result is
//! checked as a plain Ed25519 signature.

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::Scalar;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::crypto::curve::{PrivateKey, PublicKey, SIGNATURE_LEN};

/// Domain separator for the nonce hash
const NONCE_PREFIX: [u8; 32] = {
    let mut prefix = [0xFFu8; 32];
    prefix[0] = 0xFE;
    prefix
};

/// Produce an XEdDSA signature over `message`
pub fn sign(private_key: &PrivateKey, message: &[u8], random: &[u8; 64]) -> [u8; SIGNATURE_LEN] {
    let mut a = private_key.scalar();
    let ed_public = EdwardsPoint::mul_base(&a).compress();
    let sign_bit = ed_public.as_bytes()[31] & 0x80;

    let mut r = reduce(
        Sha512::new()
            .chain_update(NONCE_PREFIX)
            .chain_update(private_key.as_bytes())
            .chain_update(message)
            .chain_update(random),
    );
    let big_r = EdwardsPoint::mul_base(&r).compress();

    let h = reduce(
        Sha512::new()
            .chain_update(big_r.as_bytes())
            .chain_update(ed_public.as_bytes())
            .chain_update(message),
    );
    let s = h * a + r;
    a.zeroize();
    r.zeroize();

    let mut signature = [0u8; SIGNATURE_LEN];
    signature[..32].copy_from_slice(big_r.as_bytes());
    signature[32..].copy_from_slice(s.as_bytes());
    signature[63] &= 0x7F;
    signature[63] |= sign_bit;
    signature
}

/// Check an XEdDSA signature. Returns `false` for any mismatch.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &[u8; SIGNATURE_LEN]) -> bool {
    let sign_bit = signature[63] >> 7;
    let mut ed_signature = *signature;
    ed_signature[63] &= 0x7F;

    let Some(ed_public) = MontgomeryPoint(*public_key.as_montgomery_bytes()).to_edwards(sign_bit)
    else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(ed_public.compress().as_bytes()) else {
        return false;
    };

    verifying_key
        .verify(message, &Signature::from_bytes(&ed_signature))
        .is_ok()
}

fn reduce(hasher: Sha512) -> Scalar {
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());
    let scalar = Scalar::from_bytes_mod_order_wide(&wide);
    wide.zeroize();
    scalar
}
