//! Detached signatures
//!
//! [`sign`] and [`verify`] take serialized keys, decode them, run the curve
//! primitive and drop the decoded key before returning. A decoded
//! [`PrivateKey`](crate::crypto::curve::PrivateKey) zeroizes itself on drop,
//! so key material never outlives the call, whichever way it exits.
//!
//! Verification has three outcomes and they stay separate:
//! - `Err(KeyDecode)` / `Err(Verify)`: the check could not be performed
//! - `Ok(false)`: the signature does not match
//! - `Ok(true)`: the signature matches

use tracing::{debug, warn};

use crate::crypto::curve::SIGNATURE_LEN;
use crate::crypto::errors::{SignalError, SignatureError, SignatureResult};
use crate::crypto::primitive::{CurvePrimitive, XEdDsa, VERIFY_MATCH};

/// Signs and verifies with a given curve primitive
#[derive(Debug, Default, Clone)]
pub struct Signer<P = XEdDsa> {
    primitive: P,
}

impl<P: CurvePrimitive> Signer<P> {
    pub fn new(primitive: P) -> Self {
        Self { primitive }
    }

    /// Sign `payload` with a serialized private key
    pub fn sign(&self, payload: &[u8], private_key: &[u8]) -> SignatureResult<Vec<u8>> {
        let key = self
            .primitive
            .decode_private_point(private_key)
            .map_err(SignatureError::private_key)?;

        let output = self.primitive.calculate_signature(&key, payload);
        drop(key);

        let buffer = match output {
            Ok(Some(buffer)) if !buffer.is_empty() => buffer,
            Ok(_) => {
                warn!(payload_len = payload.len(), "signing produced no output");
                return Err(SignatureError::EmptyOutput);
            }
            Err(e) => {
                debug!(code = e.code(), "signing failed");
                return Err(SignatureError::Sign(e));
            }
        };

        if buffer.len() != SIGNATURE_LEN {
            warn!(len = buffer.len(), "signing produced a signature of unexpected length");
            return Err(SignatureError::Sign(SignalError::Unknown));
        }

        debug!(payload_len = payload.len(), "signed payload");
        Ok(buffer.to_vec())
    }

    /// Verify a detached signature with a serialized public key
    pub fn verify(
        &self,
        signature: &[u8],
        payload: &[u8],
        public_key: &[u8],
    ) -> SignatureResult<bool> {
        let key = self
            .primitive
            .decode_point(public_key)
            .map_err(SignatureError::public_key)?;

        let status = self.primitive.verify_signature(&key, payload, signature);
        drop(key);

        match status {
            status if status < 0 => {
                debug!(code = status, signature_len = signature.len(), "verification error");
                Err(SignatureError::Verify(SignalError::from_code(status)))
            }
            VERIFY_MATCH => Ok(true),
            _ => {
                debug!(payload_len = payload.len(), "signature does not match");
                Ok(false)
            }
        }
    }
}

/// Sign `payload` with a serialized private key using XEdDSA
pub fn sign(payload: &[u8], private_key: &[u8]) -> SignatureResult<Vec<u8>> {
    Signer::<XEdDsa>::default().sign(payload, private_key)
}

/// Verify an XEdDSA signature with a serialized public key
pub fn verify(signature: &[u8], payload: &[u8], public_key: &[u8]) -> SignatureResult<bool> {
    Signer::<XEdDsa>::default().verify(signature, payload, public_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::buffer::SignalBuffer;
    use crate::crypto::curve::{PrivateKey, PublicKey};
    use crate::crypto::errors::KeyRole;
    use crate::crypto::keys::IdentityKeyPair;
    use crate::crypto::KeyPair;

    use quickcheck_macros::quickcheck;

    /// Primitive with canned results
    struct Canned {
        signature: Result<Option<Vec<u8>>, SignalError>,
        status: i32,
    }

    impl Canned {
        fn status(status: i32) -> Self {
            Self {
                signature: Ok(Some(vec![0u8; SIGNATURE_LEN])),
                status,
            }
        }
    }

    impl CurvePrimitive for Canned {
        fn calculate_signature(
            &self,
            _key: &PrivateKey,
            _message: &[u8],
        ) -> Result<Option<SignalBuffer>, SignalError> {
            self.signature
                .clone()
                .map(|out| out.map(SignalBuffer::from))
        }

        fn verify_signature(&self, _key: &PublicKey, _message: &[u8], _signature: &[u8]) -> i32 {
            self.status
        }
    }

    #[test]
    fn test_signature_scenario() {
        let identity = IdentityKeyPair::generate();
        let payload = "test".as_bytes();

        let signature = sign(payload, &identity.private_key_bytes()).unwrap();
        assert_eq!(signature.len(), SIGNATURE_LEN);

        let public = identity.public_key_bytes();
        assert!(verify(&signature, payload, &public).unwrap());
        assert!(!verify(&signature, "test2".as_bytes(), &public).unwrap());

        let stranger = KeyPair::generate();
        assert!(!verify(&signature, payload, &stranger.public_key_bytes()).unwrap());
    }

    #[test]
    fn test_private_key_in_place_of_public_key() {
        let identity = IdentityKeyPair::generate();
        let signature = sign(b"test", &identity.private_key_bytes()).unwrap();

        let result = verify(&signature, b"test", &identity.private_key_bytes());
        assert!(matches!(
            result,
            Err(SignatureError::KeyDecode {
                role: KeyRole::Public,
                source: SignalError::InvalidKey,
            })
        ));
    }

    #[test]
    fn test_sign_with_malformed_private_key() {
        for key in [&[][..], &[1u8; 16][..], &[1u8; 33][..]] {
            let result = sign(b"payload", key);
            assert!(matches!(
                result,
                Err(SignatureError::KeyDecode {
                    role: KeyRole::Private,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_verify_empty_signature_is_invalid_argument() {
        let pair = KeyPair::generate();
        let result = verify(&[], b"payload", &pair.public_key_bytes());
        assert!(matches!(
            result,
            Err(SignatureError::Verify(SignalError::InvalidArgument))
        ));
    }

    #[test]
    fn test_verify_does_not_read_past_slice() {
        let pair = KeyPair::generate();
        let mut payload = Vec::with_capacity(256);
        payload.extend_from_slice(b"exact");
        let signature = sign(&payload, &pair.private_key_bytes()).unwrap();

        let mut padded = payload.clone();
        padded.push(0);
        assert!(verify(&signature, &payload, &pair.public_key_bytes()).unwrap());
        assert!(!verify(&signature, &padded, &pair.public_key_bytes()).unwrap());
    }

    #[test]
    fn test_status_mapping_is_pinned() {
        let pair = KeyPair::generate();
        let public = pair.public_key_bytes();
        let sig = [0u8; SIGNATURE_LEN];

        assert!(Signer::new(Canned::status(1)).verify(&sig, b"m", &public).unwrap());
        assert!(!Signer::new(Canned::status(0)).verify(&sig, b"m", &public).unwrap());
        assert!(!Signer::new(Canned::status(2)).verify(&sig, b"m", &public).unwrap());
        assert!(matches!(
            Signer::new(Canned::status(-22)).verify(&sig, b"m", &public),
            Err(SignatureError::Verify(SignalError::InvalidArgument))
        ));
        assert!(matches!(
            Signer::new(Canned::status(-1000)).verify(&sig, b"m", &public),
            Err(SignatureError::Verify(SignalError::Unknown))
        ));
    }

    #[test]
    fn test_decode_error_wins_over_status() {
        let signer = Signer::new(Canned::status(1));
        let result = signer.verify(&[0u8; SIGNATURE_LEN], b"m", &[0x05, 1, 2]);
        assert!(matches!(result, Err(SignatureError::KeyDecode { .. })));
    }

    #[test]
    fn test_empty_output_is_an_error() {
        let pair = KeyPair::generate();
        let private = pair.private_key_bytes();

        let none = Signer::new(Canned {
            signature: Ok(None),
            status: 0,
        });
        assert!(matches!(
            none.sign(b"m", &private),
            Err(SignatureError::EmptyOutput)
        ));

        let empty = Signer::new(Canned {
            signature: Ok(Some(Vec::new())),
            status: 0,
        });
        assert!(matches!(
            empty.sign(b"m", &private),
            Err(SignatureError::EmptyOutput)
        ));
    }

    #[test]
    fn test_sign_error_is_surfaced() {
        let pair = KeyPair::generate();
        let failing = Signer::new(Canned {
            signature: Err(SignalError::NoMemory),
            status: 0,
        });
        let err = failing.sign(b"m", &pair.private_key_bytes()).unwrap_err();
        assert!(matches!(err, SignatureError::Sign(SignalError::NoMemory)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_short_output_is_rejected() {
        let pair = KeyPair::generate();
        let short = Signer::new(Canned {
            signature: Ok(Some(vec![1u8; 10])),
            status: 0,
        });
        assert!(matches!(
            short.sign(b"m", &pair.private_key_bytes()),
            Err(SignatureError::Sign(_))
        ));
    }

    #[test]
    fn test_concurrent_sign_and_verify() {
        let pair = KeyPair::generate();
        let private = pair.private_key_bytes().to_vec();
        let public = pair.public_key_bytes();

        std::thread::scope(|scope| {
            for i in 0..8u8 {
                let private = &private;
                let public = &public;
                scope.spawn(move || {
                    let payload = vec![i; 100 + i as usize];
                    let signature = sign(&payload, private).unwrap();
                    assert!(verify(&signature, &payload, public).unwrap());
                });
            }
        });
    }

    #[quickcheck]
    fn prop_sign_then_verify(payload: Vec<u8>) -> bool {
        let pair = KeyPair::generate();
        let signature = sign(&payload, &pair.private_key_bytes()).unwrap();
        verify(&signature, &payload, &pair.public_key_bytes()).unwrap()
    }

    #[quickcheck]
    fn prop_other_payload_does_not_verify(payload: Vec<u8>, other: Vec<u8>) -> bool {
        if payload == other {
            return true;
        }
        let pair = KeyPair::generate();
        let signature = sign(&payload, &pair.private_key_bytes()).unwrap();
        matches!(
            verify(&signature, &other, &pair.public_key_bytes()),
            Ok(false)
        )
    }
}
