//! SignatureService - async signing API
//!
//! Signing and verification are CPU-bound and finish quickly, so small
//! payloads run directly on the calling task. Payloads at or above the
//! configured threshold move to tokio's blocking pool so a burst of large
//! documents does not stall the async workers.
//!
//! ## Example
//!
//! ```rust,ignore
//! use signal_signature::{ServiceConfig, SignatureService};
//!
//! let service = SignatureService::new(ServiceConfig::default());
//! let signature = service.sign(payload.clone(), private_key).await?;
//! assert!(service.verify(signature, payload, public_key).await?);
//! ```

use std::sync::Arc;

use tracing::debug;
use zeroize::Zeroizing;

use crate::config::ServiceConfig;
use crate::crypto::errors::SignatureResult;
use crate::crypto::primitive::{CurvePrimitive, XEdDsa};
use crate::crypto::signature::Signer;

/// High-level signing service
///
/// Cheap to clone; clones share the same signer.
#[derive(Debug)]
pub struct SignatureService<P = XEdDsa> {
    signer: Arc<Signer<P>>,
    config: ServiceConfig,
}

impl<P> Clone for SignatureService<P> {
    fn clone(&self) -> Self {
        Self {
            signer: Arc::clone(&self.signer),
            config: self.config.clone(),
        }
    }
}

impl SignatureService<XEdDsa> {
    /// Create a service backed by the in-process XEdDSA primitive
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_primitive(XEdDsa, config)
    }
}

impl Default for SignatureService<XEdDsa> {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl<P: CurvePrimitive + 'static> SignatureService<P> {
    /// Create a service backed by a custom primitive
    pub fn with_primitive(primitive: P, config: ServiceConfig) -> Self {
        Self {
            signer: Arc::new(Signer::new(primitive)),
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Sign `payload` with a serialized private key
    pub async fn sign(&self, payload: Vec<u8>, private_key: Vec<u8>) -> SignatureResult<Vec<u8>> {
        let private_key = Zeroizing::new(private_key);

        if !self.config.should_offload(payload.len()) {
            return self.signer.sign(&payload, &private_key);
        }

        debug!(payload_len = payload.len(), "offloading signature to blocking pool");
        let signer = Arc::clone(&self.signer);
        tokio::task::spawn_blocking(move || signer.sign(&payload, &private_key)).await?
    }

    /// Verify a detached signature with a serialized public key
    pub async fn verify(
        &self,
        signature: Vec<u8>,
        payload: Vec<u8>,
        public_key: Vec<u8>,
    ) -> SignatureResult<bool> {
        if !self.config.should_offload(payload.len()) {
            return self.signer.verify(&signature, &payload, &public_key);
        }

        debug!(payload_len = payload.len(), "offloading verification to blocking pool");
        let signer = Arc::clone(&self.signer);
        tokio::task::spawn_blocking(move || signer.verify(&signature, &payload, &public_key))
            .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::errors::{SignalError, SignatureError};
    use crate::crypto::keys::KeyPair;

    fn offload_everything() -> ServiceConfig {
        ServiceConfig {
            offload_threshold: 0,
            offload_enabled: true,
        }
    }

    #[tokio::test]
    async fn test_inline_sign_and_verify() {
        let service = SignatureService::default();
        let pair = KeyPair::generate();

        let signature = service
            .sign(b"inline".to_vec(), pair.private_key_bytes().to_vec())
            .await
            .unwrap();

        assert!(service
            .verify(signature.clone(), b"inline".to_vec(), pair.public_key_bytes())
            .await
            .unwrap());
        assert!(!service
            .verify(signature, b"inlined".to_vec(), pair.public_key_bytes())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_offloaded_sign_and_verify() {
        let service = SignatureService::new(offload_everything());
        let pair = KeyPair::generate();
        let payload = vec![0xAB; 4096];

        let signature = service
            .sign(payload.clone(), pair.private_key_bytes().to_vec())
            .await
            .unwrap();
        assert!(service
            .verify(signature, payload, pair.public_key_bytes())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_offloaded_errors_are_preserved() {
        let service = SignatureService::new(offload_everything());
        let pair = KeyPair::generate();

        let result = service
            .verify(Vec::new(), b"payload".to_vec(), pair.public_key_bytes())
            .await;
        assert!(matches!(
            result,
            Err(SignatureError::Verify(SignalError::InvalidArgument))
        ));

        let result = service.sign(b"payload".to_vec(), Vec::new()).await;
        assert!(matches!(result, Err(SignatureError::KeyDecode { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests() {
        let service = SignatureService::new(offload_everything());
        let pair = KeyPair::generate();
        let private = pair.private_key_bytes().to_vec();
        let public = pair.public_key_bytes();

        let mut handles = Vec::new();
        for i in 0..16u8 {
            let service = service.clone();
            let private = private.clone();
            let public = public.clone();
            handles.push(tokio::spawn(async move {
                let payload = vec![i; 64];
                let signature = service.sign(payload.clone(), private).await?;
                service.verify(signature, payload, public).await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }
    }
}
