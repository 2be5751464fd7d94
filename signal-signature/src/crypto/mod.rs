//! Curve25519 signature module
//!
//! This module signs payloads and verifies detached signatures with
//! curve25519 keys, using XEdDSA so the same key pair serves both signing and
//! X25519 key agreement.
//!
//! ## Components
//!
//! - **errors**: Status codes and the signature error taxonomy
//! - **buffer**: Exact-length, zeroizing byte buffers
//! - **curve**: Key handles, key decoding and X25519 agreement
//! - **xeddsa**: The XEdDSA signing and verification math
//! - **primitive**: The `CurvePrimitive` seam and its in-process implementation
//! - **signature**: `sign` / `verify` over serialized keys
//! - **keys**: Key pairs and the long-term identity key
//! - **service**: Async facade that offloads large payloads
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signal_signature::crypto::{sign, verify, IdentityKeyPair};
//!
//! let identity = IdentityKeyPair::generate();
//! let signature = sign(b"test", &identity.private_key_bytes())?;
//! assert!(verify(&signature, b"test", &identity.public_key_bytes())?);
//! ```

pub mod buffer;
pub mod curve;
pub mod errors;
pub mod keys;
pub mod primitive;
pub mod service;
pub mod signature;
pub mod xeddsa;

// Re-export commonly used types
pub use buffer::SignalBuffer;
pub use curve::{PrivateKey, PublicKey, SIGNATURE_LEN};
pub use errors::{KeyRole, SignalError, SignatureError, SignatureResult};
pub use keys::{IdentityKeyPair, KeyPair};
pub use primitive::{CurvePrimitive, XEdDsa};
pub use service::SignatureService;
pub use signature::{sign, verify, Signer};
