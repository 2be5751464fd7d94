//! Signal Signature - Core library
//!
//! Curve25519 signing and verification with libsignal key encodings, plus
//! the sender key store contract used by group messaging.

pub mod config;
pub mod crypto;
pub mod store;

pub use config::ServiceConfig;
pub use crypto::{
    sign, verify, IdentityKeyPair, KeyPair, KeyRole, SignalError, SignatureError,
    SignatureResult, SignatureService, Signer,
};
pub use store::{InMemorySenderKeyStore, ProtocolAddress, SenderKeyName, SenderKeyStore};

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to info for this crate and the
/// `signal-sign` binary. Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signal_signature=info,signal_sign=info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
