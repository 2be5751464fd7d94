//! Cryptographic error types
//!
//! Two layers live here:
//!
//! - [`SignalError`]: the status codes reported by the curve primitive,
//!   numbered the way libsignal numbers them.
//! - [`SignatureError`]: what `sign` / `verify` hand back to callers.
//!
//! A signature that simply does not match is *not* an error; it is
//! `Ok(false)` from `verify`.

use std::fmt;

use thiserror::Error;

/// Status codes reported by the curve primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignalError {
    /// Allocation failed inside the primitive
    #[error("out of memory")]
    NoMemory,

    /// A buffer had the wrong length or an argument was out of range
    #[error("invalid argument")]
    InvalidArgument,

    /// Unspecified failure
    #[error("unknown error")]
    Unknown,

    /// Key bytes do not describe a usable key
    #[error("invalid key")]
    InvalidKey,

    /// Message bytes could not be processed
    #[error("invalid message")]
    InvalidMessage,

    /// Any other negative status
    #[error("error code {0}")]
    Other(i32),
}

impl SignalError {
    /// The numeric status for this error (always negative)
    pub fn code(&self) -> i32 {
        match self {
            SignalError::NoMemory => -12,
            SignalError::InvalidArgument => -22,
            SignalError::Unknown => -1000,
            SignalError::InvalidKey => -1002,
            SignalError::InvalidMessage => -1005,
            SignalError::Other(code) => *code,
        }
    }

    /// Map a numeric status back to an error
    pub fn from_code(code: i32) -> Self {
        match code {
            -12 => SignalError::NoMemory,
            -22 => SignalError::InvalidArgument,
            -1000 => SignalError::Unknown,
            -1002 => SignalError::InvalidKey,
            -1005 => SignalError::InvalidMessage,
            other => SignalError::Other(other),
        }
    }
}

/// Which half of a key pair failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Private,
    Public,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Private => write!(f, "private"),
            KeyRole::Public => write!(f, "public"),
        }
    }
}

/// Errors returned by signing and verification
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Key bytes did not decode to a valid key
    #[error("Failed to decode {role} key: {source}")]
    KeyDecode {
        role: KeyRole,
        #[source]
        source: SignalError,
    },

    /// The signing primitive reported a failure
    #[error("Signing failed: {0}")]
    Sign(SignalError),

    /// The verification primitive reported a failure (not a mismatch)
    #[error("Verification could not be performed: {0}")]
    Verify(SignalError),

    /// The signing primitive reported success without producing a signature
    #[error("Signing reported success but produced no signature")]
    EmptyOutput,

    /// A blocking worker panicked or was cancelled
    #[error("Signature worker failed: {0}")]
    Worker(String),
}

impl SignatureError {
    pub(crate) fn private_key(source: SignalError) -> Self {
        SignatureError::KeyDecode {
            role: KeyRole::Private,
            source,
        }
    }

    pub(crate) fn public_key(source: SignalError) -> Self {
        SignatureError::KeyDecode {
            role: KeyRole::Public,
            source,
        }
    }

    /// Whether repeating the same call could succeed.
    ///
    /// Bad keys and bad signatures fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            SignatureError::Worker(_) => true,
            SignatureError::Sign(e) | SignatureError::Verify(e) => {
                matches!(e, SignalError::NoMemory | SignalError::Unknown)
            }
            SignatureError::KeyDecode { .. } | SignatureError::EmptyOutput => false,
        }
    }
}

impl From<tokio::task::JoinError> for SignatureError {
    fn from(e: tokio::task::JoinError) -> Self {
        SignatureError::Worker(e.to_string())
    }
}

/// Result type for signature operations
pub type SignatureResult<T> = Result<T, SignatureError>;
