//! Service configuration

use serde::{Deserialize, Serialize};

/// Configuration for [`SignatureService`](crate::crypto::SignatureService)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Payloads at least this long are signed/verified on the blocking pool
    #[serde(default = "default_offload_threshold")]
    pub offload_threshold: usize,
    /// When false, every operation runs on the calling task
    #[serde(default = "default_true")]
    pub offload_enabled: bool,
}

fn default_offload_threshold() -> usize {
    64 * 1024
}

fn default_true() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            offload_threshold: default_offload_threshold(),
            offload_enabled: true,
        }
    }
}

impl ServiceConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Whether a payload of `len` bytes should leave the calling task
    pub fn should_offload(&self, len: usize) -> bool {
        self.offload_enabled && len >= self.offload_threshold
    }
}
