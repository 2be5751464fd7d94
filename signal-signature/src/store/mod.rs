//! Sender key storage
//!
//! Group messaging keeps one serialized sender key record per
//! `(group_id, sender name, device_id)`. The records are opaque here: the
//! store only keeps the bytes, plus optional application data stored
//! alongside them.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// A user's device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolAddress {
    pub name: String,
    pub device_id: i32,
}

impl ProtocolAddress {
    pub fn new(name: impl Into<String>, device_id: i32) -> Self {
        Self {
            name: name.into(),
            device_id,
        }
    }
}

impl fmt::Display for ProtocolAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.device_id)
    }
}

/// Key for a sender key record: a group plus the sending device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderKeyName {
    pub group_id: String,
    pub sender: ProtocolAddress,
}

impl SenderKeyName {
    pub fn new(group_id: impl Into<String>, sender: ProtocolAddress) -> Self {
        Self {
            group_id: group_id.into(),
            sender,
        }
    }
}

impl fmt::Display for SenderKeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.group_id, self.sender)
    }
}

/// A stored sender key with its application data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderKeyRecord {
    /// Serialized sender key record
    pub sender_key: Vec<u8>,
    /// Application data stored alongside the record, if any
    pub user_record: Option<Vec<u8>>,
}

/// Storage for sender key records
///
/// Writes to the same name replace the previous record (last write wins).
pub trait SenderKeyStore: Send + Sync {
    /// Store a serialized record. Returns `true` on success.
    fn store(&self, sender_key: &[u8], name: &SenderKeyName, user_record: Option<&[u8]>) -> bool;

    /// Load a copy of the record for `name`, or `None` if there is none
    fn load(&self, name: &SenderKeyName) -> Option<SenderKeyRecord>;

    /// Called when the owning store context is torn down
    fn destroy(&self) {}
}

/// Map-backed [`SenderKeyStore`]
#[derive(Debug, Default)]
pub struct InMemorySenderKeyStore {
    records: RwLock<HashMap<SenderKeyName, SenderKeyRecord>>,
}

impl InMemorySenderKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SenderKeyStore for InMemorySenderKeyStore {
    fn store(&self, sender_key: &[u8], name: &SenderKeyName, user_record: Option<&[u8]>) -> bool {
        let Ok(mut records) = self.records.write() else {
            tracing::error!("Sender key store lock poisoned, dropping record for {}", name);
            return false;
        };

        records.insert(
            name.clone(),
            SenderKeyRecord {
                sender_key: sender_key.to_vec(),
                user_record: user_record.map(<[u8]>::to_vec),
            },
        );
        tracing::debug!("Stored sender key for {}", name);
        true
    }

    fn load(&self, name: &SenderKeyName) -> Option<SenderKeyRecord> {
        self.records.read().ok()?.get(name).cloned()
    }

    fn destroy(&self) {
        if let Ok(mut records) = self.records.write() {
            records.clear();
        }
    }
}
