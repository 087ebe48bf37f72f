//! Fingerprinted settings snapshots.
//!
//! A snapshot captures the resolved entry list of one kind as a
//! schema-versioned artifact with a deterministic fingerprint, so
//! downstream consumers can detect settings drift without diffing entry
//! lists. The fingerprint is the SHA-256 of the RFC 8785 (JCS)
//! canonicalization of the entries, so it is stable across serialization
//! ordering and whitespace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

use strata_model::{EntryKind, SettingEntry};

/// Schema version for settings snapshots.
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier.
pub const SCHEMA_ID: &str = "strata/settings_snapshot@1";

/// Errors building a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("canonicalization failed: {0}")]
    Canonicalize(String),
}

/// A resolved, fingerprinted view of one kind's settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    /// Schema version.
    pub schema_version: u32,

    /// Schema identifier.
    pub schema_id: String,

    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,

    /// The kind the entries belong to.
    pub kind: EntryKind,

    /// Resolved entries, highest precedence first.
    pub entries: Vec<SettingEntry>,

    /// SHA-256 hex of the JCS canonicalization of `entries`.
    pub fingerprint: String,
}

impl SettingsSnapshot {
    /// Build a snapshot of the given resolved entries.
    pub fn new(kind: EntryKind, entries: Vec<SettingEntry>) -> Result<Self, SnapshotError> {
        let fingerprint = Self::fingerprint_of(&entries)?;
        Ok(SettingsSnapshot {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            kind,
            entries,
            fingerprint,
        })
    }

    /// The fingerprint of an entry list: SHA-256 hex over its JCS bytes.
    pub fn fingerprint_of(entries: &[SettingEntry]) -> Result<String, SnapshotError> {
        let jcs_bytes = serde_json_canonicalizer::to_vec(&entries)
            .map_err(|e| SnapshotError::Canonicalize(e.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Serialize to JSON (pretty printed).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to file.
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e))
        })?;
        fs::write(path, json)
    }
}
