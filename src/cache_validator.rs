use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Cached upstream snapshot with integrity validation.
///
/// Snapshot payloads are cached as raw JSON alongside a SHA-256 checksum.
/// A corrupted entry fails validation on read and the caller refetches
/// from the upstream API instead of scoring bad data.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidatedSnapshot {
    /// Environment the payload was fetched from ("stage" or "prod").
    pub environment: String,
    /// When the payload was fetched.
    pub fetched_at: DateTime<Utc>,
    /// The raw company list (JSON string).
    pub data: String,
    /// SHA-256 checksum of the data (hex encoded)
    pub checksum: String,
}

impl ValidatedSnapshot {
    /// Creates a new validated snapshot with computed checksum
    pub fn new(environment: impl Into<String>, data: String) -> Self {
        let checksum = Self::compute_checksum(&data);
        Self {
            environment: environment.into(),
            fetched_at: Utc::now(),
            data,
            checksum,
        }
    }

    fn compute_checksum(data: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Returns true if the checksum matches the data.
    pub fn is_valid(&self) -> bool {
        Self::compute_checksum(&self.data) == self.checksum
    }

    /// Serializes the entry for storage in cache
    pub fn serialize(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Deserializes and validates a cache entry.
    ///
    /// Returns `None` for invalid JSON or a checksum mismatch.
    pub fn deserialize_and_validate(serialized: &str) -> Option<ValidatedSnapshot> {
        let entry: ValidatedSnapshot = serde_json::from_str(serialized).ok()?;

        if entry.is_valid() {
            Some(entry)
        } else {
            tracing::warn!(
                "Snapshot cache validation failed for {}: checksum mismatch (data length {})",
                entry.environment,
                entry.data.len()
            );
            None
        }
    }
}
