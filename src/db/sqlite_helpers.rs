//! SQLite helper utilities for type conversion
//!
//! SQLite has no array type, so ID lists are stored as JSON text.

use serde::{Serialize, de::DeserializeOwned};

use super::StoreError;

// ============================================================================
// Array/Vec Helpers (stored as JSON strings in SQLite)
// ============================================================================

/// Serialize a Vec to a JSON string for SQLite storage
#[inline]
pub fn vec_to_json<T: Serialize>(v: &[T]) -> String {
    serde_json::to_string(v).unwrap_or_else(|_| "[]".to_string())
}

/// Deserialize a JSON array column. Malformed text is a corrupt record.
#[inline]
pub fn json_to_vec<T: DeserializeOwned>(s: &str) -> Result<Vec<T>, StoreError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(s).map_err(|e| StoreError::Corrupt(format!("JSON array '{}': {}", s, e)))
}

// ============================================================================
// Connection URL Helpers
// ============================================================================

/// Whether a database URL points at a private in-memory database
pub fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Strip an optional `sqlite:` / `sqlite://` prefix, leaving a filesystem path
pub fn url_to_path(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}
