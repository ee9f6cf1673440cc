//! ID generation and validation utilities.

use ulid::Ulid;

use crate::error::{AppError, AppResult};

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs are:
    /// - Lexicographically sortable
    /// - Monotonically increasing within the same millisecond
    /// - Shorter than UUIDs when represented as strings
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}

/// Check that `id` is a syntactically valid report identifier.
///
/// Malformed ids are rejected before any store lookup happens, so the
/// caller can distinguish a bad reference (400) from a missing one (404).
pub fn validate_id(id: &str) -> AppResult<()> {
    Ulid::from_string(&id.to_uppercase())
        .map(|_| ())
        .map_err(|_| AppError::InvalidId(id.to_string()))
}
