//! ID generation utilities.

use ulid::Ulid;

/// Prefix marking keys that were generated locally rather than taken from a
/// federated object identifier.
pub const LOCAL_KEY_PREFIX: &str = "local:";

/// ID generator for locally synthesized entities.
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

    /// Generate a new lowercase ULID.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }

    /// Generate a key for an object that arrived without an identifier.
    ///
    /// Encrypted and ephemeral objects may lack an `id`; the key never
    /// collides with a federated URI.
    #[must_use]
    pub fn generate_local_key(&self) -> String {
        format!("{LOCAL_KEY_PREFIX}{}", self.generate())
    }

    /// Whether `key` was produced by [`Self::generate_local_key`].
    #[must_use]
    pub fn is_local_key(key: &str) -> bool {
        key.starts_with(LOCAL_KEY_PREFIX)
    }
}
