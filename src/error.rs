//! Error types for trie construction.

use thiserror::Error;

/// Error variants for index construction.
#[derive(Debug, Error)]
pub enum Error {
    /// A key was added that is not strictly greater than the previous key.
    ///
    /// Keys must arrive in ascending byte-lexicographic order; the structure
    /// is left untouched when this is returned.
    #[error("key order violation: key {n_keys} is not strictly greater than its predecessor")]
    OrderViolation {
        /// Number of keys successfully added before the violating call.
        n_keys: usize,
    },
}

/// A specialized Result type for trie operations.
pub type Result<T> = std::result::Result<T, Error>;
