//! Error types for the cache layer.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while reducing actions into the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The returned resource has no usable id.
    #[error("resource in schema {schema} has no id")]
    MissingId { schema: String },

    /// The returned resource is not a JSON object.
    #[error("resource in schema {schema} is not an object")]
    NotAnObject { schema: String },
}
