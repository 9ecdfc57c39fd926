//! Error types for message resolution

use thiserror::Error;

/// Errors that can occur while loading bundles or formatting templates.
///
/// None of these ever reach the callers of [`crate::MessageResolver`]: the
/// resolver degrades every failure to a well-formed string (the decorated
/// missing-key sentinel, or an empty per-locale result). The variants exist
/// at the loader and formatter seams.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to read the backing resource for a bundle
    #[error("failed to load resource {path}: {source}")]
    ResourceLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A template could not be parsed for positional substitution
    #[error("malformed template: {template:?}")]
    MalformedTemplate { template: String },

    /// A template referenced a positional parameter that was not supplied
    #[error("template references parameter {{{index}}} but only {supplied} parameter(s) were supplied")]
    MissingParameter { index: usize, supplied: usize },
}

/// Result type for resolution operations
pub type I18nResult<T> = Result<T, I18nError>;
