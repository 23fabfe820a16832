use thiserror::Error;

/// Errors surfaced by context providers and their collaborators.
///
/// Providers never build these themselves; they only pass along whatever the
/// injected services return.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The current request path could not be determined.
    #[error("path resolution failed: {0}")]
    Path(String),

    /// A symbolic route could not be turned into a URL.
    #[error("url generation failed for route `{route}`: {reason}")]
    Url { route: String, reason: String },

    /// The settings store failed to read a key.
    #[error("settings lookup failed for `{key}`: {reason}")]
    Settings { key: String, reason: String },

    /// A qualified context id named a provider or context nobody registered.
    #[error("unknown context: {0}")]
    UnknownContext(String),

    /// Qualified ids look like `@provider:name`.
    #[error("invalid context id `{0}`")]
    InvalidContextId(String),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ContextError>;
