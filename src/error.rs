//! Unified error types for hosts-console.
//!
//! This module provides a comprehensive error hierarchy for the library,
//! with rich context for debugging and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hosts-console operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConsoleError {
    /// Errors while decoding navigation parameters
    #[error("Failed to parse query parameters: {context}")]
    Params {
        context: String,
        #[source]
        source: ParamsErrorKind,
    },

    /// Errors while handling configuration profiles
    #[error("Configuration profile error: {context}")]
    Profile {
        context: String,
        #[source]
        source: ProfileErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parameter error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParamsErrorKind {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid field value for '{param}': {message}")]
    InvalidValue { param: String, message: String },
}

/// Specific profile error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProfileErrorKind {
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for hosts-console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ConsoleError {
    /// Create a params error with context
    pub fn params(context: impl Into<String>, source: ParamsErrorKind) -> Self {
        Self::Params {
            context: context.into(),
            source,
        }
    }

    /// Create a params error for a malformed URL
    pub fn invalid_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::params(
            format!("at {url}"),
            ParamsErrorKind::InvalidUrl(url.clone()),
        )
    }

    /// Create a params error for an invalid parameter value
    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::params(
            "invalid parameter value",
            ParamsErrorKind::InvalidValue {
                param: param.into(),
                message: message.into(),
            },
        )
    }

    /// Create a profile error with context
    pub fn profile(context: impl Into<String>, source: ProfileErrorKind) -> Self {
        Self::Profile {
            context: context.into(),
            source,
        }
    }

    /// Create a profile error for an unsupported file extension
    pub fn invalid_file_type(extension: impl Into<String>) -> Self {
        Self::profile(
            "unsupported file extension",
            ProfileErrorKind::InvalidFileType(extension.into()),
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// This trait provides methods to add context information to errors,
/// creating a chain of context that helps trace the source of problems.
///
/// # Example
///
/// ```ignore
/// use hosts_console::error::ErrorContext;
///
/// fn load_preferences(path: &Path) -> Result<ColumnPreferences> {
///     let content = std::fs::read_to_string(path)
///         .context("reading preferences file")?;
///
///     parse_preferences(&content)
///         .with_context(|| format!("parsing preferences from {}", path.display()))?
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context,
    /// creating a chain that shows the path through the code.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    ///
    /// The closure is only called if the result is an error,
    /// which is more efficient when the context string is expensive to compute.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ConsoleError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ConsoleError, new_ctx: &str) -> ConsoleError {
    match err {
        ConsoleError::Params {
            context: existing,
            source,
        } => ConsoleError::Params {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ConsoleError::Profile {
            context: existing,
            source,
        } => ConsoleError::Profile {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ConsoleError::Io {
            path,
            message,
            source,
        } => ConsoleError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ConsoleError::Config(msg) => ConsoleError::Config(chain_context(new_ctx, &msg)),
        ConsoleError::Validation(msg) => ConsoleError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| ConsoleError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| ConsoleError::Validation(f().into()))
    }
}
