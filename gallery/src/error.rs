//! Error types for gallery construction and rendering.
//!
//! Every fallible operation in the crate returns [`GalleryResult`]. Errors carry an
//! [`ErrorContext`] describing which operation failed and on what input.

use std::fmt;

/// Result type for gallery operations
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Structured context for gallery errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "build_gallery", "load_config")
    pub operation: Option<String>,
    /// The input involved (e.g., "veto", "info", "layers")
    pub entity: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the input involved.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for gallery operations
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// Caller-supplied data broke a precondition (length mismatch, empty masks, ...).
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// Not enough candidate centers for the requested grid.
    #[error("Sampling error: {message} {context}")]
    SamplingError {
        message: String,
        context: ErrorContext,
    },

    /// The page could not be assembled.
    #[error("Render error: {message} {context}")]
    RenderError {
        message: String,
        context: ErrorContext,
    },

    /// Reading or writing a local file failed.
    #[error("I/O error: {message} {context}")]
    IoError {
        message: String,
        context: ErrorContext,
    },
}

impl GalleryError {
    /// Create a validation error with context.
    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ValidationError {
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a configuration error with context.
    pub fn configuration_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context,
        }
    }

    /// Create a sampling error with context.
    pub fn sampling_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::SamplingError {
            message: message.into(),
            context,
        }
    }

    /// Create a render error with context.
    pub fn render_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::RenderError {
            message: message.into(),
            context,
        }
    }

    /// Create an I/O error with context.
    pub fn io_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::IoError {
            message: message.into(),
            context,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::SamplingError { context, .. }
            | Self::RenderError { context, .. }
            | Self::IoError { context, .. } => context,
        }
    }

    /// Add or replace the operation recorded in the context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        let op = operation.into();
        match &mut self {
            Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::SamplingError { context, .. }
            | Self::RenderError { context, .. }
            | Self::IoError { context, .. } => context.operation = Some(op),
        }
        self
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::render_with_context(
            err.to_string(),
            ErrorContext::new("serialize").with_entity("json"),
        )
    }
}

impl From<toml::de::Error> for GalleryError {
    fn from(err: toml::de::Error) -> Self {
        GalleryError::configuration_with_context(
            err.to_string(),
            ErrorContext::new("parse_config").with_entity("toml"),
        )
    }
}
