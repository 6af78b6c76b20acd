// error.rs — Error types for the template formatting subsystem.

use thiserror::Error;

/// Errors that can occur while rendering a notification template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Positional arguments were supplied; only named bindings are supported.
    #[error("positional arguments are not supported by this formatter")]
    PositionalArgs,

    /// A field requested a conversion other than the string conversion.
    #[error("conversion must be 's', got '{conversion}'")]
    UnsupportedConversion { conversion: String },

    /// A dotted attribute path failed whitelist validation.
    #[error("cannot use {path} on {parent}")]
    BlockedAttribute { path: String, parent: String },

    /// A path tried to read a private (underscore-prefixed) attribute.
    #[error("cannot access private attribute {path} on {parent}")]
    PrivateAttribute { path: String, parent: String },

    /// A top-level name in the template has no binding.
    #[error("no binding named '{name}'")]
    MissingBinding { name: String },

    /// An attribute was absent on an object that passed validation.
    #[error("object of kind {kind} has no attribute '{attribute}'")]
    MissingAttribute { kind: String, attribute: String },

    /// The template text itself is malformed (unbalanced braces, bad spec).
    #[error("template syntax error: {message}")]
    Syntax { message: String },
}

impl TemplateError {
    /// Whether this error is a blocked-access outcome.
    ///
    /// Suppression mode downgrades exactly these to literal unresolved text;
    /// every other error kind propagates regardless of suppression.
    pub fn is_blocked(&self) -> bool {
        matches!(
            self,
            TemplateError::BlockedAttribute { .. } | TemplateError::PrivateAttribute { .. }
        )
    }
}
