//! Core error types for diagram loading and interaction
//!
//! This module defines the error type shared by the document model, the
//! diagram index, the router and the export service.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DiagramError>;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("XML error: {source}")]
    Xml {
        #[from]
        source: roxmltree::Error,
    },

    #[error("Missing attribute `{attribute}` on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    #[error("Invalid number `{value}` in attribute `{attribute}`")]
    InvalidNumber { attribute: String, value: String },

    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    #[error("Unresolved connector {id}: {reason}")]
    UnresolvedConnector { id: String, reason: String },

    #[error("Serialization error: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("Host error: {message}")]
    Host { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new missing attribute error
    pub fn missing_attribute(element: &str, attribute: &str) -> Self {
        Self::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    /// Create a new invalid number error
    pub fn invalid_number(attribute: &str, value: &str) -> Self {
        Self::InvalidNumber {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a new unknown node error
    pub fn unknown_node(id: &str) -> Self {
        Self::UnknownNode { id: id.to_string() }
    }

    /// Create a new unresolved connector error
    pub fn unresolved_connector(id: &str, reason: impl Into<String>) -> Self {
        Self::UnresolvedConnector {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a new config error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new error for a failed call into the embedding host
    pub fn host_error(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }
}
