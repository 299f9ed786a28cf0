//! Ports and Adapters Infrastructure
//!
//! The accounting engine talks to durable storage only through port traits.
//! This module holds the pieces every port shares: the error type adapters
//! report through and the marker trait ports extend.
//!
//! ```text
//!            ┌──────────────────────────┐
//!            │   PolicyAccounting       │
//!            └────────────┬─────────────┘
//!                         ▼
//!            ┌──────────────────────────┐
//!            │   AccountingStore port   │
//!            └──────┬─────────────┬─────┘
//!                   ▼             ▼
//!          ┌──────────────┐ ┌──────────────┐
//!          │  PostgreSQL  │ │  In-memory   │
//!          └──────────────┘ └──────────────┘
//! ```

use std::fmt;
use thiserror::Error;

/// Failure reported by a storage adapter
///
/// All storage adapters translate their native failures into this type so
/// the engine handles in-memory and database backends identically.
#[derive(Debug, Error)]
pub enum PortError {
    /// No record with the given id exists
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The record was rejected as malformed
    #[error("Invalid record: {message}")]
    Validation { message: String },

    /// The write collides with a stored record
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The backend could not be reached
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Any other backend failure
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        PortError::NotFound { entity, id: id.to_string() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict { message: message.into() }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection { message: message.into(), source: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal { message: message.into(), source: None }
    }

    /// Attaches the underlying cause to a `Connection` or `Internal` error.
    /// Other variants are returned unchanged.
    pub fn with_source(self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        match self {
            PortError::Connection { message, .. } => PortError::Connection {
                message,
                source: Some(Box::new(cause)),
            },
            PortError::Internal { message, .. } => PortError::Internal {
                message,
                source: Some(Box::new(cause)),
            },
            other => other,
        }
    }

    /// A retry may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared behind `Arc` across async tasks, so they must be
/// thread-safe.
pub trait DomainPort: Send + Sync + 'static {}
