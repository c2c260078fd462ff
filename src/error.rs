//! Error types for registration and interaction responses.

use thiserror::Error;

use crate::command::Scope;

/// Errors produced while building a [`Router`](crate::Router) or syncing its commands.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The one-time application lookup failed (bad token, transport error).
    #[error("failed to fetch current application")]
    Initialization(#[source] serenity::Error),

    /// A guild-scoped registration was requested with a zero guild id.
    #[error("invalid guild id {0}")]
    InvalidScope(u64),

    /// Discord rejected the bulk overwrite; the previous mapping is still live.
    #[error("failed to overwrite {scope} commands")]
    Registration {
        scope: Scope,
        #[source]
        source: serenity::Error,
    },
}

/// Errors returned from [`Context`](crate::Context) response operations.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The REST call failed.
    #[error("interaction {operation} failed")]
    Platform {
        operation: &'static str,
        #[source]
        source: serenity::Error,
    },

    /// A respond or defer already succeeded for this interaction.
    #[error("interaction already acknowledged, cannot {operation}")]
    AlreadyAcknowledged { operation: &'static str },
}

impl ResponseError {
    pub(crate) fn platform(operation: &'static str) -> impl FnOnce(serenity::Error) -> Self {
        move |source| Self::Platform { operation, source }
    }
}
