//! Slash-command routing for serenity bots.
//!
//! Declare commands on a [`Router`], register them globally or in one guild,
//! then forward gateway interactions to [`Router::dispatch`]. Each invocation
//! reaches its handler with a [`Context`] for answering it.
pub mod client;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod handler;
pub mod router;

pub use client::{MessageData, PlatformClient, ResponseKind, SentMessage, SerenityClient};
pub use command::{CommandDefinition, RegisteredCommand, Scope};
pub use config::BotConfig;
pub use context::Context;
pub use error::{ResponseError, RouterError};
pub use event::{ArgumentValue, CommandInvocation, CommandPayload, InteractionEvent};
pub use router::{CommandHandler, Router};
