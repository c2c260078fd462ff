//! Gateway event handler that feeds interactions into a [`Router`].
use std::sync::Arc;

use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::application::Interaction;
use serenity::model::gateway::Ready;

use crate::Router;

/// The serenity [`EventHandler`] for the gateway client; not a command handler.
///
/// Command logic is registered on the router as a [`CommandHandler`](crate::CommandHandler).
pub struct Handler {
    pub router: Arc<Router>,
}

impl Handler {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl EventHandler for Handler {
    // serenity runs each event in its own task, so dispatches overlap freely.
    async fn interaction_create(&self, _ctx: Context, interaction: Interaction) {
        let kind = interaction.kind();
        if let Err(e) = self.router.dispatch(interaction).await {
            tracing::error!(target="handler.interaction", kind=?kind, error=?e, "command handler failed");
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(target="handler.ready", user=%ready.user.name, app_id=%self.router.application_id(), "connected and ready");
    }
}
