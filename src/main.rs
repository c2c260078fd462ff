use std::sync::Arc;

use discord_router::handler::Handler;
use discord_router::{BotConfig, CommandDefinition, Context, Router, SerenityClient};
use serenity::Client;
use serenity::model::gateway::GatewayIntents;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BotConfig::from_env()?;

    let mut router = Router::new(Arc::new(SerenityClient::from_token(&config.token))).await?;
    router.add_command(CommandDefinition::new("ping", "sends pong :3"), ping);
    match config.guild_id {
        Some(guild_id) => router.register_guild_commands(guild_id.get()).await?,
        None => router.register_commands().await?,
    }
    tracing::info!(target="main", commands=router.registered_command_ids().len(), "commands registered");

    // Interactions are delivered without any privileged intents.
    let mut client = Client::builder(&config.token, GatewayIntents::empty())
        .event_handler(Handler::new(Arc::new(router)))
        .await?;
    client.start().await?;
    Ok(())
}

async fn ping(ctx: Context) -> anyhow::Result<()> {
    ctx.respond("pong", Vec::new()).await?;
    Ok(())
}
