//! The REST surface the router needs, and its serenity implementation.
use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::{
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::http::Http;
use serenity::model::application::Command;
use serenity::model::channel::Message;
use serenity::model::id::{ApplicationId, ChannelId, GuildId, InteractionId, MessageId};

use crate::command::{CommandDefinition, RegisteredCommand};

/// Authenticated calls against Discord's application and interaction endpoints.
///
/// Implementations must be shareable across the tasks that dispatch events.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn current_application_id(&self) -> serenity::Result<ApplicationId>;

    /// Replace every global command with `commands`.
    async fn overwrite_global_commands(
        &self,
        application_id: ApplicationId,
        commands: &[CommandDefinition],
    ) -> serenity::Result<Vec<RegisteredCommand>>;

    /// Replace every command registered in `guild_id` with `commands`.
    async fn overwrite_guild_commands(
        &self,
        application_id: ApplicationId,
        guild_id: GuildId,
        commands: &[CommandDefinition],
    ) -> serenity::Result<Vec<RegisteredCommand>>;

    async fn create_interaction_response(
        &self,
        interaction_id: InteractionId,
        token: &str,
        kind: ResponseKind,
        data: Option<MessageData>,
    ) -> serenity::Result<()>;

    async fn get_interaction_response(
        &self,
        application_id: ApplicationId,
        token: &str,
    ) -> serenity::Result<SentMessage>;

    async fn edit_interaction_response(
        &self,
        application_id: ApplicationId,
        token: &str,
        data: MessageData,
    ) -> serenity::Result<SentMessage>;

    async fn create_followup(
        &self,
        application_id: ApplicationId,
        token: &str,
        data: MessageData,
    ) -> serenity::Result<SentMessage>;
}

/// How an interaction is first answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseKind {
    /// Reply with a message right away.
    Message,
    /// Acknowledge now, edit the response in later.
    DeferredMessage,
}

/// Message body shared by responses, edits and follow-ups.
#[derive(Clone, Debug, Default)]
pub struct MessageData {
    pub content: Option<String>,
    pub embeds: Vec<CreateEmbed>,
    pub ephemeral: bool,
}

impl MessageData {
    pub fn new(content: impl Into<String>, embeds: Vec<CreateEmbed>) -> Self {
        Self {
            content: Some(content.into()),
            embeds,
            ephemeral: false,
        }
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    fn into_response_message(self) -> CreateInteractionResponseMessage {
        let mut builder = CreateInteractionResponseMessage::new()
            .embeds(self.embeds)
            .ephemeral(self.ephemeral);
        if let Some(content) = self.content {
            builder = builder.content(content);
        }
        builder
    }

    fn into_edit(self) -> EditInteractionResponse {
        let mut builder = EditInteractionResponse::new().embeds(self.embeds);
        if let Some(content) = self.content {
            builder = builder.content(content);
        }
        builder
    }

    fn into_followup(self) -> CreateInteractionResponseFollowup {
        let mut builder = CreateInteractionResponseFollowup::new()
            .embeds(self.embeds)
            .ephemeral(self.ephemeral);
        if let Some(content) = self.content {
            builder = builder.content(content);
        }
        builder
    }
}

/// The parts of a sent message callers usually need back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub content: String,
}

impl From<Message> for SentMessage {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            channel_id: message.channel_id,
            content: message.content,
        }
    }
}

/// [`PlatformClient`] over serenity's HTTP client.
#[derive(Clone)]
pub struct SerenityClient {
    http: Arc<Http>,
}

impl SerenityClient {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    pub fn from_token(token: &str) -> Self {
        Self::new(Arc::new(Http::new(token)))
    }

    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }
}

fn builders(commands: &[CommandDefinition]) -> Vec<serenity::builder::CreateCommand> {
    commands.iter().map(CommandDefinition::to_builder).collect()
}

#[async_trait]
impl PlatformClient for SerenityClient {
    async fn current_application_id(&self) -> serenity::Result<ApplicationId> {
        let info = self.http.get_current_application_info().await?;
        // Command and interaction-webhook routes read the id off the client.
        self.http.set_application_id(info.id);
        Ok(info.id)
    }

    async fn overwrite_global_commands(
        &self,
        application_id: ApplicationId,
        commands: &[CommandDefinition],
    ) -> serenity::Result<Vec<RegisteredCommand>> {
        self.http.set_application_id(application_id);
        let registered = Command::set_global_commands(&self.http, builders(commands)).await?;
        Ok(registered.into_iter().map(RegisteredCommand::from).collect())
    }

    async fn overwrite_guild_commands(
        &self,
        application_id: ApplicationId,
        guild_id: GuildId,
        commands: &[CommandDefinition],
    ) -> serenity::Result<Vec<RegisteredCommand>> {
        self.http.set_application_id(application_id);
        let registered = guild_id.set_commands(&self.http, builders(commands)).await?;
        Ok(registered.into_iter().map(RegisteredCommand::from).collect())
    }

    async fn create_interaction_response(
        &self,
        interaction_id: InteractionId,
        token: &str,
        kind: ResponseKind,
        data: Option<MessageData>,
    ) -> serenity::Result<()> {
        let message = data.unwrap_or_default().into_response_message();
        let response = match kind {
            ResponseKind::Message => CreateInteractionResponse::Message(message),
            ResponseKind::DeferredMessage => CreateInteractionResponse::Defer(message),
        };
        self.http
            .create_interaction_response(interaction_id, token, &response, Vec::new())
            .await
    }

    async fn get_interaction_response(
        &self,
        application_id: ApplicationId,
        token: &str,
    ) -> serenity::Result<SentMessage> {
        self.http.set_application_id(application_id);
        let message = self.http.get_original_interaction_response(token).await?;
        Ok(message.into())
    }

    async fn edit_interaction_response(
        &self,
        application_id: ApplicationId,
        token: &str,
        data: MessageData,
    ) -> serenity::Result<SentMessage> {
        self.http.set_application_id(application_id);
        let message = self
            .http
            .edit_original_interaction_response(token, &data.into_edit(), Vec::new())
            .await?;
        Ok(message.into())
    }

    async fn create_followup(
        &self,
        application_id: ApplicationId,
        token: &str,
        data: MessageData,
    ) -> serenity::Result<SentMessage> {
        self.http.set_application_id(application_id);
        let message = self
            .http
            .create_followup_message(token, &data.into_followup(), Vec::new())
            .await?;
        Ok(message.into())
    }
}
