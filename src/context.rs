//! Per-interaction response handle given to command handlers.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serenity::builder::CreateEmbed;
use serenity::model::id::{ApplicationId, InteractionId};

use crate::client::{MessageData, PlatformClient, ResponseKind, SentMessage};
use crate::error::ResponseError;
use crate::event::{CommandInvocation, CommandPayload};

/// Everything a handler needs to answer one command invocation.
///
/// A context is built fresh for every dispatched event and handed to the
/// handler by value. The continuation token it carries expires on Discord's
/// side shortly after delivery, so it should not be stashed for later use.
///
/// Exactly one of [`respond`](Self::respond) or [`defer`](Self::defer) may
/// succeed. Edits and follow-ups come after that.
pub struct Context {
    client: Arc<dyn PlatformClient>,
    application_id: ApplicationId,
    invocation: CommandInvocation,
    acknowledged: AtomicBool,
}

impl Context {
    pub(crate) fn new(
        client: Arc<dyn PlatformClient>,
        application_id: ApplicationId,
        invocation: CommandInvocation,
    ) -> Self {
        Self {
            client,
            application_id,
            invocation,
            acknowledged: AtomicBool::new(false),
        }
    }

    pub fn application_id(&self) -> ApplicationId {
        self.application_id
    }

    pub fn interaction_id(&self) -> InteractionId {
        self.invocation.interaction_id
    }

    pub fn token(&self) -> &str {
        &self.invocation.token
    }

    pub fn invocation(&self) -> &CommandInvocation {
        &self.invocation
    }

    pub fn command(&self) -> &CommandPayload {
        &self.invocation.payload
    }

    /// Whether a respond or defer has already gone through.
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::Acquire)
    }

    /// Fetch the original response message.
    pub async fn response(&self) -> Result<SentMessage, ResponseError> {
        self.client
            .get_interaction_response(self.application_id, self.token())
            .await
            .map_err(ResponseError::platform("fetch response"))
    }

    pub async fn respond(
        &self,
        content: impl Into<String>,
        embeds: Vec<CreateEmbed>,
    ) -> Result<(), ResponseError> {
        self.respond_complex(MessageData::new(content, embeds)).await
    }

    pub async fn respond_complex(&self, data: MessageData) -> Result<(), ResponseError> {
        self.initiate("respond", ResponseKind::Message, Some(data)).await
    }

    /// Acknowledge now and answer later through [`edit_response`](Self::edit_response).
    pub async fn defer(&self) -> Result<(), ResponseError> {
        self.initiate("defer", ResponseKind::DeferredMessage, None).await
    }

    pub async fn edit_response(
        &self,
        content: impl Into<String>,
        embeds: Vec<CreateEmbed>,
    ) -> Result<SentMessage, ResponseError> {
        self.edit_response_complex(MessageData::new(content, embeds))
            .await
    }

    pub async fn edit_response_complex(&self, data: MessageData) -> Result<SentMessage, ResponseError> {
        self.client
            .edit_interaction_response(self.application_id, self.token(), data)
            .await
            .map_err(ResponseError::platform("edit response"))
    }

    pub async fn followup(
        &self,
        content: impl Into<String>,
        embeds: Vec<CreateEmbed>,
    ) -> Result<SentMessage, ResponseError> {
        self.followup_complex(MessageData::new(content, embeds)).await
    }

    pub async fn followup_complex(&self, data: MessageData) -> Result<SentMessage, ResponseError> {
        self.client
            .create_followup(self.application_id, self.token(), data)
            .await
            .map_err(ResponseError::platform("followup"))
    }

    async fn initiate(
        &self,
        operation: &'static str,
        kind: ResponseKind,
        data: Option<MessageData>,
    ) -> Result<(), ResponseError> {
        if self.acknowledged.swap(true, Ordering::AcqRel) {
            return Err(ResponseError::AlreadyAcknowledged { operation });
        }
        let result = self
            .client
            .create_interaction_response(self.interaction_id(), self.token(), kind, data)
            .await;
        if result.is_err() {
            // A failed initial response leaves the interaction open for another try.
            self.acknowledged.store(false, Ordering::Release);
        }
        result.map_err(ResponseError::platform(operation))
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("application_id", &self.application_id)
            .field("invocation", &self.invocation)
            .field("acknowledged", &self.is_acknowledged())
            .finish()
    }
}
