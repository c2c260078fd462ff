//! Scripted in-memory Discord used by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use discord_router::{
    CommandDefinition, CommandHandler, CommandInvocation, Context, MessageData, PlatformClient,
    RegisteredCommand, ResponseKind, Router, SentMessage,
};
use serenity::model::id::{
    ApplicationId, ChannelId, CommandId, GuildId, InteractionId, MessageId,
};

pub const APP_ID: u64 = 900;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    OverwriteGlobal(Vec<String>),
    OverwriteGuild(u64, Vec<String>),
    Respond {
        interaction: u64,
        token: String,
        kind: ResponseKind,
        content: Option<String>,
    },
    Fetch { token: String },
    Edit { token: String, content: Option<String> },
    Followup { token: String, content: Option<String> },
}

/// What the next bulk overwrite should return.
pub enum Registration {
    Returns(Vec<RegisteredCommand>),
    /// Discord takes `Duration` to reply.
    Delayed(Duration, Vec<RegisteredCommand>),
    Fails,
}

pub struct MockPlatform {
    pub fail_application: bool,
    pub fail_responses: AtomicBool,
    registrations: Mutex<VecDeque<Registration>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicU64,
}

impl MockPlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::with_application(true))
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self::with_application(false))
    }

    fn with_application(reachable: bool) -> Self {
        Self {
            fail_application: !reachable,
            fail_responses: AtomicBool::new(false),
            registrations: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1000),
        }
    }

    /// Queue the outcome of the next bulk overwrite. With nothing queued,
    /// every submitted command comes back under a fresh id.
    pub fn script(&self, registration: Registration) {
        self.registrations.lock().unwrap().push_back(registration);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fresh_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn overwrite(
        &self,
        commands: &[CommandDefinition],
    ) -> serenity::Result<Vec<RegisteredCommand>> {
        let next = self.registrations.lock().unwrap().pop_front();
        match next {
            Some(Registration::Returns(registered)) => Ok(registered),
            Some(Registration::Delayed(delay, registered)) => {
                tokio::time::sleep(delay).await;
                Ok(registered)
            }
            Some(Registration::Fails) => Err(serenity::Error::Other("bulk overwrite rejected")),
            None => Ok(commands
                .iter()
                .map(|c| RegisteredCommand::new(CommandId::new(self.fresh_id()), c.name.clone()))
                .collect()),
        }
    }

    fn message(&self, content: Option<String>) -> serenity::Result<SentMessage> {
        if self.fail_responses.load(Ordering::SeqCst) {
            return Err(serenity::Error::Other("interaction endpoint unavailable"));
        }
        Ok(SentMessage {
            id: MessageId::new(self.fresh_id()),
            channel_id: ChannelId::new(1),
            content: content.unwrap_or_default(),
        })
    }
}

fn names(commands: &[CommandDefinition]) -> Vec<String> {
    commands.iter().map(|c| c.name.clone()).collect()
}

#[async_trait]
impl PlatformClient for MockPlatform {
    async fn current_application_id(&self) -> serenity::Result<ApplicationId> {
        if self.fail_application {
            return Err(serenity::Error::Other("401: Unauthorized"));
        }
        Ok(ApplicationId::new(APP_ID))
    }

    async fn overwrite_global_commands(
        &self,
        _application_id: ApplicationId,
        commands: &[CommandDefinition],
    ) -> serenity::Result<Vec<RegisteredCommand>> {
        self.record(Call::OverwriteGlobal(names(commands)));
        self.overwrite(commands).await
    }

    async fn overwrite_guild_commands(
        &self,
        _application_id: ApplicationId,
        guild_id: GuildId,
        commands: &[CommandDefinition],
    ) -> serenity::Result<Vec<RegisteredCommand>> {
        self.record(Call::OverwriteGuild(guild_id.get(), names(commands)));
        self.overwrite(commands).await
    }

    async fn create_interaction_response(
        &self,
        interaction_id: InteractionId,
        token: &str,
        kind: ResponseKind,
        data: Option<MessageData>,
    ) -> serenity::Result<()> {
        self.record(Call::Respond {
            interaction: interaction_id.get(),
            token: token.to_string(),
            kind,
            content: data.and_then(|d| d.content),
        });
        self.message(None).map(|_| ())
    }

    async fn get_interaction_response(
        &self,
        application_id: ApplicationId,
        token: &str,
    ) -> serenity::Result<SentMessage> {
        assert_eq!(application_id.get(), APP_ID);
        self.record(Call::Fetch {
            token: token.to_string(),
        });
        self.message(Some("original".into()))
    }

    async fn edit_interaction_response(
        &self,
        application_id: ApplicationId,
        token: &str,
        data: MessageData,
    ) -> serenity::Result<SentMessage> {
        assert_eq!(application_id.get(), APP_ID);
        self.record(Call::Edit {
            token: token.to_string(),
            content: data.content.clone(),
        });
        self.message(data.content)
    }

    async fn create_followup(
        &self,
        application_id: ApplicationId,
        token: &str,
        data: MessageData,
    ) -> serenity::Result<SentMessage> {
        assert_eq!(application_id.get(), APP_ID);
        self.record(Call::Followup {
            token: token.to_string(),
            content: data.content.clone(),
        });
        self.message(data.content)
    }
}

pub async fn router(platform: &Arc<MockPlatform>) -> Router {
    Router::new(platform.clone()).await.expect("router builds")
}

pub fn registered(id: u64, name: &str) -> RegisteredCommand {
    RegisteredCommand::new(CommandId::new(id), name)
}

pub fn invoke(command_id: u64, name: &str) -> CommandInvocation {
    CommandInvocation::new(InteractionId::new(77), "token-77", CommandId::new(command_id), name)
}

pub type Log = Arc<Mutex<Vec<&'static str>>>;

/// A handler that appends `label` to `log` each time it runs.
pub fn recorder(log: &Log, label: &'static str) -> impl CommandHandler + use<> {
    let log = Arc::clone(log);
    move |_ctx: Context| {
        let log = Arc::clone(&log);
        async move {
            log.lock().unwrap().push(label);
            Ok::<_, anyhow::Error>(())
        }
    }
}

pub fn def(name: &str) -> CommandDefinition {
    CommandDefinition::new(name, format!("{name} command"))
}
