//! Inbound interaction events, narrowed to what the router needs.
//!
//! Discord delivers several interaction shapes over the same gateway event.
//! Only command invocations are routed; every other kind is carried as
//! [`InteractionEvent::Other`] so dispatch can skip it without treating it as
//! an error.
use serenity::model::application::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, Interaction, InteractionType,
};
use serenity::model::id::{
    AttachmentId, ChannelId, CommandId, GenericId, GuildId, InteractionId, RoleId, UserId,
};

#[derive(Clone, Debug)]
pub enum InteractionEvent {
    Command(CommandInvocation),
    Other(InteractionType),
}

impl InteractionEvent {
    pub fn kind(&self) -> InteractionType {
        match self {
            InteractionEvent::Command(_) => InteractionType::Command,
            InteractionEvent::Other(kind) => *kind,
        }
    }
}

impl From<Interaction> for InteractionEvent {
    fn from(interaction: Interaction) -> Self {
        match interaction {
            Interaction::Command(command) => InteractionEvent::Command(command.into()),
            other => InteractionEvent::Other(other.kind()),
        }
    }
}

impl From<CommandInvocation> for InteractionEvent {
    fn from(invocation: CommandInvocation) -> Self {
        InteractionEvent::Command(invocation)
    }
}

/// A single use of a slash command.
#[derive(Clone, Debug)]
pub struct CommandInvocation {
    pub interaction_id: InteractionId,
    /// Continuation token; required for every response to this interaction.
    pub token: String,
    pub guild_id: Option<GuildId>,
    pub channel_id: Option<ChannelId>,
    pub user_id: Option<UserId>,
    pub payload: CommandPayload,
}

impl CommandInvocation {
    pub fn new(
        interaction_id: InteractionId,
        token: impl Into<String>,
        command_id: CommandId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            interaction_id,
            token: token.into(),
            guild_id: None,
            channel_id: None,
            user_id: None,
            payload: CommandPayload {
                command_id,
                name: name.into(),
                options: Vec::new(),
            },
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.payload.options.push(CommandArgument {
            name: name.into(),
            value,
        });
        self
    }

    pub fn command_id(&self) -> CommandId {
        self.payload.command_id
    }
}

impl From<CommandInteraction> for CommandInvocation {
    fn from(interaction: CommandInteraction) -> Self {
        Self {
            interaction_id: interaction.id,
            guild_id: interaction.guild_id,
            channel_id: Some(interaction.channel_id),
            user_id: Some(interaction.user.id),
            payload: CommandPayload {
                command_id: interaction.data.id,
                name: interaction.data.name,
                options: interaction
                    .data
                    .options
                    .into_iter()
                    .map(CommandArgument::from)
                    .collect(),
            },
            token: interaction.token,
        }
    }
}

/// The invoked command and the arguments the user supplied.
#[derive(Clone, Debug)]
pub struct CommandPayload {
    pub command_id: CommandId,
    pub name: String,
    pub options: Vec<CommandArgument>,
}

impl CommandPayload {
    pub fn option(&self, name: &str) -> Option<&ArgumentValue> {
        self.options
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    pub fn str_option(&self, name: &str) -> Option<&str> {
        match self.option(name)? {
            ArgumentValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn integer_option(&self, name: &str) -> Option<i64> {
        match self.option(name)? {
            ArgumentValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn number_option(&self, name: &str) -> Option<f64> {
        match self.option(name)? {
            ArgumentValue::Number(n) => Some(*n),
            ArgumentValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn bool_option(&self, name: &str) -> Option<bool> {
        match self.option(name)? {
            ArgumentValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn user_option(&self, name: &str) -> Option<UserId> {
        match self.option(name)? {
            ArgumentValue::User(id) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommandArgument {
    pub name: String,
    pub value: ArgumentValue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    User(UserId),
    Channel(ChannelId),
    Role(RoleId),
    Mentionable(GenericId),
    Attachment(AttachmentId),
    SubCommand(Vec<CommandArgument>),
    SubCommandGroup(Vec<CommandArgument>),
    /// Autocomplete fragments and option types this crate does not know.
    Unsupported,
}

impl From<CommandDataOption> for CommandArgument {
    fn from(option: CommandDataOption) -> Self {
        let value = match option.value {
            CommandDataOptionValue::String(s) => ArgumentValue::String(s),
            CommandDataOptionValue::Integer(n) => ArgumentValue::Integer(n),
            CommandDataOptionValue::Number(n) => ArgumentValue::Number(n),
            CommandDataOptionValue::Boolean(b) => ArgumentValue::Boolean(b),
            CommandDataOptionValue::User(id) => ArgumentValue::User(id),
            CommandDataOptionValue::Channel(id) => ArgumentValue::Channel(id),
            CommandDataOptionValue::Role(id) => ArgumentValue::Role(id),
            CommandDataOptionValue::Mentionable(id) => ArgumentValue::Mentionable(id),
            CommandDataOptionValue::Attachment(id) => ArgumentValue::Attachment(id),
            CommandDataOptionValue::SubCommand(nested) => {
                ArgumentValue::SubCommand(nested.into_iter().map(Self::from).collect())
            }
            CommandDataOptionValue::SubCommandGroup(nested) => {
                ArgumentValue::SubCommandGroup(nested.into_iter().map(Self::from).collect())
            }
            _ => ArgumentValue::Unsupported,
        };
        Self {
            name: option.name,
            value,
        }
    }
}
