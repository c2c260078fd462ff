//! Command definitions declared locally and the records Discord hands back.
use std::fmt;

use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::Command;
use serenity::model::id::{CommandId, GuildId};

/// A slash command as declared by the bot, before Discord assigns it an id.
#[derive(Clone, Debug)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub options: Vec<CreateCommandOption>,
}

impl CommandDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn add_option(mut self, option: CreateCommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Build the serenity request body for this definition.
    pub fn to_builder(&self) -> CreateCommand {
        CreateCommand::new(self.name.as_str())
            .description(self.description.as_str())
            .set_options(self.options.clone())
    }
}

/// A command as registered on Discord's side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredCommand {
    pub id: CommandId,
    pub name: String,
    pub guild_id: Option<GuildId>,
}

impl RegisteredCommand {
    pub fn new(id: CommandId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            guild_id: None,
        }
    }
}

impl From<Command> for RegisteredCommand {
    fn from(command: Command) -> Self {
        Self {
            id: command.id,
            name: command.name,
            guild_id: command.guild_id,
        }
    }
}

/// Where a command set is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Global,
    Guild(GuildId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("global"),
            Scope::Guild(id) => write!(f, "guild {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_display_names_the_guild() {
        assert_eq!(Scope::Global.to_string(), "global");
        assert_eq!(Scope::Guild(GuildId::new(42)).to_string(), "guild 42");
    }

    #[test]
    fn options_accumulate_in_order() {
        use serenity::model::application::CommandOptionType;
        let def = CommandDefinition::new("echo", "repeats you")
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "text",
                "what to say",
            ))
            .add_option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "loud",
                "shout it",
            ));
        assert_eq!(def.name, "echo");
        assert_eq!(def.options.len(), 2);
    }
}
