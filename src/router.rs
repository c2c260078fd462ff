//! Slash-command registration and interaction dispatch.
//!
//! Commands are declared locally, then pushed to Discord in one bulk
//! overwrite. Discord answers with an id per command; the router matches
//! those back to the declared handlers by name and publishes the result as
//! an immutable [`HandlerTable`] snapshot. Dispatch only ever reads the
//! current snapshot, so registering again while events are in flight is
//! safe: each event sees either the old table or the new one.
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwap;
use futures::future::{BoxFuture, FutureExt};
use serenity::model::id::{ApplicationId, CommandId, GuildId};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::client::PlatformClient;
use crate::command::{CommandDefinition, RegisteredCommand, Scope};
use crate::context::Context;
use crate::error::RouterError;
use crate::event::InteractionEvent;

/// Logic run when a registered command is invoked.
///
/// Implemented for every `Fn(Context) -> impl Future<Output = anyhow::Result<()>>`,
/// so a plain `async fn ping(ctx: Context) -> anyhow::Result<()>` is a handler.
pub trait CommandHandler: Send + Sync + 'static {
    fn handle(&self, ctx: Context) -> BoxFuture<'static, anyhow::Result<()>>;
}

impl<F, Fut> CommandHandler for F
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    fn handle(&self, ctx: Context) -> BoxFuture<'static, anyhow::Result<()>> {
        self(ctx).boxed()
    }
}

type SharedHandler = Arc<dyn CommandHandler>;

struct DeclaredCommand {
    definition: CommandDefinition,
    handler: SharedHandler,
}

/// Discord command id -> handler, as of the last successful registration.
#[derive(Default)]
struct HandlerTable {
    handlers: HashMap<CommandId, SharedHandler>,
}

impl HandlerTable {
    /// Bind each declared handler to the id Discord returned for its name.
    ///
    /// Command sets are small (tens of entries), so a nested scan is fine.
    fn build(declared: &[DeclaredCommand], registered: &[RegisteredCommand]) -> Self {
        let mut handlers = HashMap::with_capacity(registered.len());
        for command in declared {
            let name = command.definition.name.as_str();
            match registered.iter().find(|r| r.name == name) {
                Some(r) => {
                    // Earliest declaration keeps a duplicated name.
                    handlers
                        .entry(r.id)
                        .or_insert_with(|| Arc::clone(&command.handler));
                }
                None => {
                    warn!(target="router.register", command=%name, "declared command missing from Discord's response");
                }
            }
        }
        Self { handlers }
    }

    fn get(&self, id: CommandId) -> Option<&SharedHandler> {
        self.handlers.get(&id)
    }
}

pub struct Router {
    commands: Vec<DeclaredCommand>,
    handlers: ArcSwap<HandlerTable>,
    /// Held from the bulk overwrite until the new table is published.
    registration: Mutex<()>,
    application_id: ApplicationId,
    client: Arc<dyn PlatformClient>,
}

impl Router {
    /// Look up the bot's application id and build an empty router.
    pub async fn new(client: Arc<dyn PlatformClient>) -> Result<Self, RouterError> {
        let application_id = client
            .current_application_id()
            .await
            .map_err(RouterError::Initialization)?;
        debug!(target="router.init", app_id=%application_id, "router ready");
        Ok(Self {
            commands: Vec::new(),
            handlers: ArcSwap::from_pointee(HandlerTable::default()),
            registration: Mutex::new(()),
            application_id,
            client,
        })
    }

    pub fn application_id(&self) -> ApplicationId {
        self.application_id
    }

    /// Declare a command. Nothing is sent to Discord until a `register_*` call.
    ///
    /// Names are not checked for uniqueness here; Discord rejects duplicates
    /// when the set is registered.
    pub fn add_command<H>(&mut self, definition: CommandDefinition, handler: H) -> &mut Self
    where
        H: CommandHandler,
    {
        self.commands.push(DeclaredCommand {
            definition,
            handler: Arc::new(handler),
        });
        self
    }

    pub fn declared_commands(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.iter().map(|c| &c.definition)
    }

    /// Ids currently routed to a handler, in ascending order.
    pub fn registered_command_ids(&self) -> Vec<CommandId> {
        let mut ids: Vec<CommandId> = self.handlers.load().handlers.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn is_registered(&self, id: CommandId) -> bool {
        self.handlers.load().get(id).is_some()
    }

    /// Overwrite the bot's global commands with the declared set.
    pub async fn register_commands(&self) -> Result<(), RouterError> {
        self.reconcile(Scope::Global).await
    }

    /// Overwrite one guild's commands with the declared set.
    ///
    /// A zero guild id is rejected before any request is made.
    pub async fn register_guild_commands(&self, guild_id: u64) -> Result<(), RouterError> {
        if guild_id == 0 {
            return Err(RouterError::InvalidScope(guild_id));
        }
        self.reconcile(Scope::Guild(GuildId::new(guild_id))).await
    }

    #[instrument(level = "debug", skip(self), fields(declared = self.commands.len()))]
    async fn reconcile(&self, scope: Scope) -> Result<(), RouterError> {
        let definitions: Vec<CommandDefinition> =
            self.commands.iter().map(|c| c.definition.clone()).collect();
        // Overlapping registrations publish in the order Discord applied them.
        let _registering = self.registration.lock().await;
        let result = match scope {
            Scope::Global => {
                self.client
                    .overwrite_global_commands(self.application_id, &definitions)
                    .await
            }
            Scope::Guild(guild_id) => {
                self.client
                    .overwrite_guild_commands(self.application_id, guild_id, &definitions)
                    .await
            }
        };
        let registered = result.map_err(|source| RouterError::Registration { scope, source })?;
        let table = HandlerTable::build(&self.commands, &registered);
        debug!(target="router.register", scope=%scope, returned=registered.len(), routed=table.handlers.len(), "commands registered");
        self.handlers.store(Arc::new(table));
        Ok(())
    }

    /// Route one inbound interaction to its handler.
    ///
    /// Non-command interactions and commands this router does not know are
    /// ignored and return `Ok(())`. Otherwise the handler's own result is
    /// returned as is. Safe to call from many tasks at once.
    pub async fn dispatch(&self, event: impl Into<InteractionEvent>) -> anyhow::Result<()> {
        let invocation = match event.into() {
            InteractionEvent::Command(invocation) => invocation,
            InteractionEvent::Other(kind) => {
                debug!(target="router.dispatch", kind=?kind, "ignoring non-command interaction");
                return Ok(());
            }
        };
        let command_id = invocation.command_id();
        let Some(handler) = self.handlers.load().get(command_id).cloned() else {
            debug!(target="router.dispatch", command_id=%command_id, name=%invocation.payload.name, "no handler for command");
            return Ok(());
        };
        debug!(target="router.dispatch", command_id=%command_id, name=%invocation.payload.name, "dispatching");
        let ctx = Context::new(Arc::clone(&self.client), self.application_id, invocation);
        handler.handle(ctx).await
    }
}
