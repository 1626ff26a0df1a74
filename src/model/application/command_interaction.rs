use std::collections::HashMap;
use std::sync::Arc;

use secrecy::SecretString;
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;

use super::{CommandOptionType, CommandType, InteractionType};
use crate::error::PayloadShapeError;
use crate::http::InteractionHttp;
use crate::internal::prelude::*;
use crate::model::channel::{Attachment, Message, PartialChannel};
use crate::model::guild::{Member, PartialMember, Role};
use crate::model::id::{
    ApplicationId,
    AttachmentId,
    ChannelId,
    CommandId,
    GenericId,
    GuildId,
    InteractionId,
    MessageId,
    RoleId,
    TargetId,
    UserId,
};
use crate::model::user::User;
use crate::model::Permissions;
use crate::responder::{InteractionIdentity, InteractionResponder};

/// An interaction payload as delivered by Discord when a user invokes an application command,
/// before its entities are hydrated.
///
/// Pass it to [`Resolver::hydrate`] to obtain a [`CommandInteraction`].
///
/// [`Resolver::hydrate`]: crate::resolver::Resolver::hydrate
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object).
#[derive(Clone, Debug, Deserialize)]
#[non_exhaustive]
pub struct RawCommandInteraction {
    /// Id of the interaction.
    pub id: InteractionId,
    /// Id of the application this interaction is for.
    pub application_id: ApplicationId,
    /// The type of the interaction.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// The data of the interaction which was triggered.
    pub data: RawCommandData,
    /// The guild Id this interaction was sent from, if there is one.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// Channel that the interaction was sent from.
    #[serde(default)]
    pub channel: Option<PartialChannel>,
    /// The channel Id this interaction was sent from.
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
    /// The `member` data for the invoking user, if invoked in a guild.
    #[serde(default)]
    pub member: Option<PartialMember>,
    /// The `user` object for the invoking user, if invoked in a DM.
    #[serde(default)]
    pub user: Option<User>,
    /// A continuation token for responding to the interaction.
    pub token: SecretString,
    /// Always `1`.
    #[serde(default = "default_version")]
    pub version: u8,
    /// Permissions the app or bot has within the channel the interaction was sent from.
    #[serde(default)]
    pub app_permissions: Option<Permissions>,
    /// The selected language of the invoking user.
    #[serde(default)]
    pub locale: Option<String>,
    /// The guild's preferred locale.
    #[serde(default)]
    pub guild_locale: Option<String>,
}

fn default_version() -> u8 {
    1
}

/// The command data payload, before its `resolved` block is hydrated.
#[derive(Clone, Debug, Deserialize)]
#[non_exhaustive]
pub struct RawCommandData {
    /// The Id of the invoked command.
    pub id: CommandId,
    /// The name of the invoked command.
    pub name: String,
    /// The application command type of the triggered application command.
    #[serde(rename = "type")]
    pub kind: CommandType,
    /// The raw resolved entities, keyed by Id.
    #[serde(default)]
    pub resolved: RawResolved,
    #[serde(default)]
    pub options: Vec<CommandDataOption>,
    /// The Id of the guild the command is registered to.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// The targeted user or message, if the triggered application command type is
    /// [`CommandType::User`] or [`CommandType::Message`].
    #[serde(default)]
    pub target_id: Option<TargetId>,
}

/// The `resolved` block exactly as sent: for each kind that is present, a map from the Id string
/// to the raw entity object.
///
/// Kinds that are absent stay `None`; entries are kept as raw JSON so that one malformed entry
/// can't fail the decoding of the whole interaction.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct RawResolved {
    #[serde(default)]
    pub users: Option<JsonMap>,
    #[serde(default)]
    pub members: Option<JsonMap>,
    #[serde(default)]
    pub roles: Option<JsonMap>,
    #[serde(default)]
    pub channels: Option<JsonMap>,
    #[serde(default)]
    pub messages: Option<JsonMap>,
    #[serde(default)]
    pub attachments: Option<JsonMap>,
}

/// An interaction when a user invokes a slash command or a context menu command, with its
/// entities hydrated.
///
/// To respond to it, bind an [`InteractionResponder`] with [`Self::responder`].
///
/// [`InteractionResponder`]: crate::responder::InteractionResponder
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct CommandInteraction {
    /// Id of the interaction.
    pub id: InteractionId,
    /// Id of the application this interaction is for.
    pub application_id: ApplicationId,
    /// The type of the interaction.
    pub kind: InteractionType,
    /// The data of the interaction which was triggered.
    pub data: CommandData,
    /// The guild Id this interaction was sent from, if there is one.
    pub guild_id: Option<GuildId>,
    /// Channel that the interaction was sent from.
    pub channel: Option<PartialChannel>,
    /// The channel Id this interaction was sent from.
    pub channel_id: Option<ChannelId>,
    /// The `member` data for the invoking user.
    ///
    /// **Note**: It is only present if the interaction is triggered in a guild.
    pub member: Option<ResolvedMember>,
    /// The invoking user, shared with the user cache.
    pub user: Arc<User>,
    /// Always `1`.
    pub version: u8,
    /// Permissions the app or bot has within the channel the interaction was sent from.
    pub app_permissions: Option<Permissions>,
    /// The selected language of the invoking user.
    pub locale: Option<String>,
    /// The guild's preferred locale.
    pub guild_locale: Option<String>,
    pub(crate) token: SecretString,
}

impl CommandInteraction {
    /// The identity used to respond to this interaction, carrying its continuation token.
    #[must_use]
    pub fn identity(&self) -> InteractionIdentity {
        InteractionIdentity::from_secret(
            self.id,
            self.application_id,
            self.token.clone(),
            self.channel_id,
            self.guild_id,
        )
    }

    /// Creates the response state machine of this interaction, issuing requests through `http`.
    ///
    /// Each call returns a fresh, unacknowledged responder; keep a single one per interaction.
    #[must_use]
    pub fn responder(&self, http: Arc<dyn InteractionHttp>) -> InteractionResponder {
        InteractionResponder::new(self.identity(), http)
    }
}

/// The command data payload.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-data-structure).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct CommandData {
    /// The Id of the invoked command.
    pub id: CommandId,
    /// The name of the invoked command.
    pub name: String,
    /// The application command type of the triggered application command.
    pub kind: CommandType,
    /// The parameters and the given values. The converted objects from the given options.
    pub resolved: CommandDataResolved,
    pub options: Vec<CommandDataOption>,
    /// The Id of the guild the command is registered to.
    pub guild_id: Option<GuildId>,
    /// The targeted user or message, if the triggered application command type is [`User`] or
    /// [`Message`].
    ///
    /// Its object data can be found in the [`resolved`] field.
    ///
    /// [`resolved`]: Self::resolved
    /// [`User`]: CommandType::User
    /// [`Message`]: CommandType::Message
    pub target_id: Option<TargetId>,
}

impl CommandData {
    /// Returns the options with every Id-valued leaf looked up in [`Self::resolved`].
    ///
    /// A leaf whose Id is missing from the resolved block yields [`ResolvedValue::Unresolved`]
    /// instead of failing the whole tree.
    #[must_use]
    pub fn options(&self) -> Vec<ResolvedOption<'_>> {
        self.resolved.resolve_options(&self.options)
    }

    /// The target of a context menu command, looked up in [`Self::resolved`].
    ///
    /// Returns `None` for slash commands, or if the target is missing from the resolved block.
    #[must_use]
    pub fn target(&self) -> Option<ResolvedTarget<'_>> {
        let target_id = self.target_id?;
        match self.kind {
            CommandType::User => {
                let user_id = target_id.to_user_id();
                let user = self.resolved.user(user_id)?;
                Some(ResolvedTarget::User(user, self.resolved.member(user_id)))
            },
            CommandType::Message => {
                self.resolved.message(target_id.to_message_id()).map(ResolvedTarget::Message)
            },
            _ => None,
        }
    }
}

/// An option of a command, with its value looked up in the resolved block.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct ResolvedOption<'a> {
    pub name: &'a str,
    pub value: ResolvedValue<'a>,
}

/// The value of a [`ResolvedOption`].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum ResolvedValue<'a> {
    /// A sub-command or sub-command group, with its own options resolved.
    Group { kind: CommandOptionType, options: Vec<ResolvedOption<'a>> },
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(&'a str),
    Attachment(&'a Attachment),
    Channel(&'a PartialChannel),
    Role(&'a Role),
    /// A user, along with its member record for guild interactions.
    User(&'a Arc<User>, Option<&'a ResolvedMember>),
    /// The option refers to an entity absent from the resolved block, or has an unknown type.
    Unresolved(Unresolved),
}

/// An option [`CommandData::options`] could not look up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Unresolved {
    Attachment(AttachmentId),
    Channel(ChannelId),
    Mentionable(GenericId),
    Role(RoleId),
    User(UserId),
    /// An option of a type this library doesn't know.
    Unknown(u8),
}

/// The target of a context menu command.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum ResolvedTarget<'a> {
    User(&'a Arc<User>, Option<&'a ResolvedMember>),
    Message(&'a Message),
}

/// The hydrated entities of the `resolved` block of an interaction.
///
/// Each map is `None` exactly when its kind was absent from the payload. Users and guild-bound
/// members are the same [`Arc`]s the [`EntityCache`] holds.
///
/// [`EntityCache`]: crate::cache::EntityCache
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-resolved-data-structure).
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct CommandDataResolved {
    /// The resolved users.
    pub users: Option<HashMap<UserId, Arc<User>>>,
    /// The resolved members.
    pub members: Option<HashMap<UserId, ResolvedMember>>,
    /// The resolved roles.
    pub roles: Option<HashMap<RoleId, Role>>,
    /// The resolved partial channels.
    pub channels: Option<HashMap<ChannelId, PartialChannel>>,
    /// The resolved messages.
    pub messages: Option<HashMap<MessageId, Message>>,
    /// The resolved attachments.
    pub attachments: Option<HashMap<AttachmentId, Attachment>>,
    /// The entries that could not be decoded and were left out of the maps above.
    pub skipped: Vec<PayloadShapeError>,
}

impl CommandDataResolved {
    #[must_use]
    pub fn user(&self, user_id: UserId) -> Option<&Arc<User>> {
        self.users.as_ref()?.get(&user_id)
    }

    #[must_use]
    pub fn member(&self, user_id: UserId) -> Option<&ResolvedMember> {
        self.members.as_ref()?.get(&user_id)
    }

    #[must_use]
    pub fn role(&self, role_id: RoleId) -> Option<&Role> {
        self.roles.as_ref()?.get(&role_id)
    }

    #[must_use]
    pub fn channel(&self, channel_id: ChannelId) -> Option<&PartialChannel> {
        self.channels.as_ref()?.get(&channel_id)
    }

    #[must_use]
    pub fn message(&self, message_id: MessageId) -> Option<&Message> {
        self.messages.as_ref()?.get(&message_id)
    }

    #[must_use]
    pub fn attachment(&self, attachment_id: AttachmentId) -> Option<&Attachment> {
        self.attachments.as_ref()?.get(&attachment_id)
    }

    /// The Ids of the members that could not be bound to their guild, either because the
    /// interaction has no guild or because the guild is missing from the [`GuildRegistry`].
    ///
    /// [`GuildRegistry`]: crate::cache::GuildRegistry
    pub fn guildless_members(&self) -> impl Iterator<Item = UserId> + '_ {
        self.members
            .iter()
            .flatten()
            .filter(|(_, member)| member.is_guildless())
            .map(|(id, _)| *id)
    }

    /// Whether every entry of the raw block was hydrated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    fn resolve_options<'a>(&'a self, options: &'a [CommandDataOption]) -> Vec<ResolvedOption<'a>> {
        options
            .iter()
            .map(|option| ResolvedOption {
                name: &option.name,
                value: self.resolve_value(&option.value),
            })
            .collect()
    }

    fn resolve_value<'a>(&'a self, value: &'a CommandDataOptionValue) -> ResolvedValue<'a> {
        let user = move |id: UserId| {
            self.user(id).map(|user| ResolvedValue::User(user, self.member(id)))
        };
        let unresolved = ResolvedValue::Unresolved;

        match value {
            CommandDataOptionValue::Group {
                kind,
                options,
            } => ResolvedValue::Group {
                kind: *kind,
                options: self.resolve_options(options),
            },
            CommandDataOptionValue::Boolean(b) => ResolvedValue::Boolean(*b),
            CommandDataOptionValue::Integer(i) => ResolvedValue::Integer(*i),
            CommandDataOptionValue::Number(n) => ResolvedValue::Number(*n),
            CommandDataOptionValue::String(s) => ResolvedValue::String(s),
            CommandDataOptionValue::Attachment(id) => self
                .attachment(*id)
                .map_or(unresolved(Unresolved::Attachment(*id)), ResolvedValue::Attachment),
            CommandDataOptionValue::Channel(id) => self
                .channel(*id)
                .map_or(unresolved(Unresolved::Channel(*id)), ResolvedValue::Channel),
            CommandDataOptionValue::Role(id) => {
                self.role(*id).map_or(unresolved(Unresolved::Role(*id)), ResolvedValue::Role)
            },
            CommandDataOptionValue::User(id) => {
                user(*id).unwrap_or(unresolved(Unresolved::User(*id)))
            },
            // Mentionables are looked up as users first, then as roles.
            CommandDataOptionValue::Mentionable(id) => user(id.to_user_id())
                .or_else(|| self.role(id.to_role_id()).map(ResolvedValue::Role))
                .unwrap_or(unresolved(Unresolved::Mentionable(*id))),
            CommandDataOptionValue::Unknown(kind) => unresolved(Unresolved::Unknown(*kind)),
        }
    }
}

/// A member of a resolved block or the invoking member of an interaction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ResolvedMember {
    /// The member is bound to its guild and shared with the member cache.
    Guild(Arc<Member>),
    /// The guild of the member is unknown, so only the raw payload is available: roles are Ids
    /// only and the member is not cached. The embedded user, if the payload sent one, is kept.
    Guildless(PartialMember),
}

impl ResolvedMember {
    /// Returns the guild-bound member, if the member could be bound to its guild.
    #[must_use]
    pub fn as_member(&self) -> Option<&Arc<Member>> {
        match self {
            Self::Guild(member) => Some(member),
            Self::Guildless(_) => None,
        }
    }

    #[must_use]
    pub fn is_guildless(&self) -> bool {
        matches!(self, Self::Guildless(_))
    }

    /// The member's nickname, if present.
    #[must_use]
    pub fn nick(&self) -> Option<&str> {
        match self {
            Self::Guild(member) => member.nick.as_deref(),
            Self::Guildless(member) => member.nick.as_deref(),
        }
    }

    /// The Ids of the member's roles, as sent.
    #[must_use]
    pub fn role_ids(&self) -> &[RoleId] {
        match self {
            Self::Guild(member) => &member.roles,
            Self::Guildless(member) => &member.roles,
        }
    }
}

/// A named option of a command invocation.
///
/// Options form a tree: sub-commands and sub-command groups nest further options, every other
/// option is a leaf carrying a value. Ids carried by leaves are looked up with
/// [`CommandData::options`].
///
/// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-interaction-data-option-structure).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct CommandDataOption {
    /// The name of the parameter.
    pub name: String,
    /// The given value.
    pub value: CommandDataOptionValue,
}

impl CommandDataOption {
    #[must_use]
    pub fn new(name: impl Into<String>, value: CommandDataOptionValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    #[must_use]
    pub fn kind(&self) -> CommandOptionType {
        self.value.kind()
    }
}

/// A node of the option tree.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum CommandDataOptionValue {
    /// A sub-command or a sub-command group, nesting the options given to it.
    Group { kind: CommandOptionType, options: Vec<CommandDataOption> },
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Attachment(AttachmentId),
    Channel(ChannelId),
    Mentionable(GenericId),
    Role(RoleId),
    User(UserId),
    /// A leaf of a type this library doesn't know. Its value is not kept.
    Unknown(u8),
}

impl CommandDataOptionValue {
    #[must_use]
    pub fn kind(&self) -> CommandOptionType {
        match self {
            Self::Group {
                kind, ..
            } => *kind,
            Self::Boolean(_) => CommandOptionType::Boolean,
            Self::Integer(_) => CommandOptionType::Integer,
            Self::Number(_) => CommandOptionType::Number,
            Self::String(_) => CommandOptionType::String,
            Self::Attachment(_) => CommandOptionType::Attachment,
            Self::Channel(_) => CommandOptionType::Channel,
            Self::Mentionable(_) => CommandOptionType::Mentionable,
            Self::Role(_) => CommandOptionType::Role,
            Self::User(_) => CommandOptionType::User,
            Self::Unknown(kind) => CommandOptionType::Unknown(*kind),
        }
    }

    /// The options nested in a group, or `None` for a leaf.
    #[must_use]
    pub fn options(&self) -> Option<&[CommandDataOption]> {
        match self {
            Self::Group {
                options, ..
            } => Some(options),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawCommandDataOption {
    name: String,
    #[serde(rename = "type")]
    kind: CommandOptionType,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    options: Option<Vec<CommandDataOption>>,
}

impl RawCommandDataOption {
    fn leaf<T: DeserializeOwned>(&mut self) -> StdResult<T, String> {
        let value = self.value.take().ok_or_else(|| format!("option `{}` has no value", self.name))?;
        serde_json::from_value(value).map_err(|e| format!("option `{}`: {e}", self.name))
    }

    fn into_option(mut self) -> StdResult<CommandDataOption, String> {
        let value = match self.kind {
            // Sub-commands without parameters are sent without an `options` key.
            kind if kind.is_group() => CommandDataOptionValue::Group {
                kind,
                options: self.options.take().unwrap_or_default(),
            },
            CommandOptionType::Boolean => CommandDataOptionValue::Boolean(self.leaf()?),
            CommandOptionType::Integer => CommandDataOptionValue::Integer(self.leaf()?),
            CommandOptionType::Number => CommandDataOptionValue::Number(self.leaf()?),
            CommandOptionType::String => CommandDataOptionValue::String(self.leaf()?),
            CommandOptionType::Attachment => CommandDataOptionValue::Attachment(self.leaf()?),
            CommandOptionType::Channel => CommandDataOptionValue::Channel(self.leaf()?),
            CommandOptionType::Mentionable => CommandDataOptionValue::Mentionable(self.leaf()?),
            CommandOptionType::Role => CommandDataOptionValue::Role(self.leaf()?),
            CommandOptionType::User => CommandDataOptionValue::User(self.leaf()?),
            other => CommandDataOptionValue::Unknown(other.into()),
        };

        Ok(CommandDataOption::new(self.name, value))
    }
}

impl<'de> Deserialize<'de> for CommandDataOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        RawCommandDataOption::deserialize(deserializer)?.into_option().map_err(D::Error::custom)
    }
}
