//! Models relating to guilds and types that it owns.

mod member;
mod role;

use std::collections::HashMap;

use serde::de::Deserializer;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

pub use self::member::*;
pub use self::role::*;
use crate::internal::prelude::*;
use crate::model::id::{GuildId, RoleId, UserId};

/// The guild record kept in a [`GuildRegistry`]: the part of a guild needed to bind members to it.
///
/// Roles are sent as a list and kept keyed by Id; each role is stamped with the guild's Id.
///
/// [`GuildRegistry`]: crate::cache::GuildRegistry
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct Guild {
    /// The unique Id identifying the guild.
    pub id: GuildId,
    /// The name of the guild.
    pub name: String,
    /// The Id of the [`User`] who owns the guild.
    ///
    /// [`User`]: crate::model::user::User
    pub owner_id: Option<UserId>,
    /// A mapping of the guild's roles.
    pub roles: HashMap<RoleId, Role>,
}

impl Guild {
    /// Creates a guild record with no roles.
    #[must_use]
    pub fn new(id: GuildId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            owner_id: None,
            roles: HashMap::new(),
        }
    }

    /// Adds a role to the guild, stamping it with the guild's Id.
    #[must_use]
    pub fn role(mut self, mut role: Role) -> Self {
        role.guild_id = self.id;
        self.roles.insert(role.id, role);
        self
    }

    /// Returns the `@everyone` role, which shares its Id with the guild.
    #[must_use]
    pub fn everyone_role(&self) -> Option<&Role> {
        self.roles.get(&RoleId::new(self.id.get()))
    }
}

#[derive(Deserialize)]
struct RawGuild {
    id: GuildId,
    name: String,
    #[serde(default)]
    owner_id: Option<UserId>,
    #[serde(default)]
    roles: Vec<Role>,
}

// Manual impl needed to key roles by id and insert guild_id into them
impl<'de> Deserialize<'de> for Guild {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let raw = RawGuild::deserialize(deserializer)?;
        let mut guild = Guild::new(raw.id, raw.name);
        guild.owner_id = raw.owner_id;
        Ok(raw.roles.into_iter().fold(guild, Guild::role))
    }
}

impl Serialize for Guild {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        let mut roles: Vec<&Role> = self.roles.values().collect();
        roles.sort();

        let mut state = serializer.serialize_struct("Guild", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("owner_id", &self.owner_id)?;
        state.serialize_field("roles", &roles)?;
        state.end()
    }
}
