use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::id::{GuildId, RoleId};
use crate::model::Permissions;

/// Information about a role within a guild. A role represents a set of permissions, and can be
/// attached to one or multiple users. A role has various miscellaneous configurations, such as
/// being assigned a colour. Roles are unique per guild and do not cross over to other guilds in
/// any way, and can have channel-specific permission overrides in addition to guild-level
/// permissions.
///
/// [Discord docs](https://discord.com/developers/docs/topics/permissions#role-object).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Role {
    /// The Id of the role. Can be used to calculate the role's creation date.
    pub id: RoleId,
    /// The Id of the Guild the Role is in.
    ///
    /// Not sent by Discord; stamped when the role is hydrated as part of an interaction or
    /// registered with a [`Guild`].
    ///
    /// [`Guild`]: super::Guild
    #[serde(default)]
    pub guild_id: GuildId,
    /// The name of the role.
    pub name: String,
    /// The colour of the role.
    #[serde(rename = "color", default)]
    pub colour: u32,
    /// Indicator of whether the role is pinned above lesser roles.
    #[serde(default)]
    pub hoist: bool,
    /// Indicator of whether the role is managed by an integration service.
    #[serde(default)]
    pub managed: bool,
    /// Indicator of whether the role can be mentioned, similar to mentioning a specific member or
    /// `@everyone`.
    #[serde(default)]
    pub mentionable: bool,
    /// A set of permissions that the role has been assigned.
    pub permissions: Permissions,
    /// The role's position in the position list. Roles are considered higher in hierarchy if
    /// their position is higher.
    ///
    /// The `@everyone` role is usually either `-1` or `0`.
    #[serde(default)]
    pub position: i16,
}

impl Ord for Role {
    fn cmp(&self, other: &Role) -> Ordering {
        if self.position == other.position {
            self.id.cmp(&other.id)
        } else {
            self.position.cmp(&other.position)
        }
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Role) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
