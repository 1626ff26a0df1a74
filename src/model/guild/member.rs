use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Guild, Role};
use crate::model::id::{GuildId, RoleId, UserId};
use crate::model::user::User;
use crate::model::Permissions;

/// A member payload as sent by Discord, without the guild it belongs to.
///
/// This is what appears in the `resolved.members` map and in the invoking `member` field of an
/// interaction. Resolved members never carry their `user`; it is sent separately in
/// `resolved.users` under the same Id.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-member-object).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct PartialMember {
    /// Attached User struct, if sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// The member's nickname, if present.
    #[serde(default)]
    pub nick: Option<String>,
    /// The guild avatar hash
    #[serde(default)]
    pub avatar: Option<String>,
    /// Vector of Ids of [`Role`]s given to the member.
    pub roles: Vec<RoleId>,
    /// Timestamp representing the date when the member joined.
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    /// Timestamp representing the date since the member is boosting the guild.
    #[serde(default)]
    pub premium_since: Option<DateTime<Utc>>,
    /// Indicator that the member hasn't accepted the rules of the guild yet.
    #[serde(default)]
    pub pending: bool,
    /// The total permissions of the member in a channel, including overrides.
    ///
    /// Only sent for members of an interaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    /// The timestamp until which the member's timeout expires.
    #[serde(default)]
    pub communication_disabled_until: Option<DateTime<Utc>>,
}

/// Information about a member of a guild, bound to that guild.
///
/// Members are shared through the [`EntityCache`]: a member obtained from an interaction and the
/// same member obtained from the cache are the same [`Arc`].
///
/// [`EntityCache`]: crate::cache::EntityCache
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Member {
    /// The unique Id of the guild that the member is a part of.
    pub guild_id: GuildId,
    /// The Id of the user this member is.
    pub user_id: UserId,
    /// Attached User struct, shared with the user cache when it is known.
    pub user: Option<Arc<User>>,
    /// The member's nickname, if present.
    pub nick: Option<String>,
    /// The guild avatar hash
    pub avatar: Option<String>,
    /// Vector of Ids of [`Role`]s given to the member, exactly as sent.
    pub roles: Vec<RoleId>,
    /// The [`Role`]s of the member, looked up in the guild. Role Ids the guild doesn't know of are
    /// left out.
    pub resolved_roles: Vec<Role>,
    /// Timestamp representing the date when the member joined.
    pub joined_at: Option<DateTime<Utc>>,
    /// Timestamp representing the date since the member is boosting the guild.
    pub premium_since: Option<DateTime<Utc>>,
    /// Indicator that the member hasn't accepted the rules of the guild yet.
    pub pending: bool,
    /// The total permissions of the member in the interaction's channel, including overrides.
    pub permissions: Option<Permissions>,
    /// The timestamp until which the member's timeout expires.
    pub communication_disabled_until: Option<DateTime<Utc>>,
}

impl Member {
    /// Binds a raw member payload to its guild, resolving its roles against the guild's roles.
    pub(crate) fn from_partial(
        partial: PartialMember,
        user_id: UserId,
        user: Option<Arc<User>>,
        guild: &Guild,
    ) -> Self {
        let resolved_roles = partial
            .roles
            .iter()
            .filter_map(|role_id| {
                let role = guild.roles.get(role_id).cloned();
                if role.is_none() {
                    warn!("Member {user_id} has role {role_id} unknown to guild {}", guild.id);
                }
                role
            })
            .collect();

        Self {
            guild_id: guild.id,
            user_id,
            user,
            nick: partial.nick,
            avatar: partial.avatar,
            roles: partial.roles,
            resolved_roles,
            joined_at: partial.joined_at,
            premium_since: partial.premium_since,
            pending: partial.pending,
            permissions: partial.permissions,
            communication_disabled_until: partial.communication_disabled_until,
        }
    }

    /// Returns the nickname of the member if one is set, otherwise the display name of the user,
    /// if the user is known.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.nick.as_deref().or_else(|| self.user.as_deref().map(User::display_name))
    }

    /// Retrieves the member's highest role, by position, among the roles known to the guild.
    #[must_use]
    pub fn highest_role(&self) -> Option<&Role> {
        self.resolved_roles.iter().max()
    }
}
