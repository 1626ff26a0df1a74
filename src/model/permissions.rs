//! A set of permissions for a role, member or channel, as sent alongside resolved entities and as
//! the application's own permissions in the channel an interaction was invoked from.

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};

use crate::internal::prelude::*;

bitflags::bitflags! {
    /// A set of permissions that can be assigned to [`User`]s and [`Role`]s via
    /// [`PermissionOverwrite`]s, roles globally in a guild, and to channels.
    ///
    /// Only the permissions relevant to responding to interactions are named; unknown bits are
    /// preserved.
    ///
    /// [`User`]: super::user::User
    /// [`Role`]: super::guild::Role
    /// [`PermissionOverwrite`]: https://discord.com/developers/docs/resources/channel#overwrite-object
    #[derive(Copy, Clone, Default, Debug, Eq, Hash, PartialEq)]
    pub struct Permissions: u64 {
        /// Allows for the creation of [`RichInvite`]s.
        ///
        /// [`RichInvite`]: https://discord.com/developers/docs/resources/invite
        const CREATE_INSTANT_INVITE = 1 << 0;
        /// Allows for the kicking of guild members.
        const KICK_MEMBERS = 1 << 1;
        /// Allows the banning of guild members.
        const BAN_MEMBERS = 1 << 2;
        /// Allows all permissions, bypassing channel permission overwrites.
        const ADMINISTRATOR = 1 << 3;
        /// Allows management and editing of guild channels.
        const MANAGE_CHANNELS = 1 << 4;
        /// Allows management and editing of the guild.
        const MANAGE_GUILD = 1 << 5;
        /// Allows viewing a channel.
        const VIEW_CHANNEL = 1 << 10;
        /// Allows sending messages in a guild channel.
        const SEND_MESSAGES = 1 << 11;
        /// Allows the deletion of other users' messages.
        const MANAGE_MESSAGES = 1 << 13;
        /// Links sent by users with this permission will be auto-embedded.
        const EMBED_LINKS = 1 << 14;
        /// Allows uploading of files.
        const ATTACH_FILES = 1 << 15;
        /// Allows the use of `@everyone` and `@here` mentions.
        const MENTION_EVERYONE = 1 << 17;
        /// Allows using custom emojis from other guilds.
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        /// Allows management and editing of roles below their position.
        const MANAGE_ROLES = 1 << 28;
        /// Allows management of webhooks.
        const MANAGE_WEBHOOKS = 1 << 29;
        /// Allows members to use application commands in text channels.
        const USE_APPLICATION_COMMANDS = 1 << 31;
        /// Allows for sending messages in threads.
        const SEND_MESSAGES_IN_THREADS = 1 << 38;
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let str_u64 = String::deserialize(deserializer)?;
        Ok(Permissions::from_bits_retain(str_u64.parse::<u64>().map_err(D::Error::custom)?))
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.collect_str(&self.bits())
    }
}
