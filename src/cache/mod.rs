//! The entity stores the [`Resolver`] reads from and writes into while hydrating an interaction.
//!
//! Two services are involved, both passed explicitly to the [`Resolver`]:
//!
//! - an [`EntityCache`], holding the process-wide users and guild-bound members. Hydration writes
//!   every user and member back into it, and the hydrated interaction hands out the very [`Arc`]s
//!   the cache holds.
//! - a [`GuildRegistry`], from which the guild of an interaction is looked up so its members can be
//!   bound to it.
//!
//! With the `cache` feature, [`Cache`] implements both on top of concurrent maps. Writes follow a
//! last-write-wins policy: an upsert replaces the shared record rather than creating a second one,
//! and upserting a value equal to the current record keeps the current [`Arc`].
//!
//! [`Resolver`]: crate::resolver::Resolver

use std::sync::Arc;

#[cfg(feature = "cache")]
use dashmap::mapref::entry::Entry;
#[cfg(feature = "cache")]
use dashmap::DashMap;
#[cfg(feature = "cache")]
use tracing::debug;

use crate::model::guild::{Guild, Member};
use crate::model::id::{GuildId, UserId};
use crate::model::user::User;

mod settings;

pub use self::settings::Settings;

/// The process-wide store of users and guild-bound members.
///
/// Upserts are the single write primitive: they return the shared record for the entity after the
/// write, which callers keep instead of the value they passed in.
pub trait EntityCache: Send + Sync {
    /// Inserts or updates a user, returning the shared record.
    fn upsert_user(&self, user: User) -> Arc<User>;

    /// Inserts or updates a guild-bound member, returning the shared record.
    fn upsert_member(&self, member: Member) -> Arc<Member>;

    /// Retrieves a user from the cache.
    fn user(&self, user_id: UserId) -> Option<Arc<User>>;

    /// Retrieves a member of a guild from the cache.
    fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<Arc<Member>>;
}

/// Looks up the guilds members are bound to.
pub trait GuildRegistry: Send + Sync {
    /// Retrieves a guild, or `None` if it isn't known.
    fn guild(&self, guild_id: GuildId) -> Option<Arc<Guild>>;
}

/// A store that keeps nothing and knows no guild.
///
/// Every upsert hands back a fresh [`Arc`], and every member hydrated with it is guild-less.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl EntityCache for NoCache {
    fn upsert_user(&self, user: User) -> Arc<User> {
        Arc::new(user)
    }

    fn upsert_member(&self, member: Member) -> Arc<Member> {
        Arc::new(member)
    }

    fn user(&self, _: UserId) -> Option<Arc<User>> {
        None
    }

    fn member(&self, _: GuildId, _: UserId) -> Option<Arc<Member>> {
        None
    }
}

impl GuildRegistry for NoCache {
    fn guild(&self, _: GuildId) -> Option<Arc<Guild>> {
        None
    }
}

/// An in-process cache of users, members and guilds.
///
/// The cache is safe to share between tasks behind an [`Arc`]; reads never block each other.
///
/// # Examples
///
/// ```rust
/// use interaction_responder::cache::{Cache, GuildRegistry};
/// use interaction_responder::model::guild::Guild;
/// use interaction_responder::model::id::GuildId;
///
/// let cache = Cache::new();
/// cache.insert_guild(Guild::new(GuildId::new(1), "guild"));
///
/// assert!(cache.guild(GuildId::new(1)).is_some());
/// ```
#[cfg(feature = "cache")]
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Cache {
    pub(crate) users: DashMap<UserId, Arc<User>>,
    pub(crate) members: DashMap<(GuildId, UserId), Arc<Member>>,
    pub(crate) guilds: DashMap<GuildId, Arc<Guild>>,
    pub(crate) settings: Settings,
}

#[cfg(feature = "cache")]
impl Cache {
    /// Creates a new cache instance with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new cache instance with settings applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use interaction_responder::cache::{Cache, Settings};
    ///
    /// let mut settings = Settings::default();
    /// settings.cache_members = false;
    ///
    /// let cache = Cache::new_with_settings(settings);
    /// ```
    #[must_use]
    pub fn new_with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Returns the settings the cache was created with.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Registers a guild, replacing any guild with the same Id.
    ///
    /// Members hydrated for interactions of this guild from now on are bound to it.
    pub fn insert_guild(&self, guild: Guild) -> Arc<Guild> {
        let guild = Arc::new(guild);
        self.guilds.insert(guild.id, Arc::clone(&guild));
        guild
    }

    /// Removes a guild from the registry. Members already bound to it are kept.
    pub fn remove_guild(&self, guild_id: GuildId) -> Option<Arc<Guild>> {
        self.guilds.remove(&guild_id).map(|(_, guild)| guild)
    }

    /// Returns the number of cached users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Returns the number of cached members, across all guilds.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    fn upsert<K, V>(map: &DashMap<K, Arc<V>>, key: K, value: V) -> Arc<V>
    where
        K: Eq + std::hash::Hash,
        V: PartialEq,
    {
        match map.entry(key) {
            Entry::Occupied(mut entry) => {
                if **entry.get() == value {
                    return Arc::clone(entry.get());
                }

                let value = Arc::new(value);
                entry.insert(Arc::clone(&value));
                value
            },
            Entry::Vacant(entry) => Arc::clone(entry.insert(Arc::new(value)).value()),
        }
    }
}

#[cfg(feature = "cache")]
impl EntityCache for Cache {
    fn upsert_user(&self, user: User) -> Arc<User> {
        if !self.settings.cache_users {
            return Arc::new(user);
        }

        debug!("Upserting user {}", user.id);
        Self::upsert(&self.users, user.id, user)
    }

    fn upsert_member(&self, member: Member) -> Arc<Member> {
        if !self.settings.cache_members {
            return Arc::new(member);
        }

        debug!("Upserting member {} of guild {}", member.user_id, member.guild_id);
        Self::upsert(&self.members, (member.guild_id, member.user_id), member)
    }

    fn user(&self, user_id: UserId) -> Option<Arc<User>> {
        self.users.get(&user_id).map(|user| Arc::clone(user.value()))
    }

    fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<Arc<Member>> {
        self.members.get(&(guild_id, user_id)).map(|member| Arc::clone(member.value()))
    }
}

#[cfg(feature = "cache")]
impl GuildRegistry for Cache {
    fn guild(&self, guild_id: GuildId) -> Option<Arc<Guild>> {
        self.guilds.get(&guild_id).map(|guild| Arc::clone(guild.value()))
    }
}
