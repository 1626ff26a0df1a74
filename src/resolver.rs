//! Hydration of the entities carried by a command interaction.
//!
//! Discord sends the entities an interaction refers to in a flat `resolved` block, keyed by Id.
//! The [`Resolver`] turns that block into typed entities, sharing users and members with the
//! [`EntityCache`] so that an entity obtained through an interaction and the same entity obtained
//! from the cache are the same [`Arc`].

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use serde::de::{DeserializeOwned, Error as _};
use tracing::{debug, instrument, warn};

#[cfg(feature = "cache")]
use crate::cache::Cache;
use crate::cache::{EntityCache, GuildRegistry};
use crate::error::{EntityKind, PayloadShapeError};
use crate::internal::prelude::*;
use crate::json::from_value;
use crate::model::application::{
    CommandData,
    CommandDataResolved,
    CommandInteraction,
    RawCommandInteraction,
    RawResolved,
    ResolvedMember,
};
use crate::model::channel::{Attachment, Message, PartialChannel};
use crate::model::guild::{Guild, Member, PartialMember, Role};
use crate::model::id::{GuildId, UserId};
use crate::model::user::User;

/// Hydrates raw interaction payloads against an [`EntityCache`] and a [`GuildRegistry`].
///
/// Hydration never fails because of a single malformed entry of the `resolved` block: the entry is
/// skipped, logged, and reported in [`CommandDataResolved::skipped`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use interaction_responder::cache::Cache;
/// use interaction_responder::json::json;
/// use interaction_responder::resolver::Resolver;
///
/// let resolver = Resolver::with_cache(Arc::new(Cache::new()));
///
/// let interaction = resolver
///     .hydrate_value(json!({
///         "id": "1",
///         "application_id": "2",
///         "type": 2,
///         "token": "token",
///         "user": {"id": "3", "username": "someone"},
///         "data": {"id": "4", "name": "ping", "type": 1},
///     }))
///     .unwrap();
///
/// assert_eq!(interaction.user.name, "someone");
/// ```
#[derive(Clone)]
pub struct Resolver {
    cache: Arc<dyn EntityCache>,
    guilds: Arc<dyn GuildRegistry>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

impl Resolver {
    /// Creates a resolver writing entities back into `cache` and binding members to the guilds
    /// of `guilds`.
    #[must_use]
    pub fn new(cache: Arc<dyn EntityCache>, guilds: Arc<dyn GuildRegistry>) -> Self {
        Self {
            cache,
            guilds,
        }
    }

    /// Creates a resolver using `cache` both as entity cache and guild registry.
    #[cfg(feature = "cache")]
    #[must_use]
    pub fn with_cache(cache: Arc<Cache>) -> Self {
        Self::new(Arc::clone(&cache) as Arc<dyn EntityCache>, cache)
    }

    /// Decodes and hydrates a whole interaction payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the payload isn't a command interaction, for example if its Id,
    /// token or invoking user is missing. Malformed entries of the `resolved` block are not
    /// errors.
    pub fn hydrate_value(&self, value: Value) -> Result<CommandInteraction> {
        let raw: RawCommandInteraction = from_value(value)?;
        self.hydrate(raw)
    }

    /// Hydrates an interaction: its `resolved` block and its invoking user and member.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the payload carries neither a `member` with a `user` nor a
    /// `user`.
    #[instrument(skip(self, raw), fields(interaction_id = %raw.id))]
    pub fn hydrate(&self, raw: RawCommandInteraction) -> Result<CommandInteraction> {
        let guild = self.lookup_guild(raw.guild_id);

        let (user, member) = match (raw.member, raw.user) {
            (Some(partial), _) => {
                let user = partial
                    .user
                    .clone()
                    .ok_or_else(|| serde_json::Error::missing_field("member.user"))?;
                let user = self.cache.upsert_user(user);
                let member =
                    self.bind_member(user.id, partial, Some(Arc::clone(&user)), guild.as_deref());
                (user, Some(member))
            },
            (None, Some(user)) => (self.cache.upsert_user(user), None),
            (None, None) => return Err(serde_json::Error::missing_field("user").into()),
        };

        let resolved = self.resolve_with(raw.data.resolved, raw.guild_id, guild.as_deref());

        Ok(CommandInteraction {
            id: raw.id,
            application_id: raw.application_id,
            kind: raw.kind,
            data: CommandData {
                id: raw.data.id,
                name: raw.data.name,
                kind: raw.data.kind,
                resolved,
                options: raw.data.options,
                guild_id: raw.data.guild_id,
                target_id: raw.data.target_id,
            },
            guild_id: raw.guild_id,
            channel: raw.channel,
            channel_id: raw.channel_id,
            member,
            user,
            version: raw.version,
            app_permissions: raw.app_permissions,
            locale: raw.locale,
            guild_locale: raw.guild_locale,
            token: raw.token,
        })
    }

    /// Hydrates a `resolved` block on its own.
    ///
    /// Every entry of every present kind yields exactly one hydrated entity or one
    /// [`PayloadShapeError`]. Kinds absent from the block stay `None`.
    ///
    /// Members are bound to the guild `guild_id` refers to. Without a guild Id, or if the guild
    /// isn't in the registry, they are hydrated as [`ResolvedMember::Guildless`] and not cached.
    #[instrument(skip(self, raw))]
    pub fn resolve(&self, raw: RawResolved, guild_id: Option<GuildId>) -> CommandDataResolved {
        let guild = self.lookup_guild(guild_id);
        self.resolve_with(raw, guild_id, guild.as_deref())
    }

    fn lookup_guild(&self, guild_id: Option<GuildId>) -> Option<Arc<Guild>> {
        let guild_id = guild_id?;
        let guild = self.guilds.guild(guild_id);
        if guild.is_none() {
            warn!("Guild {guild_id} is not registered, its members will be hydrated guild-less");
        }
        guild
    }

    fn resolve_with(
        &self,
        raw: RawResolved,
        guild_id: Option<GuildId>,
        guild: Option<&Guild>,
    ) -> CommandDataResolved {
        let mut skipped = Vec::new();

        // Users go first, so members can link the shared user of the same Id.
        let users = hydrate_kind(EntityKind::User, raw.users, &mut skipped, |id, user: User| {
            check_id(id, user.id)?;
            Ok(self.cache.upsert_user(user))
        });

        let members = hydrate_kind(
            EntityKind::Member,
            raw.members,
            &mut skipped,
            |id: UserId, partial: PartialMember| {
                let user = match users.as_ref().and_then(|users| users.get(&id)) {
                    Some(user) => Some(Arc::clone(user)),
                    None => match &partial.user {
                        Some(user) => {
                            check_id(id, user.id)?;
                            Some(self.cache.upsert_user(user.clone()))
                        },
                        None => self.cache.user(id),
                    },
                };
                Ok(self.bind_member(id, partial, user, guild))
            },
        );

        let roles = hydrate_kind(EntityKind::Role, raw.roles, &mut skipped, |id, mut role: Role| {
            check_id(id, role.id)?;
            if let Some(guild_id) = guild_id {
                role.guild_id = guild_id;
            }
            Ok(role)
        });

        let channels = hydrate_kind(EntityKind::Channel, raw.channels, &mut skipped, |id, channel: PartialChannel| {
            check_id(id, channel.id)?;
            Ok(channel)
        });

        let messages = hydrate_kind(EntityKind::Message, raw.messages, &mut skipped, |id, message: Message| {
            check_id(id, message.id)?;
            Ok(message)
        });

        let attachments =
            hydrate_kind(EntityKind::Attachment, raw.attachments, &mut skipped, |id, attachment: Attachment| {
                check_id(id, attachment.id)?;
                Ok(attachment)
            });

        if !skipped.is_empty() {
            warn!("Skipped {} malformed resolved entries", skipped.len());
        }

        CommandDataResolved {
            users,
            members,
            roles,
            channels,
            messages,
            attachments,
            skipped,
        }
    }

    fn bind_member(
        &self,
        user_id: UserId,
        partial: PartialMember,
        user: Option<Arc<User>>,
        guild: Option<&Guild>,
    ) -> ResolvedMember {
        match guild {
            Some(guild) => {
                let member = Member::from_partial(partial, user_id, user, guild);
                ResolvedMember::Guild(self.cache.upsert_member(member))
            },
            None => {
                warn!("Member {user_id} has no registered guild, hydrating it guild-less");
                ResolvedMember::Guildless(partial)
            },
        }
    }
}

fn check_id<K: PartialEq + fmt::Display>(key: K, id: K) -> StdResult<(), String> {
    if key == id {
        Ok(())
    } else {
        Err(format!("keyed by {key} but has id {id}"))
    }
}

/// Hydrates every entry of one kind of the `resolved` block.
///
/// An entry whose key isn't an Id, whose object can't be decoded, or that `hydrate` rejects is
/// recorded in `skipped` instead.
fn hydrate_kind<K, T, V>(
    kind: EntityKind,
    raw: Option<JsonMap>,
    skipped: &mut Vec<PayloadShapeError>,
    mut hydrate: impl FnMut(K, T) -> StdResult<V, String>,
) -> Option<HashMap<K, V>>
where
    K: Copy + Eq + Hash + FromStr,
    K::Err: fmt::Display,
    T: DeserializeOwned,
{
    let raw = raw?;
    let mut hydrated = HashMap::with_capacity(raw.len());

    for (key, value) in raw {
        let result = key
            .parse::<K>()
            .map_err(|e| format!("invalid id: {e}"))
            .and_then(|id| {
                let entity = serde_json::from_value::<T>(value).map_err(|e| e.to_string())?;
                Ok((id, hydrate(id, entity)?))
            });

        match result {
            Ok((id, entity)) => {
                hydrated.insert(id, entity);
            },
            Err(reason) => {
                let error = PayloadShapeError::new(kind, key, reason);
                warn!("{error}");
                skipped.push(error);
            },
        }
    }

    debug!("Hydrated {} resolved {kind}", hydrated.len());
    Some(hydrated)
}

#[cfg(all(test, feature = "cache"))]
mod tests {
    use super::*;
    use crate::cache::NoCache;
    use crate::json::json;
    use crate::model::channel::ChannelType;
    use crate::model::id::{ChannelId, RoleId};

    fn raw(value: Value) -> RawResolved {
        serde_json::from_value(value).unwrap()
    }

    fn guild() -> Guild {
        serde_json::from_value(json!({
            "id": "100",
            "name": "guild",
            "roles": [{"id": "200", "name": "mod", "permissions": "8", "position": 1}],
        }))
        .unwrap()
    }

    fn setup() -> (Arc<Cache>, Resolver) {
        let cache = Arc::new(Cache::new());
        cache.insert_guild(guild());
        let resolver = Resolver::with_cache(Arc::clone(&cache));
        (cache, resolver)
    }

    #[test]
    fn hydration_is_exhaustive() {
        let (cache, resolver) = setup();

        let resolved = resolver.resolve(
            raw(json!({
                "users": {
                    "1": {"id": "1", "username": "a"},
                    "2": {"id": "2", "username": "b"},
                    "3": {"id": "3", "username": "c"},
                },
                "roles": {
                    "200": {"id": "200", "name": "mod", "permissions": "8"},
                    "201": {"id": "201", "name": "helper", "permissions": "0"},
                },
                "channels": {
                    "300": {"id": "300", "name": "general", "type": 0},
                },
            })),
            Some(GuildId::new(100)),
        );

        assert_eq!(resolved.users.as_ref().map(HashMap::len), Some(3));
        assert_eq!(resolved.roles.as_ref().map(HashMap::len), Some(2));
        assert_eq!(
            resolved.channel(ChannelId::new(300)).map(|c| c.kind),
            Some(ChannelType::Text)
        );
        assert!(resolved.members.is_none());
        assert!(resolved.messages.is_none());
        assert!(resolved.attachments.is_none());
        assert!(resolved.is_complete());
        assert_eq!(cache.user_count(), 3);
    }

    #[test]
    fn roles_are_stamped_with_guild() {
        let (_, resolver) = setup();

        let resolved = resolver.resolve(
            raw(json!({"roles": {"201": {"id": "201", "name": "helper", "permissions": "0"}}})),
            Some(GuildId::new(100)),
        );

        assert_eq!(resolved.role(RoleId::new(201)).map(|r| r.guild_id), Some(GuildId::new(100)));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let (cache, resolver) = setup();

        let resolved = resolver.resolve(
            raw(json!({
                "users": {
                    "1": {"id": "1", "username": "a"},
                    "2": {"id": "2"},
                    "x": {"id": "3", "username": "c"},
                    "4": {"id": "5", "username": "d"},
                },
            })),
            None,
        );

        assert_eq!(resolved.users.as_ref().map(HashMap::len), Some(1));
        assert_eq!(resolved.skipped.len(), 3);
        assert!(resolved.skipped.iter().all(|e| e.kind == EntityKind::User));

        let mut ids: Vec<_> = resolved.skipped.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, ["2", "4", "x"]);
        assert_eq!(cache.user_count(), 1);
    }

    #[test]
    fn rehydration_converges_on_cached_records() {
        let (cache, resolver) = setup();
        let block = json!({
            "users": {"1": {"id": "1", "username": "a"}},
            "members": {"1": {"nick": "n", "roles": ["200"]}},
        });

        let first = resolver.resolve(raw(block.clone()), Some(GuildId::new(100)));
        let second = resolver.resolve(raw(block), Some(GuildId::new(100)));

        let user = first.user(UserId::new(1)).unwrap();
        assert!(Arc::ptr_eq(user, second.user(UserId::new(1)).unwrap()));
        assert!(Arc::ptr_eq(user, &cache.user(UserId::new(1)).unwrap()));

        let member = first.member(UserId::new(1)).and_then(ResolvedMember::as_member).unwrap();
        let again = second.member(UserId::new(1)).and_then(ResolvedMember::as_member).unwrap();
        assert!(Arc::ptr_eq(member, again));
        assert!(Arc::ptr_eq(member, &cache.member(GuildId::new(100), UserId::new(1)).unwrap()));
        assert_eq!(cache.member_count(), 1);
    }

    #[test]
    fn members_link_shared_user_and_guild_roles() {
        let (_, resolver) = setup();

        let resolved = resolver.resolve(
            raw(json!({
                "users": {"1": {"id": "1", "username": "a"}},
                "members": {"1": {"roles": ["200", "999"]}},
            })),
            Some(GuildId::new(100)),
        );

        let member = resolved.member(UserId::new(1)).and_then(ResolvedMember::as_member).unwrap();
        assert!(Arc::ptr_eq(member.user.as_ref().unwrap(), resolved.user(UserId::new(1)).unwrap()));
        assert_eq!(member.guild_id, GuildId::new(100));
        assert_eq!(member.roles.len(), 2);
        assert_eq!(member.resolved_roles.len(), 1);
        assert_eq!(resolved.guildless_members().count(), 0);
    }

    #[test]
    fn users_without_guild_id() {
        let (_, resolver) = setup();

        let resolved =
            resolver.resolve(raw(json!({"users": {"1": {"id": "1", "username": "a"}}})), None);

        assert_eq!(resolved.users.as_ref().map(HashMap::len), Some(1));
        assert!(resolved.members.is_none());
    }

    #[test]
    fn members_degrade_without_registered_guild() {
        let (cache, resolver) = setup();
        let block = json!({"members": {"1": {"roles": ["200"]}, "2": {"roles": []}}});

        let unknown_guild = resolver.resolve(raw(block.clone()), Some(GuildId::new(7)));
        let no_guild = resolver.resolve(raw(block), None);

        for resolved in [unknown_guild, no_guild] {
            assert_eq!(resolved.members.as_ref().map(HashMap::len), Some(2));
            let mut guildless: Vec<_> = resolved.guildless_members().collect();
            guildless.sort();
            assert_eq!(guildless, [UserId::new(1), UserId::new(2)]);
            assert_eq!(
                resolved.member(UserId::new(1)).map(ResolvedMember::role_ids),
                Some(&[RoleId::new(200)][..])
            );
        }
        assert_eq!(cache.member_count(), 0);
    }

    #[test]
    fn guildless_members_keep_their_embedded_user() {
        let (cache, resolver) = setup();

        let resolved = resolver.resolve(
            raw(json!({"members": {"1": {"user": {"id": "1", "username": "a"}, "roles": []}}})),
            None,
        );

        match resolved.member(UserId::new(1)) {
            Some(ResolvedMember::Guildless(partial)) => {
                assert_eq!(partial.user.as_ref().map(|u| u.name.as_str()), Some("a"));
            },
            other => panic!("expected a guild-less member, got {other:?}"),
        }
        assert!(cache.user(UserId::new(1)).is_some());

        let interaction = resolver
            .hydrate_value(json!({
                "id": "10",
                "application_id": "11",
                "type": 2,
                "token": "tok",
                "guild_id": "7",
                "member": {"user": {"id": "3", "username": "c"}, "roles": []},
                "data": {"id": "12", "name": "ping", "type": 1},
            }))
            .unwrap();

        assert!(matches!(
            interaction.member,
            Some(ResolvedMember::Guildless(ref partial)) if partial.user.as_ref().is_some_and(|u| u.id == UserId::new(3))
        ));
    }

    #[test]
    fn hydrates_invoking_member() {
        let (cache, resolver) = setup();

        let interaction = resolver
            .hydrate_value(json!({
                "id": "10",
                "application_id": "11",
                "type": 2,
                "token": "tok",
                "guild_id": "100",
                "channel_id": "300",
                "member": {"user": {"id": "1", "username": "a"}, "roles": ["200"]},
                "data": {"id": "12", "name": "ping", "type": 1},
            }))
            .unwrap();

        assert_eq!(interaction.user.id, UserId::new(1));
        let member = interaction.member.as_ref().and_then(ResolvedMember::as_member).unwrap();
        assert!(Arc::ptr_eq(member.user.as_ref().unwrap(), &interaction.user));
        assert!(Arc::ptr_eq(&interaction.user, &cache.user(UserId::new(1)).unwrap()));
        assert!(interaction.data.resolved.users.is_none());
    }

    #[test]
    fn missing_invoker_is_a_payload_error() {
        let (_, resolver) = setup();

        let result = resolver.hydrate_value(json!({
            "id": "10",
            "application_id": "11",
            "type": 2,
            "token": "tok",
            "data": {"id": "12", "name": "ping", "type": 1},
        }));

        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn nothing_is_shared_without_a_cache() {
        let resolver = Resolver::new(Arc::new(NoCache), Arc::new(NoCache));

        let resolved = resolver.resolve(
            raw(json!({
                "users": {"1": {"id": "1", "username": "a"}},
                "members": {"1": {"roles": []}},
            })),
            Some(GuildId::new(100)),
        );

        assert_eq!(resolved.users.as_ref().map(HashMap::len), Some(1));
        assert!(resolved.member(UserId::new(1)).is_some_and(ResolvedMember::is_guildless));
    }
}
