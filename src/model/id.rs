//! A collection of newtypes defining type-strong IDs.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer, Error as DeError, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::internal::prelude::*;

macro_rules! id_u64 {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
            pub struct $name(u64);

            impl $name {
                /// Creates a new Id from a u64.
                #[inline]
                #[must_use]
                pub const fn new(id: u64) -> Self {
                    Self(id)
                }

                /// Retrieves the inner ID as u64.
                #[inline]
                #[must_use]
                pub const fn get(self) -> u64 {
                    self.0
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($name)).field(&self.0).finish()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl From<u64> for $name {
                fn from(id: u64) -> Self {
                    Self(id)
                }
            }

            impl From<$name> for u64 {
                fn from(id: $name) -> u64 {
                    id.0
                }
            }

            impl PartialEq<u64> for $name {
                fn eq(&self, u: &u64) -> bool {
                    self.0 == *u
                }
            }

            impl FromStr for $name {
                type Err = ParseIntError;

                fn from_str(s: &str) -> StdResult<Self, Self::Err> {
                    s.parse().map(Self)
                }
            }

            impl Serialize for $name {
                fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
                    serializer.collect_str(&self.0)
                }
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
                    deserializer.deserialize_any(SnowflakeVisitor).map(Self)
                }
            }
        )*
    }
}

/// Snowflakes are sent as strings, but older payloads and tests use plain integers.
struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a snowflake as a string or integer")
    }

    fn visit_u64<E: DeError>(self, value: u64) -> StdResult<Self::Value, E> {
        Ok(value)
    }

    fn visit_i64<E: DeError>(self, value: i64) -> StdResult<Self::Value, E> {
        u64::try_from(value).map_err(|_| E::custom(format!("negative snowflake: {value}")))
    }

    fn visit_str<E: DeError>(self, value: &str) -> StdResult<Self::Value, E> {
        value.parse().map_err(|_| E::custom(format!("invalid snowflake: {value:?}")))
    }
}

id_u64! {
    /// An identifier for an Application.
    ApplicationId;
    /// An identifier for an Attachment.
    AttachmentId;
    /// An identifier for a Channel
    ChannelId;
    /// An identifier for an application command.
    CommandId;
    /// An identifier for a Guild
    GuildId;
    /// An identifier for an interaction.
    InteractionId;
    /// An identifier for a Message
    MessageId;
    /// An identifier for a Role
    RoleId;
    /// An identifier for a User
    UserId;
    /// An identifier for a mentionable option value, either a [`UserId`] or a [`RoleId`].
    GenericId;
    /// An identifier for the target of a context menu command, either a [`UserId`] or a
    /// [`MessageId`].
    TargetId;
}

impl GenericId {
    /// Reinterprets this Id as a [`UserId`].
    #[must_use]
    pub const fn to_user_id(self) -> UserId {
        UserId::new(self.0)
    }

    /// Reinterprets this Id as a [`RoleId`].
    #[must_use]
    pub const fn to_role_id(self) -> RoleId {
        RoleId::new(self.0)
    }
}

impl TargetId {
    /// Converts this [`TargetId`] to [`UserId`].
    #[must_use]
    pub const fn to_user_id(self) -> UserId {
        UserId::new(self.0)
    }

    /// Converts this [`TargetId`] to [`MessageId`].
    #[must_use]
    pub const fn to_message_id(self) -> MessageId {
        MessageId::new(self.0)
    }
}

impl From<UserId> for TargetId {
    fn from(id: UserId) -> Self {
        Self(id.0)
    }
}

impl From<MessageId> for TargetId {
    fn from(id: MessageId) -> Self {
        Self(id.0)
    }
}
