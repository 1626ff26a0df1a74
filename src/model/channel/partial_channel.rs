use serde::{Deserialize, Serialize};

use super::ChannelType;
use crate::model::id::ChannelId;
use crate::model::Permissions;

/// A container for any partial channel.
///
/// This is the form in which channels appear in the `resolved` block of an interaction and in
/// its `channel` field.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#channel-object).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct PartialChannel {
    /// The channel Id.
    pub id: ChannelId,
    /// The channel name.
    #[serde(default)]
    pub name: Option<String>,
    /// The channel type.
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// The channel permissions.
    #[serde(default)]
    pub permissions: Option<Permissions>,
    /// The Id of the parent category for a channel, or of the parent text channel for a thread.
    #[serde(default)]
    pub parent_id: Option<ChannelId>,
}
