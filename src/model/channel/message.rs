//! Models relating to Discord channels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Attachment, Embed};
use crate::model::id::{ApplicationId, ChannelId, GuildId, MessageId};
use crate::model::user::User;

/// A representation of a message over a guild's text channel, a group, or a private channel.
///
/// Interaction responses and followups are returned by Discord in this form.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object) with some
/// [extra fields](https://discord.com/developers/docs/topics/gateway-events#message-create-message-create-extra-fields).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Message {
    /// The unique Id of the message. Can be used to calculate the creation date of the message.
    pub id: MessageId,
    /// The Id of the [`Channel`] that the message was sent to.
    ///
    /// [`Channel`]: https://discord.com/developers/docs/resources/channel#channel-object
    pub channel_id: ChannelId,
    /// The Id of the guild that the message was sent in, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// The user that sent the message.
    pub author: User,
    /// The content of the message.
    #[serde(default)]
    pub content: String,
    /// Initial message creation timestamp, calculated from its Id.
    pub timestamp: DateTime<Utc>,
    /// The timestamp of the last time the message was updated, if it was.
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    /// Indicator of whether the command is to be played back via text-to-speech.
    #[serde(default)]
    pub tts: bool,
    /// Indicator of whether the message mentions everyone.
    #[serde(default)]
    pub mention_everyone: bool,
    /// An vector of the files attached to a message.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Array of embeds sent with the message.
    #[serde(default)]
    pub embeds: Vec<Embed>,
    /// Whether the message is pinned.
    #[serde(default)]
    pub pinned: bool,
    /// If the message is an Interaction or application-owned webhook, this is the id of the
    /// application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    /// The message flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl Message {
    /// Whether the message was sent as ephemeral, which means it can only be fetched, edited or
    /// deleted through the interaction that created it.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.flags.is_some_and(|flags| flags.contains(MessageFlags::EPHEMERAL))
    }
}

bitflags::bitflags! {
    /// Describes extra features of the message.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object-message-flags).
    #[derive(Copy, Clone, Default, Debug, Eq, Hash, PartialEq)]
    pub struct MessageFlags: u64 {
        /// This message has been published to subscribed channels (via Channel Following).
        const CROSSPOSTED = 1 << 0;
        /// This message originated from a message in another channel (via Channel Following).
        const IS_CROSSPOST = 1 << 1;
        /// Do not include any embeds when serializing this message.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// This message is only visible to the user who invoked the Interaction.
        const EPHEMERAL = 1 << 6;
        /// This message is an Interaction Response and the bot is "thinking".
        const LOADING = 1 << 7;
        /// This message will not trigger push and desktop notifications.
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_retain(u64::deserialize(deserializer)?))
    }
}
