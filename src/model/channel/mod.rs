//! Models relating to channels and types within channels.

mod attachment;
mod embed;
mod message;
mod partial_channel;

pub use self::attachment::*;
pub use self::embed::*;
pub use self::message::*;
pub use self::partial_channel::*;

enum_number! {
    /// A representation of a type of channel.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#channel-object-channel-types).
    pub enum ChannelType {
        /// An indicator that the channel is a text [`GuildChannel`].
        ///
        /// [`GuildChannel`]: https://discord.com/developers/docs/resources/channel#channel-object
        Text = 0,
        /// An indicator that the channel is a private channel.
        Private = 1,
        /// An indicator that the channel is a voice channel.
        Voice = 2,
        /// An indicator that the channel is a group DM.
        GroupDm = 3,
        /// An indicator that the channel is a channel category.
        Category = 4,
        /// An indicator that the channel is a `NewsChannel`.
        ///
        /// Note: `NewsChannel` is serialized into a [`GuildChannel`]
        ///
        /// [`GuildChannel`]: https://discord.com/developers/docs/resources/channel#channel-object
        News = 5,
        /// An indicator that the channel is a news thread.
        NewsThread = 10,
        /// An indicator that the channel is a public thread.
        PublicThread = 11,
        /// An indicator that the channel is a private thread.
        PrivateThread = 12,
        /// An indicator that the channel is a stage channel.
        Stage = 13,
        /// An indicator that the channel is a directory channel.
        Directory = 14,
        /// An indicator that the channel is a forum channel.
        Forum = 15,
        /// An indicator that the channel is a media channel.
        Media = 16,
        _ => Unknown(u8),
    }
}

impl ChannelType {
    /// Whether the channel is a thread.
    #[must_use]
    pub fn is_thread(self) -> bool {
        matches!(self, Self::NewsThread | Self::PublicThread | Self::PrivateThread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::json;

    #[test]
    fn unknown_channel_types_survive() {
        let channel: PartialChannel = serde_json::from_value(json!({
            "id": "1",
            "name": "new",
            "type": 99,
        }))
        .unwrap();
        assert_eq!(channel.kind, ChannelType::Unknown(99));
        assert_eq!(serde_json::to_value(channel.kind).unwrap(), json!(99));
    }

    #[test]
    fn threads() {
        assert!(ChannelType::from(11).is_thread());
        assert!(!ChannelType::Text.is_thread());
    }
}
