//! Developer note:
//!
//! This is the builder for rich embeds sent with an interaction response or followup.
//!
//! Documentation for embeds can be found [here].
//!
//! [here]: https://discord.com/developers/docs/resources/channel#embed-object

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::channel::{Embed, EmbedField, EmbedFooter};

/// A builder to create an embed in a message
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#embed-object)
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
#[must_use]
pub struct CreateEmbed(Embed);

impl CreateEmbed {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the colour of the left-hand side of the embed.
    ///
    /// This is an alias of [`Self::colour`].
    pub fn color(self, colour: u32) -> Self {
        self.colour(colour)
    }

    /// Set the colour of the left-hand side of the embed.
    pub fn colour(mut self, colour: u32) -> Self {
        self.0.colour = Some(colour);
        self
    }

    /// Set the description of the embed.
    ///
    /// **Note**: This can't be longer than 4096 characters.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    /// Set a field. Note that this will not overwrite other fields, and will add to them.
    ///
    /// **Note**: Maximum amount of characters you can put is 256 in a field name and 1024 in a
    /// field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.0.fields.push(EmbedField::new(name, value, inline));
        self
    }

    /// Adds multiple fields at once.
    pub fn fields<N, V>(mut self, fields: impl IntoIterator<Item = (N, V, bool)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let fields =
            fields.into_iter().map(|(name, value, inline)| EmbedField::new(name, value, inline));
        self.0.fields.extend(fields);
        self
    }

    /// Set the footer of the embed.
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.0.footer = Some(EmbedFooter::new(text));
        self
    }

    /// Set the timestamp.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.0.timestamp = Some(timestamp.to_rfc3339());
        self
    }

    /// Set the title of the embed.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    /// Set the URL to direct to when clicking on the title.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.0.url = Some(url.into());
        self
    }
}

impl Default for CreateEmbed {
    /// Creates a builder with default values, setting the `type` to `rich`.
    fn default() -> Self {
        Self(Embed {
            kind: Some("rich".into()),
            ..Embed::default()
        })
    }
}

impl From<Embed> for CreateEmbed {
    /// Converts a received embed into a builder, so it can be sent again.
    fn from(embed: Embed) -> Self {
        Self(embed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{json, to_value};

    #[test]
    fn builds_rich_embed() {
        let embed = CreateEmbed::new()
            .title("Results")
            .colour(0x00ff_00)
            .field("wins", "3", true)
            .footer("page 1");

        assert_eq!(
            to_value(embed).unwrap(),
            json!({
                "type": "rich",
                "title": "Results",
                "color": 0x00ff_00,
                "fields": [{"name": "wins", "value": "3", "inline": true}],
                "footer": {"text": "page 1"},
            })
        );
    }
}
