use serde::de::Error as _;
use serde::ser::{SerializeMap as _, Serializer};
use serde::{Deserialize, Serialize};

use super::{CreateAttachment, CreateEmbed};
use crate::internal::prelude::*;
use crate::model::channel::MessageFlags;

/// The body of a message sent in reply to an interaction: an initial response, a followup or an
/// edit.
///
/// A bare string is [`Self::Text`]; anything carrying embeds, flags or attachments is
/// [`Self::Structured`]. The builder methods turn a text body into a structured one as needed.
///
/// # Examples
///
/// ```rust
/// use interaction_responder::builder::{CreateEmbed, InteractionContent};
///
/// let text = InteractionContent::from("pong");
/// assert!(text.has_text());
///
/// let rich = InteractionContent::new()
///     .content("Here you go")
///     .embed(CreateEmbed::new().title("Stats"))
///     .ephemeral(true);
/// assert!(rich.has_embeds());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum InteractionContent {
    /// A message with text only.
    Text(String),
    /// A message with any combination of text, embeds, flags and attachments.
    Structured(StructuredContent),
}

/// The fields of [`InteractionContent::Structured`].
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-messages).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[non_exhaustive]
pub struct StructuredContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<CreateEmbed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<CreateAttachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
}

impl InteractionContent {
    /// Creates an empty structured body, to be filled with the builder methods.
    pub fn new() -> Self {
        Self::Structured(StructuredContent::default())
    }

    fn structured(self) -> StructuredContent {
        match self {
            Self::Text(content) => StructuredContent {
                content: Some(content),
                ..StructuredContent::default()
            },
            Self::Structured(structured) => structured,
        }
    }

    fn map(self, f: impl FnOnce(&mut StructuredContent)) -> Self {
        let mut structured = self.structured();
        f(&mut structured);
        Self::Structured(structured)
    }

    /// Set the content of the message.
    ///
    /// **Note**: Message contents must be under 2000 unicode code points.
    pub fn content(self, content: impl Into<String>) -> Self {
        let content = content.into();
        self.map(|s| s.content = Some(content))
    }

    /// Adds an embed to the message.
    pub fn embed(self, embed: CreateEmbed) -> Self {
        self.map(|s| s.embeds.push(embed))
    }

    /// Sets the embeds of the message, replacing any already added.
    pub fn embeds(self, embeds: impl IntoIterator<Item = CreateEmbed>) -> Self {
        let embeds = embeds.into_iter().collect();
        self.map(|s| s.embeds = embeds)
    }

    /// Adds the metadata of an attachment to the message.
    pub fn attachment(self, attachment: CreateAttachment) -> Self {
        self.map(|s| s.attachments.push(attachment))
    }

    /// Sets the flags for the message.
    pub fn flags(self, flags: MessageFlags) -> Self {
        self.map(|s| s.flags = Some(flags))
    }

    /// Adds or removes the ephemeral flag.
    pub fn ephemeral(self, ephemeral: bool) -> Self {
        self.map(|s| {
            let mut flags = s.flags.unwrap_or_else(MessageFlags::empty);
            flags.set(MessageFlags::EPHEMERAL, ephemeral);
            s.flags = Some(flags);
        })
    }

    /// Set whether the message is text-to-speech.
    ///
    /// Think carefully before setting this to `true`.
    pub fn tts(self, tts: bool) -> Self {
        self.map(|s| s.tts = Some(tts))
    }

    /// The text of the message, if any was given.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(content) => Some(content),
            Self::Structured(s) => s.content.as_deref(),
        }
    }

    /// Whether the message has non-empty text.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text().is_some_and(|content| !content.is_empty())
    }

    #[must_use]
    pub fn has_embeds(&self) -> bool {
        matches!(self, Self::Structured(s) if !s.embeds.is_empty())
    }

    #[must_use]
    pub fn has_attachments(&self) -> bool {
        matches!(self, Self::Structured(s) if !s.attachments.is_empty())
    }

    /// The flags given for the message, if any.
    #[must_use]
    pub fn message_flags(&self) -> Option<MessageFlags> {
        match self {
            Self::Text(_) => None,
            Self::Structured(s) => s.flags,
        }
    }

    /// Whether the message would be rejected as an initial response: it has neither text nor
    /// embeds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_text() && !self.has_embeds()
    }
}

impl Default for InteractionContent {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for InteractionContent {
    fn from(content: &str) -> Self {
        Self::Text(content.to_owned())
    }
}

impl From<String> for InteractionContent {
    fn from(content: String) -> Self {
        Self::Text(content)
    }
}

impl From<CreateEmbed> for InteractionContent {
    fn from(embed: CreateEmbed) -> Self {
        Self::new().embed(embed)
    }
}

impl From<StructuredContent> for InteractionContent {
    fn from(structured: StructuredContent) -> Self {
        Self::Structured(structured)
    }
}

/// Normalizes a loosely shaped JSON body.
///
/// A string becomes [`InteractionContent::Text`], as does any other scalar once stringified.
/// `null` is an empty structured body. An object is decoded as [`StructuredContent`], where a
/// non-string `content` is stringified.
///
/// # Errors
///
/// Returns [`Error::Json`] if the value is an array, or if the `embeds`, `flags`, `attachments` or
/// `tts` of an object are malformed.
impl TryFrom<Value> for InteractionContent {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(content) => Ok(Self::Text(content)),
            Value::Null => Ok(Self::new()),
            Value::Bool(_) | Value::Number(_) => Ok(Self::Text(value.to_string())),
            Value::Array(_) => {
                Err(Error::Json(serde_json::Error::custom("message content cannot be an array")))
            },
            Value::Object(mut map) => {
                let content = match map.remove("content") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(content)) => Some(content),
                    Some(other) => Some(other.to_string()),
                };

                let mut structured: StructuredContent = serde_json::from_value(Value::Object(map))?;
                structured.content = content;
                Ok(Self::Structured(structured))
            },
        }
    }
}

impl Serialize for InteractionContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        match self {
            Self::Text(content) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("content", content)?;
                map.end()
            },
            Self::Structured(structured) => structured.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{json, to_value};

    #[test]
    fn text_serializes_as_content_object() {
        assert_eq!(to_value(InteractionContent::from("hi")).unwrap(), json!({"content": "hi"}));
    }

    #[test]
    fn builder_promotes_text_to_structured() {
        let content = InteractionContent::from("hi").ephemeral(true);

        assert_eq!(content.text(), Some("hi"));
        assert_eq!(content.message_flags(), Some(MessageFlags::EPHEMERAL));
        assert_eq!(to_value(content).unwrap(), json!({"content": "hi", "flags": 64}));
    }

    #[test]
    fn emptiness() {
        assert!(InteractionContent::from("").is_empty());
        assert!(InteractionContent::new().is_empty());
        assert!(InteractionContent::new().flags(MessageFlags::EPHEMERAL).is_empty());
        assert!(InteractionContent::new().attachment(CreateAttachment::new(0, "a.png")).is_empty());
        assert!(!InteractionContent::from(CreateEmbed::new().title("t")).is_empty());
        assert!(!InteractionContent::from("x").is_empty());
    }

    #[test]
    fn normalizes_loose_json() {
        let content = InteractionContent::try_from(json!("plain")).unwrap();
        assert_eq!(content, InteractionContent::Text("plain".into()));

        let content = InteractionContent::try_from(json!(42)).unwrap();
        assert_eq!(content, InteractionContent::Text("42".into()));

        let content = InteractionContent::try_from(json!({"content": 7, "flags": 64})).unwrap();
        assert_eq!(content.text(), Some("7"));
        assert_eq!(content.message_flags(), Some(MessageFlags::EPHEMERAL));

        let content =
            InteractionContent::try_from(json!({"embeds": [{"title": "only an embed"}]})).unwrap();
        assert!(!content.has_text());
        assert!(content.has_embeds());

        assert!(InteractionContent::try_from(json!(null)).unwrap().is_empty());
        assert!(InteractionContent::try_from(json!({})).unwrap().is_empty());
        assert!(InteractionContent::try_from(json!(["a"])).is_err());
        assert!(InteractionContent::try_from(json!({"embeds": "nope"})).is_err());
    }
}
