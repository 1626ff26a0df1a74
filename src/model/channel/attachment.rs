use serde::{Deserialize, Serialize};

use crate::model::id::AttachmentId;

/// A file uploaded with a message, or passed as an attachment option of a slash command.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#attachment-object).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Attachment {
    /// The unique ID given to this attachment.
    pub id: AttachmentId,
    /// The filename of the file that was uploaded. This is equivalent to what the uploader had
    /// their file named.
    pub filename: String,
    /// Description for the file (max 1024 characters).
    #[serde(default)]
    pub description: Option<String>,
    /// The attachment's [media type].
    ///
    /// [media type]: https://en.wikipedia.org/wiki/Media_type
    #[serde(default)]
    pub content_type: Option<String>,
    /// The size of the file in bytes.
    pub size: u32,
    /// The URL of the uploaded attachment.
    pub url: String,
    /// The proxy URL.
    #[serde(default)]
    pub proxy_url: String,
    /// If the attachment is an image, then the height of the image is provided.
    #[serde(default)]
    pub height: Option<u32>,
    /// If the attachment is an image, then the width of the image is provided.
    #[serde(default)]
    pub width: Option<u32>,
    /// Whether this attachment is ephemeral.
    ///
    /// Ephemeral attachments will automatically be removed after a set period of time.
    #[serde(default)]
    pub ephemeral: bool,
}

impl Attachment {
    /// If this attachment is an image, then a tuple of the width and height in pixels is returned.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.and_then(|width| self.height.map(|height| (width, height)))
    }
}
