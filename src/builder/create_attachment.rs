use serde::{Deserialize, Serialize};

use crate::model::id::AttachmentId;

/// Metadata of an attachment sent with an interaction response, followup or edit.
///
/// Only the metadata is described here; uploading the file bytes is left to the request layer.
/// For an edit, an attachment that is not listed is removed from the message.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#attachment-object-attachment-structure)
/// with the caveat at the top "For the attachments array in Message Create/Edit requests, only the id is required."
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[non_exhaustive]
#[must_use]
pub struct CreateAttachment {
    pub id: AttachmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateAttachment {
    /// Describes a new file, where `id` is the index of the file part in the upload.
    pub fn new(id: u64, filename: impl Into<String>) -> Self {
        Self {
            id: AttachmentId::new(id),
            filename: Some(filename.into()),
            description: None,
        }
    }

    /// Keeps an attachment already present on the message being edited.
    pub fn keep(id: AttachmentId) -> Self {
        Self {
            id,
            filename: None,
            description: None,
        }
    }

    /// Sets the description for the file (max 1024 characters).
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
