use std::error::Error as StdError;
use std::fmt;

use serde_json::Error as JsonError;

use crate::http::HttpError;

/// The common result type between most library functions.
///
/// The library exposes functions which, for a result type, exposes only one type, rather than the
/// usual 2 (`Result<T, Error>`). This is because all functions that return a result return
/// this library's [`Error`], so this is implied, and a "simpler" result is used.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A common error enum returned by most of the library's functionality within a custom
/// [`Result`].
///
/// Local precondition violations of the interaction lifecycle are wrapped in the
/// [`Error::Interaction`] variant and never reach the network. Errors surfaced by the request
/// layer are wrapped, unchanged, in [`Error::Http`].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An error while decoding or encoding a payload.
    Json(JsonError),
    /// An error violating the acknowledgement rules of an interaction.
    Interaction(InteractionError),
    /// An error surfaced by the request layer.
    Http(HttpError),
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Error {
        Error::Json(e)
    }
}

impl From<InteractionError> for Error {
    fn from(e: InteractionError) -> Error {
        Error::Interaction(e)
    }
}

impl From<HttpError> for Error {
    fn from(e: HttpError) -> Error {
        Error::Http(e)
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Http(HttpError::Request(e))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(inner) => fmt::Display::fmt(&inner, f),
            Self::Interaction(inner) => fmt::Display::fmt(&inner, f),
            Self::Http(inner) => fmt::Display::fmt(&inner, f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Json(inner) => Some(inner),
            Self::Interaction(inner) => Some(inner),
            Self::Http(inner) => Some(inner),
        }
    }
}

/// A precondition of the interaction response lifecycle that was not met.
///
/// These are checked locally, before any request is issued, and are never retried.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum InteractionError {
    /// An initial response was attempted on an interaction that already has one.
    AlreadyAcknowledged,
    /// A followup, edit, delete or fetch was attempted before the initial response completed.
    NotYetAcknowledged,
    /// The message content has neither text nor embeds (nor attachments, for followups).
    EmptyContent,
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAcknowledged => f.write_str("Interaction has already been acknowledged."),
            Self::NotYetAcknowledged => f.write_str("Interaction has not been acknowledged yet."),
            Self::EmptyContent => f.write_str("No content, embeds or attachments were provided."),
        }
    }
}

impl StdError for InteractionError {}

/// The kind of an entity found in the `resolved` block of a command interaction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum EntityKind {
    User,
    Member,
    Role,
    Channel,
    Message,
    Attachment,
}

impl EntityKind {
    /// The key of this kind inside the `resolved` block.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Member => "members",
            Self::Role => "roles",
            Self::Channel => "channels",
            Self::Message => "messages",
            Self::Attachment => "attachments",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single malformed entry of the `resolved` block.
///
/// Hydration does not abort on these: the entry is skipped and the error is kept in
/// [`CommandDataResolved::skipped`].
///
/// [`CommandDataResolved::skipped`]: crate::model::application::CommandDataResolved::skipped
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct PayloadShapeError {
    /// The kind of the entry that failed.
    pub kind: EntityKind,
    /// The key of the entry, exactly as it appeared in the payload.
    pub id: String,
    /// Why the entry could not be decoded.
    pub reason: String,
}

impl PayloadShapeError {
    pub(crate) fn new(kind: EntityKind, id: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            kind,
            id: id.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for PayloadShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed resolved {} entry {:?}: {}", self.kind, self.id, self.reason)
    }
}

impl StdError for PayloadShapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_errors_convert() {
        let error = Error::from(InteractionError::NotYetAcknowledged);
        assert!(matches!(error, Error::Interaction(InteractionError::NotYetAcknowledged)));
        assert_eq!(error.to_string(), "Interaction has not been acknowledged yet.");
    }

    #[test]
    fn payload_shape_error_names_the_entry() {
        let error = PayloadShapeError::new(EntityKind::Member, "42", "missing field `roles`");
        assert_eq!(error.to_string(), "Malformed resolved members entry \"42\": missing field `roles`");
    }
}
