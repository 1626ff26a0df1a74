//! The HTTP module which provides the requests issued in reply to an interaction.
//!
//! Replying to an interaction goes through two different delivery paths:
//!
//! - the initial response, sent once to the interaction callback endpoint;
//! - every later message, sent to the webhook of the application, keyed by the interaction token.
//!
//! The [`InteractionHttp`] trait is the boundary the [`InteractionResponder`] issues these
//! requests through. With the `http` feature, [`Http`] implements it on top of `reqwest`.
//!
//! Interaction endpoints are authenticated by the interaction token carried in the URL, and are
//! not subject to the global ratelimit.
//!
//! [`InteractionResponder`]: crate::responder::InteractionResponder

use std::fmt;

use async_trait::async_trait;

#[cfg(feature = "http")]
mod client;
mod error;
mod routing;

#[cfg(feature = "http")]
pub use self::client::*;
pub use self::error::*;
pub use self::routing::Route;
use crate::builder::{CreateInteractionResponse, InteractionContent};
use crate::constants;
use crate::internal::prelude::*;
use crate::model::channel::Message;
use crate::model::id::{ApplicationId, InteractionId, MessageId};

/// An method used for requests.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum LightMethod {
    /// Indicates that a route is for the `DELETE` method only.
    Delete,
    /// Indicates that a route is for the `GET` method only.
    Get,
    /// Indicates that a route is for the `PATCH` method only.
    Patch,
    /// Indicates that a route is for the `POST` method only.
    Post,
}

impl LightMethod {
    #[cfg(feature = "http")]
    #[must_use]
    pub fn reqwest_method(self) -> reqwest::Method {
        match self {
            Self::Delete => reqwest::Method::DELETE,
            Self::Get => reqwest::Method::GET,
            Self::Patch => reqwest::Method::PATCH,
            Self::Post => reqwest::Method::POST,
        }
    }
}

/// A message sent in reply to an interaction: the initial response, or a followup.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MessageTarget {
    /// The initial response of the interaction, addressed as `@original`.
    Original,
    /// A followup message.
    Id(MessageId),
}

impl fmt::Display for MessageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str(constants::ORIGINAL_MESSAGE),
            Self::Id(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl From<MessageId> for MessageTarget {
    fn from(id: MessageId) -> Self {
        Self::Id(id)
    }
}

/// The requests issued in reply to an interaction.
///
/// Remote errors are returned unchanged as [`Error::Http`], and are never retried.
#[async_trait]
pub trait InteractionHttp: Send + Sync {
    /// Sends the initial response to an interaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if Discord rejects the response, for example because the
    /// interaction was already responded to.
    async fn create_interaction_response(
        &self,
        interaction_id: InteractionId,
        token: &str,
        response: &CreateInteractionResponse,
    ) -> Result<()>;

    /// Sends a followup message through the application's webhook.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request fails.
    async fn create_followup_message(
        &self,
        application_id: ApplicationId,
        token: &str,
        content: &InteractionContent,
    ) -> Result<Message>;

    /// Edits the initial response or a followup message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request fails.
    async fn edit_followup_message(
        &self,
        application_id: ApplicationId,
        token: &str,
        target: MessageTarget,
        content: &InteractionContent,
    ) -> Result<Message>;

    /// Deletes the initial response or a followup message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request fails.
    async fn delete_followup_message(
        &self,
        application_id: ApplicationId,
        token: &str,
        target: MessageTarget,
    ) -> Result<()>;

    /// Gets the initial response or a followup message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request fails, which it does for ephemeral messages.
    async fn get_followup_message(
        &self,
        application_id: ApplicationId,
        token: &str,
        target: MessageTarget,
    ) -> Result<Message>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_target_display() {
        assert_eq!(MessageTarget::Original.to_string(), "@original");
        assert_eq!(MessageTarget::from(MessageId::new(42)).to_string(), "42");
    }
}
