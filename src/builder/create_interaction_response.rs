use serde::ser::{Serialize, Serializer};

use super::InteractionContent;
use crate::internal::prelude::*;
use crate::model::application::InteractionResponseType;
use crate::model::channel::MessageFlags;

/// The body of the initial response to an interaction.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object).
#[derive(Clone, Debug)]
#[must_use]
pub enum CreateInteractionResponse {
    /// Responds to the interaction with a message.
    ///
    /// Corresponds to Discord's `CHANNEL_MESSAGE_WITH_SOURCE`.
    Message(InteractionContent),
    /// Acknowledges the interaction in order to edit a response later. The user sees a loading
    /// state. The flags decide, among others, whether the eventual response is ephemeral.
    ///
    /// Corresponds to Discord's `DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE`.
    Defer(MessageFlags),
}

impl CreateInteractionResponse {
    #[must_use]
    pub fn kind(&self) -> InteractionResponseType {
        match self {
            Self::Message(_) => InteractionResponseType::ChannelMessageWithSource,
            Self::Defer(_) => InteractionResponseType::DeferredChannelMessageWithSource,
        }
    }
}

impl Serialize for CreateInteractionResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Json<'a> {
            #[serde(rename = "type")]
            kind: InteractionResponseType,
            data: Data<'a>,
        }

        #[derive(serde::Serialize)]
        #[serde(untagged)]
        enum Data<'a> {
            Message(&'a InteractionContent),
            Defer { flags: MessageFlags },
        }

        let data = match self {
            Self::Message(content) => Data::Message(content),
            Self::Defer(flags) => Data::Defer {
                flags: *flags,
            },
        };

        Json {
            kind: self.kind(),
            data,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{json, to_value};

    #[test]
    fn deferred_response() {
        let response = CreateInteractionResponse::Defer(MessageFlags::EPHEMERAL);
        assert_eq!(to_value(response).unwrap(), json!({"type": 5, "data": {"flags": 64}}));
    }

    #[test]
    fn message_response() {
        let response = CreateInteractionResponse::Message("pong".into());
        assert_eq!(to_value(response).unwrap(), json!({"type": 4, "data": {"content": "pong"}}));
    }
}
