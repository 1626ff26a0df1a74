use std::fmt;

use super::MessageTarget;
use crate::model::id::*;

macro_rules! api {
    ($e:expr, $($rest:tt)*) => {
        format!(concat!("{}", $e), crate::constants::API_BASE, $($rest)*)
    };
}

/// A macro for defining routes. Takes as input a list of route definitions, and generates a
/// definition for the `Route` enum and implements methods on it.
macro_rules! routes {
    ($lt:lifetime, {
        $(
            $name:ident { $($field_name:ident: $field_type:ty),* },
            $path:expr;
        )+
    }) => {
        #[derive(Clone, Copy)]
        pub enum Route<$lt> {
            $(
                $name { $($field_name: $field_type),* },
            )+
        }

        impl<$lt> Route<$lt> {
            /// The full URL of the route.
            ///
            /// **Note**: Interaction routes embed the interaction token. Never log the result.
            #[must_use]
            pub fn path(self) -> String {
                match self {
                    $(
                        Self::$name { $($field_name),* } => $path,
                    )+
                }
            }

            /// The name of the route, safe to log.
            #[must_use]
            pub fn name(&self) -> &'static str {
                match self {
                    $(
                        Self::$name { .. } => stringify!($name),
                    )+
                }
            }
        }

        // The fields carry the interaction token, so only the name is shown.
        impl fmt::Debug for Route<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

// This macro takes as input a list of route definitions, represented in the following way:
// 1. The first line defines an enum variant representing an endpoint.
// 2. The second line provides the url for that endpoint.
routes! ('a, {
    InteractionResponse { interaction_id: InteractionId, token: &'a str },
    api!("/interactions/{}/{}/callback", interaction_id, token);

    WebhookFollowupMessages { application_id: ApplicationId, token: &'a str },
    api!("/webhooks/{}/{}", application_id, token);

    WebhookFollowupMessage { application_id: ApplicationId, token: &'a str, target: MessageTarget },
    api!("/webhooks/{}/{}/messages/{}", application_id, token, target);
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_paths() {
        let route = Route::InteractionResponse {
            interaction_id: InteractionId::new(1),
            token: "tok",
        };
        assert_eq!(route.path(), "https://discord.com/api/v10/interactions/1/tok/callback");

        let route = Route::WebhookFollowupMessages {
            application_id: ApplicationId::new(2),
            token: "tok",
        };
        assert_eq!(route.path(), "https://discord.com/api/v10/webhooks/2/tok");

        let route = Route::WebhookFollowupMessage {
            application_id: ApplicationId::new(2),
            token: "tok",
            target: MessageTarget::Original,
        };
        assert_eq!(route.path(), "https://discord.com/api/v10/webhooks/2/tok/messages/@original");

        let route = Route::WebhookFollowupMessage {
            application_id: ApplicationId::new(2),
            token: "tok",
            target: MessageTarget::Id(MessageId::new(3)),
        };
        assert_eq!(route.path(), "https://discord.com/api/v10/webhooks/2/tok/messages/3");
    }

    #[test]
    fn debug_hides_token() {
        let route = Route::InteractionResponse {
            interaction_id: InteractionId::new(1),
            token: "secret-token",
        };
        assert_eq!(format!("{route:?}"), "InteractionResponse");
    }
}
