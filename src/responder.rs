//! The response lifecycle of a single interaction.
//!
//! Discord accepts exactly one initial response per interaction, either a deferral or a message.
//! Every later message is a followup, sent through the application's webhook and keyed by the
//! interaction token. The [`InteractionResponder`] tracks which phase an interaction is in and
//! rejects the operations that are invalid in that phase before any request is made.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::builder::{CreateInteractionResponse, InteractionContent};
use crate::error::InteractionError;
use crate::http::{InteractionHttp, MessageTarget};
use crate::internal::prelude::*;
use crate::model::channel::{Message, MessageFlags};
use crate::model::id::{ApplicationId, ChannelId, GuildId, InteractionId, MessageId};

/// What identifies an interaction to Discord's response endpoints.
///
/// The token is single-use per interaction, and is never shown by the `Debug` implementation.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct InteractionIdentity {
    /// Id of the interaction.
    pub id: InteractionId,
    /// Id of the application this interaction is for.
    pub application_id: ApplicationId,
    /// The channel Id this interaction was sent from.
    pub channel_id: Option<ChannelId>,
    /// The guild Id this interaction was sent from, if there is one.
    pub guild_id: Option<GuildId>,
    token: SecretString,
}

impl InteractionIdentity {
    #[must_use]
    pub fn new(
        id: InteractionId,
        application_id: ApplicationId,
        token: impl Into<String>,
        channel_id: Option<ChannelId>,
        guild_id: Option<GuildId>,
    ) -> Self {
        Self {
            id,
            application_id,
            channel_id,
            guild_id,
            token: SecretString::new(token.into()),
        }
    }

    pub(crate) fn from_secret(
        id: InteractionId,
        application_id: ApplicationId,
        token: SecretString,
        channel_id: Option<ChannelId>,
        guild_id: Option<GuildId>,
    ) -> Self {
        Self {
            id,
            application_id,
            channel_id,
            guild_id,
            token,
        }
    }

    /// A continuation token for responding to the interaction.
    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

/// Whether the initial response of an interaction has been sent.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AcknowledgementState {
    /// No initial response has completed yet.
    #[default]
    Unset,
    /// An initial response was attempted and failed.
    Unacknowledged,
    /// The initial response was accepted by Discord.
    Acknowledged,
}

impl AcknowledgementState {
    /// Whether an initial response was accepted. [`Self::Unset`] counts as not acknowledged.
    #[must_use]
    pub fn is_acknowledged(self) -> bool {
        self == Self::Acknowledged
    }
}

/// Which path [`InteractionResponder::respond_with_message`] took.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum ResponsePath {
    /// The message was sent as the initial response.
    Initial,
    /// The interaction was already acknowledged, so the message was sent as a followup.
    Followup(Message),
}

/// The response state machine of one interaction.
///
/// The operations changing the acknowledgement state take `&mut self`, so two initial responses
/// can't be in flight at once on the same responder.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use interaction_responder::http::Http;
/// use interaction_responder::model::application::CommandInteraction;
/// use interaction_responder::model::channel::MessageFlags;
///
/// # async fn run(interaction: CommandInteraction) -> interaction_responder::Result<()> {
/// let http = Arc::new(Http::new()?);
/// let mut responder = interaction.responder(http);
///
/// responder.acknowledge_deferred(MessageFlags::EPHEMERAL).await?;
/// // ... do the slow work ...
/// responder.create_followup("Done!").await?;
/// # Ok(())
/// # }
/// ```
pub struct InteractionResponder {
    identity: InteractionIdentity,
    http: Arc<dyn InteractionHttp>,
    state: AcknowledgementState,
}

impl fmt::Debug for InteractionResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionResponder")
            .field("identity", &self.identity)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl InteractionResponder {
    /// Binds a responder to a fresh interaction.
    #[must_use]
    pub fn new(identity: InteractionIdentity, http: Arc<dyn InteractionHttp>) -> Self {
        Self {
            identity,
            http,
            state: AcknowledgementState::Unset,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &InteractionIdentity {
        &self.identity
    }

    #[must_use]
    pub fn state(&self) -> AcknowledgementState {
        self.state
    }

    #[must_use]
    pub fn is_acknowledged(&self) -> bool {
        self.state.is_acknowledged()
    }

    fn token(&self) -> &str {
        self.identity.token.expose_secret()
    }

    fn ensure_acknowledged(&self) -> Result<()> {
        if self.is_acknowledged() {
            Ok(())
        } else {
            Err(InteractionError::NotYetAcknowledged.into())
        }
    }

    async fn initial_response(&mut self, response: CreateInteractionResponse) -> Result<()> {
        let result = self
            .http
            .create_interaction_response(self.identity.id, self.token(), &response)
            .await;

        match result {
            Ok(()) => {
                debug!("Interaction {} acknowledged with {:?}", self.identity.id, response.kind());
                self.state = AcknowledgementState::Acknowledged;
                Ok(())
            },
            Err(why) => {
                self.state = AcknowledgementState::Unacknowledged;
                Err(why)
            },
        }
    }

    /// Acknowledges the interaction, showing a loading state until a message is sent.
    ///
    /// The flags apply to the eventual response; pass [`MessageFlags::EPHEMERAL`] to make it
    /// visible to the invoking user only.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::AlreadyAcknowledged`] if an initial response was already sent,
    /// without making a request. Returns [`Error::Http`] if Discord rejects the response.
    #[instrument(skip(self), fields(interaction_id = %self.identity.id))]
    pub async fn acknowledge_deferred(&mut self, flags: MessageFlags) -> Result<()> {
        if self.is_acknowledged() {
            return Err(InteractionError::AlreadyAcknowledged.into());
        }

        self.initial_response(CreateInteractionResponse::Defer(flags)).await
    }

    /// Responds to the interaction with a message.
    ///
    /// If the interaction was already acknowledged, the message is sent as a followup instead, and
    /// [`ResponsePath::Followup`] is returned with the created message.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::EmptyContent`] if the message has neither text nor embeds,
    /// without making a request. Returns [`Error::Http`] if the request fails.
    #[instrument(skip(self, content), fields(interaction_id = %self.identity.id))]
    pub async fn respond_with_message(
        &mut self,
        content: impl Into<InteractionContent>,
    ) -> Result<ResponsePath> {
        let content = content.into();
        if content.is_empty() {
            return Err(InteractionError::EmptyContent.into());
        }

        if self.is_acknowledged() {
            debug!("Interaction {} already acknowledged, sending a followup", self.identity.id);
            let message = self.send_followup(&content).await?;
            return Ok(ResponsePath::Followup(message));
        }

        self.initial_response(CreateInteractionResponse::Message(content)).await?;
        Ok(ResponsePath::Initial)
    }

    async fn send_followup(&self, content: &InteractionContent) -> Result<Message> {
        let application_id = self.identity.application_id;
        self.http.create_followup_message(application_id, self.token(), content).await
    }

    /// Sends a followup message.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::NotYetAcknowledged`] if no initial response was sent, and
    /// [`InteractionError::EmptyContent`] if the message has no text, embeds or attachments, both
    /// without making a request. Returns [`Error::Http`] if the request fails.
    #[instrument(skip(self, content), fields(interaction_id = %self.identity.id))]
    pub async fn create_followup(
        &self,
        content: impl Into<InteractionContent>,
    ) -> Result<Message> {
        self.ensure_acknowledged()?;

        let content = content.into();
        if content.is_empty() && !content.has_attachments() {
            return Err(InteractionError::EmptyContent.into());
        }

        self.send_followup(&content).await
    }

    /// Edits the initial response or a followup message.
    ///
    /// The content is sent as given: an edit may change only the flags or attachments.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::NotYetAcknowledged`] if no initial response was sent, without
    /// making a request. Returns [`Error::Http`] if the request fails.
    #[instrument(skip(self, content), fields(interaction_id = %self.identity.id))]
    pub async fn edit_message(
        &self,
        target: MessageTarget,
        content: impl Into<InteractionContent>,
    ) -> Result<Message> {
        self.ensure_acknowledged()?;

        let content = content.into();
        let application_id = self.identity.application_id;
        self.http.edit_followup_message(application_id, self.token(), target, &content).await
    }

    /// Deletes the initial response or a followup message.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::NotYetAcknowledged`] if no initial response was sent, without
    /// making a request. Returns [`Error::Http`] if the request fails.
    #[instrument(skip(self), fields(interaction_id = %self.identity.id))]
    pub async fn delete_message(&self, target: MessageTarget) -> Result<()> {
        self.ensure_acknowledged()?;

        let application_id = self.identity.application_id;
        self.http.delete_followup_message(application_id, self.token(), target).await
    }

    /// Gets the initial response.
    ///
    /// **Note**: Discord refuses to return ephemeral responses; the remote error is returned as
    /// is.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::NotYetAcknowledged`] if no initial response was sent, without
    /// making a request. Returns [`Error::Http`] if the request fails.
    pub async fn get_original_message(&self) -> Result<Message> {
        self.get_message(MessageTarget::Original).await
    }

    /// Gets a followup message.
    ///
    /// # Errors
    ///
    /// See [`Self::get_original_message`].
    pub async fn get_followup_message(&self, message_id: MessageId) -> Result<Message> {
        self.get_message(MessageTarget::Id(message_id)).await
    }

    #[instrument(skip(self), fields(interaction_id = %self.identity.id))]
    async fn get_message(&self, target: MessageTarget) -> Result<Message> {
        self.ensure_acknowledged()?;

        let application_id = self.identity.application_id;
        self.http.get_followup_message(application_id, self.token(), target).await
    }

    /// Edits the initial response.
    ///
    /// # Errors
    ///
    /// See [`Self::edit_message`].
    pub async fn edit_original_message(
        &self,
        content: impl Into<InteractionContent>,
    ) -> Result<Message> {
        self.edit_message(MessageTarget::Original, content).await
    }

    /// Deletes the initial response.
    ///
    /// # Errors
    ///
    /// See [`Self::delete_message`].
    pub async fn delete_original_message(&self) -> Result<()> {
        self.delete_message(MessageTarget::Original).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::builder::{CreateAttachment, CreateEmbed};
    use crate::http::{DiscordJsonError, ErrorResponse, HttpError, LightMethod};
    use crate::json::{json, to_value};

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Initial(Value),
        Followup(Value),
        Edit(MessageTarget, Value),
        Delete(MessageTarget),
        Get(MessageTarget),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Call>>,
        reject_initial: bool,
    }

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn message(&self, content: &str) -> Message {
            let id = 1000 + self.calls.lock().unwrap().len();
            serde_json::from_value(json!({
                "id": id.to_string(),
                "channel_id": "1",
                "author": {"id": "2", "username": "app", "bot": true},
                "content": content,
                "timestamp": "2024-01-01T00:00:00.000000+00:00",
            }))
            .unwrap()
        }
    }

    #[async_trait]
    impl InteractionHttp for Recorder {
        async fn create_interaction_response(
            &self,
            _: InteractionId,
            token: &str,
            response: &CreateInteractionResponse,
        ) -> Result<()> {
            assert_eq!(token, "tok");
            self.record(Call::Initial(to_value(response).unwrap()));
            if self.reject_initial {
                return Err(Error::Http(HttpError::UnsuccessfulRequest(ErrorResponse {
                    status_code: 400,
                    url: "https://discord.com/api/v10/interactions/1/{token}/callback".into(),
                    method: LightMethod::Post,
                    error: DiscordJsonError {
                        code: 40060,
                        message: "Interaction has already been acknowledged.".into(),
                        errors: None,
                    },
                })));
            }
            Ok(())
        }

        async fn create_followup_message(
            &self,
            _: ApplicationId,
            _: &str,
            content: &InteractionContent,
        ) -> Result<Message> {
            let message = self.message(content.text().unwrap_or_default());
            self.record(Call::Followup(to_value(content).unwrap()));
            Ok(message)
        }

        async fn edit_followup_message(
            &self,
            _: ApplicationId,
            _: &str,
            target: MessageTarget,
            content: &InteractionContent,
        ) -> Result<Message> {
            let message = self.message(content.text().unwrap_or_default());
            self.record(Call::Edit(target, to_value(content).unwrap()));
            Ok(message)
        }

        async fn delete_followup_message(
            &self,
            _: ApplicationId,
            _: &str,
            target: MessageTarget,
        ) -> Result<()> {
            self.record(Call::Delete(target));
            Ok(())
        }

        async fn get_followup_message(
            &self,
            _: ApplicationId,
            _: &str,
            target: MessageTarget,
        ) -> Result<Message> {
            let message = self.message("");
            self.record(Call::Get(target));
            Ok(message)
        }
    }

    fn responder(recorder: &Arc<Recorder>) -> InteractionResponder {
        let identity =
            InteractionIdentity::new(InteractionId::new(1), ApplicationId::new(2), "tok", None, None);
        InteractionResponder::new(identity, Arc::clone(recorder) as Arc<dyn InteractionHttp>)
    }

    fn is_interaction_error(result: &Result<impl fmt::Debug>, expected: InteractionError) -> bool {
        matches!(result, Err(Error::Interaction(e)) if *e == expected)
    }

    #[tokio::test]
    async fn defer_then_followup() {
        let recorder = Arc::new(Recorder::default());
        let mut responder = responder(&recorder);

        responder.acknowledge_deferred(MessageFlags::EPHEMERAL).await.unwrap();
        let message = responder.create_followup("hi").await.unwrap();

        assert_eq!(message.content, "hi");
        assert_eq!(responder.state(), AcknowledgementState::Acknowledged);
        assert_eq!(recorder.calls(), [
            Call::Initial(json!({"type": 5, "data": {"flags": 64}})),
            Call::Followup(json!({"content": "hi"})),
        ]);
    }

    #[tokio::test]
    async fn empty_response_is_rejected_locally() {
        let recorder = Arc::new(Recorder::default());
        let mut responder = responder(&recorder);

        let result = responder.respond_with_message("").await;

        assert!(is_interaction_error(&result, InteractionError::EmptyContent));
        assert!(recorder.calls().is_empty());
        assert_eq!(responder.state(), AcknowledgementState::Unset);
    }

    #[tokio::test]
    async fn webhook_operations_require_acknowledgement() {
        let recorder = Arc::new(Recorder::default());
        let responder = responder(&recorder);
        let expected = InteractionError::NotYetAcknowledged;

        assert!(is_interaction_error(&responder.delete_message(MessageTarget::Original).await, expected));
        assert!(is_interaction_error(&responder.delete_original_message().await, expected));
        assert!(is_interaction_error(&responder.create_followup("hi").await, expected));
        assert!(is_interaction_error(&responder.edit_original_message("hi").await, expected));
        assert!(is_interaction_error(&responder.get_original_message().await, expected));
        assert!(is_interaction_error(
            &responder.get_followup_message(MessageId::new(5)).await,
            expected
        ));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn second_defer_is_rejected() {
        let recorder = Arc::new(Recorder::default());
        let mut responder = responder(&recorder);

        responder.acknowledge_deferred(MessageFlags::empty()).await.unwrap();
        let result = responder.acknowledge_deferred(MessageFlags::empty()).await;

        assert!(is_interaction_error(&result, InteractionError::AlreadyAcknowledged));
        assert_eq!(recorder.calls().len(), 1);
    }

    #[tokio::test]
    async fn repeated_response_redirects_to_followup() {
        let recorder = Arc::new(Recorder::default());
        let mut responder = responder(&recorder);

        let first = responder.respond_with_message("one").await.unwrap();
        let second = responder.respond_with_message("two").await.unwrap();

        assert!(matches!(first, ResponsePath::Initial));
        assert!(matches!(second, ResponsePath::Followup(ref m) if m.content == "two"));
        assert_eq!(recorder.calls(), [
            Call::Initial(json!({"type": 4, "data": {"content": "one"}})),
            Call::Followup(json!({"content": "two"})),
        ]);
    }

    #[tokio::test]
    async fn response_after_defer_redirects_to_followup() {
        let recorder = Arc::new(Recorder::default());
        let mut responder = responder(&recorder);

        responder.acknowledge_deferred(MessageFlags::empty()).await.unwrap();
        let path = responder.respond_with_message(CreateEmbed::new().title("t")).await.unwrap();

        assert!(matches!(path, ResponsePath::Followup(_)));
        assert!(matches!(recorder.calls().last(), Some(Call::Followup(_))));
    }

    #[tokio::test]
    async fn rejected_initial_response_leaves_interaction_unacknowledged() {
        let recorder = Arc::new(Recorder {
            reject_initial: true,
            ..Default::default()
        });
        let mut responder = responder(&recorder);

        let result = responder.respond_with_message("hi").await;

        assert!(matches!(result, Err(Error::Http(ref e)) if e.status_code() == Some(400)));
        assert_eq!(responder.state(), AcknowledgementState::Unacknowledged);
        assert!(!responder.is_acknowledged());
        assert!(is_interaction_error(&responder.create_followup("hi").await, InteractionError::NotYetAcknowledged));
    }

    #[tokio::test]
    async fn followup_content_rules() {
        let recorder = Arc::new(Recorder::default());
        let mut responder = responder(&recorder);
        responder.acknowledge_deferred(MessageFlags::empty()).await.unwrap();

        let flags_only = InteractionContent::new().flags(MessageFlags::EPHEMERAL);
        let result = responder.create_followup(flags_only.clone()).await;
        assert!(is_interaction_error(&result, InteractionError::EmptyContent));

        let attachment_only = InteractionContent::new().attachment(CreateAttachment::new(0, "a.png"));
        responder.create_followup(attachment_only).await.unwrap();

        responder.edit_original_message(flags_only).await.unwrap();
        responder.delete_message(MessageTarget::Id(MessageId::new(7))).await.unwrap();
        responder.get_original_message().await.unwrap();

        assert_eq!(&recorder.calls()[1..], [
            Call::Followup(json!({"attachments": [{"id": "0", "filename": "a.png"}]})),
            Call::Edit(MessageTarget::Original, json!({"flags": 64})),
            Call::Delete(MessageTarget::Id(MessageId::new(7))),
            Call::Get(MessageTarget::Original),
        ]);
    }

    #[test]
    fn identity_debug_hides_token() {
        let identity = InteractionIdentity::new(
            InteractionId::new(1),
            ApplicationId::new(2),
            "very-secret",
            None,
            None,
        );

        assert!(!format!("{identity:?}").contains("very-secret"));
    }
}
