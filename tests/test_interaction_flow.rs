#![cfg(feature = "cache")]

use std::sync::{Arc, Mutex};

use interaction_responder::async_trait;
use interaction_responder::builder::{CreateEmbed, CreateInteractionResponse, InteractionContent};
use interaction_responder::cache::{Cache, EntityCache};
use interaction_responder::http::{InteractionHttp, MessageTarget};
use interaction_responder::json::{json, Value};
use interaction_responder::model::prelude::*;
use interaction_responder::resolver::Resolver;
use interaction_responder::responder::{AcknowledgementState, ResponsePath};
use interaction_responder::{Error, InteractionError, Result};

#[derive(Default)]
struct Transcript {
    requests: Mutex<Vec<(&'static str, Value)>>,
}

impl Transcript {
    fn push(&self, endpoint: &'static str, body: Value) -> Message {
        let mut requests = self.requests.lock().unwrap();
        requests.push((endpoint, body.clone()));

        serde_json::from_value(json!({
            "id": (500 + requests.len()).to_string(),
            "channel_id": "300",
            "author": {"id": "11", "username": "bot", "bot": true},
            "content": body.get("content").cloned().unwrap_or(json!("")),
            "timestamp": "2024-05-01T12:00:00+00:00",
        }))
        .unwrap()
    }

    fn endpoints(&self) -> Vec<&'static str> {
        self.requests.lock().unwrap().iter().map(|(e, _)| *e).collect()
    }
}

#[async_trait]
impl InteractionHttp for Transcript {
    async fn create_interaction_response(
        &self,
        _: InteractionId,
        _: &str,
        response: &CreateInteractionResponse,
    ) -> Result<()> {
        self.push("callback", serde_json::to_value(response)?);
        Ok(())
    }

    async fn create_followup_message(
        &self,
        _: ApplicationId,
        _: &str,
        content: &InteractionContent,
    ) -> Result<Message> {
        Ok(self.push("followup", serde_json::to_value(content)?))
    }

    async fn edit_followup_message(
        &self,
        _: ApplicationId,
        _: &str,
        _: MessageTarget,
        content: &InteractionContent,
    ) -> Result<Message> {
        Ok(self.push("edit", serde_json::to_value(content)?))
    }

    async fn delete_followup_message(
        &self,
        _: ApplicationId,
        _: &str,
        _: MessageTarget,
    ) -> Result<()> {
        self.push("delete", Value::Null);
        Ok(())
    }

    async fn get_followup_message(
        &self,
        _: ApplicationId,
        _: &str,
        _: MessageTarget,
    ) -> Result<Message> {
        Ok(self.push("get", Value::Null))
    }
}

fn payload() -> Value {
    json!({
        "id": "10",
        "application_id": "11",
        "type": 2,
        "token": "interaction-token",
        "guild_id": "100",
        "channel_id": "300",
        "member": {
            "user": {"id": "1", "username": "invoker"},
            "roles": [],
            "nick": "Inv",
        },
        "data": {
            "id": "12",
            "name": "warn",
            "type": 1,
            "options": [
                {"name": "target", "type": 6, "value": "2"},
                {"name": "reason", "type": 3, "value": "spam"},
            ],
            "resolved": {
                "users": {"2": {"id": "2", "username": "target"}},
                "members": {"2": {"roles": ["200"], "nick": "Tgt"}},
            },
        },
    })
}

fn setup() -> (Arc<Cache>, Resolver) {
    let cache = Arc::new(Cache::new());
    let guild: Guild = serde_json::from_value(json!({
        "id": "100",
        "name": "guild",
        "roles": [{"id": "200", "name": "mod", "permissions": "8"}],
    }))
    .unwrap();
    cache.insert_guild(guild);

    let resolver = Resolver::with_cache(Arc::clone(&cache));
    (cache, resolver)
}

#[test]
fn payload_is_hydrated_into_shared_records() {
    let (cache, resolver) = setup();

    let interaction = resolver.hydrate_value(payload()).unwrap();

    assert_eq!(interaction.data.name, "warn");
    assert!(interaction.data.resolved.is_complete());
    assert_eq!(interaction.member.as_ref().and_then(|m| m.nick()), Some("Inv"));

    let options = interaction.data.options();
    assert_eq!(options.len(), 2);
    match &options[0].value {
        ResolvedValue::User(user, Some(member)) => {
            assert_eq!(user.name, "target");
            assert_eq!(member.nick(), Some("Tgt"));
            assert_eq!(member.role_ids(), [RoleId::new(200)]);
            assert!(Arc::ptr_eq(user, &cache.user(UserId::new(2)).unwrap()));
        },
        other => panic!("unexpected option value {other:?}"),
    }
    assert!(matches!(options[1].value, ResolvedValue::String("spam")));

    assert_eq!(cache.user_count(), 2);
    assert_eq!(cache.member_count(), 2);
}

#[test]
fn second_interaction_reuses_cached_users() {
    let (cache, resolver) = setup();

    let first = resolver.hydrate_value(payload()).unwrap();
    let second = resolver.hydrate_value(payload()).unwrap();

    assert!(Arc::ptr_eq(&first.user, &second.user));
    assert_eq!(cache.user_count(), 2);
}

#[test]
fn token_is_not_printed() {
    let (_, resolver) = setup();

    let interaction = resolver.hydrate_value(payload()).unwrap();

    assert!(!format!("{interaction:?}").contains("interaction-token"));
    assert!(!format!("{:?}", interaction.identity()).contains("interaction-token"));
}

#[tokio::test]
async fn deferred_command_is_finished_with_followups() {
    let (_, resolver) = setup();
    let interaction = resolver.hydrate_value(payload()).unwrap();
    let transcript = Arc::new(Transcript::default());
    let mut responder = interaction.responder(Arc::clone(&transcript) as Arc<dyn InteractionHttp>);

    let early = responder.create_followup("too soon").await;
    assert!(matches!(early, Err(Error::Interaction(InteractionError::NotYetAcknowledged))));

    responder.acknowledge_deferred(MessageFlags::EPHEMERAL).await.unwrap();
    assert_eq!(responder.state(), AcknowledgementState::Acknowledged);

    let path = responder
        .respond_with_message(CreateEmbed::new().title("Warned").description("spam"))
        .await
        .unwrap();
    assert!(matches!(path, ResponsePath::Followup(_)));

    let followup = responder.create_followup("logged").await.unwrap();
    assert_eq!(followup.content, "logged");

    responder.edit_original_message("done").await.unwrap();
    responder.delete_message(followup.id.into()).await.unwrap();

    assert_eq!(transcript.endpoints(), ["callback", "followup", "followup", "edit", "delete"]);
    assert_eq!(transcript.requests.lock().unwrap()[0].1, json!({"type": 5, "data": {"flags": 64}}));
}

#[tokio::test]
async fn immediate_response_then_repeat() {
    let (_, resolver) = setup();
    let interaction = resolver.hydrate_value(payload()).unwrap();
    let transcript = Arc::new(Transcript::default());
    let mut responder = interaction.responder(Arc::clone(&transcript) as Arc<dyn InteractionHttp>);

    let empty = responder.respond_with_message("").await;
    assert!(matches!(empty, Err(Error::Interaction(InteractionError::EmptyContent))));
    assert!(transcript.endpoints().is_empty());

    let first = responder.respond_with_message("Warned <@2>").await.unwrap();
    assert!(matches!(first, ResponsePath::Initial));

    let defer = responder.acknowledge_deferred(MessageFlags::empty()).await;
    assert!(matches!(defer, Err(Error::Interaction(InteractionError::AlreadyAcknowledged))));

    let original = responder.get_original_message().await.unwrap();
    assert_eq!(original.channel_id, ChannelId::new(300));

    assert_eq!(transcript.endpoints(), ["callback", "get"]);
    assert_eq!(
        transcript.requests.lock().unwrap()[0].1,
        json!({"type": 4, "data": {"content": "Warned <@2>"}})
    );
}
