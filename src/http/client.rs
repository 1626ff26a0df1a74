use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response as ReqwestResponse, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{ErrorResponse, HttpError, InteractionHttp, LightMethod, MessageTarget, Route};
use crate::builder::{CreateInteractionResponse, InteractionContent};
use crate::constants;
use crate::internal::prelude::*;
use crate::json::{decode_resp, to_vec};
use crate::model::channel::Message;
use crate::model::id::{ApplicationId, InteractionId};

/// A builder implementing [`Default`] to construct a [`Http`] client.
#[must_use]
#[derive(Default)]
pub struct HttpBuilder {
    client: Option<Client>,
    token: Option<SecretString>,
    proxy: Option<String>,
}

impl HttpBuilder {
    /// Construct a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bot token sent in the `Authorization` header.
    ///
    /// Interaction endpoints are authenticated by the interaction token, so this is optional.
    pub fn token(mut self, token: impl AsRef<str>) -> Self {
        let token = token.as_ref().trim();

        let token =
            if token.starts_with("Bot ") { token.to_string() } else { format!("Bot {token}") };

        self.token = Some(SecretString::new(token));
        self
    }

    /// Sets the [`reqwest::Client`]. If one isn't provided, a default one will be used.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the proxy that Discord HTTP API requests will be passed to. This is mainly intended
    /// for something like [`twilight-http-proxy`] where multiple processes can make API requests
    /// while sharing a single ratelimiter.
    ///
    /// The proxy should be in the form of the protocol and hostname, e.g.
    /// `http://127.0.0.1:3000` or `http://myproxy.example`
    ///
    /// This will simply send HTTP API requests to the proxy instead of Discord API to allow the
    /// proxy to intercept, rate limit, and forward requests. This is different than a native
    /// proxy's behavior where it will tunnel requests that use TLS via [`HTTP CONNECT`] method
    /// (e.g. using [`reqwest::Proxy`]).
    ///
    /// [`twilight-http-proxy`]: https://github.com/twilight-rs/http-proxy
    /// [`HTTP CONNECT`]: https://developer.mozilla.org/en-US/docs/Web/HTTP/Methods/CONNECT
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        let mut proxy = proxy.into();
        if !proxy.ends_with('/') {
            proxy.push('/');
        }

        self.proxy = Some(proxy);
        self
    }

    /// Use the given configuration to build the `Http` client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if no client was given and the default one can't be built.
    pub fn build(self) -> Result<Http> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder().build().map_err(HttpError::Request)?,
        };

        Ok(Http {
            client,
            token: self.token,
            proxy: self.proxy,
        })
    }
}

/// A low-level client for sending requests in reply to interactions.
///
/// **Note**: For all member functions that return a [`Result`], the Error kind will be either
/// [`Error::Http`] or [`Error::Json`].
pub struct Http {
    pub(crate) client: Client,
    token: Option<SecretString>,
    proxy: Option<String>,
}

impl std::fmt::Debug for Http {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Http")
            .field("client", &self.client)
            .field("proxy", &self.proxy)
            .finish_non_exhaustive()
    }
}

impl Http {
    /// Creates a client with default settings and no bot token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the default [`reqwest::Client`] can't be built.
    pub fn new() -> Result<Self> {
        HttpBuilder::new().build()
    }

    fn url(&self, route: Route<'_>) -> String {
        let path = route.path();
        match &self.proxy {
            Some(proxy) => path.replace("https://discord.com/", proxy),
            None => path,
        }
    }

    /// Performs a request, returning the raw response if its status is successful.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::UnsuccessfulRequest`] for a non-successful status, with the error
    /// body Discord sent. Returns [`HttpError::Request`] if the request couldn't be sent.
    #[instrument(skip(self, token, body))]
    pub async fn request(
        &self,
        method: LightMethod,
        route: Route<'_>,
        token: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ReqwestResponse> {
        let path = self.url(route);
        let url = Url::parse(&path).map_err(HttpError::Url)?;

        let mut builder = self
            .client
            .request(method.reqwest_method(), url)
            .header(USER_AGENT, constants::USER_AGENT);

        if let Some(bot_token) = &self.token {
            builder = builder.header(AUTHORIZATION, bot_token.expose_secret().as_str());
        }

        // Discord will return a 400: Bad Request response if we set the content type header,
        // but don't give a body.
        if let Some(bytes) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        let response = builder.send().await.map_err(HttpError::Request)?;
        debug!("{method:?} {} -> {}", route.name(), response.status());

        if response.status().is_success() {
            Ok(response)
        } else {
            let url = redact(&path, token);
            let error = ErrorResponse::from_response(response, method, url).await;
            Err(Error::Http(HttpError::UnsuccessfulRequest(error)))
        }
    }

    /// Performs a request and deserializes the response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the response body can't be deserialized into `T`, and the
    /// errors of [`Self::request`] otherwise.
    pub async fn fire<T: DeserializeOwned>(
        &self,
        method: LightMethod,
        route: Route<'_>,
        token: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let response = self.request(method, route, token, body).await?;
        decode_resp(response).await
    }

    /// Performs a request and then verifies that the response status code is equal to the
    /// expected value.
    ///
    /// This is a function that performs a light amount of work and returns an empty tuple, so
    /// it's called "self.wind" to denote that it's lightweight.
    pub(super) async fn wind(
        &self,
        expected: u16,
        method: LightMethod,
        route: Route<'_>,
        token: &str,
        body: Option<Vec<u8>>,
    ) -> Result<()> {
        let response = self.request(method, route, token, body).await?;

        if response.status().as_u16() == expected {
            return Ok(());
        }

        debug!("Expected {expected}, got {}", response.status());

        let url = redact(&self.url(route), token);
        let error = ErrorResponse::from_response(response, method, url).await;
        Err(Error::Http(HttpError::UnsuccessfulRequest(error)))
    }
}

fn redact(url: &str, token: &str) -> String {
    if token.is_empty() {
        url.to_string()
    } else {
        url.replace(token, "{token}")
    }
}

#[async_trait]
impl InteractionHttp for Http {
    async fn create_interaction_response(
        &self,
        interaction_id: InteractionId,
        token: &str,
        response: &CreateInteractionResponse,
    ) -> Result<()> {
        let route = Route::InteractionResponse {
            interaction_id,
            token,
        };
        self.wind(204, LightMethod::Post, route, token, Some(to_vec(response)?)).await
    }

    async fn create_followup_message(
        &self,
        application_id: ApplicationId,
        token: &str,
        content: &InteractionContent,
    ) -> Result<Message> {
        let route = Route::WebhookFollowupMessages {
            application_id,
            token,
        };
        self.fire(LightMethod::Post, route, token, Some(to_vec(content)?)).await
    }

    async fn edit_followup_message(
        &self,
        application_id: ApplicationId,
        token: &str,
        target: MessageTarget,
        content: &InteractionContent,
    ) -> Result<Message> {
        let route = Route::WebhookFollowupMessage {
            application_id,
            token,
            target,
        };
        self.fire(LightMethod::Patch, route, token, Some(to_vec(content)?)).await
    }

    async fn delete_followup_message(
        &self,
        application_id: ApplicationId,
        token: &str,
        target: MessageTarget,
    ) -> Result<()> {
        let route = Route::WebhookFollowupMessage {
            application_id,
            token,
            target,
        };
        self.wind(204, LightMethod::Delete, route, token, None).await
    }

    async fn get_followup_message(
        &self,
        application_id: ApplicationId,
        token: &str,
        target: MessageTarget,
    ) -> Result<Message> {
        let route = Route::WebhookFollowupMessage {
            application_id,
            token,
            target,
        };
        self.fire(LightMethod::Get, route, token, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_replaces_discord_host() {
        let http = HttpBuilder::new().proxy("http://127.0.0.1:3000").build().unwrap();
        let route = Route::WebhookFollowupMessages {
            application_id: ApplicationId::new(1),
            token: "tok",
        };

        assert_eq!(http.url(route), "http://127.0.0.1:3000/api/v10/webhooks/1/tok");
    }

    #[test]
    fn error_urls_are_redacted() {
        let url = "https://discord.com/api/v10/webhooks/1/tok/messages/@original";
        assert_eq!(redact(url, "tok"), "https://discord.com/api/v10/webhooks/1/{token}/messages/@original");
        assert_eq!(redact(url, ""), url);
    }

    #[test]
    fn bot_token_is_prefixed() {
        let http = HttpBuilder::new().token("abc").build().unwrap();
        assert_eq!(http.token.as_ref().map(|t| t.expose_secret().as_str()), Some("Bot abc"));
    }
}
