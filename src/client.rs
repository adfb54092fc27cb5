//! MailPace async client implementation.

use crate::{Error, Payload, Response, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use tracing::{debug, warn};

const SEND_URL: &str = "https://app.mailpace.com/api/v1/send";
const TOKEN_HEADER: HeaderName = HeaderName::from_static("mailpace-server-token");
const TOKEN_ENV: &str = "MAILPACE_SERVER_TOKEN";

/// How the [`Payload`] is encoded into the request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyEncoding {
    /// The payload as a single JSON object. This is what the API documents.
    #[default]
    Object,
    /// The payload serialized to a JSON string, then serialized again.
    ///
    /// The body on the wire is a JSON string literal whose content is the
    /// payload object. Use only when byte-level parity with legacy senders
    /// that posted this shape is required.
    DoubleEncoded,
}

impl BodyEncoding {
    /// Encode a payload into the bytes sent as the request body.
    ///
    /// Fields keep the `from`, `to`, `subject`, `textbody` order in both
    /// encodings.
    pub fn encode(self, payload: &Payload) -> Result<Vec<u8>> {
        match self {
            Self::Object => Ok(serde_json::to_vec(payload)?),
            Self::DoubleEncoded => Ok(serde_json::to_vec(&serde_json::to_string(payload)?)?),
        }
    }
}

/// Async client for the MailPace send endpoint.
///
/// Use [`Client::new`] with a server token, [`Client::from_env`], or
/// [`Client::builder`] to override the endpoint, encoding, or proxy.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    headers: HeaderMap,
    send_url: String,
    body_encoding: BodyEncoding,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(token)
    }

    /// Create a client with default settings.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailpace_client::Client;
    /// let client = Client::new("my-server-token")?;
    /// # Ok::<(), mailpace_client::Error>(())
    /// ```
    pub fn new(token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(token).build()
    }

    /// Create a client with the token read from `MAILPACE_SERVER_TOKEN`.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build()
    }

    /// Endpoint this client posts to.
    pub fn send_url(&self) -> &str {
        &self.send_url
    }

    /// Body encoding used for every send.
    pub fn body_encoding(&self) -> BodyEncoding {
        self.body_encoding
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Send one email.
    ///
    /// Issues a single POST and returns the response as received. A non-2xx
    /// status is still `Ok`; inspect [`Response::status`]. Transport failures
    /// are returned as [`Error::Request`]. Nothing is retried.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailpace_client::{Client, Payload};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailpace_client::Error> {
    /// let client = Client::new("my-server-token")?;
    /// let payload = Payload::new(
    ///     "sender@example.com",
    ///     "recipient@example.com",
    ///     "Hello from MailPace.com",
    ///     "HTML Body is auto-generated",
    /// );
    /// let response = client.send(&payload).await?;
    /// println!("{}", response.status());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send(&self, payload: &Payload) -> Result<Response> {
        let body = self.body_encoding.encode(payload)?;

        debug!(
            to = %payload.to,
            subject = %payload.subject,
            encoding = ?self.body_encoding,
            "Sending email via MailPace"
        );

        let response = self
            .http
            .post(&self.send_url)
            .headers(self.headers().clone())
            .body(body)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "MailPace request failed"))?;

        let response = Response::read(response).await?;
        debug!(status = %response.status(), "MailPace responded");
        Ok(response)
    }

    /// The three headers attached to every send request.
    pub(crate) fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn token_from(value: Option<String>) -> Result<String> {
    value
        .filter(|token| !token.trim().is_empty())
        .ok_or(Error::MissingToken)
}

fn build_headers(token: &str) -> Result<HeaderMap> {
    let mut token = HeaderValue::from_str(token).map_err(|_| Error::InvalidToken)?;
    token.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(TOKEN_HEADER, token);
    Ok(headers)
}

/// Builder for configuring a MailPace client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Clone)]
pub struct ClientBuilder {
    token: String,
    send_url: String,
    body_encoding: BodyEncoding,
    proxy: Option<String>,
    user_agent: Option<String>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("token", &"<redacted>")
            .field("send_url", &self.send_url)
            .field("body_encoding", &self.body_encoding)
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - MailPace production send endpoint
    /// - [`BodyEncoding::Object`]
    /// - No proxy
    /// - reqwest's default user agent (none)
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            send_url: SEND_URL.to_string(),
            body_encoding: BodyEncoding::default(),
            proxy: None,
            user_agent: None,
        }
    }

    /// Create a builder with the token read from `MAILPACE_SERVER_TOKEN`.
    ///
    /// Fails with [`Error::MissingToken`] if the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_token_var(std::env::var(TOKEN_ENV).ok())
    }

    fn from_token_var(value: Option<String>) -> Result<Self> {
        token_from(value).map(Self::new)
    }

    /// Override the send endpoint URL.
    ///
    /// Useful for testing against a mock server.
    pub fn send_url(mut self, send_url: impl Into<String>) -> Self {
        self.send_url = send_url.into();
        self
    }

    /// Choose how the payload is encoded on the wire.
    pub fn body_encoding(mut self, body_encoding: BodyEncoding) -> Self {
        self.body_encoding = body_encoding;
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:1080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set a user agent for the underlying HTTP client.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    ///
    /// No network traffic happens here. Fails if the token is not a valid
    /// header value or the proxy URL cannot be parsed.
    pub fn build(self) -> Result<Client> {
        let headers = build_headers(&self.token)?;

        // No timeout: a send waits for the server or the transport to give up.
        let mut builder = reqwest::Client::builder();

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(Client {
            http: builder.build()?,
            headers,
            send_url: self.send_url,
            body_encoding: self.body_encoding,
            proxy: self.proxy,
        })
    }
}
