//! Request and response models for the MailPace send endpoint.

use crate::Result;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The message fields posted to MailPace.
///
/// Serialized with the field names and order the send endpoint expects:
/// `from`, `to`, `subject`, `textbody`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body. MailPace derives the HTML part from it.
    pub textbody: String,
}

impl Payload {
    /// Create a payload from its four fields.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        textbody: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            textbody: textbody.into(),
        }
    }
}

/// Body MailPace returns for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendReceipt {
    /// MailPace message id.
    pub id: u64,
    /// Delivery status, e.g. `queued`.
    pub status: String,
}

/// The HTTP response to a send request.
///
/// Returned as received: the status is not checked and the body is not
/// parsed unless the caller asks for it with [`Response::json`].
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Response {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Drain a reqwest response into an owned [`Response`].
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self::new(status, headers, body))
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailpace_client::{Client, Payload, SendReceipt};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailpace_client::Error> {
    /// let client = Client::from_env()?;
    /// let payload = Payload::new("a@example.com", "b@example.com", "Hi", "Hello");
    /// let response = client.send(&payload).await?;
    /// if response.is_success() {
    ///     let receipt: SendReceipt = response.json()?;
    ///     println!("{} {}", receipt.id, receipt.status);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}
