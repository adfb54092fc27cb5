//! # MailPace Client
//! Asynchronous wrapper around the MailPace transactional email API: one call, [`Client::send`], posts a [`Payload`] to the send endpoint and hands back the raw [`Response`].
//!
//! ## Audience and uses
//! For Rust services and scripts that need to fire off a single transactional email without running mail infrastructure: configure a [`Client`] with a server token (directly, via [`ClientBuilder`], or from `MAILPACE_SERVER_TOKEN`), build a [`Payload`], send it.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. A current-thread runtime is enough, since each send is a single awaited request.
//!
//! ## Out of scope
//! No retries, timeouts, rate limiting, batching, templates, or attachments. The response is returned as-is; a 4xx/5xx status is not an error.
//!
//! ## Errors
//! Transport failures surface as [`Error::Request`]; payload or response decoding issues become [`Error::Json`]. Token problems are reported as [`Error::InvalidToken`] or [`Error::MissingToken`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use mailpace_client::{Client, Payload};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), mailpace_client::Error> {
//!     let client = Client::from_env()?;
//!     let payload = Payload::new(
//!         "someone@example.com",
//!         "someone@example.org",
//!         "Hello from MailPace.com",
//!         "HTML Body is auto-generated",
//!     );
//!
//!     let response = client.send(&payload).await?;
//!     println!("{}: {}", response.status(), response.body());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;

pub use client::{BodyEncoding, Client, ClientBuilder};
pub use error::Error;
pub use models::{Payload, Response, SendReceipt};

/// Result type alias for MailPace operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
