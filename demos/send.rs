//! Send one email through MailPace.
//!
//! Reads `MAILPACE_SERVER_TOKEN`, `MAILPACE_FROM` and `MAILPACE_TO` from the
//! environment (a `.env` file is loaded if present). Set
//! `MAILPACE_DOUBLE_ENCODE=1` to post the payload as a JSON string instead of
//! an object.
//!
//! ```sh
//! RUST_LOG=mailpace_client=debug cargo run --example send
//! ```

use mailpace_client::{BodyEncoding, ClientBuilder, Payload};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let from = std::env::var("MAILPACE_FROM")?;
    let to = std::env::var("MAILPACE_TO")?;

    let encoding = match std::env::var("MAILPACE_DOUBLE_ENCODE").as_deref() {
        Ok("1") | Ok("true") => BodyEncoding::DoubleEncoded,
        _ => BodyEncoding::Object,
    };

    let client = ClientBuilder::from_env()?.body_encoding(encoding).build()?;

    let payload = Payload::new(
        from,
        to,
        "Hello from MailPace.com",
        "HTML Body is auto-generated",
    );

    let response = client.send(&payload).await?;
    println!("{} {}", response.status(), response.body());

    Ok(())
}
