use mailpace_client::{Client, Error, Payload};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const TOKEN: &str = "wire-token";

fn payload() -> Payload {
    Payload::new("a\"@x", "b@y", "s\n", "t")
}

/// Accept one connection, read a full request, answer 200 and return the raw request.
async fn capture_request(listener: TcpListener) -> String {
    let (mut stream, _) = listener.accept().await.unwrap();
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .map(|(_, value)| value.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }

    stream
        .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
        .await
        .unwrap();
    String::from_utf8(buf).unwrap()
}

fn header_names(request: &str) -> Vec<String> {
    let (head, _) = request.split_once("\r\n\r\n").unwrap();
    head.lines()
        .skip(1)
        .map(|line| line.split_once(':').unwrap().0.to_ascii_lowercase())
        .collect()
}

async fn send_and_capture(client_for: impl FnOnce(String) -> Client) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/v1/send", listener.local_addr().unwrap());
    let server = tokio::spawn(capture_request(listener));

    let response = client_for(url).send(&payload()).await.unwrap();
    assert!(response.is_success());
    server.await.unwrap()
}

#[tokio::test]
async fn default_request_carries_only_the_fixed_headers() {
    let request =
        send_and_capture(|url| Client::builder(TOKEN).send_url(url).build().unwrap()).await;

    assert!(request.starts_with("POST /api/v1/send HTTP/1.1\r\n"));

    let mut names = header_names(&request);
    names.sort();
    assert_eq!(
        names,
        [
            "accept",
            "content-length",
            "content-type",
            "host",
            "mailpace-server-token",
        ]
    );
    assert!(request.contains("accept: application/json\r\n"));
    assert!(request.contains("content-type: application/json\r\n"));
    assert!(request.contains(&format!("mailpace-server-token: {TOKEN}\r\n")));
}

#[tokio::test]
async fn object_body_keeps_field_order_on_the_wire() {
    let request =
        send_and_capture(|url| Client::builder(TOKEN).send_url(url).build().unwrap()).await;

    let (_, body) = request.split_once("\r\n\r\n").unwrap();
    assert_eq!(
        body,
        r#"{"from":"a\"@x","to":"b@y","subject":"s\n","textbody":"t"}"#
    );
}

#[tokio::test]
async fn configured_user_agent_is_the_only_extra_header() {
    let request = send_and_capture(|url| {
        Client::builder(TOKEN)
            .send_url(url)
            .user_agent("mailpace-tests/1.0")
            .build()
            .unwrap()
    })
    .await;

    let names = header_names(&request);
    assert_eq!(names.iter().filter(|n| *n == "user-agent").count(), 1);
    assert_eq!(names.len(), 6);
}

#[tokio::test]
async fn dropped_connection_fails_after_a_single_attempt() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/v1/send", listener.local_addr().unwrap());
    let accepts = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&accepts);
    let server = tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            counter.fetch_add(1, Ordering::SeqCst);
            drop(stream);
        }
    });

    let client = Client::builder(TOKEN).send_url(url).build().unwrap();
    let result = client.send(&payload()).await;

    assert!(matches!(result, Err(Error::Request(_))));
    assert_eq!(accepts.load(Ordering::SeqCst), 1);
    server.abort();
}

#[tokio::test]
async fn refused_connection_is_surfaced() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let client = Client::builder(TOKEN)
        .send_url(format!("http://{addr}/api/v1/send"))
        .build()
        .unwrap();

    match client.send(&payload()).await {
        Err(Error::Request(err)) => assert!(err.is_connect()),
        other => panic!("expected a connect error, got {other:?}"),
    }
}
