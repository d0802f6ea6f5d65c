use aceest_fitness::web::{serve_on, AppState};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

async fn send_raw(
    addr: std::net::SocketAddr,
    method: &str,
    path: &str,
    content_type: Option<&str>,
    body: &str,
) -> (u16, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let content_type = content_type
        .map(|v| format!("Content-Type: {v}\r\n"))
        .unwrap_or_default();
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n{content_type}Content-Length: {}\r\n\r\n{body}",
        body.len()
    );
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, body.to_string())
}

async fn spawn_server() -> (std::net::SocketAddr, CancellationToken) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        serve_on(listener, AppState::new(), shutdown)
            .await
            .expect("serve app")
    });
    (addr, token)
}

async fn view(addr: std::net::SocketAddr) -> Value {
    let (status, body) = send_raw(addr, "GET", "/view", None, "").await;
    assert_eq!(status, 200);
    serde_json::from_str(&body).expect("view json")
}

#[tokio::test]
async fn home_returns_welcome_message() {
    let (addr, token) = spawn_server().await;

    let (status, body) = send_raw(addr, "GET", "/", None, "").await;
    assert_eq!(status, 200);
    let body: Value = serde_json::from_str(&body).expect("home json");
    assert_eq!(body, json!({"message": "Welcome to ACEest Fitness Web API"}));

    token.cancel();
}

#[tokio::test]
async fn add_then_view_returns_posted_record() {
    let (addr, token) = spawn_server().await;
    assert_eq!(view(addr).await, json!([]));

    let (status, body) = send_raw(
        addr,
        "POST",
        "/add",
        Some("application/json"),
        r#"{"exercise": "Push-ups", "duration": 15}"#,
    )
    .await;
    assert_eq!(status, 201);
    let body: Value = serde_json::from_str(&body).expect("add json");
    assert_eq!(body["message"], "Workout added successfully");

    assert_eq!(
        view(addr).await,
        json!([{"exercise": "Push-ups", "duration": 15}])
    );

    token.cancel();
}

#[tokio::test]
async fn records_keep_insertion_order() {
    let (addr, token) = spawn_server().await;
    for body in [
        r#"{"workout": "Squats", "duration": 20}"#,
        r#"{"workout": "Plank", "duration": 5, "category": "Cool-down"}"#,
    ] {
        let (status, _) = send_raw(addr, "POST", "/add", Some("application/json"), body).await;
        assert_eq!(status, 201);
    }

    assert_eq!(
        view(addr).await,
        json!([
            {"workout": "Squats", "duration": 20},
            {"workout": "Plank", "duration": 5, "category": "Cool-down"}
        ])
    );

    token.cancel();
}

#[tokio::test]
async fn malformed_body_is_rejected_and_store_unchanged() {
    let (addr, token) = spawn_server().await;

    let (status, _) = send_raw(
        addr,
        "POST",
        "/add",
        Some("application/json"),
        "not json at all",
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = send_raw(addr, "POST", "/add", Some("text/plain"), "hello").await;
    assert_eq!(status, 415);

    assert_eq!(view(addr).await, json!([]));

    token.cancel();
}

#[tokio::test]
async fn wrong_method_and_unknown_path() {
    let (addr, token) = spawn_server().await;

    let (status, _) = send_raw(addr, "GET", "/add", None, "").await;
    assert_eq!(status, 405);

    let (status, _) = send_raw(addr, "GET", "/missing", None, "").await;
    assert_eq!(status, 404);

    token.cancel();
}
