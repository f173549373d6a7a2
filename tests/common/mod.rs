#![allow(dead_code)]

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use secrecy::SecretString;
use signage_blacklist::{config::XmdsConfig, telemetry};
use std::time::Duration;
use tokio::sync::mpsc;

pub const SERVER_KEY: &str = "changetoyourkey";
pub const HARDWARE_KEY: &str = "3d9f0e2b6a1c";

const FAULT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body>
    <SOAP-ENV:Fault>
      <faultcode>Sender</faultcode>
      <faultstring>Server Key is not valid</faultstring>
    </SOAP-ENV:Fault>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

/// How the mock CMS answers `BlackList` calls
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Success,
    Rejected,
    Fault,
    BadGateway,
}

/// A request received by the mock CMS
#[derive(Debug)]
pub struct RecordedRequest {
    pub soap_action: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    requests: mpsc::UnboundedSender<RecordedRequest>,
}

/// Spawns a mock XMDS endpoint on a random port and returns its URL together
/// with a receiver for the requests it handled.
pub async fn spawn_xmds(reply: Reply) -> (String, mpsc::UnboundedReceiver<RecordedRequest>) {
    telemetry::init_tracing();

    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route("/xmds.php", post(black_list))
        .with_state(MockState {
            reply,
            requests: tx,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("failed to run mock xmds");
    });

    (format!("http://{addr}/xmds.php?v=5"), rx)
}

/// Waits for the next request the mock CMS handled, failing after a few
/// seconds instead of hanging when none arrives.
pub async fn next_request(requests: &mut mpsc::UnboundedReceiver<RecordedRequest>) -> RecordedRequest {
    tokio::time::timeout(Duration::from_secs(10), requests.recv())
        .await
        .expect("no request reached the mock CMS")
        .expect("mock CMS stopped")
}

/// A URL nothing listens on
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/xmds.php?v=5")
}

pub fn xmds_config(url: String) -> XmdsConfig {
    XmdsConfig {
        url,
        server_key: SecretString::from(SERVER_KEY.to_string()),
        hardware_key: HARDWARE_KEY.to_string(),
        version: "4".to_string(),
        timeout_secs: 5,
    }
}

async fn black_list(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let _ = state.requests.send(RecordedRequest {
        soap_action: header("soapaction"),
        content_type: header("content-type"),
        body,
    });

    match state.reply {
        Reply::Success => (StatusCode::OK, response("true")),
        Reply::Rejected => (StatusCode::OK, response("false")),
        Reply::Fault => (StatusCode::INTERNAL_SERVER_ERROR, FAULT.to_string()),
        Reply::BadGateway => (StatusCode::BAD_GATEWAY, "upstream unavailable".to_string()),
    }
}

fn response(success: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns1="urn:xmds">
  <SOAP-ENV:Body>
    <ns1:BlackListResponse><success>{success}</success></ns1:BlackListResponse>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
    )
}
