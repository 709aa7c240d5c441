//! Agent socket client behavior against an in-process agent.

#![cfg(unix)]

use std::path::Path;
use std::sync::Arc;

use dial_protocol::{AgentRequest, AgentResponse};
use dial_runtime::{AgentClient, AgentSocketClient, TransportError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tokio::sync::Mutex;

/// Minimal display agent: answers every connection with a canned response and
/// records what it was asked.
struct FakeAgent {
	requests: Arc<Mutex<Vec<AgentRequest>>>,
}

impl FakeAgent {
	fn serve(socket_path: &Path, current_resource: &str) -> Arc<Mutex<Vec<AgentRequest>>> {
		let listener = UnixListener::bind(socket_path).unwrap();
		let requests = Arc::new(Mutex::new(Vec::new()));
		let agent = FakeAgent { requests: requests.clone() };
		let current = current_resource.to_string();

		tokio::spawn(async move {
			while let Ok((stream, _)) = listener.accept().await {
				let mut reader = BufReader::new(stream);
				let mut line = String::new();
				if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
					continue;
				}
				let request: AgentRequest = serde_json::from_str(&line).unwrap();
				let response = match &request {
					AgentRequest::GetCurrentResource => AgentResponse::CurrentResource { locator: current.clone() },
					AgentRequest::OpenLayer { .. } => AgentResponse::Layer { layer: 7 },
					AgentRequest::LoadResource { locator } if locator.contains("forbidden") => {
						AgentResponse::Error { code: "refused".into(), message: "no".into() }
					}
					_ => AgentResponse::Ok,
				};
				agent.requests.lock().await.push(request);
				let mut stream = reader.into_inner();
				let payload = serde_json::to_string(&response).unwrap();
				let _ = stream.write_all(format!("{payload}\n").as_bytes()).await;
			}
		});

		requests
	}
}

#[tokio::test]
async fn load_resource_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let socket = dir.path().join("agent.sock");
	let requests = FakeAgent::serve(&socket, "about:blank");

	let client = AgentSocketClient::new(&socket);
	client.load_resource("https://www.youtube.com/tv?v=1").await.unwrap();

	let seen = requests.lock().await;
	assert_eq!(seen.len(), 1);
	assert_eq!(seen[0], AgentRequest::LoadResource { locator: "https://www.youtube.com/tv?v=1".into() });
}

#[tokio::test]
async fn get_current_resource_returns_agent_view() {
	let dir = tempfile::tempdir().unwrap();
	let socket = dir.path().join("agent.sock");
	FakeAgent::serve(&socket, "https://www.youtube.com/tv?v=9");

	let client = AgentSocketClient::new(&socket);
	let current = client.get_current_resource().await.unwrap();
	assert_eq!(current, "https://www.youtube.com/tv?v=9");
}

#[tokio::test]
async fn agent_error_response_surfaces_as_transport_error() {
	let dir = tempfile::tempdir().unwrap();
	let socket = dir.path().join("agent.sock");
	FakeAgent::serve(&socket, "about:blank");

	let client = AgentSocketClient::new(&socket);
	let err = client.load_resource("https://forbidden.example/").await.unwrap_err();
	assert!(matches!(err, TransportError::Agent { ref code, .. } if code == "refused"));
}

#[tokio::test]
async fn missing_socket_is_an_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let client = AgentSocketClient::new(dir.path().join("nobody-home.sock"));
	let err = client.get_current_resource().await.unwrap_err();
	assert!(matches!(err, TransportError::Io(_)));
}

#[tokio::test]
async fn layer_extension_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let socket = dir.path().join("agent.sock");
	let requests = FakeAgent::serve(&socket, "about:blank");

	let client = AgentSocketClient::new(&socket);
	let layer = client.open_layer(80, true, &["f4".to_string()]).await.unwrap();
	assert_eq!(layer, 7);
	client.set_layer_resource(layer, "https://www.youtube.com/tv").await.unwrap();
	client.close_layer(layer).await.unwrap();

	let seen = requests.lock().await;
	assert_eq!(seen.len(), 3);
	assert!(matches!(seen[2], AgentRequest::CloseLayer { layer: 7 }));
}
