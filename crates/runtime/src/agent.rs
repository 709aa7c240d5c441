//! JSON-line client for the display-agent control channel.
//!
//! The agent owns the rendering surface and outlives any individual launch.
//! Each call opens a fresh connection, writes one request line, and (except
//! for notifications) reads one response line. Failures surface as
//! [`TransportError`]; callers decide whether that means "not active" or a
//! logged dispatch failure - it is never fatal to the server.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dial_protocol::{AgentRequest, AgentResponse};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
#[cfg(unix)]
use tokio::net::UnixStream;
use tracing::trace;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error("agent connection failed: {0}")]
	Io(#[from] std::io::Error),
	#[error("agent protocol violation: {0}")]
	Protocol(String),
	#[error("agent refused request ({code}): {message}")]
	Agent { code: String, message: String },
}

/// Remote surface of the display agent.
///
/// Passed into the lifecycle controller at construction; there is no shared
/// process-wide agent handle.
#[async_trait]
pub trait AgentClient: Send + Sync {
	/// Display `locator` on the main surface.
	async fn load_resource(&self, locator: &str) -> Result<(), TransportError>;

	/// Locator of the currently displayed resource.
	async fn get_current_resource(&self) -> Result<String, TransportError>;

	/// One-way start notification; the agent performs the navigation itself.
	async fn notify_start_requested(&self, app: &str, payload: &str, additional_data_url: &str) -> Result<(), TransportError>;

	/// One-way stop notification.
	async fn notify_stop_requested(&self, app: &str) -> Result<(), TransportError>;

	/// Opens a composition layer. Extension surface; unused by the default
	/// lifecycle path.
	async fn open_layer(&self, z_order: i32, forward_input: bool, forward_keys: &[String]) -> Result<i64, TransportError>;

	/// Closes a composition layer.
	async fn close_layer(&self, layer: i64) -> Result<(), TransportError>;

	/// Points a composition layer at a resource.
	async fn set_layer_resource(&self, layer: i64, locator: &str) -> Result<(), TransportError>;
}

/// [`AgentClient`] over a unix-domain socket speaking JSON lines.
#[derive(Debug, Clone)]
pub struct AgentSocketClient {
	socket_path: PathBuf,
}

impl AgentSocketClient {
	pub fn new(socket_path: impl Into<PathBuf>) -> Self {
		Self { socket_path: socket_path.into() }
	}

	pub fn socket_path(&self) -> &Path {
		&self.socket_path
	}

	#[cfg(unix)]
	async fn request(&self, request: &AgentRequest) -> Result<AgentResponse, TransportError> {
		let mut stream = UnixStream::connect(&self.socket_path).await?;
		let payload = serde_json::to_string(request).map_err(|e| TransportError::Protocol(e.to_string()))?;
		trace!(target = "dial.agent", request = %payload, "sending agent request");
		stream.write_all(format!("{payload}\n").as_bytes()).await?;
		stream.flush().await?;

		let mut reader = BufReader::new(stream);
		let mut line = String::new();
		let read = reader.read_line(&mut line).await?;
		if read == 0 {
			return Err(TransportError::Protocol("agent closed the connection without answering".into()));
		}
		let response = serde_json::from_str(&line).map_err(|e| TransportError::Protocol(e.to_string()))?;
		match response {
			AgentResponse::Error { code, message } => Err(TransportError::Agent { code, message }),
			other => Ok(other),
		}
	}

	/// Fire-and-forget: write the request line and hang up without waiting.
	#[cfg(unix)]
	async fn notify(&self, request: &AgentRequest) -> Result<(), TransportError> {
		let mut stream = UnixStream::connect(&self.socket_path).await?;
		let payload = serde_json::to_string(request).map_err(|e| TransportError::Protocol(e.to_string()))?;
		trace!(target = "dial.agent", request = %payload, "sending agent notification");
		stream.write_all(format!("{payload}\n").as_bytes()).await?;
		stream.flush().await?;
		Ok(())
	}

	#[cfg(not(unix))]
	async fn request(&self, _request: &AgentRequest) -> Result<AgentResponse, TransportError> {
		Err(TransportError::Protocol("agent socket transport requires unix-domain sockets".into()))
	}

	#[cfg(not(unix))]
	async fn notify(&self, _request: &AgentRequest) -> Result<(), TransportError> {
		Err(TransportError::Protocol("agent socket transport requires unix-domain sockets".into()))
	}
}

#[async_trait]
impl AgentClient for AgentSocketClient {
	async fn load_resource(&self, locator: &str) -> Result<(), TransportError> {
		match self.request(&AgentRequest::LoadResource { locator: locator.to_string() }).await? {
			AgentResponse::Ok => Ok(()),
			other => Err(TransportError::Protocol(format!("unexpected response to load_resource: {other:?}"))),
		}
	}

	async fn get_current_resource(&self) -> Result<String, TransportError> {
		match self.request(&AgentRequest::GetCurrentResource).await? {
			AgentResponse::CurrentResource { locator } => Ok(locator),
			other => Err(TransportError::Protocol(format!("unexpected response to get_current_resource: {other:?}"))),
		}
	}

	async fn notify_start_requested(&self, app: &str, payload: &str, additional_data_url: &str) -> Result<(), TransportError> {
		self.notify(&AgentRequest::NotifyStartRequested {
			app: app.to_string(),
			payload: payload.to_string(),
			additional_data_url: additional_data_url.to_string(),
		})
		.await
	}

	async fn notify_stop_requested(&self, app: &str) -> Result<(), TransportError> {
		self.notify(&AgentRequest::NotifyStopRequested { app: app.to_string() }).await
	}

	async fn open_layer(&self, z_order: i32, forward_input: bool, forward_keys: &[String]) -> Result<i64, TransportError> {
		let request = AgentRequest::OpenLayer { z_order, forward_input, forward_keys: forward_keys.to_vec() };
		match self.request(&request).await? {
			AgentResponse::Layer { layer } => Ok(layer),
			other => Err(TransportError::Protocol(format!("unexpected response to open_layer: {other:?}"))),
		}
	}

	async fn close_layer(&self, layer: i64) -> Result<(), TransportError> {
		match self.request(&AgentRequest::CloseLayer { layer }).await? {
			AgentResponse::Ok => Ok(()),
			other => Err(TransportError::Protocol(format!("unexpected response to close_layer: {other:?}"))),
		}
	}

	async fn set_layer_resource(&self, layer: i64, locator: &str) -> Result<(), TransportError> {
		let request = AgentRequest::SetLayerResource { layer, locator: locator.to_string() };
		match self.request(&request).await? {
			AgentResponse::Ok => Ok(()),
			other => Err(TransportError::Protocol(format!("unexpected response to set_layer_resource: {other:?}"))),
		}
	}
}
