//! Resident serve mode: the lifecycle control socket.
//!
//! Serves the four lifecycle operations as JSON lines on a unix socket. This
//! is the binding point the protocol engine attaches to; every failure is
//! resolved here into the engine vocabulary, so a connected client only ever
//! sees states and coded errors, never a crash.

use std::sync::Arc;

use anyhow::Context;
use dial::{AgentDispatchMode, DialError, LifecycleController, ServerConfig};
use dial_protocol::{ControlRequest, ControlResponse, LaunchRequest};
use tracing::{debug, info, warn};

use crate::apps;

pub async fn run(config: ServerConfig, mode: AgentDispatchMode) -> anyhow::Result<()> {
	use tokio::net::UnixListener;

	let controller = Arc::new(apps::build_controller(&config, mode));

	dial_runtime::supervision::ignore_termination_requests().context("installing keep-alive signal policy")?;

	// One probe per app at startup so the log shows what the display agent
	// and process table already have running.
	for app in controller.app_names() {
		match controller.status(&app).await {
			Ok(report) => info!(target = "dial", app = %app, state = %report.state, "startup probe"),
			Err(err) => warn!(target = "dial", app = %app, error = %err, "startup probe failed"),
		}
	}

	if config.control_socket.exists() {
		std::fs::remove_file(&config.control_socket)
			.with_context(|| format!("removing stale control socket {}", config.control_socket.display()))?;
	}
	if let Some(parent) = config.control_socket.parent() {
		std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
	}
	let listener = UnixListener::bind(&config.control_socket)
		.with_context(|| format!("binding control socket {}", config.control_socket.display()))?;
	info!(
		target = "dial",
		socket = %config.control_socket.display(),
		friendly_name = %config.friendly_name,
		uuid = %config.uuid,
		wake_on_network = config.wake_on_network,
		"lifecycle control socket ready"
	);

	serve_on(listener, controller).await
}

/// Accept loop over an already-bound listener. Split out so tests can drive
/// it against a scratch socket.
pub async fn serve_on(listener: tokio::net::UnixListener, controller: Arc<LifecycleController>) -> anyhow::Result<()> {
	loop {
		let (stream, _) = listener.accept().await.context("accepting control connection")?;
		let controller = controller.clone();
		tokio::spawn(async move {
			handle_connection(stream, controller).await;
		});
	}
}

async fn handle_connection(stream: tokio::net::UnixStream, controller: Arc<LifecycleController>) {
	use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

	let (read, mut write) = stream.into_split();
	let mut lines = BufReader::new(read).lines();

	while let Ok(Some(line)) = lines.next_line().await {
		if line.trim().is_empty() {
			continue;
		}
		let response = match serde_json::from_str::<ControlRequest>(&line) {
			Ok(request) => handle_request(&controller, request).await,
			Err(err) => {
				debug!(target = "dial", error = %err, "unparseable control request");
				ControlResponse::Error { code: "bad_request".into(), message: err.to_string() }
			}
		};

		let payload = match serde_json::to_string(&response) {
			Ok(payload) => payload,
			Err(err) => {
				warn!(target = "dial", error = %err, "failed to serialize control response");
				break;
			}
		};
		if write.write_all(format!("{payload}\n").as_bytes()).await.is_err() {
			break;
		}
		if write.flush().await.is_err() {
			break;
		}
	}
}

async fn handle_request(controller: &LifecycleController, request: ControlRequest) -> ControlResponse {
	match request {
		ControlRequest::Ping => ControlResponse::Pong,
		ControlRequest::Start { app, payload, additional_data_url } => {
			let request = LaunchRequest { payload, additional_data_url };
			match controller.start(&app, &request).await {
				Ok(outcome) => ControlResponse::Started { state: outcome.state, run_handle: outcome.run_handle },
				Err(err) => error_response(&app, "start", err),
			}
		}
		ControlRequest::Status { app } => match controller.status(&app).await {
			Ok(report) => ControlResponse::Status { state: report.state, can_stop: report.can_stop },
			Err(err) => error_response(&app, "status", err),
		},
		ControlRequest::Hide { app } => match controller.hide(&app).await {
			Ok(state) => ControlResponse::State { state },
			Err(err) => error_response(&app, "hide", err),
		},
		ControlRequest::Stop { app } => match controller.stop(&app).await {
			Ok(()) => ControlResponse::Ok,
			Err(err) => error_response(&app, "stop", err),
		},
	}
}

fn error_response(app: &str, operation: &str, err: DialError) -> ControlResponse {
	let code = match &err {
		DialError::UnknownApp(_) => "unknown_app",
		DialError::PayloadTooLarge { .. } => "payload_too_large",
		DialError::SpawnFailure { .. } => "spawn_failure",
		DialError::TransportFailure(_) => "transport_failure",
		DialError::PatternError { .. } => "pattern_error",
		DialError::Io(_) => "io",
	};
	warn!(target = "dial", app, operation, code, error = %err, "lifecycle operation failed");
	ControlResponse::Error { code: code.into(), message: err.to_string() }
}
