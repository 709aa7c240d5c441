//! Immutable server configuration handed in by the bootstrap layer.

use std::path::PathBuf;

/// Startup configuration for the responder.
///
/// Collected once by the CLI layer and passed through; the core never reads
/// flags or environment on its own. `friendly_name`, `model_name`, and `uuid`
/// are pass-through identity for the discovery announcer.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	/// Data directory exposed to spawned applications.
	pub data_dir: PathBuf,
	/// Executable launched for process-hosted applications.
	pub executable: PathBuf,
	pub friendly_name: String,
	pub model_name: String,
	pub uuid: String,
	/// Whether the device advertises wake-on-network support.
	pub wake_on_network: bool,
	/// Display-agent control socket.
	pub agent_socket: PathBuf,
	/// Local lifecycle control socket served in serve mode.
	pub control_socket: PathBuf,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			data_dir: PathBuf::from("/var/lib/dial"),
			executable: PathBuf::from("/usr/lib/dial/app"),
			friendly_name: "DIAL server sample".into(),
			model_name: "NOT A VALID MODEL NAME".into(),
			uuid: "deadbeef-dead-beef-dead-beefdeadbeef".into(),
			wake_on_network: true,
			agent_socket: PathBuf::from("/run/dial/agent.sock"),
			control_socket: PathBuf::from("/run/dial/control.sock"),
		}
	}
}
