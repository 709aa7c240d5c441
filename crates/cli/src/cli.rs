use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "diald")]
#[command(about = "DIAL second-screen application lifecycle controller")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Display-agent control socket
	#[arg(long, global = true, value_name = "PATH", default_value = "/run/dial/agent.sock")]
	pub agent_socket: PathBuf,

	/// Forward launches as one-way notifications instead of direct loads
	#[arg(long, global = true)]
	pub agent_notify: bool,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Launch an application with client-supplied parameters
	Start {
		app: String,
		#[arg(default_value = "")]
		payload: String,
		#[arg(default_value = "")]
		additional_data_url: String,
	},

	/// Probe an application's run state and can-stop capability
	Status { app: String },

	/// Probe run state under the protocol's hide verb
	Hide { app: String },

	/// Return an active application's display to idle
	Stop { app: String },

	/// Stay resident and serve lifecycle requests on the control socket
	Serve {
		/// Data directory exposed to spawned applications
		#[arg(long, value_name = "DIR", default_value = "/var/lib/dial")]
		data_dir: PathBuf,

		/// Executable launched for process-hosted applications
		#[arg(long, value_name = "PATH", default_value = "/usr/lib/dial/app")]
		executable: PathBuf,

		/// Human-friendly device name announced to clients
		#[arg(long, default_value = "DIAL server sample")]
		friendly_name: String,

		/// Model name announced to clients
		#[arg(long, default_value = "NOT A VALID MODEL NAME")]
		model_name: String,

		/// Device UUID announced to clients
		#[arg(long, default_value = "deadbeef-dead-beef-dead-beefdeadbeef")]
		uuid: String,

		/// Advertise wake-on-network support
		#[arg(long, value_enum, default_value = "on")]
		wake: WakeSetting,

		/// Lifecycle control socket path
		#[arg(long, value_name = "PATH", default_value = "/run/dial/control.sock")]
		control_socket: PathBuf,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WakeSetting {
	On,
	Off,
}

impl WakeSetting {
	pub fn enabled(self) -> bool {
		self == Self::On
	}
}
