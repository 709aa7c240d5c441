//! Child process launch and reaping for process-hosted applications.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

/// Environment variable handed to every spawned application, pointing at the
/// server's data directory.
pub const DATA_DIR_ENV: &str = "DIAL_DATA_DIR";

/// Spawns the configured application executable and supervises its exit.
///
/// The spawn call returns as soon as the child exists; its lifetime is
/// decoupled from the caller. Each child is handed to a reaper task that
/// awaits its exit status, so terminated children never accumulate as
/// zombies.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
	executable: PathBuf,
	data_dir: PathBuf,
}

impl ProcessLauncher {
	pub fn new(executable: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
		Self { executable: executable.into(), data_dir: data_dir.into() }
	}

	pub fn executable(&self) -> &Path {
		&self.executable
	}

	/// Spawns the executable with `args` and returns the child pid.
	///
	/// Must be called from within a Tokio runtime: the reaper task is spawned
	/// onto the current runtime.
	pub fn spawn(&self, args: &[String]) -> std::io::Result<u32> {
		let mut command = Command::new(&self.executable);
		command
			.args(args)
			.env(DATA_DIR_ENV, &self.data_dir)
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::null());

		let mut child = command.spawn()?;
		let pid = child
			.id()
			.ok_or_else(|| std::io::Error::other("spawned child exited before a pid could be read"))?;
		debug!(target = "dial.proc", pid, executable = %self.executable.display(), "spawned application process");

		tokio::spawn(async move {
			match child.wait().await {
				Ok(status) => debug!(target = "dial.proc", pid, %status, "application process exited"),
				Err(err) => warn!(target = "dial.proc", pid, error = %err, "failed to reap application process"),
			}
		});

		Ok(pid)
	}
}
