//! Launch strategies: how a start request reaches the target runtime.

use std::sync::Arc;

use async_trait::async_trait;
use dial_protocol::{LaunchRequest, RunHandle};
use dial_runtime::{AgentClient, ProcessLauncher, process};
use tracing::{debug, warn};

use crate::app::AppDescriptor;
use crate::error::{DialError, Result};

/// Realizes launches and return-to-idle against one kind of target runtime.
#[async_trait]
pub trait LaunchStrategy: Send + Sync {
	/// Dispatches `locator` for `app`. Returns the run handle when the
	/// strategy has one to offer.
	async fn launch(&self, app: &AppDescriptor, locator: &str, request: &LaunchRequest) -> Result<Option<RunHandle>>;

	/// Returns the target to its idle state. Only called once the matcher has
	/// confirmed the app is currently active.
	async fn stop_to_idle(&self, app: &AppDescriptor, handle: Option<&RunHandle>) -> Result<()>;
}

/// How the agent strategy delivers a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentDispatchMode {
	/// Call `load_resource` with the composed locator and wait for the ack.
	#[default]
	Direct,
	/// Emit a one-way start/stop notification; the agent composes the target
	/// itself from the raw launch parameters.
	Notify,
}

/// Forwards launches to the long-lived display agent.
pub struct AgentStrategy {
	client: Arc<dyn AgentClient>,
	mode: AgentDispatchMode,
}

impl AgentStrategy {
	pub fn new(client: Arc<dyn AgentClient>, mode: AgentDispatchMode) -> Self {
		Self { client, mode }
	}
}

#[async_trait]
impl LaunchStrategy for AgentStrategy {
	async fn launch(&self, app: &AppDescriptor, locator: &str, request: &LaunchRequest) -> Result<Option<RunHandle>> {
		match self.mode {
			AgentDispatchMode::Direct => self.client.load_resource(locator).await?,
			AgentDispatchMode::Notify => {
				self.client.notify_start_requested(&app.name, &request.payload, &request.additional_data_url).await?
			}
		}
		debug!(target = "dial.agent", app = %app.name, locator, "launch forwarded to display agent");
		Ok(Some(RunHandle::AgentForwarded))
	}

	async fn stop_to_idle(&self, app: &AppDescriptor, _handle: Option<&RunHandle>) -> Result<()> {
		match self.mode {
			AgentDispatchMode::Direct => self.client.load_resource(&app.idle_locator).await?,
			AgentDispatchMode::Notify => self.client.notify_stop_requested(&app.name).await?,
		}
		debug!(target = "dial.agent", app = %app.name, idle = %app.idle_locator, "display returned to idle");
		Ok(())
	}
}

/// Spawns an OS process per launch; the pid is the run handle.
pub struct ProcessStrategy {
	launcher: ProcessLauncher,
}

impl ProcessStrategy {
	pub fn new(launcher: ProcessLauncher) -> Self {
		Self { launcher }
	}
}

#[async_trait]
impl LaunchStrategy for ProcessStrategy {
	async fn launch(&self, app: &AppDescriptor, locator: &str, _request: &LaunchRequest) -> Result<Option<RunHandle>> {
		let args = vec![locator.to_string()];
		let pid = self.launcher.spawn(&args).map_err(|source| DialError::SpawnFailure {
			executable: self.launcher.executable().display().to_string(),
			source,
		})?;
		debug!(target = "dial.proc", app = %app.name, pid, "application process launched");
		Ok(Some(RunHandle::Pid { pid }))
	}

	async fn stop_to_idle(&self, app: &AppDescriptor, handle: Option<&RunHandle>) -> Result<()> {
		let Some(RunHandle::Pid { pid }) = handle else {
			debug!(target = "dial.proc", app = %app.name, "no recorded pid; nothing to terminate");
			return Ok(());
		};
		match process::terminate(*pid) {
			Ok(true) => Ok(()),
			Ok(false) => {
				debug!(target = "dial.proc", app = %app.name, pid, "process already gone");
				Ok(())
			}
			Err(err) => {
				warn!(target = "dial.proc", app = %app.name, pid, error = %err, "failed to terminate process");
				Err(err.into())
			}
		}
	}
}
