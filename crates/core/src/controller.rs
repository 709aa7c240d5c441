//! The lifecycle controller: protocol callbacks against registered apps.

use std::collections::HashMap;
use std::sync::Arc;

use dial_protocol::{LaunchRequest, LifecycleState, RunHandle, StatusReport};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::app::AppDescriptor;
use crate::error::{DialError, Result};
use crate::locator::build_locator;
use crate::matcher::TargetMatcher;
use crate::relaunch::should_relaunch;
use crate::strategy::LaunchStrategy;

/// What `start` hands back to the protocol engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOutcome {
	pub state: LifecycleState,
	pub run_handle: Option<RunHandle>,
}

/// Mutable per-app run state. Created on first start, superseded on restart,
/// kept for the lifetime of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
	pub run_handle: Option<RunHandle>,
	pub last_payload: String,
	pub last_additional_data_url: String,
	pub state: LifecycleState,
}

struct AppEntry {
	descriptor: Arc<AppDescriptor>,
	strategy: Arc<dyn LaunchStrategy>,
	matcher: Arc<dyn TargetMatcher>,
	// Only the start path writes; concurrent starts on one app are
	// last-writer-wins. Never held across an await.
	record: Mutex<Option<RunRecord>>,
}

/// Receives the four protocol callbacks and realizes them through each app's
/// registered strategy and matcher.
///
/// Registration happens once at bootstrap; afterwards the app set is
/// immutable and all methods take `&self`.
#[derive(Default)]
pub struct LifecycleController {
	apps: HashMap<String, AppEntry>,
}

impl LifecycleController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, descriptor: AppDescriptor, strategy: Arc<dyn LaunchStrategy>, matcher: Arc<dyn TargetMatcher>) {
		let name = descriptor.name.clone();
		let entry = AppEntry {
			descriptor: Arc::new(descriptor),
			strategy,
			matcher,
			record: Mutex::new(None),
		};
		self.apps.insert(name, entry);
	}

	/// Registered app names, stable order.
	pub fn app_names(&self) -> Vec<String> {
		let mut names: Vec<_> = self.apps.keys().cloned().collect();
		names.sort();
		names
	}

	fn entry(&self, app: &str) -> Result<&AppEntry> {
		self.apps.get(app).ok_or_else(|| DialError::UnknownApp(app.to_string()))
	}

	/// Starts (or restarts) `app` with the client's launch parameters.
	///
	/// An oversized locator is rejected before anything is dispatched. A
	/// spawn refusal is the one synchronous `Stopped` outcome; an agent
	/// transport failure still reports `Running` and is left for the next
	/// status poll to correct.
	pub async fn start(&self, app: &str, request: &LaunchRequest) -> Result<StartOutcome> {
		let entry = self.entry(app)?;
		let locator = build_locator(&entry.descriptor.base_locator, &request.payload, &request.additional_data_url)?;

		if let Some(previous) = entry.record.lock().as_ref() {
			if !should_relaunch(&previous.last_payload, &request.payload) {
				// The policy calls this a repeat; dispatch still happens so a
				// display navigated elsewhere is brought back.
				debug!(target = "dial", app, "payload unchanged since last launch; dispatching again");
			}
		}

		match entry.strategy.launch(&entry.descriptor, &locator, request).await {
			Ok(run_handle) => {
				self.replace_record(entry, request, run_handle, LifecycleState::Running);
				Ok(StartOutcome { state: LifecycleState::Running, run_handle })
			}
			Err(DialError::SpawnFailure { executable, source }) => {
				warn!(target = "dial.proc", app, executable = %executable, error = %source, "spawn refused; reporting stopped");
				self.replace_record(entry, request, None, LifecycleState::Stopped);
				Ok(StartOutcome { state: LifecycleState::Stopped, run_handle: None })
			}
			Err(DialError::TransportFailure(err)) => {
				warn!(target = "dial.agent", app, error = %err, "agent dispatch failed; status converges on next poll");
				self.replace_record(entry, request, None, LifecycleState::Running);
				Ok(StartOutcome { state: LifecycleState::Running, run_handle: None })
			}
			Err(other) => Err(other),
		}
	}

	/// Liveness probe plus the app's static can-stop capability. Read-only.
	pub async fn status(&self, app: &str) -> Result<StatusReport> {
		let entry = self.entry(app)?;
		let active = entry.matcher.is_active(&entry.descriptor).await;
		Ok(StatusReport { state: LifecycleState::from_active(active), can_stop: entry.descriptor.can_stop })
	}

	/// The protocol's hide callback. Nothing is hidden: this is the same
	/// liveness probe as `status` without the can-stop flag.
	pub async fn hide(&self, app: &str) -> Result<LifecycleState> {
		let entry = self.entry(app)?;
		let active = entry.matcher.is_active(&entry.descriptor).await;
		Ok(LifecycleState::from_active(active))
	}

	/// Returns the app's target to idle if - and only if - the matcher
	/// currently observes it as active.
	pub async fn stop(&self, app: &str) -> Result<()> {
		let entry = self.entry(app)?;
		if !entry.matcher.is_active(&entry.descriptor).await {
			debug!(target = "dial", app, "not active; idle dispatch skipped");
			return Ok(());
		}

		let run_handle = entry.record.lock().as_ref().and_then(|record| record.run_handle);
		match entry.strategy.stop_to_idle(&entry.descriptor, run_handle.as_ref()).await {
			Ok(()) => Ok(()),
			Err(DialError::TransportFailure(err)) => {
				warn!(target = "dial.agent", app, error = %err, "idle dispatch failed");
				Ok(())
			}
			Err(other) => Err(other),
		}
	}

	/// Snapshot of the app's current run record, if it was ever started.
	pub fn run_record(&self, app: &str) -> Result<Option<RunRecord>> {
		Ok(self.entry(app)?.record.lock().clone())
	}

	fn replace_record(&self, entry: &AppEntry, request: &LaunchRequest, run_handle: Option<RunHandle>, state: LifecycleState) {
		let mut record = entry.record.lock();
		*record = Some(RunRecord {
			run_handle,
			last_payload: request.payload.clone(),
			last_additional_data_url: request.additional_data_url.clone(),
			state,
		});
	}
}
