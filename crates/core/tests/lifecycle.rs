//! End-to-end lifecycle scenarios against a scripted display agent.

use std::sync::Arc;

use async_trait::async_trait;
use dial::{
	AgentDispatchMode, AgentMatcher, AgentStrategy, AppDescriptor, DialError, LifecycleController, ProcessStrategy, TargetMatcher,
};
use dial_protocol::{LaunchRequest, LifecycleState, RunHandle};
use dial_runtime::{AgentClient, ProcessLauncher, TransportError};
use parking_lot::Mutex;

const YT_BASE: &str = "https://www.youtube.com/tv";
const YT_PREFIX: &str = "https://www.youtube.com/";
const IDLE: &str = "file:///usr/share/webapps/idle/index.html";

/// In-memory display agent: `load_resource` swaps the current resource, and
/// every call is recorded for dispatch-count assertions.
#[derive(Default)]
struct ScriptedAgent {
	current: Mutex<String>,
	loads: Mutex<Vec<String>>,
	notifications: Mutex<Vec<String>>,
	fail_transport: Mutex<bool>,
}

impl ScriptedAgent {
	fn with_current(resource: &str) -> Arc<Self> {
		let agent = Self::default();
		*agent.current.lock() = resource.to_string();
		Arc::new(agent)
	}

	fn check(&self) -> Result<(), TransportError> {
		if *self.fail_transport.lock() {
			return Err(TransportError::Protocol("agent offline".into()));
		}
		Ok(())
	}
}

#[async_trait]
impl AgentClient for ScriptedAgent {
	async fn load_resource(&self, locator: &str) -> Result<(), TransportError> {
		self.check()?;
		self.loads.lock().push(locator.to_string());
		*self.current.lock() = locator.to_string();
		Ok(())
	}

	async fn get_current_resource(&self) -> Result<String, TransportError> {
		self.check()?;
		Ok(self.current.lock().clone())
	}

	async fn notify_start_requested(&self, app: &str, payload: &str, additional_data_url: &str) -> Result<(), TransportError> {
		self.check()?;
		self.notifications.lock().push(format!("start:{app}:{payload}:{additional_data_url}"));
		Ok(())
	}

	async fn notify_stop_requested(&self, app: &str) -> Result<(), TransportError> {
		self.check()?;
		self.notifications.lock().push(format!("stop:{app}"));
		Ok(())
	}

	async fn open_layer(&self, _z_order: i32, _forward_input: bool, _forward_keys: &[String]) -> Result<i64, TransportError> {
		Err(TransportError::Protocol("layers not scripted".into()))
	}

	async fn close_layer(&self, _layer: i64) -> Result<(), TransportError> {
		Err(TransportError::Protocol("layers not scripted".into()))
	}

	async fn set_layer_resource(&self, _layer: i64, _locator: &str) -> Result<(), TransportError> {
		Err(TransportError::Protocol("layers not scripted".into()))
	}
}

fn youtube_descriptor() -> AppDescriptor {
	AppDescriptor::new("YouTube", YT_BASE, IDLE).with_match_prefix(YT_PREFIX).with_z_order(80)
}

fn agent_controller(agent: Arc<ScriptedAgent>, mode: AgentDispatchMode) -> LifecycleController {
	let mut controller = LifecycleController::new();
	controller.register(
		youtube_descriptor(),
		Arc::new(AgentStrategy::new(agent.clone(), mode)),
		Arc::new(AgentMatcher::new(agent)),
	);
	controller
}

#[tokio::test]
async fn start_then_status_reports_running_with_can_stop() {
	let agent = ScriptedAgent::with_current("about:blank");
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Direct);

	let outcome = controller.start("YouTube", &LaunchRequest::default()).await.unwrap();
	assert_eq!(outcome.state, LifecycleState::Running);
	assert_eq!(outcome.run_handle, Some(RunHandle::AgentForwarded));

	let report = controller.status("YouTube").await.unwrap();
	assert_eq!(report.state, LifecycleState::Running);
	assert!(report.can_stop);
}

#[tokio::test]
async fn start_dispatches_composed_locator_exactly_once() {
	let agent = ScriptedAgent::with_current("about:blank");
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Direct);

	controller.start("YouTube", &LaunchRequest::new("v=abc", "t=10")).await.unwrap();

	let loads = agent.loads.lock();
	assert_eq!(*loads, vec![format!("{YT_BASE}?v=abc&t=10")]);
}

#[tokio::test]
async fn repeated_start_with_same_payload_still_dispatches() {
	let agent = ScriptedAgent::with_current("about:blank");
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Direct);

	controller.start("YouTube", &LaunchRequest::new("v=abc", "")).await.unwrap();
	controller.start("YouTube", &LaunchRequest::new("v=abc", "")).await.unwrap();

	assert_eq!(agent.loads.lock().len(), 2);
}

#[tokio::test]
async fn status_and_hide_do_not_mutate_the_run_record() {
	let agent = ScriptedAgent::with_current("about:blank");
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Direct);

	controller.start("YouTube", &LaunchRequest::new("v=abc", "")).await.unwrap();
	let before = controller.run_record("YouTube").unwrap();

	controller.status("YouTube").await.unwrap();
	controller.hide("YouTube").await.unwrap();
	assert_eq!(controller.run_record("YouTube").unwrap(), before);
}

#[tokio::test]
async fn stop_on_active_app_returns_display_to_idle() {
	let agent = ScriptedAgent::with_current("about:blank");
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Direct);

	controller.start("YouTube", &LaunchRequest::default()).await.unwrap();
	assert_eq!(controller.status("YouTube").await.unwrap().state, LifecycleState::Running);

	controller.stop("YouTube").await.unwrap();
	assert_eq!(agent.loads.lock().last().unwrap(), IDLE);
	// With no external change to the display, the next probe sees idle.
	assert_eq!(controller.status("YouTube").await.unwrap().state, LifecycleState::Stopped);
}

#[tokio::test]
async fn stop_on_inactive_app_dispatches_nothing() {
	let agent = ScriptedAgent::with_current("https://someone-else.example/app");
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Direct);

	controller.stop("YouTube").await.unwrap();
	assert!(agent.loads.lock().is_empty());
}

#[tokio::test]
async fn hide_is_a_liveness_probe() {
	let agent = ScriptedAgent::with_current("https://www.youtube.com/tv?v=1");
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Direct);
	assert_eq!(controller.hide("YouTube").await.unwrap(), LifecycleState::Running);

	*agent.current.lock() = "about:blank".into();
	assert_eq!(controller.hide("YouTube").await.unwrap(), LifecycleState::Stopped);
}

#[tokio::test]
async fn oversized_payload_is_rejected_without_dispatch() {
	let agent = ScriptedAgent::with_current("about:blank");
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Direct);

	let request = LaunchRequest::new("v=".to_string() + &"x".repeat(600), "");
	let err = controller.start("YouTube", &request).await.unwrap_err();
	assert!(matches!(err, DialError::PayloadTooLarge { .. }));
	assert!(agent.loads.lock().is_empty());
}

#[tokio::test]
async fn transport_failure_on_start_still_reports_running() {
	let agent = ScriptedAgent::with_current("about:blank");
	*agent.fail_transport.lock() = true;
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Direct);

	let outcome = controller.start("YouTube", &LaunchRequest::default()).await.unwrap();
	assert_eq!(outcome.state, LifecycleState::Running);
	assert_eq!(outcome.run_handle, None);

	// The matcher cannot reach the agent either, so polling reports stopped.
	assert_eq!(controller.status("YouTube").await.unwrap().state, LifecycleState::Stopped);
}

#[tokio::test]
async fn notify_mode_forwards_raw_launch_parameters() {
	let agent = ScriptedAgent::with_current("https://www.youtube.com/tv");
	let controller = agent_controller(agent.clone(), AgentDispatchMode::Notify);

	controller.start("YouTube", &LaunchRequest::new("v=abc", "t=10")).await.unwrap();
	controller.stop("YouTube").await.unwrap();

	let notifications = agent.notifications.lock();
	assert_eq!(*notifications, vec!["start:YouTube:v=abc:t=10".to_string(), "stop:YouTube".to_string()]);
	assert!(agent.loads.lock().is_empty());
}

struct AlwaysActive;

#[async_trait]
impl TargetMatcher for AlwaysActive {
	async fn is_active(&self, _app: &AppDescriptor) -> bool {
		true
	}
}

#[tokio::test]
async fn spawn_refusal_reports_stopped_synchronously() {
	let mut controller = LifecycleController::new();
	let launcher = ProcessLauncher::new("/nonexistent/definitely-not-an-app", "/tmp");
	controller.register(
		AppDescriptor::new("Cinema", "https://cinema.example/app", "about:blank"),
		Arc::new(ProcessStrategy::new(launcher)),
		Arc::new(AlwaysActive),
	);

	let outcome = controller.start("Cinema", &LaunchRequest::default()).await.unwrap();
	assert_eq!(outcome.state, LifecycleState::Stopped);
	assert_eq!(outcome.run_handle, None);

	let record = controller.run_record("Cinema").unwrap().unwrap();
	assert_eq!(record.state, LifecycleState::Stopped);
	assert_eq!(record.run_handle, None);
}
