//! Registered application catalog and controller assembly.

use std::sync::Arc;

use dial::{
	AgentDispatchMode, AgentMatcher, AgentStrategy, AppDescriptor, LifecycleController, ProcessStrategy, ProcessTableMatcher,
	ServerConfig,
};
use dial_runtime::{AgentClient, AgentSocketClient, ProcFs, ProcessLauncher};

const YOUTUBE_BASE: &str = "https://www.youtube.com/tv";
const YOUTUBE_PREFIX: &str = "https://www.youtube.com/";
const YOUTUBE_COMMAND_PATTERN: &str = "chrome.*google-chrome-dial";
const IDLE_PAGE: &str = "file:///usr/share/webapps/transparent-body/index.html";

fn youtube() -> AppDescriptor {
	AppDescriptor::new("YouTube", YOUTUBE_BASE, IDLE_PAGE)
		.with_match_prefix(YOUTUBE_PREFIX)
		.with_command_pattern(YOUTUBE_COMMAND_PATTERN)
		.with_z_order(80)
}

fn netflix() -> AppDescriptor {
	AppDescriptor::new("Netflix", "https://www.netflix.com/tv", "about:blank").with_command_pattern("netflix")
}

/// Wires every registered app to its strategy and matcher.
///
/// YouTube is agent-forwarded: launches and liveness both go through the
/// display agent. Netflix is process-hosted: launches spawn the configured
/// executable and liveness comes from the process table.
pub fn build_controller(config: &ServerConfig, mode: AgentDispatchMode) -> LifecycleController {
	let agent: Arc<dyn AgentClient> = Arc::new(AgentSocketClient::new(&config.agent_socket));
	let mut controller = LifecycleController::new();

	controller.register(
		youtube(),
		Arc::new(AgentStrategy::new(agent.clone(), mode)),
		Arc::new(AgentMatcher::new(agent)),
	);

	let launcher = ProcessLauncher::new(&config.executable, &config.data_dir);
	controller.register(
		netflix(),
		Arc::new(ProcessStrategy::new(launcher)),
		Arc::new(ProcessTableMatcher::new(Arc::new(ProcFs))),
	);

	controller
}
