//! Lifecycle vocabulary reported back to the protocol engine.

use serde::{Deserialize, Serialize};

/// Externally observable run state of a registered application.
///
/// There is no `Hidden` state: the protocol's hide callback is a liveness
/// probe, so every query resolves to one of these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
	Running,
	Stopped,
}

impl LifecycleState {
	/// Maps an activity probe result to the wire vocabulary.
	pub fn from_active(active: bool) -> Self {
		if active { Self::Running } else { Self::Stopped }
	}
}

impl std::fmt::Display for LifecycleState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Running => f.write_str("running"),
			Self::Stopped => f.write_str("stopped"),
		}
	}
}

/// Answer to a status query: run state plus the static can-stop capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
	pub state: LifecycleState,
	pub can_stop: bool,
}

/// Opaque identifier handed back on start and threaded through later calls.
///
/// `None` at the record level denotes "no handle"; a pid of zero is never a
/// valid handle, so the two cannot collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunHandle {
	/// The launch spawned an OS process; the handle is its pid.
	Pid { pid: u32 },
	/// The launch was forwarded to the display agent, which owns the
	/// rendering lifetime; there is no process to track.
	AgentForwarded,
}

/// Client-supplied launch parameters, both opaque and possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRequest {
	#[serde(default)]
	pub payload: String,
	#[serde(default)]
	pub additional_data_url: String,
}

impl LaunchRequest {
	pub fn new(payload: impl Into<String>, additional_data_url: impl Into<String>) -> Self {
		Self { payload: payload.into(), additional_data_url: additional_data_url.into() }
	}
}
