//! Messages accepted on the local control socket in serve mode.
//!
//! This is the binding point for the protocol engine: each request maps onto
//! one lifecycle callback and every answer stays inside the engine vocabulary
//! (`running`/`stopped` plus the can-stop flag).

use serde::{Deserialize, Serialize};

use crate::lifecycle::{LifecycleState, RunHandle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlRequest {
	Ping,
	Start {
		app: String,
		#[serde(default)]
		payload: String,
		#[serde(default)]
		additional_data_url: String,
	},
	Status { app: String },
	Hide { app: String },
	Stop { app: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlResponse {
	Pong,
	Started {
		state: LifecycleState,
		run_handle: Option<RunHandle>,
	},
	Status {
		state: LifecycleState,
		can_stop: bool,
	},
	State { state: LifecycleState },
	Ok,
	Error { code: String, message: String },
}
