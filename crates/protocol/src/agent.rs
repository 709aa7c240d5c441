//! Messages exchanged with the display agent over its control channel.
//!
//! The agent is the long-lived process that actually renders content. Requests
//! and responses travel as single JSON lines; notifications are requests the
//! caller does not wait on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentRequest {
	/// Display the given resource on the main surface.
	LoadResource { locator: String },
	/// Report the locator of the currently displayed resource.
	GetCurrentResource,
	/// One-way: a protocol client asked to start `app`; the agent performs
	/// the navigation itself from the raw launch parameters.
	NotifyStartRequested {
		app: String,
		payload: String,
		additional_data_url: String,
	},
	/// One-way: a protocol client asked to stop `app`.
	NotifyStopRequested { app: String },
	/// Open a composition layer at `z_order`. Extension surface; not used by
	/// the default lifecycle path.
	OpenLayer {
		z_order: i32,
		forward_input: bool,
		forward_keys: Vec<String>,
	},
	/// Close a previously opened composition layer.
	CloseLayer { layer: i64 },
	/// Point a composition layer at a resource.
	SetLayerResource { layer: i64, locator: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentResponse {
	Ok,
	CurrentResource { locator: String },
	Layer { layer: i64 },
	Error { code: String, message: String },
}
