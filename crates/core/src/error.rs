//! Error types for lifecycle operations.
//!
//! None of these cross the protocol-engine boundary: callers at that boundary
//! fold every failure into `running`/`stopped` and log the kind. The split
//! matters for what gets logged and for the one case (`PayloadTooLarge`)
//! where a start request must be rejected outright instead of dispatched.

use dial_runtime::TransportError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DialError>;

#[derive(Debug, Error)]
pub enum DialError {
	#[error("application is not registered: {0}")]
	UnknownApp(String),

	#[error("resource locator would exceed {max} characters")]
	PayloadTooLarge { max: usize },

	#[error("failed to spawn {executable}")]
	SpawnFailure {
		executable: String,
		#[source]
		source: std::io::Error,
	},

	#[error("display agent unreachable")]
	TransportFailure(#[from] TransportError),

	#[error("invalid process match pattern {pattern:?}")]
	PatternError {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
