//! Activity probes: is a registered application currently the one on screen?
//!
//! Liveness is decided by whichever authority actually knows - the display
//! agent when launches are forwarded to it, the OS process table when
//! launches spawn real processes. One matcher is selected per app at
//! registration time; the two are never combined.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dial_runtime::{AgentClient, ProcessEnumerator, ProcessInfo};
use parking_lot::Mutex;
use regex::Regex;
use tracing::{debug, error};

use crate::app::AppDescriptor;

#[async_trait]
pub trait TargetMatcher: Send + Sync {
	async fn is_active(&self, app: &AppDescriptor) -> bool;
}

/// Asks the display agent for its current resource and compares it against
/// the app's prefix predicate.
pub struct AgentMatcher {
	client: Arc<dyn AgentClient>,
}

impl AgentMatcher {
	pub fn new(client: Arc<dyn AgentClient>) -> Self {
		Self { client }
	}
}

#[async_trait]
impl TargetMatcher for AgentMatcher {
	async fn is_active(&self, app: &AppDescriptor) -> bool {
		let current = match self.client.get_current_resource().await {
			Ok(current) => current,
			Err(err) => {
				debug!(target = "dial.agent", app = %app.name, error = %err, "current-resource query failed; treating as not active");
				return false;
			}
		};
		if current.is_empty() || app.match_prefix.is_empty() {
			return false;
		}
		current.starts_with(&app.match_prefix)
	}
}

/// Pure predicate: does `pattern` match the process's command name or its
/// full command line?
pub fn command_matches(pattern: &Regex, process: &ProcessInfo) -> bool {
	pattern.is_match(&process.comm) || pattern.is_match(&process.cmdline)
}

/// Compiles a configured process match pattern.
pub fn compile_pattern(pattern: &str) -> crate::error::Result<Regex> {
	Regex::new(pattern).map_err(|source| crate::error::DialError::PatternError { pattern: pattern.to_string(), source })
}

/// Walks the process table and tests each entry against the app's command
/// pattern. General-purpose fallback for targets without an agent.
pub struct ProcessTableMatcher {
	table: Arc<dyn ProcessEnumerator>,
	// Compiled per pattern on first use. A pattern that fails to compile is
	// logged once and pinned as permanently non-matching.
	compiled: Mutex<HashMap<String, Option<Regex>>>,
}

impl ProcessTableMatcher {
	pub fn new(table: Arc<dyn ProcessEnumerator>) -> Self {
		Self { table, compiled: Mutex::new(HashMap::new()) }
	}

	fn pattern_for(&self, app: &AppDescriptor, raw: &str) -> Option<Regex> {
		let mut compiled = self.compiled.lock();
		compiled
			.entry(raw.to_string())
			.or_insert_with(|| match compile_pattern(raw) {
				Ok(regex) => Some(regex),
				Err(err) => {
					error!(target = "dial.proc", app = %app.name, error = %err, "app will never match");
					None
				}
			})
			.clone()
	}
}

#[async_trait]
impl TargetMatcher for ProcessTableMatcher {
	async fn is_active(&self, app: &AppDescriptor) -> bool {
		let Some(raw) = app.command_pattern.as_deref() else {
			return false;
		};
		let Some(pattern) = self.pattern_for(app, raw) else {
			return false;
		};
		self.table.processes().iter().any(|process| command_matches(&pattern, process))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FixedTable(Mutex<Vec<ProcessInfo>>);

	impl ProcessEnumerator for FixedTable {
		fn processes(&self) -> Vec<ProcessInfo> {
			self.0.lock().clone()
		}
	}

	fn chrome_dial_process() -> ProcessInfo {
		ProcessInfo {
			pid: 1234,
			comm: "chrome".into(),
			cmdline: "/opt/chrome/chrome --class=google-chrome-dial".into(),
		}
	}

	fn app_with_pattern(pattern: &str) -> AppDescriptor {
		AppDescriptor::new("YouTube", "https://www.youtube.com/tv", "about:blank").with_command_pattern(pattern)
	}

	#[tokio::test]
	async fn live_matching_process_is_active() {
		let table = Arc::new(FixedTable(Mutex::new(vec![chrome_dial_process()])));
		let matcher = ProcessTableMatcher::new(table);
		assert!(matcher.is_active(&app_with_pattern("chrome.*google-chrome-dial")).await);
	}

	#[tokio::test]
	async fn exited_process_is_no_longer_active() {
		let table = Arc::new(FixedTable(Mutex::new(vec![chrome_dial_process()])));
		let matcher = ProcessTableMatcher::new(table.clone());
		let app = app_with_pattern("chrome.*google-chrome-dial");

		assert!(matcher.is_active(&app).await);
		table.0.lock().clear();
		assert!(!matcher.is_active(&app).await);
	}

	#[tokio::test]
	async fn comm_alone_can_match() {
		let table = Arc::new(FixedTable(Mutex::new(vec![ProcessInfo { pid: 9, comm: "videoapp".into(), cmdline: String::new() }])));
		let matcher = ProcessTableMatcher::new(table);
		assert!(matcher.is_active(&app_with_pattern("^videoapp$")).await);
	}

	#[tokio::test]
	async fn missing_pattern_never_matches() {
		let table = Arc::new(FixedTable(Mutex::new(vec![chrome_dial_process()])));
		let matcher = ProcessTableMatcher::new(table);
		let app = AppDescriptor::new("YouTube", "https://www.youtube.com/tv", "about:blank");
		assert!(!matcher.is_active(&app).await);
	}

	#[test]
	fn compile_pattern_reports_the_offending_pattern() {
		let err = compile_pattern("chrome(*oops").unwrap_err();
		assert!(matches!(err, crate::error::DialError::PatternError { ref pattern, .. } if pattern == "chrome(*oops"));
	}

	#[tokio::test]
	async fn invalid_pattern_is_permanently_non_matching() {
		let table = Arc::new(FixedTable(Mutex::new(vec![chrome_dial_process()])));
		let matcher = ProcessTableMatcher::new(table);
		let app = app_with_pattern("chrome(*oops");

		assert!(!matcher.is_active(&app).await);
		// Second probe hits the cached compile failure, not a fresh attempt.
		assert!(!matcher.is_active(&app).await);
		assert_eq!(matcher.compiled.lock().len(), 1);
	}
}
