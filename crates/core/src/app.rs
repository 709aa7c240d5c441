//! Registered application identity.

/// Everything the controller knows about one registered application.
/// Immutable after registration.
#[derive(Debug, Clone)]
pub struct AppDescriptor {
	/// Protocol-visible application name, e.g. `YouTube`.
	pub name: String,
	/// Locator the launch target is derived from, e.g.
	/// `https://www.youtube.com/tv`.
	pub base_locator: String,
	/// Case-sensitive prefix the agent's current resource must carry for the
	/// app to count as active.
	pub match_prefix: String,
	/// Regex tested against process command names and command lines by the
	/// process-table probe.
	pub command_pattern: Option<String>,
	/// Resource the display returns to when the app is stopped.
	pub idle_locator: String,
	/// Compositor stacking hint for the layer extension.
	pub z_order: Option<i32>,
	/// Whether the protocol may stop this app. Static per app type.
	pub can_stop: bool,
}

impl AppDescriptor {
	pub fn new(name: impl Into<String>, base_locator: impl Into<String>, idle_locator: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			base_locator: base_locator.into(),
			match_prefix: String::new(),
			command_pattern: None,
			idle_locator: idle_locator.into(),
			z_order: None,
			can_stop: true,
		}
	}

	/// Sets the current-resource prefix predicate.
	pub fn with_match_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.match_prefix = prefix.into();
		self
	}

	/// Sets the process command pattern for process-table matching.
	pub fn with_command_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.command_pattern = Some(pattern.into());
		self
	}

	/// Sets the compositor stacking hint.
	pub fn with_z_order(mut self, z_order: i32) -> Self {
		self.z_order = Some(z_order);
		self
	}
}
