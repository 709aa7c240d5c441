//! Resource-locator construction from launch parameters.

use crate::error::{DialError, Result};

/// Upper bound on a constructed locator, matching the display pipeline's
/// fixed-size buffers downstream.
pub const MAX_LOCATOR_LEN: usize = 511;

/// Combines the base locator with the client-supplied launch parameters.
///
/// Deterministic and pure: `base`, `base?payload`, or
/// `base?payload&additional` depending on which parameters are non-empty.
/// A result that would exceed [`MAX_LOCATOR_LEN`] is rejected rather than
/// truncated; a silently shortened locator would launch the wrong resource.
pub fn build_locator(base: &str, payload: &str, additional_data_url: &str) -> Result<String> {
	let locator = match (payload.is_empty(), additional_data_url.is_empty()) {
		(false, false) => format!("{base}?{payload}&{additional_data_url}"),
		(false, true) => format!("{base}?{payload}"),
		(true, _) => base.to_string(),
	};

	if locator.len() > MAX_LOCATOR_LEN {
		return Err(DialError::PayloadTooLarge { max: MAX_LOCATOR_LEN });
	}
	Ok(locator)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_parameters_yield_base() {
		assert_eq!(build_locator("base", "", "").unwrap(), "base");
	}

	#[test]
	fn payload_only_appends_query() {
		assert_eq!(build_locator("base", "v=1", "").unwrap(), "base?v=1");
	}

	#[test]
	fn both_parameters_join_with_ampersand() {
		assert_eq!(build_locator("base", "v=1", "t=5").unwrap(), "base?v=1&t=5");
	}

	#[test]
	fn additional_data_without_payload_is_ignored() {
		assert_eq!(build_locator("base", "", "t=5").unwrap(), "base");
	}

	#[test]
	fn locator_at_exact_bound_is_accepted() {
		let payload = "p".repeat(MAX_LOCATOR_LEN - "base?".len());
		let locator = build_locator("base", &payload, "").unwrap();
		assert_eq!(locator.len(), MAX_LOCATOR_LEN);
	}

	#[test]
	fn oversized_locator_is_rejected() {
		let payload = "p".repeat(MAX_LOCATOR_LEN);
		let err = build_locator("base", &payload, "").unwrap_err();
		assert!(matches!(err, DialError::PayloadTooLarge { max: MAX_LOCATOR_LEN }));
	}
}
