//! Resident-process policy.
//!
//! The server is expected to survive termination requests: a supervisor or
//! init system asking it to shut down must not take the responder offline.
//! In-flight launches are never cancelled; once dispatched they run to
//! completion or fail on their own.

/// Installs the keep-alive policy: termination requests are logged and
/// ignored for the remaining lifetime of the process.
///
/// Must be called from within a Tokio runtime.
#[cfg(unix)]
pub fn ignore_termination_requests() -> std::io::Result<()> {
	use tokio::signal::unix::{SignalKind, signal};
	use tracing::info;

	let mut terminate = signal(SignalKind::terminate())?;
	tokio::spawn(async move {
		while terminate.recv().await.is_some() {
			info!(target = "dial", "termination request received; staying resident");
		}
	});
	Ok(())
}

#[cfg(not(unix))]
pub fn ignore_termination_requests() -> std::io::Result<()> {
	Ok(())
}
