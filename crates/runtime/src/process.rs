//! Pid liveness and termination helpers.

use tracing::debug;

/// Returns `true` when a process with `pid` appears alive on this platform.
pub fn pid_is_alive(pid: u32) -> bool {
	#[cfg(unix)]
	{
		if pid == 0 {
			return false;
		}

		if std::path::Path::new("/proc").join(pid.to_string()).exists() {
			return true;
		}

		// Signal 0 probes for existence without delivering anything.
		unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
	}

	#[cfg(not(unix))]
	{
		pid == std::process::id()
	}
}

/// Sends a termination request to `pid`.
///
/// Delivery is best-effort: a pid that already exited is reported as
/// `Ok(false)` rather than an error.
pub fn terminate(pid: u32) -> std::io::Result<bool> {
	#[cfg(unix)]
	{
		if pid == 0 {
			return Err(std::io::Error::other("refusing to signal pid 0"));
		}

		let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
		if rc == 0 {
			debug!(target = "dial.proc", pid, "sent SIGTERM");
			return Ok(true);
		}

		let err = std::io::Error::last_os_error();
		if err.raw_os_error() == Some(libc::ESRCH) {
			return Ok(false);
		}
		Err(err)
	}

	#[cfg(not(unix))]
	{
		let _ = pid;
		Err(std::io::Error::other("process termination is only supported on unix"))
	}
}

#[cfg(all(test, unix))]
mod tests {
	use super::*;

	#[test]
	fn current_process_is_alive() {
		assert!(pid_is_alive(std::process::id()));
	}

	#[test]
	fn pid_zero_is_never_alive() {
		assert!(!pid_is_alive(0));
	}

	#[test]
	fn terminating_pid_zero_is_refused() {
		assert!(terminate(0).is_err());
	}
}
