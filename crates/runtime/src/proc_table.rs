//! Process-table enumeration for the command-pattern activity probe.

#[cfg(unix)]
use std::path::Path;

/// One live process as seen in the table at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
	pub pid: u32,
	/// Executable name (`/proc/<pid>/comm`).
	pub comm: String,
	/// Full command line with argument separators normalized to spaces.
	pub cmdline: String,
}

/// Source of process-table snapshots.
///
/// Kept as a capability so matchers can be exercised against a fixed table in
/// tests; production code uses [`ProcFs`].
pub trait ProcessEnumerator: Send + Sync {
	fn processes(&self) -> Vec<ProcessInfo>;
}

/// `/proc`-backed enumerator.
///
/// Processes that disappear between listing and inspection are skipped; a
/// half-read entry is a non-match, not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcFs;

impl ProcessEnumerator for ProcFs {
	#[cfg(unix)]
	fn processes(&self) -> Vec<ProcessInfo> {
		let Ok(entries) = std::fs::read_dir("/proc") else {
			return Vec::new();
		};
		entries
			.flatten()
			.filter_map(|entry| {
				let pid: u32 = entry.file_name().to_str()?.parse().ok()?;
				read_process(&entry.path(), pid)
			})
			.collect()
	}

	#[cfg(not(unix))]
	fn processes(&self) -> Vec<ProcessInfo> {
		Vec::new()
	}
}

#[cfg(unix)]
fn read_process(dir: &Path, pid: u32) -> Option<ProcessInfo> {
	let comm = std::fs::read_to_string(dir.join("comm")).ok()?.trim_end().to_string();
	let cmdline = std::fs::read(dir.join("cmdline"))
		.ok()
		.map(|raw| {
			raw.split(|b| *b == 0)
				.filter(|part| !part.is_empty())
				.map(|part| String::from_utf8_lossy(part).into_owned())
				.collect::<Vec<_>>()
				.join(" ")
		})
		.unwrap_or_default();
	Some(ProcessInfo { pid, comm, cmdline })
}
