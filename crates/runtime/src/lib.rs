//! OS and transport plumbing underneath the lifecycle controller.
//!
//! Everything here is mechanism rather than policy: reaching the display
//! agent over its socket, spawning and reaping child processes, walking the
//! process table, and keeping the server resident when asked to terminate.
//! The decisions about *when* to do any of this live in `dial-core`.

pub mod agent;
pub mod launcher;
pub mod proc_table;
pub mod process;
pub mod supervision;

pub use agent::{AgentClient, AgentSocketClient, TransportError};
pub use launcher::{DATA_DIR_ENV, ProcessLauncher};
pub use proc_table::{ProcFs, ProcessEnumerator, ProcessInfo};
