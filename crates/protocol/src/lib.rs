//! Wire types for the DIAL lifecycle responder.
//!
//! This crate contains the serde-serializable types shared by the lifecycle
//! controller, the display-agent channel, and the local control socket. These
//! types represent the "protocol layer" - the shapes of data as they appear
//! on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * Stable: Changes only when a wire format changes
//!
//! The lifecycle semantics built on top of these types live in `dial-core`.

pub mod agent;
pub mod control;
pub mod lifecycle;

pub use agent::*;
pub use control::*;
pub use lifecycle::*;
