//! Application lifecycle control for a DIAL second-screen responder.
//!
//! The protocol engine owns discovery and HTTP; this crate owns what happens
//! when a client asks to start, probe, hide, or stop a registered
//! application. Launches are realized against one of two runtimes - a spawned
//! OS process, or the long-lived display agent reached over its socket - and
//! activity is always re-observed through a [`matcher::TargetMatcher`] rather
//! than trusted from the last launch.

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod locator;
pub mod matcher;
pub mod relaunch;
pub mod strategy;

pub use app::AppDescriptor;
pub use config::ServerConfig;
pub use controller::{LifecycleController, RunRecord, StartOutcome};
pub use error::{DialError, Result};
pub use matcher::{AgentMatcher, ProcessTableMatcher, TargetMatcher};
pub use strategy::{AgentDispatchMode, AgentStrategy, LaunchStrategy, ProcessStrategy};
