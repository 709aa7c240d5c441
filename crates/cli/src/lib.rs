pub mod apps;
pub mod cli;
pub mod commands;
pub mod logging;
#[cfg(unix)]
pub mod serve;
