//! Tracing subscriber bootstrap.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging. `RUST_LOG` wins when set; otherwise the
/// verbosity flag picks the level for the `dial` targets.
pub fn init_logging(verbose: u8) {
	let default_filter = match verbose {
		0 => "dial=warn",
		1 => "dial=info",
		_ => "dial=debug",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
