use anyhow::Context;
use dial::{AgentDispatchMode, ServerConfig};
use dial_protocol::LaunchRequest;
use serde_json::json;

use crate::apps;
use crate::cli::{Cli, Commands};
#[cfg(unix)]
use crate::serve;

pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
	let mode = if cli.agent_notify { AgentDispatchMode::Notify } else { AgentDispatchMode::Direct };

	match cli.command {
		Commands::Serve {
			data_dir,
			executable,
			friendly_name,
			model_name,
			uuid,
			wake,
			control_socket,
		} => {
			let config = ServerConfig {
				data_dir,
				executable,
				friendly_name,
				model_name,
				uuid,
				wake_on_network: wake.enabled(),
				agent_socket: cli.agent_socket,
				control_socket,
			};
			#[cfg(unix)]
			return serve::run(config, mode).await;
			#[cfg(not(unix))]
			{
				let _ = (config, mode);
				anyhow::bail!("serve mode requires unix-domain sockets");
			}
		}
		command => one_shot(command, cli.agent_socket, mode).await,
	}
}

/// Operator one-shots: build the same wiring serve mode uses, run a single
/// lifecycle operation against it, and print the result.
async fn one_shot(command: Commands, agent_socket: std::path::PathBuf, mode: AgentDispatchMode) -> anyhow::Result<()> {
	let config = ServerConfig { agent_socket, ..ServerConfig::default() };
	let controller = apps::build_controller(&config, mode);

	match command {
		Commands::Start { app, payload, additional_data_url } => {
			let request = LaunchRequest { payload, additional_data_url };
			let outcome = controller.start(&app, &request).await.with_context(|| format!("start {app}"))?;
			emit(json!({
				"app": app,
				"state": outcome.state,
				"run_handle": outcome.run_handle,
			}))
		}
		Commands::Status { app } => {
			let report = controller.status(&app).await.with_context(|| format!("status {app}"))?;
			emit(json!({
				"app": app,
				"state": report.state,
				"can_stop": report.can_stop,
			}))
		}
		Commands::Hide { app } => {
			let state = controller.hide(&app).await.with_context(|| format!("hide {app}"))?;
			emit(json!({ "app": app, "state": state }))
		}
		Commands::Stop { app } => {
			controller.stop(&app).await.with_context(|| format!("stop {app}"))?;
			emit(json!({ "app": app, "stopped": true }))
		}
		Commands::Serve { .. } => unreachable!("serve handled by dispatch"),
	}
}

fn emit(data: serde_json::Value) -> anyhow::Result<()> {
	println!("{}", serde_json::to_string_pretty(&data)?);
	Ok(())
}
