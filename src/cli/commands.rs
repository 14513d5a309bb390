// Command handling

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::time::Duration;

use super::args::{Cli, Command, DesiredArgs, MemberCommand, StateCommand};
use crate::central::{CentralClient, DesiredConfig};
use crate::config::Config;
use crate::device::DeviceClient;
use crate::state::{OperationResult, StateCall, StateContext, StateRunner, ZeroTierStates};

/// Output of a command, printed as JSON.
#[derive(Debug)]
pub enum CommandOutput {
    /// Execution-layer output.
    Value(Value),
    /// State result; a failed state makes the process exit non-zero.
    State(OperationResult),
}

impl CommandOutput {
    pub fn to_json(&self) -> Result<String> {
        let text = match self {
            CommandOutput::Value(Value::String(s)) => s.clone(),
            CommandOutput::Value(v) => serde_json::to_string_pretty(v)?,
            CommandOutput::State(r) => serde_json::to_string_pretty(r)?,
        };
        Ok(text)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CommandOutput::State(r) if r.result == crate::state::Outcome::Failure)
    }
}

/// Parse one `KEY=VALUE` assignment. VALUE is JSON if it parses, else a string.
pub fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("Empty key in '{}'", raw);
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Build the desired config from `--json` and `--set` arguments.
pub fn desired_config(args: &DesiredArgs) -> Result<DesiredConfig> {
    let mut desired = match &args.json {
        Some(raw) => {
            let value: Value = serde_json::from_str(raw).context("Invalid --json value")?;
            DesiredConfig::from_value(value)?
        }
        None => DesiredConfig::new(),
    };

    for raw in &args.set {
        let (key, value) = parse_assignment(raw)?;
        if !crate::reconcile::is_recognized(&key) {
            tracing::warn!(key = %key, "Ignoring unrecognized member field");
        }
        desired.insert(key, value);
    }

    Ok(desired)
}

fn require_api_key(cli: &Cli, config: &Config) -> Result<String> {
    config.resolve_api_key(cli.api_key.as_deref()).context(
        "No Central API key. Pass --api-key, set ZEROTIER_CENTRAL_TOKEN, or add api_key to the config file",
    )
}

pub async fn handle_command(cli: &Cli, config: &Config) -> Result<CommandOutput> {
    let device = DeviceClient::system(config.cli_path.clone());

    if !device.is_available().await {
        bail!(
            "{} cannot be executed: ZeroTier does not appear to be installed",
            config.cli_path
        );
    }

    let central = CentralClient::new(
        config.central_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
        device.clone(),
    )?;

    let output = match &cli.command {
        Command::Version => CommandOutput::Value(Value::String(device.version().await?)),
        Command::Info => CommandOutput::Value(serde_json::to_value(device.info().await?)?),
        Command::NodeId => CommandOutput::Value(Value::String(device.node_id().await?)),
        Command::Networks => {
            CommandOutput::Value(serde_json::to_value(device.list_networks().await?)?)
        }
        Command::NetworkInfo { network_id } => {
            CommandOutput::Value(serde_json::to_value(device.network_info(network_id).await?)?)
        }
        Command::Join { network_id } => {
            CommandOutput::Value(serde_json::to_value(device.join(network_id).await?)?)
        }
        Command::Leave { network_id } => {
            CommandOutput::Value(serde_json::to_value(device.leave(network_id).await?)?)
        }
        Command::Member(MemberCommand::Get { network_id }) => {
            let api_key = require_api_key(cli, config)?;
            let member = central.get_member(network_id, &api_key).await?;
            CommandOutput::Value(serde_json::to_value(member)?)
        }
        Command::Member(MemberCommand::Update {
            network_id,
            desired,
        }) => {
            let api_key = require_api_key(cli, config)?;
            let desired = desired_config(desired)?;
            let member = central
                .update_member_config(network_id, &api_key, &desired)
                .await?;
            CommandOutput::Value(serde_json::to_value(member)?)
        }
        Command::State(state) => {
            let context = StateContext { dry_run: cli.test };
            let runner = StateRunner::new(ZeroTierStates::new(device, central, context));
            let call = match state {
                StateCommand::Joined { name, network_id } => StateCall::Joined {
                    name: name.clone(),
                    network_id: Some(network_id.clone()),
                },
                StateCommand::Member {
                    name,
                    network_id,
                    desired,
                } => StateCall::CentralMember {
                    name: name.clone(),
                    network_id: Some(network_id.clone()),
                    api_key: config.resolve_api_key(cli.api_key.as_deref()),
                    config: desired_config(desired)?,
                },
            };
            CommandOutput::State(runner.run(&call).await?)
        }
    };

    Ok(output)
}
