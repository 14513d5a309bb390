// Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "zerotier-state",
    version,
    about = "Manage ZeroTier network membership and Central member settings"
)]
pub struct Cli {
    /// Dry run: states report what would change without changing anything
    #[arg(long, global = true)]
    pub test: bool,

    /// Config file (default: ~/.zerotier-state/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Central API token (overrides config and ZEROTIER_CENTRAL_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub api_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Daemon version (zerotier-cli -v)
    Version,
    /// Node info (zerotier-cli -j info)
    Info,
    /// Local node id
    NodeId,
    /// Networks known to the daemon
    Networks,
    /// Status of one network
    NetworkInfo { network_id: String },
    /// Join a network
    Join { network_id: String },
    /// Leave a network
    Leave { network_id: String },
    /// Central member record of this node
    #[command(subcommand)]
    Member(MemberCommand),
    /// Run a state
    #[command(subcommand)]
    State(StateCommand),
}

#[derive(Debug, Subcommand)]
pub enum MemberCommand {
    /// Fetch this node's member record
    Get { network_id: String },
    /// Update recognized fields of this node's member record
    Update {
        network_id: String,
        #[command(flatten)]
        desired: DesiredArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum StateCommand {
    /// Ensure this node has joined a network
    Joined { name: String, network_id: String },
    /// Ensure this node's Central member record matches the desired settings
    Member {
        name: String,
        network_id: String,
        #[command(flatten)]
        desired: DesiredArgs,
    },
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct DesiredArgs {
    /// Desired field as KEY=VALUE; VALUE is parsed as JSON, else taken as a string
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Desired fields as a JSON object (applied before --set)
    #[arg(long, value_name = "JSON")]
    pub json: Option<String>,
}
