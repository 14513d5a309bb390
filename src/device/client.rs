// Daemon client — wraps `zerotier-cli` invocations.
//
// No logic beyond request/decode: each method is one CLI call followed by
// JSON decoding. Failures from the runner propagate unchanged.

use std::sync::Arc;

use tracing::debug;

use super::runner::{CommandRunner, ProcessRunner};
use super::types::{NetworkMembershipStatus, NodeInfo};
use crate::errors::{decode_json, Result, ZeroTierError};

/// Client for the local ZeroTier daemon.
#[derive(Clone)]
pub struct DeviceClient {
    runner: Arc<dyn CommandRunner>,
    program: String,
}

impl std::fmt::Debug for DeviceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceClient")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl DeviceClient {
    pub fn new(runner: Arc<dyn CommandRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Client that spawns the real CLI.
    pub fn system(program: impl Into<String>) -> Self {
        Self::new(Arc::new(ProcessRunner), program)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        debug!(program = %self.program, ?args, "Running daemon command");
        self.runner.run(&self.program, args).await
    }

    /// Whether the CLI can be executed on this host.
    pub async fn is_available(&self) -> bool {
        !matches!(
            self.run(&["-v"]).await,
            Err(ZeroTierError::CommandUnavailable { .. })
        )
    }

    /// Raw version text (`zerotier-cli -v`).
    pub async fn version(&self) -> Result<String> {
        Ok(self.run(&["-v"]).await?.trim().to_string())
    }

    /// Node info (`zerotier-cli -j info`).
    pub async fn info(&self) -> Result<NodeInfo> {
        let out = self.run(&["-j", "info"]).await?;
        decode_json("node info", &out)
    }

    /// Local node address, used as the member id in Central.
    pub async fn node_id(&self) -> Result<String> {
        Ok(self.info().await?.address)
    }

    /// All networks the daemon knows about (`zerotier-cli -j listnetworks`).
    pub async fn list_networks(&self) -> Result<Vec<NetworkMembershipStatus>> {
        let out = self.run(&["-j", "listnetworks"]).await?;
        decode_json("network list", &out)
    }

    /// Status of one network, or `None` when this node is not a member.
    pub async fn network_info(&self, network_id: &str) -> Result<Option<NetworkMembershipStatus>> {
        Ok(self
            .list_networks()
            .await?
            .into_iter()
            .find(|n| n.id == network_id))
    }

    /// Join a network. Joining an already-joined network is not an error.
    pub async fn join(&self, network_id: &str) -> Result<Option<NetworkMembershipStatus>> {
        let out = self.run(&["-j", "join", network_id]).await?;
        decode_json("join result", &out)
    }

    /// Leave a network.
    pub async fn leave(&self, network_id: &str) -> Result<Option<NetworkMembershipStatus>> {
        let out = self.run(&["-j", "leave", network_id]).await?;
        decode_json("leave result", &out)
    }
}
