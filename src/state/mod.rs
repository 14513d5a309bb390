// State module — idempotent convergence operations for a declarative host.
//
//   joined          — the local node is a member of a network
//   central_member  — the node's Central member record matches a desired config
//
// Both return an `OperationResult`. In dry-run mode no mutating call is made.
// Collaborator failures propagate as errors; `StateRunner` turns them into
// failed results the way a host would.

pub mod result;
pub mod runner;

pub use result::{Changes, OperationResult, Outcome};
pub use runner::{StateCall, StateRunner};

use tracing::info;

use crate::central::{CentralClient, DesiredConfig};
use crate::device::DeviceClient;
use crate::errors::{Result, ZeroTierError};
use crate::reconcile;

/// Host-provided execution context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateContext {
    /// Report what would change without changing anything.
    pub dry_run: bool,
}

impl StateContext {
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

/// The ZeroTier states, bound to their collaborators.
#[derive(Debug, Clone)]
pub struct ZeroTierStates {
    device: DeviceClient,
    central: CentralClient,
    context: StateContext,
}

fn required<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ZeroTierError::invalid_argument(format!("{} is required", what))),
    }
}

impl ZeroTierStates {
    pub fn new(device: DeviceClient, central: CentralClient, context: StateContext) -> Self {
        Self {
            device,
            central,
            context,
        }
    }

    pub fn context(&self) -> StateContext {
        self.context
    }

    /// Ensure the local node has joined `network_id`.
    ///
    /// A network the daemon lists with any status other than ACCESS_DENIED
    /// counts as joined.
    pub async fn joined(&self, name: &str, network_id: Option<&str>) -> Result<OperationResult> {
        let network_id = required(network_id, "network_id")?;

        let current = self.device.network_info(network_id).await?;

        if let Some(net) = &current {
            if !net.is_access_denied() {
                return Ok(OperationResult::success(name, "Already joined network"));
            }
        }

        if self.context.dry_run {
            return Ok(OperationResult::would_change(name, "Will join network"));
        }

        let ret = match self.device.join(network_id).await? {
            Some(joined) => {
                info!(network_id, status = ?joined.status, "Joined network");
                OperationResult::success(name, "Successfully joined network").with_changes(
                    Changes::Membership {
                        old: current,
                        new: joined,
                    },
                )
            }
            None => OperationResult::failure(name, "Failed to join network"),
        };

        Ok(ret)
    }

    /// Ensure this node's Central member record matches `config`.
    ///
    /// The update is always submitted, even when nothing would change; the
    /// reported changes come from diffing the record before and after.
    pub async fn central_member(
        &self,
        name: &str,
        network_id: Option<&str>,
        api_key: Option<&str>,
        config: &DesiredConfig,
    ) -> Result<OperationResult> {
        let network_id = required(network_id, "network_id")?;
        let api_key = required(api_key, "api_key")?;

        if self.context.dry_run {
            return Ok(
                OperationResult::would_change(name, "Will update central member")
                    .with_changes(Changes::PendingMember(config.clone())),
            );
        }

        let original = self.central.get_member(network_id, api_key).await?;
        let merged = reconcile::apply_desired_fields(&original, config);
        let updated = self.central.update_member(network_id, api_key, &merged).await?;

        let ret = match reconcile::diff(&original, &updated).into_option() {
            None => OperationResult::success(name, "Central Member is up to date"),
            Some(changes) => {
                info!(network_id, fields = changes.len(), "Updated central member");
                OperationResult::success(name, "Updated central member")
                    .with_changes(Changes::Fields(changes))
            }
        };

        Ok(ret)
    }
}
