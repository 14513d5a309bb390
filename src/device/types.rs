// Records decoded from `zerotier-cli -j` output

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output of `zerotier-cli -j info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// 10-hex-digit node address; the local node id used by Central.
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    #[serde(
        rename = "publicIdentity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_identity: Option<String>,
    /// Everything else the daemon reports.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-network status as reported by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkStatus {
    RequestingConfiguration,
    Ok,
    AccessDenied,
    NotFound,
    PortError,
    ClientTooOld,
    AuthenticationRequired,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One entry of `zerotier-cli -j listnetworks`, also returned by join/leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMembershipStatus {
    /// 16-hex-digit network id.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub status: NetworkStatus,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub network_type: Option<String>,
    #[serde(rename = "assignedAddresses", default)]
    pub assigned_addresses: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NetworkMembershipStatus {
    pub fn is_access_denied(&self) -> bool {
        self.status == NetworkStatus::AccessDenied
    }
}
