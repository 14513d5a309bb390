// Device module — the local ZeroTier daemon, driven through its CLI.

pub mod client;
pub mod runner;
pub mod types;

pub use client::DeviceClient;
pub use runner::{CommandRunner, ProcessRunner};
pub use types::{NetworkMembershipStatus, NetworkStatus, NodeInfo};
