// Central module — the hosted ZeroTier controller API.
//
// Member records are fetched and updated per call; nothing is cached.

pub mod client;
pub mod types;

pub use client::CentralClient;
pub use types::{DesiredConfig, MemberRecord};
