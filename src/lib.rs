// zerotier-state - ZeroTier membership and Central member states
// Library exports

pub mod central;
pub mod cli;
pub mod config;
pub mod device;
pub mod errors;
pub mod reconcile;
pub mod state;

pub use errors::{Result, ZeroTierError};
