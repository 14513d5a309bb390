// Host-side dispatch of state calls
//
// Mirrors what a state host does around a state function: caller mistakes
// (missing ids or keys) are raised, while failures reported by the daemon or
// Central become a failed result carrying the error text.

use tracing::warn;

use super::{OperationResult, ZeroTierStates};
use crate::central::DesiredConfig;
use crate::errors::Result;

/// A state invocation by name, with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum StateCall {
    Joined {
        name: String,
        network_id: Option<String>,
    },
    CentralMember {
        name: String,
        network_id: Option<String>,
        api_key: Option<String>,
        config: DesiredConfig,
    },
}

impl StateCall {
    /// State function name as the host knows it.
    pub fn function(&self) -> &'static str {
        match self {
            StateCall::Joined { .. } => "zerotier.joined",
            StateCall::CentralMember { .. } => "zerotier.central_member",
        }
    }

    /// Name of the state declaration.
    pub fn name(&self) -> &str {
        match self {
            StateCall::Joined { name, .. } | StateCall::CentralMember { name, .. } => name,
        }
    }
}

pub struct StateRunner {
    states: ZeroTierStates,
}

impl StateRunner {
    pub fn new(states: ZeroTierStates) -> Self {
        Self { states }
    }

    pub async fn run(&self, call: &StateCall) -> Result<OperationResult> {
        let outcome = match call {
            StateCall::Joined { name, network_id } => {
                self.states.joined(name, network_id.as_deref()).await
            }
            StateCall::CentralMember {
                name,
                network_id,
                api_key,
                config,
            } => {
                self.states
                    .central_member(name, network_id.as_deref(), api_key.as_deref(), config)
                    .await
            }
        };

        match outcome {
            Ok(ret) => Ok(ret),
            Err(e) if e.is_invalid_argument() => Err(e),
            Err(e) => {
                warn!(state = call.function(), name = call.name(), error = %e, "State failed");
                Ok(OperationResult::failure(
                    call.name(),
                    format!("{} failed: {}", call.function(), e),
                ))
            }
        }
    }
}
