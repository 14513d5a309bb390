// Result record handed back to the state host

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::central::DesiredConfig;
use crate::device::NetworkMembershipStatus;
use crate::reconcile::ChangeSet;

/// Outcome of a state operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    /// Dry run: the state is not converged and would be changed.
    WouldChange,
}

impl Outcome {
    /// Host representation: `true`, `false`, or `None` for a dry run.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Outcome::Success => Some(true),
            Outcome::Failure => Some(false),
            Outcome::WouldChange => None,
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bool().serialize(serializer)
    }
}

/// What a state operation changed (or would change).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Changes {
    #[default]
    None,
    /// Network membership before and after a join.
    Membership {
        old: Option<NetworkMembershipStatus>,
        new: NetworkMembershipStatus,
    },
    /// Member fields that differ after an update.
    Fields(ChangeSet),
    /// Dry run of a member update: the desired config that would be applied.
    PendingMember(DesiredConfig),
}

impl Changes {
    pub fn is_none(&self) -> bool {
        matches!(self, Changes::None)
    }
}

impl Serialize for Changes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Changes::None => serializer.serialize_map(Some(0))?.end(),
            Changes::Membership { old, new } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("old", old)?;
                map.serialize_entry("new", new)?;
                map.end()
            }
            Changes::Fields(set) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("old", &set.old)?;
                map.serialize_entry("new", &set.new)?;
                map.end()
            }
            Changes::PendingMember(desired) => {
                #[derive(Serialize)]
                struct Pending<'a> {
                    old: &'a str,
                    new: &'a DesiredConfig,
                }
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("member", &Pending { old: "", new: desired })?;
                map.end()
            }
        }
    }
}

/// Uniform result of a state operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult {
    pub name: String,
    pub changes: Changes,
    pub result: Outcome,
    pub comment: String,
}

impl OperationResult {
    pub fn success(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::with_outcome(name, Outcome::Success, comment)
    }

    pub fn failure(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::with_outcome(name, Outcome::Failure, comment)
    }

    pub fn would_change(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::with_outcome(name, Outcome::WouldChange, comment)
    }

    fn with_outcome(name: impl Into<String>, result: Outcome, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            changes: Changes::None,
            result,
            comment: comment.into(),
        }
    }

    pub fn with_changes(mut self, changes: Changes) -> Self {
        self.changes = changes;
        self
    }

    pub fn is_success(&self) -> bool {
        self.result == Outcome::Success
    }
}
