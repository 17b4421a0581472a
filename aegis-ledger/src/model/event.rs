use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable audit record appended alongside a lifecycle status change.
/// Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub id: String,
    pub kind: LifecycleEventKind,
    pub target_id: String,
    pub reason: String,
    /// UNIX seconds, stamped from the recording transaction.
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEventKind {
    Revocation,
    Blacklisting,
}

impl LifecycleEvent {
    pub fn new(kind: LifecycleEventKind, target_id: &str, reason: &str, timestamp: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            target_id: target_id.to_string(),
            reason: reason.to_string(),
            timestamp,
        }
    }
}

impl fmt::Display for LifecycleEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LifecycleEventKind::Revocation => "Revocation",
            LifecycleEventKind::Blacklisting => "Blacklisting",
        };
        write!(f, "{}", label)
    }
}
