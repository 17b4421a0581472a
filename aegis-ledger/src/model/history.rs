use serde::{Deserialize, Serialize};

use crate::model::degree::DegreeStatus;

/// One step of a degree's reconstructed status timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub tx_id: String,
    pub timestamp: u64,
    /// `None` for tombstoned versions.
    pub status: Option<DegreeStatus>,
    pub action: HistoryAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    Update,
    Delete,
}
