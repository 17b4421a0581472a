use std::fmt;

use serde::{Deserialize, Serialize};

/// An issuing institution registered on the ledger.
///
/// Created `Pending`; activation is an administrative action outside the
/// ledger core. Blacklisting is terminal and recorded with a
/// [`LifecycleEvent`](crate::model::LifecycleEvent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub stake_amount: f64,
    pub status: InstitutionStatus,
    /// UNIX seconds, stamped from the registering transaction.
    pub joined_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstitutionStatus {
    Pending,
    Active,
    Blacklisted,
}

impl fmt::Display for InstitutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstitutionStatus::Pending => "PENDING",
            InstitutionStatus::Active => "ACTIVE",
            InstitutionStatus::Blacklisted => "BLACKLISTED",
        };
        write!(f, "{}", label)
    }
}
