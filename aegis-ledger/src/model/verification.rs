use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::degree::{Degree, DegreeStatus};

/// A persisted verification attempt.
///
/// `degree_id = None` records an attempt against a hash the ledger does not
/// know. Payment fields are carried for the caller; the ledger does not
/// enforce payment semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub id: String,
    pub degree_id: Option<String>,
    pub employer_id: String,
    /// Caller-supplied request date, stored verbatim.
    pub request_date: String,
    pub result: VerificationOutcome,
    pub payment_amount: f64,
    pub payment_status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationOutcome {
    Pending,
    Authentic,
    Failed,
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VerificationOutcome::Pending => "PENDING",
            VerificationOutcome::Authentic => "AUTHENTIC",
            VerificationOutcome::Failed => "FAILED",
        };
        write!(f, "{}", label)
    }
}

/// Result of a hash lookup, returned by `verify_by_hash`.
///
/// Unknown hashes and defensive integrity failures degrade to
/// `is_valid = false` with a message instead of an error; the operation
/// never mutates state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub is_valid: bool,
    pub degree_id: Option<String>,
    pub institution_id: Option<String>,
    pub issue_date: Option<String>,
    pub status: Option<DegreeStatus>,
    pub message: String,
}

impl VerificationReport {
    pub fn valid(degree: &Degree) -> Self {
        Self {
            is_valid: true,
            degree_id: Some(degree.id.clone()),
            institution_id: Some(degree.institution_id.clone()),
            issue_date: Some(degree.issue_date.clone()),
            status: Some(degree.status),
            message: "degree successfully verified".to_string(),
        }
    }

    pub fn hash_not_found() -> Self {
        Self {
            is_valid: false,
            degree_id: None,
            institution_id: None,
            issue_date: None,
            status: None,
            message: "hash not found".to_string(),
        }
    }

    /// The hash resolved but the degree record is gone: an invariant
    /// violation surfaced defensively rather than as a hard error.
    pub fn record_missing(degree_id: &str) -> Self {
        Self {
            is_valid: false,
            degree_id: Some(degree_id.to_string()),
            institution_id: None,
            issue_date: None,
            status: None,
            message: "degree record missing".to_string(),
        }
    }
}
