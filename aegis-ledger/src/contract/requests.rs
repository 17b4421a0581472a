use serde::{Deserialize, Serialize};

use crate::model::VerificationOutcome;

/// Input to `register_institution`. Status and join timestamp are assigned
/// by the ledger, not the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRegistration {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub stake_amount: f64,
}

/// Input to `register_degree`. The content hash is the caller-computed
/// digest of the degree's canonical fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeRegistration {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub degree_name: String,
    pub institution_id: String,
    pub issue_date: String,
    pub content_hash: String,
}

/// Input to `record_verification`.
///
/// `degree_id = None` records an attempt against an unknown or invalid
/// hash. The outcome arrives already resolved; the ledger does not hold
/// verifications in a pending state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationSubmission {
    pub id: String,
    pub degree_id: Option<String>,
    pub employer_id: String,
    pub request_date: String,
    pub result: VerificationOutcome,
    pub payment_amount: f64,
    pub payment_status: String,
}
