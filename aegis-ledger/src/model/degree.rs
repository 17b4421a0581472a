use std::fmt;

use serde::{Deserialize, Serialize};

/// An attested academic degree.
///
/// The content hash is computed by the issuer from the degree's canonical
/// fields and permanently bound to the id through the hash index; the
/// binding is never rewritten, even after revocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub degree_name: String,
    pub institution_id: String,
    /// Caller-supplied issue date, stored verbatim.
    pub issue_date: String,
    pub content_hash: String,
    pub status: DegreeStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DegreeStatus {
    Registered,
    Verified,
    Revoked,
}

impl fmt::Display for DegreeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DegreeStatus::Registered => "REGISTERED",
            DegreeStatus::Verified => "VERIFIED",
            DegreeStatus::Revoked => "REVOKED",
        };
        write!(f, "{}", label)
    }
}
