use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of the given data and returns it as a hex string.
pub fn digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Computes the content hash of a degree from its canonical fields.
///
/// The digest covers, in order:
/// - student id
/// - student name
/// - degree name
/// - issuing institution id
/// - issue date
///
/// The ledger never recomputes this server-side; issuers derive it before
/// submitting a registration, and verifiers re-derive it from a presented
/// certificate. Field values are length-prefixed so that no two distinct
/// field tuples can collide by concatenation.
pub fn degree_content_digest(
    student_id: &str,
    student_name: &str,
    degree_name: &str,
    institution_id: &str,
    issue_date: &str,
) -> String {
    let mut hasher = Sha256::new();
    for field in [student_id, student_name, degree_name, institution_id, issue_date] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    hex::encode(hasher.finalize())
}
