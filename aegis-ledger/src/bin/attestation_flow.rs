use aegis_common::crypto::hash::degree_content_digest;
use aegis_ledger::contract::{DegreeRegistration, InstitutionRegistration, VerificationSubmission};
use aegis_ledger::model::VerificationOutcome;
use aegis_ledger::substrate::memory::MemoryStore;
use aegis_ledger::Ledger;

/// End-to-end scenario driver: runs the whole attestation lifecycle against
/// an in-memory substrate and prints each step's outcome.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ledger = Ledger::new(MemoryStore::new());
    ledger.init().await?;
    println!("Ledger initialized");

    // 1. Institution onboarding
    let institution_id = ledger
        .register_institution(InstitutionRegistration {
            id: "UNI-1".to_string(),
            name: "Atlantis Institute of Technology".to_string(),
            email: "registrar@atlantis.edu".to_string(),
            address: "1 Harbor Way, Atlantis".to_string(),
            stake_amount: 5_000.0,
        })
        .await?;
    println!("✅ Institution registered: {}", institution_id);

    // 2. Degree attestation
    let content_hash = degree_content_digest(
        "STU-42",
        "Ada Lovelace",
        "BSc Mathematics",
        &institution_id,
        "2024-06-30",
    );
    let degree_id = ledger
        .register_degree(DegreeRegistration {
            id: "DEG-1".to_string(),
            student_id: "STU-42".to_string(),
            student_name: "Ada Lovelace".to_string(),
            degree_name: "BSc Mathematics".to_string(),
            institution_id: institution_id.clone(),
            issue_date: "2024-06-30".to_string(),
            content_hash: content_hash.clone(),
        })
        .await?;
    println!("✅ Degree registered: {} (hash {})", degree_id, &content_hash[..12]);

    // 3. Verification by hash
    let report = ledger.verify_by_hash(&content_hash).await?;
    println!(
        "Verification: valid={} status={:?} message='{}'",
        report.is_valid, report.status, report.message
    );

    let miss = ledger.verify_by_hash("deadbeef").await?;
    println!("Unknown hash: valid={} message='{}'", miss.is_valid, miss.message);

    // 4. Record the employer's verification attempt
    let verification_id = ledger
        .record_verification(VerificationSubmission {
            id: "VER-1".to_string(),
            degree_id: Some(degree_id.clone()),
            employer_id: "EMP-7".to_string(),
            request_date: "2024-07-02".to_string(),
            result: VerificationOutcome::Authentic,
            payment_amount: 25.0,
            payment_status: "PENDING".to_string(),
        })
        .await?;
    ledger.update_payment_status(&verification_id, "PAID").await?;
    println!("✅ Verification recorded: {}", verification_id);

    // 5. Certificate pipeline confirms the artifact
    ledger.mark_degree_verified(&degree_id).await?;

    // 6. Revocation and history replay
    ledger.revoke_degree(&degree_id, "issued in error").await?;
    let post_revoke = ledger.verify_by_hash(&content_hash).await?;
    println!(
        "After revocation: valid={} status={:?}",
        post_revoke.is_valid, post_revoke.status
    );

    println!("\nHistory of {}:", degree_id);
    for entry in ledger.degree_history(&degree_id).await? {
        println!(
            "  tx {} at {} -> {:?} ({:?})",
            &entry.tx_id[..8],
            entry.timestamp,
            entry.status,
            entry.action
        );
    }

    let stats = ledger.stats().await?;
    println!(
        "\nStats: institutions={} degrees={} verifications={} success_rate={:.1}%",
        stats.registered_institutions,
        stats.total_degrees,
        stats.verification_count,
        stats.success_rate
    );

    Ok(())
}
