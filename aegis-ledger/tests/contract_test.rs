use aegis_common::crypto::hash::digest;
use aegis_common::error::AegisError;
use aegis_ledger::contract::{
    AttestationContract, DegreeRegistration, InstitutionRegistration, VerificationSubmission,
};
use aegis_ledger::model::{DegreeStatus, HistoryAction, VerificationOutcome};
use aegis_ledger::state::hash_index::HashIndex;
use aegis_ledger::substrate::memory::MemoryStore;
use aegis_ledger::substrate::Substrate;

fn institution(id: &str, email: &str) -> InstitutionRegistration {
    InstitutionRegistration {
        id: id.to_string(),
        name: format!("{} University", id),
        email: email.to_string(),
        address: "42 Campus Road".to_string(),
        stake_amount: 1_000.0,
    }
}

fn degree(id: &str, institution_id: &str, content_hash: &str) -> DegreeRegistration {
    DegreeRegistration {
        id: id.to_string(),
        student_id: "STU-1".to_string(),
        student_name: "Grace Hopper".to_string(),
        degree_name: "MSc Computer Science".to_string(),
        institution_id: institution_id.to_string(),
        issue_date: "2024-06-30".to_string(),
        content_hash: content_hash.to_string(),
    }
}

fn verification(id: &str, degree_id: Option<&str>, result: VerificationOutcome) -> VerificationSubmission {
    VerificationSubmission {
        id: id.to_string(),
        degree_id: degree_id.map(|d| d.to_string()),
        employer_id: "EMP-1".to_string(),
        request_date: "2024-07-01".to_string(),
        result,
        payment_amount: 25.0,
        payment_status: "PENDING".to_string(),
    }
}

fn store_with_institution(id: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .submit(|txn| {
            AttestationContract::register_institution(
                txn,
                &institution(id, &format!("registrar@{}.edu", id.to_lowercase())),
            )
        })
        .unwrap();
    store
}

#[test]
fn test_register_then_verify_round_trip() {
    let mut store = store_with_institution("UNI-1");
    let hash = digest(b"degree-1");

    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &hash)))
        .unwrap();

    let report = store
        .query(|view| AttestationContract::verify_by_hash(view, &hash))
        .unwrap();
    assert!(report.is_valid);
    assert_eq!(report.degree_id.as_deref(), Some("DEG-1"));
    assert_eq!(report.institution_id.as_deref(), Some("UNI-1"));
    assert_eq!(report.status, Some(DegreeStatus::Registered));
}

#[test]
fn test_duplicate_degree_id_rejected_first_unchanged() {
    let mut store = store_with_institution("UNI-1");
    let hash = digest(b"degree-1");

    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &hash)))
        .unwrap();

    let other_hash = digest(b"degree-other");
    let result = store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &other_hash)));
    assert!(matches!(result, Err(AegisError::DuplicateId(_))));

    // First registration intact, second hash never bound.
    let stored = store
        .query(|view| AttestationContract::get_degree(view, "DEG-1"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.content_hash, hash);
    assert_eq!(
        store.query(|view| HashIndex::resolve(view, &other_hash)).unwrap(),
        None
    );
}

#[test]
fn test_duplicate_content_hash_rejected() {
    let mut store = store_with_institution("UNI-1");
    let hash = digest(b"shared");

    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &hash)))
        .unwrap();

    let result = store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-2", "UNI-1", &hash)));
    assert!(matches!(result, Err(AegisError::DuplicateHash(_))));

    // Exactly one degree made it; the hash still points at the winner.
    assert_eq!(
        store.query(|view| HashIndex::resolve(view, &hash)).unwrap(),
        Some("DEG-1".to_string())
    );
    assert!(store
        .query(|view| AttestationContract::get_degree(view, "DEG-2"))
        .unwrap()
        .is_none());
    let stats = store
        .query(AttestationContract::system_stats)
        .unwrap();
    assert_eq!(stats.total_degrees, 1);
}

#[test]
fn test_revoked_degree_still_verifies_with_revoked_status() {
    let mut store = store_with_institution("UNI-1");
    let hash = digest(b"degree-1");

    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &hash)))
        .unwrap();
    store
        .submit(|txn| AttestationContract::revoke_degree(txn, "DEG-1", "fraud"))
        .unwrap();

    let report = store
        .query(|view| AttestationContract::verify_by_hash(view, &hash))
        .unwrap();
    assert!(report.is_valid);
    assert_eq!(report.status, Some(DegreeStatus::Revoked));

    let history = store
        .query(|view| AttestationContract::degree_history(view, "DEG-1"))
        .unwrap();
    assert!(history.len() >= 2);
    assert_eq!(history[0].status, Some(DegreeStatus::Registered));
    assert_eq!(history.last().unwrap().status, Some(DegreeStatus::Revoked));
    assert!(history.iter().all(|entry| entry.action == HistoryAction::Update));
}

#[test]
fn test_success_rate_is_exact() {
    let mut store = store_with_institution("UNI-1");
    let hash = digest(b"degree-1");
    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &hash)))
        .unwrap();

    // 7 verifications: 3 authentic, 4 failed.
    for i in 0..7 {
        let result = if i < 3 {
            VerificationOutcome::Authentic
        } else {
            VerificationOutcome::Failed
        };
        let id = format!("VER-{}", i);
        store
            .submit(|txn| {
                AttestationContract::record_verification(
                    txn,
                    &verification(&id, Some("DEG-1"), result),
                )
            })
            .unwrap();
    }

    let stats = store.query(AttestationContract::system_stats).unwrap();
    assert_eq!(stats.verification_count, 7);
    assert_eq!(stats.authentic_count, 3);
    assert_eq!(stats.failed_count, 4);
    assert_eq!(stats.success_rate, (3.0 / 7.0) * 100.0);
}

#[test]
fn test_scenario_known_and_unknown_hash() {
    let mut store = MemoryStore::new();
    let h1 = digest(b"H1");
    let h2 = digest(b"H2");

    store
        .submit(|txn| {
            AttestationContract::register_institution(txn, &institution("UNI-1", "registrar@uni-1.edu"))
        })
        .unwrap();
    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &h1)))
        .unwrap();

    let found = store
        .query(|view| AttestationContract::verify_by_hash(view, &h1))
        .unwrap();
    assert!(found.is_valid);
    assert_eq!(found.degree_id.as_deref(), Some("DEG-1"));
    assert_eq!(found.status, Some(DegreeStatus::Registered));

    let missing = store
        .query(|view| AttestationContract::verify_by_hash(view, &h2))
        .unwrap();
    assert!(!missing.is_valid);
    assert_eq!(missing.message, "hash not found");
}

#[test]
fn test_degree_against_unknown_institution_leaves_no_partial_state() {
    let mut store = MemoryStore::new();
    let hash = digest(b"degree-1");

    let result = store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "GHOST", &hash)));
    assert!(matches!(result, Err(AegisError::UnknownInstitution(_))));

    assert_eq!(store.query(|view| HashIndex::resolve(view, &hash)).unwrap(), None);
    let stats = store.query(AttestationContract::system_stats).unwrap();
    assert_eq!(stats.total_degrees, 0);
    assert_eq!(store.key_count(), 0);
}

#[test]
fn test_duplicate_institution_email_rejected() {
    let mut store = MemoryStore::new();
    store
        .submit(|txn| {
            AttestationContract::register_institution(txn, &institution("UNI-1", "shared@uni.edu"))
        })
        .unwrap();

    let result = store.submit(|txn| {
        AttestationContract::register_institution(txn, &institution("UNI-2", "shared@uni.edu"))
    });
    assert!(matches!(result, Err(AegisError::DuplicateEmail(_))));

    let stats = store.query(AttestationContract::system_stats).unwrap();
    assert_eq!(stats.registered_institutions, 1);
}

#[test]
fn test_verification_against_unknown_degree_rejected() {
    let mut store = store_with_institution("UNI-1");

    let result = store.submit(|txn| {
        AttestationContract::record_verification(
            txn,
            &verification("VER-1", Some("GHOST"), VerificationOutcome::Authentic),
        )
    });
    assert!(matches!(result, Err(AegisError::UnknownDegree(_))));

    // A null degree reference records the failed attempt instead.
    store
        .submit(|txn| {
            AttestationContract::record_verification(
                txn,
                &verification("VER-1", None, VerificationOutcome::Failed),
            )
        })
        .unwrap();
    let record = store
        .query(|view| AttestationContract::get_verification(view, "VER-1"))
        .unwrap()
        .unwrap();
    assert_eq!(record.degree_id, None);
    assert_eq!(record.result, VerificationOutcome::Failed);
}

#[test]
fn test_duplicate_verification_id_rejected() {
    let mut store = store_with_institution("UNI-1");
    let hash = digest(b"degree-1");
    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &hash)))
        .unwrap();

    store
        .submit(|txn| {
            AttestationContract::record_verification(
                txn,
                &verification("VER-1", Some("DEG-1"), VerificationOutcome::Authentic),
            )
        })
        .unwrap();
    let result = store.submit(|txn| {
        AttestationContract::record_verification(
            txn,
            &verification("VER-1", Some("DEG-1"), VerificationOutcome::Failed),
        )
    });
    assert!(matches!(result, Err(AegisError::DuplicateId(_))));

    // The rejected call must not have skewed the counters.
    let stats = store.query(AttestationContract::system_stats).unwrap();
    assert_eq!(stats.verification_count, 1);
    assert_eq!(stats.authentic_count, 1);
}

#[test]
fn test_re_revocation_appends_event_without_new_version() {
    let mut store = store_with_institution("UNI-1");
    let hash = digest(b"degree-1");
    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &hash)))
        .unwrap();

    store
        .submit(|txn| AttestationContract::revoke_degree(txn, "DEG-1", "fraud"))
        .unwrap();
    let versions_after_first = store
        .query(|view| AttestationContract::degree_history(view, "DEG-1"))
        .unwrap()
        .len();

    store
        .submit(|txn| AttestationContract::revoke_degree(txn, "DEG-1", "fraud, again"))
        .unwrap();
    let versions_after_second = store
        .query(|view| AttestationContract::degree_history(view, "DEG-1"))
        .unwrap()
        .len();

    // Idempotent at the status level: no new degree version...
    assert_eq!(versions_after_first, versions_after_second);
    // ...but the second event landed (degree + email + institution + hash +
    // stats + two event keys).
    assert_eq!(store.key_count(), 7);
}

#[test]
fn test_mark_verified_never_resurrects_revoked() {
    let mut store = store_with_institution("UNI-1");
    let hash = digest(b"degree-1");
    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &hash)))
        .unwrap();

    store
        .submit(|txn| AttestationContract::mark_degree_verified(txn, "DEG-1"))
        .unwrap();
    assert_eq!(
        store
            .query(|view| AttestationContract::get_degree(view, "DEG-1"))
            .unwrap()
            .unwrap()
            .status,
        DegreeStatus::Verified
    );

    // Idempotent when already verified.
    store
        .submit(|txn| AttestationContract::mark_degree_verified(txn, "DEG-1"))
        .unwrap();

    store
        .submit(|txn| AttestationContract::revoke_degree(txn, "DEG-1", "fraud"))
        .unwrap();
    let result = store.submit(|txn| AttestationContract::mark_degree_verified(txn, "DEG-1"));
    assert!(matches!(result, Err(AegisError::InvalidTransition(_))));
    assert_eq!(
        store
            .query(|view| AttestationContract::get_degree(view, "DEG-1"))
            .unwrap()
            .unwrap()
            .status,
        DegreeStatus::Revoked
    );
}

#[test]
fn test_blacklist_institution_records_event_and_status() {
    let mut store = store_with_institution("UNI-1");

    store
        .submit(|txn| AttestationContract::blacklist_institution(txn, "UNI-1", "stake slashed"))
        .unwrap();

    let inst = store
        .query(|view| AttestationContract::get_institution(view, "UNI-1"))
        .unwrap()
        .unwrap();
    assert_eq!(
        inst.status,
        aegis_ledger::model::InstitutionStatus::Blacklisted
    );

    let result =
        store.submit(|txn| AttestationContract::blacklist_institution(txn, "GHOST", "nope"));
    assert!(matches!(result, Err(AegisError::UnknownInstitution(_))));
}

#[test]
fn test_history_of_unknown_degree_fails() {
    let store = MemoryStore::new();
    let result = store.query(|view| AttestationContract::degree_history(view, "GHOST"));
    assert!(matches!(result, Err(AegisError::UnknownDegree(_))));
}

#[test]
fn test_update_payment_status_rewrites_record() {
    let mut store = store_with_institution("UNI-1");
    let hash = digest(b"degree-1");
    store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", &hash)))
        .unwrap();
    store
        .submit(|txn| {
            AttestationContract::record_verification(
                txn,
                &verification("VER-1", Some("DEG-1"), VerificationOutcome::Authentic),
            )
        })
        .unwrap();

    store
        .submit(|txn| AttestationContract::update_payment_status(txn, "VER-1", "PAID"))
        .unwrap();
    let record = store
        .query(|view| AttestationContract::get_verification(view, "VER-1"))
        .unwrap()
        .unwrap();
    assert_eq!(record.payment_status, "PAID");
    // Everything else is untouched.
    assert_eq!(record.result, VerificationOutcome::Authentic);

    let result =
        store.submit(|txn| AttestationContract::update_payment_status(txn, "GHOST", "PAID"));
    assert!(matches!(result, Err(AegisError::UnknownVerification(_))));
}

#[test]
fn test_malformed_content_hash_rejected_before_writes() {
    let mut store = store_with_institution("UNI-1");

    let result = store
        .submit(|txn| AttestationContract::register_degree(txn, &degree("DEG-1", "UNI-1", "not-hex!")));
    assert!(matches!(result, Err(AegisError::InvalidHash(_))));
    assert!(store
        .query(|view| AttestationContract::get_degree(view, "DEG-1"))
        .unwrap()
        .is_none());
}
