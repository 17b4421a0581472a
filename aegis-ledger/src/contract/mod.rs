pub mod requests;

pub use requests::{DegreeRegistration, InstitutionRegistration, VerificationSubmission};

use aegis_common::error::{AegisError, Result};

use crate::model::{
    AggregateStats, Degree, DegreeStatus, HistoryAction, HistoryEntry, Institution,
    InstitutionStatus, LifecycleEvent, LifecycleEventKind, VerificationOutcome,
    VerificationRecord, VerificationReport,
};
use crate::state::hash_index::HashIndex;
use crate::state::key::{kinds, CompositeKey};
use crate::state::stats::StatsRegister;
use crate::state::store::EntityStore;
use crate::substrate::{StateTxn, StateView};

/// The attestation ledger state machine.
///
/// Every method is one transaction: it validates against the view the
/// substrate hands it, buffers its writes, and relies on the enclosing
/// [`Substrate::submit`](crate::substrate::Substrate::submit) for
/// atomicity. Read-only operations take a plain [`StateView`] and never
/// write. The contract holds no state of its own and performs no locking.
pub struct AttestationContract;

impl AttestationContract {
    /// Seeds the statistics register. Optional: the register also lazily
    /// bootstraps on first use.
    pub fn init_ledger(txn: &mut dyn StateTxn) -> Result<()> {
        StatsRegister::init(txn)
    }

    /// Registers an institution with status `Pending` and bumps the
    /// institution counter. The contact email is claimed in the same
    /// transaction through a dedicated index entry.
    pub fn register_institution(
        txn: &mut dyn StateTxn,
        input: &InstitutionRegistration,
    ) -> Result<String> {
        let key = CompositeKey::new(kinds::INSTITUTION, &[&input.id])?;
        if EntityStore::exists(txn.as_view(), &key)? {
            return Err(AegisError::DuplicateId(input.id.clone()));
        }

        let email_key = CompositeKey::new(kinds::INSTITUTION_EMAIL, &[&input.email])?;
        if EntityStore::exists(txn.as_view(), &email_key)? {
            return Err(AegisError::DuplicateEmail(input.email.clone()));
        }

        let institution = Institution {
            id: input.id.clone(),
            name: input.name.clone(),
            email: input.email.clone(),
            address: input.address.clone(),
            stake_amount: input.stake_amount,
            status: InstitutionStatus::Pending,
            joined_at: txn.timestamp(),
        };

        EntityStore::put(txn, &key, &institution)?;
        txn.put(&email_key.render(), input.id.as_bytes().to_vec())?;
        StatsRegister::bump_institutions(txn)?;

        Ok(institution.id)
    }

    /// Registers a degree with status `Registered`, binds its content hash,
    /// and bumps the degree counter — one atomic unit.
    pub fn register_degree(txn: &mut dyn StateTxn, input: &DegreeRegistration) -> Result<String> {
        HashIndex::validate_digest(&input.content_hash)?;

        let key = CompositeKey::new(kinds::DEGREE, &[&input.id])?;
        if EntityStore::exists(txn.as_view(), &key)? {
            return Err(AegisError::DuplicateId(input.id.clone()));
        }

        let institution_key = CompositeKey::new(kinds::INSTITUTION, &[&input.institution_id])?;
        if !EntityStore::exists(txn.as_view(), &institution_key)? {
            return Err(AegisError::UnknownInstitution(input.institution_id.clone()));
        }

        HashIndex::bind(txn, &input.content_hash, &input.id)?;

        let degree = Degree {
            id: input.id.clone(),
            student_id: input.student_id.clone(),
            student_name: input.student_name.clone(),
            degree_name: input.degree_name.clone(),
            institution_id: input.institution_id.clone(),
            issue_date: input.issue_date.clone(),
            content_hash: input.content_hash.clone(),
            status: DegreeStatus::Registered,
        };

        EntityStore::put(txn, &key, &degree)?;
        StatsRegister::bump_degrees(txn)?;

        Ok(degree.id)
    }

    /// Resolves a content hash to the current degree snapshot. Pure read;
    /// unknown hashes degrade to an `is_valid = false` report.
    pub fn verify_by_hash(view: &dyn StateView, hash: &str) -> Result<VerificationReport> {
        let degree_id = match HashIndex::resolve(view, hash)? {
            Some(id) => id,
            None => return Ok(VerificationReport::hash_not_found()),
        };

        let key = CompositeKey::new(kinds::DEGREE, &[&degree_id])?;
        match EntityStore::get::<Degree>(view, &key)? {
            Some(degree) => Ok(VerificationReport::valid(&degree)),
            None => {
                // The index never points at a missing record; report rather than trust it.
                tracing::warn!(
                    "hash '{}' resolves to degree '{}' but the record is missing",
                    hash,
                    degree_id
                );
                Ok(VerificationReport::record_missing(&degree_id))
            }
        }
    }

    /// Persists a verification attempt and folds its outcome into the
    /// statistics register.
    pub fn record_verification(
        txn: &mut dyn StateTxn,
        input: &VerificationSubmission,
    ) -> Result<String> {
        let key = CompositeKey::new(kinds::VERIFICATION, &[&input.id])?;
        if EntityStore::exists(txn.as_view(), &key)? {
            return Err(AegisError::DuplicateId(input.id.clone()));
        }

        if let Some(degree_id) = &input.degree_id {
            let degree_key = CompositeKey::new(kinds::DEGREE, &[degree_id])?;
            if !EntityStore::exists(txn.as_view(), &degree_key)? {
                return Err(AegisError::UnknownDegree(degree_id.clone()));
            }
        }

        let record = VerificationRecord {
            id: input.id.clone(),
            degree_id: input.degree_id.clone(),
            employer_id: input.employer_id.clone(),
            request_date: input.request_date.clone(),
            result: input.result,
            payment_amount: input.payment_amount,
            payment_status: input.payment_status.clone(),
        };

        EntityStore::put(txn, &key, &record)?;
        StatsRegister::record_outcome(txn, input.result == VerificationOutcome::Authentic)?;

        Ok(record.id)
    }

    /// Marks a degree `Verified` once the certificate pipeline has produced
    /// its artifact. Idempotent when already verified; a revoked degree is
    /// never resurrected.
    pub fn mark_degree_verified(txn: &mut dyn StateTxn, degree_id: &str) -> Result<String> {
        let key = CompositeKey::new(kinds::DEGREE, &[degree_id])?;
        let mut degree: Degree = EntityStore::get(txn.as_view(), &key)?
            .ok_or_else(|| AegisError::UnknownDegree(degree_id.to_string()))?;

        match degree.status {
            DegreeStatus::Revoked => Err(AegisError::InvalidTransition(format!(
                "degree '{}' is revoked",
                degree_id
            ))),
            DegreeStatus::Verified => Ok(degree.id),
            DegreeStatus::Registered => {
                degree.status = DegreeStatus::Verified;
                EntityStore::put(txn, &key, &degree)?;
                Ok(degree.id)
            }
        }
    }

    /// Revokes a degree and appends a revocation event.
    ///
    /// Re-revoking is an idempotent success: the status version is not
    /// rewritten, but a fresh event is still appended for the audit trail.
    pub fn revoke_degree(txn: &mut dyn StateTxn, degree_id: &str, reason: &str) -> Result<String> {
        let key = CompositeKey::new(kinds::DEGREE, &[degree_id])?;
        let mut degree: Degree = EntityStore::get(txn.as_view(), &key)?
            .ok_or_else(|| AegisError::UnknownDegree(degree_id.to_string()))?;

        if degree.status != DegreeStatus::Revoked {
            degree.status = DegreeStatus::Revoked;
            EntityStore::put(txn, &key, &degree)?;
        }

        let event = LifecycleEvent::new(
            LifecycleEventKind::Revocation,
            degree_id,
            reason,
            txn.timestamp(),
        );
        let event_key = CompositeKey::new(kinds::REVOCATION, &[&event.id])?;
        EntityStore::put(txn, &event_key, &event)?;

        Ok(degree.id)
    }

    /// Blacklists an institution and appends a blacklisting event.
    /// Idempotent like [`revoke_degree`](Self::revoke_degree).
    pub fn blacklist_institution(
        txn: &mut dyn StateTxn,
        institution_id: &str,
        reason: &str,
    ) -> Result<String> {
        let key = CompositeKey::new(kinds::INSTITUTION, &[institution_id])?;
        let mut institution: Institution = EntityStore::get(txn.as_view(), &key)?
            .ok_or_else(|| AegisError::UnknownInstitution(institution_id.to_string()))?;

        if institution.status != InstitutionStatus::Blacklisted {
            institution.status = InstitutionStatus::Blacklisted;
            EntityStore::put(txn, &key, &institution)?;
        }

        let event = LifecycleEvent::new(
            LifecycleEventKind::Blacklisting,
            institution_id,
            reason,
            txn.timestamp(),
        );
        let event_key = CompositeKey::new(kinds::BLACKLISTING, &[&event.id])?;
        EntityStore::put(txn, &event_key, &event)?;

        Ok(institution.id)
    }

    /// Rewrites the free-text payment status of a verification record.
    pub fn update_payment_status(
        txn: &mut dyn StateTxn,
        verification_id: &str,
        payment_status: &str,
    ) -> Result<String> {
        let key = CompositeKey::new(kinds::VERIFICATION, &[verification_id])?;
        let mut record: VerificationRecord = EntityStore::get(txn.as_view(), &key)?
            .ok_or_else(|| AegisError::UnknownVerification(verification_id.to_string()))?;

        record.payment_status = payment_status.to_string();
        EntityStore::put(txn, &key, &record)?;

        Ok(record.id)
    }

    /// Replays every version of a degree into a chronological status
    /// timeline, oldest first. Safe to re-run; fails only if the degree
    /// never existed.
    pub fn degree_history(view: &dyn StateView, degree_id: &str) -> Result<Vec<HistoryEntry>> {
        let key = CompositeKey::new(kinds::DEGREE, &[degree_id])?;
        let versions = EntityStore::history::<Degree>(view, &key)?;
        if versions.is_empty() {
            return Err(AegisError::UnknownDegree(degree_id.to_string()));
        }

        let timeline = versions
            .into_iter()
            .map(|version| match version.record {
                Some(degree) => HistoryEntry {
                    tx_id: version.tx_id,
                    timestamp: version.timestamp,
                    status: Some(degree.status),
                    action: HistoryAction::Update,
                },
                None => HistoryEntry {
                    tx_id: version.tx_id,
                    timestamp: version.timestamp,
                    status: None,
                    action: HistoryAction::Delete,
                },
            })
            .collect();

        Ok(timeline)
    }

    pub fn get_institution(view: &dyn StateView, id: &str) -> Result<Option<Institution>> {
        let key = CompositeKey::new(kinds::INSTITUTION, &[id])?;
        EntityStore::get(view, &key)
    }

    pub fn get_degree(view: &dyn StateView, id: &str) -> Result<Option<Degree>> {
        let key = CompositeKey::new(kinds::DEGREE, &[id])?;
        EntityStore::get(view, &key)
    }

    pub fn get_verification(view: &dyn StateView, id: &str) -> Result<Option<VerificationRecord>> {
        let key = CompositeKey::new(kinds::VERIFICATION, &[id])?;
        EntityStore::get(view, &key)
    }

    /// Current statistics register; zeroed if never written.
    pub fn system_stats(view: &dyn StateView) -> Result<AggregateStats> {
        StatsRegister::read(view)
    }
}
