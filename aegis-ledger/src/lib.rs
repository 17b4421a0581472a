pub mod contract;
pub mod model;
pub mod state;
pub mod substrate;

use std::sync::Arc;

use aegis_common::error::Result;
use tokio::sync::RwLock;

use crate::contract::{
    AttestationContract, DegreeRegistration, InstitutionRegistration, VerificationSubmission,
};
use crate::model::{
    AggregateStats, Degree, HistoryEntry, Institution, VerificationRecord, VerificationReport,
};
use crate::substrate::{StateTxn, StateView, Substrate};

/// Async facade over the attestation contract.
///
/// Serializes writers behind an `RwLock` (the substrate is single-writer)
/// while read-only queries share the read side. Each call is one atomic
/// transaction against the substrate.
#[derive(Debug)]
pub struct Ledger<S: Substrate> {
    store: Arc<RwLock<S>>,
}

impl<S: Substrate> Clone for Ledger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Substrate> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Seeds the statistics register. Optional; see
    /// [`AttestationContract::init_ledger`].
    pub async fn init(&self) -> Result<()> {
        self.submit(AttestationContract::init_ledger).await
    }

    pub async fn register_institution(&self, input: InstitutionRegistration) -> Result<String> {
        let id = self
            .submit(|txn| AttestationContract::register_institution(txn, &input))
            .await?;
        tracing::info!("registered institution {}", id);
        Ok(id)
    }

    pub async fn register_degree(&self, input: DegreeRegistration) -> Result<String> {
        let id = self
            .submit(|txn| AttestationContract::register_degree(txn, &input))
            .await?;
        tracing::info!("registered degree {}", id);
        Ok(id)
    }

    pub async fn verify_by_hash(&self, hash: &str) -> Result<VerificationReport> {
        self.query(|view| AttestationContract::verify_by_hash(view, hash))
            .await
    }

    pub async fn record_verification(&self, input: VerificationSubmission) -> Result<String> {
        let id = self
            .submit(|txn| AttestationContract::record_verification(txn, &input))
            .await?;
        tracing::info!("recorded verification {}", id);
        Ok(id)
    }

    pub async fn mark_degree_verified(&self, degree_id: &str) -> Result<String> {
        self.submit(|txn| AttestationContract::mark_degree_verified(txn, degree_id))
            .await
    }

    pub async fn revoke_degree(&self, degree_id: &str, reason: &str) -> Result<String> {
        let id = self
            .submit(|txn| AttestationContract::revoke_degree(txn, degree_id, reason))
            .await?;
        tracing::warn!("revoked degree {}: {}", id, reason);
        Ok(id)
    }

    pub async fn blacklist_institution(&self, institution_id: &str, reason: &str) -> Result<String> {
        let id = self
            .submit(|txn| AttestationContract::blacklist_institution(txn, institution_id, reason))
            .await?;
        tracing::warn!("blacklisted institution {}: {}", id, reason);
        Ok(id)
    }

    pub async fn update_payment_status(
        &self,
        verification_id: &str,
        payment_status: &str,
    ) -> Result<String> {
        self.submit(|txn| {
            AttestationContract::update_payment_status(txn, verification_id, payment_status)
        })
        .await
    }

    pub async fn degree_history(&self, degree_id: &str) -> Result<Vec<HistoryEntry>> {
        self.query(|view| AttestationContract::degree_history(view, degree_id))
            .await
    }

    pub async fn get_institution(&self, id: &str) -> Result<Option<Institution>> {
        self.query(|view| AttestationContract::get_institution(view, id))
            .await
    }

    pub async fn get_degree(&self, id: &str) -> Result<Option<Degree>> {
        self.query(|view| AttestationContract::get_degree(view, id))
            .await
    }

    pub async fn get_verification(&self, id: &str) -> Result<Option<VerificationRecord>> {
        self.query(|view| AttestationContract::get_verification(view, id))
            .await
    }

    pub async fn stats(&self) -> Result<AggregateStats> {
        self.query(AttestationContract::system_stats).await
    }

    async fn submit<R>(&self, op: impl FnOnce(&mut dyn StateTxn) -> Result<R>) -> Result<R> {
        let mut store = self.store.write().await;
        store.submit(op)
    }

    async fn query<R>(&self, op: impl FnOnce(&dyn StateView) -> Result<R>) -> Result<R> {
        let store = self.store.read().await;
        store.query(op)
    }
}
