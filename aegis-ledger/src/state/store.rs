use aegis_common::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::state::key::CompositeKey;
use crate::substrate::{StateTxn, StateView};

/// One past version of a stored record.
#[derive(Debug, Clone)]
pub struct RecordVersion<T> {
    pub tx_id: String,
    pub timestamp: u64,
    /// `None` when the version is a tombstone.
    pub record: Option<T>,
}

/// Typed get/put/history over the substrate for records living under a
/// [`CompositeKey`]. Records serialize as JSON; all calls participate in the
/// enclosing transaction's atomicity.
pub struct EntityStore;

impl EntityStore {
    pub fn put<T: Serialize>(txn: &mut dyn StateTxn, key: &CompositeKey, record: &T) -> Result<()> {
        let encoded = serde_json::to_vec(record)?;
        txn.put(&key.render(), encoded)
    }

    pub fn get<T: DeserializeOwned>(view: &dyn StateView, key: &CompositeKey) -> Result<Option<T>> {
        match view.get(&key.render())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn exists(view: &dyn StateView, key: &CompositeKey) -> Result<bool> {
        view.exists(&key.render())
    }

    pub fn delete(txn: &mut dyn StateTxn, key: &CompositeKey) -> Result<()> {
        txn.delete(&key.render())
    }

    /// Replays every committed version of the record, oldest first.
    pub fn history<T: DeserializeOwned>(
        view: &dyn StateView,
        key: &CompositeKey,
    ) -> Result<Vec<RecordVersion<T>>> {
        let mut versions = Vec::new();
        for version in view.history(&key.render())? {
            let record = match &version.value {
                Some(bytes) => Some(serde_json::from_slice(bytes)?),
                None => None,
            };
            versions.push(RecordVersion {
                tx_id: version.tx_id,
                timestamp: version.timestamp,
                record,
            });
        }
        Ok(versions)
    }
}
