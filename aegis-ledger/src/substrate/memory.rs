use std::collections::BTreeMap;

use aegis_common::error::Result;
use aegis_common::utils::time::current_time;
use uuid::Uuid;

use super::{KeyVersion, StateTxn, StateView, Substrate};

/// In-memory substrate keeping the full per-key version log.
///
/// Reference implementation of the substrate contract and the default test
/// vehicle. Keys are held in a `BTreeMap` so the namespace stays in
/// lexicographic order, matching the composite-key ordering guarantee.
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: BTreeMap<String, Vec<KeyVersion>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys that have ever been written (tombstoned keys included).
    pub fn key_count(&self) -> usize {
        self.committed.len()
    }

    fn current(&self, key: &str) -> Option<&KeyVersion> {
        self.committed.get(key).and_then(|versions| versions.last())
    }
}

impl StateView for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.current(key).and_then(|version| version.value.clone()))
    }

    fn history(&self, key: &str) -> Result<Vec<KeyVersion>> {
        Ok(self.committed.get(key).cloned().unwrap_or_default())
    }
}

struct MemoryTxn<'a> {
    store: &'a MemoryStore,
    writes: BTreeMap<String, Option<Vec<u8>>>,
    tx_id: String,
    timestamp: u64,
}

impl StateView for MemoryTxn<'_> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(buffered) = self.writes.get(key) {
            return Ok(buffered.clone());
        }
        self.store.get(key)
    }

    fn history(&self, key: &str) -> Result<Vec<KeyVersion>> {
        self.store.history(key)
    }
}

impl StateTxn for MemoryTxn<'_> {
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn as_view(&self) -> &dyn StateView {
        self
    }
}

impl Substrate for MemoryStore {
    fn submit<R>(&mut self, op: impl FnOnce(&mut dyn StateTxn) -> Result<R>) -> Result<R> {
        let tx_id = Uuid::new_v4().to_string();
        let timestamp = current_time();

        let (out, writes) = {
            let mut txn = MemoryTxn {
                store: self,
                writes: BTreeMap::new(),
                tx_id: tx_id.clone(),
                timestamp,
            };
            let out = op(&mut txn)?;
            (out, txn.writes)
        };

        tracing::debug!("committing tx {} ({} writes)", tx_id, writes.len());
        for (key, value) in writes {
            self.committed.entry(key).or_default().push(KeyVersion {
                tx_id: tx_id.clone(),
                timestamp,
                value,
            });
        }

        Ok(out)
    }

    fn query<R>(&self, op: impl FnOnce(&dyn StateView) -> Result<R>) -> Result<R> {
        op(self)
    }
}
