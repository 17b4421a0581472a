use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use aegis_common::error::{AegisError, Result};
use aegis_common::utils::time::current_time;
use redb::{Database, ReadableTable, TableDefinition};
use uuid::Uuid;

use super::{KeyVersion, StateTxn, StateView, Substrate};

/// Current value per ledger key.
pub const STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("state");
/// Append-only version log, keyed `(ledger key, global sequence)` so a range
/// scan over one key yields its versions in commit order.
pub const HISTORY_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("history");
/// Bookkeeping: next history sequence number.
pub const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const SEQ_KEY: &str = "next-seq";
const STORE_FILE: &str = "attestation.redb";

/// Durable substrate backed by a single redb file.
///
/// All writes of one [`Substrate::submit`] call land in a single redb write
/// transaction: the state table, every history version, and the sequence
/// counter move together or not at all.
pub struct RedbStore {
    db: Database,
}

impl fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedbStore").field("db", &"Redb").finish()
    }
}

impl RedbStore {
    /// Opens (or creates) the store under `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        let path = data_dir.as_ref().join(STORE_FILE);

        let db = Database::create(&path).map_err(AegisError::substrate)?;

        // Create tables up front so reads never race table creation.
        let write_txn = db.begin_write().map_err(AegisError::substrate)?;
        {
            write_txn.open_table(STATE_TABLE).map_err(AegisError::substrate)?;
            write_txn.open_table(HISTORY_TABLE).map_err(AegisError::substrate)?;
            write_txn.open_table(META_TABLE).map_err(AegisError::substrate)?;
        }
        write_txn.commit().map_err(AegisError::substrate)?;

        tracing::info!("opened attestation store at {:?}", path);
        Ok(Self { db })
    }

    fn committed_get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read().map_err(AegisError::substrate)?;
        let table = read_txn.open_table(STATE_TABLE).map_err(AegisError::substrate)?;
        let value = table
            .get(key)
            .map_err(AegisError::substrate)?
            .map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn committed_history(&self, key: &str) -> Result<Vec<KeyVersion>> {
        let read_txn = self.db.begin_read().map_err(AegisError::substrate)?;
        let table = read_txn.open_table(HISTORY_TABLE).map_err(AegisError::substrate)?;

        let mut versions = Vec::new();
        let range = table
            .range((key, 0u64)..=(key, u64::MAX))
            .map_err(AegisError::substrate)?;
        for entry in range {
            let (_, value) = entry.map_err(AegisError::substrate)?;
            let version: KeyVersion =
                bincode::deserialize(value.value()).map_err(AegisError::substrate)?;
            versions.push(version);
        }
        Ok(versions)
    }
}

impl StateView for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.committed_get(key)
    }

    fn history(&self, key: &str) -> Result<Vec<KeyVersion>> {
        self.committed_history(key)
    }
}

struct RedbTxn<'a> {
    store: &'a RedbStore,
    writes: BTreeMap<String, Option<Vec<u8>>>,
    tx_id: String,
    timestamp: u64,
}

impl StateView for RedbTxn<'_> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(buffered) = self.writes.get(key) {
            return Ok(buffered.clone());
        }
        self.store.committed_get(key)
    }

    fn history(&self, key: &str) -> Result<Vec<KeyVersion>> {
        self.store.committed_history(key)
    }
}

impl StateTxn for RedbTxn<'_> {
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

impl Substrate for RedbStore {
    fn submit<R>(&mut self, op: impl FnOnce(&mut dyn StateTxn) -> Result<R>) -> Result<R> {
        let tx_id = Uuid::new_v4().to_string();
        let timestamp = current_time();

        let (out, writes) = {
            let mut txn = RedbTxn {
                store: self,
                writes: BTreeMap::new(),
                tx_id: tx_id.clone(),
                timestamp,
            };
            let out = op(&mut txn)?;
            (out, txn.writes)
        };

        if writes.is_empty() {
            return Ok(out);
        }

        let write_txn = self.db.begin_write().map_err(AegisError::substrate)?;
        {
            let mut state = write_txn.open_table(STATE_TABLE).map_err(AegisError::substrate)?;
            let mut history = write_txn.open_table(HISTORY_TABLE).map_err(AegisError::substrate)?;
            let mut meta = write_txn.open_table(META_TABLE).map_err(AegisError::substrate)?;

            let mut seq = meta
                .get(SEQ_KEY)
                .map_err(AegisError::substrate)?
                .map(|guard| guard.value())
                .unwrap_or(0);

            for (key, value) in &writes {
                match value {
                    Some(bytes) => {
                        state
                            .insert(key.as_str(), bytes.as_slice())
                            .map_err(AegisError::substrate)?;
                    }
                    None => {
                        state.remove(key.as_str()).map_err(AegisError::substrate)?;
                    }
                }

                let version = KeyVersion {
                    tx_id: tx_id.clone(),
                    timestamp,
                    value: value.clone(),
                };
                let encoded = bincode::serialize(&version).map_err(AegisError::substrate)?;
                history
                    .insert((key.as_str(), seq), encoded.as_slice())
                    .map_err(AegisError::substrate)?;
                seq += 1;
            }

            meta.insert(SEQ_KEY, seq).map_err(AegisError::substrate)?;
        }
        write_txn.commit().map_err(AegisError::substrate)?;

        tracing::debug!("committed tx {} ({} writes)", tx_id, writes.len());
        Ok(out)
    }

    fn query<R>(&self, op: impl FnOnce(&dyn StateView) -> Result<R>) -> Result<R> {
        op(self)
    }
}
