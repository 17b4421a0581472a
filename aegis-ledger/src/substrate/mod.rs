pub mod memory;
pub mod redb;

use aegis_common::error::Result;
use serde::{Deserialize, Serialize};

/// One recorded version of a ledger key, in commit order.
///
/// `value = None` is a tombstone: the key was deleted by that transaction.
/// Versions are never rewritten or removed once committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyVersion {
    pub tx_id: String,
    pub timestamp: u64,
    pub value: Option<Vec<u8>>,
}

impl KeyVersion {
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}

/// Read access to ledger state.
///
/// Implemented by committed-state views (queries) and by open transactions,
/// where reads also see the transaction's own buffered writes.
pub trait StateView {
    /// Current value of the key, or `None` if absent or tombstoned.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Every committed version of the key, oldest first. Finite and safe to
    /// re-run; buffered (uncommitted) writes never appear here.
    fn history(&self, key: &str) -> Result<Vec<KeyVersion>>;
}

/// An open atomic transaction against the substrate.
///
/// Writes are buffered: nothing becomes visible to other readers until the
/// enclosing [`Substrate::submit`] commits, and everything is discarded if
/// the operation returns an error.
pub trait StateTxn: StateView {
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Records a tombstone version for the key.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Identifier the substrate assigned to this transaction.
    fn tx_id(&self) -> &str;

    /// Commit timestamp (UNIX seconds) stamped on every version this
    /// transaction writes.
    fn timestamp(&self) -> u64;

    /// The transaction as a read-only view (reads still see buffered
    /// writes).
    fn as_view(&self) -> &dyn StateView;
}

/// A history-preserving key-value store with atomic multi-key transactions.
///
/// Single writer, multiple readers: mutating operations go through
/// [`submit`](Substrate::submit) behind `&mut self`, read-only operations
/// through [`query`](Substrate::query). The contract layer never locks; the
/// caller is responsible for serializing writers (the `Ledger` facade does
/// this with an async RwLock).
pub trait Substrate {
    /// Runs `op` inside a fresh transaction. All writes commit atomically
    /// iff `op` returns `Ok`; on `Err` nothing is applied.
    fn submit<R>(&mut self, op: impl FnOnce(&mut dyn StateTxn) -> Result<R>) -> Result<R>;

    /// Runs a read-only operation against committed state.
    fn query<R>(&self, op: impl FnOnce(&dyn StateView) -> Result<R>) -> Result<R>;
}
