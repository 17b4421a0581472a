use aegis_common::error::Result;

use crate::model::AggregateStats;
use crate::substrate::{StateTxn, StateView};

/// Well-known key of the statistics register. Lives outside the composite
/// namespace; there is exactly one such record.
pub const STATS_KEY: &str = "system-stats";

/// Transactional read-modify-write access to the statistics register.
///
/// Every mutating ledger operation funnels its counter delta through here,
/// inside its own transaction, so statistics are never observable out of
/// sync with the entities they describe. A missing register is initialized
/// to zeros on first use.
pub struct StatsRegister;

impl StatsRegister {
    /// Current register, or the zeroed default if never written.
    pub fn read(view: &dyn StateView) -> Result<AggregateStats> {
        match view.get(STATS_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(AggregateStats::default()),
        }
    }

    /// Seeds the register with zero counters.
    pub fn init(txn: &mut dyn StateTxn) -> Result<()> {
        let mut stats = AggregateStats::default();
        stats.last_updated = txn.timestamp();
        Self::write(txn, &stats)
    }

    pub fn bump_institutions(txn: &mut dyn StateTxn) -> Result<()> {
        Self::update(txn, |stats| stats.registered_institutions += 1)
    }

    pub fn bump_degrees(txn: &mut dyn StateTxn) -> Result<()> {
        Self::update(txn, |stats| stats.total_degrees += 1)
    }

    /// Counts a resolved verification outcome and recomputes the success
    /// rate exactly from the post-write counters.
    pub fn record_outcome(txn: &mut dyn StateTxn, is_authentic: bool) -> Result<()> {
        Self::update(txn, |stats| {
            stats.verification_count += 1;
            if is_authentic {
                stats.authentic_count += 1;
            } else {
                stats.failed_count += 1;
            }
        })
    }

    fn update(txn: &mut dyn StateTxn, apply: impl FnOnce(&mut AggregateStats)) -> Result<()> {
        let mut stats = Self::read(txn.as_view())?;
        apply(&mut stats);
        stats.recompute_success_rate();
        stats.last_updated = txn.timestamp();
        Self::write(txn, &stats)
    }

    fn write(txn: &mut dyn StateTxn, stats: &AggregateStats) -> Result<()> {
        let encoded = serde_json::to_vec(stats)?;
        txn.put(STATS_KEY, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::memory::MemoryStore;
    use crate::substrate::Substrate;

    #[test]
    fn test_lazy_bootstrap() {
        let mut store = MemoryStore::new();
        // No init call: first bump self-heals from the zeroed default.
        store.submit(StatsRegister::bump_institutions).unwrap();

        let stats = store.query(StatsRegister::read).unwrap();
        assert_eq!(stats.registered_institutions, 1);
        assert_eq!(stats.total_degrees, 0);
        assert!(stats.last_updated > 0);
    }

    #[test]
    fn test_success_rate_exact_across_outcomes() {
        let mut store = MemoryStore::new();
        for is_authentic in [true, true, false] {
            store
                .submit(|txn| StatsRegister::record_outcome(txn, is_authentic))
                .unwrap();
        }

        let stats = store.query(StatsRegister::read).unwrap();
        assert_eq!(stats.verification_count, 3);
        assert_eq!(stats.authentic_count, 2);
        assert_eq!(stats.failed_count, 1);
        assert_eq!(stats.success_rate, (2.0 / 3.0) * 100.0);
    }

    #[test]
    fn test_counters_move_with_enclosing_txn() {
        let mut store = MemoryStore::new();
        let result: Result<()> = store.submit(|txn| {
            StatsRegister::bump_degrees(txn)?;
            Err(aegis_common::error::AegisError::Substrate("abort".to_string()))
        });

        assert!(result.is_err());
        let stats = store.query(StatsRegister::read).unwrap();
        assert_eq!(stats.total_degrees, 0);
    }
}
