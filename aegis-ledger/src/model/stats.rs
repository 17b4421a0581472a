use serde::{Deserialize, Serialize};

/// The aggregate statistics register: a singleton record updated inside the
/// same transaction as the business write it describes.
///
/// All counters are monotonic non-decreasing. The success rate is never
/// adjusted incrementally; it is recomputed exactly from the stored
/// authentic/failed counters on every write, so repeated updates cannot
/// accumulate rounding drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub registered_institutions: u64,
    pub total_degrees: u64,
    pub verification_count: u64,
    pub authentic_count: u64,
    pub failed_count: u64,
    /// Percentage in `[0, 100]`.
    pub success_rate: f64,
    /// UNIX seconds of the last mutating transaction; 0 until first use.
    pub last_updated: u64,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            registered_institutions: 0,
            total_degrees: 0,
            verification_count: 0,
            authentic_count: 0,
            failed_count: 0,
            success_rate: 100.0,
            last_updated: 0,
        }
    }
}

impl AggregateStats {
    /// Recomputes the success rate from the resolved-outcome counters.
    /// With no resolved verifications yet the rate reports 100.
    pub fn recompute_success_rate(&mut self) {
        let resolved = self.authentic_count + self.failed_count;
        self.success_rate = if resolved == 0 {
            100.0
        } else {
            (self.authentic_count as f64 / resolved as f64) * 100.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_exact_from_counters() {
        let mut stats = AggregateStats::default();
        stats.authentic_count = 1;
        stats.failed_count = 2;
        stats.recompute_success_rate();
        assert_eq!(stats.success_rate, (1.0_f64 / 3.0) * 100.0);

        // Recomputing again never drifts.
        let before = stats.success_rate;
        stats.recompute_success_rate();
        assert_eq!(stats.success_rate, before);
    }

    #[test]
    fn test_rate_with_no_resolved_outcomes() {
        let mut stats = AggregateStats::default();
        stats.recompute_success_rate();
        assert_eq!(stats.success_rate, 100.0);
    }
}
