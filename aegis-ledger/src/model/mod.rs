pub mod degree;
pub mod event;
pub mod history;
pub mod institution;
pub mod stats;
pub mod verification;

pub use degree::{Degree, DegreeStatus};
pub use event::{LifecycleEvent, LifecycleEventKind};
pub use history::{HistoryAction, HistoryEntry};
pub use institution::{Institution, InstitutionStatus};
pub use stats::AggregateStats;
pub use verification::{VerificationOutcome, VerificationRecord, VerificationReport};
