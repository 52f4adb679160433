pub mod aggregate;
pub mod collect;
pub mod streak;

pub use aggregate::{aggregate, Aggregator};
pub use collect::{collect_report, ReportRequest};
pub use streak::{compute_streaks, Streaks};
