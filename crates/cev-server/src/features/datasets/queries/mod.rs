//! Dataset queries (read operations)

pub mod get_report;
pub mod get_summary;
pub mod list_recent;

pub use get_report::{GetReportError, GetReportQuery};
pub use get_summary::{GetSummaryError, GetSummaryQuery};
pub use list_recent::{ListRecentDatasetsError, ListRecentDatasetsQuery, RECENT_DATASET_LIMIT};
