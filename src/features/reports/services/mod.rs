mod lifecycle_service;
mod query_service;

pub use lifecycle_service::LifecycleService;
pub use query_service::{QueryScope, QueryService, ReportFilter, ReportStats, StatusBucket};
