//! Business services.

pub mod analyzer;
pub mod cache;
pub mod retry;

pub use analyzer::{AnalyzeOutcome, SkinAnalyzer};
pub use cache::{content_hash, BoundedCache, ReportCache};
pub use retry::{AttemptFailure, AttemptOutcome, RetryPolicy, RetryState};
