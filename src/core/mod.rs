pub mod aggregator;
pub mod query;

pub use crate::domain::model::{JobPosting, SearchReport, SourceYield};
pub use crate::domain::ports::{ConfigProvider, JobSource};
pub use crate::utils::error::Result;
