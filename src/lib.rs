pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::toml_config::ScoutConfig;
pub use crate::core::aggregator::{Aggregator, FetchMode};
pub use crate::core::query::{filter, sort, ResultSet};
pub use crate::domain::model::{CaseMode, JobPosting, SearchReport, Source, SortKey};
pub use crate::utils::error::{Result, ScoutError};
