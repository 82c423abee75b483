#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::app::render::OutputFormat;
#[cfg(feature = "cli")]
use crate::domain::model::SortKey;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "job-scout")]
#[command(about = "Search Graduate Jobs, Reed and jobs.ac.uk in one go")]
pub struct CliConfig {
    /// Search term, e.g. "software engineer"
    pub query: Option<String>,

    /// Result page to fetch; invalid values fall back to 1
    #[arg(short, long, default_value = "1")]
    pub page: String,

    #[arg(short, long, value_enum)]
    pub sort: Option<SortKey>,

    /// Only show postings whose title, location or salary contain this keyword
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Ignore case when sorting
    #[arg(long)]
    pub case_insensitive: bool,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Fetch all sources at the same time
    #[arg(long)]
    pub concurrent: bool,

    #[arg(long)]
    pub timeout: Option<u64>,

    /// Read commands from stdin instead of running a single search
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}
