use clap::Parser;
use job_scout::app::render;
use job_scout::app::session::Session;
use job_scout::utils::error::ErrorSeverity;
use job_scout::utils::{logger, validation::Validate};
use job_scout::{Aggregator, CliConfig, ResultSet, ScoutConfig, ScoutError};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting job-scout");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ job-scout failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> Result<(), ScoutError> {
    cli.validate()?;
    let config = cli.load_scout_config()?;
    config.validate()?;

    let aggregator = Aggregator::from_config(&config)?;
    tracing::debug!(
        "Sources: {:?}, mode: {:?}",
        aggregator.sources().collect::<Vec<_>>(),
        aggregator.mode()
    );

    if cli.interactive {
        return run_interactive(aggregator, &config).await;
    }

    let query = cli.query.as_deref().unwrap_or_default();
    let page = cli.page_number();
    let report = aggregator.search(query, page).await;

    for failed in report.failed_sources() {
        tracing::warn!("⚠️ No results from {}", failed.source);
    }
    if report.skipped_total() > 0 {
        tracing::info!("{} malformed listings skipped", report.skipped_total());
    }

    let mut results = ResultSet::new(report.into_postings());
    results.sort(config.presentation.sort, config.case_mode());

    let keyword = cli.filter.as_deref().unwrap_or_default();
    let shown = results.filtered(keyword);
    tracing::info!("Showing {} of {} postings", shown.len(), results.len());

    print!("{}", render::render(shown, config.presentation.format)?);
    Ok(())
}

async fn run_interactive(aggregator: Aggregator, config: &ScoutConfig) -> Result<(), ScoutError> {
    let mut session = Session::new(
        aggregator,
        config.presentation.sort,
        config.case_mode(),
        config.presentation.format,
    );
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin, tokio::io::stdout()).await
}
