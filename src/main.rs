use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use wordfreq_page::config::AppConfig;
use wordfreq_page::fetcher::Fetcher;
use wordfreq_page::results::PageReport;
use wordfreq_page::{Analyzer, FrequencyFilter, Threshold, analyze_url, server};

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            ::log::info!("Loading configuration from {}", path.display());
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    }
    .with_env_overrides()?;

    match args.command {
        Command::Serve { bind } => {
            let mut config = config;
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
            }
            server::serve(config).await?;
        }
        Command::Analyze {
            url,
            threshold,
            top,
            json,
        } => {
            let threshold = Threshold::new(threshold.unwrap_or(config.server.default_threshold))?;
            let filter = FrequencyFilter::new(threshold, top.unwrap_or(config.server.top_n))?;
            let fetcher = Fetcher::new(&config.fetch)?;
            let analyzer = Arc::new(Analyzer::from_config(&config));

            let start_time = std::time::Instant::now();
            let report = match analyze_url(&fetcher, analyzer, &url, filter).await {
                Ok(report) => report,
                Err(e) => {
                    ::log::error!("Failed to analyse {}: {}", url, e);
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            };
            ::log::info!(
                "Analysis complete in {:.2} seconds",
                start_time.elapsed().as_secs_f64()
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn print_report(report: &PageReport) {
    if let Some(title) = &report.title {
        println!("{}", title);
    }
    println!(
        "{} tokens, {} distinct, {} at or above threshold {}",
        report.analysis.total_tokens,
        report.analysis.distinct_tokens,
        report.analysis.filtered.len(),
        report.analysis.threshold.get()
    );

    for (rank, entry) in report.analysis.ranked.iter().enumerate() {
        println!("{:>3}. {:<20} {}", rank + 1, entry.token, entry.count);
    }
}
