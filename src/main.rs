use anyhow::Context;
use clap::Parser;
use roster_etl::app::runner::{self, BatchOutcome};
use roster_etl::{CliConfig, EtlEngine, HttpFetcher, LeaguePipeline, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match runner::bootstrap(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    tracing::info!("Starting roster collection for {:?}", config.collect.leagues);
    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let fetcher = HttpFetcher::new(
        &config.source.base_url,
        config.timeout(),
        &config.source.user_agent,
    )
    .context("failed to set up the HTTP fetcher")?;

    let mut outcome = BatchOutcome::default();
    for &league in &config.collect.leagues {
        let pipeline = LeaguePipeline::new(storage.clone(), fetcher.clone(), league);
        let engine = EtlEngine::new_with_monitoring(pipeline, cli.monitor);

        match engine.run().await {
            Ok(artifact) => {
                println!("✅ {} collected: {}", league, storage.full_path(&artifact).display());
            }
            Err(e) => outcome.record(&format!("Collecting {}", league), &e),
        }
    }

    let exit_code = outcome.exit_code();
    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
