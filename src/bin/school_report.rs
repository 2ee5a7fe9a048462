use clap::Parser;
use roster_etl::app::runner::{self, BatchOutcome};
use roster_etl::{CliConfig, EtlEngine, LocalStorage, ReportPipeline};

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

    let plans = config.report.plans();
    if plans.is_empty() {
        tracing::warn!("No reports configured");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let mut outcome = BatchOutcome::default();

    for plan in plans {
        let league = plan.league;
        let pipeline =
            ReportPipeline::new(storage.clone(), league, plan.schools, plan.distribution);
        let engine = EtlEngine::new_with_monitoring(pipeline, cli.monitor);

        match engine.run().await {
            Ok(written) => println!("✅ {} reports: {}", league, written),
            Err(e) => outcome.record(&format!("Reporting {}", league), &e),
        }
    }

    let exit_code = outcome.exit_code();
    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
