//! Start-up and failure reporting shared by the two binaries.

use crate::config::toml_config::RosterConfig;
use crate::utils::error::{ErrorSeverity, EtlError, Result};
use crate::utils::logger;
use crate::utils::validation::Validate;
use crate::CliConfig;

/// Load and validate the config named on the command line, then install the logger.
pub fn bootstrap(cli: &CliConfig) -> Result<RosterConfig> {
    let config = RosterConfig::load_or_default(&cli.config)?;

    if config.logging.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    config.validate()?;
    Ok(config)
}

pub fn log_failure(label: &str, e: &EtlError) {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        label,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}: {}", label, e.user_friendly_message());
}

/// Tracks the most severe failure across a batch of leagues.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    worst: Option<ErrorSeverity>,
}

impl BatchOutcome {
    pub fn record(&mut self, label: &str, e: &EtlError) {
        log_failure(label, e);
        self.worst = self.worst.max(Some(e.severity()));
    }

    pub fn exit_code(&self) -> i32 {
        self.worst.map(ErrorSeverity::exit_code).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_outcome_keeps_worst_severity() {
        let mut outcome = BatchOutcome::default();
        assert_eq!(outcome.exit_code(), 0);

        outcome.record(
            "nfl",
            &EtlError::FetchError {
                locator: "/nfl/teams".to_string(),
                message: "HTTP 500".to_string(),
            },
        );
        assert_eq!(outcome.exit_code(), 2);

        outcome.record(
            "nba",
            &EtlError::MalformedArtifact {
                artifact: "nba.json".to_string(),
                message: "missing field `School`".to_string(),
            },
        );
        assert_eq!(outcome.exit_code(), 1);
    }
}
