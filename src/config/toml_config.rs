use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::core::League;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Batch configuration shared by the collector and the report generator.
/// Every section is optional; defaults reproduce the stock nba/nfl batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub collect: CollectConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    pub leagues: Vec<League>,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            leagues: vec![League::Nba, League::Nfl],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolReportConfig {
    pub league: League,
    pub school: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub schools: Vec<SchoolReportConfig>,
    pub distribution: Vec<League>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schools: vec![
                SchoolReportConfig {
                    league: League::Nfl,
                    school: "UCLA".to_string(),
                },
                SchoolReportConfig {
                    league: League::Nba,
                    school: "UCLA".to_string(),
                },
            ],
            distribution: vec![League::Nfl, League::Nba],
        }
    }
}

/// Report work for one league.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueReportPlan {
    pub league: League,
    pub schools: Vec<String>,
    pub distribution: bool,
}

impl ReportConfig {
    /// Group the configured reports by league, leagues in first-mention order.
    pub fn plans(&self) -> Vec<LeagueReportPlan> {
        let mentioned = self
            .schools
            .iter()
            .map(|s| s.league)
            .chain(self.distribution.iter().copied());

        let mut plans: Vec<LeagueReportPlan> = Vec::new();
        for league in mentioned {
            if plans.iter().any(|p| p.league == league) {
                continue;
            }
            plans.push(LeagueReportPlan {
                league,
                schools: self
                    .schools
                    .iter()
                    .filter(|s| s.league == league)
                    .map(|s| s.school.clone())
                    .collect(),
                distribution: self.distribution.contains(&league),
            });
        }
        plans
    }
}

impl RosterConfig {
    /// Load from a TOML file, or fall back to defaults when it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ProcessingError {
            message: format!("invalid env var pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.base_url", &self.source.base_url)?;
        validate_positive_number("source.timeout_seconds", self.source.timeout_seconds, 1)?;
        validate_path("output.path", &self.output.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_stock_batch() {
        let config = RosterConfig::default();

        assert_eq!(config.source.base_url, "https://www.espn.com");
        assert_eq!(config.collect.leagues, vec![League::Nba, League::Nfl]);
        assert_eq!(
            config.report.plans(),
            vec![
                LeagueReportPlan {
                    league: League::Nfl,
                    schools: vec!["UCLA".to_string()],
                    distribution: true,
                },
                LeagueReportPlan {
                    league: League::Nba,
                    schools: vec!["UCLA".to_string()],
                    distribution: true,
                },
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
base_url = "http://localhost:9000"
timeout_seconds = 5

[output]
path = "./reports"

[collect]
leagues = ["nfl", "NBA"]

[report]
distribution = ["nba"]

[[report.schools]]
league = "nfl"
school = "Alabama"

[[report.schools]]
league = "nfl"
school = "Ohio State"
"#;

        let config = RosterConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source.base_url, "http://localhost:9000");
        assert_eq!(config.source.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.output_path(), "./reports");
        assert_eq!(config.collect.leagues, vec![League::Nfl, League::Nba]);
        assert!(!config.logging.json);

        let plans = config.report.plans();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].league, League::Nfl);
        assert_eq!(plans[0].schools, vec!["Alabama", "Ohio State"]);
        assert!(!plans[0].distribution);
        assert_eq!(plans[1].league, League::Nba);
        assert!(plans[1].schools.is_empty());
        assert!(plans[1].distribution);
    }

    #[test]
    fn test_unknown_league_rejected() {
        let toml_content = r#"
[collect]
leagues = ["xfl"]
"#;
        assert!(RosterConfig::from_toml_str(toml_content).is_err());

        let toml_content = r#"
[collect]
leagues = ["nhl"]
"#;
        assert!(RosterConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROSTER_ETL_TEST_BASE_URL", "https://mirror.example.com");

        let toml_content = r#"
[source]
base_url = "${ROSTER_ETL_TEST_BASE_URL}"
"#;

        let config = RosterConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.base_url, "https://mirror.example.com");

        std::env::remove_var("ROSTER_ETL_TEST_BASE_URL");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[source]
base_url = "invalid-url"
"#;
        let config = RosterConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[source]
timeout_seconds = 0
"#;
        let config = RosterConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[collect]\nleagues = [\"nfl\"]\n")
            .unwrap();

        let config = RosterConfig::load_or_default(temp_file.path()).unwrap();
        assert_eq!(config.collect.leagues, vec![League::Nfl]);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = RosterConfig::load_or_default("/nonexistent/roster-etl.toml").unwrap();
        assert_eq!(config.collect.leagues, vec![League::Nba, League::Nfl]);
    }
}
