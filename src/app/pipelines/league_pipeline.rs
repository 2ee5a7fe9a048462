use crate::core::normalize::{normalize_row, COLLEGE_COLUMN, NAME_COLUMN};
use crate::core::roster::{discover_roster_links, extract_team};
use crate::core::{Fetcher, League, Pipeline, PlayerRecord, Storage, TeamRoster};
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Collects every roster of one league into the `<league>.json` artifact.
pub struct LeaguePipeline<S: Storage, F: Fetcher> {
    pub(crate) storage: S,
    pub(crate) fetcher: F,
    pub(crate) league: League,
}

impl<S: Storage, F: Fetcher> LeaguePipeline<S, F> {
    pub fn new(storage: S, fetcher: F, league: League) -> Self {
        Self {
            storage,
            fetcher,
            league,
        }
    }
}

/// Artifact bytes: a JSON array indented by four spaces, non-ASCII kept as UTF-8.
pub fn encode_artifact(records: &[PlayerRecord]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    Ok(out)
}

/// Flatten all teams and their sub-tables into one record sequence, in page order.
/// A roster table (one with a `Name` column) must also carry `College`.
pub fn flatten_rosters(teams: &[TeamRoster]) -> Result<Vec<PlayerRecord>> {
    let mut records = Vec::new();
    for team in teams {
        for table in &team.tables {
            if !table.has_column(NAME_COLUMN) {
                tracing::debug!(
                    "Skipping table without '{}' column on {}",
                    NAME_COLUMN,
                    team.locator
                );
                continue;
            }
            if !table.has_column(COLLEGE_COLUMN) {
                return Err(EtlError::MalformedTable {
                    team: team.team_name.clone(),
                    message: format!("roster table has no '{}' column", COLLEGE_COLUMN),
                });
            }
            for row in &table.rows {
                records.push(normalize_row(row, &team.team_name)?);
            }
        }
    }
    Ok(records)
}

#[async_trait::async_trait]
impl<S: Storage, F: Fetcher> Pipeline for LeaguePipeline<S, F> {
    type Extracted = Vec<TeamRoster>;
    type Transformed = Vec<PlayerRecord>;

    async fn extract(&self) -> Result<Vec<TeamRoster>> {
        tracing::info!("🚀 Collecting {} rosters", self.league);

        let links = discover_roster_links(&self.fetcher, self.league).await?;
        let mut teams = Vec::with_capacity(links.len());
        for link in &links {
            teams.push(extract_team(&self.fetcher, link).await?);
        }

        tracing::info!("Extracted {} teams", teams.len());
        Ok(teams)
    }

    async fn transform(&self, data: Vec<TeamRoster>) -> Result<Vec<PlayerRecord>> {
        let records = flatten_rosters(&data)?;
        tracing::info!("Normalized {} player records", records.len());
        Ok(records)
    }

    async fn load(&self, records: Vec<PlayerRecord>) -> Result<String> {
        let artifact = self.league.artifact_name();
        let json = encode_artifact(&records)?;

        tracing::debug!("Writing {} ({} bytes)", artifact, json.len());
        self.storage.write_file(&artifact, &json).await?;

        tracing::info!("💾 Saved {} players to {}", records.len(), artifact);
        Ok(artifact)
    }
}
