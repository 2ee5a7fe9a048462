use crate::domain::model::{League, PlayerRecord, SchoolCount, SchoolGrouping, SchoolRanking};
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};

/// Load the artifact written by the collector for `league`.
pub async fn read_league<S: Storage>(storage: &S, league: League) -> Result<Vec<PlayerRecord>> {
    let artifact = league.artifact_name();
    if !storage.exists(&artifact).await? {
        return Err(EtlError::ArtifactNotFound {
            league: league.to_string(),
            artifact,
        });
    }

    let data = storage.read_file(&artifact).await?;
    let records: Vec<PlayerRecord> =
        serde_json::from_slice(&data).map_err(|e| EtlError::MalformedArtifact {
            artifact: artifact.clone(),
            message: e.to_string(),
        })?;

    tracing::debug!("Read {} records from {}", records.len(), artifact);
    Ok(records)
}

pub fn group_by_school(records: &[PlayerRecord]) -> SchoolGrouping {
    records
        .iter()
        .fold(SchoolGrouping::new(), |mut grouping, record| {
            grouping
                .entry(record.school.clone())
                .or_default()
                .push(record.clone());
            grouping
        })
}

/// Schools by player count, most first; equal counts in name order.
pub fn rank_schools(grouping: &SchoolGrouping) -> SchoolRanking {
    let mut ranking: SchoolRanking = grouping
        .iter()
        .map(|(school, players)| SchoolCount {
            school: school.clone(),
            count: players.len(),
        })
        .collect();

    ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.school.cmp(&b.school)));
    ranking
}

pub async fn aggregate_league<S: Storage>(
    storage: &S,
    league: League,
) -> Result<(SchoolGrouping, SchoolRanking)> {
    let records = read_league(storage, league).await?;
    let grouping = group_by_school(&records);
    let ranking = rank_schools(&grouping);
    tracing::info!(
        "🏫 {} players from {} schools in {}",
        records.len(),
        grouping.len(),
        league
    );
    Ok((grouping, ranking))
}
