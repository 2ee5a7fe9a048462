use crate::core::aggregate::aggregate_league;
use crate::core::report::{render_distribution_report, render_school_report};
use crate::core::{League, Pipeline, SchoolGrouping, SchoolRanking, Storage};
use crate::domain::model::Report;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct SchoolSummary {
    pub grouping: SchoolGrouping,
    pub ranking: SchoolRanking,
}

/// Reads a league artifact and writes the requested school and distribution reports.
pub struct ReportPipeline<S: Storage> {
    pub(crate) storage: S,
    pub(crate) league: League,
    pub(crate) schools: Vec<String>,
    pub(crate) distribution: bool,
}

impl<S: Storage> ReportPipeline<S> {
    pub fn new(storage: S, league: League, schools: Vec<String>, distribution: bool) -> Self {
        Self {
            storage,
            league,
            schools,
            distribution,
        }
    }

    /// Every document this run would write. Fails before anything is written
    /// if one of the schools has no players.
    pub fn render_all(&self, summary: &SchoolSummary) -> Result<Vec<Report>> {
        let mut reports = Vec::with_capacity(self.schools.len() + 1);
        for school in &self.schools {
            reports.push(render_school_report(&summary.grouping, self.league, school)?);
        }
        if self.distribution {
            reports.push(render_distribution_report(&summary.ranking, self.league)?);
        }
        Ok(reports)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ReportPipeline<S> {
    type Extracted = SchoolSummary;
    type Transformed = Vec<Report>;

    async fn extract(&self) -> Result<SchoolSummary> {
        let (grouping, ranking) = aggregate_league(&self.storage, self.league).await?;
        if let Some(top) = ranking.first() {
            tracing::debug!("Top school: {} ({} players)", top.school, top.count);
        }
        Ok(SchoolSummary { grouping, ranking })
    }

    async fn transform(&self, summary: SchoolSummary) -> Result<Vec<Report>> {
        let reports = self.render_all(&summary)?;
        tracing::info!("Rendered {} {} reports", reports.len(), self.league);
        Ok(reports)
    }

    async fn load(&self, reports: Vec<Report>) -> Result<String> {
        let mut written = Vec::with_capacity(reports.len());
        for report in reports {
            self.storage
                .write_file(&report.name, report.content.as_bytes())
                .await?;
            tracing::info!("📝 Wrote {}", report.name);
            written.push(report.name);
        }
        Ok(written.join(", "))
    }
}
