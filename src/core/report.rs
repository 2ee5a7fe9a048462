//! Static HTML reports over the aggregated school data.

use crate::domain::model::{League, Report, SchoolGrouping, SchoolRanking};
use crate::utils::error::{EtlError, Result};

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render named columns as a table, one row per cell index.
/// All columns must hold the same number of cells.
pub fn render_table(columns: &[(&str, Vec<String>)]) -> Result<String> {
    let row_count = columns.first().map(|(_, cells)| cells.len()).unwrap_or(0);
    if let Some((name, cells)) = columns.iter().find(|(_, cells)| cells.len() != row_count) {
        return Err(EtlError::ProcessingError {
            message: format!(
                "column '{}' has {} cells, expected {}",
                name,
                cells.len(),
                row_count
            ),
        });
    }

    let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n");
    html.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n");
    for (name, _) in columns {
        html.push_str(&format!("      <th>{}</th>\n", escape_html(name)));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in 0..row_count {
        html.push_str("    <tr>\n");
        for (_, cells) in columns {
            html.push_str(&format!("      <td>{}</td>\n", escape_html(&cells[row])));
        }
        html.push_str("    </tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    Ok(html)
}

pub fn school_report_name(league: League, school: &str) -> String {
    let solid = school.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}_{}.html", league, solid)
}

pub fn distribution_report_name(league: League) -> String {
    format!("{}_school_dist.html", league)
}

pub fn render_school_report(
    grouping: &SchoolGrouping,
    league: League,
    school: &str,
) -> Result<Report> {
    let players = grouping
        .get(school)
        .ok_or_else(|| EtlError::SchoolNotFound {
            league: league.to_string(),
            school: school.to_string(),
        })?;

    let mut names = Vec::with_capacity(players.len());
    let mut positions = Vec::with_capacity(players.len());
    let mut teams = Vec::with_capacity(players.len());
    for player in players {
        names.push(player.name.clone());
        positions.push(player.position.clone());
        teams.push(player.team.clone());
    }

    Ok(Report {
        name: school_report_name(league, school),
        content: render_table(&[("Name", names), ("Pos", positions), ("Team", teams)])?,
    })
}

pub fn render_distribution_report(ranking: &SchoolRanking, league: League) -> Result<Report> {
    let numbers: Vec<String> = ranking.iter().map(|s| s.count.to_string()).collect();
    let colleges: Vec<String> = ranking.iter().map(|s| s.school.clone()).collect();

    Ok(Report {
        name: distribution_report_name(league),
        content: render_table(&[("Number", numbers), ("College", colleges)])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::{group_by_school, rank_schools};
    use crate::domain::model::PlayerRecord;

    fn scenario() -> Vec<PlayerRecord> {
        serde_json::from_str(
            r#"[{"Name":"John Doe","Pos":"QB","School":"UCLA","Team":"Rams"},
                {"Name":"Jane Roe","Pos":"WR","School":"USC","Team":"Rams"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_table_layout() {
        let html = render_table(&[
            ("Number", vec!["2".to_string()]),
            ("College", vec!["Texas A&M".to_string()]),
        ])
        .unwrap();

        assert_eq!(
            html,
            "<table border=\"1\" class=\"dataframe\">\n  <thead>\n    <tr style=\"text-align: right;\">\n      <th>Number</th>\n      <th>College</th>\n    </tr>\n  </thead>\n  <tbody>\n    <tr>\n      <td>2</td>\n      <td>Texas A&amp;M</td>\n    </tr>\n  </tbody>\n</table>"
        );
    }

    #[test]
    fn test_render_table_rejects_ragged_columns() {
        let result = render_table(&[
            ("Name", vec!["a".to_string(), "b".to_string()]),
            ("Pos", vec!["QB".to_string()]),
        ]);
        assert!(matches!(result, Err(EtlError::ProcessingError { .. })));
    }

    #[test]
    fn test_report_names() {
        assert_eq!(
            school_report_name(League::Nfl, "University of California  Los Angeles"),
            "nfl_University-of-California-Los-Angeles.html"
        );
        assert_eq!(school_report_name(League::Nba, "UCLA"), "nba_UCLA.html");
        assert_eq!(distribution_report_name(League::Nfl), "nfl_school_dist.html");
    }

    #[test]
    fn test_school_report() {
        let grouping = group_by_school(&scenario());
        let report = render_school_report(&grouping, League::Nfl, "UCLA").unwrap();

        assert_eq!(report.name, "nfl_UCLA.html");
        assert_eq!(report.content.matches("<tr>").count(), 1);
        assert!(report.content.contains("<td>John Doe</td>\n      <td>QB</td>\n      <td>Rams</td>"));
        assert!(!report.content.contains("Jane Roe"));
    }

    #[test]
    fn test_school_report_unknown_school() {
        let grouping = group_by_school(&scenario());
        let result = render_school_report(&grouping, League::Nfl, "Stanford");
        assert!(matches!(result, Err(EtlError::SchoolNotFound { .. })));
    }

    #[test]
    fn test_distribution_report_tie_order() {
        let ranking = rank_schools(&group_by_school(&scenario()));
        let report = render_distribution_report(&ranking, League::Nfl).unwrap();

        assert_eq!(report.name, "nfl_school_dist.html");
        let ucla = report.content.find("<td>UCLA</td>").unwrap();
        let usc = report.content.find("<td>USC</td>").unwrap();
        assert!(ucla < usc);
        assert_eq!(report.content.matches("<td>1</td>").count(), 2);
    }
}
