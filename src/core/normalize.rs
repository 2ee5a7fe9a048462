use crate::domain::model::{PlayerRecord, RosterRow};
use crate::utils::error::{EtlError, Result};

pub const NAME_COLUMN: &str = "Name";
pub const POSITION_COLUMN: &str = "POS";
pub const COLLEGE_COLUMN: &str = "College";

/// Roster pages render the jersey number right after the name, so the two
/// arrive as one string. A name that genuinely ends in digits is cut as well.
pub fn strip_jersey_number(raw: &str) -> &str {
    raw.trim_end_matches(|c: char| c.is_ascii_digit())
}

pub fn normalize_row(row: &RosterRow, team: &str) -> Result<PlayerRecord> {
    let name = row.get(NAME_COLUMN).ok_or_else(|| EtlError::MalformedTable {
        team: team.to_string(),
        message: format!("row has no '{}' cell", NAME_COLUMN),
    })?;
    let position = row
        .get(POSITION_COLUMN)
        .ok_or_else(|| EtlError::MalformedTable {
            team: team.to_string(),
            message: format!("row for '{}' has no '{}' cell", name, POSITION_COLUMN),
        })?;

    Ok(PlayerRecord {
        name: strip_jersey_number(name).to_string(),
        position: position.to_string(),
        school: row.get(COLLEGE_COLUMN).unwrap_or_default().to_string(),
        team: team.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> RosterRow {
        RosterRow {
            cells: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_strip_jersey_number() {
        assert_eq!(strip_jersey_number("Cooper Kupp10"), "Cooper Kupp");
        assert_eq!(strip_jersey_number("Aaron Donald99"), "Aaron Donald");
        assert_eq!(strip_jersey_number("Cooper Kupp"), "Cooper Kupp");
        assert_eq!(strip_jersey_number("123"), "");
        assert_eq!(strip_jersey_number(""), "");
    }

    #[test]
    fn test_strip_only_touches_trailing_digits() {
        assert_eq!(strip_jersey_number("A.J. Brown 3rd11"), "A.J. Brown 3rd");
        assert_eq!(strip_jersey_number("Kupp 10"), "Kupp ");
    }

    #[test]
    fn test_normalize_row() {
        let record = normalize_row(
            &row(&[
                ("Name", "Cooper Kupp10"),
                ("POS", "WR"),
                ("Age", "31"),
                ("College", "Eastern Washington"),
            ]),
            "Los Angeles Rams",
        )
        .unwrap();

        assert_eq!(
            record,
            PlayerRecord {
                name: "Cooper Kupp".to_string(),
                position: "WR".to_string(),
                school: "Eastern Washington".to_string(),
                team: "Los Angeles Rams".to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_row_passes_college_through() {
        let record = normalize_row(
            &row(&[("Name", "Player1"), ("POS", "G"), ("College", "--")]),
            "Team",
        )
        .unwrap();
        assert_eq!(record.school, "--");
    }

    #[test]
    fn test_normalize_row_missing_college_is_empty() {
        let record = normalize_row(&row(&[("Name", "Luka Doncic77"), ("POS", "G")]), "Dallas Mavericks")
            .unwrap();
        assert_eq!(record.name, "Luka Doncic");
        assert_eq!(record.school, "");
    }

    #[test]
    fn test_normalize_row_missing_position() {
        let result = normalize_row(&row(&[("Name", "Jane Roe")]), "Rams");
        assert!(matches!(result, Err(EtlError::MalformedTable { .. })));
    }
}
