use crate::utils::error::EtlError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Leagues whose roster pages list a `College` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    Nfl,
    Nba,
}

impl League {
    pub const ALL: [League; 2] = [League::Nfl, League::Nba];

    pub fn as_str(&self) -> &'static str {
        match self {
            League::Nfl => "nfl",
            League::Nba => "nba",
        }
    }

    pub fn teams_locator(&self) -> String {
        format!("/{}/teams", self.as_str())
    }

    pub fn artifact_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        League::ALL
            .into_iter()
            .find(|league| league.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EtlError::UnsupportedLeague {
                value: s.to_string(),
            })
    }
}

impl Serialize for League {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for League {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value
            .parse()
            .map_err(<D::Error as serde::de::Error>::custom)
    }
}

/// One player as persisted in the league artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Pos")]
    pub position: String,
    /// Empty when the roster lists no college.
    #[serde(rename = "School")]
    pub school: String,
    #[serde(rename = "Team")]
    pub team: String,
}

/// A table row keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterRow {
    pub cells: HashMap<String, String>,
}

impl RosterRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterTable {
    pub headers: Vec<String>,
    pub rows: Vec<RosterRow>,
}

impl RosterTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// Everything extracted from a single team roster page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRoster {
    pub locator: String,
    pub team_name: String,
    pub tables: Vec<RosterTable>,
}

pub type SchoolGrouping = BTreeMap<String, Vec<PlayerRecord>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolCount {
    pub school: String,
    pub count: usize,
}

pub type SchoolRanking = Vec<SchoolCount>;

/// A rendered document ready to be written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_parsing() {
        assert_eq!("nfl".parse::<League>().unwrap(), League::Nfl);
        assert_eq!(" NBA ".parse::<League>().unwrap(), League::Nba);
        assert!(matches!(
            "xfl".parse::<League>(),
            Err(EtlError::UnsupportedLeague { .. })
        ));
        assert!(matches!(
            "mlb".parse::<League>(),
            Err(EtlError::UnsupportedLeague { .. })
        ));
    }

    #[test]
    fn test_league_names() {
        assert_eq!(League::Nfl.teams_locator(), "/nfl/teams");
        assert_eq!(League::Nba.artifact_name(), "nba.json");
        assert_eq!(League::Nba.to_string(), "nba");
    }

    #[test]
    fn test_player_record_json_keys() {
        let record = PlayerRecord {
            name: "John Doe".to_string(),
            position: "QB".to_string(),
            school: "UCLA".to_string(),
            team: "Rams".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"Name":"John Doe","Pos":"QB","School":"UCLA","Team":"Rams"}"#
        );
    }

    #[test]
    fn test_player_record_requires_school() {
        let result: std::result::Result<PlayerRecord, _> =
            serde_json::from_str(r#"{"Name":"John Doe","Pos":"QB","Team":"Rams"}"#);
        assert!(result.is_err());
    }
}
