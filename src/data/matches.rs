//! Football match tables.
//!
//! Reads the common results-file layout (`Date, HomeTeam, AwayTeam, FTHG,
//! FTAG, HS, AS`); snake_case headers such as `home_team` or `home_goals`
//! are accepted as well. Extra columns are ignored.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use faer::{Col, Mat};
use log::{info, warn};
use serde::Deserialize;

use super::DataError;

/// One played match.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "Date", alias = "date", default)]
    pub date: String,
    #[serde(rename = "HomeTeam", alias = "home_team")]
    pub home_team: String,
    #[serde(rename = "AwayTeam", alias = "away_team")]
    pub away_team: String,
    #[serde(rename = "FTHG", alias = "home_goals")]
    pub home_goals: u32,
    #[serde(rename = "FTAG", alias = "away_goals")]
    pub away_goals: u32,
    #[serde(rename = "HS", alias = "home_shots", default)]
    pub home_shots: Option<f64>,
    #[serde(rename = "AS", alias = "away_shots", default)]
    pub away_shots: Option<f64>,
}

/// A set of matches.
#[derive(Debug, Clone, Default)]
pub struct MatchTable {
    records: Vec<MatchRecord>,
}

impl MatchTable {
    /// Wrap already parsed records.
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    /// Load matches from a CSV file with a header row.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|source| DataError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_csv(reader)?;
        info!("loaded {} matches from {}", table.len(), path.display());
        Ok(table)
    }

    /// Load matches from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DataError> {
        let records = reader
            .deserialize::<MatchRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// The matches in file order.
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table holds no matches.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct team names, sorted.
    pub fn teams(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|m| [m.home_team.clone(), m.away_team.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Matches in which `team` played at home (exact name match).
    pub fn home_matches(&self, team: &str) -> Result<MatchTable, DataError> {
        let records: Vec<MatchRecord> = self
            .records
            .iter()
            .filter(|m| m.home_team == team)
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(DataError::NoHomeMatches {
                team: team.to_string(),
            });
        }
        info!("selected {} home matches for {team}", records.len());
        Ok(Self { records })
    }

    /// Home shots as a one-column predictor matrix and home goals as the
    /// response.
    ///
    /// Matches without a shot count are dropped.
    pub fn goals_vs_shots(&self) -> Result<(Mat<f64>, Col<f64>), DataError> {
        let rows: Vec<(f64, f64)> = self
            .records
            .iter()
            .filter_map(|m| m.home_shots.map(|s| (s, f64::from(m.home_goals))))
            .collect();

        let dropped = self.records.len() - rows.len();
        if dropped > 0 {
            warn!("dropped {dropped} matches without a home shot count");
        }
        if rows.is_empty() {
            return Err(DataError::NoUsableRows);
        }

        let x = Mat::from_fn(rows.len(), 1, |i, _| rows[i].0);
        let y = Col::from_fn(rows.len(), |i| rows[i].1);
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_CSV: &str = "\
Div,Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR,HS,AS
E0,12/08/2023,Arsenal,Forest,2,1,H,15,6
E0,12/08/2023,Chelsea,Liverpool,1,1,D,14,11
E0,19/08/2023,Forest,Arsenal,0,3,A,7,18
E0,26/08/2023,Arsenal,Fulham,2,2,D,,9
E0,02/09/2023,Arsenal,Man United,3,1,H,21,10
";

    #[test]
    fn test_parse_results_layout() {
        let table = MatchTable::from_reader(RESULTS_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 5);

        let first = &table.records()[0];
        assert_eq!(first.home_team, "Arsenal");
        assert_eq!(first.away_team, "Forest");
        assert_eq!(first.home_goals, 2);
        assert_eq!(first.home_shots, Some(15.0));
        assert_eq!(table.records()[3].home_shots, None);
    }

    #[test]
    fn test_parse_snake_case_layout() {
        let csv = "home_team,away_team,home_goals,away_goals,home_shots,away_shots\n\
                   Leeds,York,1,0,12,4\n";
        let table = MatchTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.records()[0].home_team, "Leeds");
        assert_eq!(table.records()[0].home_shots, Some(12.0));
        assert_eq!(table.records()[0].date, "");
    }

    #[test]
    fn test_home_matches_filter() {
        let table = MatchTable::from_reader(RESULTS_CSV.as_bytes()).unwrap();
        let arsenal = table.home_matches("Arsenal").unwrap();

        assert_eq!(arsenal.len(), 3);
        assert!(arsenal.records().iter().all(|m| m.home_team == "Arsenal"));
    }

    #[test]
    fn test_home_matches_unknown_team() {
        let table = MatchTable::from_reader(RESULTS_CSV.as_bytes()).unwrap();
        let err = table.home_matches("Liverpool").unwrap_err();
        assert!(matches!(err, DataError::NoHomeMatches { team } if team == "Liverpool"));
    }

    #[test]
    fn test_goals_vs_shots_drops_missing_shots() {
        let table = MatchTable::from_reader(RESULTS_CSV.as_bytes()).unwrap();
        let (x, y) = table.home_matches("Arsenal").unwrap().goals_vs_shots().unwrap();

        assert_eq!(x.nrows(), 2);
        assert_eq!(x.ncols(), 1);
        assert_eq!(x[(0, 0)], 15.0);
        assert_eq!(x[(1, 0)], 21.0);
        assert_eq!(y[0], 2.0);
        assert_eq!(y[1], 3.0);
    }

    #[test]
    fn test_teams_sorted_unique() {
        let table = MatchTable::from_reader(RESULTS_CSV.as_bytes()).unwrap();
        assert_eq!(
            table.teams(),
            vec!["Arsenal", "Chelsea", "Forest", "Fulham", "Liverpool", "Man United"]
        );
    }

    #[test]
    fn test_malformed_goals() {
        let csv = "HomeTeam,AwayTeam,FTHG,FTAG\nA,B,two,1\n";
        let err = MatchTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }
}
