//! Cumulative score table and final standings.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Marker;
use crate::rules::Outcome;

/// Wins per marker plus a draw counter.
///
/// Counters only grow. Serialized as an ordered list of `(marker, wins)`
/// entries so summaries keep roster order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScoreSheet", into = "ScoreSheet")]
pub struct ScoreTable {
    order: Vec<Marker>,
    wins: FxHashMap<Marker, u32>,
    draws: u32,
}

#[derive(Serialize, Deserialize)]
struct ScoreSheet {
    wins: Vec<(Marker, u32)>,
    draws: u32,
}

impl From<ScoreSheet> for ScoreTable {
    fn from(sheet: ScoreSheet) -> Self {
        let mut table = ScoreTable::default();
        for (marker, wins) in sheet.wins {
            table.ensure(marker);
            table.wins.insert(marker, wins);
        }
        table.draws = sheet.draws;
        table
    }
}

impl From<ScoreTable> for ScoreSheet {
    fn from(table: ScoreTable) -> Self {
        ScoreSheet {
            wins: table.iter().collect(),
            draws: table.draws,
        }
    }
}

impl ScoreTable {
    /// Table with a zero entry for every marker, in the given order.
    pub fn new(markers: impl IntoIterator<Item = Marker>) -> Self {
        let mut table = Self::default();
        for marker in markers {
            table.ensure(marker);
        }
        table
    }

    /// Count the outcome of one match.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(marker) => {
                self.ensure(marker);
                *self.wins.entry(marker).or_insert(0) += 1;
            }
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Wins of `marker`.
    #[must_use]
    pub fn wins(&self, marker: Marker) -> u32 {
        self.wins.get(&marker).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Matches counted so far.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.wins.values().sum::<u32>() + self.draws
    }

    /// (marker, wins) in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (Marker, u32)> + '_ {
        self.order.iter().map(|m| (*m, self.wins(*m)))
    }

    /// Leaders by wins; draws never win.
    #[must_use]
    pub fn standings(&self) -> Standings {
        let best = self.iter().map(|(_, w)| w).max().unwrap_or(0);
        if best == 0 {
            return Standings::NoWinner;
        }
        let leaders: Vec<Marker> = self
            .iter()
            .filter(|(_, w)| *w == best)
            .map(|(m, _)| m)
            .collect();
        match leaders.as_slice() {
            [single] => Standings::Winner(*single),
            _ => Standings::Tie(leaders),
        }
    }

    fn ensure(&mut self, marker: Marker) {
        if !self.wins.contains_key(&marker) {
            self.order.push(marker);
            self.wins.insert(marker, 0);
        }
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (marker, wins) in self.iter() {
            write!(f, "{marker}: {wins}, ")?;
        }
        write!(f, "draw: {}", self.draws)
    }
}

/// Final ranking of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standings {
    /// One participant has strictly the most wins.
    Winner(Marker),
    /// Several participants share the most wins.
    Tie(Vec<Marker>),
    /// Nobody won a match.
    NoWinner,
}

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standings::Winner(m) => write!(f, "Final winner: {m}"),
            Standings::Tie(markers) => {
                let names: Vec<String> = markers.iter().map(ToString::to_string).collect();
                write!(f, "Final winners (tie): {}", names.join(", "))
            }
            Standings::NoWinner => write!(f, "No winner, only draws"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Marker = Marker('X');
    const O: Marker = Marker('O');

    #[test]
    fn test_record_and_total() {
        let mut table = ScoreTable::new([X, O]);
        table.record(Outcome::Winner(X));
        table.record(Outcome::Draw);
        table.record(Outcome::Winner(X));

        assert_eq!(table.wins(X), 2);
        assert_eq!(table.wins(O), 0);
        assert_eq!(table.draws(), 1);
        assert_eq!(table.total(), 3);
        assert_eq!(table.to_string(), "X: 2, O: 0, draw: 1");
    }

    #[test]
    fn test_standings() {
        let mut table = ScoreTable::new([X, O]);
        assert_eq!(table.standings(), Standings::NoWinner);
        table.record(Outcome::Draw);
        assert_eq!(table.standings(), Standings::NoWinner);

        table.record(Outcome::Winner(O));
        assert_eq!(table.standings(), Standings::Winner(O));

        table.record(Outcome::Winner(X));
        assert_eq!(table.standings(), Standings::Tie(vec![X, O]));
        assert_eq!(table.standings().to_string(), "Final winners (tie): X, O");
    }

    #[test]
    fn test_unknown_winner_is_appended() {
        let mut table = ScoreTable::new([X]);
        table.record(Outcome::Winner(Marker('z')));
        let markers: Vec<Marker> = table.iter().map(|(m, _)| m).collect();
        assert_eq!(markers, vec![X, Marker('z')]);
    }

    #[test]
    fn test_serialization_keeps_order() {
        let mut table = ScoreTable::new([O, X]);
        table.record(Outcome::Winner(X));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"wins":[["O",0],["X",1]],"draws":0}"#);

        let back: ScoreTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);

        let bytes = bincode::serialize(&table).unwrap();
        let back: ScoreTable = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, table);
    }
}
