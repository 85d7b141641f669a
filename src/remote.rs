//! External interface shapes: country catalog, score submission, ranking.
//!
//! The engine never performs network IO. It consumes an already-fetched
//! country catalog, produces score submissions at game end, and models the
//! ranking feed so a missing fetch degrades to an explicit
//! [`Ranking::Unavailable`] instead of corrupting anything. Field names
//! match the ranking service's wire format.

use serde::{Deserialize, Serialize};

use crate::core::Money;
use crate::scoring::ScoreEntry;

/// Country catalog entry, used only for setup selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

/// One score pushed out at game end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    #[serde(rename = "nick_name")]
    pub nickname: String,

    pub score: Money,

    pub country_code: String,
}

impl From<&ScoreEntry> for ScoreSubmission {
    fn from(entry: &ScoreEntry) -> Self {
        Self {
            nickname: entry.nickname.clone(),
            score: entry.score,
            country_code: entry.country_code.clone(),
        }
    }
}

/// One row of the remote ranking feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(rename = "nick_name")]
    pub nickname: String,

    pub country_code: String,

    pub score: Money,
}

/// Ranking feed state: either rows, or an explicit unavailable signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ranking {
    Available(Vec<RankingEntry>),
    Unavailable,
}

impl Ranking {
    /// Degrade a failed or absent fetch to the unavailable signal.
    #[must_use]
    pub fn from_fetch(rows: Option<Vec<RankingEntry>>) -> Self {
        match rows {
            Some(rows) => Ranking::Available(rows),
            None => Ranking::Unavailable,
        }
    }
}

/// Fire-and-forget score delivery.
///
/// Implementations report success as a bare bool; the engine ignores it
/// either way. A lost submission is a side observation, not game state.
pub trait ScoreSink {
    fn submit(&mut self, submission: &ScoreSubmission) -> bool;
}

/// Sink that drops every submission; the default when nobody listens.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ScoreSink for NullSink {
    fn submit(&mut self, _submission: &ScoreSubmission) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_submission_wire_format() {
        let submission = ScoreSubmission {
            nickname: "Ana".into(),
            score: 1750,
            country_code: "CO".into(),
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "nick_name": "Ana", "score": 1750, "country_code": "CO" })
        );
    }

    #[test]
    fn test_submission_from_score_entry() {
        let entry = ScoreEntry {
            player: PlayerId::new(1),
            nickname: "Beto".into(),
            country_code: "MX".into(),
            score: 980,
        };

        let submission = ScoreSubmission::from(&entry);
        assert_eq!(submission.nickname, "Beto");
        assert_eq!(submission.score, 980);
        assert_eq!(submission.country_code, "MX");
    }

    #[test]
    fn test_ranking_degrades_to_unavailable() {
        assert_eq!(Ranking::from_fetch(None), Ranking::Unavailable);

        let rows = vec![RankingEntry {
            nickname: "Ana".into(),
            country_code: "CO".into(),
            score: 2000,
        }];
        assert_eq!(Ranking::from_fetch(Some(rows.clone())), Ranking::Available(rows));
    }

    #[test]
    fn test_ranking_entry_parses_remote_rows() {
        let entry: RankingEntry = serde_json::from_value(serde_json::json!({
            "nick_name": "Cata",
            "country_code": "AR",
            "score": 3100
        }))
        .unwrap();
        assert_eq!(entry.nickname, "Cata");
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let mut sink = NullSink;
        let submission = ScoreSubmission {
            nickname: "Ana".into(),
            score: 0,
            country_code: "CO".into(),
        };
        assert!(sink.submit(&submission));
    }
}
