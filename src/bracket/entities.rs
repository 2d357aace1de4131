//! Match records and bracket-level types produced by the generator.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::entities::{ParticipantId, Side};
use crate::errors::{EngineError, EngineResult};
use crate::scoring::{SportConfig, SportState};

/// Tournament formats the generator understands.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    SingleElimination,
    DoubleElimination,
    RoundRobin,
}

impl FromStr for TournamentFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_elimination" => Ok(Self::SingleElimination),
            "double_elimination" => Ok(Self::DoubleElimination),
            "round_robin" => Ok(Self::RoundRobin),
            other => Err(EngineError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::SingleElimination => "single_elimination",
            Self::DoubleElimination => "double_elimination",
            Self::RoundRobin => "round_robin",
        };
        write!(f, "{repr}")
    }
}

/// Which half of a double-elimination bracket a match belongs to.
/// Absent for single elimination and round robin.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    Winners,
    Losers,
}

/// Lifecycle of a match.
///
/// `pending -> scheduled -> live -> completed`. Scheduling is owned by the
/// host's court scheduler; the engine only moves matches into `live` (via
/// [`MatchRecord::begin_scoring`]). `Bye` is entered directly at creation,
/// never through `pending`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Scheduled,
    Live,
    Completed,
    Bye,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Completed => "completed",
            Self::Bye => "bye",
        };
        write!(f, "{repr}")
    }
}

/// A single match in the generated bracket.
///
/// `next_match` and `loser_next_match` are indices into the generated match
/// sequence; the host translates them into its own identifier scheme when
/// persisting.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MatchRecord {
    /// 1-based round, increasing toward the final.
    pub round: u32,
    /// Unique ordinal within the tournament.
    pub match_number: u32,
    /// Winners or losers bracket; double elimination only.
    pub bracket_side: Option<BracketSide>,
    /// Slot index within the round, used for bracket layout.
    pub position: u32,
    pub participant1: Option<ParticipantId>,
    pub participant2: Option<ParticipantId>,
    pub participant1_score: u32,
    pub participant2_score: u32,
    pub status: MatchStatus,
    /// Set only when `status` is `completed` or `bye`.
    pub winner: Option<ParticipantId>,
    /// Index of the match the winner advances into. Absent for the final
    /// and for round robin.
    pub next_match: Option<usize>,
    pub next_match_slot: Option<Side>,
    /// Index of the losers-bracket match the loser drops into.
    /// Double elimination only; byes have no loser and carry no link.
    pub loser_next_match: Option<usize>,
    pub loser_next_match_slot: Option<Side>,
    /// Live scoring state, present once the match has been initialized.
    pub sport_state: Option<SportState>,
}

impl MatchRecord {
    #[must_use]
    pub fn new(round: u32, match_number: u32, position: u32) -> Self {
        Self {
            round,
            match_number,
            bracket_side: None,
            position,
            participant1: None,
            participant2: None,
            participant1_score: 0,
            participant2_score: 0,
            status: MatchStatus::Pending,
            winner: None,
            next_match: None,
            next_match_slot: None,
            loser_next_match: None,
            loser_next_match_slot: None,
            sport_state: None,
        }
    }

    /// The participant occupying a slot, if any.
    #[must_use]
    pub fn participant(&self, slot: Side) -> Option<&ParticipantId> {
        match slot {
            Side::One => self.participant1.as_ref(),
            Side::Two => self.participant2.as_ref(),
        }
    }

    pub fn set_participant(&mut self, slot: Side, id: ParticipantId) {
        match slot {
            Side::One => self.participant1 = Some(id),
            Side::Two => self.participant2 = Some(id),
        }
    }

    /// Number of filled participant slots.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        usize::from(self.participant1.is_some()) + usize::from(self.participant2.is_some())
    }

    /// Initialize live scoring for this match.
    ///
    /// Requires both participants to be known and the match to still be
    /// `pending` or `scheduled`. On success the sport state is created from
    /// `config` and the match transitions to `live`.
    pub fn begin_scoring(&mut self, config: &SportConfig) -> EngineResult<()> {
        match self.status {
            MatchStatus::Pending | MatchStatus::Scheduled => {}
            status => return Err(EngineError::NotScorable(status)),
        }
        if self.participant1.is_none() || self.participant2.is_none() {
            return Err(EngineError::MissingParticipants);
        }
        self.sport_state = Some(config.initialize()?);
        self.status = MatchStatus::Live;
        Ok(())
    }

    /// Mutable access to the live scoring state.
    pub fn sport_state_mut(&mut self) -> EngineResult<&mut SportState> {
        self.sport_state
            .as_mut()
            .ok_or(EngineError::ScoringNotInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::VolleyballConfig;

    fn scorable_match() -> MatchRecord {
        let mut m = MatchRecord::new(1, 1, 0);
        m.set_participant(Side::One, "ada".to_string());
        m.set_participant(Side::Two, "brook".to_string());
        m
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(
            "single_elimination".parse::<TournamentFormat>(),
            Ok(TournamentFormat::SingleElimination)
        );
        assert_eq!(
            "round_robin".parse::<TournamentFormat>(),
            Ok(TournamentFormat::RoundRobin)
        );
        assert_eq!(
            "swiss".parse::<TournamentFormat>(),
            Err(EngineError::UnknownFormat("swiss".to_string()))
        );
    }

    #[test]
    fn test_begin_scoring_goes_live() {
        let mut m = scorable_match();
        let config = SportConfig::Volleyball(VolleyballConfig::default());
        m.begin_scoring(&config).unwrap();
        assert_eq!(m.status, MatchStatus::Live);
        assert!(m.sport_state.is_some());
    }

    #[test]
    fn test_begin_scoring_requires_both_participants() {
        let mut m = MatchRecord::new(1, 1, 0);
        m.set_participant(Side::One, "ada".to_string());
        let config = SportConfig::Volleyball(VolleyballConfig::default());
        assert_eq!(
            m.begin_scoring(&config),
            Err(EngineError::MissingParticipants)
        );
        assert_eq!(m.status, MatchStatus::Pending);
        assert!(m.sport_state.is_none());
    }

    #[test]
    fn test_sport_state_requires_initialization() {
        let mut m = scorable_match();
        assert_eq!(
            m.sport_state_mut().unwrap_err(),
            EngineError::ScoringNotInitialized
        );

        let config = SportConfig::Volleyball(VolleyballConfig::default());
        m.begin_scoring(&config).unwrap();
        assert!(m.sport_state_mut().is_ok());
    }

    #[test]
    fn test_begin_scoring_rejects_live_and_completed() {
        let mut m = scorable_match();
        let config = SportConfig::Volleyball(VolleyballConfig::default());
        m.begin_scoring(&config).unwrap();
        assert_eq!(
            m.begin_scoring(&config),
            Err(EngineError::NotScorable(MatchStatus::Live))
        );

        m.status = MatchStatus::Completed;
        assert_eq!(
            m.begin_scoring(&config),
            Err(EngineError::NotScorable(MatchStatus::Completed))
        );
    }
}
