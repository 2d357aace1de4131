//! Tennis match scoring state machine.
//!
//! Consumes discrete point-won events and derives game, set, tiebreak, and
//! match progress, including serve rotation and deuce/advantage handling.
//! Every mutation is preceded by a full snapshot onto a bounded undo
//! history, so `undo` restores the exact prior state.

use log::debug;
use serde::{Deserialize, Serialize};

use super::history::History;
use crate::constants::{DEFAULT_TENNIS_SETS_TO_WIN, GAMES_PER_SET, TIEBREAK_TARGET};
use crate::entities::Side;
use crate::errors::{EngineError, EngineResult};

/// Tournament-level tennis scoring rules, fixed at match initialization.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TennisConfig {
    /// Sets needed to win the match (2 for best-of-3, 3 for best-of-5).
    pub sets_to_win: u32,
    /// Deuce resolved by advantage (`true`) or a sudden-death point.
    pub is_ad_scoring: bool,
}

impl Default for TennisConfig {
    fn default() -> Self {
        Self {
            sets_to_win: DEFAULT_TENNIS_SETS_TO_WIN,
            is_ad_scoring: true,
        }
    }
}

impl TennisConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.sets_to_win == 0 {
            return Err(EngineError::InvalidConfig {
                field: "sets_to_win".to_string(),
            });
        }
        Ok(())
    }
}

/// Snapshot of every mutable field, used for undo. The configuration is
/// immutable and the history itself is never part of a snapshot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TennisSnapshot {
    pub sets: Vec<[u32; 2]>,
    pub current_set_games: [u32; 2],
    pub current_game_points: [u32; 2],
    pub serving_participant: Side,
    pub first_server_of_set: Side,
    pub is_tiebreak: bool,
    pub tiebreak_points: [u32; 2],
    pub is_match_complete: bool,
}

/// Live tennis match state.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TennisState {
    /// Completed sets in chronological order, `[p1_games, p2_games]`.
    pub sets: Vec<[u32; 2]>,
    pub current_set_games: [u32; 2],
    pub current_game_points: [u32; 2],
    pub serving_participant: Side,
    /// First server of the in-progress set; alternates between sets.
    pub first_server_of_set: Side,
    pub is_ad_scoring: bool,
    pub sets_to_win: u32,
    pub is_tiebreak: bool,
    pub tiebreak_points: [u32; 2],
    pub is_match_complete: bool,
    pub history: History<TennisSnapshot>,
}

impl TennisState {
    pub fn new(config: TennisConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            sets: Vec::new(),
            current_set_games: [0, 0],
            current_game_points: [0, 0],
            serving_participant: Side::One,
            first_server_of_set: Side::One,
            is_ad_scoring: config.is_ad_scoring,
            sets_to_win: config.sets_to_win,
            is_tiebreak: false,
            tiebreak_points: [0, 0],
            is_match_complete: false,
            history: History::new(),
        })
    }

    /// Record a point for `winner`, advancing game/set/match state as far
    /// as the point carries. Rejected once the match is complete.
    pub fn score_point(&mut self, winner: Side) -> EngineResult<()> {
        if self.is_match_complete {
            return Err(EngineError::MatchComplete);
        }
        self.history.push(self.snapshot());
        if self.is_tiebreak {
            self.score_tiebreak_point(winner);
        } else {
            self.score_game_point(winner);
        }
        Ok(())
    }

    /// Restore the state prior to the most recent mutation.
    pub fn undo(&mut self) -> EngineResult<()> {
        let snapshot = self.history.pop().ok_or(EngineError::EmptyHistory)?;
        self.restore(snapshot);
        Ok(())
    }

    /// Administrative serve correction. Not part of undo history.
    pub fn set_server(&mut self, participant: Side) {
        self.serving_participant = participant;
    }

    /// Sets won so far by `side` (entries where its games are strictly
    /// greater).
    #[must_use]
    pub fn sets_won(&self, side: Side) -> u32 {
        self.sets
            .iter()
            .filter(|set| set[side.index()] > set[side.other().index()])
            .count() as u32
    }

    /// Display label for a side's in-game points.
    ///
    /// `0/15/30/40`, frozen at `40` from deuce on, with `Ad` for the player
    /// holding advantage. Inside a tiebreak the raw point count is shown.
    #[must_use]
    pub fn point_label(&self, side: Side) -> String {
        if self.is_tiebreak {
            return self.tiebreak_points[side.index()].to_string();
        }
        let own = self.current_game_points[side.index()];
        let opponent = self.current_game_points[side.other().index()];
        if own >= 3 && opponent >= 3 {
            if own > opponent {
                return "Ad".to_string();
            }
            return "40".to_string();
        }
        match own {
            0 => "0",
            1 => "15",
            2 => "30",
            _ => "40",
        }
        .to_string()
    }

    fn snapshot(&self) -> TennisSnapshot {
        TennisSnapshot {
            sets: self.sets.clone(),
            current_set_games: self.current_set_games,
            current_game_points: self.current_game_points,
            serving_participant: self.serving_participant,
            first_server_of_set: self.first_server_of_set,
            is_tiebreak: self.is_tiebreak,
            tiebreak_points: self.tiebreak_points,
            is_match_complete: self.is_match_complete,
        }
    }

    fn restore(&mut self, snapshot: TennisSnapshot) {
        self.sets = snapshot.sets;
        self.current_set_games = snapshot.current_set_games;
        self.current_game_points = snapshot.current_game_points;
        self.serving_participant = snapshot.serving_participant;
        self.first_server_of_set = snapshot.first_server_of_set;
        self.is_tiebreak = snapshot.is_tiebreak;
        self.tiebreak_points = snapshot.tiebreak_points;
        self.is_match_complete = snapshot.is_match_complete;
    }

    fn score_tiebreak_point(&mut self, winner: Side) {
        self.tiebreak_points[winner.index()] += 1;
        let own = self.tiebreak_points[winner.index()];
        let opponent = self.tiebreak_points[winner.other().index()];
        if own >= TIEBREAK_TARGET && own >= opponent + 2 {
            // The tiebreak counts as one more game, closing the set 7-6.
            self.current_set_games[winner.index()] += 1;
            self.finish_set(winner);
        }
    }

    fn score_game_point(&mut self, winner: Side) {
        self.current_game_points[winner.index()] += 1;
        let own = self.current_game_points[winner.index()];
        let opponent = self.current_game_points[winner.other().index()];
        let game_won = if self.is_ad_scoring {
            own >= 4 && own >= opponent + 2
        } else {
            // No-ad: the first point after deuce decides the game.
            own >= 4 && (own >= opponent + 2 || opponent >= 3)
        };
        if game_won {
            self.finish_game(winner);
        }
    }

    fn finish_game(&mut self, winner: Side) {
        self.current_set_games[winner.index()] += 1;
        self.current_game_points = [0, 0];
        self.serving_participant = self.serving_participant.other();

        let own = self.current_set_games[winner.index()];
        let opponent = self.current_set_games[winner.other().index()];
        if own >= GAMES_PER_SET && own >= opponent + 2 {
            self.finish_set(winner);
        } else if own == GAMES_PER_SET && opponent == GAMES_PER_SET {
            self.is_tiebreak = true;
            self.tiebreak_points = [0, 0];
        }
    }

    fn finish_set(&mut self, winner: Side) {
        self.sets.push(self.current_set_games);
        self.current_set_games = [0, 0];
        self.current_game_points = [0, 0];
        self.is_tiebreak = false;
        self.tiebreak_points = [0, 0];

        // Serve order alternates across sets.
        self.first_server_of_set = self.first_server_of_set.other();
        self.serving_participant = self.first_server_of_set;

        if self.sets_won(winner) >= self.sets_to_win {
            self.is_match_complete = true;
            debug!("tennis match complete, sets: {:?}", self.sets);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TennisState {
        TennisState::new(TennisConfig::default()).unwrap()
    }

    fn take_points(state: &mut TennisState, side: Side, count: usize) {
        for _ in 0..count {
            state.score_point(side).unwrap();
        }
    }

    /// Drive the set to 6-6 by alternating game wins.
    fn reach_tiebreak(state: &mut TennisState) {
        for _ in 0..6 {
            take_points(state, Side::One, 4);
            take_points(state, Side::Two, 4);
        }
        assert!(state.is_tiebreak);
    }

    #[test]
    fn test_rejects_zero_sets_to_win() {
        let config = TennisConfig {
            sets_to_win: 0,
            is_ad_scoring: true,
        };
        assert_eq!(
            TennisState::new(config),
            Err(EngineError::InvalidConfig {
                field: "sets_to_win".to_string()
            })
        );
    }

    #[test]
    fn test_four_points_win_a_game() {
        let mut state = state();
        take_points(&mut state, Side::One, 4);
        assert_eq!(state.current_set_games, [1, 0]);
        assert_eq!(state.current_game_points, [0, 0]);
        assert_eq!(state.serving_participant, Side::Two);
    }

    #[test]
    fn test_point_labels_below_deuce() {
        let mut state = state();
        assert_eq!(state.point_label(Side::One), "0");
        take_points(&mut state, Side::One, 3);
        take_points(&mut state, Side::Two, 1);
        assert_eq!(state.point_label(Side::One), "40");
        assert_eq!(state.point_label(Side::Two), "15");
    }

    #[test]
    fn test_advantage_scoring_from_deuce() {
        let mut state = state();
        take_points(&mut state, Side::One, 3);
        take_points(&mut state, Side::Two, 3);
        assert_eq!(state.point_label(Side::One), "40");
        assert_eq!(state.point_label(Side::Two), "40");

        // Advantage in, back to deuce, then two in a row take the game.
        state.score_point(Side::One).unwrap();
        assert_eq!(state.point_label(Side::One), "Ad");
        assert_eq!(state.point_label(Side::Two), "40");
        assert_eq!(state.current_set_games, [0, 0]);

        state.score_point(Side::Two).unwrap();
        assert_eq!(state.point_label(Side::One), "40");
        assert_eq!(state.point_label(Side::Two), "40");
        assert_eq!(state.current_set_games, [0, 0]);

        take_points(&mut state, Side::Two, 2);
        assert_eq!(state.current_set_games, [0, 1]);
    }

    #[test]
    fn test_no_ad_sudden_death_at_deuce() {
        let config = TennisConfig {
            sets_to_win: 2,
            is_ad_scoring: false,
        };
        let mut state = TennisState::new(config).unwrap();
        take_points(&mut state, Side::One, 3);
        take_points(&mut state, Side::Two, 3);
        state.score_point(Side::Two).unwrap();
        assert_eq!(state.current_set_games, [0, 1]);
    }

    #[test]
    fn test_set_requires_two_game_lead() {
        let mut state = state();
        for _ in 0..5 {
            take_points(&mut state, Side::One, 4);
            take_points(&mut state, Side::Two, 4);
        }
        // 5-5; two straight games take the set 7-5.
        take_points(&mut state, Side::One, 4);
        assert_eq!(state.current_set_games, [6, 5]);
        assert!(state.sets.is_empty());
        take_points(&mut state, Side::One, 4);
        assert_eq!(state.sets, vec![[7, 5]]);
        assert_eq!(state.current_set_games, [0, 0]);
    }

    #[test]
    fn test_set_win_alternates_first_server() {
        let mut state = state();
        assert_eq!(state.first_server_of_set, Side::One);
        for _ in 0..6 {
            take_points(&mut state, Side::One, 4);
        }
        assert_eq!(state.sets, vec![[6, 0]]);
        assert_eq!(state.first_server_of_set, Side::Two);
        assert_eq!(state.serving_participant, Side::Two);
    }

    #[test]
    fn test_tiebreak_entry_and_set_credit() {
        let mut state = state();
        reach_tiebreak(&mut state);
        assert_eq!(state.current_set_games, [6, 6]);

        // 7-5 takes the tiebreak and the set is recorded 7-6.
        take_points(&mut state, Side::One, 5);
        take_points(&mut state, Side::Two, 5);
        take_points(&mut state, Side::One, 2);
        assert_eq!(state.sets, vec![[7, 6]]);
        assert!(!state.is_tiebreak);
        assert_eq!(state.tiebreak_points, [0, 0]);
    }

    #[test]
    fn test_tiebreak_requires_two_point_lead() {
        let mut state = state();
        reach_tiebreak(&mut state);
        take_points(&mut state, Side::One, 6);
        take_points(&mut state, Side::Two, 6);
        // 7-6 does not end it at six-all in points.
        state.score_point(Side::One).unwrap();
        assert!(state.is_tiebreak);
        assert_eq!(state.tiebreak_points, [7, 6]);
        state.score_point(Side::One).unwrap();
        assert_eq!(state.sets, vec![[7, 6]]);
    }

    #[test]
    fn test_tiebreak_can_decide_the_match() {
        let mut state = state();
        for _ in 0..6 {
            take_points(&mut state, Side::One, 4);
        }
        reach_tiebreak(&mut state);
        take_points(&mut state, Side::One, 7);
        assert!(state.is_match_complete);
        assert_eq!(state.sets, vec![[6, 0], [7, 6]]);
        assert_eq!(state.score_point(Side::One), Err(EngineError::MatchComplete));
    }

    #[test]
    fn test_match_completion_and_rejection() {
        let mut state = state();
        // Two 6-0 sets for player 1.
        for _ in 0..12 {
            take_points(&mut state, Side::One, 4);
        }
        assert!(state.is_match_complete);
        assert_eq!(state.sets_won(Side::One), 2);

        let before = state.clone();
        for _ in 0..3 {
            assert_eq!(state.score_point(Side::Two), Err(EngineError::MatchComplete));
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_undo_restores_prior_state() {
        let mut state = state();
        take_points(&mut state, Side::One, 3);
        take_points(&mut state, Side::Two, 2);

        let before = state.clone();
        state.score_point(Side::One).unwrap();
        state.undo().unwrap();

        assert_eq!(state.history.len(), before.history.len());
        assert_eq!(state, before);
    }

    #[test]
    fn test_undo_can_reverse_match_point() {
        let mut state = state();
        for _ in 0..11 {
            take_points(&mut state, Side::One, 4);
        }
        take_points(&mut state, Side::One, 3);
        state.score_point(Side::One).unwrap();
        assert!(state.is_match_complete);

        state.undo().unwrap();
        assert!(!state.is_match_complete);
        assert_eq!(state.sets, vec![[6, 0]]);
        assert_eq!(state.current_set_games, [5, 0]);
    }

    #[test]
    fn test_undo_empty_history_fails() {
        let mut state = state();
        assert_eq!(state.undo(), Err(EngineError::EmptyHistory));
    }

    #[test]
    fn test_set_server_bypasses_history() {
        let mut state = state();
        state.set_server(Side::Two);
        assert_eq!(state.serving_participant, Side::Two);
        assert!(state.history.is_empty());
    }
}
