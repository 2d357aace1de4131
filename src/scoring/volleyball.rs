//! Volleyball match scoring state machine.
//!
//! Rally scoring with the side-out serve rule, a reduced point target for
//! the deciding set, and the same bounded undo history as the tennis
//! engine. Manual score corrections (`adjust_score`) bypass both the undo
//! history and the set-win checks.

use log::debug;
use serde::{Deserialize, Serialize};

use super::history::History;
use crate::constants::{
    DEFAULT_MIN_LEAD_TO_WIN, DEFAULT_POINTS_PER_DECIDING_SET, DEFAULT_POINTS_PER_SET,
    DEFAULT_VOLLEYBALL_SETS_TO_WIN,
};
use crate::entities::Side;
use crate::errors::{EngineError, EngineResult};

/// Tournament-level volleyball scoring rules, fixed at match
/// initialization.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VolleyballConfig {
    pub sets_to_win: u32,
    pub points_per_set: u32,
    pub points_per_deciding_set: u32,
    pub min_lead_to_win: u32,
}

impl Default for VolleyballConfig {
    fn default() -> Self {
        Self {
            sets_to_win: DEFAULT_VOLLEYBALL_SETS_TO_WIN,
            points_per_set: DEFAULT_POINTS_PER_SET,
            points_per_deciding_set: DEFAULT_POINTS_PER_DECIDING_SET,
            min_lead_to_win: DEFAULT_MIN_LEAD_TO_WIN,
        }
    }
}

impl VolleyballConfig {
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("sets_to_win", self.sets_to_win),
            ("points_per_set", self.points_per_set),
            ("points_per_deciding_set", self.points_per_deciding_set),
            ("min_lead_to_win", self.min_lead_to_win),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Prior-state snapshot for undo. Configuration never changes, so only the
/// five mutable fields are captured.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VolleyballSnapshot {
    pub sets: Vec<[u32; 2]>,
    pub current_set_points: [u32; 2],
    pub serving_team: Side,
    pub current_set_number: u32,
    pub is_match_complete: bool,
}

/// Live volleyball match state.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VolleyballState {
    /// Completed sets in chronological order, `[p1_points, p2_points]`.
    pub sets: Vec<[u32; 2]>,
    pub current_set_points: [u32; 2],
    pub serving_team: Side,
    pub sets_to_win: u32,
    pub points_per_set: u32,
    pub points_per_deciding_set: u32,
    pub min_lead_to_win: u32,
    /// 1-based counter for the in-progress set.
    pub current_set_number: u32,
    pub is_match_complete: bool,
    pub history: History<VolleyballSnapshot>,
}

impl VolleyballState {
    pub fn new(config: VolleyballConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            sets: Vec::new(),
            current_set_points: [0, 0],
            serving_team: Side::One,
            sets_to_win: config.sets_to_win,
            points_per_set: config.points_per_set,
            points_per_deciding_set: config.points_per_deciding_set,
            min_lead_to_win: config.min_lead_to_win,
            current_set_number: 1,
            is_match_complete: false,
            history: History::new(),
        })
    }

    /// Record a rally won by `winner`. Rejected once the match is complete.
    pub fn score_point(&mut self, winner: Side) -> EngineResult<()> {
        if self.is_match_complete {
            return Err(EngineError::MatchComplete);
        }
        self.history.push(self.snapshot());

        self.current_set_points[winner.index()] += 1;
        // Side-out: serve only changes hands when the receiving team wins.
        if winner != self.serving_team {
            self.serving_team = winner;
        }

        let target = if self.is_deciding_set() {
            self.points_per_deciding_set
        } else {
            self.points_per_set
        };
        let own = self.current_set_points[winner.index()];
        let opponent = self.current_set_points[winner.other().index()];
        if own >= target && own >= opponent + self.min_lead_to_win {
            self.sets.push(self.current_set_points);
            self.current_set_points = [0, 0];
            self.current_set_number += 1;
            if self.sets_won(winner) >= self.sets_to_win {
                self.is_match_complete = true;
                debug!("volleyball match complete, sets: {:?}", self.sets);
            }
        }
        Ok(())
    }

    /// Restore the state prior to the most recent scored point.
    pub fn undo(&mut self) -> EngineResult<()> {
        let snapshot = self.history.pop().ok_or(EngineError::EmptyHistory)?;
        self.sets = snapshot.sets;
        self.current_set_points = snapshot.current_set_points;
        self.serving_team = snapshot.serving_team;
        self.current_set_number = snapshot.current_set_number;
        self.is_match_complete = snapshot.is_match_complete;
        Ok(())
    }

    /// Manual score correction, clamped at zero. A pure override: it does
    /// not run set-win checks and is not undoable.
    pub fn adjust_score(&mut self, team: Side, delta: i32) -> EngineResult<()> {
        if self.is_match_complete {
            return Err(EngineError::MatchComplete);
        }
        let current = i64::from(self.current_set_points[team.index()]);
        let adjusted = (current + i64::from(delta)).max(0);
        self.current_set_points[team.index()] = adjusted as u32;
        Ok(())
    }

    /// Administrative serve correction. Not part of undo history.
    pub fn set_server(&mut self, team: Side) {
        self.serving_team = team;
    }

    /// Sets won so far by `side`.
    #[must_use]
    pub fn sets_won(&self, side: Side) -> u32 {
        self.sets
            .iter()
            .filter(|set| set[side.index()] > set[side.other().index()])
            .count() as u32
    }

    /// The current set decides the match when both teams are one set away
    /// from winning.
    #[must_use]
    pub fn is_deciding_set(&self) -> bool {
        self.sets_won(Side::One) == self.sets_to_win - 1
            && self.sets_won(Side::Two) == self.sets_to_win - 1
    }

    fn snapshot(&self) -> VolleyballSnapshot {
        VolleyballSnapshot {
            sets: self.sets.clone(),
            current_set_points: self.current_set_points,
            serving_team: self.serving_team,
            current_set_number: self.current_set_number,
            is_match_complete: self.is_match_complete,
        }
    }
}
