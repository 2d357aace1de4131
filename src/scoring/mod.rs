//! Live match scoring engines.
//!
//! Two parallel, format-specific state machines (tennis, volleyball)
//! consume point-won events and deterministically derive match progress
//! with a bounded undo history. Both are pure, synchronous state
//! transitions: a call either fully applies and returns, or fails with a
//! typed error and changes nothing. Atomicity of the read-modify-write
//! cycle around a persisted match is the host's concern.

pub mod history;
pub mod tennis;
pub mod volleyball;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

pub use history::History;
pub use tennis::{TennisConfig, TennisSnapshot, TennisState};
pub use volleyball::{VolleyballConfig, VolleyballSnapshot, VolleyballState};

use crate::entities::Side;
use crate::errors::EngineResult;

/// Operations common to every scoring engine, dispatched over
/// [`SportState`] without dynamic allocation.
#[enum_dispatch]
pub trait Scoring {
    /// Record a point for `winner`.
    fn score_point(&mut self, winner: Side) -> EngineResult<()>;
    /// Restore the state prior to the most recent scored point.
    fn undo(&mut self) -> EngineResult<()>;
    /// Administrative serve override; never validated or undoable.
    fn set_server(&mut self, side: Side);
    /// Whether the match has reached a terminal state.
    fn is_complete(&self) -> bool;
}

impl Scoring for TennisState {
    fn score_point(&mut self, winner: Side) -> EngineResult<()> {
        Self::score_point(self, winner)
    }

    fn undo(&mut self) -> EngineResult<()> {
        Self::undo(self)
    }

    fn set_server(&mut self, side: Side) {
        Self::set_server(self, side);
    }

    fn is_complete(&self) -> bool {
        self.is_match_complete
    }
}

impl Scoring for VolleyballState {
    fn score_point(&mut self, winner: Side) -> EngineResult<()> {
        Self::score_point(self, winner)
    }

    fn undo(&mut self) -> EngineResult<()> {
        Self::undo(self)
    }

    fn set_server(&mut self, side: Side) {
        Self::set_server(self, side);
    }

    fn is_complete(&self) -> bool {
        self.is_match_complete
    }
}

/// Sport-specific live state, tagged so each engine operates on a
/// statically-known shape.
#[enum_dispatch(Scoring)]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum SportState {
    Tennis(TennisState),
    Volleyball(VolleyballState),
}

/// Sport-specific scoring rules, passed once at match initialization.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum SportConfig {
    Tennis(TennisConfig),
    Volleyball(VolleyballConfig),
}

impl SportConfig {
    /// Build the initial live state for this configuration.
    pub fn initialize(&self) -> EngineResult<SportState> {
        match self {
            Self::Tennis(config) => Ok(SportState::Tennis(TennisState::new(*config)?)),
            Self::Volleyball(config) => Ok(SportState::Volleyball(VolleyballState::new(*config)?)),
        }
    }
}
