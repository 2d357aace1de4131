//! # Tourney Core
//!
//! Tournament bracket generation and live match scoring, implemented as
//! pure, synchronous state transitions with no storage or network
//! dependencies.
//!
//! Two independent components form the engine:
//!
//! - **Bracket generator**: turns a seeded participant list into a complete
//!   match graph (single elimination, double elimination, round robin)
//!   including bye propagation and inter-match advancement links.
//! - **Scoring engines**: format-specific state machines (tennis,
//!   volleyball) that consume point-won events and derive game/set/match
//!   progress, serve rotation, tiebreak and deuce handling, and a bounded
//!   undo history.
//!
//! The generator never depends on the engines and vice versa; both are
//! leaves the host application orchestrates. Hosts persist the emitted
//! records and own winner advancement along the generated links, as well
//! as per-match write isolation.
//!
//! ## Core Modules
//!
//! - [`bracket`]: match records and the bracket topology builders
//! - [`scoring`]: tennis and volleyball scoring state machines
//! - [`errors`]: typed failure taxonomy shared by both components
//!
//! ## Example
//!
//! ```
//! use tourney_core::{generator, TournamentFormat};
//!
//! let participants = vec!["ada".to_string(), "brook".to_string(), "cleo".to_string()];
//! let matches = generator::generate(TournamentFormat::SingleElimination, &participants).unwrap();
//!
//! // Bracket of four: two semifinals (one a bye for the top seed) and a final.
//! assert_eq!(matches.len(), 3);
//! ```

pub mod bracket;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod scoring;

pub use bracket::{BracketSide, MatchRecord, MatchStatus, TournamentFormat, generator};
pub use entities::{ParticipantId, Side};
pub use errors::{EngineError, EngineResult, ErrorKind};
pub use scoring::{
    History, Scoring, SportConfig, SportState, TennisConfig, TennisState, VolleyballConfig,
    VolleyballState,
};
