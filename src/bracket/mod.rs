//! Bracket generation: match records and the pure topology builders.
//!
//! The generator maps `(participants, format)` to a complete match graph
//! and has no dependency on the scoring engines or on storage. Hosts
//! persist the records verbatim and own winner advancement at runtime.

pub mod entities;
pub mod generator;

pub use entities::{BracketSide, MatchRecord, MatchStatus, TournamentFormat};
pub use generator::{
    generate, generate_double_elimination, generate_round_robin, generate_single_elimination,
};
