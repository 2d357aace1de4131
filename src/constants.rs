//! Engine-wide constants and scoring defaults.

/// Minimum participant count for any bracket.
pub const MIN_PARTICIPANTS: usize = 2;

/// Maximum number of undo snapshots retained per match. Oldest entries are
/// evicted silently beyond the cap.
pub const HISTORY_LIMIT: usize = 20;

/// Games needed to take a tennis set (with a two-game lead).
pub const GAMES_PER_SET: u32 = 6;

/// Points needed to take a tennis tiebreak (with a two-point lead).
pub const TIEBREAK_TARGET: u32 = 7;

/// Default tennis sets to win (best of 3).
pub const DEFAULT_TENNIS_SETS_TO_WIN: u32 = 2;

/// Default volleyball sets to win (best of 5).
pub const DEFAULT_VOLLEYBALL_SETS_TO_WIN: u32 = 3;

/// Default points to take a volleyball set.
pub const DEFAULT_POINTS_PER_SET: u32 = 25;

/// Default points to take a deciding volleyball set.
pub const DEFAULT_POINTS_PER_DECIDING_SET: u32 = 15;

/// Default point lead required to close out a volleyball set.
pub const DEFAULT_MIN_LEAD_TO_WIN: u32 = 2;
