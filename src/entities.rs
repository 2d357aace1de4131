//! Shared identifiers used by both the bracket generator and the scoring
//! engines.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::EngineError;

/// Opaque participant identifier. The engine never inspects its contents
/// beyond equality; hosts map it to whatever identifier scheme they use.
pub type ParticipantId = String;

/// One of the two sides of a match. Doubles as a slot selector for
/// downstream matches and as the winner of a scored point.
///
/// Serialized as `1` or `2`; anything else is rejected at deserialization.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// Zero-based index for score arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        match side {
            Side::One => 1,
            Side::Two => 2,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(EngineError::InvalidSide(other)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}
