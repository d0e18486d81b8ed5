use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelType {
    #[default]
    Overground,
    Underground,
    Castle,
}

impl LevelType {
    /// Column shift applied to wall pieces so they come from this level type's tile sheet.
    pub fn wall_sheet_offset(self) -> u8 {
        match self {
            Self::Overground => 0,
            Self::Castle => 8,
            Self::Underground => 12,
        }
    }

    pub fn has_ceiling(self) -> bool {
        self != Self::Overground
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Overground => 0,
            Self::Underground => 1,
            Self::Castle => 2,
        }
    }
}

impl FromStr for LevelType {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "overground" | "0" => Ok(Self::Overground),
            "underground" | "1" => Ok(Self::Underground),
            "castle" | "2" => Ok(Self::Castle),
            _ => Err(ParseError::UnknownLevelType(raw.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreatureKind {
    Goomba,
    GoombaWinged,
    RedKoopa,
    RedKoopaWinged,
    GreenKoopa,
    GreenKoopaWinged,
    Spiky,
    SpikyWinged,
    Flower,
    WaveGoomba,
}

impl CreatureKind {
    pub const ALL: [Self; 10] = [
        Self::Goomba,
        Self::GoombaWinged,
        Self::RedKoopa,
        Self::RedKoopaWinged,
        Self::GreenKoopa,
        Self::GreenKoopaWinged,
        Self::Spiky,
        Self::SpikyWinged,
        Self::Flower,
        Self::WaveGoomba,
    ];

    /// Short code used by level configuration strings (`g`, `gkw`, `f`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Self::Goomba => "g",
            Self::GoombaWinged => "gw",
            Self::RedKoopa => "rk",
            Self::RedKoopaWinged => "rkw",
            Self::GreenKoopa => "gk",
            Self::GreenKoopaWinged => "gkw",
            Self::Spiky => "s",
            Self::SpikyWinged => "sw",
            Self::Flower => "f",
            Self::WaveGoomba => "wg",
        }
    }

    pub fn is_winged(self) -> bool {
        matches!(
            self,
            Self::GoombaWinged
                | Self::RedKoopaWinged
                | Self::GreenKoopaWinged
                | Self::SpikyWinged
                | Self::WaveGoomba
        )
    }

    /// Flowers live in tube lips and are never scattered on open ground.
    pub fn walks(self) -> bool {
        self != Self::Flower
    }

    /// Parses a comma separated list of short codes, e.g. `"g,gk,f"`.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, ParseError> {
        let mut kinds = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            let kind = part.parse::<Self>()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }
}

impl FromStr for CreatureKind {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let code = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| ParseError::UnknownCreature(raw.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnKind {
    Creature(CreatureKind),
    Goal,
}

/// A deferred entity spawn stored in a level cell; the runtime scene turns it
/// into a live sprite when the cell first comes into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnTemplate {
    pub kind: SpawnKind,
    pub pos: Pos,
    pub facing: Facing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    UnknownCreature(String),
    UnknownPreset(String),
    UnknownLevelType(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCreature(raw) => write!(f, "unknown creature code '{raw}'"),
            Self::UnknownPreset(raw) => write!(f, "unknown level preset '{raw}'"),
            Self::UnknownLevelType(raw) => write!(f, "unknown level type '{raw}'"),
        }
    }
}

impl Error for ParseError {}
