//! Structured record of what a generation run decided and corrected.

use serde::{Deserialize, Serialize};

use crate::mapgen::ZoneKind;
use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationEvent {
    SeedDrawn { seed: u64 },
    LengthRaised { requested: usize, applied: usize },
    HeightRaised { requested: usize, applied: usize },
    DifficultyLowered { requested: u32, applied: u32 },
    EmptyOddsTable,
    ExitClamped { requested: Pos, applied: Pos },
    ZoneBuilt { kind: ZoneKind, x: i32, length: i32, nested: bool },
    GapCarved { start: i32, end: i32 },
    StraightFallback { x: i32 },
    /// A walker whose cell was filled by a later pass and was removed.
    CreatureBuried { pos: Pos },
}

impl GenerationEvent {
    /// Corrections a caller should surface; the rest is trace.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::LengthRaised { .. }
                | Self::HeightRaised { .. }
                | Self::DifficultyLowered { .. }
                | Self::EmptyOddsTable
                | Self::ExitClamped { .. }
                | Self::StraightFallback { .. }
        )
    }
}
