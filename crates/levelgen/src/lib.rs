pub mod level;
pub mod log;
pub mod mapgen;
pub mod params;
pub mod tiles;
pub mod types;

pub use level::{Level, LevelSummary};
pub use log::GenerationEvent;
pub use mapgen::{LevelGenerator, ZoneKind, generate, generate_runtime_seed};
pub use params::{
    DEFAULT_LEVEL_LENGTH, ElementCounts, ElementToggles, ExitOverride, GenerationParameters,
    LevelPreset, MAX_DIFFICULTY, MIN_LEVEL_HEIGHT, MIN_LEVEL_LENGTH, ZoneOdds,
};
pub use types::*;
