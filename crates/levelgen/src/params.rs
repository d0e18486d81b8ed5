//! Generation parameters, budget targets, and the named level presets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::log::GenerationEvent;
use crate::mapgen::seed::generate_runtime_seed;
use crate::types::{CreatureKind, LevelType, ParseError};

pub const MIN_LEVEL_LENGTH: usize = 50;
pub const MIN_LEVEL_HEIGHT: usize = 15;
pub const DEFAULT_LEVEL_LENGTH: usize = 256;
pub const MAX_DIFFICULTY: u32 = 64;

/// Exit coordinates; zero on an axis means "use the generated default".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitOverride {
    pub x: usize,
    pub y: usize,
}

/// Per-element placement counts; used both for budget targets and for what a level placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementCounts {
    pub blocks: u32,
    pub coins: u32,
    pub hidden_blocks: u32,
    pub tubes: u32,
    pub cannons: u32,
    pub gaps: u32,
    pub dead_ends: u32,
    pub platforms: u32,
    pub creatures: u32,
}

impl ElementCounts {
    /// Default budget for a level of `length` columns at `difficulty`.
    pub fn for_difficulty(difficulty: u32, length: usize, flat: bool) -> Self {
        let length = u32::try_from(length).unwrap_or(u32::MAX);
        let d = difficulty.min(MAX_DIFFICULTY);
        Self {
            blocks: length / 2 + 10,
            coins: length,
            hidden_blocks: 2 + length / 25,
            tubes: if flat { 2 * d } else { 2 + 2 * d },
            cannons: 2 * d,
            gaps: if flat { 2 * d } else { 2 + 2 * d },
            dead_ends: if flat { d } else { 1 + d },
            platforms: if flat { 0 } else { 2 + length / 50 },
            creatures: (1 + d).saturating_mul(length / 10),
        }
    }

    fn masked(mut self, toggles: ElementToggles) -> Self {
        let mask = |enabled: bool, value: &mut u32| {
            if !enabled {
                *value = 0;
            }
        };
        mask(toggles.blocks, &mut self.blocks);
        mask(toggles.coins, &mut self.coins);
        mask(toggles.hidden_blocks, &mut self.hidden_blocks);
        mask(toggles.tubes, &mut self.tubes);
        mask(toggles.cannons, &mut self.cannons);
        mask(toggles.gaps, &mut self.gaps);
        mask(toggles.dead_ends, &mut self.dead_ends);
        mask(toggles.platforms, &mut self.platforms);
        mask(toggles.creatures, &mut self.creatures);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementToggles {
    pub blocks: bool,
    pub coins: bool,
    pub hidden_blocks: bool,
    pub tubes: bool,
    pub cannons: bool,
    pub gaps: bool,
    pub dead_ends: bool,
    pub platforms: bool,
    pub creatures: bool,
}

impl ElementToggles {
    pub fn all_on() -> Self {
        Self {
            blocks: true,
            coins: true,
            hidden_blocks: true,
            tubes: true,
            cannons: true,
            gaps: true,
            dead_ends: true,
            platforms: true,
            creatures: true,
        }
    }

    pub fn all_off() -> Self {
        Self {
            blocks: false,
            coins: false,
            hidden_blocks: false,
            tubes: false,
            cannons: false,
            gaps: false,
            dead_ends: false,
            platforms: false,
            creatures: false,
        }
    }
}

impl Default for ElementToggles {
    fn default() -> Self {
        Self::all_on()
    }
}

/// Relative weights of the six zone kinds. Negative weights count as zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneOdds {
    pub straight: i32,
    pub platforms: i32,
    pub tubes: i32,
    pub gaps: i32,
    pub cannons: i32,
    pub dead_ends: i32,
}

impl ZoneOdds {
    pub fn for_difficulty(difficulty: u32, level_type: LevelType) -> Self {
        let d = difficulty.min(MAX_DIFFICULTY) as i32;
        Self {
            straight: 20,
            platforms: if level_type == LevelType::Overground { 1 } else { 0 },
            tubes: 2 + d,
            gaps: 2 + 2 * d,
            cannons: 5 * d - 5,
            dead_ends: 2 + 2 * d,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    pub length: usize,
    pub height: usize,
    /// `None` draws a fresh seed from runtime entropy.
    pub seed: Option<u64>,
    pub level_type: LevelType,
    pub difficulty: u32,
    pub flat: bool,
    pub ladders: bool,
    pub creatures: Vec<CreatureKind>,
    pub exit: ExitOverride,
    pub elements: ElementToggles,
    pub targets: Option<ElementCounts>,
    pub zone_odds: Option<ZoneOdds>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            length: DEFAULT_LEVEL_LENGTH,
            height: MIN_LEVEL_HEIGHT,
            seed: None,
            level_type: LevelType::Overground,
            difficulty: 0,
            flat: false,
            ladders: false,
            creatures: CreatureKind::ALL.to_vec(),
            exit: ExitOverride::default(),
            elements: ElementToggles::all_on(),
            targets: None,
            zone_odds: None,
        }
    }
}

impl GenerationParameters {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    /// Budget targets the generator will enforce for these parameters.
    pub fn budget_targets(&self) -> ElementCounts {
        let length = self.length.max(MIN_LEVEL_LENGTH);
        self.targets
            .unwrap_or_else(|| ElementCounts::for_difficulty(self.difficulty, length, self.flat))
            .masked(self.elements)
    }

    pub(crate) fn resolve(&self, log: &mut Vec<GenerationEvent>) -> ResolvedParameters {
        let length = if self.length < MIN_LEVEL_LENGTH {
            log.push(GenerationEvent::LengthRaised {
                requested: self.length,
                applied: MIN_LEVEL_LENGTH,
            });
            MIN_LEVEL_LENGTH
        } else {
            self.length
        };

        let height = if self.height < MIN_LEVEL_HEIGHT {
            log.push(GenerationEvent::HeightRaised {
                requested: self.height,
                applied: MIN_LEVEL_HEIGHT,
            });
            MIN_LEVEL_HEIGHT
        } else {
            self.height
        };

        let difficulty = if self.difficulty > MAX_DIFFICULTY {
            log.push(GenerationEvent::DifficultyLowered {
                requested: self.difficulty,
                applied: MAX_DIFFICULTY,
            });
            MAX_DIFFICULTY
        } else {
            self.difficulty
        };

        let seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed = generate_runtime_seed();
                log.push(GenerationEvent::SeedDrawn { seed });
                seed
            }
        };

        let creatures = if self.elements.creatures { self.creatures.clone() } else { Vec::new() };

        ResolvedParameters {
            length,
            height,
            seed,
            level_type: self.level_type,
            difficulty,
            flat: self.flat,
            ladders: self.ladders,
            creatures,
            exit: self.exit,
            targets: self.budget_targets(),
            odds: self
                .zone_odds
                .unwrap_or_else(|| ZoneOdds::for_difficulty(difficulty, self.level_type)),
        }
    }
}

/// Parameters after clamping, with a concrete seed and budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResolvedParameters {
    pub(crate) length: usize,
    pub(crate) height: usize,
    pub(crate) seed: u64,
    pub(crate) level_type: LevelType,
    pub(crate) difficulty: u32,
    pub(crate) flat: bool,
    pub(crate) ladders: bool,
    pub(crate) creatures: Vec<CreatureKind>,
    pub(crate) exit: ExitOverride,
    pub(crate) targets: ElementCounts,
    pub(crate) odds: ZoneOdds,
}

/// Stock level configurations, from an obstacle-free run up to the full game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelPreset {
    /// No threats and no jumps.
    Flat,
    /// Gaps only; the player has to jump.
    Jumping,
    Goombas,
    /// Tubes with flowers in them.
    Tubes,
    Spikies,
    Koopas,
    /// Coins, blocks, power-ups and every obstacle.
    Full,
    FullHard,
    FullExtraHard,
}

impl LevelPreset {
    pub const ALL: [Self; 9] = [
        Self::Flat,
        Self::Jumping,
        Self::Goombas,
        Self::Tubes,
        Self::Spikies,
        Self::Koopas,
        Self::Full,
        Self::FullHard,
        Self::FullExtraHard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Jumping => "jumping",
            Self::Goombas => "goombas",
            Self::Tubes => "tubes",
            Self::Spikies => "spikies",
            Self::Koopas => "koopas",
            Self::Full => "full",
            Self::FullHard => "full-hard",
            Self::FullExtraHard => "full-extra-hard",
        }
    }

    pub fn parameters(self) -> GenerationParameters {
        use CreatureKind::*;

        let jumping = ElementToggles { gaps: true, ..ElementToggles::all_off() };
        let with_enemies = ElementToggles { creatures: true, ..jumping };
        let with_tubes = ElementToggles { tubes: true, ..with_enemies };

        let (flat, difficulty, elements, creatures) = match self {
            Self::Flat => (true, 0, ElementToggles::all_off(), Vec::new()),
            Self::Jumping => (false, 0, jumping, Vec::new()),
            Self::Goombas => (false, 0, with_enemies, vec![Goomba]),
            Self::Tubes => (false, 0, with_tubes, vec![Goomba, Flower]),
            Self::Spikies => (false, 0, with_tubes, vec![Goomba, Spiky, Flower]),
            Self::Koopas => (false, 0, with_tubes, vec![Goomba, Spiky, GreenKoopa, Flower]),
            Self::Full => (false, 0, ElementToggles::all_on(), vec![Goomba, Spiky, GreenKoopa]),
            Self::FullHard => (
                false,
                1,
                ElementToggles::all_on(),
                vec![Goomba, Spiky, GreenKoopa, RedKoopa, GoombaWinged, GreenKoopaWinged],
            ),
            Self::FullExtraHard => (
                false,
                2,
                ElementToggles::all_on(),
                vec![
                    Goomba,
                    Spiky,
                    GreenKoopa,
                    RedKoopa,
                    GoombaWinged,
                    GreenKoopaWinged,
                    SpikyWinged,
                ],
            ),
        };

        GenerationParameters { flat, difficulty, elements, creatures, ..GenerationParameters::default() }
    }
}

impl FromStr for LevelPreset {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| ParseError::UnknownPreset(raw.to_string()))
    }
}
