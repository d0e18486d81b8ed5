//! Generation settings read from a TOML file and overlaid with command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use levelgen::{
    CreatureKind, ElementCounts, ElementToggles, ExitOverride, GenerationParameters, LevelPreset,
    LevelType, ZoneOdds,
};
use serde::Deserialize;

/// Every field is optional; unset fields fall through to the preset or the defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelSettings {
    pub preset: Option<LevelPreset>,
    pub seed: Option<u64>,
    pub length: Option<usize>,
    pub height: Option<usize>,
    pub difficulty: Option<u32>,
    pub level_type: Option<LevelType>,
    pub flat: Option<bool>,
    pub ladders: Option<bool>,
    pub creatures: Option<Vec<CreatureKind>>,
    pub exit: Option<ExitOverride>,
    pub elements: Option<ElementToggles>,
    pub targets: Option<ElementCounts>,
    pub zone_odds: Option<ZoneOdds>,
}

impl LevelSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read level config: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse level config: {}", path.display()))
    }

    /// Fields set in `top` win.
    pub fn overlay(self, top: Self) -> Self {
        Self {
            preset: top.preset.or(self.preset),
            seed: top.seed.or(self.seed),
            length: top.length.or(self.length),
            height: top.height.or(self.height),
            difficulty: top.difficulty.or(self.difficulty),
            level_type: top.level_type.or(self.level_type),
            flat: top.flat.or(self.flat),
            ladders: top.ladders.or(self.ladders),
            creatures: top.creatures.or(self.creatures),
            exit: top.exit.or(self.exit),
            elements: top.elements.or(self.elements),
            targets: top.targets.or(self.targets),
            zone_odds: top.zone_odds.or(self.zone_odds),
        }
    }

    pub fn into_parameters(self) -> GenerationParameters {
        let mut params = self.preset.map(LevelPreset::parameters).unwrap_or_default();
        if let Some(seed) = self.seed {
            params.seed = Some(seed);
        }
        if let Some(length) = self.length {
            params.length = length;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(difficulty) = self.difficulty {
            params.difficulty = difficulty;
        }
        if let Some(level_type) = self.level_type {
            params.level_type = level_type;
        }
        if let Some(flat) = self.flat {
            params.flat = flat;
        }
        if let Some(ladders) = self.ladders {
            params.ladders = ladders;
        }
        if let Some(creatures) = self.creatures {
            params.creatures = creatures;
        }
        if let Some(exit) = self.exit {
            params.exit = exit;
        }
        if let Some(elements) = self.elements {
            params.elements = elements;
        }
        if self.targets.is_some() {
            params.targets = self.targets;
        }
        if self.zone_odds.is_some() {
            params.zone_odds = self.zone_odds;
        }
        params
    }
}
