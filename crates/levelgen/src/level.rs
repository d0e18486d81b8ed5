//! The generated level: tile grid, per-cell block data and spawn templates, plus run metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::log::GenerationEvent;
use crate::params::ElementCounts;
use crate::tiles::EMPTY;
use crate::types::{CreatureKind, Facing, LevelType, Pos, SpawnKind, SpawnTemplate};

/// What a run placed against what it was allowed to place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub placed: ElementCounts,
    pub targets: ElementCounts,
    pub creatures_by_kind: BTreeMap<CreatureKind, u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub length: usize,
    pub height: usize,
    tiles: Vec<u8>,
    block_data: Vec<u8>,
    spawns: Vec<Option<SpawnTemplate>>,
    pub seed: u64,
    pub level_type: LevelType,
    pub difficulty: u32,
    pub exit: Pos,
    pub summary: LevelSummary,
    pub(crate) log: Vec<GenerationEvent>,
}

impl Level {
    pub(crate) fn new(
        length: usize,
        height: usize,
        seed: u64,
        level_type: LevelType,
        difficulty: u32,
        log: Vec<GenerationEvent>,
    ) -> Self {
        let cells = length * height;
        Self {
            length,
            height,
            tiles: vec![EMPTY; cells],
            block_data: vec![0; cells],
            spawns: vec![None; cells],
            seed,
            level_type,
            difficulty,
            exit: Pos { y: 0, x: 0 },
            summary: LevelSummary::default(),
            log,
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| (y as usize) * self.length + (x as usize))
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.length && (y as usize) < self.height
    }

    /// Tile code at `(x, y)`; cells outside the grid read as empty.
    pub fn tile(&self, x: i32, y: i32) -> u8 {
        self.index(x, y).map_or(EMPTY, |index| self.tiles[index])
    }

    /// Writes outside the grid are ignored.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: u8) {
        if let Some(index) = self.index(x, y) {
            self.tiles[index] = tile;
        }
    }

    /// Tile at the nearest in-grid cell.
    pub fn tile_capped(&self, x: i32, y: i32) -> u8 {
        let x = x.clamp(0, self.length as i32 - 1);
        let y = y.clamp(0, self.height as i32 - 1);
        self.tile(x, y)
    }

    /// Coins held by a multi-coin block; zero elsewhere.
    pub fn block_data(&self, x: i32, y: i32) -> u8 {
        self.index(x, y).map_or(0, |index| self.block_data[index])
    }

    pub(crate) fn set_block_data(&mut self, x: i32, y: i32, data: u8) {
        if let Some(index) = self.index(x, y) {
            self.block_data[index] = data;
        }
    }

    pub fn spawn(&self, x: i32, y: i32) -> Option<&SpawnTemplate> {
        self.index(x, y).and_then(|index| self.spawns[index].as_ref())
    }

    /// Stores a template at its own position. Occupied or off-grid cells refuse it.
    pub fn set_spawn(&mut self, template: SpawnTemplate) -> bool {
        let Some(index) = self.index(template.pos.x, template.pos.y) else {
            return false;
        };
        if self.spawns[index].is_some() {
            return false;
        }
        self.spawns[index] = Some(template);
        true
    }

    pub(crate) fn take_spawn(&mut self, x: i32, y: i32) -> Option<SpawnTemplate> {
        self.index(x, y).and_then(|index| self.spawns[index].take())
    }

    /// Templates in row-major order.
    pub fn spawns(&self) -> impl Iterator<Item = &SpawnTemplate> {
        self.spawns.iter().flatten()
    }

    pub fn log(&self) -> &[GenerationEvent] {
        &self.log
    }

    pub fn warnings(&self) -> impl Iterator<Item = &GenerationEvent> {
        self.log.iter().filter(|event| event.is_warning())
    }

    pub fn column_has_solid(&self, x: i32) -> bool {
        (0..self.height as i32).any(|y| self.tile(x, y) != EMPTY)
    }

    /// Topmost non-empty row of a column.
    pub fn surface_row(&self, x: i32) -> Option<i32> {
        (0..self.height as i32).find(|&y| self.tile(x, y) != EMPTY)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.length as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.seed.to_le_bytes());
        bytes.push(self.level_type.code());
        bytes.extend(self.difficulty.to_le_bytes());
        bytes.extend(&self.tiles);
        bytes.extend(&self.block_data);
        bytes.extend(self.exit.y.to_le_bytes());
        bytes.extend(self.exit.x.to_le_bytes());

        let spawns: Vec<&SpawnTemplate> = self.spawns().collect();
        bytes.extend((spawns.len() as u32).to_le_bytes());
        for spawn in spawns {
            bytes.extend(spawn.pos.y.to_le_bytes());
            bytes.extend(spawn.pos.x.to_le_bytes());
            bytes.push(spawn_code(spawn.kind));
            bytes.push(match spawn.facing {
                Facing::Left => 0,
                Facing::Right => 1,
            });
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn spawn_code(kind: SpawnKind) -> u8 {
    match kind {
        SpawnKind::Creature(creature) => match creature {
            CreatureKind::Goomba => 0,
            CreatureKind::GoombaWinged => 1,
            CreatureKind::RedKoopa => 2,
            CreatureKind::RedKoopaWinged => 3,
            CreatureKind::GreenKoopa => 4,
            CreatureKind::GreenKoopaWinged => 5,
            CreatureKind::Spiky => 6,
            CreatureKind::SpikyWinged => 7,
            CreatureKind::Flower => 8,
            CreatureKind::WaveGoomba => 9,
        },
        SpawnKind::Goal => 255,
    }
}
