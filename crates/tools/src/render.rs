//! Text views of a generated level: an ASCII grid and a JSON report.

use levelgen::tiles::{
    BRICK, BRICK_COIN, BRICK_POWERUP, CANNON_BARREL, CANNON_BASE, CANNON_POLE, COIN, EMPTY, GOAL,
    HIDDEN_COIN_BLOCK, HILL_FILL, HILL_LEFT, HILL_RIGHT, HILL_TOP, HILL_TOP_LEFT,
    HILL_TOP_LEFT_MERGED, HILL_TOP_RIGHT, HILL_TOP_RIGHT_MERGED, LADDER, LADDER_TOP,
    QUESTION_COIN, QUESTION_MULTI_COIN, QUESTION_POWERUP, STAIR_ROCK, TUBE_LIP_LEFT,
    TUBE_SHAFT_LEFT,
};
use levelgen::{CreatureKind, GenerationEvent, Level, LevelSummary, Pos, SpawnKind};
use serde::Serialize;

fn tile_glyph(tile: u8) -> char {
    match tile {
        EMPTY => ' ',
        COIN => 'o',
        BRICK | BRICK_COIN | BRICK_POWERUP => 'B',
        QUESTION_COIN | QUESTION_POWERUP | QUESTION_MULTI_COIN => '?',
        HIDDEN_COIN_BLOCK => '\'',
        STAIR_ROCK => '=',
        LADDER => 'H',
        LADDER_TOP => '^',
        CANNON_BARREL | CANNON_BASE | CANNON_POLE => 'C',
        GOAL => '*',
        HILL_TOP_LEFT | HILL_TOP | HILL_TOP_RIGHT | HILL_LEFT | HILL_FILL | HILL_RIGHT
        | HILL_TOP_LEFT_MERGED | HILL_TOP_RIGHT_MERGED => '~',
        _ if tile == TUBE_LIP_LEFT
            || tile == TUBE_LIP_LEFT + 1
            || tile == TUBE_SHAFT_LEFT
            || tile == TUBE_SHAFT_LEFT + 1 =>
        {
            'T'
        }
        _ => '#',
    }
}

fn creature_glyph(kind: CreatureKind) -> char {
    let glyph = match kind {
        CreatureKind::Goomba | CreatureKind::GoombaWinged | CreatureKind::WaveGoomba => 'g',
        CreatureKind::RedKoopa | CreatureKind::RedKoopaWinged => 'r',
        CreatureKind::GreenKoopa | CreatureKind::GreenKoopaWinged => 'k',
        CreatureKind::Spiky | CreatureKind::SpikyWinged => 's',
        CreatureKind::Flower => 'f',
    };
    if kind.is_winged() { glyph.to_ascii_uppercase() } else { glyph }
}

/// One string per row, top to bottom. Spawns draw over their tile.
pub fn render_ascii(level: &Level) -> Vec<String> {
    (0..level.height as i32)
        .map(|y| {
            (0..level.length as i32)
                .map(|x| match level.spawn(x, y).map(|spawn| spawn.kind) {
                    Some(SpawnKind::Creature(kind)) => creature_glyph(kind),
                    Some(SpawnKind::Goal) => '*',
                    None => tile_glyph(level.tile(x, y)),
                })
                .collect()
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct LevelReport<'a> {
    pub seed: u64,
    pub fingerprint: String,
    pub length: usize,
    pub height: usize,
    pub exit: Pos,
    pub summary: &'a LevelSummary,
    pub warnings: Vec<&'a GenerationEvent>,
    pub rows: Vec<String>,
}

impl<'a> LevelReport<'a> {
    pub fn new(level: &'a Level) -> Self {
        Self {
            seed: level.seed,
            fingerprint: format!("{:016x}", level.fingerprint()),
            length: level.length,
            height: level.height,
            exit: level.exit,
            summary: &level.summary,
            warnings: level.warnings().collect(),
            rows: render_ascii(level),
        }
    }
}
