//! Brick bands, hidden coin blocks, coin rows and ladders placed above finished ground.
//! Every placement needs an empty in-grid cell and room in its budget.

use crate::tiles::{
    BRICK, BRICK_COIN, BRICK_POWERUP, COIN, HIDDEN_COIN_BLOCK, LADDER, LADDER_TOP,
    QUESTION_COIN, QUESTION_MULTI_COIN, QUESTION_POWERUP,
};

use super::budget::Element;
use super::generator::BuildContext;

/// Hidden blocks sit this many rows above their band.
const HIDDEN_BLOCK_RISE: i32 = 4;
const MAX_COINS_PER_BLOCK: i32 = 9;
const MIN_LADDER_HEIGHT: i32 = 4;

pub(crate) struct BlockBand {
    hidden: bool,
    start_inset: i32,
    end_inset: i32,
    only_hidden: bool,
    /// Bands exactly four rows apart instead of three to eight.
    fixed_spacing: bool,
}

impl BlockBand {
    pub(crate) fn regular() -> Self {
        Self { hidden: false, start_inset: 0, end_inset: 0, only_hidden: false, fixed_spacing: false }
    }

    pub(crate) fn hidden_only() -> Self {
        Self { hidden: true, start_inset: 0, end_inset: 0, only_hidden: true, fixed_spacing: true }
    }
}

/// Coins, block bands and maybe a ladder over `x0..x1` standing on `floor`.
pub(crate) fn decorate(context: &mut BuildContext, x0: i32, x1: i32, floor: i32) {
    if floor < 1 {
        return;
    }

    let start_inset = context.rng.below(4);
    let end_inset = context.rng.below(4);
    let hidden = context.rng.below(context.difficulty + 1) >= 1;

    if floor - 2 > 0 && !hidden {
        build_coins(context, x0, x1, floor, start_inset, end_inset);
    }

    let band = BlockBand { hidden, start_inset, end_inset, only_hidden: false, fixed_spacing: false };
    let thinned = build_blocks(context, x0, x1, floor, band);

    if thinned && context.ladders && context.rng.chance(3) {
        let x = if context.rng.coin_flip() { x0 } else { x1 - 1 };
        build_ladder(context, x, floor, None);
    }
}

/// Bands of blocks rising from the row above `floor`. Returns whether any band
/// was spaced more than four rows from the previous one.
pub(crate) fn build_blocks(
    context: &mut BuildContext,
    x0: i32,
    x1: i32,
    floor: i32,
    band: BlockBand,
) -> bool {
    let BlockBand { mut hidden, mut start_inset, mut end_inset, only_hidden, fixed_spacing } = band;
    hidden |= only_hidden;

    let mut thinned = false;
    let mut row = floor - 1;
    while row > 0 {
        if (x1 - 1 - end_inset) - (x0 + 1 + start_inset) > 0 {
            for x in x0 + start_inset..x1 - end_inset {
                if hidden && context.budget.target(Element::HiddenBlock) != 0 {
                    if context.rng.below(2) == 1 {
                        place_hidden_block(context, x, row - HIDDEN_BLOCK_RISE);
                    }
                } else {
                    let edge = x == x0 + 1 || x == x1 - 2;
                    if place_band_block(context, x, row, edge) {
                        build_coins(context, x0, x1, row, start_inset, end_inset);
                    }
                }
            }
            hidden = only_hidden || context.rng.chance(4);
        }

        let spacing = if fixed_spacing { 4 } else { context.rng.below(6) + 3 };
        if spacing > 4 {
            thinned = true;
        }
        row -= spacing;
        start_inset = context.rng.below(4);
        end_inset = context.rng.below(4);
    }
    thinned
}

/// Question bricks away from the band edges, plain and prize bricks anywhere.
fn place_band_block(context: &mut BuildContext, x: i32, row: i32, edge: bool) -> bool {
    if !edge && context.rng.chance(3) {
        if !context.budget.has_room(Element::Block) {
            return false;
        }
        match context.rng.below(6) {
            0 | 1 => place_block(context, x, row, QUESTION_POWERUP, 0),
            2 | 3 => place_block(context, x, row, QUESTION_COIN, 1),
            _ => {
                let coins = context.rng.below(MAX_COINS_PER_BLOCK) + 1;
                place_block(context, x, row, QUESTION_MULTI_COIN, coins as u32)
            }
        }
    } else if context.rng.chance(4) {
        if !context.budget.has_room(Element::Block) {
            return false;
        }
        if context.rng.chance(4) {
            place_block(context, x, row, BRICK_POWERUP, 0)
        } else {
            place_block(context, x, row, BRICK_COIN, 1)
        }
    } else if context.rng.below(2) == 1 {
        place_block(context, x, row, BRICK, 0)
    } else {
        false
    }
}

/// A coin-bearing block with no coins left in the budget becomes a plain brick.
fn place_block(context: &mut BuildContext, x: i32, y: i32, tile: u8, wanted_coins: u32) -> bool {
    if !context.is_free(x, y) || !context.budget.try_take(Element::Block) {
        return false;
    }
    let coins = wanted_coins.min(context.budget.remaining(Element::Coin));
    let tile = if wanted_coins > 0 && coins == 0 { BRICK } else { tile };
    context.budget.try_take_many(Element::Coin, coins);
    context.level.set_tile(x, y, tile);
    if tile == QUESTION_MULTI_COIN {
        context.level.set_block_data(x, y, coins as u8);
    }
    true
}

fn place_hidden_block(context: &mut BuildContext, x: i32, y: i32) {
    if !context.is_free(x, y)
        || !context.budget.has_room(Element::HiddenBlock)
        || !context.budget.has_room(Element::Coin)
    {
        return;
    }
    context.budget.try_take(Element::HiddenBlock);
    context.budget.try_take(Element::Coin);
    context.level.set_tile(x, y, HIDDEN_COIN_BLOCK);
}

/// A row of coins two rows above `row`, one time in four.
pub(crate) fn build_coins(
    context: &mut BuildContext,
    x0: i32,
    x1: i32,
    row: i32,
    start_inset: i32,
    end_inset: i32,
) {
    if row - 2 < 0 || context.rng.below(4) > 0 {
        return;
    }
    let first = x0 + 1 + start_inset;
    let last = x1 - 1 - end_inset;
    if last - first <= 1 {
        return;
    }
    for x in first..last {
        if !context.budget.has_room(Element::Coin) {
            break;
        }
        if context.is_free(x, row - 2) {
            context.budget.try_take(Element::Coin);
            context.level.set_tile(x, row - 2, COIN);
        }
    }
}

/// A ladder climbing from `floor`, capped by `max_height`. Occupied cells are skipped.
pub(crate) fn build_ladder(context: &mut BuildContext, x: i32, floor: i32, max_height: Option<i32>) {
    let mut height = context.rng.below(context.height);
    if let Some(limit) = max_height {
        height = height.min(limit);
    }
    if height < MIN_LADDER_HEIGHT {
        return;
    }

    for y in floor - height + 1..floor {
        if context.is_free(x, y) {
            context.level.set_tile(x, y, LADDER);
        }
    }
    if context.is_free(x, floor - height) {
        context.level.set_tile(x, floor - height, LADDER_TOP);
    }
}
