//! Tile codes of the 16-column level sheet (`column + row * 16`).

pub const fn sheet(column: u8, row: u8) -> u8 {
    column + row * 16
}

pub const EMPTY: u8 = 0;

pub const HIDDEN_COIN_BLOCK: u8 = sheet(1, 0);
pub const STAIR_ROCK: u8 = sheet(9, 0);
pub const TUBE_LIP_LEFT: u8 = sheet(10, 0);
pub const TUBE_SHAFT_LEFT: u8 = sheet(10, 1);
pub const CANNON_BARREL: u8 = sheet(14, 0);
pub const CANNON_BASE: u8 = sheet(14, 1);
pub const CANNON_POLE: u8 = sheet(14, 2);

pub const BRICK: u8 = sheet(0, 1);
pub const BRICK_COIN: u8 = sheet(1, 1);
pub const BRICK_POWERUP: u8 = sheet(2, 1);
pub const QUESTION_COIN: u8 = sheet(5, 1);
pub const QUESTION_POWERUP: u8 = sheet(6, 1);
pub const QUESTION_MULTI_COIN: u8 = sheet(7, 1);
pub const COIN: u8 = sheet(2, 2);

pub const LADDER: u8 = sheet(13, 3);
pub const LADDER_TOP: u8 = sheet(13, 5);

pub const HILL_TOP_LEFT: u8 = sheet(4, 8);
pub const HILL_TOP: u8 = sheet(5, 8);
pub const HILL_TOP_RIGHT: u8 = sheet(6, 8);
pub const HILL_LEFT: u8 = sheet(4, 9);
pub const HILL_FILL: u8 = sheet(5, 9);
pub const HILL_RIGHT: u8 = sheet(6, 9);
pub const HILL_TOP_LEFT_MERGED: u8 = sheet(4, 11);
pub const HILL_TOP_RIGHT_MERGED: u8 = sheet(6, 11);

/// Raw ground written by builders; the autotiler turns it into wall pieces.
pub const GROUND: u8 = sheet(1, 9);

pub const GOAL: u8 = sheet(15, 15);

/// Tube lip or shaft for column `offset` (0 = left, 1 = right) of a pipe.
pub fn tube_piece(offset: i32, is_lip: bool) -> u8 {
    let column = if offset == 0 { TUBE_LIP_LEFT } else { TUBE_LIP_LEFT + 1 };
    if is_lip { column } else { column + (TUBE_SHAFT_LEFT - TUBE_LIP_LEFT) }
}

/// Hill piece for a segment cell; `left`/`right` mark the segment's edge columns.
pub fn hill_piece(left: bool, right: bool, top: bool) -> u8 {
    match (left, right, top) {
        (_, true, true) => HILL_TOP_RIGHT,
        (_, true, false) => HILL_RIGHT,
        (true, false, true) => HILL_TOP_LEFT,
        (true, false, false) => HILL_LEFT,
        (false, false, true) => HILL_TOP,
        (false, false, false) => HILL_FILL,
    }
}
