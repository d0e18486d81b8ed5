//! Turns raw ground into edge, corner and interior wall pieces.

use crate::level::Level;
use crate::tiles::{GROUND, sheet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WallPiece {
    Interior,
    TopEdge,
    BottomEdge,
    LeftEdge,
    RightEdge,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Solid everywhere except the named quadrant.
    InnerTopLeft,
    InnerTopRight,
    InnerBottomLeft,
    InnerBottomRight,
}

impl WallPiece {
    fn sheet_position(self) -> (u8, u8) {
        match self {
            Self::Interior => (1, 9),
            Self::TopEdge => (1, 8),
            Self::BottomEdge => (1, 10),
            Self::LeftEdge => (0, 9),
            Self::RightEdge => (2, 9),
            Self::TopLeft => (0, 8),
            Self::TopRight => (2, 8),
            Self::BottomLeft => (0, 10),
            Self::BottomRight => (2, 10),
            Self::InnerTopLeft => (3, 8),
            Self::InnerTopRight => (3, 9),
            Self::InnerBottomRight => (3, 10),
            Self::InnerBottomLeft => (3, 11),
        }
    }

    pub(crate) fn tile(self, sheet_offset: u8) -> u8 {
        let (column, row) = self.sheet_position();
        sheet(column + sheet_offset, row)
    }
}

/// Piece for a 2x2 neighbourhood given as `[top_left, top_right, bottom_left, bottom_right]`.
/// `None` means the cell keeps whatever it holds.
pub(crate) fn classify(corners: [bool; 4]) -> Option<WallPiece> {
    let piece = match corners {
        [false, false, false, false] => return None,
        [true, true, true, true] => WallPiece::Interior,
        [true, false, false, true] | [false, true, true, false] => WallPiece::Interior,

        [false, false, true, true] => WallPiece::TopEdge,
        [true, true, false, false] => WallPiece::BottomEdge,
        [false, true, false, true] => WallPiece::LeftEdge,
        [true, false, true, false] => WallPiece::RightEdge,

        [false, false, false, true] => WallPiece::TopLeft,
        [false, false, true, false] => WallPiece::TopRight,
        [false, true, false, false] => WallPiece::BottomLeft,
        [true, false, false, false] => WallPiece::BottomRight,

        [false, true, true, true] => WallPiece::InnerTopLeft,
        [true, false, true, true] => WallPiece::InnerTopRight,
        [true, true, false, true] => WallPiece::InnerBottomLeft,
        [true, true, true, false] => WallPiece::InnerBottomRight,
    };
    Some(piece)
}

/// Corner grid one larger than the level on each axis. A corner is solid when
/// all four cells touching it are ground.
pub(crate) struct SolidMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl SolidMask {
    pub(crate) fn from_level(level: &Level) -> Self {
        let width = level.length + 1;
        let height = level.height + 1;
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let solid = (x - 1..=x)
                    .all(|xx| (y - 1..=y).all(|yy| level.tile_capped(xx, yy) == GROUND));
                cells.push(solid);
            }
        }
        Self { width, height, cells }
    }

    #[cfg(test)]
    fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let cells = rows.iter().flat_map(|row| row.bytes().map(|byte| byte == b'#')).collect();
        Self { width, height, cells }
    }

    fn solid_clamped(&self, x: usize, y: usize) -> bool {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.cells[y * self.width + x]
    }

    fn corners(&self, x: usize, y: usize) -> [bool; 4] {
        [
            self.solid_clamped(x, y),
            self.solid_clamped(x + 1, y),
            self.solid_clamped(x, y + 1),
            self.solid_clamped(x + 1, y + 1),
        ]
    }
}

pub(crate) fn blockify(level: &mut Level, mask: &SolidMask, sheet_offset: u8) {
    for y in 0..level.height {
        for x in 0..level.length {
            if let Some(piece) = classify(mask.corners(x, y)) {
                level.set_tile(x as i32, y as i32, piece.tile(sheet_offset));
            }
        }
    }
}

pub(crate) fn autotile(level: &mut Level) {
    let mask = SolidMask::from_level(level);
    let sheet_offset = level.level_type.wall_sheet_offset();
    blockify(level, &mask, sheet_offset);
}
