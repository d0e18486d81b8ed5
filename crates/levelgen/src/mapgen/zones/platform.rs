use crate::tiles::{
    EMPTY, HILL_TOP_LEFT, HILL_TOP_LEFT_MERGED, HILL_TOP_RIGHT, HILL_TOP_RIGHT_MERGED, hill_piece,
};

use super::super::decoration::decorate;
use super::super::generator::BuildContext;

pub(crate) struct PlatformSpec {
    pub(crate) x: i32,
    pub(crate) max_length: i32,
    pub(crate) floor: Option<i32>,
    /// Lay ground under the whole zone first.
    pub(crate) with_straight: bool,
    /// Hills reach down to the bottom row instead of stopping at the floor.
    pub(crate) in_gap: bool,
}

/// Stacked hill platforms, each step two or three rows above the last.
pub(crate) fn build_platform(context: &mut BuildContext, spec: &PlatformSpec) -> i32 {
    let length = (context.rng.below(10) + 10).min(spec.max_length);
    let floor = spec.floor.unwrap_or_else(|| context.random_floor());

    if spec.with_straight {
        context.fill_ground(spec.x..spec.x + length, floor..context.height);
    }

    let bottom = if spec.in_gap { context.height } else { floor };
    let mut top = floor;
    loop {
        top -= context.rng.below(2) + 2;
        if top < 0 {
            break;
        }

        let width = context.rng.below(length / 2) + 1;
        let start = spec.x + context.rng.below(width + 1);
        let last_step = context.rng.chance(4);
        if last_step {
            decorate(context, start - 1, start + width + 1, top);
        }

        lay_hill(context, start, width, top, bottom);
        context.add_enemy(start, top - 1);

        if last_step {
            break;
        }
    }
    length
}

fn lay_hill(context: &mut BuildContext, start: i32, width: i32, top: i32, bottom: i32) {
    for x in start..start + width {
        for y in top..bottom {
            let piece = match context.level.tile(x, y) {
                EMPTY => hill_piece(x == start, x == start + width - 1, y == top),
                HILL_TOP_LEFT => HILL_TOP_LEFT_MERGED,
                HILL_TOP_RIGHT => HILL_TOP_RIGHT_MERGED,
                _ => continue,
            };
            context.level.set_tile(x, y, piece);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GenerationParameters;
    use crate::tiles::{GROUND, HILL_FILL, HILL_LEFT, HILL_RIGHT, HILL_TOP};

    use super::super::test_support::context;

    fn is_hill(tile: u8) -> bool {
        matches!(
            tile,
            HILL_TOP_LEFT
                | HILL_TOP
                | HILL_TOP_RIGHT
                | HILL_LEFT
                | HILL_FILL
                | HILL_RIGHT
                | HILL_TOP_LEFT_MERGED
                | HILL_TOP_RIGHT_MERGED
        )
    }

    #[test]
    fn platform_zone_is_ground_with_hills_above() {
        let mut context = context(GenerationParameters::with_seed(15));
        let spec = PlatformSpec { x: 0, max_length: 40, floor: Some(13), with_straight: true, in_gap: false };
        let length = build_platform(&mut context, &spec);
        assert!((10..=19).contains(&length));

        let mut hill_cells = 0;
        for x in 0..length {
            assert_eq!(context.level.tile(x, 13), GROUND);
            for y in 0..13 {
                if is_hill(context.level.tile(x, y)) {
                    hill_cells += 1;
                }
            }
        }
        assert!(hill_cells > 0);
    }

    #[test]
    fn overlapped_hill_corners_become_merged_pieces() {
        let mut context = context(GenerationParameters::with_seed(2));
        lay_hill(&mut context, 4, 4, 10, 13);
        lay_hill(&mut context, 2, 3, 8, 13);

        assert_eq!(context.level.tile(4, 10), HILL_TOP_LEFT_MERGED);
        assert_eq!(context.level.tile(5, 10), HILL_TOP);
        assert_eq!(context.level.tile(7, 10), HILL_TOP_RIGHT);
        assert_eq!(context.level.tile(3, 9), HILL_FILL);
    }

    #[test]
    fn gap_platform_reaches_the_bottom_row() {
        let mut context = context(GenerationParameters::with_seed(8));
        let spec = PlatformSpec { x: 30, max_length: 3, floor: Some(12), with_straight: false, in_gap: true };
        assert_eq!(build_platform(&mut context, &spec), 3);
        let hill_columns: Vec<i32> =
            (30..34).filter(|&x| is_hill(context.level.tile(x, context.height - 1))).collect();
        assert!(!hill_columns.is_empty());
    }
}
