//! Exit coordinates, the ground run leading to them, the closing ceiling pass
//! for covered levels, and the goal itself.

use crate::log::GenerationEvent;
use crate::params::ExitOverride;
use crate::tiles::GOAL;
use crate::types::{Facing, Pos, SpawnKind, SpawnTemplate};

use super::generator::BuildContext;

/// Columns at the start of a covered level left without a ceiling.
const OPEN_ENTRANCE: i32 = 4;

/// Picks the exit cell: last column, one row above `floor`, unless overridden.
/// Overrides outside the grid are pulled back onto it.
pub(crate) fn resolve_exit(context: &mut BuildContext, requested: ExitOverride, floor: i32) -> Pos {
    let axis = |value: usize, default: i32| {
        if value == 0 { default } else { i32::try_from(value).unwrap_or(i32::MAX) }
    };
    let wanted = Pos { y: axis(requested.y, floor - 1), x: axis(requested.x, context.length - 1) };
    let applied = Pos {
        y: wanted.y.clamp(0, context.height - 1),
        x: wanted.x.clamp(0, context.length - 1),
    };
    if applied != wanted {
        context.record(GenerationEvent::ExitClamped { requested: wanted, applied });
    }
    applied
}

/// Ground from `floor` down, from the end of the composed zones (or the exit
/// column if that comes first) to the end of the level.
pub(crate) fn lay_exit_tail(context: &mut BuildContext, composed: i32, floor: i32) {
    let start = composed.min(context.exit.x);
    let (length, height) = (context.length, context.height);
    context.fill_ground(start..length, floor..height);
}

/// Runs of four to seven columns, each hanging one to four rows from the top.
/// The first column is walled in full.
pub(crate) fn build_final_ceiling(context: &mut BuildContext) {
    let mut ceiling = 0;
    let mut run = 0;
    for x in 0..context.length {
        let due = run <= 0;
        run -= 1;
        if due && x > OPEN_ENTRANCE {
            ceiling = context.rng.below(4);
            run = context.rng.below(4) + 4;
        }

        let rows = if x < 1 {
            0..context.height
        } else if x > OPEN_ENTRANCE {
            0..ceiling + 1
        } else {
            continue;
        };
        context.fill_ground(x..x + 1, rows);
    }
}

pub(crate) fn place_goal(context: &mut BuildContext) {
    let exit = context.exit;
    context.level.set_spawn(SpawnTemplate { kind: SpawnKind::Goal, pos: exit, facing: Facing::Left });
    context.level.set_tile(exit.x, exit.y, GOAL);
}
