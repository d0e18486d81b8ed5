use crate::log::GenerationEvent;
use crate::tiles::{GROUND, STAIR_ROCK};

use super::super::composer::ZoneRequest;
use super::super::generator::BuildContext;
use super::platform::{PlatformSpec, build_platform};

const WIDE_GAP: i32 = 10;
const NARROW_GAP: i32 = 3;

/// A void between two ramps, optionally stepped with rock stairs. Wide voids
/// get a small hill to land on.
pub(crate) fn build_gap(context: &mut BuildContext, request: &ZoneRequest) -> i32 {
    let x0 = request.x;
    let d = context.difficulty;
    let ramp = context.rng.below(5) + 2;
    let void = if context.rng.below(d + 1) + d > 7 { WIDE_GAP } else { NARROW_GAP };
    let full_length = ramp * 2 + void;
    let length = full_length.min(request.max_length);

    let has_stairs = context.rng.chance(3)
        && !context.flat
        && request.max_height.is_none_or(|limit| limit > 5);

    let floor = request.floor.unwrap_or_else(|| context.random_floor());
    let bottom = floor + request.floor_thickness.unwrap_or(context.height - floor);

    let end = x0 + length;
    for x in x0..end {
        let left_ramp = x < x0 + ramp;
        if !left_ramp && x < end - ramp {
            continue;
        }
        for y in 0..context.height {
            if y >= floor && y < bottom {
                context.level.set_tile(x, y, GROUND);
            } else if has_stairs && y < floor {
                let step_top = if left_ramp { floor - (x - x0) + 1 } else { floor - (end - x) + 2 };
                if y >= step_top {
                    context.level.set_tile(x, y, STAIR_ROCK);
                }
            }
        }
    }

    let void_start = x0 + ramp;
    let void_end = end - ramp;
    if void_start < void_end {
        context.record(GenerationEvent::GapCarved { start: void_start, end: void_end });
    }

    if void > 8 && length == full_length {
        let spec = PlatformSpec {
            x: void_start + context.rng.below((void - 4).abs() / 2 + 1),
            max_length: 3,
            floor: Some(floor),
            with_straight: false,
            in_gap: true,
        };
        build_platform(context, &spec);
    }
    length
}
