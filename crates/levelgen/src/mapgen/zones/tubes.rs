use crate::tiles::{GROUND, tube_piece};
use crate::types::CreatureKind;

use super::super::budget::Element;
use super::super::composer::ZoneRequest;
use super::super::decoration::{BlockBand, build_blocks};
use super::super::generator::BuildContext;

/// Two-column pipes on a strip of ground. Each placed pipe takes one tube.
pub(crate) fn build_tubes(context: &mut BuildContext, request: &ZoneRequest) -> i32 {
    let x0 = request.x;
    let length = (context.rng.below(10) + 5).min(request.max_length);
    let floor = request.floor.unwrap_or_else(|| context.random_floor());
    let bottom = floor + request.floor_thickness.unwrap_or(context.height - floor);

    let mut max_height = request.max_height;
    let mut pipe_x = x0 + 1 + context.rng.below(4);
    let mut top = floor - context.rng.below(3) - 1;
    if let Some(limit) = max_height
        && floor - top > limit
    {
        let limit = limit.min(4);
        max_height = Some(limit);
        top = top.max(floor - limit);
    }

    let mut pipe_placed = false;
    let mut tallest: Option<i32> = None;
    for x in x0..x0 + length {
        if x > pipe_x + 1 {
            pipe_x += 3 + context.rng.below(4);
            top = floor - context.rng.below(2) - 2;
            if let Some(limit) = max_height {
                top = top.max(floor - limit + 1);
            }
        }
        if pipe_x >= x0 + length - 2 {
            pipe_x += 10;
        }

        if x == pipe_x {
            pipe_placed = top < floor && context.budget.try_take(Element::Tube);
            if pipe_placed {
                tallest = Some(tallest.map_or(top, |tallest| tallest.min(top)));
                if context.rng.below(7) < context.difficulty + 1 && context.creatures.flowers_enabled() {
                    context.place_creature(CreatureKind::Flower, x, top);
                }
            }
        }

        let in_pipe = pipe_placed && (x == pipe_x || x == pipe_x + 1);
        for y in 0..bottom {
            if y >= floor {
                context.level.set_tile(x, y, GROUND);
            } else if in_pipe && y >= top {
                context.level.set_tile(x, y, tube_piece(x - pipe_x, y == top));
            }
        }
    }

    if context.rng.coin_flip()
        && let Some(tallest) = tallest
    {
        build_blocks(context, x0, x0 + length, tallest - 2, BlockBand::regular());
    }
    length
}
