use crate::tiles::{CANNON_BARREL, CANNON_BASE, CANNON_POLE};

use super::super::budget::Element;
use super::super::composer::ZoneRequest;
use super::super::decoration::{BlockBand, build_blocks};
use super::super::generator::BuildContext;

/// Single-column cannons: barrel on top, base under it, pole down to the floor.
pub(crate) fn build_cannons(context: &mut BuildContext, request: &ZoneRequest) -> i32 {
    let x0 = request.x;
    let length = (context.rng.below(10) + 2).min(request.max_length);
    let floor = request.floor.unwrap_or_else(|| context.random_floor());
    let bottom = floor + request.floor_thickness.unwrap_or(context.height - floor);

    let mut max_height = request.max_height;
    let mut cannon_x = x0 + 1 + context.rng.below(4);
    let mut tallest: Option<i32> = None;
    for x in x0..x0 + length {
        if x > cannon_x {
            cannon_x += 2 + context.rng.below(4);
        }
        if cannon_x == x0 + length - 1 {
            cannon_x += 10;
        }

        let mut top = floor - context.rng.below(3) - 1;
        if let Some(limit) = max_height
            && floor - top >= limit
        {
            let limit = limit.min(4);
            max_height = Some(limit);
            top = top.max(floor - limit);
        }

        context.fill_ground(x..x + 1, floor..bottom);

        if x != cannon_x || top >= floor || !context.budget.try_take(Element::Cannon) {
            continue;
        }
        tallest = Some(tallest.map_or(top, |tallest| tallest.min(top)));
        for y in top..floor {
            let piece = match y - top {
                0 => CANNON_BARREL,
                1 => CANNON_BASE,
                _ => CANNON_POLE,
            };
            context.level.set_tile(x, y, piece);
        }
    }

    if context.rng.coin_flip()
        && let Some(tallest) = tallest
    {
        build_blocks(context, x0, x0 + length, tallest - 2, BlockBand::regular());
    }
    length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ElementCounts, GenerationParameters};
    use crate::tiles::GROUND;

    use super::super::test_support::context;

    fn barrels(context: &BuildContext, until: i32) -> Vec<(i32, i32)> {
        (0..until)
            .flat_map(|x| (0..context.height).map(move |y| (x, y)))
            .filter(|&(x, y)| context.level.tile(x, y) == CANNON_BARREL)
            .collect()
    }

    #[test]
    fn cannons_stack_barrel_base_and_pole_on_the_floor() {
        let mut context = context(GenerationParameters {
            targets: Some(ElementCounts { cannons: 50, ..ElementCounts::default() }),
            ..GenerationParameters::with_seed(40)
        });
        let mut used = 0;
        while used < 80 {
            used += build_cannons(&mut context, &ZoneRequest::top_level(used, 80 - used, Some(13)));
        }

        let found = barrels(&context, used);
        assert!(!found.is_empty());
        assert_eq!(found.len() as u32, context.budget.placed().cannons);
        for (x, y) in found {
            assert!(13 - y <= 3);
            for below in y + 1..13 {
                let expected = if below == y + 1 { CANNON_BASE } else { CANNON_POLE };
                assert_eq!(context.level.tile(x, below), expected);
            }
            assert_eq!(context.level.tile(x, 13), GROUND);
        }
    }

    #[test]
    fn exhausted_budget_still_lays_the_floor() {
        let mut context = context(GenerationParameters {
            targets: Some(ElementCounts::default()),
            ..GenerationParameters::with_seed(41)
        });
        let length = build_cannons(&mut context, &ZoneRequest::top_level(0, 20, Some(12)));
        assert!(barrels(&context, length).is_empty());
        for x in 0..length {
            assert_eq!(context.level.tile(x, 12), GROUND);
        }
    }

    #[test]
    fn clearance_keeps_cannons_short() {
        let mut context = context(GenerationParameters {
            targets: Some(ElementCounts { cannons: 50, ..ElementCounts::default() }),
            ..GenerationParameters::with_seed(42)
        });
        let request = ZoneRequest { max_height: Some(1), nested: true, ..ZoneRequest::top_level(0, 60, Some(13)) };
        let mut used = 0;
        while used < 60 {
            used += build_cannons(&mut context, &ZoneRequest { x: used, max_length: 60 - used, ..request });
        }
        for (_, y) in barrels(&context, used) {
            assert_eq!(y, 12);
        }
    }
}
