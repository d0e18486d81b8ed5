use super::super::composer::{ZoneRequest, fill};
use super::super::decoration::{BlockBand, build_blocks, build_ladder};
use super::super::generator::BuildContext;
use super::straight::build_straight;

/// Clear rows the lower branch keeps under the separator.
const MIN_BOTTOM_SPACE: i32 = 4;

/// A lead-in straight followed by two stacked branches split by a separator
/// band. A wall at the far end closes one branch.
pub(crate) fn build_dead_end(context: &mut BuildContext, request: &ZoneRequest) -> i32 {
    let x0 = request.x;
    let d = context.difficulty;
    let floor = request.floor.unwrap_or_else(|| context.height - 2 - context.rng.below(2));
    let lead_in_span = (7 + context.rng.below(10)).min(request.max_length);
    let mut separator_y = 3 + context.rng.below(floor - 1 - 7);

    let lead_in = ZoneRequest {
        x: x0,
        max_length: lead_in_span,
        max_height: None,
        floor: Some(floor),
        floor_thickness: None,
        nested: request.nested,
    };
    let length = build_straight(context, &lead_in, true);

    if context.rng.chance(3) && context.ladders {
        let ladder_x = (x0 + context.rng.below(length - 1) + 1).min(x0 + length);
        build_ladder(context, ladder_x, floor, Some(floor - separator_y));
    } else {
        build_blocks(context, x0, x0 + length, floor, BlockBand::hidden_only());
    }

    let k = context.rng.below(5);
    let trap_on_top = context.rng.below(k + 1) != 1;
    let separator_height = 2 + context.rng.below(2);

    let mut depth = context.rng.below(d + 1) + 2 * (1 + d);
    if depth + length > request.max_length {
        depth = request.max_length - 1 - length;
    }

    separator_y = separator_y.min(floor - separator_height - MIN_BOTTOM_SPACE);
    let bottom_space = floor - (separator_y + separator_height);
    let wall_width = 2 + context.rng.below(3);

    if depth <= 0 {
        return length;
    }

    let branch_x = x0 + length;
    let top_branch = ZoneRequest {
        x: branch_x,
        max_length: depth,
        max_height: Some(separator_y - 1),
        floor: Some(separator_y),
        floor_thickness: Some(separator_height),
        nested: true,
    };
    fill(context, top_branch, 0);

    let bottom_branch = ZoneRequest {
        x: branch_x,
        max_length: depth,
        max_height: Some(bottom_space),
        floor: Some(floor),
        floor_thickness: None,
        nested: true,
    };
    fill(context, bottom_branch, 0);

    let wall_start = branch_x + (depth - wall_width).max(0);
    let wall_rows = if trap_on_top { 0..separator_y + 1 } else { separator_y..context.height };
    context.fill_ground(wall_start..branch_x + depth, wall_rows);

    length + depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::GenerationEvent;
    use crate::mapgen::ZoneKind;
    use crate::params::GenerationParameters;
    use crate::tiles::GROUND;

    use super::super::test_support::context;

    #[test]
    fn branches_fill_the_same_columns_and_stay_nested() {
        let mut context = context(GenerationParameters { difficulty: 2, ..GenerationParameters::with_seed(90) });
        let length = build_dead_end(&mut context, &ZoneRequest::top_level(0, 200, None));
        assert!(length > 0 && length <= 200);

        let nested: Vec<(i32, i32)> = context
            .level
            .log()
            .iter()
            .filter_map(|event| match *event {
                GenerationEvent::ZoneBuilt { x, length, nested: true, kind } => {
                    assert_ne!(kind, ZoneKind::DeadEnd);
                    Some((x, length))
                }
                _ => None,
            })
            .collect();
        assert!(!nested.is_empty());
        let covered: i32 = nested.iter().map(|&(_, length)| length).sum();
        let branch_x = nested[0].0;
        assert_eq!(covered, 2 * (length - branch_x));
    }

    #[test]
    fn wall_closes_the_far_end() {
        for seed in 0..10 {
            let mut context = context(GenerationParameters { difficulty: 1, ..GenerationParameters::with_seed(seed) });
            let length = build_dead_end(&mut context, &ZoneRequest::top_level(0, 200, None));
            let last = length - 1;
            let solid_rows = (0..context.height).filter(|&y| context.level.tile(last, y) == GROUND).count();
            assert!(solid_rows as i32 >= 4, "seed={seed}: far column has only {solid_rows} ground rows");
        }
    }

    #[test]
    fn given_floor_carries_the_lead_in() {
        for seed in 0..10 {
            let mut context = context(GenerationParameters::with_seed(seed));
            build_dead_end(&mut context, &ZoneRequest::top_level(0, 120, Some(14)));
            assert_eq!(context.level.tile(0, 14), GROUND, "seed={seed}");
            assert_ne!(context.level.tile(0, 13), GROUND, "seed={seed}");
        }
    }

    #[test]
    fn short_span_skips_the_branches() {
        let mut context = context(GenerationParameters::with_seed(5));
        let length = build_dead_end(&mut context, &ZoneRequest::top_level(0, 8, None));
        assert!(length <= 8);
        let nested_zones = context
            .level
            .log()
            .iter()
            .filter(|event| matches!(event, GenerationEvent::ZoneBuilt { nested: true, .. }))
            .count();
        assert_eq!(nested_zones, 0);
    }

    #[test]
    fn lower_branch_keeps_room_under_the_separator() {
        for seed in 0..20 {
            let mut context = context(GenerationParameters { difficulty: 3, ..GenerationParameters::with_seed(seed) });
            build_dead_end(&mut context, &ZoneRequest::top_level(0, 200, None));
            for event in context.level.log() {
                if let GenerationEvent::ZoneBuilt { nested: true, x, .. } = *event {
                    let open_rows = (0..context.height).filter(|&y| context.level.tile(x, y) != GROUND).count();
                    assert!(open_rows >= 2, "seed={seed}: branch column {x} is sealed");
                }
            }
        }
    }
}
