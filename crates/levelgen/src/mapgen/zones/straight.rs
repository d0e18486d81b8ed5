use super::super::composer::ZoneRequest;
use super::super::decoration::decorate;
use super::super::generator::BuildContext;

/// Flat ground. Safe straights are longer and never decorated.
pub(crate) fn build_straight(context: &mut BuildContext, request: &ZoneRequest, safe: bool) -> i32 {
    let length = match request.floor_thickness {
        Some(_) => request.max_length,
        None => {
            let drawn = if safe { 10 + context.rng.below(5) } else { context.rng.below(8) + 2 };
            drawn.min(request.max_length)
        }
    };

    let floor = request.floor.unwrap_or_else(|| context.random_floor());
    let bottom = request.floor_thickness.map_or(context.height, |thickness| floor + thickness);
    context.fill_ground(request.x..request.x + length, floor..bottom);

    if !safe && length > 5 {
        decorate(context, request.x, request.x + length, floor);
    }
    length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GenerationParameters;
    use crate::tiles::{EMPTY, GROUND};

    use super::super::test_support::context;

    #[test]
    fn safe_straight_is_ten_to_fourteen_columns_of_ground() {
        let mut context = context(GenerationParameters::with_seed(1));
        let length = build_straight(&mut context, &ZoneRequest::top_level(0, 100, Some(12)), true);
        assert!((10..=14).contains(&length));
        for x in 0..length {
            for y in 0..15 {
                let expected = if y >= 12 { GROUND } else { EMPTY };
                assert_eq!(context.level.tile(x, y), expected, "cell ({x}, {y})");
            }
        }
        assert!(!context.level.column_has_solid(length));
    }

    #[test]
    fn length_is_clamped_to_the_span() {
        let mut context = context(GenerationParameters::with_seed(4));
        for _ in 0..20 {
            let length = build_straight(&mut context, &ZoneRequest::top_level(0, 3, None), false);
            assert!((2..=3).contains(&length));
        }
    }

    #[test]
    fn thick_floor_spans_the_request_and_stops_at_its_thickness() {
        let mut context = context(GenerationParameters::with_seed(6));
        let request = ZoneRequest {
            floor: Some(5),
            floor_thickness: Some(2),
            max_height: Some(4),
            nested: true,
            ..ZoneRequest::top_level(20, 17, None)
        };
        assert_eq!(build_straight(&mut context, &request, false), 17);
        for x in 20..37 {
            assert_eq!(context.level.tile(x, 5), GROUND);
            assert_eq!(context.level.tile(x, 6), GROUND);
            assert_eq!(context.level.tile(x, 7), EMPTY);
        }
    }
}
