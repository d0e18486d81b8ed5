//! Draws zone kinds from the odds table and lays zones side by side until a span is filled.

use crate::log::GenerationEvent;
use crate::tiles::EMPTY;

use super::budget::Element;
use super::generator::BuildContext;
use super::odds::ZoneKind;
use super::zones::{PlatformSpec, build_cannons, build_dead_end, build_gap, build_platform, build_straight, build_tubes};

/// Columns the top-level loop leaves for the exit tail.
pub(crate) const TOP_LEVEL_RESERVE: i32 = 10;
const MAX_EMPTY_DRAWS: u32 = 64;
const MAX_CEILING_HEIGHT: i32 = 3;

/// Where the next zone goes and what constrains it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ZoneRequest {
    pub(crate) x: i32,
    pub(crate) max_length: i32,
    /// Free rows above the floor; `None` is unconstrained.
    pub(crate) max_height: Option<i32>,
    /// `None` lets each builder draw its own floor row.
    pub(crate) floor: Option<i32>,
    /// Rows of ground under the floor; `None` reaches the bottom of the level.
    pub(crate) floor_thickness: Option<i32>,
    /// Set inside dead-end branches.
    pub(crate) nested: bool,
}

impl ZoneRequest {
    pub(crate) fn top_level(x: i32, max_length: i32, floor: Option<i32>) -> Self {
        Self { x, max_length, max_height: None, floor, floor_thickness: None, nested: false }
    }
}

/// Builds zones across `area` until at most `reserve` columns remain; returns columns used.
pub(crate) fn fill(context: &mut BuildContext, area: ZoneRequest, reserve: i32) -> i32 {
    let mut built = 0;
    let mut empty_draws = 0;
    while built < area.max_length - reserve {
        let request = ZoneRequest { x: area.x + built, max_length: area.max_length - built, ..area };
        let length = if empty_draws >= MAX_EMPTY_DRAWS {
            context.record(GenerationEvent::StraightFallback { x: request.x });
            let length = build_straight(context, &request, false);
            finish_zone(context, ZoneKind::Straight, &request, length);
            length
        } else {
            build_zone(context, &request)
        };

        if length > 0 {
            empty_draws = 0;
        } else {
            empty_draws += 1;
        }
        built += length;
    }
    built
}

/// One draw and dispatch. A kind whose budget or preconditions fail yields 0.
pub(crate) fn build_zone(context: &mut BuildContext, request: &ZoneRequest) -> i32 {
    let kind = context.odds.draw(&mut context.rng);
    let length = match kind {
        ZoneKind::Straight => build_straight(context, request, false),
        ZoneKind::Platform => {
            if request.floor.is_none() && context.budget.try_take(Element::Platform) {
                let spec = PlatformSpec {
                    x: request.x,
                    max_length: request.max_length,
                    floor: None,
                    with_straight: true,
                    in_gap: false,
                };
                build_platform(context, &spec)
            } else {
                0
            }
        }
        ZoneKind::Tube => {
            if context.budget.has_room(Element::Tube) {
                build_tubes(context, request)
            } else {
                0
            }
        }
        ZoneKind::Gap => {
            if request.floor.is_none_or(|floor| floor > 2) && context.budget.try_take(Element::Gap) {
                build_gap(context, request)
            } else {
                0
            }
        }
        ZoneKind::Cannon => {
            if context.budget.has_room(Element::Cannon) {
                build_cannons(context, request)
            } else {
                0
            }
        }
        ZoneKind::DeadEnd => {
            // Branches are nested; a dead-end never opens inside another.
            if !request.nested && context.budget.try_take(Element::DeadEnd) {
                build_dead_end(context, request)
            } else {
                0
            }
        }
    };

    finish_zone(context, kind, request, length);
    length
}

fn finish_zone(context: &mut BuildContext, kind: ZoneKind, request: &ZoneRequest, length: i32) {
    if length <= 0 {
        return;
    }
    context.record(GenerationEvent::ZoneBuilt {
        kind,
        x: request.x,
        length,
        nested: request.nested,
    });
    scatter_creatures(context, request.x);
    if context.level_type.has_ceiling() {
        build_ceiling(context, request.x, length);
    }
}

/// Standing cells of column `x`, bottom up, each kept with odds `(d + 1) / (d + 2)`.
fn scatter_creatures(context: &mut BuildContext, x: i32) {
    let limit = context.difficulty + 1;
    let mut attempts = 0;
    for y in (1..context.height).rev() {
        if attempts >= limit {
            break;
        }
        let standing = context.level.tile(x, y) == EMPTY
            && context.level.tile(x, y + 1) != EMPTY
            && context.level.spawn(x, y).is_none();
        if standing && context.rng.below(context.difficulty + 2) > 0 {
            context.add_enemy(x, y);
            attempts += 1;
        }
    }
}

fn build_ceiling(context: &mut BuildContext, x0: i32, length: i32) {
    if length < 2 {
        return;
    }
    let mut covered = 0;
    while covered < length {
        let section = (context.rng.below(2) + 2).min(length - covered);
        let depth = context.rng.below(MAX_CEILING_HEIGHT) + 1;
        context.fill_ground(x0 + covered..x0 + covered + section, 0..depth);
        covered += section;
    }
}
