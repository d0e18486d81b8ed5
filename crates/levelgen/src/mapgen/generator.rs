//! Generation entry point and the per-run state every builder works against.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::level::{Level, LevelSummary};
use crate::log::GenerationEvent;
use crate::params::{GenerationParameters, ResolvedParameters};
use crate::tiles::{EMPTY, GROUND};
use crate::types::{CreatureKind, Facing, LevelType, Pos, SpawnKind, SpawnTemplate};

use super::autotile::autotile;
use super::budget::{BudgetCounters, Element};
use super::composer::{TOP_LEVEL_RESERVE, ZoneRequest, fill};
use super::creatures::CreatureSelector;
use super::exit::{build_final_ceiling, lay_exit_tail, place_goal, resolve_exit};
use super::odds::{OddsTable, ZoneKind};
use super::seed::{LevelRng, TERRAIN_STREAM};
use super::zones::build_straight;

pub struct LevelGenerator {
    params: GenerationParameters,
}

impl LevelGenerator {
    pub fn new(params: GenerationParameters) -> Self {
        Self { params }
    }

    pub fn generate(&self) -> Level {
        let mut log = Vec::new();
        let params = self.params.resolve(&mut log);
        let mut context = BuildContext::new(&params, log);

        let level_floor = params.flat.then(|| context.random_floor());
        let exit_floor = level_floor.unwrap_or_else(|| context.random_floor());
        let exit = resolve_exit(&mut context, params.exit, exit_floor);
        context.exit = exit;

        let length = context.length;
        let opening = build_straight(&mut context, &ZoneRequest::top_level(0, length, level_floor), true);
        context.record(GenerationEvent::ZoneBuilt {
            kind: ZoneKind::Straight,
            x: 0,
            length: opening,
            nested: false,
        });
        let rest = ZoneRequest::top_level(opening, length - opening, level_floor);
        let composed = opening + fill(&mut context, rest, TOP_LEVEL_RESERVE);

        lay_exit_tail(&mut context, composed, exit_floor);
        if context.level_type.has_ceiling() {
            build_final_ceiling(&mut context);
        }
        context.evict_buried_creatures();
        autotile(&mut context.level);
        place_goal(&mut context);

        context.finish()
    }
}

pub(crate) struct BuildContext {
    pub(crate) level: Level,
    pub(crate) rng: LevelRng,
    pub(crate) creatures: CreatureSelector,
    pub(crate) budget: BudgetCounters,
    pub(crate) odds: OddsTable,
    pub(crate) length: i32,
    pub(crate) height: i32,
    pub(crate) difficulty: i32,
    pub(crate) level_type: LevelType,
    pub(crate) flat: bool,
    pub(crate) ladders: bool,
    pub(crate) exit: Pos,
    creatures_by_kind: BTreeMap<CreatureKind, u32>,
}

impl BuildContext {
    pub(crate) fn new(params: &ResolvedParameters, mut log: Vec<GenerationEvent>) -> Self {
        let odds = OddsTable::new(params.odds, &mut log);
        Self {
            level: Level::new(
                params.length,
                params.height,
                params.seed,
                params.level_type,
                params.difficulty,
                log,
            ),
            rng: LevelRng::new(params.seed, TERRAIN_STREAM),
            creatures: CreatureSelector::new(params.seed, &params.creatures, params.difficulty),
            budget: BudgetCounters::new(params.targets),
            odds,
            length: params.length as i32,
            height: params.height as i32,
            difficulty: params.difficulty as i32,
            level_type: params.level_type,
            flat: params.flat,
            ladders: params.ladders,
            exit: Pos { y: -1, x: -1 },
            creatures_by_kind: BTreeMap::new(),
        }
    }

    pub(crate) fn record(&mut self, event: GenerationEvent) {
        self.level.log.push(event);
    }

    /// One of the four bottom-most rows above the last.
    pub(crate) fn random_floor(&mut self) -> i32 {
        self.height - 1 - self.rng.below(4)
    }

    pub(crate) fn fill_ground(&mut self, columns: Range<i32>, rows: Range<i32>) {
        for x in columns {
            for y in rows.clone() {
                self.level.set_tile(x, y, GROUND);
            }
        }
    }

    /// In the grid, empty and not holding a spawn.
    pub(crate) fn is_free(&self, x: i32, y: i32) -> bool {
        self.level.in_bounds(x, y)
            && self.level.tile(x, y) == EMPTY
            && self.level.spawn(x, y).is_none()
    }

    /// Asks the creature stream for a walker at `(x, y)`.
    pub(crate) fn add_enemy(&mut self, x: i32, y: i32) {
        if !self.creatures.can_add() {
            return;
        }
        if let Some(kind) = self.creatures.next_creature() {
            self.place_creature(kind, x, y);
        }
    }

    pub(crate) fn place_creature(&mut self, kind: CreatureKind, x: i32, y: i32) -> bool {
        let pos = Pos { y, x };
        if pos == self.exit
            || !self.level.in_bounds(x, y)
            || self.level.spawn(x, y).is_some()
            || !self.budget.try_take(Element::Creature)
        {
            return false;
        }
        self.level.set_spawn(SpawnTemplate { kind: SpawnKind::Creature(kind), pos, facing: Facing::Left });
        *self.creatures_by_kind.entry(kind).or_default() += 1;
        true
    }

    /// Drops walkers whose cell a later pass filled, returning their budget.
    pub(crate) fn evict_buried_creatures(&mut self) {
        let buried: Vec<(Pos, CreatureKind)> = self
            .level
            .spawns()
            .filter_map(|spawn| match spawn.kind {
                SpawnKind::Creature(kind)
                    if kind.walks() && self.level.tile(spawn.pos.x, spawn.pos.y) != EMPTY =>
                {
                    Some((spawn.pos, kind))
                }
                _ => None,
            })
            .collect();

        for (pos, kind) in buried {
            self.level.take_spawn(pos.x, pos.y);
            self.budget.give_back(Element::Creature);
            if let Some(count) = self.creatures_by_kind.get_mut(&kind) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    self.creatures_by_kind.remove(&kind);
                }
            }
            self.record(GenerationEvent::CreatureBuried { pos });
        }
    }

    fn finish(self) -> Level {
        let mut level = self.level;
        level.exit = self.exit;
        level.summary = LevelSummary {
            placed: self.budget.placed(),
            targets: self.budget.targets(),
            creatures_by_kind: self.creatures_by_kind,
        };
        level
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use xxhash_rust::xxh3::xxh3_64;

    use super::*;
    use crate::params::{ElementCounts, ElementToggles, LevelPreset, ZoneOdds};
    use crate::tiles::tube_piece;

    use super::super::zones::test_support::context;

    fn generate(params: GenerationParameters) -> Level {
        LevelGenerator::new(params).generate()
    }

    fn carved_voids(level: &Level) -> Vec<Range<i32>> {
        level
            .log()
            .iter()
            .filter_map(|event| match *event {
                GenerationEvent::GapCarved { start, end } => Some(start..end),
                _ => None,
            })
            .collect()
    }

    fn assert_within_targets(level: &Level) {
        let placed = level.summary.placed;
        let targets = level.summary.targets;
        for element in [
            Element::Block,
            Element::Coin,
            Element::HiddenBlock,
            Element::Tube,
            Element::Cannon,
            Element::Gap,
            Element::DeadEnd,
            Element::Platform,
            Element::Creature,
        ] {
            assert!(
                placed.get(element) <= targets.get(element),
                "{element:?} placed {} over target {}",
                placed.get(element),
                targets.get(element)
            );
        }
    }

    #[test]
    fn same_parameters_produce_byte_identical_levels() {
        let params = GenerationParameters { difficulty: 3, ..GenerationParameters::with_seed(123_456) };
        let a = generate(params.clone());
        let b = generate(params);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        assert_eq!(xxh3_64(&a.canonical_bytes()), b.fingerprint());
    }

    #[test]
    fn different_seeds_change_the_level() {
        let a = generate(GenerationParameters::with_seed(1));
        let b = generate(GenerationParameters::with_seed(2));
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn presets_generate_within_their_budgets() {
        for (index, preset) in LevelPreset::ALL.into_iter().enumerate() {
            let params = GenerationParameters { seed: Some(index as u64), ..preset.parameters() };
            let level = generate(params);
            assert_within_targets(&level);
        }
    }

    #[test]
    fn creature_summary_matches_spawned_templates() {
        let level = generate(GenerationParameters { difficulty: 4, ..GenerationParameters::with_seed(77) });
        let spawned = level
            .spawns()
            .filter(|spawn| matches!(spawn.kind, SpawnKind::Creature(_)))
            .count() as u32;
        let by_kind: u32 = level.summary.creatures_by_kind.values().sum();
        assert_eq!(spawned, level.summary.placed.creatures);
        assert_eq!(by_kind, spawned);
    }

    #[test]
    fn buried_walkers_are_removed_and_refunded() {
        let mut context = context(GenerationParameters::with_seed(2));
        assert!(context.place_creature(CreatureKind::Goomba, 31, 3));
        assert!(context.place_creature(CreatureKind::Goomba, 40, 11));
        assert!(context.place_creature(CreatureKind::Flower, 50, 9));
        context.fill_ground(30..33, 0..4);
        context.fill_ground(50..52, 9..15);
        assert!(!context.is_free(40, 11));

        context.evict_buried_creatures();

        assert!(context.level.spawn(31, 3).is_none());
        assert!(context.level.spawn(40, 11).is_some());
        assert!(context.level.spawn(50, 9).is_some());
        assert_eq!(context.budget.placed().creatures, 2);
        assert_eq!(context.creatures_by_kind.get(&CreatureKind::Goomba), Some(&1));
        assert!(context.level.log().contains(&GenerationEvent::CreatureBuried { pos: Pos { y: 3, x: 31 } }));
    }

    #[test]
    fn disabled_creatures_leave_only_the_goal() {
        let level = generate(GenerationParameters {
            creatures: Vec::new(),
            difficulty: 5,
            ..GenerationParameters::with_seed(9)
        });
        let kinds: Vec<SpawnKind> = level.spawns().map(|spawn| spawn.kind).collect();
        assert_eq!(kinds, vec![SpawnKind::Goal]);
    }

    #[test]
    fn flowers_only_appear_in_tube_lips() {
        for seed in 0..8 {
            let level = generate(GenerationParameters {
                difficulty: 6,
                creatures: vec![CreatureKind::Flower, CreatureKind::Goomba],
                elements: ElementToggles { dead_ends: false, ..ElementToggles::all_on() },
                ..GenerationParameters::with_seed(seed)
            });
            for spawn in level.spawns() {
                if spawn.kind == SpawnKind::Creature(CreatureKind::Flower) {
                    let tile = level.tile(spawn.pos.x, spawn.pos.y);
                    assert!(
                        tile == tube_piece(0, true),
                        "flower at {:?} sits on tile {tile}",
                        spawn.pos
                    );
                }
            }
        }
    }

    #[test]
    fn dead_end_heavy_odds_never_nest_dead_ends() {
        let params = GenerationParameters {
            length: 600,
            difficulty: 3,
            zone_odds: Some(ZoneOdds {
                straight: 1,
                platforms: 0,
                tubes: 0,
                gaps: 0,
                cannons: 0,
                dead_ends: 40,
            }),
            targets: Some(ElementCounts { dead_ends: 1_000, ..ElementCounts::for_difficulty(3, 600, false) }),
            ..GenerationParameters::with_seed(4_242)
        };
        let level = generate(params);

        let mut dead_ends = 0;
        for event in level.log() {
            if let GenerationEvent::ZoneBuilt { kind: ZoneKind::DeadEnd, nested, .. } = event {
                assert!(!nested, "dead-end built inside a dead-end branch");
                dead_ends += 1;
            }
        }
        assert!(dead_ends > 0);
    }

    #[test]
    fn all_zero_odds_still_fill_the_level() {
        let level = generate(GenerationParameters {
            zone_odds: Some(ZoneOdds { straight: 0, platforms: 0, tubes: 0, gaps: 0, cannons: 0, dead_ends: 0 }),
            ..GenerationParameters::with_seed(5)
        });
        assert!(level.log().contains(&GenerationEvent::EmptyOddsTable));
        for x in 0..level.length as i32 {
            assert!(level.column_has_solid(x), "column {x} is empty");
        }
    }

    #[test]
    fn exhausted_budgets_trigger_the_straight_fallback() {
        let level = generate(GenerationParameters {
            zone_odds: Some(ZoneOdds { straight: 0, platforms: 0, tubes: 5, gaps: 5, cannons: 5, dead_ends: 0 }),
            targets: Some(ElementCounts::default()),
            ..GenerationParameters::with_seed(31)
        });
        assert!(level.log().iter().any(|event| matches!(event, GenerationEvent::StraightFallback { .. })));
        assert_eq!(level.summary.placed, ElementCounts::default());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(96))]
        #[test]
        fn generated_levels_hold_their_invariants(
            seed in any::<u64>(),
            difficulty in 0_u32..=8,
            level_type_code in 0_u8..=2,
            flat in any::<bool>(),
            length in 50_usize..=320,
            height in 15_usize..=24
        ) {
            let level_type = match level_type_code {
                0 => LevelType::Overground,
                1 => LevelType::Underground,
                _ => LevelType::Castle,
            };
            let params = GenerationParameters {
                seed: Some(seed),
                difficulty,
                level_type,
                flat,
                length,
                height,
                ladders: true,
                ..GenerationParameters::default()
            };
            let level = generate(params.clone());

            prop_assert_eq!(level.fingerprint(), generate(params).fingerprint());
            assert_within_targets(&level);

            let voids = carved_voids(&level);
            for x in 0..level.length as i32 {
                if voids.iter().any(|void| void.contains(&x)) {
                    continue;
                }
                prop_assert!(level.column_has_solid(x), "seed={seed}: column {x} has no solid cell");
            }

            for spawn in level.spawns() {
                if let SpawnKind::Creature(kind) = spawn.kind
                    && kind.walks()
                {
                    prop_assert_eq!(
                        level.tile(spawn.pos.x, spawn.pos.y),
                        EMPTY,
                        "seed={}: {:?} spawns inside terrain at {:?}",
                        seed,
                        kind,
                        spawn.pos
                    );
                }
            }
            let creatures = level.spawns().filter(|spawn| matches!(spawn.kind, SpawnKind::Creature(_))).count() as u32;
            prop_assert_eq!(creatures, level.summary.placed.creatures);

            prop_assert!(level.in_bounds(level.exit.x, level.exit.y));
            prop_assert_eq!(level.spawn(level.exit.x, level.exit.y).map(|spawn| spawn.kind), Some(SpawnKind::Goal));
            prop_assert!(
                level.tile(level.exit.x, level.exit.y + 1) != EMPTY,
                "seed={seed}: exit {:?} has no support",
                level.exit
            );
        }

        #[test]
        fn zones_stay_inside_the_level(seed in any::<u64>(), difficulty in 0_u32..=12) {
            let params = GenerationParameters {
                difficulty,
                length: 200,
                zone_odds: Some(ZoneOdds { straight: 2, platforms: 0, tubes: 4, gaps: 2, cannons: 4, dead_ends: 6 }),
                ..GenerationParameters::with_seed(seed)
            };
            let level = generate(params);
            prop_assert_eq!(level.height, 15);
            for event in level.log() {
                if let GenerationEvent::ZoneBuilt { x, length, .. } = *event {
                    prop_assert!(x >= 0 && x + length <= level.length as i32);
                }
            }
        }
    }
}
