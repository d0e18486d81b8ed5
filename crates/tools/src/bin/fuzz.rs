use std::ops::Range;

use anyhow::{Result, bail};
use clap::Parser;
use levelgen::{
    CreatureKind, ElementCounts, GenerationEvent, GenerationParameters, Level, LevelPreset, LevelType,
    SpawnKind, ZoneKind, generate, tiles::EMPTY,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn below(rng: &mut ChaCha8Rng, bound: u64) -> u64 {
    rng.next_u64() % bound
}

fn random_parameters(rng: &mut ChaCha8Rng) -> GenerationParameters {
    let mut params = if below(rng, 4) == 0 {
        choose(rng, &LevelPreset::ALL).parameters()
    } else {
        let creatures =
            CreatureKind::ALL.into_iter().filter(|_| below(rng, 3) > 0).collect::<Vec<_>>();
        GenerationParameters {
            difficulty: below(rng, 10) as u32,
            flat: below(rng, 4) == 0,
            creatures,
            ..GenerationParameters::default()
        }
    };
    params.seed = Some(rng.next_u64());
    params.length = 40 + below(rng, 400) as usize;
    params.height = 12 + below(rng, 12) as usize;
    params.ladders = below(rng, 2) == 0;
    params.level_type =
        choose(rng, &[LevelType::Overground, LevelType::Underground, LevelType::Castle]);
    params
}

fn budget_pairs(placed: ElementCounts, targets: ElementCounts) -> [(&'static str, u32, u32); 9] {
    [
        ("blocks", placed.blocks, targets.blocks),
        ("coins", placed.coins, targets.coins),
        ("hidden_blocks", placed.hidden_blocks, targets.hidden_blocks),
        ("tubes", placed.tubes, targets.tubes),
        ("cannons", placed.cannons, targets.cannons),
        ("gaps", placed.gaps, targets.gaps),
        ("dead_ends", placed.dead_ends, targets.dead_ends),
        ("platforms", placed.platforms, targets.platforms),
        ("creatures", placed.creatures, targets.creatures),
    ]
}

fn check_invariants(params: &GenerationParameters, level: &Level) -> Result<()> {
    let seed = level.seed;

    for (name, placed, target) in budget_pairs(level.summary.placed, level.summary.targets) {
        if placed > target {
            bail!("Invariant failed: {name} placed {placed} over target {target} on seed {seed}");
        }
    }

    let voids: Vec<Range<i32>> = level
        .log()
        .iter()
        .filter_map(|event| match *event {
            GenerationEvent::GapCarved { start, end } => Some(start..end),
            _ => None,
        })
        .collect();
    for x in 0..level.length as i32 {
        if !voids.iter().any(|void| void.contains(&x)) && !level.column_has_solid(x) {
            bail!("Invariant failed: column {x} has no solid cell on seed {seed}");
        }
    }

    for event in level.log() {
        if let GenerationEvent::ZoneBuilt { kind: ZoneKind::DeadEnd, nested: true, x, .. } = event {
            bail!("Invariant failed: nested dead-end at column {x} on seed {seed}");
        }
    }

    for spawn in level.spawns() {
        if let SpawnKind::Creature(kind) = spawn.kind
            && kind.walks()
            && level.tile(spawn.pos.x, spawn.pos.y) != EMPTY
        {
            bail!("Invariant failed: {kind:?} buried at {:?} on seed {seed}", spawn.pos);
        }
    }

    let exit = level.exit;
    if level.spawn(exit.x, exit.y).map(|spawn| spawn.kind) != Some(SpawnKind::Goal) {
        bail!("Invariant failed: no goal at exit {exit:?} on seed {seed}");
    }
    if params.exit.y == 0 && level.tile(exit.x, exit.y + 1) == EMPTY {
        bail!("Invariant failed: exit {exit:?} has no support on seed {seed}");
    }

    let again = generate(params);
    if again.fingerprint() != level.fingerprint() {
        bail!("Invariant failed: seed {seed} is not reproducible");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting level fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut warnings = 0;

    for _ in 0..args.runs {
        let params = random_parameters(&mut rng);
        let level = generate(&params);
        warnings += level.warnings().count();
        check_invariants(&params, &level)?;
    }

    println!("Fuzzing completed successfully ({warnings} warnings logged).");
    Ok(())
}
