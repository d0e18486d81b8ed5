use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use levelgen::{CreatureKind, LevelPreset, LevelType, generate};

mod config;
mod render;

use config::LevelSettings;
use render::{LevelReport, render_ascii};

#[derive(Parser)]
#[command(author, version, about = "Generate a seeded platform level and print it", long_about = None)]
struct Args {
    /// Level seed; drawn from runtime entropy when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long)]
    length: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(short, long)]
    difficulty: Option<u32>,
    /// overground, underground or castle (or 0, 1, 2)
    #[arg(short = 't', long)]
    level_type: Option<LevelType>,
    #[arg(long)]
    flat: bool,
    #[arg(long)]
    ladders: bool,
    /// Comma separated creature codes, e.g. `g,gk,f`
    #[arg(short, long)]
    creatures: Option<String>,
    #[arg(short, long)]
    preset: Option<LevelPreset>,
    /// TOML file read before the flags; flags win
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print a JSON report instead of the ASCII grid
    #[arg(long)]
    json: bool,
}

impl Args {
    fn settings(&self) -> Result<LevelSettings> {
        let creatures = self.creatures.as_deref().map(CreatureKind::parse_list).transpose()?;
        Ok(LevelSettings {
            preset: self.preset,
            seed: self.seed,
            length: self.length,
            height: self.height,
            difficulty: self.difficulty,
            level_type: self.level_type,
            flat: self.flat.then_some(true),
            ladders: self.ladders.then_some(true),
            creatures,
            ..LevelSettings::default()
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => LevelSettings::load(path)?,
        None => LevelSettings::default(),
    };
    let params = file.overlay(args.settings()?).into_parameters();
    let level = generate(&params);

    for warning in level.warnings() {
        eprintln!("warning: {warning:?}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&LevelReport::new(&level))?);
        return Ok(());
    }

    println!("Seed: {}", level.seed);
    println!("Fingerprint: {:016x}", level.fingerprint());
    println!("Type: {:?}  Difficulty: {}  Exit: {:?}", level.level_type, level.difficulty, level.exit);
    println!("Placed: {:?}", level.summary.placed);
    for row in render_ascii(&level) {
        println!("|{row}|");
    }

    Ok(())
}
