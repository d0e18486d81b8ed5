//! Procedural level generation split into zone builders, composition, decoration and finishing passes.

mod autotile;
mod budget;
mod composer;
mod creatures;
mod decoration;
mod exit;
mod generator;
mod odds;
pub(crate) mod seed;
mod zones;

pub use generator::LevelGenerator;
pub use odds::ZoneKind;
pub use seed::generate_runtime_seed;

use crate::level::Level;
use crate::params::GenerationParameters;

pub fn generate(params: &GenerationParameters) -> Level {
    LevelGenerator::new(params.clone()).generate()
}

#[cfg(test)]
mod tests {
    use super::LevelGenerator;
    use crate::params::GenerationParameters;

    #[test]
    fn generate_matches_level_generator_output() {
        let params = GenerationParameters { difficulty: 2, ..GenerationParameters::with_seed(123) };

        let from_helper = super::generate(&params);
        let from_generator = LevelGenerator::new(params).generate();

        assert_eq!(from_helper, from_generator);
    }
}
