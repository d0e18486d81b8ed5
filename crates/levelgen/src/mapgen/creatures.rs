//! Creature choice on its own random stream, so terrain draws stay stable when
//! the enabled creature set changes.

use crate::types::CreatureKind;

use super::seed::{CREATURE_STREAM, LevelRng};

pub(crate) struct CreatureSelector {
    rng: LevelRng,
    walkers: Vec<CreatureKind>,
    flowers: bool,
    difficulty: i32,
}

impl CreatureSelector {
    pub(crate) fn new(seed: u64, enabled: &[CreatureKind], difficulty: u32) -> Self {
        let walkers = enabled.iter().copied().filter(|kind| kind.walks()).collect();
        Self {
            rng: LevelRng::new(seed, CREATURE_STREAM),
            walkers,
            flowers: enabled.contains(&CreatureKind::Flower),
            difficulty: difficulty as i32,
        }
    }

    /// Throttle: roughly 30% at difficulty 0, always from difficulty 4 on.
    pub(crate) fn can_add(&mut self) -> bool {
        !self.walkers.is_empty() && self.rng.below(10) < 3 + 2 * self.difficulty
    }

    pub(crate) fn next_creature(&mut self) -> Option<CreatureKind> {
        if self.walkers.is_empty() {
            return None;
        }
        let index = self.rng.below(self.walkers.len() as i32) as usize;
        Some(self.walkers[index])
    }

    pub(crate) fn flowers_enabled(&self) -> bool {
        self.flowers
    }
}
