//! Zone kinds and the cumulative odds table they are drawn from.

use serde::{Deserialize, Serialize};

use crate::log::GenerationEvent;
use crate::params::ZoneOdds;

use super::seed::LevelRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Straight,
    Platform,
    Tube,
    Gap,
    Cannon,
    DeadEnd,
}

impl ZoneKind {
    pub const ALL: [Self; 6] =
        [Self::Straight, Self::Platform, Self::Tube, Self::Gap, Self::Cannon, Self::DeadEnd];

    pub fn name(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Platform => "platform",
            Self::Tube => "tube",
            Self::Gap => "gap",
            Self::Cannon => "cannon",
            Self::DeadEnd => "dead-end",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OddsTable {
    /// Exclusive upper end of each kind's bucket, in `ZoneKind::ALL` order.
    bucket_ends: [i32; 6],
    total: i32,
}

impl OddsTable {
    pub(crate) fn new(odds: ZoneOdds, log: &mut Vec<GenerationEvent>) -> Self {
        let mut weights =
            [odds.straight, odds.platforms, odds.tubes, odds.gaps, odds.cannons, odds.dead_ends]
                .map(|weight| weight.max(0));

        if weights.iter().all(|&weight| weight == 0) {
            log.push(GenerationEvent::EmptyOddsTable);
            weights[0] = 1;
        }

        let mut bucket_ends = [0; 6];
        let mut total = 0_i32;
        for (end, weight) in bucket_ends.iter_mut().zip(weights) {
            total = total.saturating_add(weight);
            *end = total;
        }

        Self { bucket_ends, total }
    }

    /// Kind whose bucket holds `ticket`, for `ticket` in `0..total`.
    pub(crate) fn kind_for(&self, ticket: i32) -> ZoneKind {
        self.bucket_ends
            .iter()
            .position(|&end| ticket < end)
            .map_or(ZoneKind::Straight, |index| ZoneKind::ALL[index])
    }

    pub(crate) fn draw(&self, rng: &mut LevelRng) -> ZoneKind {
        self.kind_for(rng.below(self.total))
    }
}
