//! Placed-versus-target counters that cap zone content.

use crate::params::ElementCounts;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Element {
    Block,
    Coin,
    HiddenBlock,
    Tube,
    Cannon,
    Gap,
    DeadEnd,
    Platform,
    Creature,
}

impl ElementCounts {
    pub(crate) fn get(&self, element: Element) -> u32 {
        match element {
            Element::Block => self.blocks,
            Element::Coin => self.coins,
            Element::HiddenBlock => self.hidden_blocks,
            Element::Tube => self.tubes,
            Element::Cannon => self.cannons,
            Element::Gap => self.gaps,
            Element::DeadEnd => self.dead_ends,
            Element::Platform => self.platforms,
            Element::Creature => self.creatures,
        }
    }

    fn get_mut(&mut self, element: Element) -> &mut u32 {
        match element {
            Element::Block => &mut self.blocks,
            Element::Coin => &mut self.coins,
            Element::HiddenBlock => &mut self.hidden_blocks,
            Element::Tube => &mut self.tubes,
            Element::Cannon => &mut self.cannons,
            Element::Gap => &mut self.gaps,
            Element::DeadEnd => &mut self.dead_ends,
            Element::Platform => &mut self.platforms,
            Element::Creature => &mut self.creatures,
        }
    }
}

/// Placed counts never pass their target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BudgetCounters {
    placed: ElementCounts,
    targets: ElementCounts,
}

impl BudgetCounters {
    pub(crate) fn new(targets: ElementCounts) -> Self {
        Self { placed: ElementCounts::default(), targets }
    }

    pub(crate) fn remaining(&self, element: Element) -> u32 {
        self.targets.get(element).saturating_sub(self.placed.get(element))
    }

    pub(crate) fn has_room(&self, element: Element) -> bool {
        self.remaining(element) > 0
    }

    pub(crate) fn target(&self, element: Element) -> u32 {
        self.targets.get(element)
    }

    /// Records one placement if the target allows it.
    pub(crate) fn try_take(&mut self, element: Element) -> bool {
        self.try_take_many(element, 1)
    }

    pub(crate) fn try_take_many(&mut self, element: Element, amount: u32) -> bool {
        if self.remaining(element) < amount {
            return false;
        }
        *self.placed.get_mut(element) += amount;
        true
    }

    /// Returns one placement that was later removed from the level.
    pub(crate) fn give_back(&mut self, element: Element) {
        let placed = self.placed.get_mut(element);
        *placed = placed.saturating_sub(1);
    }

    pub(crate) fn placed(&self) -> ElementCounts {
        self.placed
    }

    pub(crate) fn targets(&self) -> ElementCounts {
        self.targets
    }
}
