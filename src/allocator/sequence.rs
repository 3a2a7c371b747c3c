//! Global seating sequence.
//!
//! Concatenates the seat plans of every room in catalog order into one
//! index space. Global index `g` maps back to `(plan, local slot)`;
//! adjacency never crosses rooms.

use std::ops::Range;

use crate::models::{SeatPlan, SeatSlot};

#[derive(Debug)]
pub(crate) struct SeatSequence<'a> {
    plans: &'a [SeatPlan],
    offsets: Vec<usize>,
    owners: Vec<(usize, usize)>,
}

impl<'a> SeatSequence<'a> {
    pub(crate) fn new(plans: &'a [SeatPlan]) -> Self {
        let mut offsets = Vec::with_capacity(plans.len());
        let mut owners = Vec::new();
        for (p, plan) in plans.iter().enumerate() {
            offsets.push(owners.len());
            owners.extend((0..plan.capacity()).map(|local| (p, local)));
        }
        Self {
            plans,
            offsets,
            owners,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.owners.len()
    }

    pub(crate) fn plan(&self, g: usize) -> &'a SeatPlan {
        let plans: &'a [SeatPlan] = self.plans;
        &plans[self.owners[g].0]
    }

    pub(crate) fn local(&self, g: usize) -> usize {
        self.owners[g].1
    }

    /// Position of the room owning slot `g` in the catalog.
    pub(crate) fn room_of(&self, g: usize) -> usize {
        self.owners[g].0
    }

    pub(crate) fn room_plan(&self, p: usize) -> &'a SeatPlan {
        let plans: &'a [SeatPlan] = self.plans;
        &plans[p]
    }

    pub(crate) fn room_count(&self) -> usize {
        self.plans.len()
    }

    /// Global index range of room `p`.
    pub(crate) fn room_range(&self, p: usize) -> Range<usize> {
        let start = self.offsets[p];
        start..start + self.plans[p].capacity()
    }

    /// Adjacency edges of room `p` as global `(lower, higher)` pairs.
    pub(crate) fn room_edges(&self, p: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let offset = self.offsets[p];
        self.plans[p]
            .edges()
            .map(move |(a, b)| (a + offset, b + offset))
    }

    pub(crate) fn slot(&self, g: usize) -> &'a SeatSlot {
        let plans: &'a [SeatPlan] = self.plans;
        let (p, local) = self.owners[g];
        &plans[p].slots[local]
    }

    /// Global indices of the slots adjacent to `g`.
    pub(crate) fn neighbors(&self, g: usize) -> impl Iterator<Item = usize> + 'a {
        let plans: &'a [SeatPlan] = self.plans;
        let (p, local) = self.owners[g];
        let offset = self.offsets[p];
        plans[p].slots[local]
            .neighbors
            .iter()
            .map(move |&n| n + offset)
    }

    /// Every adjacency edge once as `(lower, higher)`, ascending.
    pub(crate) fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.plans
            .iter()
            .zip(&self.offsets)
            .flat_map(|(plan, &offset)| plan.edges().map(move |(a, b)| (a + offset, b + offset)))
    }
}
