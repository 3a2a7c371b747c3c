//! Validated input snapshot for a seating run.
//!
//! [`EngineState::load`] resolves branches, validates the roster, room
//! catalog and day list, and builds one seat plan per room. Everything
//! after loading is read-only; days are seated independently against the
//! same plans.

use std::collections::HashMap;

use log::{debug, info, warn};
use serde::Serialize;

use super::engine::{DayAllocation, DayAllocator};
use crate::config::AllocationConfig;
use crate::error::{Result, SeatingError};
use crate::models::{ExamDay, Examinee, Room, SeatPlan};
use crate::plan::SeatPlanBuilder;
use crate::validation::validate_input;

/// Result of seating one exam day within a run.
#[derive(Debug, Serialize)]
pub struct DayOutcome {
    /// The day that was attempted.
    pub day: ExamDay,
    /// The seating, or the day-scoped error that prevented it.
    #[serde(serialize_with = "serialize_result")]
    pub result: Result<DayAllocation>,
}

impl DayOutcome {
    /// The allocation, if the day could be seated.
    pub fn allocation(&self) -> Option<&DayAllocation> {
        self.result.as_ref().ok()
    }

    /// Whether the day was seated.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn serialize_result<S>(
    result: &Result<DayAllocation>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    #[derive(Serialize)]
    enum Outcome<'a> {
        Allocated(&'a DayAllocation),
        Failed(String),
    }

    match result {
        Ok(allocation) => Outcome::Allocated(allocation).serialize(serializer),
        Err(e) => Outcome::Failed(e.to_string()).serialize(serializer),
    }
}

/// Immutable engine state: configuration, inputs and seat plans.
#[derive(Debug, Clone)]
pub struct EngineState {
    config: AllocationConfig,
    examinees: Vec<Examinee>,
    rooms: Vec<Room>,
    plans: Vec<SeatPlan>,
    days: Vec<ExamDay>,
    roll_index: HashMap<String, usize>,
}

impl EngineState {
    /// Validates the inputs and builds the seat plans.
    ///
    /// Roll numbers are trimmed. Examinees without an explicit branch get
    /// one derived from their roll number via the configured branch span.
    ///
    /// # Errors
    /// - [`SeatingError::Config`] for an out-of-range configuration.
    /// - [`SeatingError::EmptyRoster`] / [`SeatingError::EmptyRoomCatalog`].
    /// - [`SeatingError::InvalidInput`] with every validation problem found.
    /// - [`SeatingError::InvalidRoomConfig`] for the first room whose seat
    ///   plan cannot be built.
    pub fn load(
        mut examinees: Vec<Examinee>,
        rooms: Vec<Room>,
        mut days: Vec<ExamDay>,
        config: AllocationConfig,
    ) -> Result<Self> {
        config.validate()?;
        if examinees.is_empty() {
            return Err(SeatingError::EmptyRoster);
        }
        if rooms.is_empty() {
            return Err(SeatingError::EmptyRoomCatalog);
        }

        for e in &mut examinees {
            e.roll = e.roll.trim().to_string();
        }
        for rolls in days.iter_mut().filter_map(|d| d.rolls.as_mut()) {
            for roll in rolls.iter_mut() {
                *roll = roll.trim().to_string();
            }
        }

        let derived = examinees
            .iter_mut()
            .map(|e| e.resolve_branch(config.branch_span))
            .filter(|&resolved| resolved)
            .count();
        debug!("derived {derived} branch code(s) from roll numbers");

        if let Err(errors) = validate_input(&examinees, &rooms, &days) {
            warn!("input rejected with {} problem(s)", errors.len());
            return Err(SeatingError::InvalidInput(errors));
        }

        let builder = SeatPlanBuilder::from_config(&config);
        let plans = rooms
            .iter()
            .map(|room| builder.build(room))
            .collect::<Result<Vec<_>>>()?;

        let roll_index = examinees
            .iter()
            .enumerate()
            .map(|(i, e)| (e.roll.clone(), i))
            .collect();

        let state = Self {
            config,
            examinees,
            rooms,
            plans,
            days,
            roll_index,
        };
        info!(
            "loaded {} examinees, {} room(s) with {} usable seats, {} exam day(s) ({} seating)",
            state.examinees.len(),
            state.rooms.len(),
            state.total_capacity(),
            state.days.len(),
            state.config.density
        );
        Ok(state)
    }

    /// The run configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// The roster with branches resolved.
    pub fn examinees(&self) -> &[Examinee] {
        &self.examinees
    }

    /// The room catalog in allocation order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// One seat plan per room, in catalog order.
    pub fn plans(&self) -> &[SeatPlan] {
        &self.plans
    }

    /// The exam days in run order.
    pub fn days(&self) -> &[ExamDay] {
        &self.days
    }

    /// Looks up an examinee by roll number.
    pub fn examinee(&self, roll: &str) -> Option<&Examinee> {
        self.roll_index.get(roll).map(|&i| &self.examinees[i])
    }

    /// Looks up a room by ID.
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// Looks up a room's seat plan by room ID.
    pub fn plan_for(&self, room_id: &str) -> Option<&SeatPlan> {
        self.plans.iter().find(|p| p.room_id == room_id)
    }

    /// Usable seats across all rooms.
    pub fn total_capacity(&self) -> usize {
        self.plans.iter().map(SeatPlan::capacity).sum()
    }

    /// Seats the day at `index` in the day list.
    ///
    /// # Errors
    /// [`SeatingError::UnknownDay`] if `index` is out of range, otherwise as
    /// [`DayAllocator::allocate`].
    pub fn allocate_day(&self, index: usize) -> Result<DayAllocation> {
        let day = self.days.get(index).ok_or(SeatingError::UnknownDay {
            index,
            count: self.days.len(),
        })?;
        self.allocator()
            .allocate(&self.examinees, &self.plans, day, index)
    }

    /// Seats every day in order.
    ///
    /// A day that fails ([`SeatingError::CapacityExceeded`]) does not stop
    /// the others.
    pub fn allocate_all_days(&self) -> Vec<DayOutcome> {
        let allocator = self.allocator();
        let outcomes: Vec<DayOutcome> = self
            .days
            .iter()
            .enumerate()
            .map(|(i, day)| DayOutcome {
                day: day.clone(),
                result: allocator.allocate(&self.examinees, &self.plans, day, i),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        info!(
            "seated {} of {} exam day(s)",
            outcomes.len() - failed,
            outcomes.len()
        );
        outcomes
    }

    fn allocator(&self) -> DayAllocator {
        DayAllocator::new().with_rule(self.config.interleave)
    }
}
