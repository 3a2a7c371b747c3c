//! Seating charts and attendance sheets.
//!
//! Projects a day allocation onto per-room records that collaborators can
//! render or persist. The projector never fails: a photo that cannot be
//! found is replaced by the configured placeholder and reported as a
//! [`WarningKind::MissingPhotoAsset`](crate::models::WarningKind) warning.
//!
//! # Usage
//!
//! ```
//! use u_seating::allocator::EngineState;
//! use u_seating::config::AllocationConfig;
//! use u_seating::models::{ExamDay, Examinee, Room};
//! use u_seating::projection::{project_outputs, PhotoCatalog};
//!
//! let examinees = vec![
//!     Examinee::new("2201CS01", "Asha").with_photo("2201CS01.jpg"),
//!     Examinee::new("2201EE01", "Bilal").with_photo("2201EE01.jpg"),
//! ];
//! let state = EngineState::load(
//!     examinees,
//!     vec![Room::new("R1", 4).with_layout(2, 2)],
//!     vec![ExamDay::new("D1")],
//!     AllocationConfig::default(),
//! )
//! .unwrap();
//!
//! let photos = PhotoCatalog::new("photos").with_photos(["2201CS01.jpg"]);
//! let allocation = state.allocate_day(0).unwrap();
//! let rooms = project_outputs(&allocation, &state, &photos);
//!
//! assert_eq!(rooms[0].seating_chart.len(), 4);
//! assert_eq!(rooms[0].attendance.len(), 2);
//! assert_eq!(rooms[0].warnings.len(), 1);
//! ```

mod photo;
mod records;

pub use photo::{DirectoryPhotoStore, PhotoCatalog, PhotoStore};
pub use records::{AttendanceRecord, RoomProjection, SeatingChartRecord};

use std::collections::HashMap;

use log::{debug, warn};

use crate::allocator::{DayAllocation, EngineState};
use crate::models::{Placement, SeatPlan, Warning};

/// Projects every room that holds at least one examinee on the day, in
/// catalog order.
pub fn project_outputs(
    allocation: &DayAllocation,
    state: &EngineState,
    photos: &dyn PhotoStore,
) -> Vec<RoomProjection> {
    let used = allocation.assignment.rooms_used();
    let projections: Vec<RoomProjection> = state
        .plans()
        .iter()
        .filter(|plan| used.contains(&plan.room_id.as_str()))
        .map(|plan| project_room(allocation, state, plan, photos))
        .collect();

    debug!(
        "day {}: projected {} room(s) using {} photo store",
        allocation.day.id,
        projections.len(),
        photos.name()
    );
    projections
}

/// Projects one room's seating chart and attendance sheet.
pub fn project_room(
    allocation: &DayAllocation,
    state: &EngineState,
    plan: &SeatPlan,
    photos: &dyn PhotoStore,
) -> RoomProjection {
    let day = &allocation.day;
    let by_slot: HashMap<usize, &Placement> = allocation
        .assignment
        .placements_for_room(&plan.room_id)
        .into_iter()
        .map(|p| (p.slot, p))
        .collect();

    let mut projection = RoomProjection {
        day_id: day.id.clone(),
        day_label: day.display_label().to_string(),
        room_id: plan.room_id.clone(),
        seating_chart: Vec::with_capacity(plan.capacity()),
        attendance: Vec::with_capacity(by_slot.len()),
        warnings: Vec::new(),
    };
    let placeholder = &state.config().placeholder_photo;

    for (index, slot) in plan.slots.iter().enumerate() {
        let seat_label = slot.label();
        let occupant = by_slot
            .get(&index)
            .map(|p| (*p, state.examinee(&p.roll)));

        let Some((placement, examinee)) = occupant else {
            projection.seating_chart.push(SeatingChartRecord {
                seat_label,
                row: slot.row,
                column: slot.column,
                roll: String::new(),
                name: String::new(),
                branch: String::new(),
            });
            continue;
        };

        let name = examinee.map(|e| e.name.clone()).unwrap_or_default();
        projection.seating_chart.push(SeatingChartRecord {
            seat_label: seat_label.clone(),
            row: slot.row,
            column: slot.column,
            roll: placement.roll.clone(),
            name: name.clone(),
            branch: placement.branch.clone(),
        });

        let reference = examinee.and_then(|e| e.photo.as_deref());
        let (photo, photo_fallback) = match reference.map(|r| (r, photos.locate(r))) {
            Some((_, Some(path))) => (path, false),
            Some((reference, None)) => {
                let warning =
                    Warning::missing_photo(&day.id, &plan.room_id, &placement.roll, reference);
                warn!("day {} room {}: {}", day.id, plan.room_id, warning.message);
                projection.warnings.push(warning);
                (placeholder.clone(), true)
            }
            None => (placeholder.clone(), true),
        };

        projection.attendance.push(AttendanceRecord {
            seat_label,
            roll: placement.roll.clone(),
            name,
            photo,
            photo_fallback,
        });
    }

    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AllocationConfig;
    use crate::models::{Density, ExamDay, Examinee, Room, WarningKind};
    use std::path::PathBuf;

    fn load(examinees: Vec<Examinee>, rooms: Vec<Room>) -> EngineState {
        EngineState::load(
            examinees,
            rooms,
            vec![ExamDay::new("D1").with_label("Monday AM")],
            AllocationConfig::new(0, Density::Dense).with_placeholder_photo("blank.jpg"),
        )
        .unwrap()
    }

    #[test]
    fn test_chart_covers_every_seat() {
        let examinees = vec![
            Examinee::new("2201CS01", "Asha"),
            Examinee::new("2201EE01", "Bilal"),
            Examinee::new("2201CS02", "Chen"),
        ];
        let state = load(examinees, vec![Room::new("R1", 6).with_layout(2, 3)]);
        let allocation = state.allocate_day(0).unwrap();
        let rooms = project_outputs(&allocation, &state, &PhotoCatalog::default());

        assert_eq!(rooms.len(), 1);
        let room = &rooms[0];
        assert_eq!(room.day_label, "Monday AM");
        let labels: Vec<_> = room.seating_chart.iter().map(|r| r.seat_label.as_str()).collect();
        assert_eq!(labels, vec!["A1", "A2", "A3", "B1", "B2", "B3"]);
        assert_eq!(room.seating_chart.iter().filter(|r| r.is_occupied()).count(), 3);
        assert_eq!(room.occupied(), 3);

        let chen = room.seating_chart.iter().find(|r| r.roll == "2201CS02").unwrap();
        assert_eq!(chen.name, "Chen");
        assert_eq!(chen.branch, "CS");

        let vacant = room.seating_chart.iter().find(|r| !r.is_occupied()).unwrap();
        assert!(vacant.name.is_empty() && vacant.branch.is_empty());
    }

    #[test]
    fn test_photo_resolution_and_fallback() {
        let examinees = vec![
            Examinee::new("2201CS01", "Asha").with_photo("cs01.jpg"),
            Examinee::new("2201EE01", "Bilal").with_photo("ee01.jpg"),
            Examinee::new("2201ME01", "Chen"),
        ];
        let state = load(examinees, vec![Room::new("R1", 3).with_layout(1, 3)]);
        let allocation = state.allocate_day(0).unwrap();
        let photos = PhotoCatalog::new("img").with_photos(["cs01.jpg"]);
        let room = project_room(&allocation, &state, &state.plans()[0], &photos);

        let by_roll = |roll: &str| room.attendance.iter().find(|a| a.roll == roll).unwrap();
        assert_eq!(by_roll("2201CS01").photo, PathBuf::from("img/cs01.jpg"));
        assert!(!by_roll("2201CS01").photo_fallback);
        assert_eq!(by_roll("2201EE01").photo, PathBuf::from("blank.jpg"));
        assert!(by_roll("2201EE01").photo_fallback);
        assert_eq!(by_roll("2201ME01").photo, PathBuf::from("blank.jpg"));
        assert_eq!(room.fallback_count(), 2);

        // Only a dangling reference is worth a warning.
        assert_eq!(room.warnings.len(), 1);
        assert_eq!(
            room.warnings[0].kind,
            WarningKind::MissingPhotoAsset {
                roll: "2201EE01".into(),
                reference: "ee01.jpg".into(),
            }
        );
    }

    #[test]
    fn test_empty_rooms_skipped() {
        let examinees = vec![
            Examinee::new("2201CS01", "Asha"),
            Examinee::new("2201EE01", "Bilal"),
        ];
        let rooms = vec![
            Room::new("R1", 2).with_layout(1, 2),
            Room::new("R2", 2).with_layout(1, 2),
        ];
        let state = load(examinees, rooms);
        let allocation = state.allocate_day(0).unwrap();
        let projections = project_outputs(&allocation, &state, &PhotoCatalog::default());

        assert_eq!(projections.len(), 1);
        assert_eq!(projections[0].room_id, "R1");
    }

    #[test]
    fn test_projection_serializes() {
        let state = load(
            vec![Examinee::new("2201CS01", "Asha")],
            vec![Room::new("R1", 2).with_layout(1, 2)],
        );
        let allocation = state.allocate_day(0).unwrap();
        let rooms = project_outputs(&allocation, &state, &PhotoCatalog::default());
        let json = serde_json::to_value(&rooms).unwrap();
        assert_eq!(json[0]["attendance"][0]["roll"], "2201CS01");
        assert_eq!(json[0]["seating_chart"][1]["roll"], "");
    }
}
