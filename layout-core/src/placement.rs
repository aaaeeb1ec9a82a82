//! Collision-aware placement of dropped elements.
//!
//! Converts a drop point into a validated, non-overlapping element box:
//! snap to the grid, build the type's default box, and shift it down
//! one grid unit at a time while it collides with existing elements.
//! The shift loop is bounded; a placement that still collides after the
//! cap is accepted and reported as [`PlacementStatus::ResidualOverlap`]
//! so callers can react.

use crate::element::{max_coerced_z, CanvasElement, ElementType};
use crate::geometry::{snap_to_grid, ContainerRect, Point, Rect, GRID_SIZE};

/// Maximum number of downward shifts before a colliding placement is
/// accepted anyway.
pub const MAX_SHIFT_ATTEMPTS: u32 = 50;

/// Whether the placement loop found a free cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStatus {
    /// The box overlaps nothing.
    Clean,
    /// The shift cap was reached with the box still overlapping.
    ResidualOverlap,
}

/// A resolved placement for a dropped element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Final element box.
    pub rect: Rect,
    /// X position as a percentage of the rendered container width.
    pub percent_x: f32,
    /// Y position as a percentage of the rendered container height.
    pub percent_y: f32,
    /// Stacking rank for the new element: max existing rank + 1.
    pub z_index: i32,
    /// Collision outcome of the bounded shift loop.
    pub status: PlacementStatus,
}

fn collides(rect: &Rect, existing: &[CanvasElement]) -> bool {
    existing.iter().any(|el| rect.overlaps(&el.rect()))
}

/// Resolve a drop point into a placement.
///
/// Coordinates are snapped to the grid before collision resolution, and
/// percent positions are computed against the live rendered container
/// dimensions passed in.
#[must_use]
pub fn resolve(
    kind: ElementType,
    point: Point,
    container: ContainerRect,
    existing: &[CanvasElement],
) -> Placement {
    let size = kind.default_size(container.width);
    let mut rect = Rect::new(snap_to_grid(point.x), snap_to_grid(point.y), size);

    let mut attempts = 0;
    while collides(&rect, existing) && attempts < MAX_SHIFT_ATTEMPTS {
        rect.y += GRID_SIZE;
        attempts += 1;
    }

    let status = if collides(&rect, existing) {
        tracing::debug!(kind = kind.name(), x = rect.x, y = rect.y, "placement accepted with residual overlap");
        PlacementStatus::ResidualOverlap
    } else {
        PlacementStatus::Clean
    };

    Placement {
        rect,
        percent_x: rect.x / container.width * 100.0,
        percent_y: rect.y / container.height * 100.0,
        z_index: max_coerced_z(existing) + 1,
        status,
    }
}

/// Drop-preview query: would a drop at this point land cleanly?
///
/// Same snap as [`resolve`] but a single overlap pass with no shifting.
/// Points outside the container are never valid.
#[must_use]
pub fn preview(
    kind: ElementType,
    point: Point,
    container: ContainerRect,
    existing: &[CanvasElement],
) -> bool {
    if !container.contains(point) {
        return false;
    }
    let size = kind.default_size(container.width);
    let rect = Rect::new(snap_to_grid(point.x), snap_to_grid(point.y), size);
    !collides(&rect, existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementId;

    const CONTAINER: ContainerRect = ContainerRect {
        width: 1000.0,
        height: 800.0,
    };

    fn card_at(x: f32, y: f32) -> CanvasElement {
        CanvasElement {
            id: ElementId::from_raw(1),
            kind: ElementType::Card,
            x,
            y,
            width: 300.0,
            height: 200.0,
            percent_x: 0.0,
            percent_y: 0.0,
            z_index: Some(1),
        }
    }

    #[test]
    fn test_empty_canvas_places_at_snapped_point() {
        let placement = resolve(ElementType::Card, Point::new(93.0, 47.0), CONTAINER, &[]);
        assert_eq!(placement.status, PlacementStatus::Clean);
        assert!((placement.rect.x - 100.0).abs() < f32::EPSILON);
        assert!((placement.rect.y - 40.0).abs() < f32::EPSILON);
        assert!((placement.rect.width - 300.0).abs() < f32::EPSILON);
        assert!((placement.percent_x - 10.0).abs() < 1e-4);
        assert!((placement.percent_y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_collision_shifts_down_by_grid_units() {
        let existing = [card_at(100.0, 40.0)];
        let placement = resolve(ElementType::Card, Point::new(100.0, 40.0), CONTAINER, &existing);
        assert_eq!(placement.status, PlacementStatus::Clean);
        assert!((placement.rect.x - 100.0).abs() < f32::EPSILON);
        // Shifted past the existing card: 40 + 200 = 240
        assert!((placement.rect.y - 240.0).abs() < f32::EPSILON);
        let shifted = placement.rect.y - 40.0;
        assert!((shifted % GRID_SIZE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_shift_cap_reports_residual_overlap() {
        // One slider covers the whole width far beyond 50 grid shifts.
        let blanket = CanvasElement {
            id: ElementId::from_raw(1),
            kind: ElementType::Slider,
            x: 0.0,
            y: 0.0,
            width: CONTAINER.width,
            height: 2000.0,
            percent_x: 0.0,
            percent_y: 0.0,
            z_index: Some(1),
        };
        let placement = resolve(ElementType::Card, Point::new(0.0, 0.0), CONTAINER, &[blanket]);
        assert_eq!(placement.status, PlacementStatus::ResidualOverlap);
        // Exactly the cap worth of shifts
        assert!((placement.rect.y - GRID_SIZE * MAX_SHIFT_ATTEMPTS as f32).abs() < f32::EPSILON);
    }

    #[test]
    fn test_z_index_is_max_plus_one() {
        let placement = resolve(ElementType::Card, Point::new(0.0, 0.0), CONTAINER, &[]);
        // Empty collection's max rank is treated as 1
        assert_eq!(placement.z_index, 2);

        let mut existing = card_at(500.0, 500.0);
        existing.z_index = Some(7);
        let placement = resolve(ElementType::Card, Point::new(0.0, 0.0), CONTAINER, &[existing]);
        assert_eq!(placement.z_index, 8);
    }

    #[test]
    fn test_preview_rejects_collisions_without_shifting() {
        let existing = [card_at(100.0, 40.0)];
        assert!(!preview(ElementType::Card, Point::new(100.0, 40.0), CONTAINER, &existing));
        assert!(preview(ElementType::Card, Point::new(600.0, 500.0), CONTAINER, &existing));
    }

    #[test]
    fn test_preview_rejects_points_outside_container() {
        assert!(!preview(ElementType::Card, Point::new(-5.0, 10.0), CONTAINER, &[]));
        assert!(!preview(ElementType::Card, Point::new(10.0, 900.0), CONTAINER, &[]));
    }

    #[test]
    fn test_flush_edge_placement_is_clean() {
        // Candidate lands exactly at the right edge of the existing card
        let existing = [card_at(100.0, 40.0)];
        let placement = resolve(ElementType::Card, Point::new(400.0, 40.0), CONTAINER, &existing);
        assert_eq!(placement.status, PlacementStatus::Clean);
        assert!((placement.rect.y - 40.0).abs() < f32::EPSILON);
    }
}
