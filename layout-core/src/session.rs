//! Interactive move/resize sessions.
//!
//! A session is a short-lived exclusive mutation context bound to one
//! element for the duration of a pointer drag. Each pointer-move event
//! is a full recomputation from the state captured at session start,
//! never a delta-of-deltas, so events can be applied unconditionally
//! with no coalescing.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::geometry::{ContainerRect, Point, Size};

/// Floor for the width a resize session can produce from pointer input.
pub const MIN_RESIZE_WIDTH: f32 = 40.0;

/// Margin kept between a resized element and the container edge.
const RESIZE_EDGE_MARGIN: f32 = 2.0;

/// State captured when a move drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveSession {
    /// Element being moved.
    pub id: ElementId,
    /// Pointer position at session start.
    pub start_pointer: Point,
    /// Element position at session start.
    pub start_position: Point,
    /// Element size (fixed for the session).
    pub size: Size,
    /// Container rendered rect at session start.
    pub container: ContainerRect,
}

/// Position produced by a move update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveUpdate {
    /// New clamped X position.
    pub x: f32,
    /// New clamped Y position.
    pub y: f32,
    /// Percent X recomputed from the clamped position.
    pub percent_x: f32,
    /// Percent Y recomputed from the clamped position.
    pub percent_y: f32,
}

impl MoveSession {
    /// Recompute the element position for the current pointer.
    ///
    /// The pointer delta from session start is added to the starting
    /// element position, then each axis is clamped to
    /// `[0, container - element]` independently.
    #[must_use]
    pub fn update(&self, pointer: Point) -> MoveUpdate {
        let dx = pointer.x - self.start_pointer.x;
        let dy = pointer.y - self.start_pointer.y;

        let max_x = self.container.width - self.size.width;
        let max_y = self.container.height - self.size.height;
        // min-then-max keeps oversized elements pinned at 0 instead of
        // producing a negative position
        let x = (self.start_position.x + dx).min(max_x).max(0.0);
        let y = (self.start_position.y + dy).min(max_y).max(0.0);

        MoveUpdate {
            x,
            y,
            percent_x: x / self.container.width * 100.0,
            percent_y: y / self.container.height * 100.0,
        }
    }
}

/// State captured when a resize drag starts.
///
/// The anchor (top-left corner) never moves during the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeSession {
    /// Element being resized.
    pub id: ElementId,
    /// Pointer position at session start.
    pub start_pointer: Point,
    /// Width at session start.
    pub start_width: f32,
    /// Height at session start.
    pub start_height: f32,
    /// Fixed top-left anchor.
    pub anchor: Point,
    /// Aspect ratio locked for the session (width / height, 1 if the
    /// starting height is zero).
    pub aspect: f32,
    /// Container rendered rect at session start.
    pub container: ContainerRect,
}

/// Size produced by a resize update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeUpdate {
    /// New width.
    pub width: f32,
    /// New height.
    pub height: f32,
}

impl ResizeSession {
    /// Build a session, deriving the locked aspect ratio.
    #[must_use]
    pub fn new(
        id: ElementId,
        start_pointer: Point,
        start_size: Size,
        anchor: Point,
        container: ContainerRect,
    ) -> Self {
        let aspect = if start_size.height == 0.0 {
            1.0
        } else {
            start_size.width / start_size.height
        };
        Self {
            id,
            start_pointer,
            start_width: start_size.width,
            start_height: start_size.height,
            anchor,
            aspect,
            container,
        }
    }

    /// Recompute the element size for the current pointer.
    ///
    /// Only the horizontal pointer delta drives the resize; height
    /// follows from the locked aspect ratio. Container clamping runs in
    /// two sequential passes, width first then height, so a
    /// height-bound container can shrink width below what the width
    /// clamp alone produced. The pass order is load-bearing.
    #[must_use]
    pub fn update(&self, pointer: Point) -> ResizeUpdate {
        let dx = pointer.x - self.start_pointer.x;
        let mut width = (self.start_width + dx).max(MIN_RESIZE_WIDTH);
        let mut height = width / self.aspect;

        let max_width = self.container.width - self.anchor.x - RESIZE_EDGE_MARGIN;
        let max_height = self.container.height - self.anchor.y - RESIZE_EDGE_MARGIN;

        if width > max_width {
            width = max_width;
            height = width / self.aspect;
        }
        if height > max_height {
            height = max_height;
            width = height * self.aspect;
        }

        ResizeUpdate { width, height }
    }
}

/// The interaction state machine.
///
/// At most one session may be active at any time; `Idle` is both the
/// initial and the terminal state between sessions. Transitions happen
/// only through the begin/update/end entry points on
/// [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Interaction {
    /// No session in flight.
    #[default]
    Idle,
    /// A move drag is in flight.
    Moving(MoveSession),
    /// A resize drag is in flight.
    Resizing(ResizeSession),
}

impl Interaction {
    /// Whether no session is in flight.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Short name of the active session kind, for error reporting.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Moving(_) => "move",
            Self::Resizing(_) => "resize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: ContainerRect = ContainerRect {
        width: 1000.0,
        height: 800.0,
    };

    fn move_session() -> MoveSession {
        MoveSession {
            id: ElementId::from_raw(1),
            start_pointer: Point::new(150.0, 150.0),
            start_position: Point::new(100.0, 100.0),
            size: Size::new(300.0, 200.0),
            container: CONTAINER,
        }
    }

    #[test]
    fn test_move_follows_pointer_delta() {
        let update = move_session().update(Point::new(180.0, 170.0));
        assert!((update.x - 130.0).abs() < f32::EPSILON);
        assert!((update.y - 120.0).abs() < f32::EPSILON);
        assert!((update.percent_x - 13.0).abs() < 1e-4);
        assert!((update.percent_y - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_move_clamps_to_container() {
        // Far beyond the bottom-right corner
        let update = move_session().update(Point::new(5000.0, 5000.0));
        assert!((update.x - 700.0).abs() < f32::EPSILON);
        assert!((update.y - 600.0).abs() < f32::EPSILON);

        // Far beyond the top-left corner
        let update = move_session().update(Point::new(-5000.0, -5000.0));
        assert!((update.x - 0.0).abs() < f32::EPSILON);
        assert!((update.y - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_move_pins_oversized_element_at_origin() {
        let mut session = move_session();
        session.size = Size::new(2000.0, 2000.0);
        let update = session.update(Point::new(400.0, 400.0));
        assert!((update.x - 0.0).abs() < f32::EPSILON);
        assert!((update.y - 0.0).abs() < f32::EPSILON);
    }

    fn resize_session() -> ResizeSession {
        ResizeSession::new(
            ElementId::from_raw(1),
            Point::new(400.0, 240.0),
            Size::new(300.0, 200.0),
            Point::new(100.0, 40.0),
            CONTAINER,
        )
    }

    #[test]
    fn test_resize_width_drives_height_through_aspect() {
        let update = resize_session().update(Point::new(460.0, 0.0));
        assert!((update.width - 360.0).abs() < f32::EPSILON);
        assert!((update.height - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_never_goes_below_min_width() {
        let update = resize_session().update(Point::new(-100_000.0, 0.0));
        assert!((update.width - MIN_RESIZE_WIDTH).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resize_width_clamp_recomputes_height() {
        // max_width = 1000 - 100 - 2 = 898
        let update = resize_session().update(Point::new(100_000.0, 0.0));
        assert!((update.width - 898.0).abs() < 1e-3);
        // aspect 1.5; 898 / 1.5 then height clamp: max_height = 800 - 40 - 2 = 758,
        // 598.67 < 758 so the second pass leaves it alone
        assert!((update.height - 898.0 / 1.5).abs() < 1e-2);
    }

    #[test]
    fn test_height_clamp_can_shrink_width_further() {
        // Wide aspect in a short container: the height pass wins
        let session = ResizeSession::new(
            ElementId::from_raw(1),
            Point::new(0.0, 0.0),
            Size::new(100.0, 200.0),
            Point::new(0.0, 700.0),
            CONTAINER,
        );
        // max_height = 800 - 700 - 2 = 98; aspect = 0.5
        let update = session.update(Point::new(500.0, 0.0));
        assert!((update.height - 98.0).abs() < 1e-3);
        assert!((update.width - 49.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_height_start_uses_unit_aspect() {
        let session = ResizeSession::new(
            ElementId::from_raw(1),
            Point::new(0.0, 0.0),
            Size::new(100.0, 0.0),
            Point::new(0.0, 0.0),
            CONTAINER,
        );
        assert!((session.aspect - 1.0).abs() < f32::EPSILON);
        let update = session.update(Point::new(50.0, 0.0));
        assert!((update.width - 150.0).abs() < f32::EPSILON);
        assert!((update.height - 150.0).abs() < f32::EPSILON);
    }
}
