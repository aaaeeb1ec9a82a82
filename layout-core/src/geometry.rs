//! Pixel geometry for the layout canvas.
//!
//! Everything here is plain value math: grid snapping, per-type default
//! sizes, and the axis-aligned overlap test that placement and drop
//! preview are built on.

use serde::{Deserialize, Serialize};

/// Snapping unit for drop and placement coordinates, in pixels.
pub const GRID_SIZE: f32 = 20.0;

/// A point in container-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Default size for block types without a dedicated rule.
    ///
    /// No current element type hits this; it is the documented fallback
    /// for future palette entries.
    pub const FALLBACK: Self = Self {
        width: 200.0,
        height: 100.0,
    };

    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned box in container-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of the top-left corner.
    pub x: f32,
    /// Y position of the top-left corner.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Create a rect from a corner and a size.
    #[must_use]
    pub const fn new(x: f32, y: f32, size: Size) -> Self {
        Self {
            x,
            y,
            width: size.width,
            height: size.height,
        }
    }

    /// Axis-aligned overlap test.
    ///
    /// Two boxes overlap unless one lies entirely to the left, right,
    /// above, or below the other. Boxes that only share an edge do NOT
    /// overlap; this lets newly placed elements sit flush against
    /// existing ones.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x + self.width <= other.x
            || self.x >= other.x + other.width
            || self.y + self.height <= other.y
            || self.y >= other.y + other.height)
    }
}

/// The rendered dimensions of the canvas container at interaction time.
///
/// Drop points, move clamps, and percent positions are all computed
/// against these live dimensions, not the fixed logical canvas of the
/// export document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    /// Rendered width in pixels.
    pub width: f32,
    /// Rendered height in pixels.
    pub height: f32,
}

impl ContainerRect {
    /// Create a container rect.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a container-local point falls inside the container.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.width && point.y <= self.height
    }
}

/// Round a coordinate to the nearest multiple of [`GRID_SIZE`].
#[must_use]
pub fn snap_to_grid(value: f32) -> f32 {
    (value / GRID_SIZE).round() * GRID_SIZE
}
