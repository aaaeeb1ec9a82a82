//! # Layout Core
//!
//! Non-visual core of a drag-and-drop page layout builder: place block
//! elements on a bounded canvas with collision avoidance, move and
//! resize them through exclusive pointer sessions, manage z-order,
//! export the layout as a structured JSON document, and validate
//! candidate documents against the export schema.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                 layout-core                   │
//! ├───────────────────────────────────────────────┤
//! │  Geometry        │  Placement                 │
//! │  - Grid snapping │  - Collision scan          │
//! │  - Overlap test  │  - Bounded downward shift  │
//! ├───────────────────────────────────────────────┤
//! │  Sessions        │  Export / Validate         │
//! │  - Move clamp    │  - Dense z reassignment    │
//! │  - Aspect resize │  - Schema error report     │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Rendering, event wiring, and clipboard/download sinks are external
//! collaborators; they consume this crate's operations and the export
//! document but own no layout state.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod element;
pub mod error;
pub mod export;
pub mod geometry;
pub mod placement;
pub mod session;
pub mod validate;

pub use canvas::Canvas;
pub use element::{CanvasElement, ElementId, ElementType};
pub use error::{LayoutError, LayoutResult};
pub use export::{build_export_document, ExportDocument, ExportedElement};
pub use geometry::{ContainerRect, Point, Rect, Size, GRID_SIZE};
pub use placement::{Placement, PlacementStatus};
pub use session::{Interaction, MoveSession, ResizeSession};
pub use validate::{validate_document, ValidationReport};

/// Layout core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
