//! The canvas controller - owns the element collection and all mutation.
//!
//! Every mutation of the layout goes through a named operation here:
//! placement, move/resize sessions, z-order changes, removal, and
//! selection. The collection itself is never handed out mutably.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::element::{max_coerced_z, min_coerced_z, CanvasElement, ElementId, ElementType};
use crate::error::{LayoutError, LayoutResult};
use crate::export::{build_export_document, ExportDocument};
use crate::geometry::{ContainerRect, Point, Size};
use crate::placement::{self, PlacementStatus};
use crate::session::{Interaction, MoveSession, ResizeSession};

/// The layout canvas: element collection, selection, and the
/// interaction state machine.
///
/// Single-threaded and event-driven; no operation blocks or performs
/// I/O. External side effects (clipboard, download) live entirely
/// outside this type and cannot corrupt its state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    elements: Vec<CanvasElement>,
    selected: Option<ElementId>,
    interaction: Interaction,
    next_id: u64,
}

impl Canvas {
    /// Create an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            selected: None,
            interaction: Interaction::Idle,
            next_id: 1,
        }
    }

    /// All elements, in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    /// Get an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    fn get_mut(&mut self, id: ElementId) -> LayoutResult<&mut CanvasElement> {
        self.elements
            .iter_mut()
            .find(|el| el.id == id)
            .ok_or_else(|| LayoutError::ElementNotFound(id.to_string()))
    }

    /// Number of elements on the canvas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the canvas has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Currently selected element id, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Current interaction state.
    #[must_use]
    pub const fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Select an element, or clear the selection with `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn select(&mut self, id: Option<ElementId>) -> LayoutResult<()> {
        if let Some(id) = id {
            if self.get(id).is_none() {
                return Err(LayoutError::ElementNotFound(id.to_string()));
            }
        }
        self.selected = id;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    /// Place a new element of the given type at a drop point.
    ///
    /// The point is snapped to the grid and shifted below colliding
    /// elements (bounded); see [`crate::placement::resolve`]. Returns
    /// the new element's id and whether the placement was clean.
    pub fn place(
        &mut self,
        kind: ElementType,
        point: Point,
        container: ContainerRect,
    ) -> (ElementId, PlacementStatus) {
        let placement = placement::resolve(kind, point, container, &self.elements);
        let id = ElementId::from_raw(self.next_id);
        self.next_id += 1;

        self.elements.push(CanvasElement {
            id,
            kind,
            x: placement.rect.x,
            y: placement.rect.y,
            width: placement.rect.width,
            height: placement.rect.height,
            percent_x: placement.percent_x,
            percent_y: placement.percent_y,
            z_index: Some(placement.z_index),
        });
        tracing::debug!(
            %id,
            kind = kind.name(),
            x = placement.rect.x,
            y = placement.rect.y,
            "placed element"
        );
        (id, placement.status)
    }

    /// Non-mutating drop preview: would a drop at this point be valid?
    #[must_use]
    pub fn preview_drop(&self, kind: ElementType, point: Point, container: ContainerRect) -> bool {
        placement::preview(kind, point, container, &self.elements)
    }

    // ------------------------------------------------------------------
    // Move session
    // ------------------------------------------------------------------

    /// Begin a move session for an element.
    ///
    /// # Errors
    ///
    /// Returns an error if another session is active or the element is
    /// not found.
    pub fn begin_move(
        &mut self,
        id: ElementId,
        pointer: Point,
        container: ContainerRect,
    ) -> LayoutResult<()> {
        if !self.interaction.is_idle() {
            return Err(LayoutError::SessionActive(self.interaction.kind()));
        }
        let element = self
            .get(id)
            .ok_or_else(|| LayoutError::ElementNotFound(id.to_string()))?;
        self.interaction = Interaction::Moving(MoveSession {
            id,
            start_pointer: pointer,
            start_position: Point::new(element.x, element.y),
            size: Size::new(element.width, element.height),
            container,
        });
        tracing::debug!(%id, "move session started");
        Ok(())
    }

    /// Apply a pointer-move event to the active move session.
    ///
    /// Fully overwrites the element's position and percent fields; each
    /// event is a complete recomputation from session-start state.
    ///
    /// # Errors
    ///
    /// Returns an error if no move session is active or the element has
    /// vanished.
    pub fn update_move(&mut self, pointer: Point) -> LayoutResult<()> {
        let Interaction::Moving(session) = self.interaction else {
            return Err(LayoutError::NoActiveSession("move"));
        };
        let update = session.update(pointer);
        let element = self.get_mut(session.id)?;
        element.x = update.x;
        element.y = update.y;
        element.percent_x = update.percent_x;
        element.percent_y = update.percent_y;
        Ok(())
    }

    /// End the active move session, keeping the last applied update.
    ///
    /// # Errors
    ///
    /// Returns an error if no move session is active.
    pub fn end_move(&mut self) -> LayoutResult<()> {
        let Interaction::Moving(session) = self.interaction else {
            return Err(LayoutError::NoActiveSession("move"));
        };
        tracing::debug!(id = %session.id, "move session ended");
        self.interaction = Interaction::Idle;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Resize session
    // ------------------------------------------------------------------

    /// Begin a resize session for an element.
    ///
    /// # Errors
    ///
    /// Returns an error if another session is active or the element is
    /// not found.
    pub fn begin_resize(
        &mut self,
        id: ElementId,
        pointer: Point,
        container: ContainerRect,
    ) -> LayoutResult<()> {
        if !self.interaction.is_idle() {
            return Err(LayoutError::SessionActive(self.interaction.kind()));
        }
        let element = self
            .get(id)
            .ok_or_else(|| LayoutError::ElementNotFound(id.to_string()))?;
        self.interaction = Interaction::Resizing(ResizeSession::new(
            id,
            pointer,
            Size::new(element.width, element.height),
            Point::new(element.x, element.y),
            container,
        ));
        tracing::debug!(%id, "resize session started");
        Ok(())
    }

    /// Apply a pointer-move event to the active resize session.
    ///
    /// The top-left anchor never moves; only width/height change.
    ///
    /// # Errors
    ///
    /// Returns an error if no resize session is active or the element
    /// has vanished.
    pub fn update_resize(&mut self, pointer: Point) -> LayoutResult<()> {
        let Interaction::Resizing(session) = self.interaction else {
            return Err(LayoutError::NoActiveSession("resize"));
        };
        let update = session.update(pointer);
        let element = self.get_mut(session.id)?;
        element.width = update.width;
        element.height = update.height;
        Ok(())
    }

    /// End the active resize session, keeping the last applied update.
    ///
    /// # Errors
    ///
    /// Returns an error if no resize session is active.
    pub fn end_resize(&mut self) -> LayoutResult<()> {
        let Interaction::Resizing(session) = self.interaction else {
            return Err(LayoutError::NoActiveSession("resize"));
        };
        tracing::debug!(id = %session.id, "resize session ended");
        self.interaction = Interaction::Idle;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Z-order
    // ------------------------------------------------------------------

    /// Raise an element above everything else.
    ///
    /// Sets its rank to the maximum existing coerced rank (floored at
    /// 1) plus one. No other element is renumbered.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn bring_to_front(&mut self, id: ElementId) -> LayoutResult<()> {
        let max_z = max_coerced_z(&self.elements);
        let element = self.get_mut(id)?;
        element.z_index = Some(max_z + 1);
        tracing::debug!(%id, z = max_z + 1, "brought to front");
        Ok(())
    }

    /// Drop an element below everything else.
    ///
    /// Sets its rank to the minimum existing coerced rank (capped at 1)
    /// minus one, which may go negative. No other element is
    /// renumbered.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn send_to_back(&mut self, id: ElementId) -> LayoutResult<()> {
        let min_z = min_coerced_z(&self.elements);
        let element = self.get_mut(id)?;
        element.z_index = Some(min_z - 1);
        tracing::debug!(%id, z = min_z - 1, "sent to back");
        Ok(())
    }

    /// Remove an element from the canvas.
    ///
    /// Clears the selection if the removed element was selected. The
    /// remaining elements keep their ranks; gaps and duplicates persist
    /// until the next export.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn remove(&mut self, id: ElementId) -> LayoutResult<CanvasElement> {
        let index = self
            .elements
            .iter()
            .position(|el| el.id == id)
            .ok_or_else(|| LayoutError::ElementNotFound(id.to_string()))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        let removed = self.elements.remove(index);
        tracing::debug!(%id, "removed element");
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Build the export document for the current collection, stamped
    /// with the given time.
    #[must_use]
    pub fn export(&self, now: chrono::DateTime<Utc>) -> ExportDocument {
        build_export_document(&self.elements, now)
    }

    /// Build the export document stamped with the current time.
    #[must_use]
    pub fn export_now(&self) -> ExportDocument {
        self.export(Utc::now())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
