//! Canvas elements - the blocks a layout is composed from.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

/// Unique identifier for an element.
///
/// Ids are monotonically increasing integers assigned by the owning
/// [`Canvas`](crate::Canvas) at creation time and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    /// Create an id from a raw integer.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The palette of block types an element can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Page header band.
    Header,
    /// Page footer band.
    Footer,
    /// Content card.
    Card,
    /// Free text block.
    Text,
    /// Image slider band.
    Slider,
}

impl ElementType {
    /// All palette entries, in sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Header,
        Self::Footer,
        Self::Card,
        Self::Text,
        Self::Slider,
    ];

    /// Internal type name, as stored on the element.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Card => "card",
            Self::Text => "text",
            Self::Slider => "slider",
        }
    }

    /// Type name used in the export document.
    ///
    /// `Text` exports as `text-content`; every other type passes
    /// through unchanged.
    #[must_use]
    pub const fn export_type(self) -> &'static str {
        match self {
            Self::Text => "text-content",
            other => other.name(),
        }
    }

    /// Palette button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::Footer => "Footer",
            Self::Card => "Card",
            Self::Text => "Text Content",
            Self::Slider => "Slider",
        }
    }

    /// Palette button description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Header => "Başlık alanı",
            Self::Footer => "Alt bilgi alanı",
            Self::Card => "İçerik kartı",
            Self::Text => "Metin alanı",
            Self::Slider => "Görsel slider",
        }
    }

    /// Palette button sizing/position hint.
    #[must_use]
    pub const fn meta(self) -> &'static str {
        match self {
            Self::Header => "Width: 100%, Height: 80px, Position: sticky top",
            Self::Footer => "Width: 100%, Height: 60px, Position: bottom",
            Self::Card => "Width: 300px, Height: 200px, Position: relative",
            Self::Text => "Width: auto, Height: auto, Position: relative",
            Self::Slider => "Width: 100%, Height: 400px, Position: relative",
        }
    }

    /// Default size for a freshly dropped element of this type.
    ///
    /// Header, footer, and slider stretch to the container width; card
    /// is fixed; text is capped at 400px or 60% of the container,
    /// whichever is smaller.
    #[must_use]
    pub fn default_size(self, container_width: f32) -> Size {
        match self {
            Self::Header => Size::new(container_width, 80.0),
            Self::Footer => Size::new(container_width, 60.0),
            Self::Card => Size::new(300.0, 200.0),
            Self::Text => Size::new(400.0_f32.min(container_width * 0.6), 100.0),
            Self::Slider => Size::new(container_width, 400.0),
        }
    }
}

/// A placed element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    /// Unique identifier.
    pub id: ElementId,
    /// Block type.
    pub kind: ElementType,
    /// Absolute X position in pixels (>= 0 after placement).
    pub x: f32,
    /// Absolute Y position in pixels (>= 0 after placement).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// X position as a percentage of the container's rendered width at
    /// the moment it was last set by a placement or move.
    ///
    /// Advisory only: the export document's canvas block always states
    /// the fixed logical 1200x800 space, and the two are deliberately
    /// not reconciled.
    pub percent_x: f32,
    /// Y position as a percentage of the container's rendered height at
    /// the moment it was last set by a placement or move.
    pub percent_y: f32,
    /// Advisory stacking rank. May contain gaps, duplicates, or
    /// negative values after front/back operations; never assumed
    /// dense. `None` means never assigned.
    pub z_index: Option<i32>,
}

impl CanvasElement {
    /// The element's bounding box.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// The stacking rank used for sorting and front/back math.
    ///
    /// Intentional legacy behavior: a stored z-index of 0 is treated
    /// like an unassigned one and coerced to 1, matching the export
    /// format's historical defaulting rule. The check is an explicit
    /// match on the value, so the quirk stays confined to this helper.
    #[must_use]
    pub fn coerced_z(&self) -> i32 {
        match self.z_index {
            Some(z) if z != 0 => z,
            _ => 1,
        }
    }
}

/// Maximum coerced stacking rank across a collection, floored at 1.
#[must_use]
pub fn max_coerced_z(elements: &[CanvasElement]) -> i32 {
    elements
        .iter()
        .fold(1, |acc, el| acc.max(el.coerced_z()))
}

/// Minimum coerced stacking rank across a collection, capped at 1.
#[must_use]
pub fn min_coerced_z(elements: &[CanvasElement]) -> i32 {
    elements
        .iter()
        .fold(1, |acc, el| acc.min(el.coerced_z()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(z: Option<i32>) -> CanvasElement {
        CanvasElement {
            id: ElementId::from_raw(1),
            kind: ElementType::Card,
            x: 0.0,
            y: 0.0,
            width: 300.0,
            height: 200.0,
            percent_x: 0.0,
            percent_y: 0.0,
            z_index: z,
        }
    }

    #[test]
    fn test_export_type_maps_text_only() {
        assert_eq!(ElementType::Text.export_type(), "text-content");
        assert_eq!(ElementType::Header.export_type(), "header");
        assert_eq!(ElementType::Slider.export_type(), "slider");
    }

    #[test]
    fn test_default_sizes() {
        assert_eq!(ElementType::Header.default_size(1000.0), Size::new(1000.0, 80.0));
        assert_eq!(ElementType::Footer.default_size(1000.0), Size::new(1000.0, 60.0));
        assert_eq!(ElementType::Card.default_size(1000.0), Size::new(300.0, 200.0));
        assert_eq!(ElementType::Slider.default_size(1000.0), Size::new(1000.0, 400.0));
    }

    #[test]
    fn test_text_width_tracks_narrow_containers() {
        assert_eq!(ElementType::Text.default_size(1000.0), Size::new(400.0, 100.0));
        // 60% of 500 is below the 400px cap
        assert_eq!(ElementType::Text.default_size(500.0), Size::new(300.0, 100.0));
    }

    #[test]
    fn test_palette_order_and_strings() {
        // Sidebar order and the button strings are part of the UI
        // contract with the palette layer.
        let names: Vec<&str> = ElementType::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["header", "footer", "card", "text", "slider"]);

        assert_eq!(ElementType::Header.label(), "Header");
        assert_eq!(ElementType::Text.label(), "Text Content");
        assert_eq!(ElementType::Card.description(), "İçerik kartı");
        assert_eq!(
            ElementType::Header.meta(),
            "Width: 100%, Height: 80px, Position: sticky top"
        );
        assert_eq!(
            ElementType::Slider.meta(),
            "Width: 100%, Height: 400px, Position: relative"
        );
    }

    #[test]
    fn test_coerced_z_treats_zero_as_unassigned() {
        assert_eq!(element(None).coerced_z(), 1);
        assert_eq!(element(Some(0)).coerced_z(), 1);
        assert_eq!(element(Some(5)).coerced_z(), 5);
        assert_eq!(element(Some(-3)).coerced_z(), -3);
    }

    #[test]
    fn test_z_extrema_default_to_one_when_empty() {
        assert_eq!(max_coerced_z(&[]), 1);
        assert_eq!(min_coerced_z(&[]), 1);
        let els = [element(Some(4)), element(Some(-2))];
        assert_eq!(max_coerced_z(&els), 4);
        assert_eq!(min_coerced_z(&els), -2);
    }
}
