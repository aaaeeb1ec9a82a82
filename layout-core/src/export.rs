//! Canvas-to-document export transform.
//!
//! Pure function from an element collection plus a timestamp to a fresh
//! [`ExportDocument`]. The document's wire shape (field names, nesting,
//! id pattern) is an interoperability contract with external consumers
//! of downloaded layouts and must not drift.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::element::CanvasElement;
use crate::error::LayoutResult;

/// Logical canvas width stated in every export document.
pub const EXPORT_CANVAS_WIDTH: u32 = 1200;
/// Logical canvas height stated in every export document.
pub const EXPORT_CANVAS_HEIGHT: u32 = 800;

/// A pixel count or a CSS-style dimension string such as `"100%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extent {
    /// Plain pixel value.
    Pixels(i64),
    /// Dimension expression, e.g. `"100%"` or `"calc(100% - 20px)"`.
    Text(String),
}

/// Project metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBlock {
    /// Project name.
    pub name: String,
    /// Project format version.
    pub version: String,
    /// Creation timestamp (ISO-8601, set to the export invocation time).
    pub created: String,
    /// Last-modified timestamp; always equals `created`.
    pub last_modified: String,
}

/// Grid settings inside the canvas block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridBlock {
    /// Whether the grid is enabled.
    pub enabled: bool,
    /// Grid cell size in pixels.
    pub size: u32,
    /// Whether snapping is enabled.
    pub snap: bool,
}

/// Fixed logical canvas block.
///
/// Always 1200x800 regardless of the rendered container the layout was
/// actually built on; percent positions on the live elements are not
/// reconciled against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasBlock {
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
    /// Grid settings.
    pub grid: GridBlock,
}

/// Per-type content payload of an exported element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementContent {
    /// Header content.
    Header {
        /// Title text.
        text: String,
        /// Style preset name.
        style: String,
    },
    /// Card content.
    Card {
        /// Card title, templated from the export index.
        title: String,
        /// Card description.
        description: String,
        /// Card image; always null in fresh exports.
        image: Option<String>,
    },
    /// Text block content.
    Text {
        /// HTML fragment.
        html: String,
        /// Plain-text fallback.
        #[serde(rename = "plainText")]
        plain_text: String,
    },
    /// Footer content.
    Footer {
        /// Copyright line, templated from the export year.
        copyright: String,
        /// Footer links.
        links: Vec<String>,
    },
    /// Empty content object for types with no payload.
    Empty {},
}

/// Override fragment for one responsive breakpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakpointOverride {
    /// Overridden X position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    /// Overridden width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Extent>,
    /// Overridden height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

/// Responsive breakpoint overrides; emitted only for header and card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveBlock {
    /// Mobile breakpoint override.
    pub mobile: BreakpointOverride,
    /// Tablet breakpoint override.
    pub tablet: BreakpointOverride,
}

/// Position block of an exported element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBlock {
    /// X position (0 for header and footer).
    pub x: i64,
    /// Y position.
    pub y: i64,
    /// Width; `"100%"` for header and footer.
    pub width: Extent,
    /// Height.
    pub height: i64,
    /// Dense 1-based export rank; not the element's stored rank.
    pub z_index: i64,
    /// Present (true) only for footers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed: Option<bool>,
}

/// One element of the export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedElement {
    /// `elem_<exportType>_<NNN>` where NNN is the zero-padded export
    /// index.
    pub id: String,
    /// Export type name (`text` becomes `text-content`).
    #[serde(rename = "type")]
    pub export_type: String,
    /// Per-type content payload.
    pub content: ElementContent,
    /// Position block.
    pub position: PositionBlock,
    /// Responsive overrides; omitted entirely for types without them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<ResponsiveBlock>,
}

/// Document metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBlock {
    /// Number of exported elements.
    pub total_elements: usize,
    /// Export format tag.
    pub export_format: String,
    /// Export format version tag.
    pub export_version: String,
}

/// The complete export document. Fresh value on every export call;
/// never references the input elements by identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Project block.
    pub project: ProjectBlock,
    /// Fixed logical canvas block.
    pub canvas: CanvasBlock,
    /// Elements in export (z-sorted) order.
    pub elements: Vec<ExportedElement>,
    /// Metadata block.
    pub metadata: MetadataBlock,
}

impl ExportDocument {
    /// Serialize to a `serde_json::Value`, e.g. for validation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> LayoutResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to pretty-printed JSON, the shape handed to clipboard
    /// and download sinks.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[allow(clippy::cast_possible_truncation)] // canvas coordinates stay far below i64 range
fn round_px(value: f32) -> i64 {
    value.round() as i64
}

fn content_for(element: &CanvasElement, export_index: usize, year: i32) -> ElementContent {
    use crate::element::ElementType;

    match element.kind {
        ElementType::Header => ElementContent::Header {
            text: "Site Title".to_string(),
            style: "default".to_string(),
        },
        ElementType::Card => ElementContent::Card {
            title: format!("Card {export_index}"),
            description: "Content description".to_string(),
            image: None,
        },
        ElementType::Text => ElementContent::Text {
            html: "Text content goes here".to_string(),
            plain_text: "Text content goes here".to_string(),
        },
        ElementType::Footer => ElementContent::Footer {
            copyright: format!("© {year} Test Builder"),
            links: Vec::new(),
        },
        ElementType::Slider => ElementContent::Empty {},
    }
}

fn responsive_for(element: &CanvasElement) -> Option<ResponsiveBlock> {
    use crate::element::ElementType;

    match element.kind {
        ElementType::Header => Some(ResponsiveBlock {
            mobile: BreakpointOverride {
                width: Some(Extent::Text("100%".to_string())),
                height: Some(60),
                ..BreakpointOverride::default()
            },
            tablet: BreakpointOverride {
                width: Some(Extent::Text("100%".to_string())),
                height: Some(70),
                ..BreakpointOverride::default()
            },
        }),
        ElementType::Card => Some(ResponsiveBlock {
            mobile: BreakpointOverride {
                x: Some(10),
                width: Some(Extent::Text("calc(100% - 20px)".to_string())),
                ..BreakpointOverride::default()
            },
            tablet: BreakpointOverride {
                x: Some(30),
                width: Some(Extent::Pixels(350)),
                ..BreakpointOverride::default()
            },
        }),
        _ => None,
    }
}

#[allow(clippy::cast_possible_wrap)] // export index is bounded by the element count
fn position_for(element: &CanvasElement, export_index: usize) -> PositionBlock {
    use crate::element::ElementType;

    let z_index = export_index as i64;
    match element.kind {
        // Header and footer span the full width and pin to x = 0
        ElementType::Header => PositionBlock {
            x: 0,
            y: round_px(element.y),
            width: Extent::Text("100%".to_string()),
            height: round_px(element.height),
            z_index,
            fixed: None,
        },
        ElementType::Footer => PositionBlock {
            x: 0,
            y: round_px(element.y),
            width: Extent::Text("100%".to_string()),
            height: round_px(element.height),
            z_index,
            fixed: Some(true),
        },
        _ => PositionBlock {
            x: round_px(element.x),
            y: round_px(element.y),
            width: Extent::Pixels(round_px(element.width)),
            height: round_px(element.height),
            z_index,
            fixed: None,
        },
    }
}

/// Build the export document for an element collection.
///
/// Elements are stable-sorted ascending by their coerced stacking rank
/// (unassigned and zero ranks sort as 1), then assigned dense 1-based
/// export ranks that become both `position.zIndex` and the id suffix.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // grid size is a small positive constant
pub fn build_export_document(
    elements: &[CanvasElement],
    now: DateTime<Utc>,
) -> ExportDocument {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let year = now.year();

    let mut sorted: Vec<&CanvasElement> = elements.iter().collect();
    sorted.sort_by_key(|el| el.coerced_z());

    let exported: Vec<ExportedElement> = sorted
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let export_index = index + 1;
            let export_type = element.kind.export_type();
            ExportedElement {
                id: format!("elem_{export_type}_{export_index:03}"),
                export_type: export_type.to_string(),
                content: content_for(element, export_index, year),
                position: position_for(element, export_index),
                responsive: responsive_for(element),
            }
        })
        .collect();

    ExportDocument {
        project: ProjectBlock {
            name: "Test Builder Layout".to_string(),
            version: "1.0".to_string(),
            created: timestamp.clone(),
            last_modified: timestamp,
        },
        canvas: CanvasBlock {
            width: EXPORT_CANVAS_WIDTH,
            height: EXPORT_CANVAS_HEIGHT,
            grid: GridBlock {
                enabled: true,
                size: crate::geometry::GRID_SIZE as u32,
                snap: true,
            },
        },
        metadata: MetadataBlock {
            total_elements: exported.len(),
            export_format: "json".to_string(),
            export_version: "2.0".to_string(),
        },
        elements: exported,
    }
}
