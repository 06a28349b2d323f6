//! Typed view of the parts of a Figma file response this server reads.
//!
//! Only the fields needed for design token extraction are modelled. Every
//! other field in the Figma payload is ignored during deserialisation, and
//! every modelled field is optional so partially populated nodes still parse.
//! A field holding a value of the wrong shape is read as absent, so one odd
//! node never fails the whole file.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Response body of `GET /v1/files/{key}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    /// File name.
    #[serde(default)]
    pub name: Option<String>,
    /// ISO 8601 timestamp of the last modification.
    #[serde(default)]
    pub last_modified: Option<String>,
    /// File version identifier.
    #[serde(default)]
    pub version: Option<String>,
    /// The root `DOCUMENT` node.
    pub document: Node,
}

/// One node of the document tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node type tag (`DOCUMENT`, `CANVAS`, `FRAME`, `TEXT`, ...).
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub node_type: Option<String>,
    /// Paints applied to the node. Entries that are not paints are dropped.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub fills: Option<Vec<Fill>>,
    /// Typography, present on `TEXT` nodes.
    #[serde(default, deserialize_with = "lenient")]
    pub style: Option<TextStyle>,
    /// Bounds in absolute canvas coordinates.
    #[serde(default, deserialize_with = "lenient")]
    pub absolute_bounding_box: Option<BoundingBox>,
    /// Child nodes in document order.
    #[serde(default)]
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Returns `true` if this is a `TEXT` node.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.node_type.as_deref() == Some(TEXT_NODE_TYPE)
    }

    /// Returns the children of this node, or an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Returns the fills of this node, or an empty slice.
    #[must_use]
    pub fn fills(&self) -> &[Fill] {
        self.fills.as_deref().unwrap_or_default()
    }
}

/// Node type tag for text layers.
pub const TEXT_NODE_TYPE: &str = "TEXT";

/// Paint type tag for solid colour fills.
pub const SOLID_FILL_TYPE: &str = "SOLID";

/// A paint applied to a node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fill {
    /// Paint type tag (`SOLID`, `GRADIENT_LINEAR`, `IMAGE`, ...).
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub fill_type: Option<String>,
    /// Colour, carried by solid paints. Absent if any channel is missing.
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<Color>,
}

impl Fill {
    /// Returns the colour if this is a solid paint that carries one.
    #[must_use]
    pub fn solid_color(&self) -> Option<&Color> {
        if self.fill_type.as_deref() == Some(SOLID_FILL_TYPE) {
            self.color.as_ref()
        } else {
            None
        }
    }
}

/// RGBA colour with normalised components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha, `1` when absent.
    #[serde(default, deserialize_with = "lenient")]
    pub a: Option<f64>,
}

impl Color {
    /// Returns the alpha component, defaulting to fully opaque.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }
}

/// Typography of a `TEXT` node.
///
/// Numbers are kept as [`Number`] so they are reported exactly as Figma sent
/// them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font family name.
    #[serde(default, deserialize_with = "lenient")]
    pub font_family: Option<String>,
    /// Font size in pixels.
    #[serde(default, deserialize_with = "lenient")]
    pub font_size: Option<Number>,
    /// Numeric font weight.
    #[serde(default, deserialize_with = "lenient")]
    pub font_weight: Option<Number>,
    /// Line height in pixels.
    #[serde(default, deserialize_with = "lenient")]
    pub line_height_px: Option<Number>,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoundingBox {
    /// Horizontal position.
    #[serde(default, deserialize_with = "lenient")]
    pub x: Option<Number>,
    /// Vertical position.
    #[serde(default, deserialize_with = "lenient")]
    pub y: Option<Number>,
    /// Width in pixels.
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<Number>,
    /// Height in pixels.
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<Number>,
}

/// Reads an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Reads an optional sequence, keeping only the entries that decode.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| T::deserialize(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_file() {
        let json = r#"{"document": {"type": "DOCUMENT"}}"#;
        let file: FigmaFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.document.node_type.as_deref(), Some("DOCUMENT"));
        assert!(file.document.children().is_empty());
        assert!(file.name.is_none());
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let json = r#"{
            "name": "Landing page",
            "lastModified": "2024-01-01T00:00:00Z",
            "thumbnailUrl": "https://example.com/thumb.png",
            "document": {
                "id": "0:0",
                "type": "DOCUMENT",
                "children": [{
                    "id": "1:2",
                    "type": "RECTANGLE",
                    "blendMode": "NORMAL",
                    "fills": [{"type": "SOLID", "visible": true, "color": {"r": 1, "g": 0.5, "b": 0, "a": 1}}],
                    "absoluteBoundingBox": {"x": 0, "y": 0, "width": 100, "height": 50}
                }]
            }
        }"#;

        let file: FigmaFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.name.as_deref(), Some("Landing page"));
        let rect = &file.document.children()[0];
        let color = rect.fills()[0].solid_color().unwrap();
        assert!((color.g - 0.5).abs() < f64::EPSILON);
        let bbox = rect.absolute_bounding_box.as_ref().unwrap();
        assert_eq!(bbox.width.as_ref().unwrap().as_u64(), Some(100));
    }

    #[test]
    fn null_bounding_box_is_absent() {
        let json = r#"{"type": "SLICE", "absoluteBoundingBox": null}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert!(node.absolute_bounding_box.is_none());
    }

    #[test]
    fn alpha_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"r": 0, "g": 0, "b": 1}"#).unwrap();
        assert!((color.alpha() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_solid_fill_has_no_solid_color() {
        let fill: Fill = serde_json::from_str(
            r#"{"type": "GRADIENT_LINEAR", "color": {"r": 1, "g": 1, "b": 1, "a": 1}}"#,
        )
        .unwrap();
        assert!(fill.solid_color().is_none());
    }

    #[test]
    fn text_node_detection() {
        let node: Node = serde_json::from_str(r#"{"type": "TEXT"}"#).unwrap();
        assert!(node.is_text());
        assert!(!Node::default().is_text());
    }

    #[test]
    fn null_fill_type_is_not_solid() {
        let node: Node = serde_json::from_str(
            r#"{"fills": [{"type": null, "color": {"r": 1, "g": 1, "b": 1}}]}"#,
        )
        .unwrap();
        assert_eq!(node.fills().len(), 1);
        assert!(node.fills()[0].fill_type.is_none());
        assert!(node.fills()[0].solid_color().is_none());
    }

    #[test]
    fn color_missing_channel_is_dropped() {
        let fill: Fill =
            serde_json::from_str(r#"{"type": "SOLID", "color": {"r": 1, "g": 0}}"#).unwrap();
        assert!(fill.color.is_none());
        assert!(fill.solid_color().is_none());
    }

    #[test]
    fn non_numeric_alpha_reads_as_opaque() {
        let color: Color =
            serde_json::from_str(r#"{"r": 0, "g": 0, "b": 0, "a": "half"}"#).unwrap();
        assert!(color.a.is_none());
        assert!((color.alpha() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_style_fields_read_as_absent() {
        let node: Node = serde_json::from_str(
            r#"{"type": "FRAME", "style": {"fontFamily": "Inter", "fontWeight": "bold", "fontSize": [12]}}"#,
        )
        .unwrap();
        let style = node.style.unwrap();
        assert_eq!(style.font_family.as_deref(), Some("Inter"));
        assert!(style.font_weight.is_none());
        assert!(style.font_size.is_none());

        let node: Node = serde_json::from_str(r#"{"type": "TEXT", "style": "heading"}"#).unwrap();
        assert!(node.style.is_none());
    }

    #[test]
    fn malformed_fills_and_bounds_are_skipped() {
        let node: Node = serde_json::from_str(
            r#"{
                "fills": [42, {"type": "SOLID", "color": {"r": 0, "g": 0, "b": 1}}],
                "absoluteBoundingBox": {"width": "wide", "height": 20}
            }"#,
        )
        .unwrap();
        assert_eq!(node.fills().len(), 1);
        assert!(node.fills()[0].solid_color().is_some());
        let bbox = node.absolute_bounding_box.unwrap();
        assert!(bbox.width.is_none());
        assert_eq!(bbox.height.unwrap().as_u64(), Some(20));

        let node: Node = serde_json::from_str(r#"{"fills": "none", "type": 7}"#).unwrap();
        assert!(node.fills.is_none());
        assert!(node.node_type.is_none());
    }
}
