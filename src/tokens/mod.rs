//! Design token extraction from a Figma document tree.
//!
//! A single depth-first, pre-order walk over the node tree collects:
//!
//! - **Colours**: every solid fill, formatted as `rgba(R, G, B, A)` and
//!   de-duplicated by exact string, in first-seen order
//! - **Text styles**: one record per `TEXT` node that carries a style, in
//!   traversal order, duplicates kept
//! - **Spacing**: the width and height of every bounding box, de-duplicated
//!   by numeric value and sorted ascending
//!
//! Missing optional fields contribute nothing. Extraction never fails.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::figma::{Color, FigmaFile, Fill, Node, TextStyle};

/// Design tokens extracted from a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    /// Distinct colours in first-seen order.
    pub colors: Vec<String>,
    /// Text styles in traversal order.
    pub text_styles: Vec<TextStyleToken>,
    /// Distinct dimensions, ascending.
    pub spacing: Vec<Number>,
}

impl TokenSet {
    /// Returns `true` if no tokens were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.text_styles.is_empty() && self.spacing.is_empty()
    }
}

/// Typography of one `TEXT` node.
///
/// Fields absent from the source style are omitted when serialised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleToken {
    /// Font family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Number>,
    /// Numeric font weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<Number>,
    /// Line height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Number>,
}

impl From<&TextStyle> for TextStyleToken {
    fn from(style: &TextStyle) -> Self {
        Self {
            font_family: style.font_family.clone(),
            font_size: style.font_size.clone(),
            font_weight: style.font_weight.clone(),
            line_height: style.line_height_px.clone(),
        }
    }
}

/// Extracts design tokens from the top-level nodes of a document.
#[must_use]
pub fn extract(root: &[Node]) -> TokenSet {
    let mut acc = Accumulator::default();

    // Reversed pushes keep the pop order equal to document order.
    let mut stack: Vec<&Node> = root.iter().rev().collect();
    while let Some(node) = stack.pop() {
        acc.visit(node);
        stack.extend(node.children().iter().rev());
    }

    acc.finish()
}

/// Extracts design tokens from the pages of a fetched file.
#[must_use]
pub fn extract_from_file(file: &FigmaFile) -> TokenSet {
    extract(file.document.children())
}

/// Formats a colour as `rgba(R, G, B, A)`.
///
/// Channels are scaled to `0..=255` and rounded half away from zero. Alpha is
/// written unscaled in its shortest round-trip form (`1`, `0.5`, `1e-7`).
#[must_use]
pub fn format_rgba(color: &Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        channel(color.r),
        channel(color.g),
        channel(color.b),
        format_alpha(color.alpha())
    )
}

/// Shortest round-trip decimal, switching to exponent notation below `1e-7`
/// and from `1e21` up.
fn format_alpha(alpha: f64) -> String {
    if alpha == 0.0 {
        // covers -0
        return "0".to_string();
    }
    if (1e-7..1e21).contains(&alpha.abs()) {
        return alpha.to_string();
    }

    let exp = format!("{alpha:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

#[allow(clippy::cast_possible_truncation)] // rounded before the cast
fn channel(component: f64) -> i64 {
    (component * 255.0).round() as i64
}

// JSON numbers always have an f64 view without arbitrary_precision.
fn numeric(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

#[derive(Default)]
struct Accumulator {
    colors: IndexSet<String>,
    text_styles: Vec<TextStyleToken>,
    spacing: Vec<Number>,
}

impl Accumulator {
    fn visit(&mut self, node: &Node) {
        for color in node.fills().iter().filter_map(Fill::solid_color) {
            self.colors.insert(format_rgba(color));
        }

        if node.is_text() {
            if let Some(style) = &node.style {
                self.text_styles.push(TextStyleToken::from(style));
            }
        }

        if let Some(bbox) = &node.absolute_bounding_box {
            self.spacing.extend(bbox.width.iter().cloned());
            self.spacing.extend(bbox.height.iter().cloned());
        }
    }

    fn finish(self) -> TokenSet {
        let mut spacing = self.spacing;
        // Stable sort, so dedup keeps the first-seen spelling of equal values.
        spacing.sort_by(|a, b| numeric(a).total_cmp(&numeric(b)));
        spacing.dedup_by(|a, b| numeric(a).total_cmp(&numeric(b)).is_eq());

        TokenSet {
            colors: self.colors.into_iter().collect(),
            text_styles: self.text_styles,
            spacing,
        }
    }
}
