//! Tool definitions and handlers.
//!
//! Each tool makes one Figma API call and renders the outcome as text:
//!
//! - `get_figma_file`: the file JSON, pretty-printed
//! - `export_figma_images`: the node-to-URL map of rendered images
//! - `analyze_figma_design_tokens`: colours, text styles and spacing
//!
//! Failures never escape a tool call. They become an `isError` result whose
//! text starts with `Error: `.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::figma::{
    FigmaClient, FigmaError, ImageExportRequest, ImageFormat, DEFAULT_EXPORT_SCALE,
};
use crate::tokens;

/// Tool name: fetch a file.
pub const GET_FIGMA_FILE: &str = "get_figma_file";
/// Tool name: export node images.
pub const EXPORT_FIGMA_IMAGES: &str = "export_figma_images";
/// Tool name: extract design tokens.
pub const ANALYZE_FIGMA_DESIGN_TOKENS: &str = "analyze_figma_design_tokens";

/// A tool definition for tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool call resulted in an error.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires fn(&T) -> bool
const fn is_false(b: &bool) -> bool {
    !*b
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Creates an error text result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Returns the text of the first content item.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|content| match content {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

/// Errors raised while running a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool does not exist.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required argument is absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// An argument has the wrong shape.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Argument name.
        name: &'static str,
        /// Description of what's wrong.
        message: String,
    },

    /// The Figma API call failed.
    #[error(transparent)]
    Figma(#[from] FigmaError),

    /// The result could not be rendered as JSON.
    #[error("failed to serialise result: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Returns the list of available tools.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let formats: Vec<&str> = ImageFormat::ALL.into_iter().map(ImageFormat::as_str).collect();

    vec![
        ToolDefinition {
            name: GET_FIGMA_FILE.to_string(),
            description: Some("Get Figma file information and node tree".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "fileKey": {
                        "type": "string",
                        "description": "Figma file key from URL"
                    }
                },
                "required": ["fileKey"]
            }),
        },
        ToolDefinition {
            name: EXPORT_FIGMA_IMAGES.to_string(),
            description: Some("Export images from Figma file".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "fileKey": {
                        "type": "string",
                        "description": "Figma file key"
                    },
                    "nodeIds": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Node IDs to export"
                    },
                    "format": {
                        "type": "string",
                        "enum": formats,
                        "description": "Export format"
                    },
                    "scale": {
                        "type": "number",
                        "description": "Export scale (1, 2, 4)",
                        "default": DEFAULT_EXPORT_SCALE
                    }
                },
                "required": ["fileKey", "nodeIds"]
            }),
        },
        ToolDefinition {
            name: ANALYZE_FIGMA_DESIGN_TOKENS.to_string(),
            description: Some(
                "Extract design tokens (colors, typography, spacing) from Figma file".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "fileKey": {
                        "type": "string",
                        "description": "Figma file key"
                    }
                },
                "required": ["fileKey"]
            }),
        },
    ]
}

/// Runs a tool by name, converting any failure into an error result.
pub async fn call_tool(client: &FigmaClient, name: &str, arguments: &Value) -> ToolCallResult {
    tracing::debug!(tool = name, "Tool call");

    let outcome = match name {
        GET_FIGMA_FILE => get_figma_file(client, arguments).await,
        EXPORT_FIGMA_IMAGES => export_figma_images(client, arguments).await,
        ANALYZE_FIGMA_DESIGN_TOKENS => analyze_design_tokens(client, arguments).await,
        _ => Err(ToolError::UnknownTool(name.to_string())),
    };

    match outcome {
        Ok(text) => ToolCallResult::text(text),
        Err(e) => {
            tracing::warn!(tool = name, error = %e, "Tool call failed");
            ToolCallResult::error(format!("Error: {e}"))
        }
    }
}

async fn get_figma_file(client: &FigmaClient, arguments: &Value) -> Result<String, ToolError> {
    let file_key = file_key(arguments)?;
    let file = client.get_file(file_key).await?;
    Ok(serde_json::to_string_pretty(&file)?)
}

async fn export_figma_images(client: &FigmaClient, arguments: &Value) -> Result<String, ToolError> {
    let file_key = file_key(arguments)?;
    let request = export_request(arguments)?;
    let images = client.export_images(file_key, &request).await?;
    Ok(format!(
        "Image export URLs:\n{}",
        serde_json::to_string_pretty(&images)?
    ))
}

async fn analyze_design_tokens(
    client: &FigmaClient,
    arguments: &Value,
) -> Result<String, ToolError> {
    let file_key = file_key(arguments)?;
    let file = client.get_file_document(file_key).await?;
    let tokens = tokens::extract_from_file(&file);

    tracing::debug!(
        colors = tokens.colors.len(),
        text_styles = tokens.text_styles.len(),
        spacing = tokens.spacing.len(),
        "Extracted design tokens"
    );

    Ok(format!(
        "Design Tokens Analysis:\n{}",
        serde_json::to_string_pretty(&tokens)?
    ))
}

fn file_key(arguments: &Value) -> Result<&str, ToolError> {
    match arguments.get("fileKey") {
        None | Some(Value::Null) => Err(ToolError::MissingParameter("fileKey")),
        Some(Value::String(key)) if !key.trim().is_empty() => Ok(key.as_str()),
        Some(_) => Err(ToolError::InvalidParameter {
            name: "fileKey",
            message: "expected a non-empty string".to_string(),
        }),
    }
}

fn export_request(arguments: &Value) -> Result<ImageExportRequest, ToolError> {
    let node_ids = match arguments.get("nodeIds") {
        None | Some(Value::Null) => return Err(ToolError::MissingParameter("nodeIds")),
        Some(Value::Array(ids)) => ids
            .iter()
            .map(|id| id.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ToolError::InvalidParameter {
                name: "nodeIds",
                message: "expected an array of strings".to_string(),
            })?,
        Some(_) => {
            return Err(ToolError::InvalidParameter {
                name: "nodeIds",
                message: "expected an array of strings".to_string(),
            })
        }
    };

    let format = match arguments.get("format") {
        None | Some(Value::Null) => ImageFormat::default(),
        Some(Value::String(format)) => format.parse::<ImageFormat>()?,
        Some(_) => {
            return Err(ToolError::InvalidParameter {
                name: "format",
                message: "expected a string".to_string(),
            })
        }
    };

    let scale = match arguments.get("scale") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_f64().ok_or_else(|| ToolError::InvalidParameter {
            name: "scale",
            message: "expected a number".to_string(),
        })?),
    };

    Ok(ImageExportRequest::new(node_ids, format, scale)?)
}
