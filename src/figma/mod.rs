//! Figma REST API collaborator.
//!
//! - [`types`]: the document tree as read for token extraction
//! - [`client`]: authenticated async HTTP client for the file and image endpoints
//! - [`error`]: error types

pub mod client;
pub mod error;
pub mod types;

pub use client::{FigmaClient, ImageExportRequest, ImageFormat, DEFAULT_EXPORT_SCALE};
pub use error::{FigmaError, FigmaResult};
pub use types::{BoundingBox, Color, FigmaFile, Fill, Node, TextStyle};
