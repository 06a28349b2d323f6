//! figma-tokens-mcp: MCP server bridging AI assistants to the Figma REST API
//!
//! Three tools are exposed over the MCP stdio transport:
//!
//! - **`get_figma_file`**: fetch a file and its node tree
//! - **`export_figma_images`**: render nodes to image URLs
//! - **`analyze_figma_design_tokens`**: collect colours, text styles and
//!   spacing values from a file's document tree
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Configuration error types
//! - [`figma`] — Figma document model and HTTP client
//! - [`mcp`] — MCP protocol implementation
//! - [`tokens`] — Design token extraction

pub mod config;
pub mod error;
pub mod figma;
pub mod mcp;
pub mod tokens;
