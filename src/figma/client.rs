//! Async HTTP client for the Figma REST API.
//!
//! Covers the two endpoints the MCP tools need:
//!
//! - `GET /v1/files/{key}`: full file with its document tree
//! - `GET /v1/images/{key}?ids=..&format=..&scale=..`: rendered image URLs
//!
//! Every request is authenticated with the `X-Figma-Token` header.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::config::FigmaConfig;
use crate::figma::error::{FigmaError, FigmaResult};
use crate::figma::types::FigmaFile;

/// Header carrying the personal access token.
pub const TOKEN_HEADER: &str = "X-Figma-Token";

/// Scale used when an export request does not set one.
pub const DEFAULT_EXPORT_SCALE: f64 = 2.0;

/// Image format for node exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG.
    Jpg,
    /// PNG.
    #[default]
    Png,
    /// SVG.
    Svg,
    /// PDF.
    Pdf,
}

impl ImageFormat {
    /// All supported formats, in schema order.
    pub const ALL: [Self; 4] = [Self::Jpg, Self::Png, Self::Svg, Self::Pdf];

    /// Returns the query parameter value for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = FigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| {
                FigmaError::invalid_argument(format!(
                    "Invalid format '{s}'. Expected one of: jpg, png, svg, pdf"
                ))
            })
    }
}

/// A validated image export request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageExportRequest {
    node_ids: Vec<String>,
    format: ImageFormat,
    scale: f64,
}

impl ImageExportRequest {
    /// Creates an export request.
    ///
    /// A missing or zero `scale` falls back to [`DEFAULT_EXPORT_SCALE`].
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError::InvalidArgument`] if `node_ids` is empty or the
    /// scale is negative or not finite.
    pub fn new(
        node_ids: Vec<String>,
        format: ImageFormat,
        scale: Option<f64>,
    ) -> FigmaResult<Self> {
        if node_ids.is_empty() {
            return Err(FigmaError::invalid_argument("nodeIds must not be empty"));
        }

        let scale = match scale {
            None => DEFAULT_EXPORT_SCALE,
            Some(s) if s.abs() < f64::EPSILON => DEFAULT_EXPORT_SCALE,
            Some(s) if s.is_finite() && s > 0.0 => s,
            Some(s) => {
                return Err(FigmaError::invalid_argument(format!(
                    "Invalid scale {s}. Expected a positive number"
                )))
            }
        };

        Ok(Self {
            node_ids,
            format,
            scale,
        })
    }

    /// Returns the node IDs to render.
    #[must_use]
    pub fn node_ids(&self) -> &[String] {
        &self.node_ids
    }

    /// Returns the requested format.
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Returns the export scale.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }
}

/// Client for the Figma REST API.
#[derive(Clone)]
pub struct FigmaClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl fmt::Debug for FigmaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigmaClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl FigmaClient {
    /// Creates a client from configuration and an optional access token.
    ///
    /// A client without a token can be built; each request then fails with
    /// [`FigmaError::MissingToken`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client cannot
    /// be built.
    pub fn new(config: &FigmaConfig, token: Option<String>) -> FigmaResult<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|_| FigmaError::InvalidBaseUrl {
            url: config.api_base_url.clone(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FigmaError::InvalidBaseUrl {
                url: config.api_base_url.clone(),
            });
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FigmaError::Client { source })?;

        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Returns `true` if an access token is configured.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fetches a file as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured, the request fails, the API
    /// answers with a non-success status, or the body is not JSON.
    pub async fn get_file(&self, file_key: &str) -> FigmaResult<Value> {
        let url = self.endpoint(&["v1", "files", file_key])?;
        self.get_json(url).await
    }

    /// Fetches a file and decodes its document tree.
    ///
    /// # Errors
    ///
    /// As [`Self::get_file`], plus a decode error if the body has no
    /// `document` node.
    pub async fn get_file_document(&self, file_key: &str) -> FigmaResult<FigmaFile> {
        let value = self.get_file(file_key).await?;
        FigmaFile::deserialize(serde_stacker::Deserializer::new(value))
            .map_err(|source| FigmaError::Decode { source })
    }

    /// Requests rendered images and returns the `images` map
    /// (node ID to URL), or `null` if the response has none.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured, the request fails, the API
    /// answers with a non-success status, or the body is not JSON.
    pub async fn export_images(
        &self,
        file_key: &str,
        request: &ImageExportRequest,
    ) -> FigmaResult<Value> {
        let mut url = self.endpoint(&["v1", "images", file_key])?;
        url.query_pairs_mut()
            .append_pair("ids", &request.node_ids().join(","))
            .append_pair("format", request.format().as_str())
            .append_pair("scale", &request.scale().to_string());

        let mut body = self.get_json(url).await?;
        Ok(body
            .get_mut("images")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    /// Builds an API URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> FigmaResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FigmaError::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues an authenticated GET and parses the JSON body.
    async fn get_json(&self, url: Url) -> FigmaResult<Value> {
        let token = self.token.as_deref().ok_or(FigmaError::MissingToken)?;

        tracing::debug!(path = url.path(), "Figma API request");

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, token)
            .send()
            .await
            .map_err(|source| FigmaError::Request { source })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Figma API returned an error status");
            return Err(FigmaError::Api { status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FigmaError::Request { source })?;

        decode_body(&body)
    }
}

/// Parses a response body with no nesting limit.
fn decode_body(body: &str) -> FigmaResult<Value> {
    let mut de = serde_json::Deserializer::from_str(body);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(|source| FigmaError::Decode { source })?;
    de.end().map_err(|source| FigmaError::Decode { source })?;
    Ok(value)
}
