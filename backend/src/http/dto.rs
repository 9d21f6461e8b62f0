//! Data Transfer Objects for the HTTP API.
//!
//! View payloads are re-exported from the routes module; only the request
//! and status types live here.

use serde::{Deserialize, Serialize};

pub use crate::api::{ChannelOption, ChannelOptions, ErrorBarsData, Figure};

/// Query parameters shared by the view endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelQuery {
    /// Comma-separated channel columns. Absent means the view's default
    /// selection; present but empty means no channels.
    #[serde(default)]
    pub channels: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Number of resampled buckets held in memory
    pub buckets: usize,
    /// Number of configured channels
    pub channels: usize,
}
