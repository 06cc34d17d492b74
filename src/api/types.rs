// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::core::cache::CacheStats;

/// Error response body. `detail` is shown to the user verbatim.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Plain confirmation body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub cache: CacheStats,
}
