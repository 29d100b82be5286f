//! HTTP request handlers for the segmentation service.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::{ChunkStats, ChunkingEngine};
use crate::error::ChunkingError;
use crate::types::{Chunk, Document, ServiceConfig, StrategyConfig, StrategyTag, StructuralMarker};

/// Application state shared across handlers.
pub struct AppState {
    pub engine: ChunkingEngine,
    pub config: ServiceConfig,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// A request to chunk one document.
#[derive(Debug, Deserialize)]
pub struct ChunkRequest {
    /// Caller-supplied document id; one is minted when absent
    #[serde(default)]
    pub document_id: Option<Uuid>,

    /// The extracted text to segment
    pub text: String,

    /// Structural annotations in character offsets, if the caller has them
    #[serde(default)]
    pub structural_markers: Vec<StructuralMarker>,

    /// Derive heading/paragraph markers from markdown when no markers are
    /// supplied
    #[serde(default)]
    pub derive_markers: bool,

    /// Strategy selection; the service default applies when omitted
    #[serde(default)]
    pub config: Option<StrategyConfig>,
}

/// The chunk sequence for one document, plus aggregate statistics.
#[derive(Debug, Serialize)]
pub struct ChunkResponse {
    pub document_id: Uuid,
    pub strategy: StrategyTag,
    pub chunks: Vec<Chunk>,
    pub stats: ChunkStats,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error wrapper mapping engine errors onto HTTP statuses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

impl From<ChunkingError> for ApiError {
    fn from(err: ChunkingError) -> Self {
        let status = match err {
            ChunkingError::DocumentTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self { status, message: err.to_string() }
    }
}

/// Chunk a document synchronously.
pub async fn chunk_document(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChunkRequest>,
) -> Result<Json<ChunkResponse>, ApiError> {
    let chars = request.text.chars().count();
    if chars > state.config.max_document_chars {
        return Err(ChunkingError::DocumentTooLarge {
            chars,
            limit: state.config.max_document_chars,
        }
        .into());
    }

    let config = request
        .config
        .unwrap_or_else(|| state.config.default_strategy());

    let document = if request.derive_markers && request.structural_markers.is_empty() {
        Document::from_markdown(request.text)
    } else {
        Document::new(request.text).with_markers(request.structural_markers)
    };
    let document = match request.document_id {
        Some(id) => document.with_id(id),
        None => document,
    };

    info!(
        document_id = %document.id,
        strategy = %config.tag(),
        chars,
        "received chunk request"
    );

    let output = state.engine.chunk(&document, &config)?;

    Ok(Json(ChunkResponse {
        document_id: document.id,
        strategy: config.tag(),
        chunks: output.chunks,
        stats: output.stats,
    }))
}

/// One entry of the strategy catalog.
#[derive(Debug, Serialize)]
pub struct StrategyInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
}

/// List the available strategies with their trade-offs.
pub async fn list_strategies() -> Json<Vec<StrategyInfo>> {
    Json(
        StrategyTag::ALL
            .iter()
            .map(|tag| StrategyInfo {
                name: tag.name(),
                description: tag.description(),
                pros: tag.pros(),
                cons: tag.cons(),
            })
            .collect(),
    )
}
