//! Core type definitions for the segmentation engine.

mod chunk;
mod config;
mod document;

pub use chunk::{Chunk, PathSegment};
pub use config::{SeparatorKind, ServiceConfig, StrategyConfig, StrategyTag};
pub use document::{markdown_markers, Document, MarkerKind, Span, StructuralMarker};
