//! HTTP API for the segmentation service.

pub mod handlers;
