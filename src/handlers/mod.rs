//! HTTP handlers, grouped by concern.

pub mod export_handlers;
pub mod health_handlers;
