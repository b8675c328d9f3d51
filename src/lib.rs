//! JSON export upload service.
//!
//! A single-endpoint HTTP API: `POST /` takes a JSON (or pre-formatted JSON
//! Lines) payload, stores its canonical bytes in an S3-compatible bucket,
//! and replies with the object's SHA-256, size, key, and a 7-day signed
//! download URL.

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
