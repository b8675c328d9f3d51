//! Data models for the JSON export upload API.
//!
//! Request and response bodies for the `POST /` endpoint, plus the pure
//! filename and byte-encoding helpers the upload pipeline is built from.

pub mod export;
