//! HTTP handler for the JSON export upload endpoint.
//!
//! - POST / -> validate, canonicalize, fingerprint, upload, sign

use crate::{
    errors::{AppError, ValidatedJson},
    models::export::{ExportReceipt, ExportRequest, canonical_bytes, sanitize_filename},
    state::AppState,
};
use axum::{Json, extract::State};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Lifetime of the signed download URL returned in the receipt.
const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

const CONTENT_TYPE_JSON: &str = "application/json";

/// Accepts one JSON export on `POST /` and hands back a signed download URL.
///
/// Pipeline: validate the body, encode `content` to its canonical bytes,
/// fingerprint them, upload under a timestamped key, presign a GET. The
/// upload is not rolled back if presigning fails afterwards.
pub async fn save_export(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ExportRequest>,
) -> Result<Json<ExportReceipt>, AppError> {
    let Some((filename, content)) = req.required_fields() else {
        return Err(AppError::bad_request("filename & content required"));
    };

    let safe_name = sanitize_filename(filename);
    let payload = canonical_bytes(content, req.jsonl)?;
    let sha256 = sha256_hex(&payload);
    let size = payload.len();
    let key = object_key(&req.folder, &safe_name);

    state
        .storage
        .upload_object(&key, payload, CONTENT_TYPE_JSON)
        .await?;

    let url = state
        .storage
        .signed_download_url(&key, DOWNLOAD_URL_TTL)
        .await?;

    tracing::info!(key = %key, size_bytes = size, sha256 = %sha256, "export stored");

    Ok(Json(ExportReceipt {
        url,
        size,
        sha256,
        id: key,
    }))
}

/// Lowercase hex SHA-256 of the stored bytes.
fn sha256_hex(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

/// Key layout: `{folder}/{epoch_millis}_{sanitized_filename}`.
/// The folder prefix goes in verbatim; only the filename is sanitized.
fn object_key(folder: &str, safe_name: &str) -> String {
    format!("{}/{}_{}", folder, Utc::now().timestamp_millis(), safe_name)
}
