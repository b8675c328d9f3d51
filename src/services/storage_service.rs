//! src/services/storage_service.rs
//!
//! StorageService: the S3 client wrapper behind the export endpoint. Uploads
//! canonical payload bytes and produces presigned download URLs. The client
//! is built entirely from explicit configuration; no ambient credential chain
//! is consulted.

use aws_sdk_s3::Client;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload of `{key}` failed: {message}")]
    UploadFailed { key: String, message: String },
    #[error("signing download url for `{key}` failed: {message}")]
    SignFailed { key: String, message: String },
    #[error("bucket `{bucket}` is unreachable: {message}")]
    BucketUnreachable { bucket: String, message: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// StorageService provides the two bucket operations the API needs:
/// - Upload a payload under a caller-derived key (overwrites on conflict)
/// - Presign a time-limited GET for that key
///
/// plus a HeadBucket reachability probe for the readiness endpoint.
#[derive(Clone)]
pub struct StorageService {
    client: Client,
    bucket: String,
}

impl StorageService {
    /// Build the S3 client from explicit configuration.
    ///
    /// Retries are disabled: a failed call surfaces to the caller immediately
    /// and the caller decides what to do with it.
    pub fn new(cfg: &AppConfig) -> Self {
        let credentials = Credentials::new(
            cfg.access_key_id.clone(),
            cfg.secret_access_key.clone(),
            None,
            None,
            "static",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled());

        // Path-style addressing for S3-compatible providers (MinIO, Spaces, R2).
        if let Some(endpoint) = &cfg.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: cfg.bucket.clone(),
        }
    }

    /// Upload `payload` under `key`, overwriting any previous object.
    pub async fn upload_object(
        &self,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        let size = payload.len() as u64;
        let body = ByteStream::from(Bytes::from(payload));
        let start = Instant::now();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "upload failed"
                );
                StorageError::UploadFailed {
                    key: key.to_string(),
                    message: e.to_string(),
                }
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "upload successful"
        );

        Ok(())
    }

    /// Presign a GET for `key` valid for `expires_in`.
    ///
    /// Signing happens locally, but the object stays in the bucket if this
    /// fails after a successful upload.
    pub async fn signed_download_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigning_config = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| StorageError::SignFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "presigning failed"
                );
                StorageError::SignFailed {
                    key: key.to_string(),
                    message: e.to_string(),
                }
            })?;

        Ok(presigned.uri().to_string())
    }

    /// HeadBucket reachability check for the readiness probe.
    pub async fn probe(&self) -> StorageResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StorageError::BucketUnreachable {
                bucket: self.bucket.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}
