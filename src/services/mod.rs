//! Service layer: the S3-backed storage client.

pub mod storage_service;
