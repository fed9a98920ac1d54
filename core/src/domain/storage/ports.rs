use std::future::Future;

use bytes::Bytes;

use crate::domain::common::entities::app_errors::CoreError;

/// Blob storage holding recipe images (MinIO/S3).
pub trait ObjectStoragePort: Send + Sync {
    /// Stores `payload` under `object_key`, overwriting any existing object.
    fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Publicly reachable URL of the object stored under `object_key`.
    fn public_url(&self, object_key: &str) -> String;
}
