use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
};
use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{ObjectStorageConfig, entities::app_errors::CoreError},
    storage::ports::ObjectStoragePort,
};

#[derive(Clone)]
pub struct MinioObjectStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl MinioObjectStorage {
    pub fn new(config: ObjectStorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "recipebox",
        );

        let endpoint = config.endpoint.trim_end_matches('/').to_string();

        tracing::info!(
            endpoint = %endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing MinIO client"
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&endpoint)
            .force_path_style(true)
            .build();

        let public_base_url = config
            .public_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(endpoint);

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket,
            public_base_url,
        }
    }
}

/// Percent-encodes each path segment, keeping the separators.
fn encode_key(object_key: &str) -> String {
    object_key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<String>>()
        .join("/")
}

fn public_object_url(base_url: &str, bucket: &str, object_key: &str) -> String {
    format!("{}/{}/{}", base_url, bucket, encode_key(object_key))
}

impl ObjectStoragePort for MinioObjectStorage {
    #[instrument(skip(self, payload))]
    async fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), CoreError> {
        let payload_size = payload.len();

        tracing::info!(
            bucket = %self.bucket,
            object_key = %object_key,
            size = payload_size,
            content_type = %content_type,
            "Uploading object to storage"
        );

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key)
            .content_type(content_type)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    object_key = %object_key,
                    payload_size = payload_size,
                    "Failed to upload object"
                );
                CoreError::Storage("could not upload image".to_string())
            })?;

        tracing::info!(object_key = %object_key, "Object uploaded successfully");

        Ok(())
    }

    fn public_url(&self, object_key: &str) -> String {
        public_object_url(&self.public_base_url, &self.bucket, object_key)
    }
}
