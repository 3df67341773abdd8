use crate::{
    OrcabusApi, Service,
    error::{OrcabusClientErr, check_status, decode},
};

/// the current state of an object tracked by the filemanager
#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct S3Object {
    pub s3_object_id: String,
    pub bucket: String,
    pub key: String,
}

impl OrcabusApi {
    /// find the live object at `bucket`/`key`, if the filemanager knows of one
    #[tracing::instrument(err, skip(self))]
    pub async fn get_s3_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<S3Object>, OrcabusClientErr> {
        let mut objects: Vec<S3Object> = self
            .get_all_pages(
                &self.url(Service::FileManager, "s3"),
                &[("bucket", bucket), ("key", key), ("currentState", "true")],
            )
            .await?;

        if objects.len() > 1 {
            tracing::warn!(count = objects.len(), "multiple current objects found, using the first");
        }

        Ok((!objects.is_empty()).then(|| objects.swap_remove(0)))
    }

    /// issue a presigned GET url for a tracked object
    #[tracing::instrument(err, skip(self))]
    pub async fn get_presigned_url(&self, s3_object_id: &str) -> Result<String, OrcabusClientErr> {
        let url = self.url(Service::FileManager, &format!("s3/presign/{s3_object_id}"));
        let response = self.client.get(&url).send().await?;
        decode(check_status(response).await?).await
    }

    /// Download the body behind a presigned url. The presigned url carries its own
    /// credentials, so this uses a plain client without the bearer header.
    #[tracing::instrument(err, skip(self, presigned_url))]
    pub async fn download_presigned(&self, presigned_url: &str) -> Result<Vec<u8>, OrcabusClientErr> {
        let response = reqwest::get(presigned_url).await?;
        let bytes = check_status(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
