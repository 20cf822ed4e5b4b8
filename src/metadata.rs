//! Metadata queries against the repository service.
//!
//! [`MetadataReader`] is stateless: every call goes to the service and the
//! results are not cached (images change more often than the project
//! hierarchy). A remote failure is always a typed error, never an empty
//! result.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::remote::{
    with_deadline, AnnotationTarget, FileAttachment, ImageRecord, MapAnnotation,
    RepositoryService, SecurityContext,
};

/// Everything the client reports about one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
    pub timepoints: u32,
    /// Channel names in channel order.
    pub channel_names: Vec<String>,
}

impl ImageSummary {
    /// Pixel geometry as `"X x Y x Z"`.
    pub fn dimension_summary(&self) -> String {
        format!("{} x {} x {}", self.size_x, self.size_y, self.size_z)
    }

    /// Channel names joined with `", "`, no trailing separator.
    pub fn channel_summary(&self) -> String {
        self.channel_names.join(", ")
    }
}

/// Stateless reader for project, dataset, image, and annotation metadata.
pub struct MetadataReader<R: RepositoryService> {
    remote: Arc<R>,
    call_timeout: Duration,
}

impl<R: RepositoryService> MetadataReader<R> {
    pub fn new(remote: Arc<R>, call_timeout: Duration) -> Self {
        Self {
            remote,
            call_timeout,
        }
    }

    /// Id → name mapping of all images in a dataset.
    pub async fn images(
        &self,
        ctx: SecurityContext,
        dataset_id: i64,
    ) -> Result<HashMap<i64, String>, ClientError> {
        let images = self.list_images(ctx, dataset_id).await?;
        Ok(images
            .into_iter()
            .map(|image| (image.id, image.name))
            .collect())
    }

    /// Resolve one image within a dataset's image list.
    ///
    /// The first record with a matching id wins; a missing image is an
    /// explicit [`ClientError::NotFound`].
    pub async fn find_image(
        &self,
        ctx: SecurityContext,
        dataset_id: i64,
        image_id: i64,
    ) -> Result<ImageRecord, ClientError> {
        let images = self.list_images(ctx, dataset_id).await?;
        images
            .into_iter()
            .find(|image| image.id == image_id)
            .ok_or(ClientError::NotFound {
                what: "image",
                id: image_id,
            })
    }

    /// Name, description, pixel geometry, and channel names of one image.
    pub async fn image_info(
        &self,
        ctx: SecurityContext,
        dataset_id: i64,
        image_id: i64,
    ) -> Result<ImageSummary, ClientError> {
        let image = self.find_image(ctx, dataset_id, image_id).await?;

        let channels = with_deadline(self.call_timeout, self.remote.channel_metadata(&ctx, image.id))
            .await
            .map_err(|source| ClientError::FetchFailed { source })?;

        Ok(ImageSummary {
            id: image.id,
            name: image.name,
            description: image.description,
            size_x: image.size_x,
            size_y: image.size_y,
            size_z: image.size_z,
            timepoints: image.size_t,
            channel_names: channels.into_iter().map(|channel| channel.name).collect(),
        })
    }

    /// Key/value annotations attached to a project, dataset, or image.
    pub async fn map_annotations(
        &self,
        ctx: SecurityContext,
        target: AnnotationTarget,
    ) -> Result<Vec<MapAnnotation>, ClientError> {
        with_deadline(self.call_timeout, self.remote.map_annotations(&ctx, target))
            .await
            .map_err(|source| ClientError::FetchFailed { source })
    }

    /// File attachments annotated onto an image.
    pub async fn file_annotations(
        &self,
        ctx: SecurityContext,
        image_id: i64,
    ) -> Result<Vec<FileAttachment>, ClientError> {
        with_deadline(
            self.call_timeout,
            self.remote.file_annotations(&ctx, image_id),
        )
        .await
        .map_err(|source| ClientError::FetchFailed { source })
    }

    async fn list_images(
        &self,
        ctx: SecurityContext,
        dataset_id: i64,
    ) -> Result<Vec<ImageRecord>, ClientError> {
        with_deadline(self.call_timeout, self.remote.list_images(&ctx, dataset_id))
            .await
            .map_err(|source| ClientError::FetchFailed { source })
    }
}

// =============================================================================
// Tests
// =============================================================================
