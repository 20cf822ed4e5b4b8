//! The client facade.
//!
//! [`RepositoryClient`] composes the connection manager, hierarchy cache,
//! metadata reader, renderer, and annotation writer behind one object with a
//! single session and a single cache. All components share one service
//! instance and execute under the session's security context.
//!
//! # Usage
//!
//! ```ignore
//! use micrograph_client::{ClientConfig, PlaneSelection, RepositoryClient};
//!
//! let config = ClientConfig::new("images.example.org", "alice", "s3cret");
//! let mut client = RepositoryClient::new(service, config)?;
//!
//! client.connect().await?;
//!
//! let projects = client.load_project_hierarchy().await?;
//! for (project_id, name) in &projects {
//!     println!("{project_id}: {name}");
//!     for dataset in client.datasets(*project_id)?.values() {
//!         println!("  {}: {}", dataset.id, dataset.name);
//!     }
//! }
//!
//! let plane = client.render_image(3, 11, PlaneSelection::new(0, 0)).await?;
//! println!("rendered {}x{}", plane.width(), plane.height());
//!
//! client.disconnect().await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;

use crate::annotate::AnnotationWriter;
use crate::config::ClientConfig;
use crate::error::{ClientError, ConfigError};
use crate::hierarchy::{HierarchyCache, ProjectEntry};
use crate::metadata::{ImageSummary, MetadataReader};
use crate::remote::{
    AnnotationTarget, DatasetRecord, FileAttachment, MapAnnotation, PlaneSelection,
    RepositoryService,
};
use crate::render::{AssetRenderer, RenderedPlane};
use crate::session::ConnectionManager;

/// Session-scoped facade over a remote image repository service.
///
/// One facade instance holds at most one live session and one hierarchy
/// snapshot. The facade is not internally synchronized; share it across
/// tasks only behind external synchronization.
pub struct RepositoryClient<R: RepositoryService> {
    host: String,
    connection: ConnectionManager<R>,
    hierarchy: HierarchyCache<R>,
    metadata: MetadataReader<R>,
    renderer: AssetRenderer<R>,
    annotations: AnnotationWriter<R>,
    thumbnail_edge: u32,
}

impl<R: RepositoryService> RepositoryClient<R> {
    /// Build a client over a service implementation.
    ///
    /// Validates the configuration; no remote call happens until
    /// [`connect`](Self::connect).
    pub fn new(remote: R, config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let remote = Arc::new(remote);
        let timeout = config.call_timeout;

        Ok(Self {
            host: config.host.clone(),
            connection: ConnectionManager::new(Arc::clone(&remote), &config),
            hierarchy: HierarchyCache::new(Arc::clone(&remote), timeout),
            metadata: MetadataReader::new(Arc::clone(&remote), timeout),
            renderer: AssetRenderer::new(Arc::clone(&remote), timeout),
            annotations: AnnotationWriter::new(remote, timeout),
            thumbnail_edge: config.thumbnail_edge,
        })
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Establish the session. See [`ConnectionManager::connect`].
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        self.connection.connect().await
    }

    /// Release the session. See [`ConnectionManager::disconnect`].
    pub async fn disconnect(&mut self) -> Result<(), ClientError> {
        self.connection.disconnect().await
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Server-assigned id of the live session, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.connection.session_id()
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// Fetch the full project hierarchy and replace the cache with it.
    ///
    /// Returns the project id → name mapping. Must be called before the
    /// cached accessors [`datasets`](Self::datasets) and
    /// [`project_info`](Self::project_info).
    pub async fn load_project_hierarchy(&mut self) -> Result<HashMap<i64, String>, ClientError> {
        let ctx = self.connection.context()?;
        self.hierarchy.load(ctx).await
    }

    /// Cached datasets of one project, keyed by dataset id.
    pub fn datasets(&self, project_id: i64) -> Result<HashMap<i64, DatasetRecord>, ClientError> {
        self.hierarchy.datasets(project_id)
    }

    /// Cached name and description of one project.
    pub fn project_info(&self, project_id: i64) -> Result<ProjectEntry, ClientError> {
        self.hierarchy.project_info(project_id)
    }

    /// Drop the hierarchy snapshot; accessors fail until the next load.
    pub fn invalidate_hierarchy(&mut self) {
        self.hierarchy.invalidate()
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Id → name mapping of all images in a dataset.
    pub async fn images(&self, dataset_id: i64) -> Result<HashMap<i64, String>, ClientError> {
        let ctx = self.connection.context()?;
        self.metadata.images(ctx, dataset_id).await
    }

    /// Name, description, pixel geometry, and channel names of one image.
    pub async fn image_info(
        &self,
        dataset_id: i64,
        image_id: i64,
    ) -> Result<ImageSummary, ClientError> {
        let ctx = self.connection.context()?;
        self.metadata.image_info(ctx, dataset_id, image_id).await
    }

    /// Key/value annotations attached to a project, dataset, or image.
    pub async fn map_annotations(
        &self,
        target: AnnotationTarget,
    ) -> Result<Vec<MapAnnotation>, ClientError> {
        let ctx = self.connection.context()?;
        self.metadata.map_annotations(ctx, target).await
    }

    /// File attachments annotated onto an image.
    pub async fn file_annotations(
        &self,
        image_id: i64,
    ) -> Result<Vec<FileAttachment>, ClientError> {
        let ctx = self.connection.context()?;
        self.metadata.file_annotations(ctx, image_id).await
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render one plane of an image at full resolution.
    ///
    /// The image is resolved within the dataset's image list; a missing
    /// image is [`ClientError::NotFound`].
    pub async fn render_image(
        &self,
        dataset_id: i64,
        image_id: i64,
        plane: PlaneSelection,
    ) -> Result<RenderedPlane, ClientError> {
        let ctx = self.connection.context()?;
        let image = self.metadata.find_image(ctx, dataset_id, image_id).await?;
        self.renderer.render_full(ctx, &image, plane).await
    }

    /// Square thumbnail of an image at the configured default edge.
    pub async fn thumbnail(&self, dataset_id: i64, image_id: i64) -> Result<Bytes, ClientError> {
        self.thumbnail_with_edge(dataset_id, image_id, self.thumbnail_edge)
            .await
    }

    /// Square thumbnail of an image at an explicit edge length.
    pub async fn thumbnail_with_edge(
        &self,
        dataset_id: i64,
        image_id: i64,
        edge: u32,
    ) -> Result<Bytes, ClientError> {
        let ctx = self.connection.context()?;
        let image = self.metadata.find_image(ctx, dataset_id, image_id).await?;
        self.renderer.thumbnail(ctx, &image, edge).await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Attach a key/value annotation to a project.
    pub async fn annotate_project(
        &self,
        project_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), ClientError> {
        let ctx = self.connection.context()?;
        self.annotations
            .annotate_project(ctx, project_id, key, value)
            .await
    }

    /// Attach a key/value annotation to a dataset.
    pub async fn annotate_dataset(
        &self,
        dataset_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), ClientError> {
        let ctx = self.connection.context()?;
        self.annotations
            .annotate_dataset(ctx, dataset_id, key, value)
            .await
    }

    /// Create a project and return its new id.
    ///
    /// The hierarchy cache is not updated; reload it to see the new project.
    pub async fn create_project(&self, name: &str, description: &str) -> Result<i64, ClientError> {
        let ctx = self.connection.context()?;
        self.annotations.create_project(ctx, name, description).await
    }

    /// Create a dataset under an existing project and return its new id.
    pub async fn create_dataset(
        &self,
        project_id: i64,
        name: &str,
        description: &str,
    ) -> Result<i64, ClientError> {
        let ctx = self.connection.context()?;
        self.annotations
            .create_dataset(ctx, project_id, name, description)
            .await
    }

    // =========================================================================
    // Download Links
    // =========================================================================

    /// Download URL for an image's original file.
    ///
    /// Only images that advertise a stored format can be downloaded; others
    /// fail with [`ClientError::DownloadUnavailable`].
    pub async fn image_download_link(
        &self,
        dataset_id: i64,
        image_id: i64,
    ) -> Result<String, ClientError> {
        let ctx = self.connection.context()?;
        let image = self.metadata.find_image(ctx, dataset_id, image_id).await?;

        if image.format.is_none() {
            return Err(ClientError::DownloadUnavailable { image_id });
        }

        Ok(format!(
            "{}/webgateway/archived_files/download/{}/",
            self.host, image_id
        ))
    }

    /// Download URL for a file annotation.
    ///
    /// No remote check is performed; the service decides whether the id
    /// resolves to a downloadable file.
    pub fn annotation_download_link(&self, annotation_id: i64) -> String {
        format!("{}/webclient/annotation/{}", self.host, annotation_id)
    }
}
