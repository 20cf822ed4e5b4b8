//! The repository service boundary.
//!
//! Everything the client needs from the remote service is expressed through
//! [`RepositoryService`] and the two short-lived proxy traits,
//! [`RenderingHandle`] and [`ThumbnailHandle`]. The wire protocol behind the
//! trait is out of scope for this crate; production implementations wrap the
//! real service client, and tests substitute instrumented fakes.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::RemoteError;

use super::model::{
    AnnotationTarget, ChannelRecord, Credentials, FileAttachment, ImageRecord, MapAnnotation,
    NewObject, PersistedObject, PlaneSelection, ProjectRecord, SecurityContext, SessionHandle,
};

/// Abstract client API of the remote image repository service.
///
/// All operations are blocking remote calls from the caller's point of view.
/// Implementations must be thread-safe; the client shares one instance across
/// its components.
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// Rendering-engine proxy type handed out by [`acquire_rendering`].
    ///
    /// [`acquire_rendering`]: RepositoryService::acquire_rendering
    type Rendering: RenderingHandle;

    /// Thumbnail-store proxy type handed out by [`acquire_thumbnails`].
    ///
    /// [`acquire_thumbnails`]: RepositoryService::acquire_thumbnails
    type Thumbnails: ThumbnailHandle;

    /// Establish an authenticated session.
    async fn connect(
        &self,
        host: &str,
        port: u16,
        credentials: &Credentials,
    ) -> Result<SessionHandle, RemoteError>;

    /// Release a session previously returned by [`connect`].
    ///
    /// [`connect`]: RepositoryService::connect
    async fn disconnect(&self, session: &SessionHandle) -> Result<(), RemoteError>;

    /// All projects visible to the session, each carrying its datasets.
    async fn list_projects(&self, ctx: &SecurityContext) -> Result<Vec<ProjectRecord>, RemoteError>;

    /// All images contained in a dataset, in service order.
    async fn list_images(
        &self,
        ctx: &SecurityContext,
        dataset_id: i64,
    ) -> Result<Vec<ImageRecord>, RemoteError>;

    /// Channel metadata for an image, in channel order.
    async fn channel_metadata(
        &self,
        ctx: &SecurityContext,
        image_id: i64,
    ) -> Result<Vec<ChannelRecord>, RemoteError>;

    /// Key/value annotations attached to a project, dataset, or image.
    async fn map_annotations(
        &self,
        ctx: &SecurityContext,
        target: AnnotationTarget,
    ) -> Result<Vec<MapAnnotation>, RemoteError>;

    /// File attachments annotated onto an image.
    async fn file_annotations(
        &self,
        ctx: &SecurityContext,
        image_id: i64,
    ) -> Result<Vec<FileAttachment>, RemoteError>;

    /// Acquire a rendering-engine proxy bound to one pixel set.
    ///
    /// The returned handle holds remote state and must be released via
    /// [`RenderingHandle::release`] when the operation is over.
    async fn acquire_rendering(
        &self,
        ctx: &SecurityContext,
        pixels_id: i64,
    ) -> Result<Self::Rendering, RemoteError>;

    /// Acquire a thumbnail-store proxy bound to one pixel set.
    async fn acquire_thumbnails(
        &self,
        ctx: &SecurityContext,
        pixels_id: i64,
    ) -> Result<Self::Thumbnails, RemoteError>;

    /// Persist a new object and return what the service actually saved.
    async fn save_object(
        &self,
        ctx: &SecurityContext,
        object: NewObject,
    ) -> Result<PersistedObject, RemoteError>;

    /// Attach a key/value annotation to the referenced entity.
    async fn attach_annotation(
        &self,
        ctx: &SecurityContext,
        annotation: MapAnnotation,
        target: AnnotationTarget,
    ) -> Result<(), RemoteError>;
}

/// Short-lived proxy to the service's rendering engine for one pixel set.
///
/// `release(self)` consumes the handle, so a caller cannot release twice or
/// keep using a released engine.
#[async_trait]
pub trait RenderingHandle: Send {
    /// Whether rendering settings already exist for the pixel set.
    async fn has_settings(&mut self) -> Result<bool, RemoteError>;

    /// Reset the pixel set to the service's default rendering settings.
    async fn reset_default_settings(&mut self) -> Result<(), RemoteError>;

    /// Load the engine state; must be called before rendering.
    async fn load(&mut self) -> Result<(), RemoteError>;

    /// Toggle a channel's contribution to the rendered output.
    async fn set_channel_active(&mut self, channel: u32, active: bool) -> Result<(), RemoteError>;

    /// Render the plane as an uncompressed packed-int buffer.
    async fn render_packed(&mut self, plane: PlaneSelection) -> Result<Vec<u32>, RemoteError>;

    /// Render the plane as a compressed byte stream.
    async fn render_compressed(&mut self, plane: PlaneSelection) -> Result<Bytes, RemoteError>;

    /// Release the engine's remote state.
    async fn release(self) -> Result<(), RemoteError>;
}

/// Short-lived proxy to the service's thumbnail store for one pixel set.
#[async_trait]
pub trait ThumbnailHandle: Send {
    /// Fetch a thumbnail scaled to `width` by `height` pixels.
    async fn thumbnail(&mut self, width: u32, height: u32) -> Result<Bytes, RemoteError>;

    /// Release the store's remote state.
    async fn release(self) -> Result<(), RemoteError>;
}

/// Run a remote call under a deadline.
///
/// Network calls to the service can hang indefinitely; every call the client
/// issues goes through here so a stuck call surfaces as
/// [`RemoteError::TimedOut`] instead of blocking the caller forever.
pub async fn with_deadline<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, RemoteError>>,
) -> Result<T, RemoteError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(RemoteError::TimedOut { limit }),
    }
}
