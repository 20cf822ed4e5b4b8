//! Full-resolution rendering and thumbnails.
//!
//! [`AssetRenderer`] drives the service's stateful proxies through one
//! render or thumbnail operation. The proxies hold remote resources, so the
//! one hard invariant here is deterministic release: a handle acquired by an
//! operation is released exactly once before the operation returns, whether
//! the render succeeded, the remote call failed, or decoding blew up.
//!
//! A failure to release after an otherwise successful operation is logged
//! and does not mask the result; the render itself is what the caller asked
//! for.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use crate::error::{ClientError, RemoteError};
use crate::remote::{
    with_deadline, ImageRecord, PlaneSelection, RenderingHandle, RepositoryService,
    SecurityContext, ThumbnailHandle,
};

use super::decode::RasterDecoder;

/// One rendered plane: the displayable raster plus the uncompressed
/// packed-int buffer the engine produced alongside it.
#[derive(Debug)]
pub struct RenderedPlane {
    /// Decoded, displayable raster.
    pub raster: DynamicImage,

    /// Uncompressed packed-int pixel buffer for the same plane.
    pub packed: Vec<u32>,
}

impl RenderedPlane {
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

/// Renders full planes and thumbnails through short-lived service handles.
pub struct AssetRenderer<R: RepositoryService> {
    remote: Arc<R>,
    call_timeout: Duration,
    decoder: RasterDecoder,
}

impl<R: RepositoryService> AssetRenderer<R> {
    pub fn new(remote: Arc<R>, call_timeout: Duration) -> Self {
        Self {
            remote,
            call_timeout,
            decoder: RasterDecoder::new(),
        }
    }

    /// Render one plane of an image at full resolution.
    ///
    /// Acquires a rendering engine for the image's pixel set, resets to
    /// default settings when none exist yet, deactivates channel 0 for the
    /// baseline rendering, renders the plane both packed and compressed,
    /// releases the engine, and decodes the compressed stream.
    ///
    /// # Errors
    ///
    /// [`ClientError::RenderFailed`] for engine failures,
    /// [`ClientError::DecodeFailed`] when the compressed stream is not
    /// decodable. Neither is retried; the caller may retry the whole call.
    pub async fn render_full(
        &self,
        ctx: SecurityContext,
        image: &ImageRecord,
        plane: PlaneSelection,
    ) -> Result<RenderedPlane, ClientError> {
        let mut engine = with_deadline(
            self.call_timeout,
            self.remote.acquire_rendering(&ctx, image.pixels_id),
        )
        .await
        .map_err(|source| ClientError::RenderFailed { source })?;

        let outcome = self.drive_engine(&mut engine, plane).await;

        // Release on every path; the engine must not outlive this call.
        if let Err(error) = with_deadline(self.call_timeout, engine.release()).await {
            if outcome.is_ok() {
                warn!(
                    image = image.id,
                    error = %error,
                    "rendering engine release failed after successful render"
                );
            } else {
                debug!(image = image.id, error = %error, "rendering engine release failed");
            }
        }

        let (packed, compressed) = outcome.map_err(|source| ClientError::RenderFailed { source })?;
        let raster = self.decoder.decode(&compressed)?;

        Ok(RenderedPlane { raster, packed })
    }

    /// Fetch a square thumbnail of `edge` by `edge` pixels.
    ///
    /// The thumbnail store is bound to the image's pixel set and released on
    /// every path, exactly like the rendering engine.
    pub async fn thumbnail(
        &self,
        ctx: SecurityContext,
        image: &ImageRecord,
        edge: u32,
    ) -> Result<Bytes, ClientError> {
        if edge == 0 {
            return Err(ClientError::InvalidThumbnailEdge { edge });
        }

        let mut store = with_deadline(
            self.call_timeout,
            self.remote.acquire_thumbnails(&ctx, image.pixels_id),
        )
        .await
        .map_err(|source| ClientError::RenderFailed { source })?;

        let outcome = with_deadline(self.call_timeout, store.thumbnail(edge, edge)).await;

        if let Err(error) = with_deadline(self.call_timeout, store.release()).await {
            if outcome.is_ok() {
                warn!(
                    image = image.id,
                    error = %error,
                    "thumbnail store release failed after successful fetch"
                );
            } else {
                debug!(image = image.id, error = %error, "thumbnail store release failed");
            }
        }

        outcome.map_err(|source| ClientError::RenderFailed { source })
    }

    async fn drive_engine(
        &self,
        engine: &mut R::Rendering,
        plane: PlaneSelection,
    ) -> Result<(Vec<u32>, Bytes), RemoteError> {
        let t = self.call_timeout;

        if !with_deadline(t, engine.has_settings()).await? {
            with_deadline(t, engine.reset_default_settings()).await?;
        }
        with_deadline(t, engine.load()).await?;

        // Channel 0 is switched off for the baseline rendering.
        with_deadline(t, engine.set_channel_active(0, false)).await?;

        let packed = with_deadline(t, engine.render_packed(plane)).await?;
        let compressed = with_deadline(t, engine.render_compressed(plane)).await?;

        Ok((packed, compressed))
    }
}
