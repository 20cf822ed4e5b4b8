//! Raster decoding of the compressed render stream.
//!
//! The rendering engine returns the plane as a compressed byte stream
//! (JPEG). Decoding it into a displayable raster is delegated to the `image`
//! codec; this module only maps its failures into the client's error
//! taxonomy.

use image::{DynamicImage, ImageReader};
use std::io::Cursor;

use crate::error::ClientError;

/// Decoder for the compressed byte stream produced by the rendering engine.
#[derive(Debug, Clone, Default)]
pub struct RasterDecoder {
    // Stateless; the struct leaves room for codec settings later.
}

impl RasterDecoder {
    pub fn new() -> Self {
        Self {}
    }

    /// Decode a compressed plane into a displayable raster.
    ///
    /// # Errors
    ///
    /// [`ClientError::DecodeFailed`] when the stream is not a decodable
    /// image.
    pub fn decode(&self, compressed: &[u8]) -> Result<DynamicImage, ClientError> {
        let reader = ImageReader::with_format(Cursor::new(compressed), image::ImageFormat::Jpeg);

        reader.decode().map_err(|e| ClientError::DecodeFailed {
            message: e.to_string(),
        })
    }

    /// Read the raster dimensions without decoding the full image.
    pub fn dimensions(&self, compressed: &[u8]) -> Result<(u32, u32), ClientError> {
        let reader = ImageReader::with_format(Cursor::new(compressed), image::ImageFormat::Jpeg);

        reader
            .into_dimensions()
            .map_err(|e| ClientError::DecodeFailed {
                message: e.to_string(),
            })
    }
}

// =============================================================================
// Tests
// =============================================================================
