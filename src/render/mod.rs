//! Rendering layer.
//!
//! Turns one image plane into a displayable raster, or one image into a
//! thumbnail, through the service's short-lived rendering and thumbnail
//! proxies.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             AssetRenderer               │
//! │  acquire → configure → render → release │
//! └────────┬───────────────────────┬────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────────┐
//! │ RenderingHandle │    │    RasterDecoder    │
//! │ (remote engine) │    │  (compressed bytes  │
//! │                 │    │   → DynamicImage)   │
//! └─────────────────┘    └─────────────────────┘
//! ```
//!
//! Handles are released on every exit path, including remote failures and
//! decode failures; that discipline lives in [`AssetRenderer`], not in its
//! callers.

mod decode;
mod renderer;

pub use decode::RasterDecoder;
pub use renderer::{AssetRenderer, RenderedPlane};
