//! # Micrograph Client
//!
//! A session-scoped client for browsing, rendering, and annotating images in
//! a remote microscopy image repository.
//!
//! The crate gives an embedding application (typically a web UI) a single
//! facade over the repository service: it establishes one authenticated
//! session, loads the project → dataset hierarchy into an in-memory cache,
//! answers per-image metadata queries, renders planes and thumbnails through
//! the service's short-lived rendering proxies, and writes key/value
//! annotations back. The service's wire protocol is out of scope; it is
//! modeled by the [`remote::RepositoryService`] trait.
//!
//! ## Features
//!
//! - **Explicit session lifecycle**: one session per client, opened and
//!   closed only by the caller; no read operation touches it
//! - **Hierarchy cache**: one full fetch, atomic replace-or-keep on reload,
//!   typed errors before the first load
//! - **Deterministic handle release**: rendering engines and thumbnail
//!   stores are released exactly once on every exit path
//! - **Typed failures**: "found nothing" and "call failed" never share a
//!   return shape; every remote failure keeps its cause
//! - **Deadlines**: every remote call runs under a configurable timeout
//!
//! ## Architecture
//!
//! - [`config`] - connection parameters and validation
//! - [`error`] - error taxonomy
//! - [`remote`] - the abstract service boundary: records, service trait,
//!   rendering/thumbnail proxy traits
//! - [`session`] - connection manager owning the single session
//! - [`hierarchy`] - project/dataset cache
//! - [`metadata`] - image and annotation queries
//! - [`render`] - plane rendering and thumbnails with scoped handle release
//! - [`annotate`] - annotation and project/dataset writes
//! - [`client`] - the facade composing all of the above
//!
//! ## Example
//!
//! ```ignore
//! use micrograph_client::{ClientConfig, PlaneSelection, RepositoryClient};
//!
//! let config = ClientConfig::new("images.example.org", "alice", "s3cret");
//! let mut client = RepositoryClient::new(service, config)?;
//!
//! client.connect().await?;
//! let projects = client.load_project_hierarchy().await?;
//! let thumbnail = client.thumbnail(3, 11).await?;
//! client.disconnect().await?;
//! ```

pub mod annotate;
pub mod client;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod metadata;
pub mod remote;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use annotate::AnnotationWriter;
pub use client::RepositoryClient;
pub use config::{
    ClientConfig, DEFAULT_CALL_TIMEOUT, DEFAULT_PORT, DEFAULT_THUMBNAIL_EDGE,
};
pub use error::{ClientError, ConfigError, RemoteError};
pub use hierarchy::{HierarchyCache, ProjectEntry};
pub use metadata::{ImageSummary, MetadataReader};
pub use remote::{
    AnnotationTarget, ChannelRecord, Credentials, DatasetRecord, FileAttachment, ImageRecord,
    MapAnnotation, NewObject, PersistedObject, PlaneSelection, ProjectRecord, RenderingHandle,
    RepositoryService, SecurityContext, SessionHandle, ThumbnailHandle, MAP_ANNOTATION_NAMESPACE,
};
pub use render::{AssetRenderer, RasterDecoder, RenderedPlane};
pub use session::ConnectionManager;
