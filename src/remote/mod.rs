//! Remote repository service boundary.
//!
//! This module defines everything the client knows about the remote service:
//! the record types that cross the boundary and the traits a service
//! implementation has to provide.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          RepositoryClient facade        │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │        RepositoryService trait          │
//! │  connect / listings / saves / handles   │
//! └────────┬───────────────────────┬────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────────┐
//! │ RenderingHandle │    │   ThumbnailHandle   │
//! │ (one pixel set, │    │  (one pixel set,    │
//! │  one operation) │    │   one operation)    │
//! └─────────────────┘    └─────────────────────┘
//! ```
//!
//! The handle traits model the service's stateful proxies: acquired at the
//! start of one render or thumbnail operation and released before it
//! returns, on every path.

mod model;
mod service;

pub use model::{
    AnnotationTarget, ChannelRecord, Credentials, DatasetRecord, FileAttachment, ImageRecord,
    MapAnnotation, NewObject, PersistedObject, PlaneSelection, ProjectRecord, SecurityContext,
    SessionHandle, MAP_ANNOTATION_NAMESPACE,
};
pub use service::{
    with_deadline, RenderingHandle, RepositoryService, ThumbnailHandle,
};
