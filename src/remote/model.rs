//! Data carried across the repository service boundary.
//!
//! These records are immutable snapshots of remote state: they are
//! materialized when fetched and are not kept in sync with the service
//! afterwards. All of them serialize, so an embedding application can pass
//! them straight through to its own consumers.

use serde::{Deserialize, Serialize};

/// Namespace attached to every map annotation written by this client.
///
/// The service treats annotations in this namespace as user-editable.
pub const MAP_ANNOTATION_NAMESPACE: &str = "client-created";

// =============================================================================
// Session
// =============================================================================

/// Login credentials presented to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Handle to an established session, returned by a successful connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    /// Server-assigned session identifier.
    pub session_id: String,

    /// Group the authenticated account belongs to; remote operations execute
    /// under this group's permission scope.
    pub group_id: i64,
}

/// Permission scope under which remote operations execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityContext {
    pub group_id: i64,
}

// =============================================================================
// Hierarchy Records
// =============================================================================

/// A project as returned by a full hierarchy fetch, carrying its datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub datasets: Vec<DatasetRecord>,
}

/// A dataset owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Id of the owning project.
    pub project_id: i64,
}

/// An image within a dataset, with the geometry of its pixel set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    pub name: String,
    pub description: String,

    /// Id of the underlying pixel set; rendering and thumbnail handles are
    /// bound to this, not to the image id.
    pub pixels_id: i64,

    /// Pixels along the X axis.
    pub size_x: u32,
    /// Pixels along the Y axis.
    pub size_y: u32,
    /// Number of z-sections.
    pub size_z: u32,
    /// Number of timepoints.
    pub size_t: u32,
    /// Number of channels.
    pub size_c: u32,

    /// Stored file format, if the service knows one. Images without a format
    /// cannot be downloaded in their original form.
    pub format: Option<String>,
}

/// A channel's metadata, ordered as the service reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub name: String,
}

// =============================================================================
// Rendering
// =============================================================================

/// A single 2D plane of a multi-dimensional pixel set, selected by z-section
/// and timepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneSelection {
    /// Z-section index, 0 for flat images.
    pub z: u32,
    /// Timepoint index, 0 for still images.
    pub t: u32,
}

impl PlaneSelection {
    pub fn new(z: u32, t: u32) -> Self {
        Self { z, t }
    }
}

// =============================================================================
// Annotations
// =============================================================================

/// A single key/value annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapAnnotation {
    pub key: String,
    pub value: String,
    pub namespace: String,
}

impl MapAnnotation {
    /// Build an annotation in the [`MAP_ANNOTATION_NAMESPACE`] namespace.
    pub fn client_created(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            namespace: MAP_ANNOTATION_NAMESPACE.to_string(),
        }
    }
}

/// A file attached to an image as an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: i64,
    pub file_name: String,
    pub size: u64,
}

/// Reference to the entity an annotation is attached to, by id only; the
/// service enforces existence when the write is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationTarget {
    Project(i64),
    Dataset(i64),
    Image(i64),
}

// =============================================================================
// Writes
// =============================================================================

/// A new object to persist on the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewObject {
    Project {
        name: String,
        description: String,
    },
    /// A new dataset together with the link binding it to its parent
    /// project. The service persists the link and the dataset in one step.
    DatasetLink {
        project_id: i64,
        name: String,
        description: String,
    },
}

/// The object the service reports back after a save.
///
/// For a dataset the service returns the persisted *link*, not the dataset;
/// the new dataset id is the link's child reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedObject {
    Project { id: i64 },
    DatasetLink { link_id: i64, dataset_id: i64 },
}
