//! Writes: annotations and new hierarchy objects.
//!
//! [`AnnotationWriter`] attaches key/value annotations and creates projects
//! and datasets. Every write is a single atomic remote object, so there is
//! no partial state to roll back; a failed write surfaces as
//! [`ClientError::WriteFailed`] with the cause attached.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{ClientError, RemoteError};
use crate::remote::{
    with_deadline, AnnotationTarget, MapAnnotation, NewObject, PersistedObject, RepositoryService,
    SecurityContext,
};

/// Writer for annotations and new projects/datasets.
pub struct AnnotationWriter<R: RepositoryService> {
    remote: Arc<R>,
    call_timeout: Duration,
}

impl<R: RepositoryService> AnnotationWriter<R> {
    pub fn new(remote: Arc<R>, call_timeout: Duration) -> Self {
        Self {
            remote,
            call_timeout,
        }
    }

    /// Attach a key/value annotation to a project.
    pub async fn annotate_project(
        &self,
        ctx: SecurityContext,
        project_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), ClientError> {
        self.attach(ctx, AnnotationTarget::Project(project_id), key, value)
            .await
    }

    /// Attach a key/value annotation to a dataset.
    pub async fn annotate_dataset(
        &self,
        ctx: SecurityContext,
        dataset_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), ClientError> {
        self.attach(ctx, AnnotationTarget::Dataset(dataset_id), key, value)
            .await
    }

    /// Create a project and return its new id.
    pub async fn create_project(
        &self,
        ctx: SecurityContext,
        name: &str,
        description: &str,
    ) -> Result<i64, ClientError> {
        let object = NewObject::Project {
            name: name.to_string(),
            description: description.to_string(),
        };

        match self.save(ctx, object).await? {
            PersistedObject::Project { id } => {
                debug!(project = id, "project created");
                Ok(id)
            }
            other => Err(unexpected_save_result("project", &other)),
        }
    }

    /// Create a dataset under an existing project and return its new id.
    ///
    /// The service persists the project → dataset link and reports the saved
    /// link back; the dataset id is taken from the link's child reference.
    pub async fn create_dataset(
        &self,
        ctx: SecurityContext,
        project_id: i64,
        name: &str,
        description: &str,
    ) -> Result<i64, ClientError> {
        let object = NewObject::DatasetLink {
            project_id,
            name: name.to_string(),
            description: description.to_string(),
        };

        match self.save(ctx, object).await? {
            PersistedObject::DatasetLink { dataset_id, .. } => {
                debug!(project = project_id, dataset = dataset_id, "dataset created");
                Ok(dataset_id)
            }
            other => Err(unexpected_save_result("dataset link", &other)),
        }
    }

    async fn attach(
        &self,
        ctx: SecurityContext,
        target: AnnotationTarget,
        key: &str,
        value: &str,
    ) -> Result<(), ClientError> {
        let annotation = MapAnnotation::client_created(key, value);

        with_deadline(
            self.call_timeout,
            self.remote.attach_annotation(&ctx, annotation, target),
        )
        .await
        .map_err(|source| ClientError::WriteFailed { source })
    }

    async fn save(
        &self,
        ctx: SecurityContext,
        object: NewObject,
    ) -> Result<PersistedObject, ClientError> {
        with_deadline(self.call_timeout, self.remote.save_object(&ctx, object))
            .await
            .map_err(|source| ClientError::WriteFailed { source })
    }
}

fn unexpected_save_result(expected: &str, got: &PersistedObject) -> ClientError {
    ClientError::WriteFailed {
        source: RemoteError::Service(format!(
            "save returned an unexpected object: expected a {expected}, got {got:?}"
        )),
    }
}
