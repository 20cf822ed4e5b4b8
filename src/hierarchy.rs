//! Project/dataset hierarchy cache.
//!
//! [`HierarchyCache`] holds the result of one full hierarchy fetch in memory
//! so browsing calls do not hit the service again. The cache is an explicit
//! state machine: until [`HierarchyCache::load`] succeeds it is `Unloaded`
//! and every accessor fails with a typed error rather than serving nothing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::ClientError;
use crate::remote::{with_deadline, DatasetRecord, RepositoryService, SecurityContext};

/// Name and description of a cached project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
}

enum CacheState {
    Unloaded,
    Loaded(LoadedHierarchy),
}

struct LoadedHierarchy {
    projects: HashMap<i64, ProjectEntry>,
    datasets: HashMap<i64, Vec<DatasetRecord>>,
}

/// In-memory snapshot of the project → dataset hierarchy.
///
/// A reload fully replaces the previous snapshot; a failed reload keeps it.
/// The cache never partially reflects a fetch that went wrong.
pub struct HierarchyCache<R: RepositoryService> {
    remote: Arc<R>,
    call_timeout: Duration,
    state: CacheState,
}

impl<R: RepositoryService> HierarchyCache<R> {
    pub fn new(remote: Arc<R>, call_timeout: Duration) -> Self {
        Self {
            remote,
            call_timeout,
            state: CacheState::Unloaded,
        }
    }

    /// Fetch the full hierarchy and replace the cache with it.
    ///
    /// Returns the project id → name mapping of the new snapshot. On a
    /// failed fetch the previous snapshot (or the `Unloaded` state) is kept
    /// untouched and the error surfaces as [`ClientError::FetchFailed`].
    pub async fn load(&mut self, ctx: SecurityContext) -> Result<HashMap<i64, String>, ClientError> {
        let records = with_deadline(self.call_timeout, self.remote.list_projects(&ctx))
            .await
            .map_err(|source| ClientError::FetchFailed { source })?;

        let mut names = HashMap::with_capacity(records.len());
        let mut projects = HashMap::with_capacity(records.len());
        let mut datasets = HashMap::with_capacity(records.len());

        for record in records {
            names.insert(record.id, record.name.clone());
            projects.insert(
                record.id,
                ProjectEntry {
                    name: record.name,
                    description: record.description,
                },
            );
            datasets.insert(record.id, record.datasets);
        }

        debug!(projects = names.len(), "hierarchy loaded");
        self.state = CacheState::Loaded(LoadedHierarchy { projects, datasets });
        Ok(names)
    }

    /// The cached datasets of one project, keyed by dataset id.
    ///
    /// Fails with [`ClientError::UnknownProject`] when the cache has never
    /// been loaded or the project was not part of the last load.
    pub fn datasets(&self, project_id: i64) -> Result<HashMap<i64, DatasetRecord>, ClientError> {
        let datasets = self
            .loaded()
            .and_then(|hierarchy| hierarchy.datasets.get(&project_id))
            .ok_or(ClientError::UnknownProject { project_id })?;

        Ok(datasets
            .iter()
            .map(|dataset| (dataset.id, dataset.clone()))
            .collect())
    }

    /// Name and description of one cached project.
    pub fn project_info(&self, project_id: i64) -> Result<ProjectEntry, ClientError> {
        self.loaded()
            .and_then(|hierarchy| hierarchy.projects.get(&project_id))
            .cloned()
            .ok_or(ClientError::UnknownProject { project_id })
    }

    /// Project id → name mapping of the current snapshot, if loaded.
    pub fn project_names(&self) -> Option<HashMap<i64, String>> {
        self.loaded().map(|hierarchy| {
            hierarchy
                .projects
                .iter()
                .map(|(id, entry)| (*id, entry.name.clone()))
                .collect()
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded().is_some()
    }

    /// Drop the snapshot and return to the `Unloaded` state.
    pub fn invalidate(&mut self) {
        self.state = CacheState::Unloaded;
    }

    fn loaded(&self) -> Option<&LoadedHierarchy> {
        match &self.state {
            CacheState::Loaded(hierarchy) => Some(hierarchy),
            CacheState::Unloaded => None,
        }
    }
}
