//! Active-dataset workspace
//!
//! Pairs an injected [`DatasetRepository`] with the id of the dataset
//! currently on display. The live feed shares a workspace behind a lock and
//! resolves the active id on every tick.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lumina_io::ParsedGrid;

use crate::dataset::{Dataset, DatasetId};
use crate::error::{DatasetError, DatasetResult};
use crate::repository::{DatasetRepository, InMemoryRepository};

/// A workspace shared between the display and the live feed
pub type SharedWorkspace<R = InMemoryRepository> = Arc<RwLock<Workspace<R>>>;

/// Datasets plus the active selection
#[derive(Debug, Clone, Default)]
pub struct Workspace<R: DatasetRepository = InMemoryRepository> {
    repository: R,
    active: Option<DatasetId>,
}

impl<R: DatasetRepository> Workspace<R> {
    /// Wrap a repository; the first stored dataset becomes active
    pub fn new(repository: R) -> Self {
        let active = repository.list().first().map(|d| d.id.clone());
        Self { repository, active }
    }

    /// Move the workspace behind a shared lock
    pub fn shared(self) -> SharedWorkspace<R> {
        Arc::new(RwLock::new(self))
    }

    /// Create a dataset from a grid, store it and make it active
    pub fn ingest(&mut self, name: impl Into<String>, grid: ParsedGrid) -> DatasetId {
        let dataset = Dataset::from_grid(name, grid);
        let id = dataset.id.clone();
        self.repository.upsert(dataset);
        self.active = Some(id.clone());
        id
    }

    /// Store a dataset (replacing one with the same id)
    pub fn upsert(&mut self, dataset: Dataset) {
        self.repository.upsert(dataset);
    }

    /// Remove a dataset; clears the selection if it was active
    pub fn delete(&mut self, id: &str) -> Option<Dataset> {
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        self.repository.delete(id)
    }

    /// Select the dataset to display
    pub fn set_active(&mut self, id: &str) -> DatasetResult<()> {
        if !self.repository.contains(id) {
            return Err(DatasetError::NotFound { id: id.to_string() });
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Clear the selection
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Id of the active dataset
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active dataset
    pub fn active(&self) -> Option<&Dataset> {
        self.active.as_deref().and_then(|id| self.repository.get(id))
    }

    /// The active dataset, mutably
    pub fn active_mut(&mut self) -> Option<&mut Dataset> {
        let id = self.active.clone()?;
        self.repository.get_mut(&id)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }
}

/// Read a shared workspace, recovering from a poisoned lock
pub fn read_workspace<R: DatasetRepository>(
    workspace: &SharedWorkspace<R>,
) -> RwLockReadGuard<'_, Workspace<R>> {
    workspace.read().unwrap_or_else(PoisonError::into_inner)
}

/// Write a shared workspace, recovering from a poisoned lock
pub fn write_workspace<R: DatasetRepository>(
    workspace: &SharedWorkspace<R>,
) -> RwLockWriteGuard<'_, Workspace<R>> {
    workspace.write().unwrap_or_else(PoisonError::into_inner)
}
