//! Dataset storage interface
//!
//! The hosting application owns storage. The core only needs upsert, list,
//! lookup and delete by id; [`InMemoryRepository`] is the reference
//! implementation and the one used by tests and the CLI.

use crate::dataset::Dataset;

/// Storage for a collection of datasets keyed by id
pub trait DatasetRepository: Send + Sync {
    /// Replace the dataset with the same id, or append it if absent
    fn upsert(&mut self, dataset: Dataset);

    /// All datasets in insertion order
    fn list(&self) -> Vec<&Dataset>;

    /// Get a dataset by id
    fn get(&self, id: &str) -> Option<&Dataset>;

    /// Get a mutable dataset by id
    fn get_mut(&mut self, id: &str) -> Option<&mut Dataset>;

    /// Remove a dataset by id, returning it if it was present
    fn delete(&mut self, id: &str) -> Option<Dataset>;

    /// Check if a dataset exists
    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

/// Vector-backed repository preserving insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    datasets: Vec<Dataset>,
}

impl InMemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `datasets`
    pub fn with_datasets(datasets: Vec<Dataset>) -> Self {
        let mut repo = Self::new();
        for dataset in datasets {
            repo.upsert(dataset);
        }
        repo
    }

    /// Number of stored datasets
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Serialize the whole collection as a JSON array
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.datasets)
    }

    /// Restore a collection previously written by [`Self::export_json`]
    pub fn import_json(json: &str) -> Result<Self, serde_json::Error> {
        let datasets: Vec<Dataset> = serde_json::from_str(json)?;
        Ok(Self::with_datasets(datasets))
    }
}

impl DatasetRepository for InMemoryRepository {
    fn upsert(&mut self, dataset: Dataset) {
        match self.datasets.iter_mut().find(|d| d.id == dataset.id) {
            Some(existing) => *existing = dataset,
            None => self.datasets.push(dataset),
        }
    }

    fn list(&self) -> Vec<&Dataset> {
        self.datasets.iter().collect()
    }

    fn get(&self, id: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Dataset> {
        self.datasets.iter_mut().find(|d| d.id == id)
    }

    fn delete(&mut self, id: &str) -> Option<Dataset> {
        let pos = self.datasets.iter().position(|d| d.id == id)?;
        Some(self.datasets.remove(pos))
    }
}
