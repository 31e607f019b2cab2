use std::{
    collections::HashMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
    sync::Arc,
    time::SystemTime,
};

use super::loader::{
    load_dataset,
    LoadOptions,
};
use crate::{
    config::DashboardConfig,
    core::{
        Dataset,
        DashboardError,
        DatasetKind,
    },
};

/// Identifies one version of a file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl FileIdentity {
    pub fn of(path: &Path) -> Result<Self, DashboardError> {
        let missing = |e: std::io::Error| DashboardError::MissingInput {
            path: path.to_path_buf(),
            source: Box::new(e),
        };
        let canonical = fs::canonicalize(path).map_err(missing)?;
        let metadata = fs::metadata(&canonical).map_err(missing)?;

        Ok(Self { path: canonical, len: metadata.len(), modified: metadata.modified().ok() })
    }
}

/// Loaded datasets keyed by file identity. An unchanged file is never parsed twice.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<(FileIdentity, DatasetKind), Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &mut self,
        path: &Path,
        kind: DatasetKind,
        options: &LoadOptions,
    ) -> Result<Arc<Dataset>, DashboardError> {
        let identity = FileIdentity::of(path)?;

        if let Some(dataset) = self.entries.get(&(identity.clone(), kind)) {
            log::debug!("Using cached dataset for {}", path.display());
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load_dataset(path, kind, options)?);

        // Drop stale versions of the same file
        self.entries.retain(|(cached, cached_kind), _| !(cached.path == identity.path && *cached_kind == kind));
        self.entries.insert((identity, kind), Arc::clone(&dataset));

        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both datasets of a dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub full: Arc<Dataset>,
    pub top: Arc<Dataset>,
}

impl DashboardData {
    pub fn load(config: &DashboardConfig, cache: &mut DatasetCache) -> Result<Self, DashboardError> {
        let options = LoadOptions::from_config(config);
        let full = cache.get_or_load(&config.full_dataset_path, DatasetKind::Full, &options)?;
        let top = cache.get_or_load(&config.top_dataset_path, DatasetKind::Top, &options)?;
        Ok(Self { full, top })
    }

    /// True when both handles point at the same loaded datasets.
    pub fn same_as(&self, other: &DashboardData) -> bool {
        Arc::ptr_eq(&self.full, &other.full) && Arc::ptr_eq(&self.top, &other.top)
    }
}
