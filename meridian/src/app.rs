//! Application-level access to geographic data.

use std::any::Any;
use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};

use crate::error::MeridianError;
use crate::map::Dataset;

/// Catalog of named datasets available to an application.
pub trait Registry: MaybeSend + MaybeSync {
    /// Names of all datasets in the registry.
    fn names(&self) -> Vec<String>;
    /// Opens the dataset with the given name. Returns `None` if there is no such dataset.
    fn get(&self, name: &str) -> Result<Option<Arc<dyn Dataset>>, MeridianError>;
}

/// Registry of datasets that are already open.
#[derive(Clone, Default)]
pub struct MemoryRegistry {
    datasets: Vec<Arc<dyn Dataset>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the dataset to the registry. A dataset with the same name is replaced.
    pub fn with_dataset(mut self, dataset: Arc<dyn Dataset>) -> Self {
        self.add(dataset);
        self
    }

    /// Adds the dataset to the registry. A dataset with the same name is replaced.
    pub fn add(&mut self, dataset: Arc<dyn Dataset>) {
        match self
            .datasets
            .iter_mut()
            .find(|existing| existing.name() == dataset.name())
        {
            Some(existing) => *existing = dataset,
            None => self.datasets.push(dataset),
        }
    }
}

impl Registry for MemoryRegistry {
    fn names(&self) -> Vec<String> {
        self.datasets.iter().map(|d| d.name().to_string()).collect()
    }

    fn get(&self, name: &str) -> Result<Option<Arc<dyn Dataset>>, MeridianError> {
        Ok(self.datasets.iter().find(|d| d.name() == name).cloned())
    }
}

type RegistryFactory = Box<dyn Fn() -> Box<dyn Registry> + Send + Sync>;

/// Global state of a geo application.
///
/// The host keeps one instance for the lifetime of the application and hands it to the
/// components that need data. Components receive the host application object as `&dyn Any`
/// and use [`GeoApplication::get`] to access it.
pub struct GeoApplication {
    registry_factory: RegistryFactory,
}

impl GeoApplication {
    /// Creates an application that uses `factory` to create data registries.
    pub fn new(factory: impl Fn() -> Box<dyn Registry> + Send + Sync + 'static) -> Self {
        Self {
            registry_factory: Box::new(factory),
        }
    }

    /// Returns the host application object as a `GeoApplication`.
    ///
    /// Fails with [`MeridianError::Configuration`] if the host application is of another type.
    pub fn get(host: &dyn Any) -> Result<&GeoApplication, MeridianError> {
        host.downcast_ref::<GeoApplication>().ok_or_else(|| {
            MeridianError::Configuration("application object is not a GeoApplication".into())
        })
    }

    /// Creates a new data registry.
    pub fn create_data_registry(&self) -> Box<dyn Registry> {
        (self.registry_factory)()
    }
}

impl std::fmt::Debug for GeoApplication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoApplication").finish_non_exhaustive()
    }
}

impl Default for GeoApplication {
    fn default() -> Self {
        Self::new(|| Box::new(MemoryRegistry::new()))
    }
}
