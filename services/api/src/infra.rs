use learnwell::courses::{CatalogImportError, CatalogImporter, CourseCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Imports the catalog at `path`, or falls back to the built-in sample courses.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<CourseCatalog, CatalogImportError> {
    match path {
        Some(path) => CatalogImporter::from_path(path),
        None => {
            let catalog = CourseCatalog::sample();
            info!(courses = catalog.len(), "using sample course catalog");
            Ok(catalog)
        }
    }
}
