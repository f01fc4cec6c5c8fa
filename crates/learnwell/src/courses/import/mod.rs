mod parser;

use std::io::Read;
use std::path::Path;

use tracing::info;

use super::catalog::{CatalogError, CourseCatalog};
use super::domain::Course;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    UnsupportedFormat(String),
    Catalog(CatalogError),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read course catalog: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid course catalog JSON: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid course catalog CSV: {}", err),
            CatalogImportError::UnsupportedFormat(extension) => write!(
                f,
                "unsupported course catalog format '{}' (expected .json or .csv)",
                extension
            ),
            CatalogImportError::Catalog(err) => write!(f, "invalid course catalog: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::UnsupportedFormat(_) => None,
            CatalogImportError::Catalog(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<CatalogError> for CatalogImportError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

/// Loads a `CourseCatalog` from a JSON array or a CSV export.
pub struct CatalogImporter;

impl CatalogImporter {
    /// Picks the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CourseCatalog, CatalogImportError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let catalog = match extension.as_str() {
            "json" => Self::from_json_reader(std::fs::File::open(path)?)?,
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?)?,
            _ => return Err(CatalogImportError::UnsupportedFormat(extension)),
        };

        info!(
            path = %path.display(),
            courses = catalog.len(),
            "course catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<CourseCatalog, CatalogImportError> {
        let courses: Vec<Course> = serde_json::from_reader(reader)?;
        Ok(CourseCatalog::new(courses)?)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<CourseCatalog, CatalogImportError> {
        let courses = parser::parse_courses(reader)?;
        Ok(CourseCatalog::new(courses)?)
    }
}
