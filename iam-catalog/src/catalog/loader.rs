//! Loading service definitions from embedded data or a directory

use std::path::Path;

use walkdir::WalkDir;

use super::model::ServiceDefinition;
use crate::embedded_data::EmbeddedServiceData;
use crate::errors::{CatalogError, Result};

pub(crate) fn parse_service_definition(origin: &str, json: &str) -> Result<ServiceDefinition> {
    serde_json::from_str(json).map_err(|e| CatalogError::json(origin, e))
}

/// Load every service definition embedded in the binary
pub(crate) fn load_embedded() -> Result<Vec<ServiceDefinition>> {
    let start_time = std::time::Instant::now();

    let definitions = EmbeddedServiceData::service_names()
        .iter()
        .map(|name| EmbeddedServiceData::get_service_definition(name))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Loaded {} embedded service definitions in {:?}",
        definitions.len(),
        start_time.elapsed()
    );

    Ok(definitions)
}

/// Load every `*.json` file below `dir`, in path order
pub(crate) fn load_directory(dir: &Path) -> Result<Vec<ServiceDefinition>> {
    let start_time = std::time::Instant::now();
    log::debug!("Loading service definitions from {}", dir.display());

    let mut definitions = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| CatalogError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some("json")
        {
            continue;
        }

        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let definition = parse_service_definition(&path.display().to_string(), &json)?;
        log::trace!(
            "Loaded service '{}' from {}",
            definition.name(),
            path.display()
        );
        definitions.push(definition);
    }

    log::debug!(
        "Loaded {} service definitions from {} in {:?}",
        definitions.len(),
        dir.display(),
        start_time.elapsed()
    );

    Ok(definitions)
}
