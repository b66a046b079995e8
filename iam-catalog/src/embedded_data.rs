//! Embedded service definitions
//!
//! The per-service JSON data files under `resources/services` are embedded
//! directly into the binary at compile time, so the default catalogue needs no
//! files at runtime. The same files drive the generated [`crate::services`] API.

use rust_embed::RustEmbed;

use crate::catalog::loader::parse_service_definition;
use crate::catalog::ServiceDefinition;
use crate::errors::{CatalogError, Result};

/// Embedded per-service data files, one `<service>.json` each
#[derive(RustEmbed)]
#[folder = "resources/services"]
#[include = "*.json"]
pub struct ServiceData;

impl ServiceData {
    fn file_name(service: &str) -> String {
        format!("{}.json", service)
    }

    /// Get the raw data file for a service
    pub fn get_service_file(service: &str) -> Option<std::borrow::Cow<'static, [u8]>> {
        let start_time = std::time::Instant::now();

        let file = Self::get(&Self::file_name(service))?;
        let total_time = start_time.elapsed();
        if total_time.as_millis() > 10 {
            log::debug!(
                "Loaded {}: {}KB in {:?}",
                service,
                file.data.len() / 1024,
                total_time
            );
        }

        Some(file.data)
    }
}

/// Embedded service data manager
///
/// Provides access to embedded service definitions with JSON parsing.
pub(crate) struct EmbeddedServiceData;

impl EmbeddedServiceData {
    /// Names of all embedded services, sorted
    pub(crate) fn service_names() -> Vec<String> {
        let mut names: Vec<String> = ServiceData::iter()
            .filter_map(|path| {
                path.strip_suffix(".json")
                    .filter(|name| !name.contains('/'))
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        names
    }

    /// Get a parsed service definition by service name
    ///
    /// # Arguments
    /// * `service` - Service name (e.g., "comprehend", "frauddetector")
    ///
    /// # Returns
    /// Parsed service definition or error if not found or parsing fails
    pub(crate) fn get_service_definition(service: &str) -> Result<ServiceDefinition> {
        let data = ServiceData::get_service_file(service).ok_or_else(|| {
            CatalogError::UnknownService {
                name: service.to_string(),
                suggestion: None,
            }
        })?;

        let origin = format!("embedded:{}", ServiceData::file_name(service));
        let json_str =
            std::str::from_utf8(&data).map_err(|_| CatalogError::InvalidUtf8(origin.clone()))?;

        parse_service_definition(&origin, json_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_service_file_returns_none_for_invalid_service() {
        assert!(ServiceData::get_service_file("nonexistent-service").is_none());
        assert!(ServiceData::get_service_file("").is_none());
    }

    #[test]
    fn test_service_names_are_sorted_and_unique() {
        let names = EmbeddedServiceData::service_names();
        assert!(!names.is_empty(), "Expected at least one embedded service");

        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);

        for name in &names {
            assert!(!name.is_empty());
            assert!(!name.contains('/'), "Service name '{}' has a separator", name);
        }
    }

    #[test]
    fn test_every_embedded_service_parses() {
        for name in EmbeddedServiceData::service_names() {
            let definition = EmbeddedServiceData::get_service_definition(&name)
                .unwrap_or_else(|e| panic!("{} should parse: {}", name, e));
            assert_eq!(
                definition.name(),
                name,
                "File name should match the service name inside it"
            );
        }
    }

    #[test]
    fn test_get_service_definition_invalid_service() {
        let result = EmbeddedServiceData::get_service_definition("nonexistent-service");
        match result {
            Err(CatalogError::UnknownService { name, .. }) => {
                assert_eq!(name, "nonexistent-service");
            }
            other => panic!("Expected UnknownService, got {:?}", other),
        }
    }
}
