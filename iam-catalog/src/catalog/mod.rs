//! Runtime catalogue of services, actions and resource ARN templates
//!
//! The [`Catalog`] is built once, from the embedded data files or from a
//! directory of service definitions, and is immutable afterwards. It can be
//! shared freely between threads.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use regex::RegexBuilder;

use crate::errors::{CatalogError, Result};
use crate::placeholders::PlaceholderValues;

pub(crate) mod loader;
mod model;
mod validation;

pub use model::{
    AccessLevel, AccessLevelError, ActionDefinition, ResourceDefinition, ServiceDefinition,
};
pub use validation::{IssueKind, ValidationIssue};

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

fn closest<'a>(wanted: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    candidates
        .map(|candidate| (strsim::jaro_winkler(wanted, candidate), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

/// Translate an IAM-style wildcard (`*` and `?`) into an anchored regex
fn wildcard_regex(pattern: &str, part: &str) -> Result<regex::Regex> {
    let mut expression = String::with_capacity(part.len() + 8);
    expression.push('^');
    for c in part.chars() {
        match c {
            '*' => expression.push_str(".*"),
            '?' => expression.push('.'),
            c => expression.push_str(&regex::escape(&c.to_string())),
        }
    }
    expression.push('$');

    RegexBuilder::new(&expression)
        .case_insensitive(true)
        .build()
        .map_err(|e| CatalogError::invalid_pattern(pattern, e.to_string()))
}

/// Collection of service definitions keyed by service name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: BTreeMap<String, Arc<ServiceDefinition>>,
}

impl Catalog {
    /// Build a catalogue from the service definitions embedded in the binary
    pub fn embedded() -> Result<Self> {
        Self::from_definitions(loader::load_embedded()?)
    }

    /// Build a catalogue from every `*.json` service definition below `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_definitions(loader::load_directory(dir.as_ref())?)
    }

    /// Build a catalogue from service definitions; service names must be unique
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ServiceDefinition>,
    ) -> Result<Self> {
        let mut services = BTreeMap::new();
        for definition in definitions {
            let name = definition.name().to_string();
            if services.contains_key(&name) {
                return Err(CatalogError::DuplicateService(name));
            }
            services.insert(name, Arc::new(definition));
        }
        Ok(Self { services })
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Services ordered by name
    pub fn services(&self) -> impl Iterator<Item = &Arc<ServiceDefinition>> {
        self.services.values()
    }

    /// Look up a service, suggesting a close name when it does not exist
    pub fn service(&self, name: &str) -> Result<&Arc<ServiceDefinition>> {
        self.services
            .get(name)
            .ok_or_else(|| CatalogError::UnknownService {
                name: name.to_string(),
                suggestion: self.suggest_service(name),
            })
    }

    /// The closest known service name to `name`, if any is close enough
    pub fn suggest_service(&self, name: &str) -> Option<String> {
        closest(name, self.services.keys().map(String::as_str))
    }

    /// Look up an action by its qualified name, e.g. `comprehend:DetectSentiment`
    pub fn action(&self, qualified: &str) -> Option<(&ServiceDefinition, &ActionDefinition)> {
        let (namespace, _) = qualified.split_once(':')?;
        let service = self.services.get(namespace)?;
        service
            .action(qualified)
            .map(|action| (service.as_ref(), action))
    }

    /// Whether the qualified action exists in the catalogue
    pub fn contains_action(&self, qualified: &str) -> bool {
        self.action(qualified).is_some()
    }

    /// Look up a resource type of a service
    pub fn resource(&self, service: &str, resource: &str) -> Result<&ResourceDefinition> {
        let definition = self.service(service)?;
        definition
            .resource(resource)
            .ok_or_else(|| CatalogError::UnknownResource {
                service: service.to_string(),
                name: resource.to_string(),
                suggestion: closest(
                    resource,
                    definition.resources().iter().map(ResourceDefinition::name),
                ),
            })
    }

    /// Render the ARN of a resource type; absent or empty values become `*`.
    ///
    /// Only the lookup can fail: rendering itself accepts any values verbatim.
    pub fn render_arn<V>(&self, service: &str, resource: &str, values: &V) -> Result<String>
    where
        V: PlaceholderValues + ?Sized,
    {
        let definition = self.resource(service, resource)?;
        let arn = definition.render(values);
        log::trace!("Rendered {}/{}: {}", service, resource, arn);
        Ok(arn)
    }

    /// Actions of a service with the given access level
    pub fn actions_by_access_level(
        &self,
        service: &str,
        level: AccessLevel,
    ) -> Result<Vec<&ActionDefinition>> {
        Ok(self
            .service(service)?
            .actions_with_access_level(level)
            .collect())
    }

    /// Expand an IAM action pattern such as `comprehend:Detect*` or `*:List*`.
    ///
    /// `*` matches any run of characters and `?` a single character. Matching
    /// of the action part is case-insensitive, as IAM does. A bare `*` expands
    /// to every action. Results are qualified names, sorted.
    pub fn expand_actions(&self, pattern: &str) -> Result<Vec<String>> {
        let (namespace_pattern, action_pattern) = match pattern.split_once(':') {
            Some(parts) => parts,
            None if pattern == "*" => ("*", "*"),
            None => {
                return Err(CatalogError::invalid_pattern(
                    pattern,
                    "expected <namespace>:<action>",
                ))
            }
        };
        if namespace_pattern.is_empty() || action_pattern.is_empty() {
            return Err(CatalogError::invalid_pattern(
                pattern,
                "namespace and action must not be empty",
            ));
        }

        let namespace_regex = wildcard_regex(pattern, namespace_pattern)?;
        let action_regex = wildcard_regex(pattern, action_pattern)?;

        let mut matches: Vec<String> = self
            .services
            .values()
            .filter(|service| namespace_regex.is_match(service.name()))
            .flat_map(|service| {
                service
                    .actions()
                    .iter()
                    .filter(|action| action_regex.is_match(action.name()))
                    .map(|action| service.qualify(action.name()))
                    .collect::<Vec<_>>()
            })
            .collect();
        matches.sort();

        log::debug!("Pattern {} matched {} actions", pattern, matches.len());
        Ok(matches)
    }

    /// Check every service definition, returning all issues found
    pub fn validate(&self) -> Vec<ValidationIssue> {
        self.services
            .values()
            .flat_map(|service| validation::validate_service(service))
            .collect()
    }
}
