//! AWS IAM permission metadata
//!
//! For each AWS service this crate provides the IAM action names (as string
//! constants) and the ARN templates of its resource types, together with
//! builders that render those templates. Any placeholder the caller does not
//! supply renders as the wildcard `*`:
//!
//! ```
//! use iam_catalog::{ArnTemplate, Substitutions};
//!
//! let template = ArnTemplate::parse(
//!     "arn:${partition}:frauddetector:${region}:${account}:detector/${resourcePath}",
//! )
//! .unwrap();
//! let values = Substitutions::new()
//!     .with("region", "us-east-1")
//!     .with("resourcePath", "myDetector");
//!
//! assert_eq!(
//!     template.render(&values),
//!     "arn:*:frauddetector:us-east-1:*:detector/myDetector"
//! );
//! ```
//!
//! The per-service data lives in JSON files that are both embedded into the
//! binary (see [`Catalog::embedded`]) and turned into a typed API at build time
//! (see [`services`]).

pub mod action;
pub mod arn;
pub mod catalog;
mod embedded_data;
pub mod errors;
pub mod placeholders;
pub mod services;


pub use action::{is_valid_action_name, ActionName, ActionNameError};
pub use arn::{render, ArnTemplate, Segment, TemplateError, WILDCARD};
pub use catalog::{
    AccessLevel, AccessLevelError, ActionDefinition, Catalog, IssueKind, ResourceDefinition,
    ServiceDefinition, ValidationIssue,
};
pub use embedded_data::ServiceData;
pub use errors::{CatalogError, Result};
pub use placeholders::{normalize_placeholder, PlaceholderValues, SubstitutionError, Substitutions};

/// JSON Schema describing a service data file
pub fn service_definition_schema() -> schemars::Schema {
    schemars::schema_for!(ServiceDefinition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_definition_schema_names_fields() {
        let schema = serde_json::to_value(service_definition_schema()).unwrap();
        let properties = schema
            .get("properties")
            .and_then(|p| p.as_object())
            .expect("schema should have properties");
        for field in ["Name", "FullName", "Actions", "Resources"] {
            assert!(properties.contains_key(field), "missing {}", field);
        }
        assert_eq!(schema.get("additionalProperties"), Some(&serde_json::json!(false)));
    }
}
