//! Service definition data model
//!
//! One [`ServiceDefinition`] is deserialized from each service data file.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::{ActionName, ActionNameError};
use crate::arn::{self, ArnTemplate, TemplateError};
use crate::placeholders::PlaceholderValues;

/// Access level classification of an action.
///
/// Descriptive metadata only; nothing in the catalogue decides anything based on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum AccessLevel {
    Read,
    Write,
    List,
    Tagging,
    #[serde(rename = "Permissions management")]
    PermissionsManagement,
}

impl AccessLevel {
    pub const ALL: [Self; 5] = [
        Self::Read,
        Self::Write,
        Self::List,
        Self::Tagging,
        Self::PermissionsManagement,
    ];

    /// Name as written in service data files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::List => "List",
            Self::Tagging => "Tagging",
            Self::PermissionsManagement => "Permissions management",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown access level '{0}' (expected one of Read, Write, List, Tagging, Permissions management)")]
pub struct AccessLevelError(pub String);

impl FromStr for AccessLevel {
    type Err = AccessLevelError;

    /// Case-insensitive; spaces, `-` and `_` are ignored so `permissions-management` parses too
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|level| {
                level
                    .as_str()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(folded.chars())
            })
            .ok_or_else(|| AccessLevelError(s.to_string()))
    }
}

/// An action of a service, named without the service prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ActionDefinition {
    /// Action name in PascalCase, e.g. `DetectSentiment`
    pub(crate) name: String,
    pub(crate) access_level: AccessLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
}

impl ActionDefinition {
    pub fn new(name: impl Into<String>, access_level: AccessLevel) -> Self {
        Self {
            name: name.into(),
            access_level,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A resource type of a service and its ARN format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ResourceDefinition {
    /// Resource type name, e.g. `detector`
    pub(crate) name: String,
    /// ARN template with `${placeholder}` markers
    #[serde(rename = "ARNFormat")]
    pub(crate) arn_format: String,
}

impl ResourceDefinition {
    pub fn new(name: impl Into<String>, arn_format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn_format: arn_format.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arn_format(&self) -> &str {
        &self.arn_format
    }

    /// Strictly parse the ARN format
    pub fn template(&self) -> Result<ArnTemplate, TemplateError> {
        ArnTemplate::parse(&self.arn_format)
    }

    /// Render an ARN for this resource type; absent values become `*`
    pub fn render<V>(&self, values: &V) -> String
    where
        V: PlaceholderValues + ?Sized,
    {
        arn::render(&self.arn_format, values)
    }
}

/// Actions and resource types of one AWS service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ServiceDefinition {
    /// Service namespace used as the action prefix, e.g. `frauddetector`
    pub(crate) name: String,
    /// Human readable service name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) full_name: Option<String>,
    #[serde(default)]
    pub(crate) actions: Vec<ActionDefinition>,
    #[serde(default)]
    pub(crate) resources: Vec<ResourceDefinition>,
}

impl ServiceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: None,
            actions: Vec::new(),
            resources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: ActionDefinition) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: ResourceDefinition) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn actions(&self) -> &[ActionDefinition] {
        &self.actions
    }

    pub fn resources(&self) -> &[ResourceDefinition] {
        &self.resources
    }

    /// `<service>:<Action>` for an action of this service
    pub fn qualify(&self, action: &str) -> String {
        format!("{}:{}", self.name, action)
    }

    /// Every action of this service, prefixed with the service name
    pub fn qualified_actions(&self) -> impl Iterator<Item = String> + '_ {
        self.actions.iter().map(|action| self.qualify(&action.name))
    }

    /// The `<service>:*` action
    pub fn wildcard_action(&self) -> Result<ActionName, ActionNameError> {
        ActionName::wildcard(&self.name)
    }

    /// Look up an action by name, with or without the service prefix
    pub fn action(&self, name: &str) -> Option<&ActionDefinition> {
        let name = name
            .strip_prefix(self.name.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(name);
        self.actions.iter().find(|action| action.name == name)
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceDefinition> {
        self.resources.iter().find(|resource| resource.name == name)
    }

    /// Actions with the given access level, in data file order
    pub fn actions_with_access_level(
        &self,
        level: AccessLevel,
    ) -> impl Iterator<Item = &ActionDefinition> + '_ {
        self.actions
            .iter()
            .filter(move |action| action.access_level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholders::Substitutions;
    use rstest::rstest;

    fn fraud_detector() -> ServiceDefinition {
        serde_json::from_str(
            r#"{
                "Name": "frauddetector",
                "FullName": "Amazon Fraud Detector",
                "Actions": [
                    {"Name": "GetDetectors", "AccessLevel": "Read"},
                    {"Name": "PutDetector", "AccessLevel": "Write", "Description": "Creates or updates a detector"},
                    {"Name": "TagResource", "AccessLevel": "Tagging"}
                ],
                "Resources": [
                    {"Name": "detector", "ARNFormat": "arn:${partition}:frauddetector:${region}:${account}:detector/${resourcePath}"}
                ]
            }"#,
        )
        .expect("valid service definition")
    }

    #[test]
    fn test_deserialize_service_definition() {
        let service = fraud_detector();
        assert_eq!(service.name(), "frauddetector");
        assert_eq!(service.full_name(), Some("Amazon Fraud Detector"));
        assert_eq!(service.actions().len(), 3);
        assert_eq!(
            service.action("PutDetector").and_then(ActionDefinition::description),
            Some("Creates or updates a detector")
        );
        assert_eq!(service.resources().len(), 1);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<ServiceDefinition, _> =
            serde_json::from_str(r#"{"Name": "s3", "Action": []}"#);
        assert!(result.is_err());

        let result: Result<ServiceDefinition, _> = serde_json::from_str(
            r#"{"Name": "s3", "Resources": [{"Name": "bucket", "ArnFormat": "arn:x"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_action_lookup_accepts_qualified_name() {
        let service = fraud_detector();
        assert!(service.action("frauddetector:GetDetectors").is_some());
        assert!(service.action("GetDetectors").is_some());
        assert!(service.action("comprehend:GetDetectors").is_none());
    }

    #[test]
    fn test_qualified_actions_and_wildcard() {
        let service = fraud_detector();
        let qualified: Vec<String> = service.qualified_actions().collect();
        assert_eq!(
            qualified,
            vec![
                "frauddetector:GetDetectors",
                "frauddetector:PutDetector",
                "frauddetector:TagResource"
            ]
        );
        assert_eq!(
            service.wildcard_action().unwrap().as_str(),
            "frauddetector:*"
        );
    }

    #[test]
    fn test_actions_with_access_level() {
        let service = fraud_detector();
        let tagging: Vec<&str> = service
            .actions_with_access_level(AccessLevel::Tagging)
            .map(ActionDefinition::name)
            .collect();
        assert_eq!(tagging, vec!["TagResource"]);
        assert_eq!(
            service
                .actions_with_access_level(AccessLevel::PermissionsManagement)
                .count(),
            0
        );
    }

    #[test]
    fn test_resource_render() {
        let service = fraud_detector();
        let detector = service.resource("detector").unwrap();
        let values = Substitutions::new()
            .with("region", "us-east-1")
            .with("resourcePath", "myDetector");
        assert_eq!(
            detector.render(&values),
            "arn:*:frauddetector:us-east-1:*:detector/myDetector"
        );
        assert_eq!(detector.template().unwrap().placeholders().count(), 4);
    }

    #[rstest]
    #[case("Read", AccessLevel::Read)]
    #[case("write", AccessLevel::Write)]
    #[case("LIST", AccessLevel::List)]
    #[case("tagging", AccessLevel::Tagging)]
    #[case("Permissions management", AccessLevel::PermissionsManagement)]
    #[case("permissions-management", AccessLevel::PermissionsManagement)]
    #[case("PermissionsManagement", AccessLevel::PermissionsManagement)]
    fn test_access_level_from_str(#[case] input: &str, #[case] expected: AccessLevel) {
        assert_eq!(input.parse::<AccessLevel>(), Ok(expected));
    }

    #[test]
    fn test_access_level_rejects_unknown() {
        assert!("admin".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn test_access_level_serde_names() {
        assert_eq!(
            serde_json::to_string(&AccessLevel::PermissionsManagement).unwrap(),
            "\"Permissions management\""
        );
        for level in AccessLevel::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level));
        }
    }
}
