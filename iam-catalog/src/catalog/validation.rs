//! Consistency checks over service definitions

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::model::ServiceDefinition;
use crate::action::is_valid_action_name;
use crate::arn::TemplateError;

/// Problem found in a service definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// `<service>:<action>` is not a valid action name
    InvalidActionName { action: String },
    DuplicateAction { action: String },
    DuplicateResource { resource: String },
    /// The ARN format does not parse as a template
    InvalidTemplate {
        resource: String,
        #[serde(serialize_with = "serialize_display")]
        error: TemplateError,
    },
    /// The ARN format does not start with `arn:`
    NotAnArn { resource: String },
}

fn serialize_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: fmt::Display,
{
    serializer.collect_str(value)
}

/// A validation finding, tagged with the service it was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub service: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::InvalidActionName { action } => write!(
                f,
                "{}: '{}:{}' is not a valid action name",
                self.service, self.service, action
            ),
            IssueKind::DuplicateAction { action } => {
                write!(f, "{}: action '{}' is defined more than once", self.service, action)
            }
            IssueKind::DuplicateResource { resource } => write!(
                f,
                "{}: resource type '{}' is defined more than once",
                self.service, resource
            ),
            IssueKind::InvalidTemplate { resource, error } => write!(
                f,
                "{}: ARN format of resource type '{}' is malformed: {}",
                self.service, resource, error
            ),
            IssueKind::NotAnArn { resource } => write!(
                f,
                "{}: ARN format of resource type '{}' does not start with 'arn:'",
                self.service, resource
            ),
        }
    }
}

/// Check one service definition, returning every issue found
pub(crate) fn validate_service(service: &ServiceDefinition) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut push = |kind| {
        issues.push(ValidationIssue {
            service: service.name().to_string(),
            kind,
        })
    };

    let mut seen_actions = HashSet::new();
    for action in service.actions() {
        if !is_valid_action_name(&service.qualify(action.name())) {
            push(IssueKind::InvalidActionName {
                action: action.name().to_string(),
            });
        }
        if !seen_actions.insert(action.name()) {
            push(IssueKind::DuplicateAction {
                action: action.name().to_string(),
            });
        }
    }

    let mut seen_resources = HashSet::new();
    for resource in service.resources() {
        if !seen_resources.insert(resource.name()) {
            push(IssueKind::DuplicateResource {
                resource: resource.name().to_string(),
            });
        }
        if let Err(error) = resource.template() {
            push(IssueKind::InvalidTemplate {
                resource: resource.name().to_string(),
                error,
            });
        }
        if !resource.arn_format().starts_with("arn:") {
            push(IssueKind::NotAnArn {
                resource: resource.name().to_string(),
            });
        }
    }

    issues
}
