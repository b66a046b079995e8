//! IAM action names
//!
//! An action is written `<namespace>:<ActionName>`, e.g. `comprehend:DetectSentiment`,
//! or `<namespace>:*` for every action of a service.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Action part of a wildcard action name
pub const WILDCARD_ACTION: &str = "*";

fn action_name_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([a-z0-9][a-z0-9-]*):(\*|[A-Z][A-Za-z0-9]*)$")
            .expect("action name pattern is a valid regex")
    })
}

/// Error returned for strings that are not `<namespace>:<PascalCaseName>` or `<namespace>:*`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid IAM action name (expected <namespace>:<PascalCaseName> or <namespace>:*)")]
pub struct ActionNameError(pub String);

/// Whether `name` is a well-formed action name
pub fn is_valid_action_name(name: &str) -> bool {
    action_name_regex().is_match(name)
}

/// A validated IAM action name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionName {
    qualified: String,
    separator: usize,
}

impl ActionName {
    /// Parse and validate a qualified action name
    pub fn parse(name: &str) -> Result<Self, ActionNameError> {
        let captures = action_name_regex()
            .captures(name)
            .ok_or_else(|| ActionNameError(name.to_string()))?;
        let separator = captures
            .get(1)
            .map(|namespace| namespace.end())
            .ok_or_else(|| ActionNameError(name.to_string()))?;

        Ok(Self {
            qualified: name.to_string(),
            separator,
        })
    }

    /// Build and validate `<namespace>:<action>`
    pub fn new(namespace: &str, action: &str) -> Result<Self, ActionNameError> {
        Self::parse(&format!("{}:{}", namespace, action))
    }

    /// The `<namespace>:*` action covering every action of a service
    pub fn wildcard(namespace: &str) -> Result<Self, ActionNameError> {
        Self::new(namespace, WILDCARD_ACTION)
    }

    /// Service namespace, e.g. `comprehend`
    pub fn namespace(&self) -> &str {
        &self.qualified[..self.separator]
    }

    /// Action part, e.g. `DetectSentiment` or `*`
    pub fn action(&self) -> &str {
        &self.qualified[self.separator + 1..]
    }

    pub fn is_wildcard(&self) -> bool {
        self.action() == WILDCARD_ACTION
    }

    pub fn as_str(&self) -> &str {
        &self.qualified
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}

impl FromStr for ActionName {
    type Err = ActionNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ActionName {
    fn as_ref(&self) -> &str {
        &self.qualified
    }
}

impl Serialize for ActionName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.qualified)
    }
}

impl<'de> Deserialize<'de> for ActionName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_action_name() {
        let action = ActionName::parse("comprehend:DetectSentiment").unwrap();
        assert_eq!(action.namespace(), "comprehend");
        assert_eq!(action.action(), "DetectSentiment");
        assert!(!action.is_wildcard());
        assert_eq!(action.to_string(), "comprehend:DetectSentiment");
    }

    #[test]
    fn test_wildcard_action() {
        let action = ActionName::wildcard("sagemaker-geospatial").unwrap();
        assert_eq!(action.as_str(), "sagemaker-geospatial:*");
        assert_eq!(action.namespace(), "sagemaker-geospatial");
        assert!(action.is_wildcard());
    }

    #[rstest]
    #[case("s3:GetObject", true)]
    #[case("frauddetector:*", true)]
    #[case("ec2:DescribeVpcs", true)]
    #[case("route53:ListHostedZones", true)]
    #[case("comprehend:detectSentiment", false)]
    #[case("Comprehend:DetectSentiment", false)]
    #[case("comprehend:Detect*", false)]
    #[case("comprehend:Detect-Sentiment", false)]
    #[case("comprehend:", false)]
    #[case(":DetectSentiment", false)]
    #[case("DetectSentiment", false)]
    #[case("s3:Get:Object", false)]
    #[case("-s3:GetObject", false)]
    fn test_is_valid_action_name(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(is_valid_action_name(name), valid, "{}", name);
        assert_eq!(ActionName::parse(name).is_ok(), valid, "{}", name);
    }

    #[test]
    fn test_action_name_error_message() {
        let error = ActionName::parse("not an action").unwrap_err();
        assert!(error.to_string().contains("'not an action'"));
    }

    #[test]
    fn test_action_name_serde() {
        let action: ActionName = serde_json::from_str("\"deepracer:ListTracks\"").unwrap();
        assert_eq!(action.action(), "ListTracks");
        assert_eq!(
            serde_json::to_string(&action).unwrap(),
            "\"deepracer:ListTracks\""
        );
        assert!(serde_json::from_str::<ActionName>("\"deepracer\"").is_err());
    }
}
