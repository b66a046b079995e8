//! Placeholder values supplied to ARN templates
//!
//! Placeholder names are compared after normalizing them to lower camel case,
//! so `${Partition}`, `${partition}` and a `partition` field all refer to the
//! same value, and `${ResourcePath}` matches `resourcePath` or `resource_path`.

use std::collections::{BTreeMap, HashMap};

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalize a placeholder name to the lower camel case form used for lookups
pub fn normalize_placeholder(name: &str) -> String {
    name.to_case(Case::Camel)
}

/// Source of values for template placeholders.
///
/// Returning `None` (or an empty string) makes the renderer substitute `*`.
pub trait PlaceholderValues {
    /// Value for `placeholder`, given as written in the template
    fn value(&self, placeholder: &str) -> Option<&str>;
}

impl PlaceholderValues for () {
    fn value(&self, _placeholder: &str) -> Option<&str> {
        None
    }
}

impl<T: PlaceholderValues + ?Sized> PlaceholderValues for &T {
    fn value(&self, placeholder: &str) -> Option<&str> {
        (**self).value(placeholder)
    }
}

/// Look up a key verbatim, then by normalized name.
///
/// When several keys normalize to the placeholder, the smallest key with a
/// value wins, whatever the iteration order of the map.
fn find_in<'a, K, I>(entries: I, placeholder: &str) -> Option<&'a str>
where
    K: AsRef<str> + 'a,
    I: Iterator<Item = (K, Option<&'a str>)> + Clone,
{
    if let Some((_, value)) = entries
        .clone()
        .find(|(key, _)| key.as_ref() == placeholder)
    {
        return value;
    }

    let wanted = normalize_placeholder(placeholder);
    entries
        .filter(|(key, _)| normalize_placeholder(key.as_ref()) == wanted)
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .min_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()))
        .map(|(_, value)| value)
}

impl PlaceholderValues for HashMap<String, String> {
    fn value(&self, placeholder: &str) -> Option<&str> {
        find_in(
            self.iter().map(|(key, value)| (key, Some(value.as_str()))),
            placeholder,
        )
    }
}

impl PlaceholderValues for HashMap<String, Option<String>> {
    fn value(&self, placeholder: &str) -> Option<&str> {
        find_in(
            self.iter().map(|(key, value)| (key, value.as_deref())),
            placeholder,
        )
    }
}

impl PlaceholderValues for BTreeMap<String, String> {
    fn value(&self, placeholder: &str) -> Option<&str> {
        find_in(
            self.iter().map(|(key, value)| (key, Some(value.as_str()))),
            placeholder,
        )
    }
}

impl<'a> PlaceholderValues for [(&'a str, &'a str)] {
    fn value(&self, placeholder: &str) -> Option<&str> {
        find_in(
            self.iter().map(|(key, value)| (*key, Some(*value))),
            placeholder,
        )
    }
}

impl<'a, const N: usize> PlaceholderValues for [(&'a str, &'a str); N] {
    fn value(&self, placeholder: &str) -> Option<&str> {
        self.as_slice().value(placeholder)
    }
}

/// Errors from parsing `name=value` assignments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    #[error("expected NAME=VALUE but found '{0}'")]
    MissingSeparator(String),

    #[error("placeholder name is empty in '{0}'")]
    EmptyName(String),
}

/// Placeholder name to value mapping built by the caller for one render.
///
/// Names are stored normalized. Absent names render as `*`; setting a name to
/// `None` removes any earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<String>>",
    into = "BTreeMap<String, String>"
)]
pub struct Substitutions {
    values: BTreeMap<String, String>,
}

impl Substitutions {
    /// Create an empty set of substitutions
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder form of [`insert_opt`](Self::insert_opt)
    #[must_use]
    pub fn with_opt(mut self, name: impl AsRef<str>, value: Option<impl Into<String>>) -> Self {
        self.insert_opt(name, value);
        self
    }

    /// Set the value of a placeholder, replacing any earlier value
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.values
            .insert(normalize_placeholder(name.as_ref()), value.into())
    }

    /// Set or clear the value of a placeholder
    pub fn insert_opt(
        &mut self,
        name: impl AsRef<str>,
        value: Option<impl Into<String>>,
    ) -> Option<String> {
        match value {
            Some(value) => self.insert(name, value),
            None => self.remove(name),
        }
    }

    /// Remove a placeholder value
    pub fn remove(&mut self, name: impl AsRef<str>) -> Option<String> {
        self.values.remove(&normalize_placeholder(name.as_ref()))
    }

    /// Value for a placeholder name in any spelling
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&normalize_placeholder(name))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Normalized names and their values, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Parse a single `name=value` assignment as given on a command line.
    ///
    /// The value may be empty (rendering as `*`) and may itself contain `=`.
    pub fn parse_assignment(assignment: &str) -> Result<(String, String), SubstitutionError> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| SubstitutionError::MissingSeparator(assignment.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(SubstitutionError::EmptyName(assignment.to_string()));
        }

        Ok((name.to_string(), value.to_string()))
    }
}

impl PlaceholderValues for Substitutions {
    fn value(&self, placeholder: &str) -> Option<&str> {
        self.get(placeholder)
    }
}

impl<K, V> FromIterator<(K, V)> for Substitutions
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut substitutions = Self::new();
        substitutions.extend(iter);
        substitutions
    }
}

impl<K, V> Extend<(K, V)> for Substitutions
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// `null` entries are absent values; they never clear a value given under another spelling
impl From<BTreeMap<String, Option<String>>> for Substitutions {
    fn from(map: BTreeMap<String, Option<String>>) -> Self {
        map.into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect()
    }
}

impl From<Substitutions> for BTreeMap<String, String> {
    fn from(substitutions: Substitutions) -> Self {
        substitutions.values
    }
}
