//! `iam-catalog actions <SERVICE>`

use anyhow::Result;
use iam_catalog::{AccessLevel, Catalog};
use serde::Serialize;

use crate::output::{self, Format};

#[derive(Debug, Serialize)]
struct ActionEntry<'a> {
    action: String,
    access_level: AccessLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

pub fn run(
    catalog: &Catalog,
    service: &str,
    access_level: Option<AccessLevel>,
    format: Format,
) -> Result<()> {
    let definition = catalog.service(service)?;
    let entries: Vec<ActionEntry<'_>> = definition
        .actions()
        .iter()
        .filter(|action| access_level.map_or(true, |level| action.access_level() == level))
        .map(|action| ActionEntry {
            action: definition.qualify(action.name()),
            access_level: action.access_level(),
            description: action.description(),
        })
        .collect();
    log::debug!("{} actions listed for {}", entries.len(), service);

    match format {
        Format::Json => output::print_json(&entries),
        Format::Text => output::print_lines(
            entries
                .iter()
                .map(|entry| format!("{}\t{}", entry.action, entry.access_level)),
        ),
    }
}
