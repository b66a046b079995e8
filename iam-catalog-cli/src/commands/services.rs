//! `iam-catalog services`

use anyhow::Result;
use iam_catalog::Catalog;
use serde::Serialize;

use crate::output::{self, Format};

#[derive(Debug, Serialize)]
struct ServiceSummary<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<&'a str>,
    actions: usize,
    resources: usize,
}

pub fn run(catalog: &Catalog, format: Format) -> Result<()> {
    let summaries: Vec<ServiceSummary<'_>> = catalog
        .services()
        .map(|service| ServiceSummary {
            name: service.name(),
            full_name: service.full_name(),
            actions: service.actions().len(),
            resources: service.resources().len(),
        })
        .collect();

    match format {
        Format::Json => output::print_json(&summaries),
        Format::Text => {
            let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
            output::print_lines(summaries.iter().map(|s| {
                format!(
                    "{:<width$}  {} ({} actions, {} resource types)",
                    s.name,
                    s.full_name.unwrap_or("-"),
                    s.actions,
                    s.resources,
                    width = width
                )
            }))
        }
    }
}
