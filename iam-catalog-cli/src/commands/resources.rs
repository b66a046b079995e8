//! `iam-catalog resources <SERVICE>`

use anyhow::Result;
use iam_catalog::Catalog;
use serde::Serialize;

use crate::output::{self, Format};

#[derive(Debug, Serialize)]
struct ResourceEntry<'a> {
    name: &'a str,
    arn_format: &'a str,
    placeholders: Vec<String>,
}

pub fn run(catalog: &Catalog, service: &str, format: Format) -> Result<()> {
    let definition = catalog.service(service)?;
    let entries: Vec<ResourceEntry<'_>> = definition
        .resources()
        .iter()
        .map(|resource| ResourceEntry {
            name: resource.name(),
            arn_format: resource.arn_format(),
            placeholders: resource
                .template()
                .map(|template| template.placeholders().map(str::to_string).collect())
                .unwrap_or_default(),
        })
        .collect();

    match format {
        Format::Json => output::print_json(&entries),
        Format::Text => {
            let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
            output::print_lines(entries.iter().map(|entry| {
                format!("{:<width$}  {}", entry.name, entry.arn_format, width = width)
            }))
        }
    }
}
