//! `iam-catalog validate`

use anyhow::Result;
use iam_catalog::{Catalog, ValidationIssue};
use serde::Serialize;

use crate::output::{self, Format};

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    services: usize,
    issues: &'a [ValidationIssue],
}

/// Returns whether the catalogue is free of issues
pub fn run(catalog: &Catalog, format: Format) -> Result<bool> {
    let issues = catalog.validate();

    match format {
        Format::Json => output::print_json(&ValidationReport {
            services: catalog.len(),
            issues: &issues,
        })?,
        Format::Text => {
            output::print_lines(issues.iter().map(ToString::to_string))?;
            if issues.is_empty() {
                output::print_lines([format!("{} services, no issues found", catalog.len())])?;
            } else {
                log::error!("{} issues found", issues.len());
            }
        }
    }

    Ok(issues.is_empty())
}
