//! `iam-catalog arn <SERVICE> <RESOURCE> [-s NAME=VALUE]...`

use anyhow::Result;
use iam_catalog::{Catalog, SubstitutionError, Substitutions};
use serde::Serialize;

use crate::output::{self, Format};

#[derive(Debug, Serialize)]
struct RenderedArn<'a> {
    service: &'a str,
    resource: &'a str,
    arn: String,
}

/// `value_parser` for `--set`
pub fn parse_assignment(assignment: &str) -> Result<(String, String), SubstitutionError> {
    Substitutions::parse_assignment(assignment)
}

pub fn run(
    catalog: &Catalog,
    service: &str,
    resource: &str,
    assignments: Vec<(String, String)>,
    format: Format,
) -> Result<()> {
    let definition = catalog.resource(service, resource)?;
    let values: Substitutions = assignments.into_iter().collect();

    // Values for names the template does not use are ignored by rendering
    if let Ok(template) = definition.template() {
        for (name, _) in values.iter() {
            if !template.has_placeholder(name) {
                log::warn!(
                    "'{}' is not a placeholder of {}/{} ({})",
                    name,
                    service,
                    resource,
                    definition.arn_format()
                );
            }
        }
    }

    let arn = catalog.render_arn(service, resource, &values)?;
    match format {
        Format::Json => output::print_json(&RenderedArn {
            service,
            resource,
            arn,
        }),
        Format::Text => output::print_lines([arn]),
    }
}
