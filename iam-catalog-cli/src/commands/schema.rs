//! `iam-catalog schema`

use anyhow::Result;

use crate::output;

/// The schema is JSON whatever the requested format
pub fn run() -> Result<()> {
    output::print_json(&iam_catalog::service_definition_schema())
}
