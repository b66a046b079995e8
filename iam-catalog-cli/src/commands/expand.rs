//! `iam-catalog expand <PATTERN>`

use anyhow::Result;
use iam_catalog::Catalog;

use crate::output::{self, Format};

pub fn run(catalog: &Catalog, pattern: &str, format: Format) -> Result<()> {
    let actions = catalog.expand_actions(pattern)?;
    if actions.is_empty() {
        log::warn!("No actions match '{}'", pattern);
    }

    match format {
        Format::Json => output::print_json(&actions),
        Format::Text => output::print_lines(&actions),
    }
}
