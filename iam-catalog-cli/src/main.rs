//! `iam-catalog` command-line front end

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use iam_catalog::{AccessLevel, Catalog};

mod commands;
mod output;

use output::Format;

#[derive(Parser, Debug)]
#[command(
    name = "iam-catalog",
    version,
    about = "Query AWS IAM actions and render resource ARNs"
)]
struct Cli {
    /// Load service definitions from this directory instead of the built-in data
    #[arg(long, env = "IAM_CATALOG_DIR", global = true, value_name = "DIR")]
    catalog_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List services
    Services,

    /// List the actions of a service
    Actions {
        service: String,

        /// Only actions with this access level, e.g. `read` or `permissions-management`
        #[arg(long)]
        access_level: Option<AccessLevel>,
    },

    /// List the resource types of a service with their ARN templates
    Resources { service: String },

    /// Render the ARN of a resource type; unset placeholders become `*`
    Arn {
        service: String,
        resource: String,

        /// Placeholder value, e.g. `-s region=us-east-1` (repeatable)
        #[arg(
            short = 's',
            long = "set",
            value_name = "NAME=VALUE",
            value_parser = commands::arn::parse_assignment
        )]
        set: Vec<(String, String)>,
    },

    /// Expand an action pattern such as `comprehend:Detect*`
    Expand { pattern: String },

    /// Check the service definitions; exits with 1 when issues are found
    Validate,

    /// Print the JSON Schema of service data files
    Schema,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_catalog(dir: Option<&Path>) -> Result<Catalog> {
    let catalog = match dir {
        Some(dir) => {
            log::info!("Loading service definitions from {}", dir.display());
            Catalog::from_dir(dir).with_context(|| {
                format!("Failed to load service definitions from {}", dir.display())
            })?
        }
        None => Catalog::embedded().context("Failed to load built-in service definitions")?,
    };
    log::debug!("Catalogue has {} services", catalog.len());
    Ok(catalog)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let catalog = || load_catalog(cli.catalog_dir.as_deref());
    let format = cli.format;

    match cli.command {
        Command::Services => commands::services::run(&catalog()?, format)?,
        Command::Actions {
            service,
            access_level,
        } => commands::actions::run(&catalog()?, &service, access_level, format)?,
        Command::Resources { service } => {
            commands::resources::run(&catalog()?, &service, format)?;
        }
        Command::Arn {
            service,
            resource,
            set,
        } => commands::arn::run(&catalog()?, &service, &resource, set, format)?,
        Command::Expand { pattern } => commands::expand::run(&catalog()?, &pattern, format)?,
        Command::Validate => {
            if !commands::validate::run(&catalog()?, format)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Schema => commands::schema::run()?,
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
