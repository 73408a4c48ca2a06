//! Argument parsing and command dispatch.
//!
//! The CLI is one possible UI client for the form engine: it plays the
//! host role itself through [`CliBridge`], feeding the session a JSON file
//! (or nothing, which exercises the placeholder fallback) and receiving
//! the coerced dictionary on stdout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use console::style;

use attrformapp::bridge::{HostBridge, InitialPayload};
use attrformapp::classify::WidgetKind;
use attrformapp::config::FormConfig;
use attrformapp::error::FormError;
use attrformapp::model::PresentationValue;
use attrformapp::sample;
use attrformapp::session::Session;
use attrformapp::value::RawAttributeSet;

use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "attrform",
    bin_name = "attrform",
    version,
    about = "Inspect, search, and apply edits to schema-less attribute dictionaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the form model inferred from an attribute file
    ///
    /// Without a file the built-in sample dataset is loaded, the same
    /// fallback a session uses when no host bridge is available.
    Show {
        /// JSON file holding the raw attribute dictionary
        file: Option<PathBuf>,
    },

    /// Search the form and print matching fields with highlighted labels
    Search {
        /// Query matched against labels, values, and option labels
        query: String,
        /// JSON file holding the raw attribute dictionary
        file: Option<PathBuf>,
    },

    /// Apply edits and print the coerced dictionary as JSON
    Apply {
        /// JSON file holding the raw attribute dictionary
        file: Option<PathBuf>,
        /// Field edit in the form SECTION.KEY=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "SECTION.KEY=VALUE")]
        set: Vec<String>,
    },

    /// Print the built-in sample dataset as JSON
    Sample,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Show { file } => {
            let session = load_session(file.as_deref(), config)?;
            render::print_model(session.component_name(), session.model());
        }
        Commands::Search { query, file } => {
            let mut session = load_session(file.as_deref(), config)?;
            let outcome = session.set_search_query(query.as_str());
            render::print_search(session.model(), &outcome, &query);
        }
        Commands::Apply { file, set } => {
            let mut session = load_session(file.as_deref(), config)?;
            for edit in &set {
                apply_edit(&mut session, edit)?;
            }
            let outcome = session.apply()?;
            render::print_notices(&outcome.notices);
        }
        Commands::Sample => {
            let payload = sample::placeholder();
            let text = serde_json::to_string_pretty(&payload.options)
                .context("serializing sample dataset")?;
            println!("{text}");
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FormConfig> {
    match path {
        Some(path) => FormConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(FormConfig::default()),
    }
}

/// Bridge the CLI plays host through: the initial payload comes from the
/// file on the command line (or nowhere, triggering the sample fallback),
/// and submitted dictionaries go to stdout as JSON.
struct CliBridge {
    initial: Option<InitialPayload>,
}

impl HostBridge for CliBridge {
    fn request_initial(&mut self) -> attrformapp::Result<InitialPayload> {
        self.initial.take().ok_or(FormError::MissingHostBridge)
    }

    fn submit(&mut self, values: &RawAttributeSet) -> attrformapp::Result<()> {
        let text = serde_json::to_string_pretty(values)?;
        println!("{text}");
        Ok(())
    }

    fn notify_error(&mut self, message: &str) {
        eprintln!("{} {message}", style("error:").red().bold());
    }

    fn notify_info(&mut self, message: &str) {
        eprintln!("{} {message}", style("info:").dim());
    }
}

fn load_session(file: Option<&Path>, config: FormConfig) -> anyhow::Result<Session<CliBridge>> {
    let initial = match file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let options = RawAttributeSet::from_json_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            let component_name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attributes".to_string());
            Some(InitialPayload {
                component_name,
                options,
            })
        }
        None => None,
    };

    let mut session = Session::new(CliBridge { initial }, config);
    session.start()?;
    Ok(session)
}

/// Apply one `SECTION.KEY=VALUE` edit, interpreting VALUE through the
/// field's widget (checkboxes take true/false forms, everything else the
/// raw string).
fn apply_edit(session: &mut Session<CliBridge>, edit: &str) -> anyhow::Result<()> {
    let Some((target, value)) = edit.split_once('=') else {
        bail!("invalid edit {edit:?}: expected SECTION.KEY=VALUE");
    };
    let Some((section, key)) = target.split_once('.') else {
        bail!("invalid edit target {target:?}: expected SECTION.KEY");
    };

    let is_checkbox = matches!(
        session.model().field(section, key).map(|f| &f.widget),
        Some(WidgetKind::Checkbox)
    );
    let presentation = if is_checkbox {
        PresentationValue::Checked(parse_checked(value)?)
    } else {
        PresentationValue::Text(value.to_string())
    };

    session
        .edit_field(section, key, presentation)
        .with_context(|| format!("editing {section}.{key}"))
}

fn parse_checked(value: &str) -> anyhow::Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => bail!("invalid checkbox value {other:?}: expected true/false"),
    }
}
