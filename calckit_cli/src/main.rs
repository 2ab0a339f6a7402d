//! # calckit CLI
//!
//! Command-line consumer for the calckit catalogue. It plays the part of a
//! form renderer: list and inspect calculators, evaluate one from
//! `--set key=value` pairs, or fill one in interactively.

mod logging;
mod prompt;
mod render;

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use calckit_core::definition::{CalculatorDefinition, CalculatorSummary};
use calckit_core::output::Evaluation;
use calckit_core::snapshot::Snapshot;
use calckit_core::{Category, RawValue, Registry, RegistryConfig};

#[derive(Parser)]
#[command(name = "calckit")]
#[command(about = "Evaluate declarative calculators from the command line")]
struct Args {
    /// Path to a TOML configuration file with a [registry] table
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List calculators, optionally for one category
    List {
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        json: bool,
    },
    /// Show the inputs and outputs of a calculator
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a calculator
    Eval {
        id: String,
        /// Input value as key=value (repeatable)
        #[arg(long = "set", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
        #[arg(long)]
        json: bool,
    },
    /// Fill in a calculator interactively
    Fill { id: String },
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

#[derive(Serialize)]
struct EvaluationReport<'a> {
    calculator: &'a str,
    inputs: &'a Snapshot,
    visible: Vec<&'a str>,
    outputs: &'a [Evaluation],
}

fn load_config(path: Option<&PathBuf>) -> Result<RegistryConfig> {
    let config = match path {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn lookup<'a>(registry: &'a Registry, id: &str) -> Result<&'a CalculatorDefinition> {
    match registry.get(id) {
        Some(definition) => Ok(definition),
        None => bail!(
            "no calculator named '{}'; run `calckit list` to see the {} available",
            id,
            registry.len()
        ),
    }
}

fn raw_values(definition: &CalculatorDefinition, values: Vec<(String, String)>) -> Result<HashMap<String, RawValue>> {
    let mut raw = HashMap::new();
    for (key, value) in values {
        if definition.field(&key).is_none() {
            let known: Vec<&str> = definition.inputs.iter().map(|f| f.id).collect();
            bail!("'{}' has no input '{}' (inputs: {})", definition.id, key, known.join(", "));
        }
        raw.insert(key, RawValue::from(value));
    }
    Ok(raw)
}

fn print_evaluation(definition: &CalculatorDefinition, snapshot: &Snapshot, json: bool) -> Result<()> {
    let results = definition.evaluate(snapshot);
    if json {
        let report = EvaluationReport {
            calculator: definition.id,
            inputs: snapshot,
            visible: definition.visible_inputs(snapshot).iter().map(|f| f.id).collect(),
            outputs: &results,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_evaluation(definition, snapshot, &results));
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_ref()).context("failed to load configuration")?;
    debug!(?config, "using registry configuration");
    let registry = Registry::builtin_with(&config).context("built-in catalogue failed validation")?;
    info!(calculators = registry.len(), "catalogue loaded");

    match args.command {
        Command::List { category, json } => {
            let definitions = registry.list(category);
            if json {
                let summaries: Vec<CalculatorSummary> = definitions.iter().map(|d| d.summary()).collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print!("{}", render::render_list(&definitions));
            }
        }
        Command::Show { id, json } => {
            let definition = lookup(&registry, &id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(definition)?);
            } else {
                print!("{}", render::render_definition(definition));
            }
        }
        Command::Eval { id, values, json } => {
            let definition = lookup(&registry, &id)?;
            let raw = raw_values(definition, values)?;
            print_evaluation(definition, &definition.snapshot(&raw), json)?;
        }
        Command::Fill { id } => {
            let definition = lookup(&registry, &id)?;
            println!("{} - press Enter to keep the value in brackets", definition.title);
            let raw = prompt::fill(definition, &mut io::stdin().lock(), &mut io::stdout())?;
            println!();
            print_evaluation(definition, &definition.snapshot(&raw), false)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_cli_logger(args.verbose);
    run(args)
}
