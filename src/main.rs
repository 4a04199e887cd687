//! Property Sim CLI
//!
//! Command-line interface for running investment projections and managing
//! saved scenarios

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use property_sim::inputs::{self, InvestmentInputs};
use property_sim::loan::{AmortizationEngine, RepaymentMethod};
use property_sim::projection::ProjectionEngine;
use property_sim::report;
use property_sim::scenario::{self, SaveOutcome, ScenarioStore, DEFAULT_STORE_PATH};

#[derive(Parser, Debug)]
#[command(name = "property_sim", version, about = "Leveraged real-estate investment projections")]
struct Cli {
    /// Scenario store file
    #[arg(long, global = true, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a scenario and print its metrics and statements
    Run {
        /// Input record (JSON, or field,value CSV)
        #[arg(short, long, conflicts_with_all = ["scenario", "example"])]
        input: Option<PathBuf>,

        /// Saved scenario name
        #[arg(short, long, conflicts_with = "example")]
        scenario: Option<String>,

        /// Use the built-in reference scenario
        #[arg(long)]
        example: bool,

        /// Directory to write CSV exports into
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the full result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Print an amortization table
    Schedule {
        #[arg(long)]
        principal: f64,

        /// Annual rate in percent
        #[arg(long)]
        rate: f64,

        #[arg(long)]
        years: u32,

        #[arg(long, value_enum, default_value = "equal-payment")]
        method: RepaymentMethod,
    },

    /// Save an input record under a name (replaces an existing one)
    Save {
        name: String,

        #[arg(short, long)]
        input: PathBuf,
    },

    /// List saved scenarios
    List,

    /// Delete a saved scenario
    Delete { name: String },

    /// Compare metrics across all saved scenarios
    Compare,
}

fn resolve_inputs(
    store: &mut ScenarioStore,
    input: Option<PathBuf>,
    scenario: Option<String>,
    example: bool,
) -> Result<InvestmentInputs> {
    if let Some(path) = input {
        return inputs::load_inputs(&path)
            .with_context(|| format!("failed to load inputs from {}", path.display()));
    }
    if let Some(name) = scenario {
        return Ok(store.load(&name)?.inputs);
    }
    if !example {
        if let Some(current) = store.current() {
            println!("Using current scenario \"{}\"", current.name);
            return Ok(current.inputs.clone());
        }
    }
    Ok(InvestmentInputs::example())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            input,
            scenario,
            example,
            csv,
            json,
        } => {
            let mut store = ScenarioStore::open(&cli.store)?;
            let inputs = resolve_inputs(&mut store, input, scenario, example)?;
            inputs::validate(&inputs)?;

            let schedule = inputs.loan_terms().schedule();
            let result = ProjectionEngine::new(inputs).project(&schedule);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Key metrics:");
                print!("{}", report::format_metrics(&result.metrics));
                println!();
                print!("{}", report::format_statements(&result));
            }

            if let Some(dir) = csv {
                let written = report::export_all(&dir, &result, &schedule)
                    .with_context(|| format!("failed to export CSV to {}", dir.display()))?;
                for path in written {
                    println!("Wrote {}", path.display());
                }
            }
        }

        Command::Schedule {
            principal,
            rate,
            years,
            method,
        } => {
            let schedule = AmortizationEngine::compute_for(principal, rate, years, method);
            print!("{}", report::format_schedule(&schedule));
        }

        Command::Save { name, input } => {
            let inputs = inputs::load_inputs(&input)
                .with_context(|| format!("failed to load inputs from {}", input.display()))?;
            inputs::validate(&inputs)?;

            let mut store = ScenarioStore::open(&cli.store)?;
            match store.save(&name, inputs)? {
                SaveOutcome::Created => println!("Saved scenario \"{}\"", name.trim()),
                SaveOutcome::Overwritten => println!("Replaced scenario \"{}\"", name.trim()),
            }
        }

        Command::List => {
            let store = ScenarioStore::open(&cli.store)?;
            if store.is_empty() {
                println!("No saved scenarios in {}", store.path().display());
            }
            let current = store.current().map(|s| s.name.clone());
            for s in store.list() {
                let marker = if Some(&s.name) == current.as_ref() { "*" } else { " " };
                println!("{} {:<32} {}", marker, s.name, s.timestamp.to_rfc3339());
            }
        }

        Command::Delete { name } => {
            let mut store = ScenarioStore::open(&cli.store)?;
            store.delete(&name)?;
            println!("Deleted scenario \"{}\"", name);
        }

        Command::Compare => {
            let store = ScenarioStore::open(&cli.store)?;
            if store.len() < 2 {
                bail!("save at least two scenarios to compare (found {})", store.len());
            }
            let comparison = scenario::compare(store.list());
            print!("{}", report::format_comparison(&comparison));
        }
    }

    Ok(())
}
