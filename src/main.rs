mod config;
mod providers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use macroplan_core::{accumulate, plan, MacroPlanError, MacroTotals, ModelClient};
use providers::gemini::GeminiClient;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "macroplan-cli")]
#[command(about = "Generate AI meal plans from food availability, your schedule, and running macro targets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a calendar file (.ics or .json) into schedule events
    Schedule {
        /// Calendar file to parse
        file: PathBuf,
    },
    /// Generate a meal plan from food availability, schedule, and targets
    Plan {
        /// Food availability JSON file
        #[arg(short, long)]
        food: PathBuf,

        /// Calendar file (.ics or .json)
        #[arg(short, long)]
        schedule: PathBuf,

        /// Target macros JSON file (defaults to the running totals)
        #[arg(short, long)]
        targets: Option<PathBuf>,
    },
    /// Extract macros from a meal plan and add them to the running totals
    Track {
        /// Meal plan JSON file to analyze
        file: PathBuf,

        /// Treat the file as an already-extracted macro report (skip the model call)
        #[arg(long)]
        raw: bool,

        /// Totals state file (defaults to totals.json in the config directory)
        #[arg(long)]
        totals: Option<PathBuf>,
    },
    /// Show or reset the persisted running totals
    Totals {
        /// Reset all totals to zero
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule { file } => cmd_schedule(&file),
        Commands::Plan {
            food,
            schedule,
            targets,
        } => cmd_plan(&food, &schedule, targets).await,
        Commands::Track { file, raw, totals } => cmd_track(&file, raw, totals).await,
        Commands::Totals { reset } => cmd_totals(reset),
    }
}

fn cmd_schedule(file: &Path) -> Result<()> {
    let events = macroplan_core::normalize_file(file)
        .with_context(|| format!("Failed to parse schedule {}", file.display()))?;

    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

async fn cmd_plan(food: &Path, schedule: &Path, targets: Option<PathBuf>) -> Result<()> {
    let cfg = config::load_config()?;
    let model = GeminiClient::new(&cfg.model)?;

    let food_data: Value = read_json(food)?;
    let events = macroplan_core::normalize_file(schedule)
        .with_context(|| format!("Failed to parse schedule {}", schedule.display()))?;
    let targets: MacroTotals = match targets {
        Some(path) => read_json(&path)?,
        None => config::load_totals(&config::totals_path()?)?,
    };

    println!("Generating meal plan for {} schedule events...", events.len());

    let meal_plan = plan::generate_meal_plan(&model, &food_data, &targets, &events).await?;

    println!("{}", serde_json::to_string_pretty(&meal_plan)?);
    Ok(())
}

async fn cmd_track(file: &Path, raw: bool, totals: Option<PathBuf>) -> Result<()> {
    let totals_path = match totals {
        Some(path) => path,
        None => config::totals_path()?,
    };
    let totals = config::load_totals(&totals_path)?;

    let report: Value = if raw {
        read_json(file)?
    } else {
        let cfg = config::load_config()?;
        let model = GeminiClient::new(&cfg.model)?;
        let meal_plan: Value = read_json(file)?;
        extract_report(&model, &meal_plan).await?
    };

    match accumulate(&report, &totals) {
        Ok(updated) => {
            config::save_totals(&totals_path, &updated)?;
            println!("Updated totals:");
            print_totals(&updated);
        }
        Err(MacroPlanError::InvalidReport(reason)) => {
            // Recoverable: keep the accumulated history and let the user
            // retry with a corrected report.
            eprintln!("Macro report rejected ({}). Keeping previous totals.", reason);
            print_totals(&totals);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

async fn extract_report(model: &dyn ModelClient, meal_plan: &Value) -> Result<Value> {
    plan::report_macros(model, meal_plan)
        .await
        .context("Failed to extract macros from the meal plan")
}

fn cmd_totals(reset: bool) -> Result<()> {
    let path = config::totals_path()?;

    if reset {
        config::save_totals(&path, &MacroTotals::default())?;
        println!("Totals reset.");
        return Ok(());
    }

    let totals = config::load_totals(&path)?;
    print_totals(&totals);
    Ok(())
}

fn print_totals(totals: &MacroTotals) {
    println!("  calories: {}", totals.calories);
    println!("  protein:  {}", totals.protein);
    println!("  sodium:   {}", totals.sodium);
    println!("  carbs:    {}", totals.carbs);
    println!("  fat:      {}", totals.fat);
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))
}
