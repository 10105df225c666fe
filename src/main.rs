//! partquote - CLI tool to price manufacturing files.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use partquote_rs::order::{submit_order, JsonFileOrderStore, RetryPolicy};
use partquote_rs::validation::review_request;
use partquote_rs::{
    FileDescriptor, MaterialCatalog, MaterialPolicy, OrderRecord, PricingConfig, QuoteEngine,
    QuoteRequest,
};

/// Price uploaded design files and project a delivery date.
#[derive(Parser, Debug)]
#[command(name = "partquote")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Quote request JSON ({"files": [...], "options": {...}})
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Design file on disk to add to the request (repeatable)
    #[arg(short, long = "file")]
    files: Vec<PathBuf>,

    /// Material name, overrides the request
    #[arg(short, long)]
    material: Option<String>,

    /// Quantity, overrides the request
    #[arg(short, long)]
    quantity: Option<i64>,

    /// Material catalog overrides JSON ({"name": {profile}, ...})
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Pricing configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Price unknown materials as PLA instead of failing
    #[arg(long)]
    fallback_material: bool,

    /// Production start date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Append the order record to this JSON-lines file
    #[arg(long)]
    order_out: Option<PathBuf>,

    /// User placing the order (required with --order-out)
    #[arg(long)]
    user_id: Option<String>,

    /// Order notes
    #[arg(long)]
    notes: Option<String>,

    /// Validate the request only, don't quote
    #[arg(long)]
    validate: bool,

    /// Print the material catalog and exit
    #[arg(long)]
    list_materials: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Assemble the request
    let mut request = match &args.request {
        Some(path) => QuoteRequest::from_json_file(path)
            .with_context(|| format!("Failed to read request {}", path.display()))?,
        None => QuoteRequest::default(),
    };

    for path in &args.files {
        let file = FileDescriptor::from_path(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        request.files.push(file);
    }
    if let Some(material) = &args.material {
        request.options.material = material.clone();
    }
    if let Some(quantity) = args.quantity {
        request.options.quantity = quantity;
    }

    // Pricing setup
    let mut config = match &args.config {
        Some(path) => PricingConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PricingConfig::default(),
    };
    if args.fallback_material {
        config.material_policy = MaterialPolicy::FallbackToDefault;
    }

    let catalog = match &args.catalog {
        Some(path) => MaterialCatalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => MaterialCatalog::builtin(),
    };

    if args.list_materials {
        for name in catalog.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    // Validate
    let validation = review_request(&request.files, &request.options);

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Validate-only mode
    if args.validate {
        for warning in &validation.warnings {
            warn!("{}", warning);
        }
        info!("Validation passed");
        return Ok(());
    }

    let engine = QuoteEngine::new(config, catalog)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    info!(
        "Quoting {} file(s), {} x{}",
        request.files.len(),
        request.options.material,
        request.options.quantity
    );

    let outcome = match engine.quote_request(&request, today) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("[E{}] {}", err.code_value(), err);
            anyhow::bail!("Quote failed");
        }
    };

    if !outcome.is_quoted() {
        warn!("No files given, nothing to quote");
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    // Order output
    if let Some(path) = &args.order_out {
        let user_id = args
            .user_id
            .as_deref()
            .context("--user-id is required with --order-out")?;

        let record = OrderRecord::from_quote(
            user_id,
            &request.files,
            &request.options,
            &outcome,
            args.notes.clone(),
        )?;

        let mut store = JsonFileOrderStore::new(path);
        let receipt = submit_order(&mut store, &record, RetryPolicy::default())?;
        info!("Order {} written to {}", receipt.order_id, path.display());
    }

    Ok(())
}
