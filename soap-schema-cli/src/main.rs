//! soap-schema-cli - Command-line front end for the WSDL/XSD ingestion engine.
//!
//! Converts a WSDL file (and its schema import closure) into a
//! `CommonAPISpec` JSON document, or prints a quick summary of what the
//! engine found without writing anything.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use soap_schema_core::{ConversionRun, ResolutionOptions};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "soap-schema-cli")]
#[command(about = "Ingests WSDL/XSD schemas into a CommonAPISpec document", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a WSDL file into a CommonAPISpec JSON document
    Convert {
        /// Path to the WSDL file
        #[arg(value_name = "WSDL_FILE")]
        wsdl_path: PathBuf,

        /// Write the JSON document here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Additional XSD files to load alongside the WSDL's own imports
        #[arg(long = "aux-xsd", value_name = "XSD_FILE")]
        aux_xsd_paths: Vec<PathBuf>,

        /// Maximum type-expansion recursion depth
        #[arg(long, default_value_t = ResolutionOptions::default().max_depth)]
        max_depth: usize,

        /// Maximum tolerated circular references before a subtree is stubbed out
        #[arg(long, default_value_t = ResolutionOptions::default().max_cycles)]
        max_cycles: usize,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Show a quick summary of a WSDL file's shape without emitting JSON
    Info {
        /// Path to the WSDL file
        #[arg(value_name = "WSDL_FILE")]
        wsdl_path: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            wsdl_path,
            output,
            aux_xsd_paths,
            max_depth,
            max_cycles,
            compact,
        } => convert_command(wsdl_path, output, aux_xsd_paths, max_depth, max_cycles, compact),
        Commands::Info { wsdl_path } => info_command(wsdl_path),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn convert_command(
    wsdl_path: PathBuf,
    output: Option<PathBuf>,
    aux_xsd_paths: Vec<PathBuf>,
    max_depth: usize,
    max_cycles: usize,
    compact: bool,
) -> Result<ExitCode> {
    let mut builder = ConversionRun::builder()
        .wsdl_path(&wsdl_path)
        .options(ResolutionOptions::builder().max_depth(max_depth).max_cycles(max_cycles).build());
    for aux in aux_xsd_paths {
        builder = builder.aux_xsd_path(aux);
    }

    let spec = builder
        .convert()
        .with_context(|| format!("converting {}", wsdl_path.display()))?;

    let json = if compact {
        serde_json::to_string(&spec)
    } else {
        serde_json::to_string_pretty(&spec)
    }
    .context("serializing CommonAPISpec to JSON")?;

    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("writing output to {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    if !spec.processing_metadata.diagnostics.is_empty() {
        eprintln!(
            "{} diagnostic(s) emitted during conversion",
            spec.processing_metadata.diagnostics.len()
        );
    }

    // §6.3: exit code zero on success, non-zero if any file in the batch
    // failed to load — all files are still attempted regardless.
    if spec.processing_metadata.files_failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{} file(s) failed to load: {}",
            spec.processing_metadata.files_failed.len(),
            spec.processing_metadata.files_failed.join(", ")
        );
        Ok(ExitCode::FAILURE)
    }
}

fn info_command(wsdl_path: PathBuf) -> Result<ExitCode> {
    let spec = ConversionRun::builder()
        .wsdl_path(&wsdl_path)
        .convert()
        .with_context(|| format!("converting {}", wsdl_path.display()))?;

    println!("API name:         {}", spec.api_name);
    println!("Target namespace: {}", spec.target_namespace);
    println!("Base URL:         {}", spec.base_url);
    println!("Services:         {}", spec.services.len());
    println!("Port types:       {}", spec.port_types.len());
    println!("Bindings:         {}", spec.bindings.len());
    println!("Messages:         {}", spec.messages.len());
    println!("Endpoints:        {}", spec.endpoints.len());
    println!("Data types:       {}", spec.data_types.len());

    if !spec.endpoints.is_empty() {
        println!("\nOperations:");
        for endpoint in &spec.endpoints {
            println!(
                "  {} {} -> {} ({} request field(s), {} response field(s))",
                endpoint.method,
                endpoint.path,
                endpoint.soap_action,
                endpoint.request.all_attributes.len(),
                endpoint.response.all_attributes.len(),
            );
        }
    }

    if !spec.processing_metadata.diagnostics.is_empty() {
        println!("\nDiagnostics:");
        for diagnostic in &spec.processing_metadata.diagnostics {
            println!("  {diagnostic:?}");
        }
    }

    if spec.processing_metadata.files_failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
