//! strategen CLI entrypoint
//! Parses command-line arguments and dispatches to the application use cases.
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use strategen::application::{
    EngineBuilder, ExportTemplatesUseCase, GenerateAggregateRequest, GenerateAggregateUseCase,
    GenerateSolutionRequest, GenerateSolutionUseCase, GenerationEngine, GenerationReport,
    ListTemplatesUseCase, PropertyDefinition, SolutionLayout,
};
use strategen::core::Settings;
use strategen::infrastructure::templates::EmbeddedTemplateLocator;
use strategen::infrastructure::{DryRunCommandExecutor, MemoryFileSystem};

#[derive(Parser)]
#[command(name = "strategen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a solution with its projects and shared build files
    Solution {
        /// Solution name; falls back to `solution_name` from the settings
        #[arg(long)]
        name: Option<String>,
        /// Solution layout: single or microservice
        #[arg(long, default_value = "single")]
        layout: SolutionLayout,
        #[command(flatten)]
        generation: GenerationArgs,
    },
    /// Generate entity, DTO, repository and controller for an aggregate
    Aggregate {
        /// Aggregate name, e.g. Order
        #[arg(long)]
        name: String,
        /// Property as Name:type, or Name:type? when nullable (repeatable)
        #[arg(long = "property", value_name = "NAME:TYPE")]
        properties: Vec<PropertyDefinition>,
        /// Namespace below the root namespace; defaults to the plural name
        #[arg(long)]
        namespace: Option<String>,
        #[command(flatten)]
        generation: GenerationArgs,
    },
    /// List registered strategies by model type
    Strategies {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or export the embedded templates
    Templates {
        #[command(subcommand)]
        action: TemplateCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum TemplateCommands {
    /// List embedded templates
    List,
    /// Copy embedded templates to a directory for use with --template-dir
    Export {
        /// Destination directory
        output_dir: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct GenerationArgs {
    /// Output directory for generated code
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Settings file (YAML, TOML or JSON)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Custom template directory overriding embedded templates
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Print what would be written and run without touching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Solution {
            name,
            layout,
            generation,
        } => generate_solution(name, layout, &generation).await?,
        Commands::Aggregate {
            name,
            properties,
            namespace,
            generation,
        } => generate_aggregate(name, properties, namespace, &generation).await?,
        Commands::Strategies { json } => list_strategies(json)?,
        Commands::Templates { action } => match action {
            TemplateCommands::List => {
                println!("{}", ListTemplatesUseCase::new(EmbeddedTemplateLocator::new()).execute());
            }
            TemplateCommands::Export { output_dir } => {
                let count = ExportTemplatesUseCase::new(EmbeddedTemplateLocator::new())
                    .execute(&output_dir)
                    .with_context(|| {
                        format!("Failed to export templates to {}", output_dir.display())
                    })?;
                println!("Exported {count} template(s) to {}", output_dir.display());
            }
        },
    }
    Ok(())
}

/// Build an engine for one generation command
fn build_engine(settings: Settings, args: &GenerationArgs) -> anyhow::Result<GenerationEngine> {
    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping before the next step");
            signal_token.cancel();
        }
    });

    let mut builder = EngineBuilder::new(settings)
        .template_dir(args.template_dir.clone())
        .cancellation(token);
    if args.dry_run {
        info!("Dry run: nothing will be written or executed");
        builder = builder
            .filesystem(Arc::new(MemoryFileSystem::new()))
            .commands(Arc::new(DryRunCommandExecutor::new()));
    }
    builder.build().context("Failed to build generation engine")
}

fn load_settings(args: &GenerationArgs) -> anyhow::Result<Settings> {
    Settings::discover(args.settings.as_deref(), &args.output_dir)
        .context("Failed to load settings")
}

/// Generate a solution
async fn generate_solution(
    name: Option<String>,
    layout: SolutionLayout,
    args: &GenerationArgs,
) -> anyhow::Result<()> {
    let settings = load_settings(args)?;
    let name = name
        .or_else(|| settings.solution_name.clone())
        .context("No solution name: pass --name or set solution_name in the settings")?;

    let engine = build_engine(settings, args)?;
    let response = GenerateSolutionUseCase::new(Arc::new(engine))
        .execute(GenerateSolutionRequest {
            name,
            layout,
            output_dir: args.output_dir.clone(),
        })
        .await
        .context("Failed to generate solution")?;

    print_report(&response.report, args.dry_run);
    println!(
        "Generated {} with {} project(s)",
        response.solution_file.display(),
        response.projects.len()
    );
    Ok(())
}

/// Generate an aggregate
async fn generate_aggregate(
    name: String,
    properties: Vec<PropertyDefinition>,
    namespace: Option<String>,
    args: &GenerationArgs,
) -> anyhow::Result<()> {
    let settings = load_settings(args)?;
    let engine = build_engine(settings, args)?;
    let response = GenerateAggregateUseCase::new(Arc::new(engine))
        .execute(GenerateAggregateRequest {
            name,
            namespace,
            properties,
            output_dir: args.output_dir.clone(),
        })
        .await
        .context("Failed to generate aggregate")?;

    print_report(&response.report, args.dry_run);
    println!(
        "Generated {} file(s) in {}",
        response.report.files_written().len(),
        response.folder.display()
    );
    Ok(())
}

fn print_report(report: &GenerationReport, dry_run: bool) {
    if dry_run {
        for effect in report.effects() {
            println!("{effect}");
        }
    }
}

/// Print every registration of both layers
fn list_strategies(as_json: bool) -> anyhow::Result<()> {
    let settings = Settings::discover(None, Path::new(".")).context("Failed to load settings")?;
    let engine = EngineBuilder::new(settings)
        .filesystem(Arc::new(MemoryFileSystem::new()))
        .commands(Arc::new(DryRunCommandExecutor::new()))
        .build()
        .context("Failed to build generation engine")?;

    let artifacts = engine.artifacts().registry();
    let syntax = engine.syntax().registry();

    let mut rows = Vec::new();
    for registration in artifacts.registrations() {
        rows.push((
            artifacts.kind(),
            registration.model_type_name(),
            registration.strategy_name(),
            registration.priority(),
        ));
    }
    for registration in syntax.registrations() {
        rows.push((
            syntax.kind(),
            registration.model_type_name(),
            registration.strategy_name(),
            registration.priority(),
        ));
    }

    if as_json {
        let value: Vec<_> = rows
            .iter()
            .map(|(kind, model, strategy, priority)| {
                json!({
                    "kind": kind.to_string(),
                    "model": model,
                    "strategy": strategy,
                    "priority": priority,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for (kind, model, strategy, priority) in rows {
            let kind = kind.to_string();
            println!("{kind:<8} {model:<20} {strategy} (priority {priority})");
        }
    }
    Ok(())
}
