//! Node Pack Loader
//!
//! Opens the sidebar demo, or answers the same questions from the command
//! line.
//!
//! # Usage
//!
//! ```bash
//! # Open the window (default)
//! node_pack_loader
//!
//! # List categories, optionally filtered
//! node_pack_loader categories --search load
//!
//! # Count and list the node types of one category
//! node_pack_loader summary "Image Loaders"
//!
//! # Lay a category out headlessly and print positions + camera as JSON
//! node_pack_loader -o json plan "Image Loaders" --columns 2
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use node_pack_core::{filter_categories, summarize, CategoryIndex};
use node_pack_loader::{
    run_load, ConfigLoader, DemoCanvas, DemoGraph, LoaderConfig, NodePackApp, YamlRegistry,
};

#[derive(Parser)]
#[command(name = "node_pack_loader")]
#[command(version = "0.1.0")]
#[command(about = "Load a category of node types onto a graph canvas")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Registry YAML (defaults to demo_registry.yaml in the config directory)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Loader config YAML (defaults to node_pack_loader.yaml in the config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format: json or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the sidebar and canvas window
    Gui,

    /// List categories
    Categories {
        /// Case-insensitive substring filter
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show the node count and node list of a category
    Summary {
        category: String,
    },

    /// Lay out a category without a window
    Plan {
        category: String,

        /// Column count (defaults to layout.default_columns)
        #[arg(long, short)]
        columns: Option<u32>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let loader = ConfigLoader::from_env();
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_config_file(path)?,
        None => loader.load_config()?,
    };
    let registry_path = cli.registry.clone().unwrap_or_else(|| loader.registry_path());
    let registry = load_registry(&registry_path)?;

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => cmd_gui(registry, &config),
        Commands::Categories { search } => cmd_categories(&registry, search.as_deref(), cli.format),
        Commands::Summary { category } => cmd_summary(&registry, &category, cli.format),
        Commands::Plan { category, columns } => {
            cmd_plan(&registry, &category, columns, &config, cli.format)
        }
    }
}

fn load_registry(path: &Path) -> Result<YamlRegistry> {
    YamlRegistry::load(path)
        .with_context(|| format!("Cannot load node registry {}", path.display()))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_gui(registry: YamlRegistry, config: &LoaderConfig) -> Result<()> {
    info!("Starting node pack loader window");
    NodePackApp::new(registry, config)
        .run(config)
        .map_err(|e| anyhow::anyhow!("window error: {e}"))
}

fn cmd_categories(
    registry: &YamlRegistry,
    search: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let index = CategoryIndex::build(registry);
    let categories = filter_categories(&index.categories(), search.unwrap_or(""));

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&categories)?);
        }
        OutputFormat::Pretty => {
            for category in &categories {
                let count = index.node_types(category).map_or(0, |types| types.len());
                println!("{} {}", category.cyan().bold(), format!("({count})").dimmed());
            }
            if categories.is_empty() {
                println!("{}", "No matching categories".yellow());
            }
        }
    }
    Ok(())
}

fn cmd_summary(registry: &YamlRegistry, category: &str, format: OutputFormat) -> Result<()> {
    let index = CategoryIndex::build(registry);
    let summary = summarize(Some(category), &index);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "category": category,
                "count": summary.count,
                "node_types": summary.node_types,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Pretty => {
            println!("{}", summary.count_label().green().bold());
            println!("{}", summary.list_text());
        }
    }
    Ok(())
}

fn cmd_plan(
    registry: &YamlRegistry,
    category: &str,
    columns: Option<u32>,
    config: &LoaderConfig,
    format: OutputFormat,
) -> Result<()> {
    let mut graph = DemoGraph::new();
    let mut canvas = DemoCanvas::new(config.window.canvas_size());
    let columns = columns.unwrap_or(config.layout.default_columns);

    let report = run_load(registry, &mut graph, &mut canvas, category, columns, config)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => {
            println!(
                "{} {} ({} columns)",
                "OK".green().bold(),
                report.category.cyan().bold(),
                report.columns
            );
            for node in &report.placed {
                println!(
                    "  {:<28} at ({:>7.1}, {:>7.1})  size {:>5.0}x{:<5.0}",
                    node.type_id.as_str(),
                    node.position.x,
                    node.position.y,
                    node.size.x,
                    node.size.y
                );
            }
            for skipped in &report.skipped {
                println!("  {} {}", "skipped".yellow(), skipped);
            }
            if let Some(frame) = report.frame {
                println!(
                    "camera offset ({:.1}, {:.1}) zoom {}",
                    frame.offset.x, frame.offset.y, frame.zoom
                );
            }
        }
    }
    Ok(())
}
