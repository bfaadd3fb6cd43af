use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use cutlist_core::{CutlistEngine, DoorConfig, MaterialSummary, StockSettings};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cutlist")]
#[command(about = "Door Cut-List - Calculate bar and sheet stock for a door leaf", long_about = None)]
struct Cli {
    /// Show engine debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the cut-list for a door configuration
    Compute {
        /// Door configuration file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Stock settings file (YAML or JSON), defaults apply otherwise
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Output file for result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the stock formats and allowances in effect
    Catalogue {
        /// Stock settings file (YAML or JSON)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compute {
            input,
            settings,
            output,
        } => {
            compute_command(input, settings, output)?;
        }
        Commands::Catalogue { settings } => {
            catalogue_command(settings)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a YAML (`.yaml`/`.yml`) or JSON document.
fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );
    debug!(path = %path.display(), yaml = is_yaml, "Loading document");
    let document = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    };

    Ok(document)
}

fn load_settings(path: Option<PathBuf>) -> Result<StockSettings> {
    match path {
        Some(path) => load_document(&path),
        None => Ok(StockSettings::default()),
    }
}

fn compute_command(
    input: PathBuf,
    settings: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    println!("{}", "🔍 Loading door configuration...".bright_blue());

    let config: DoorConfig = load_document(&input)?;
    let settings = load_settings(settings)?;

    println!(
        "  {} x {} mm leaf, {} mm thick",
        config.width.to_string().bright_white().bold(),
        config.height.to_string().bright_white().bold(),
        config.thickness
    );
    println!(
        "  {} prism(s) per frame side, {} sheet format(s) available",
        config.prism_count.to_string().bright_white().bold(),
        settings.sheet_formats.len().to_string().bright_white().bold()
    );
    println!();

    println!("{}", "🚀 Computing cut-list...".bright_blue());

    let engine = CutlistEngine::new(config, settings)?;
    let summary = engine.compute();

    println!();
    println!("{}", "✅ Cut-list complete!".bright_green().bold());
    println!();

    print_report(&summary);

    let json = serde_json::to_string_pretty(&summary)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)
            .with_context(|| format!("could not write {}", output_path.display()))?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn print_report(summary: &MaterialSummary) {
    let prism = &summary.prism;
    let mdf = &summary.mdf;

    println!("{}", "📊 Results:".bright_yellow().bold());
    println!(
        "  Prism bars ({} mm): {}",
        prism.standard_length,
        prism.bars_needed.to_string().bright_white().bold()
    );
    for (idx, bar) in prism.bars.iter().enumerate() {
        let cuts: Vec<String> = bar
            .cuts
            .iter()
            .map(|c| format!("{} {}", c.name, c.nominal_length))
            .collect();
        println!(
            "    • Bar {}: {} ({} mm left)",
            idx + 1,
            cuts.join(", "),
            bar.remaining
        );
    }
    println!(
        "  Bar waste: {}",
        format!("{:.1}%", prism.waste_percentage).bright_white()
    );
    println!();

    println!(
        "  MDF sheets: {}",
        mdf.sheets_needed.to_string().bright_white().bold()
    );
    for group in &mdf.groups {
        let formats: Vec<&str> = group
            .sheets
            .iter()
            .map(|s| s.format.label.as_str())
            .collect();
        println!(
            "    • {}: {} sheet(s) [{}], waste {:.1}%",
            group.label.bright_white(),
            group.sheets.len(),
            formats.join(", "),
            group.waste_percentage
        );
    }
    println!(
        "  Sheet waste: {}",
        format!("{:.1}%", mdf.waste_percentage).bright_white()
    );
    println!();

    let infill = &summary.infill;
    println!(
        "  Infill: {} x {} x {} mm, {:.2} m², {:.2} kg",
        infill.width, infill.height, infill.thickness, infill.area, infill.weight
    );
    println!(
        "  Total mass: {}",
        format!("{:.1} kg", summary.assembly.total_mass).bright_white().bold()
    );
    println!(
        "  Coated area: {}",
        format!("{:.2} m²", summary.assembly.coated_area).bright_white()
    );
    println!(
        "  Combined waste (by mass): {}",
        format!("{:.1}%", summary.assembly.combined_waste_percentage).bright_green()
    );

    if summary.is_approximate() {
        println!();
        println!(
            "  {}",
            "⚠ Pieces larger than any stock (oversized stock assumed):".bright_red()
        );
        for name in &summary.degenerate_pieces {
            println!("    • {}", name.bright_red());
        }
    }

    println!();
}

fn catalogue_command(settings: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(settings)?;
    settings.validate()?;

    println!("{}", "📦 Stock catalogue:".bright_yellow().bold());
    println!(
        "  Bars: {} mm, {} mm reserve per cut",
        settings.standard_length.to_string().bright_white(),
        settings.kerf_reserve
    );
    println!("  Sheets ({} mm kerf):", settings.sheet_kerf);
    for format in &settings.sheet_formats {
        println!(
            "    • {} ({} x {} mm)",
            format.label.bright_white(),
            format.width,
            format.height
        );
    }

    Ok(())
}
