//! # Folio CLI
//!
//! Renders and inspects the portfolio page.
//!
//! ## Commands
//! - `render`: Write the static HTML page
//! - `variants`: Dump the animation variant registry as JSON
//! - `schedule`: Print the reveal schedule of one section as JSON
//! - `simulate`: Scroll a mounted page top to bottom and report what reveals

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_core::sections::ORDER;
use folio_core::{render, Page, SiteConfig, VariantRegistry};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Single-page portfolio engine")]
#[command(version)]
struct Cli {
    /// Site configuration (JSON). Defaults apply to anything left out.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page as HTML
    Render {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the animation variants as JSON
    Variants,

    /// Print the reveal schedule of a section's groups as JSON
    Schedule {
        /// Section anchor: navbar, home, about, skills, experience, contact, footer
        section: String,
    },

    /// Scroll from the top to the bottom of the page and log what happens
    Simulate {
        /// Number of scroll positions between top and bottom
        #[arg(short, long, default_value = "20")]
        steps: u32,

        /// Frames per second of the simulated clock
        #[arg(short, long, default_value = "60")]
        fps: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "folio=debug,folio_core=debug"
    } else {
        "folio=info,folio_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { out } => cmd_render(&config, out.as_deref()),
        Commands::Variants => cmd_variants(),
        Commands::Schedule { section } => cmd_schedule(&config, &section),
        Commands::Simulate { steps, fps } => cmd_simulate(&config, steps, fps),
    }
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => {
            let config = SiteConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(SiteConfig::default()),
    }
}

fn cmd_render(config: &SiteConfig, out: Option<&Path>) -> Result<()> {
    let page = Page::compose(config);
    let html = render::html(&page);
    match out {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} ({} bytes)", path.display(), html.len());
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn cmd_variants() -> Result<()> {
    let registry = VariantRegistry::global();
    let json = serde_json::to_string_pretty(&registry.describe())?;
    println!("{}", json);
    Ok(())
}

fn cmd_schedule(config: &SiteConfig, section: &str) -> Result<()> {
    let page = Page::compose(config);
    let schedules = page
        .schedule(section, VariantRegistry::global())
        .with_context(|| format!("Unknown section '{}' (expected one of: {})", section, ORDER.join(", ")))?;
    println!("{}", serde_json::to_string_pretty(&schedules)?);
    Ok(())
}

fn cmd_simulate(config: &SiteConfig, steps: u32, fps: f64) -> Result<()> {
    anyhow::ensure!(steps > 0, "--steps must be at least 1");
    anyhow::ensure!(fps > 0.0, "--fps must be positive");

    let page = Page::compose(config);
    let mut mounted = page.mount(config.viewport.into())?;
    let frame = Duration::from_secs_f64(1.0 / fps);
    let max_scroll = (mounted.layout().document_height() - config.viewport.height).max(0.0);

    println!(
        "Simulating '{}': document {:.0}px, {} steps",
        mounted.title(),
        mounted.layout().document_height(),
        steps
    );

    let mut reveals = 0;
    for step in 0..=steps {
        let y = max_scroll * step as f32 / steps as f32;
        let events = mounted.on_scroll(y)?;
        let state = mounted.tick(frame)?;

        for event in &events {
            println!(
                "  [{:>6.2}s] node {:>4} {:<12} {:?} ({:.2})",
                event.time, event.root, event.variant, event.change, event.ratio
            );
        }
        reveals += events.len();
        println!(
            "step {:>3}/{}: y = {:>7.1}  progress = {:.3}  navbar {}",
            step,
            steps,
            state.scroll_y,
            state.progress,
            if state.nav_scrolled { "scrolled" } else { "top" }
        );
    }

    println!(
        "Done: {} visibility events, {} groups still observed",
        reveals,
        mounted.observed_groups()
    );
    Ok(())
}
