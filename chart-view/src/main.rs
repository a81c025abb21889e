//! Application entry point for the Tree Charter viewer.
//!
//! This binary parses the CLI, sets up logging and the data directories,
//! loads the requested chart (falling back to a placeholder when the file
//! is missing or rejected), runs the layout pass once, and hands the
//! result to [`Viewer`] for the interactive session.

mod icons;
mod render;
mod viewer;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, anyhow};
use chart_core::chart::ChartSource;
use chart_core::layout;
use chart_core::tree::Tree;
use clap::Parser;
use tracing::{Level, error, info, warn};

use viewer::Viewer;

/// Tree Charter: view a hand-authored chart as a node-link diagram.
///
/// Charts live in `charts/<name>.json`; icon resources in `img/<name>.png`.
#[derive(Parser, Debug)]
#[command(name = "tree-charter", version, about)]
struct Cli {
    /// Chart name, resolved to `charts/<CHART>.json`. Omit to open an
    /// empty chart.
    chart: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Ensures the chart and image directories exist.
fn setup_dirs() -> std::io::Result<()> {
    fs::create_dir_all("charts")?;
    fs::create_dir_all("img")
}

/// Loads the requested chart source, degrading to the placeholder chart
/// when the file is missing or rejected. Returns the source together
/// with the status line shown in the viewer.
fn load_source(name: Option<&str>) -> (ChartSource, String) {
    let Some(name) = name else {
        info!("no chart requested, opening empty chart");
        return (ChartSource::placeholder(), "empty chart".to_owned());
    };

    let path = PathBuf::from("charts").join(format!("{name}.json"));
    if !path.exists() {
        warn!("couldn't find {}, opening empty chart", path.display());
        return (
            ChartSource::placeholder(),
            format!("couldn't find {}, opened an empty chart", path.display()),
        );
    }

    match ChartSource::load(&path) {
        Ok(source) => {
            info!("loaded {}", path.display());
            (source, format!("loaded {}", path.display()))
        }
        Err(err) => {
            error!("failed to load {}: {err}", path.display());
            (
                ChartSource::placeholder(),
                format!("failed to load {}: {err}", path.display()),
            )
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    setup_dirs().context("creating charts/ and img/ directories")?;

    let (source, mut status) = load_source(cli.chart.as_deref());
    let mut tree: Tree = match source.build() {
        Ok(tree) => tree,
        Err(err) => {
            // A present-but-inconsistent chart (bad parent ids, cycles)
            // is surfaced once; the session continues on the placeholder.
            error!("chart rejected: {err}");
            status = format!("chart rejected: {err}");
            ChartSource::placeholder()
                .build()
                .map_err(|err| anyhow!("placeholder chart failed to build: {err}"))?
        }
    };
    layout::layout(&mut tree);
    info!(nodes = tree.nodes.len(), "chart ready");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Tree Charter",
        options,
        Box::new(move |cc| Ok(Box::new(Viewer::new(&cc.egui_ctx, tree, status)))),
    )
    .map_err(|err| anyhow!("eframe: {err}"))
}
