//! Edit a text pipeline interactively using egui (requires `--features egui`).
//!
//! Usage:
//!   cargo run --features egui --example pipeline_editor -- [pipeline.json]

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;

use pipevis::egui_app::PipelineApp;
use pipevis::model::PipelineSpec;

#[derive(Parser, Debug)]
#[command(author, version, about = "Edit a text pipeline interactively using egui", long_about = None)]
struct Args {
    /// Pipeline description JSON file; omit to edit the built-in demo pipeline
    #[arg(value_name = "PIPELINE_JSON")]
    file: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let spec = match &args.file {
        Some(file) => {
            let path = Utf8PathBuf::from(file);
            PipelineSpec::load_json(&path).with_context(|| format!("Failed to load {}", path))?
        }
        None => PipelineSpec::demo(),
    };
    let pipeline = spec.build()?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_maximized(true),
        ..Default::default()
    };
    eframe::run_native(
        "pipevis pipeline editor",
        options,
        Box::new(|_cc| Ok(Box::new(PipelineApp::new(pipeline)) as Box<dyn eframe::App>)),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
