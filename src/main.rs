use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;

use pipevis::model::PipelineSpec;
use pipevis::scene;

#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate a text-processing pipeline and print its trace as JSON", long_about = None)]
struct Cli {
    /// Pipeline description JSON file; omit to evaluate the built-in demo pipeline
    #[arg(value_name = "PIPELINE_JSON")]
    pipeline_file: Option<String>,

    /// Also print the drawable scene primitives
    #[arg(long)]
    scene: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let spec = match &cli.pipeline_file {
        Some(file) => {
            let path = Utf8PathBuf::from(file);
            PipelineSpec::load_json(&path).with_context(|| format!("Failed to load {}", path))?
        }
        None => PipelineSpec::demo(),
    };

    let pipeline = spec.build()?;
    let trace = pipeline.evaluate();
    println!("{}", serde_json::to_string_pretty(&trace)?);

    if cli.scene {
        let shapes = scene::build_scene(&pipeline, &trace, None);
        println!("{}", serde_json::to_string_pretty(&shapes)?);
    }
    Ok(())
}
