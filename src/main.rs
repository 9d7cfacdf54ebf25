//! carspec CLI
//!
//! Runs the vehicle recognition and specification pipeline on a single image
//! and prints the resulting record as JSON. The HTTP layer, if any, lives
//! outside this crate; this binary is the reference entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use carspec::config::PipelineConfig;
use carspec::llm::client::OllamaClient;
use carspec::pipeline::SpecPipeline;
use carspec::utils::logging::{init_logging, LogConfig};

/// Vehicle make/model and year recognition with engine specification
/// enrichment
#[derive(Parser, Debug)]
#[command(name = "carspec")]
#[command(version = "0.1.0")]
#[command(about = "Identify a car from a photo and assemble its engine specs", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the pipeline on one image and print the record as JSON
    Predict {
        /// Path to the input image (PNG or JPEG)
        image: PathBuf,

        /// Path to the pipeline configuration file
        #[arg(short, long, default_value = "carspec.json")]
        config: PathBuf,

        /// Override the estimation service endpoint
        #[arg(long, env = "CARSPEC_OLLAMA_URL")]
        ollama_url: Option<String>,
    },

    /// Write a default configuration file to the given path
    InitConfig {
        /// Where to write the configuration
        #[arg(default_value = "carspec.json")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    init_logging(&log_config).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Predict {
            image,
            config,
            ollama_url,
        } => {
            let mut config = PipelineConfig::load(&config)?;
            if let Some(url) = ollama_url {
                config.estimator.url = url;
            }

            info!("Loading pipeline artifacts");
            let estimator = Arc::new(OllamaClient::from_config(&config.estimator)?);
            let pipeline = SpecPipeline::load(&config, estimator)?;

            let bytes = std::fs::read(&image)?;
            let response = pipeline.predict_image(&bytes).await?;

            println!(
                "{} {} ({}) - model {:.1}%, year {:.1}%",
                "Identified:".green().bold(),
                response.car.replace('_', " "),
                response.year,
                response.confidence.model * 100.0,
                response.confidence.year * 100.0
            );
            if let Some(detail) = &response.llm_error {
                eprintln!("{} {}", "Estimation failed:".yellow(), detail);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::InitConfig { path } => {
            let config = PipelineConfig::default();
            config.save(&path)?;
            println!("Wrote default configuration to {:?}", path);
        }
    }

    Ok(())
}
