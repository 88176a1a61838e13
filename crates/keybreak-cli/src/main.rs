//! Keybreak CLI - runs the key-recovery pipeline against a ciphertext

use clap::Parser;
use tracing::info;

use keybreak_cli::{cli::Cli, error::Result, sink::JsonSink};
use keybreak_core::{PipelineConfig, SearchOutcome, SlotConfig};
use keybreak_runtime::{ConsoleSink, Pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let mut config = PipelineConfig::new(cli.ciphertext_bytes()?);
    config.slots = SlotConfig {
        stage_depth: cli.stage_depth,
    };

    let pipeline = Pipeline::new(config);
    let outcome = if cli.json {
        pipeline.run(JsonSink).await?
    } else {
        pipeline.run(ConsoleSink).await?
    };

    match outcome {
        SearchOutcome::KeyFound { report } => {
            info!("Recovered key {} (0x{:02x})", report.key, report.key);
            Ok(())
        }
        SearchOutcome::Exhausted { rounds } => {
            info!("No key found after {} rounds", rounds);
            std::process::exit(1);
        }
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
