use crate::cli::args::Cli;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::processors::{CleaningPipeline, STEP_COUNT};
use crate::utils::progress::ProgressReporter;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, Level};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = PipelineConfig::load(cli.config.as_deref())?;
    let layout = config.layout(&cli.project_root);
    info!(
        raw = %layout.raw_dir().display(),
        processed = %layout.processed_dir().display(),
        "Starting cleaning run"
    );

    println!("Cleaning raw data -> {}/\n", config.processed_dir);

    let progress = ProgressReporter::new(STEP_COUNT, "Cleaning", cli.no_progress);
    let pipeline = CleaningPipeline::new(config);
    let outcomes = pipeline.run(&layout, &progress)?;
    progress.finish_and_clear();

    let skipped = outcomes.iter().filter(|o| o.is_skipped()).count();
    info!(
        written = outcomes.len() - skipped,
        skipped, "Cleaning run complete"
    );

    println!("\nDone.");
    Ok(())
}

/// Install the global fmt subscriber: WARN by default, DEBUG when verbose,
/// to stderr or to an appended log file.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    // A subscriber may already be installed when embedded or under test
    if installed.is_err() {
        tracing::debug!("Global tracing subscriber already set");
    }
    Ok(())
}
