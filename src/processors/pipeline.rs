use crate::config::{DataLayout, PipelineConfig};
use crate::error::Result;
use crate::models::StepOutcome;
use crate::processors::{
    BoundaryPassthrough, CityDayCleaner, DelhiNcrCleaner, IndiaHistoricalCleaner,
    MajorCityCleaner, Pm25SnapshotFilter, ProcessedAqiNormalizer,
};
use crate::utils::progress::ProgressReporter;
use tracing::info;

/// Number of cleaning steps in a full run.
pub const STEP_COUNT: u64 = 7;

/// Runs every dataset cleaner in a fixed order, reporting each outcome as
/// soon as its step finishes.
pub struct CleaningPipeline {
    config: PipelineConfig,
}

impl CleaningPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, layout: &DataLayout, progress: &ProgressReporter) -> Result<Vec<StepOutcome>> {
        layout.ensure_processed_dir()?;

        let delhi = DelhiNcrCleaner::with_year_window(self.config.delhi_years());
        let city_day = CityDayCleaner::from_config(&self.config);
        let snapshot = Pm25SnapshotFilter::new();
        let major_city = MajorCityCleaner::new();
        let historical = IndiaHistoricalCleaner::new();
        let processed = ProcessedAqiNormalizer::new();
        let boundary = BoundaryPassthrough::new();

        let mut outcomes = Vec::new();
        step("Delhi-NCR hourly", progress, &mut outcomes, || delhi.run(layout))?;
        step("city-day", progress, &mut outcomes, || city_day.run(layout))?;
        step("PM2.5 snapshot", progress, &mut outcomes, || snapshot.run(layout))?;
        step("major-city hourly", progress, &mut outcomes, || major_city.run(layout))?;
        step("historical India", progress, &mut outcomes, || historical.run(layout))?;
        step("processed AQI", progress, &mut outcomes, || processed.run(layout))?;
        step("boundary", progress, &mut outcomes, || boundary.run(layout))?;

        Ok(outcomes)
    }
}

fn step<F>(
    name: &str,
    progress: &ProgressReporter,
    outcomes: &mut Vec<StepOutcome>,
    run: F,
) -> Result<()>
where
    F: FnOnce() -> Result<Vec<StepOutcome>>,
{
    progress.set_message(name);
    for outcome in run()? {
        info!(step = name, skipped = outcome.is_skipped(), "{}", outcome);
        progress.println(&outcome.to_string());
        outcomes.push(outcome);
    }
    progress.increment(1);
    Ok(())
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
