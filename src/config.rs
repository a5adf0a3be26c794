use crate::error::{ProcessingError, Result};
use crate::models::DateWindow;
use crate::utils::constants::{
    BASELINE_END, BASELINE_START, DELHI_MAX_YEAR, DELHI_MIN_YEAR, EVENT_END, EVENT_START,
    PROCESSED_DIR, RAW_DIR,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

/// Run settings. Defaults reproduce the fixed `data/raw` -> `data/processed`
/// layout; a settings file may relocate the directories or move the windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_windows"))]
#[serde(default)]
pub struct PipelineConfig {
    #[validate(length(min = 1))]
    pub raw_dir: String,

    #[validate(length(min = 1))]
    pub processed_dir: String,

    pub delhi_min_year: i32,
    pub delhi_max_year: i32,

    pub baseline_start: NaiveDate,
    pub baseline_end: NaiveDate,
    pub event_start: NaiveDate,
    pub event_end: NaiveDate,
}

fn ymd((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn validate_windows(config: &PipelineConfig) -> std::result::Result<(), ValidationError> {
    if config.delhi_min_year > config.delhi_max_year {
        return Err(ValidationError::new("delhi_year_window"));
    }
    if !config.baseline_window().is_ordered() {
        return Err(ValidationError::new("baseline_window"));
    }
    if !config.event_window().is_ordered() {
        return Err(ValidationError::new("event_window"));
    }
    Ok(())
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_dir: RAW_DIR.to_string(),
            processed_dir: PROCESSED_DIR.to_string(),
            delhi_min_year: DELHI_MIN_YEAR,
            delhi_max_year: DELHI_MAX_YEAR,
            baseline_start: ymd(BASELINE_START),
            baseline_end: ymd(BASELINE_END),
            event_start: ymd(EVENT_START),
            event_end: ymd(EVENT_END),
        }
    }
}

impl PipelineConfig {
    /// Layer an optional settings file over the defaults and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if !path.exists() {
                return Err(ProcessingError::Config(format!(
                    "Settings file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn delhi_years(&self) -> RangeInclusive<i32> {
        self.delhi_min_year..=self.delhi_max_year
    }

    pub fn baseline_window(&self) -> DateWindow {
        DateWindow::new(self.baseline_start, self.baseline_end)
    }

    pub fn event_window(&self) -> DateWindow {
        DateWindow::new(self.event_start, self.event_end)
    }

    pub fn layout(&self, project_root: &Path) -> DataLayout {
        DataLayout::new(
            project_root.join(&self.raw_dir),
            project_root.join(&self.processed_dir),
        )
    }
}

/// Resolved raw and processed directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
}

impl DataLayout {
    pub fn new(raw_dir: PathBuf, processed_dir: PathBuf) -> Self {
        Self {
            raw_dir,
            processed_dir,
        }
    }

    pub fn under(project_root: &Path) -> Self {
        PipelineConfig::default().layout(project_root)
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    pub fn raw_path(&self, file_name: &str) -> PathBuf {
        self.raw_dir.join(file_name)
    }

    pub fn processed_path(&self, file_name: &str) -> PathBuf {
        self.processed_dir.join(file_name)
    }

    pub fn ensure_processed_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.processed_dir)?;
        Ok(())
    }
}
