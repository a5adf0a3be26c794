use crate::utils::numeric::format_count;
use std::fmt;

/// What a single cleaning step did, rendered as its report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Saved { file_name: String, rows: usize },
    Summarized { file_name: String, cities: usize },
    Copied { file_name: String },
    Skipped { dataset: String, reason: String },
}

impl StepOutcome {
    pub fn skipped(dataset: &str, reason: &str) -> Self {
        StepOutcome::Skipped {
            dataset: dataset.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn file_not_found(dataset: &str) -> Self {
        Self::skipped(dataset, "file not found")
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped { .. })
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Saved { file_name, rows } => {
                write!(f, "Saved {} ({} rows)", file_name, format_count(*rows))
            }
            StepOutcome::Summarized { file_name, cities } => {
                write!(f, "Saved {} ({} cities)", file_name, cities)
            }
            StepOutcome::Copied { file_name } => write!(f, "Copied {} to processed/", file_name),
            StepOutcome::Skipped { dataset, reason } => write!(f, "Skip {}: {}", dataset, reason),
        }
    }
}
