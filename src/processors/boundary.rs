use crate::config::DataLayout;
use crate::error::Result;
use crate::models::StepOutcome;
use crate::utils::constants::BOUNDARY_FILE;
use std::fs::{self, File, FileTimes};
use std::path::Path;
use tracing::info;

/// Copies the state boundary GeoJSON into the processed directory untouched.
pub struct BoundaryPassthrough {
    file_name: String,
}

impl BoundaryPassthrough {
    pub fn new() -> Self {
        Self::for_file(BOUNDARY_FILE)
    }

    pub fn for_file(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
        }
    }

    pub fn run(&self, layout: &DataLayout) -> Result<Vec<StepOutcome>> {
        let src = layout.raw_path(&self.file_name);
        if !src.exists() {
            return Ok(vec![StepOutcome::file_not_found(&self.file_name)]);
        }

        let dst = layout.processed_path(&self.file_name);
        info!(src = %src.display(), dst = %dst.display(), "Copying boundary file");
        copy_with_metadata(&src, &dst)?;

        Ok(vec![StepOutcome::Copied {
            file_name: self.file_name.clone(),
        }])
    }
}

impl Default for BoundaryPassthrough {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte copy that also carries permissions and access/modification times.
/// The destination is reopened writable so its times can be set.
pub fn copy_with_metadata(src: &Path, dst: &Path) -> Result<u64> {
    let bytes = fs::copy(src, dst)?;

    let meta = fs::metadata(src)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    File::options().write(true).open(dst)?.set_times(times)?;

    Ok(bytes)
}
