use super::{ReportError, ReportResult};
use crate::analysis::AnalysisResult;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const MAX_NAME_ATTEMPTS: usize = 1000;

/// Writes analysis results as pretty JSON into an output directory
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save a result as `analysis_result_<YYYYmmdd_HHMMSS>.json`, creating the
    /// directory if needed. A numeric suffix is added when the name is taken.
    pub fn save(&self, result: &AnalysisResult) -> ReportResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let json = serde_json::to_string_pretty(result)?;
        let stem = format!("analysis_result_{}", Local::now().format("%Y%m%d_%H%M%S"));

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = if attempt == 0 {
                format!("{}.json", stem)
            } else {
                format!("{}_{}.json", stem, attempt)
            };
            let path = self.output_dir.join(file_name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(json.as_bytes())?;
                    file.write_all(b"\n")?;
                    info!("Analysis result saved to: {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(ReportError::Other(format!(
            "No free file name for {} in {}",
            stem,
            self.output_dir.display()
        )))
    }
}
