use std::path::Path;

use crate::client::types::Job;
use crate::error::{JobkeeperError, Result};

/// Reads a Job manifest from disk and parses it.
pub fn read_job_template(path: &Path) -> Result<Job> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        JobkeeperError::Template(format!("could not read {}: {e}", path.display()))
    })?;

    serde_yaml::from_str(&contents).map_err(|e| {
        JobkeeperError::Template(format!(
            "could not parse {} as a Job manifest: {e}",
            path.display()
        ))
    })
}
