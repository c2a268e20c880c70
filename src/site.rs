//! Package listing of the local Python installation, uploaded for sites.

use crate::error::RequiresError;
use std::process::Command;

pub const DEFAULT_PIP: &str = "pip";

/// Output of `<pip> freeze --local`, with invalid UTF-8 replaced.
pub fn installed_packages(pip: &str) -> Result<String, RequiresError> {
    tracing::debug!("running {pip} freeze --local");
    let output = Command::new(pip)
        .args(["freeze", "--local"])
        .output()
        .map_err(|err| RequiresError::Command(format!("{pip} freeze --local: {err}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RequiresError::Command(format!(
            "{pip} freeze --local exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Name used for a site when none is given: this machine's host name.
pub fn default_site_name() -> Result<String, RequiresError> {
    whoami::fallible::hostname()
        .map_err(|err| RequiresError::Command(format!("failed to read host name: {err}")))
}
