use crate::domain::parse_stable_version;
use crate::error::Result;
use crate::process::ExternalCommand;
use crate::registry::PackageRegistry;
use tracing::debug;

/// Default registry client program
pub const DEFAULT_REGISTRY: &str = "snap";

/// Default label preceding the stable channel version in `snap info` output
pub const DEFAULT_STABLE_LABEL: &str = "stable:";

/// [PackageRegistry] backed by `snap info <package>`
#[derive(Debug, Clone)]
pub struct SnapRegistry {
    program: String,
    stable_label: String,
}

impl SnapRegistry {
    pub fn new(program: impl Into<String>, stable_label: impl Into<String>) -> Self {
        SnapRegistry {
            program: program.into(),
            stable_label: stable_label.into(),
        }
    }

    pub fn info_command(&self, package: &str) -> ExternalCommand {
        ExternalCommand::new(&self.program).arg("info").arg(package)
    }
}

impl Default for SnapRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY, DEFAULT_STABLE_LABEL)
    }
}

impl PackageRegistry for SnapRegistry {
    fn stable_version(&self, package: &str) -> Result<Option<String>> {
        let info = self.info_command(package).output()?;
        let version = parse_stable_version(&info, &self.stable_label);
        debug!(package, stable = ?version, "registry lookup");
        Ok(version)
    }
}
