use crate::controller::BuildController;
use crate::error::Result;
use crate::process::ExternalCommand;

/// Default build controller program
pub const DEFAULT_CONTROLLER: &str = "snapcraftctl";

/// [BuildController] that shells out to the controller program
#[derive(Debug, Clone)]
pub struct CommandController {
    program: String,
}

impl CommandController {
    pub fn new(program: impl Into<String>) -> Self {
        CommandController {
            program: program.into(),
        }
    }

    pub fn pull_command(&self) -> ExternalCommand {
        ExternalCommand::new(&self.program).arg("pull")
    }

    pub fn set_version_command(&self, version: &str) -> ExternalCommand {
        ExternalCommand::new(&self.program)
            .arg("set-version")
            .arg(version)
    }
}

impl Default for CommandController {
    fn default() -> Self {
        Self::new(DEFAULT_CONTROLLER)
    }
}

impl BuildController for CommandController {
    fn pull(&self) -> Result<()> {
        self.pull_command().run()
    }

    fn set_version(&self, version: &str) -> Result<()> {
        self.set_version_command(version).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;

    #[test]
    fn test_default_commands() {
        let controller = CommandController::default();
        assert_eq!(controller.pull_command().display(), "snapcraftctl pull");
        assert_eq!(
            controller.set_version_command("1.10").display(),
            "snapcraftctl set-version 1.10"
        );
    }

    #[test]
    fn test_missing_controller_is_fatal() {
        let controller = CommandController::new("/nonexistent/snapcraftctl");
        assert!(matches!(
            controller.pull(),
            Err(SelectorError::CommandSpawn { .. })
        ));
        assert!(controller.set_version("1.0").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_controller_success() {
        // `true` ignores its arguments and exits 0
        let controller = CommandController::new("true");
        controller.pull().unwrap();
        controller.set_version("1.0").unwrap();
    }
}
