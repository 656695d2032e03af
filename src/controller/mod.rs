//! Build controller hooks
//!
//! The packaging tool is told when the pull step begins and, at the end,
//! which version was built:
//! - [command::CommandController]: runs the controller program (`snapcraftctl`)
//! - [mock::RecordingController]: records calls for tests

pub mod command;
pub mod mock;

pub use command::CommandController;
pub use mock::{ControllerCall, RecordingController};

use crate::error::Result;

/// Calls into the external build controller. Failures are fatal to the run.
pub trait BuildController {
    /// Run the controller's default pull step
    fn pull(&self) -> Result<()>;

    /// Report the version of the artifact being built
    fn set_version(&self, version: &str) -> Result<()>;
}
