use crate::controller::BuildController;
use crate::error::{Result, SelectorError};
use std::cell::RefCell;

/// A call made to a [RecordingController]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerCall {
    Pull,
    SetVersion(String),
}

/// Controller that records calls instead of running anything
#[derive(Debug, Default)]
pub struct RecordingController {
    calls: RefCell<Vec<ControllerCall>>,
    fail_pull: bool,
}

impl RecordingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `pull` fail the way a broken controller would
    pub fn failing_pull() -> Self {
        RecordingController {
            fail_pull: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ControllerCall> {
        self.calls.borrow().clone()
    }
}

impl BuildController for RecordingController {
    fn pull(&self) -> Result<()> {
        self.calls.borrow_mut().push(ControllerCall::Pull);
        if self.fail_pull {
            return Err(SelectorError::CommandFailed {
                command: "snapcraftctl pull".to_string(),
                code: 1,
                stderr: String::new(),
            });
        }
        Ok(())
    }

    fn set_version(&self, version: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(ControllerCall::SetVersion(version.to_string()));
        Ok(())
    }
}
