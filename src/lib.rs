pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod process;
pub mod registry;
pub mod selector;
pub mod ui;

pub use error::{Result, SelectorError};
pub use selector::{PackageSource, ReleaseSelector, SelectionOutcome};
