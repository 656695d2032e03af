use crate::error::Result;
use crate::registry::PackageRegistry;
use std::cell::RefCell;
use std::collections::HashMap;

/// Registry answering from a fixed table; records every lookup
#[derive(Debug, Default)]
pub struct StaticRegistry {
    stable: HashMap<String, String>,
    lookups: RefCell<Vec<String>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stable(mut self, package: impl Into<String>, version: impl Into<String>) -> Self {
        self.stable.insert(package.into(), version.into());
        self
    }

    /// Packages looked up so far, oldest first
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl PackageRegistry for StaticRegistry {
    fn stable_version(&self, package: &str) -> Result<Option<String>> {
        self.lookups.borrow_mut().push(package.to_string());
        Ok(self.stable.get(package).cloned())
    }
}
