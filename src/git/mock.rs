use crate::error::{Result, SelectorError};
use crate::git::VersionControl;
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository for testing without a real working tree
///
/// Checking out a tag replaces the describe output with the tag name (or the
/// describe string registered for it) and records the checkout.
pub struct MockRepository {
    identity: bool,
    clean: bool,
    tags: Vec<String>,
    describe: RefCell<Option<String>>,
    tag_describes: HashMap<String, String>,
    checkouts: RefCell<Vec<String>>,
}

impl MockRepository {
    /// A clean repository with one commit, no tags, describing as "abcdef0"
    pub fn new() -> Self {
        MockRepository {
            identity: true,
            clean: true,
            tags: Vec::new(),
            describe: RefCell::new(Some("abcdef0".to_string())),
            tag_describes: HashMap::new(),
            checkouts: RefCell::new(Vec::new()),
        }
    }

    /// A directory without any version-control history
    pub fn without_history() -> Self {
        MockRepository {
            identity: false,
            describe: RefCell::new(None),
            ..Self::new()
        }
    }

    pub fn dirty(mut self) -> Self {
        self.clean = false;
        self
    }

    /// Add a tag; a checkout of it will describe as the tag name
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        for tag in tags {
            self.add_tag(*tag);
        }
        self
    }

    pub fn with_describe(self, describe: impl Into<String>) -> Self {
        *self.describe.borrow_mut() = Some(describe.into());
        self
    }

    /// Describe output to report after checking out `tag`
    pub fn with_tag_describe(mut self, tag: impl Into<String>, describe: impl Into<String>) -> Self {
        self.tag_describes.insert(tag.into(), describe.into());
        self
    }

    /// References checked out so far, oldest first
    pub fn checkouts(&self) -> Vec<String> {
        self.checkouts.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for MockRepository {
    fn has_identity(&self) -> Result<bool> {
        Ok(self.identity)
    }

    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn describe(&self) -> Result<Option<String>> {
        Ok(self.describe.borrow().clone())
    }

    fn checkout(&self, reference: &str) -> Result<()> {
        if !self.identity || !self.tags.iter().any(|t| t == reference) {
            return Err(SelectorError::Git(git2::Error::from_str(&format!(
                "revspec '{}' not found",
                reference
            ))));
        }

        let describe = self
            .tag_describes
            .get(reference)
            .cloned()
            .unwrap_or_else(|| reference.to_string());
        *self.describe.borrow_mut() = Some(describe);
        self.checkouts.borrow_mut().push(reference.to_string());
        Ok(())
    }
}
