//! Version-control abstraction layer
//!
//! The decision logic only needs four questions answered about the working
//! tree it runs in, plus one mutation. They are captured by the
//! [VersionControl] trait so the logic can run against:
//!
//! - [repository::Git2Repository]: the real repository, through the `git2` crate
//! - [mock::MockRepository]: an in-memory stand-in for tests
//!
//! ```rust
//! # use release_selector::git::VersionControl;
//! # fn example<V: VersionControl>(vcs: &V) -> release_selector::Result<()> {
//! if vcs.has_identity()? && vcs.is_clean()? {
//!     println!("tags: {:?}", vcs.list_tags()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Read-mostly view of the repository the build runs in
///
/// Everything is read-only except [VersionControl::checkout].
pub trait VersionControl {
    /// Whether there is a repository with at least one commit at HEAD
    ///
    /// Source archives without history and freshly initialized repositories
    /// both report `false`.
    fn has_identity(&self) -> Result<bool>;

    /// Whether tracked files are unmodified and nothing is staged
    ///
    /// Untracked files do not count as changes.
    fn is_clean(&self) -> Result<bool>;

    /// All tag names in the repository, in no particular order
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Describe HEAD using tags, falling back to the abbreviated commit id
    ///
    /// The dirty suffix is appended when [VersionControl::is_clean] would
    /// report `false`.
    ///
    /// # Returns
    /// * `Ok(Some(String))` - e.g. "v1.2-3-gabcdef0" or "abcdef0-dirty"
    /// * `Ok(None)` - when there is no commit to describe
    fn describe(&self) -> Result<Option<String>>;

    /// Check out `reference` (usually a tag) with a detached HEAD
    fn checkout(&self, reference: &str) -> Result<()>;
}
