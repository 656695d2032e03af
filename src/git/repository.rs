use crate::error::{Result, SelectorError};
use git2::build::CheckoutBuilder;
use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode, Repository, StatusOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Default marker appended to describe output for a modified tree
pub const DIRTY_SUFFIX: &str = "-dirty";

/// Shortest commit id abbreviation git will print
const MIN_ABBREV: u32 = 7;
/// Full length of a SHA-1 commit id
const FULL_ABBREV: u32 = 40;

/// [super::VersionControl] backed by a real git repository
///
/// The repository is discovered again from `path` on every query, so a tree
/// that only appears after the pull hook has run is still seen. When no
/// repository can be discovered every query answers as for a tree without
/// history.
pub struct Git2Repository {
    path: PathBuf,
    dirty_suffix: String,
}

impl Git2Repository {
    /// Track the repository containing `path`, wherever it turns up
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Git2Repository {
            path: path.as_ref().to_path_buf(),
            dirty_suffix: DIRTY_SUFFIX.to_string(),
        }
    }

    pub fn with_dirty_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.dirty_suffix = suffix.into();
        self
    }

    /// Discover the repository containing `path`
    ///
    /// A missing repository is not an error; any other discovery failure is.
    fn discover(&self) -> Result<Option<Repository>> {
        match Repository::discover(&self.path) {
            Ok(repo) => Ok(Some(repo)),
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(path = %self.path.display(), "no git repository found");
                Ok(None)
            }
            Err(e) => Err(SelectorError::Git(e)),
        }
    }
}

/// The commit at HEAD, if HEAD points at one
fn head_commit(repo: &Repository) -> Result<Option<git2::Commit<'_>>> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            return Ok(None);
        }
        Err(e) => return Err(SelectorError::Git(e)),
    };

    Ok(Some(head.peel_to_commit()?))
}

fn is_clean(repo: &Repository) -> Result<bool> {
    if repo.is_bare() {
        return Ok(true);
    }

    let mut options = StatusOptions::new();
    options
        .include_untracked(false)
        .include_ignored(false)
        .exclude_submodules(true);

    let statuses = repo.statuses(Some(&mut options))?;
    for entry in statuses.iter() {
        trace!(path = entry.path().unwrap_or("<non-utf8>"), status = ?entry.status(), "changed");
    }

    Ok(statuses.is_empty())
}

/// Length git uses when abbreviating commit ids in this repository
///
/// Honors an explicit `core.abbrev`. Otherwise the length grows with the
/// number of objects the same way `core.abbrev=auto` does in git.
fn abbrev_len(repo: &Repository) -> Result<u32> {
    let configured = repo
        .config()
        .and_then(|config| config.get_string("core.abbrev"))
        .ok();

    match configured.as_deref().map(str::trim) {
        Some("no") | Some("false") | Some("off") => return Ok(FULL_ABBREV),
        Some(value) => {
            if let Ok(len) = value.parse::<u32>() {
                return Ok(len.clamp(4, FULL_ABBREV));
            }
        }
        None => {}
    }

    let mut count: u64 = 0;
    repo.odb()?.foreach(|_| {
        count += 1;
        true
    })?;

    Ok(auto_abbrev_len(count))
}

/// git's `core.abbrev=auto`: one more hex digit each time the object count
/// quadruples, starting from 8 digits at 2^14 objects
fn auto_abbrev_len(object_count: u64) -> u32 {
    let bits = match object_count {
        0 => 1,
        n => 64 - n.leading_zeros(),
    };
    ((bits + 1) / 2).clamp(MIN_ABBREV, FULL_ABBREV)
}

impl super::VersionControl for Git2Repository {
    fn has_identity(&self) -> Result<bool> {
        let Some(repo) = self.discover()? else {
            return Ok(false);
        };
        let has_head = head_commit(&repo)?.is_some();
        Ok(has_head)
    }

    fn is_clean(&self) -> Result<bool> {
        match self.discover()? {
            Some(repo) => is_clean(&repo),
            None => Ok(true),
        }
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let Some(repo) = self.discover()? else {
            return Ok(Vec::new());
        };

        let tags = repo.tag_names(None)?;
        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn describe(&self) -> Result<Option<String>> {
        let Some(repo) = self.discover()? else {
            return Ok(None);
        };
        let Some(commit) = head_commit(&repo)? else {
            return Ok(None);
        };

        let mut options = DescribeOptions::new();
        options.describe_tags().show_commit_oid_as_fallback(true);

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(abbrev_len(&repo)?);

        let description = commit.as_object().describe(&options)?;
        let mut described = description.format(Some(&format))?;

        if !is_clean(&repo)? {
            described.push_str(&self.dirty_suffix);
        }

        Ok(Some(described))
    }

    fn checkout(&self, reference: &str) -> Result<()> {
        let repo = self.discover()?.ok_or_else(|| {
            SelectorError::Git(git2::Error::from_str(&format!(
                "cannot check out '{}' without a repository",
                reference
            )))
        })?;

        let commit = repo.revparse_single(reference)?.peel_to_commit()?;
        repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().safe()))?;
        repo.set_head_detached(commit.id())?;

        debug!(reference, commit = %commit.id(), "checked out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::VersionControl;

    #[test]
    fn test_outside_repository_has_no_identity() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::new(dir.path());

        assert!(!repo.has_identity().unwrap());
        assert!(repo.is_clean().unwrap());
        assert!(repo.list_tags().unwrap().is_empty());
        assert_eq!(repo.describe().unwrap(), None);
        assert!(repo.checkout("1.0").is_err());
    }

    #[test]
    fn test_unborn_repository_has_no_identity() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Git2Repository::new(dir.path());

        assert!(!repo.has_identity().unwrap());
        assert_eq!(repo.describe().unwrap(), None);
    }

    #[test]
    fn test_repository_created_later_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::new(dir.path());
        assert!(repo.list_tags().unwrap().is_empty());

        Repository::init(dir.path()).unwrap();
        assert!(repo.discover().unwrap().is_some());
    }

    #[test]
    fn test_auto_abbrev_len() {
        assert_eq!(auto_abbrev_len(0), 7);
        assert_eq!(auto_abbrev_len(3), 7);
        assert_eq!(auto_abbrev_len(1 << 14), 8);
        assert_eq!(auto_abbrev_len(1 << 16), 9);
        assert_eq!(auto_abbrev_len(5_000_000), 12);
    }
}
