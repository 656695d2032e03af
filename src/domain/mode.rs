use crate::error::SelectorError;
use std::fmt;
use std::str::FromStr;

/// What the run builds from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
    /// Build the working tree as it is
    Snapshot,
    /// Check out the latest release tag and build it
    Release,
}

impl CheckoutMode {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutMode::Snapshot => "snapshot",
            CheckoutMode::Release => "release",
        }
    }
}

impl fmt::Display for CheckoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CheckoutMode {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snapshot" => Ok(CheckoutMode::Snapshot),
            "release" => Ok(CheckoutMode::Release),
            other => Err(SelectorError::UnknownMode(other.to_string())),
        }
    }
}

/// Why a run settled on snapshot mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotReason {
    /// `--force-snapshot` was given
    Forced,
    /// No repository, or a repository without commits
    NoVersionControl,
    /// Tracked files are modified or the index is non-empty
    DirtyWorkingTree,
    /// No tag matches the release tag pattern
    NoReleaseTags,
    /// The latest release tag is already the stable channel version
    AlreadyStable { version: String },
}

impl fmt::Display for SnapshotReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotReason::Forced => write!(f, "snapshot build forced"),
            SnapshotReason::NoVersionControl => {
                write!(f, "no version control information available")
            }
            SnapshotReason::DirtyWorkingTree => {
                write!(f, "working tree has uncommitted changes")
            }
            SnapshotReason::NoReleaseTags => write!(f, "no release tags found"),
            SnapshotReason::AlreadyStable { version } => {
                write!(f, "latest release {} is already stable", version)
            }
        }
    }
}

/// Outcome of the checkout-mode decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutDecision {
    Snapshot(SnapshotReason),
    Release {
        /// Tag to check out (e.g., "v1.10")
        tag: String,
        /// Tag with a single leading `v` stripped
        version: String,
        /// Version published on the stable channel, if any
        stable_version: Option<String>,
    },
}

impl CheckoutDecision {
    pub fn mode(&self) -> CheckoutMode {
        match self {
            CheckoutDecision::Snapshot(_) => CheckoutMode::Snapshot,
            CheckoutDecision::Release { .. } => CheckoutMode::Release,
        }
    }

    /// Tag to check out, present only in release mode
    pub fn release_tag(&self) -> Option<&str> {
        match self {
            CheckoutDecision::Snapshot(_) => None,
            CheckoutDecision::Release { tag, .. } => Some(tag),
        }
    }
}

impl fmt::Display for CheckoutDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutDecision::Snapshot(reason) => write!(f, "snapshot ({})", reason),
            CheckoutDecision::Release {
                tag,
                version,
                stable_version,
            } => write!(
                f,
                "release {} (latest release {} differs from stable {})",
                tag,
                version,
                stable_version.as_deref().unwrap_or("<none>")
            ),
        }
    }
}
