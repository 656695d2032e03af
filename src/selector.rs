//! Release-or-snapshot selection
//!
//! One run is: optional pull hook, checkout-mode decision, optional checkout,
//! version computation, optional version report. Any error ends the run;
//! nothing is retried and a checkout already performed is not undone.

use crate::cli::InvocationFlags;
use crate::controller::BuildController;
use crate::domain::{
    compute_version, latest_release_tag, strip_v_prefix, CheckoutDecision, CheckoutMode,
    ReleaseTagPattern, SnapshotReason,
};
use crate::error::{Result, SelectorError};
use crate::git::VersionControl;
use crate::logging::VERSION_TARGET;
use crate::registry::PackageRegistry;
use tracing::{debug, info};

/// Where the package name for the registry lookup comes from
///
/// The name is only required once the decision reaches the registry lookup,
/// so runs that settle on snapshot earlier never need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSource {
    /// Environment variable the name was read from, for error messages
    pub env_var: String,
    /// Its value; `None` when unset or empty
    pub name: Option<String>,
}

impl PackageSource {
    pub fn new(env_var: impl Into<String>, name: Option<String>) -> Self {
        PackageSource {
            env_var: env_var.into(),
            name: name.filter(|n| !n.is_empty()),
        }
    }

    fn require(&self) -> Result<&str> {
        self.name
            .as_deref()
            .ok_or_else(|| SelectorError::MissingPackageName {
                var: self.env_var.clone(),
            })
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub decision: CheckoutDecision,
    /// Version computed after any checkout
    pub version: String,
    /// Whether the version was passed to the build controller
    pub reported: bool,
}

impl SelectionOutcome {
    pub fn mode(&self) -> CheckoutMode {
        self.decision.mode()
    }
}

/// Decides what to build and drives the external collaborators
pub struct ReleaseSelector<'a> {
    vcs: &'a dyn VersionControl,
    registry: &'a dyn PackageRegistry,
    controller: &'a dyn BuildController,
    tag_pattern: ReleaseTagPattern,
}

impl<'a> ReleaseSelector<'a> {
    pub fn new(
        vcs: &'a dyn VersionControl,
        registry: &'a dyn PackageRegistry,
        controller: &'a dyn BuildController,
        tag_pattern: ReleaseTagPattern,
    ) -> Self {
        ReleaseSelector {
            vcs,
            registry,
            controller,
            tag_pattern,
        }
    }

    /// Run the whole procedure
    pub fn run(&self, flags: InvocationFlags, package: &PackageSource) -> Result<SelectionOutcome> {
        if flags.dry_run {
            debug!("dry run: skipping controller pull");
        } else {
            self.controller.pull()?;
        }

        let decision = self.decide(flags, package)?;
        info!(mode = %decision.mode(), "checkout mode: {}", decision);

        self.apply(&decision)?;

        let version = compute_version(self.vcs.describe()?.as_deref());
        info!(target: VERSION_TARGET, version = %version, "computed version");

        let reported = !flags.dry_run;
        if reported {
            self.controller.set_version(&version)?;
        } else {
            debug!("dry run: skipping controller set-version");
        }

        Ok(SelectionOutcome {
            decision,
            version,
            reported,
        })
    }

    /// Choose the checkout mode; first matching rule wins
    ///
    /// 1. `--force-snapshot`
    /// 2. no version-control identity
    /// 3. modified tracked files or staged changes
    /// 4. no release tag
    /// 5. latest release tag (version order) against the registry's stable
    ///    version: release when they differ as strings, snapshot otherwise
    pub fn decide(
        &self,
        flags: InvocationFlags,
        package: &PackageSource,
    ) -> Result<CheckoutDecision> {
        if flags.force_snapshot {
            return Ok(CheckoutDecision::Snapshot(SnapshotReason::Forced));
        }

        if !self.vcs.has_identity()? {
            return Ok(CheckoutDecision::Snapshot(SnapshotReason::NoVersionControl));
        }

        if !self.vcs.is_clean()? {
            return Ok(CheckoutDecision::Snapshot(SnapshotReason::DirtyWorkingTree));
        }

        let tags = self.vcs.list_tags()?;
        let release_tags = self.tag_pattern.filter(&tags);
        debug!(
            pattern = self.tag_pattern.as_str(),
            count = release_tags.len(),
            "release tags"
        );

        if release_tags.is_empty() {
            return Ok(CheckoutDecision::Snapshot(SnapshotReason::NoReleaseTags));
        }

        let package_name = package.require()?;

        let Some(tag) = latest_release_tag(&release_tags) else {
            return Ok(CheckoutDecision::Snapshot(SnapshotReason::NoReleaseTags));
        };

        let version = strip_v_prefix(tag);
        let stable_version = self.registry.stable_version(package_name)?;
        debug!(tag, version, stable = ?stable_version, "comparing with stable channel");

        // Plain string comparison: "1.2" and "1.2.0" differ.
        if stable_version.as_deref() == Some(version) {
            return Ok(CheckoutDecision::Snapshot(SnapshotReason::AlreadyStable {
                version: version.to_string(),
            }));
        }

        Ok(CheckoutDecision::Release {
            tag: tag.to_string(),
            version: version.to_string(),
            stable_version,
        })
    }

    /// Check out the release tag; snapshot mode leaves the tree alone
    pub fn apply(&self, decision: &CheckoutDecision) -> Result<()> {
        match decision {
            CheckoutDecision::Snapshot(_) => Ok(()),
            CheckoutDecision::Release { tag, .. } => {
                info!(tag = %tag, "checking out release tag");
                self.vcs.checkout(tag)
            }
        }
    }
}
