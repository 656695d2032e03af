//! Domain logic - pure decision rules independent of external tools

pub mod mode;
pub mod tag;
pub mod version;

pub use mode::{CheckoutDecision, CheckoutMode, SnapshotReason};
pub use tag::{compare_versions, latest_release_tag, strip_v_prefix, ReleaseTagPattern};
pub use version::{compute_version, parse_stable_version, UNKNOWN_VERSION};
