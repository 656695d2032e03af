//! Package registry lookups
//!
//! Only one question is ever asked of the registry: which version of a
//! package is published on its stable channel.

pub mod mock;
pub mod snap;

pub use mock::StaticRegistry;
pub use snap::SnapRegistry;

use crate::error::Result;

pub trait PackageRegistry {
    /// Version on the stable channel, without any `+` build suffix
    ///
    /// # Returns
    /// * `Ok(Some(version))` - the stable channel has a release
    /// * `Ok(None)` - the package has nothing on the stable channel
    /// * `Err` - the lookup itself failed
    fn stable_version(&self, package: &str) -> Result<Option<String>>;
}
