//! Static version metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured crate version record, derived from the package version at
/// compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Pre-release identifier, empty when absent.
    pub pre: String,
    /// Build metadata, empty when absent.
    pub build: String,
}

impl Version {
    pub fn current() -> Self {
        let full = env!("CARGO_PKG_VERSION");
        Self {
            major: env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
            minor: env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
            patch: env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
            pre: env!("CARGO_PKG_VERSION_PRE").to_string(),
            build: full
                .split_once('+')
                .map(|(_, build)| build.to_string())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

/// Library version; stateless and independent of any instance.
pub fn version() -> Version {
    Version::current()
}
