//! Dotted `major.minor.patch` versions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VersionError;
use crate::types::VersionPart;

/// A release version
///
/// Only plain triples are accepted: pre-release and build metadata are
/// rejected, since the version file holds nothing but the three numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a version from its components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a `major.minor.patch` string
    ///
    /// Components are plain ASCII digits, so zero padding such as
    /// `2024.01.5` is accepted and normalized away.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let malformed = |reason: &str| VersionError::Malformed(input.to_string(), reason.to_string());

        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 3 {
            return Err(malformed("expected three dot-separated numbers"));
        }

        let mut numbers = [0u64; 3];
        for (slot, (part, name)) in numbers
            .iter_mut()
            .zip(parts.iter().zip(["major", "minor", "patch"]))
        {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed(&format!("{} is not a number", name)));
            }
            *slot = part
                .parse()
                .map_err(|_| malformed(&format!("{} is too large", name)))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }

    /// Return the version after incrementing `part`
    pub fn bump(&self, part: VersionPart) -> Result<Self, VersionError> {
        let overflow = || VersionError::Overflow(self.to_string(), part.to_string());
        let next = match part {
            VersionPart::Major => {
                Self::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            VersionPart::Minor => Self::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            VersionPart::Patch => Self::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        };
        debug!(current = %self, next = %next, part = %part, "bumped version");
        Ok(next)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
