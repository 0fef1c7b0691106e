//! `openbin` mode strings.

use std::fmt;
use std::str::FromStr;

use crate::error::{FsError, Result};

/// A validated mode string such as `"r"`, `"wb"` or `"x"`.
///
/// The first character picks the base mode (`r`, `w`, `a` or `x`); `b`,
/// `t` and `+` may follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode(String);

impl Mode {
    pub fn parse(mode: &str) -> Result<Self> {
        let invalid = || FsError::InvalidMode(mode.to_string());

        let first = mode.chars().next().ok_or_else(invalid)?;
        if !"rwax".contains(first) {
            return Err(invalid());
        }
        if mode.chars().any(|c| !"rwaxbt+".contains(c)) {
            return Err(invalid());
        }
        if mode.contains('t') && mode.contains('b') {
            return Err(invalid());
        }
        Ok(Self(mode.to_string()))
    }

    /// Reject text modes; `openbin` only deals in bytes.
    pub fn validate_bin(&self) -> Result<()> {
        if self.0.contains('t') {
            return Err(FsError::InvalidMode(self.0.clone()));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn reading(&self) -> bool {
        self.0.contains('r') || self.updating()
    }

    pub fn writing(&self) -> bool {
        self.0.contains(['w', 'a', 'x']) || self.updating()
    }

    pub fn appending(&self) -> bool {
        self.0.contains('a')
    }

    pub fn exclusive(&self) -> bool {
        self.0.contains('x')
    }

    pub fn updating(&self) -> bool {
        self.0.contains('+')
    }

    pub fn truncate(&self) -> bool {
        self.0.contains('w')
    }
}

impl FromStr for Mode {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
