//! Extension filter used to select the files a mutation applies to

use crate::error::MutationError;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Token that selects every file
pub const WILDCARD: &str = "*";

/// Either every file, or files whose last extension equals a literal string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtensionFilter {
    All,
    /// Extension without its leading dot, never empty
    Extension(String),
}

impl ExtensionFilter {
    /// Build a literal filter. A single leading dot is dropped.
    pub fn extension(ext: &str) -> Result<Self, MutationError> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        if ext.is_empty() {
            return Err(MutationError::InvalidFilter(
                "extension cannot be empty (use \"*\" for all files)".to_string(),
            ));
        }
        Ok(ExtensionFilter::Extension(ext.to_string()))
    }

    /// Whether a file name is selected.
    ///
    /// Only the text after the final dot counts, compared case-sensitively:
    /// `a.tar.gz` matches `gz` but not `tar.gz`, and `.bashrc` has no extension.
    pub fn matches(&self, file_name: &OsStr) -> bool {
        match self {
            ExtensionFilter::All => true,
            ExtensionFilter::Extension(ext) => {
                Path::new(file_name).extension() == Some(OsStr::new(ext.as_str()))
            }
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, ExtensionFilter::All)
    }

    /// Upper-cased form shown in confirmation messages
    pub fn label(&self) -> String {
        self.to_string().to_uppercase()
    }
}

impl fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionFilter::All => f.write_str(WILDCARD),
            ExtensionFilter::Extension(ext) => f.write_str(ext),
        }
    }
}

impl FromStr for ExtensionFilter {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == WILDCARD {
            return Ok(ExtensionFilter::All);
        }
        ExtensionFilter::extension(s)
    }
}
