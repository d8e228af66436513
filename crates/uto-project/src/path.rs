//! Project paths
//!
//! Provides [`ProjectPath`] for addressing files and directories inside a project's contents.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Absolute path of a file or directory within a project
///
/// Stored as segments, displayed with a leading slash.
///
/// # Examples
/// - `["src", "app.js"]` → `/src/app.js`
/// - `[]` → `/`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectPath(Vec<String>);

impl ProjectPath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Project root
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Check if path is the project root
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ProjectPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0.join("/"))
    }
}

impl FromStr for ProjectPath {
    type Err = PathError;

    /// Leading slash is optional, so `src/app.js` and `/src/app.js` are the same path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix('/').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let segments: Vec<String> = trimmed
            .split('/')
            .map(|seg| match seg {
                "" => Err(PathError::EmptySegment(s.to_string())),
                "." | ".." => Err(PathError::RelativeSegment(s.to_string())),
                _ => Ok(seg.to_string()),
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

/// Errors related to project paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty segment in path
    #[error("path '{0}' contains an empty segment")]
    EmptySegment(String),

    /// `.` or `..` segment
    #[error("path '{0}' contains a relative segment")]
    RelativeSegment(String),
}
