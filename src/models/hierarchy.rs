//! Logical folder hierarchies and public/private placement.
//!
//! A hierarchy is the chain of group names from the conceptual `Source` root
//! down to the folder the developer selected, e.g. `["Source", "Public", "Characters"]`.
//! It only becomes a physical path once it is joined onto a project root.

use crate::constants::{PRIVATE_DIR, PUBLIC_DIR, SOURCE_DIR};
use serde::Serialize;
use std::fmt;

/// Where generated files belong in the Unreal `Public`/`Private` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Header is exported; the implementation moves to the matching `Private` folder
    Public,
    /// Everything stays in the selected folder
    Private,
    /// No `Public`/`Private` segment; everything stays in the selected folder
    Unclassified,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Public => write!(f, "public"),
            Placement::Private => write!(f, "private"),
            Placement::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Ordered group names from `Source` down to the selected folder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LogicalPathHierarchy {
    segments: Vec<String>,
}

impl LogicalPathHierarchy {
    /// Creates a hierarchy from group names, dropping blank and `.` entries.
    ///
    /// The result is not normalized; see [`LogicalPathHierarchy::normalized`].
    /// Segments that would leave the project (`..`, drive prefixes) are kept so
    /// callers can reject them with [`LogicalPathHierarchy::escaping_segment`].
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty() && s != ".")
                .collect(),
        }
    }

    /// Parses a `/`- or `\`-separated folder string such as `Source/Public/Characters`.
    ///
    /// Empty segments are ignored, so `"/Public//X/"` yields `["Public", "X"]`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::new(text.split(['/', '\\']))
    }

    /// The hierarchy for "no finer selection": the project's `Source` root.
    #[must_use]
    pub fn source_root() -> Self {
        Self {
            segments: vec![SOURCE_DIR.to_string()],
        }
    }

    /// Returns a copy whose first element is `Source`, inserting it if absent.
    ///
    /// The check is case-insensitive, so `["source", "X"]` is already normalized.
    /// Normalizing twice gives the same result as normalizing once.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let starts_with_source = self
            .segments
            .first()
            .is_some_and(|first| first.eq_ignore_ascii_case(SOURCE_DIR));

        if starts_with_source {
            return self.clone();
        }

        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(SOURCE_DIR.to_string());
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }

    /// Classifies the hierarchy by its `Public`/`Private` segments.
    ///
    /// Matching is an exact, case-insensitive segment comparison; a segment like
    /// `PublicAssets` does not count. When both appear, `Public` wins.
    #[must_use]
    pub fn placement(&self) -> Placement {
        let has = |name: &str| self.segments.iter().any(|s| s.eq_ignore_ascii_case(name));

        if has(PUBLIC_DIR) {
            Placement::Public
        } else if has(PRIVATE_DIR) {
            Placement::Private
        } else {
            Placement::Unclassified
        }
    }

    /// First segment that would point outside the project once joined onto it.
    ///
    /// That is `..` or anything carrying a drive or scheme separator (`C:`).
    #[must_use]
    pub fn escaping_segment(&self) -> Option<&str> {
        self.segments
            .iter()
            .map(String::as_str)
            .find(|s| *s == ".." || s.contains(':'))
    }

    /// The group names in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns true if there are no group names at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for LogicalPathHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
