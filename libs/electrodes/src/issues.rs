//! Diagnostics collected while extracting electrodes or checking mappings.
//!
//! Issues never abort a run on their own. Each issue carries a [`Severity`]
//! and is logged at the matching level when it is recorded.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::mapping::ElectrodeId;

/// An enumeration of possible severity levels.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Severity {
    /// An informational message.
    Info,
    /// A warning.
    #[default]
    Warning,
    /// An error. Not necessarily fatal.
    Error,
}

impl Severity {
    /// Returns log level corresponding to this severity.
    #[inline]
    pub const fn as_tracing_level(&self) -> Level {
        match *self {
            Self::Info => Level::INFO,
            Self::Warning => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }

    /// Returns `true` if the severity is [`Severity::Error`].
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(*self, Self::Error)
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One of the two electrode numbering schemes.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Scheme {
    /// The legacy numbering.
    Old,
    /// The replacement numbering.
    New,
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Old => write!(f, "old"),
            Self::New => write!(f, "new"),
        }
    }
}

/// The underlying cause of an [`Issue`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cause {
    /// Shapes on the electrode layer were rejected by the outlier filter.
    StrayShapes {
        /// The number of candidates kept.
        kept: usize,
        /// The number of candidates rejected.
        rejected: usize,
    },
    /// Electrode centers coincided within the deduplication tolerance.
    DuplicateElectrodes {
        /// The number of centers merged into an earlier one.
        removed: usize,
    },
    /// The number of extracted electrodes differs from the expected count.
    CountMismatch {
        /// The expected number of electrodes.
        expected: usize,
        /// The number of electrodes actually extracted.
        actual: usize,
    },
    /// Grid filling produced far more points than were observed.
    SparseGridFill {
        /// The number of distinct input positions.
        observed: usize,
        /// The number of positions in the filled grid.
        filled: usize,
    },
    /// The two numbering grids differ in shape.
    ShapeMismatch {
        /// The row count of the old grid.
        old_rows: usize,
        /// The row count of the new grid.
        new_rows: usize,
        /// Indices of common rows whose lengths differ.
        ragged_rows: Vec<usize>,
    },
    /// The reference table lists some old IDs more than once.
    DuplicateReferenceKeys {
        /// The repeated old IDs.
        keys: Vec<ElectrodeId>,
    },
    /// A numbering grid contains repeated IDs.
    DuplicateIds {
        /// The grid containing the repeats.
        scheme: Scheme,
        /// The repeated IDs.
        values: Vec<ElectrodeId>,
    },
    /// Grid positions whose old ID is absent from the reference table.
    MissingReferenceEntries {
        /// The number of such positions.
        count: usize,
    },
    /// Reference entries whose old ID never appears in the old grid.
    UnusedReferenceEntries {
        /// The number of such entries.
        count: usize,
    },
    /// Grid positions contradicting the reference table.
    Mismatches {
        /// The number of such positions.
        count: usize,
    },
}

impl Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrayShapes { kept, rejected } => write!(
                f,
                "rejected {} stray shape(s) on the electrode layer; kept {}",
                rejected, kept
            ),
            Self::DuplicateElectrodes { removed } => {
                write!(f, "merged {} duplicate electrode center(s)", removed)
            }
            Self::CountMismatch { expected, actual } => write!(
                f,
                "electrode count mismatch: expected {}, extracted {}",
                expected, actual
            ),
            Self::SparseGridFill { observed, filled } => write!(
                f,
                "grid fill produced {} points from only {} observed points",
                filled, observed
            ),
            Self::ShapeMismatch {
                old_rows,
                new_rows,
                ragged_rows,
            } => {
                write!(
                    f,
                    "numbering grids differ in shape: old has {} rows, new has {} rows",
                    old_rows, new_rows
                )?;
                if !ragged_rows.is_empty() {
                    write!(f, "; column counts differ in rows {:?}", ragged_rows)?;
                }
                write!(f, "; comparing the common region only")
            }
            Self::DuplicateReferenceKeys { keys } => write!(
                f,
                "duplicate `old` entries in the reference table (last entry wins): {:?}",
                keys
            ),
            Self::DuplicateIds { scheme, values } => {
                write!(f, "duplicate IDs in the {} numbering: {:?}", scheme, values)
            }
            Self::MissingReferenceEntries { count } => write!(
                f,
                "{} grid position(s) have an old ID missing from the reference table",
                count
            ),
            Self::UnusedReferenceEntries { count } => write!(
                f,
                "{} reference `old` value(s) never appear in the old numbering",
                count
            ),
            Self::Mismatches { count } => write!(
                f,
                "{} grid position(s) contradict the reference table",
                count
            ),
        }
    }
}

/// An issue that should be reported to users.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    cause: Cause,
    severity: Severity,
}

impl Issue {
    /// Creates a new issue from the given cause and severity.
    pub fn new(cause: Cause, severity: Severity) -> Self {
        Self { cause, severity }
    }

    /// Creates a new issue and logs it immediately.
    ///
    /// The log level will be selected according to the given severity.
    pub fn new_and_log(cause: Cause, severity: Severity) -> Self {
        let result = Self::new(cause, severity);
        match severity {
            Severity::Info => tracing::event!(Level::INFO, issue = ?result.cause, "{}", result),
            Severity::Warning => tracing::event!(Level::WARN, issue = ?result.cause, "{}", result),
            Severity::Error => tracing::event!(Level::ERROR, issue = ?result.cause, "{}", result),
        }
        result
    }

    /// Gets the underlying cause of this issue.
    #[inline]
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Returns the severity of this issue.
    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns an optional help message describing how to resolve the issue.
    pub fn help(&self) -> Option<&'static str> {
        match self.cause {
            Cause::StrayShapes { .. } => Some(
                "check that the configured layer and vertex counts select only electrode shapes",
            ),
            Cause::CountMismatch { .. } => {
                Some("the layout may contain extra stimulus shapes; set `count_policy` to silence this")
            }
            Cause::SparseGridFill { .. } => {
                Some("the position list may not come from a rectangular grid; pass an explicit pitch")
            }
            Cause::MissingReferenceEntries { .. } => {
                Some("the reference table is incomplete; missing entries are not counted as failures")
            }
            _ => None,
        }
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.cause)
    }
}

/// A collection of issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueSet {
    issues: Vec<Issue>,
    num_errors: usize,
    num_warnings: usize,
}

impl IssueSet {
    /// Creates a new, empty issue set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given issue to the issue set.
    pub fn add(&mut self, issue: Issue) {
        match issue.severity() {
            Severity::Error => self.num_errors += 1,
            Severity::Warning => self.num_warnings += 1,
            Severity::Info => (),
        };
        self.issues.push(issue);
    }

    /// Creates, logs and adds an issue.
    #[inline]
    pub fn report(&mut self, cause: Cause, severity: Severity) {
        self.add(Issue::new_and_log(cause, severity));
    }

    /// Moves every issue of `other` into this set.
    pub fn extend(&mut self, other: IssueSet) {
        for issue in other {
            self.add(issue);
        }
    }

    /// Returns an iterator over all issues in the set.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// The number of issues in this issue set.
    #[inline]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns `true` if this issue set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` if this issue set contains an error.
    pub fn has_error(&self) -> bool {
        self.num_errors > 0
    }

    /// The number of errors in this issue set.
    #[inline]
    pub fn num_errors(&self) -> usize {
        self.num_errors
    }

    /// Returns `true` if this issue set contains a warning.
    pub fn has_warning(&self) -> bool {
        self.num_warnings > 0
    }

    /// The number of warnings in this issue set.
    #[inline]
    pub fn num_warnings(&self) -> usize {
        self.num_warnings
    }

    /// The most severe level present, if any issue was recorded.
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(Issue::severity).max()
    }
}

impl IntoIterator for IssueSet {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;
    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl Display for IssueSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for issue in self.issues.iter() {
            writeln!(f, "{}", issue)?;
        }
        Ok(())
    }
}
