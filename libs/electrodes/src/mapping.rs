//! Consistency checks between two electrode numbering schemes.
//!
//! Two [`NumberingGrid`]s record, position by position, the ID each scheme
//! assigns to the same physical electrode. A [`MappingTable`] gives the
//! expected old→new correspondence. [`check_mapping`] compares the grids
//! against the table and collects every anomaly in a [`DiscrepancyReport`].
//!
//! Only a [`Mismatch`] makes the check fail. Missing table entries, unused
//! table entries and duplicate IDs indicate incomplete reference data rather
//! than a wrong numbering, so they are reported without failing.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{span, Level};

use crate::issues::{Cause, IssueSet, Scheme, Severity};

/// An electrode ID in either numbering scheme.
pub type ElectrodeId = i64;

/// A row-major grid of electrode IDs.
///
/// Rows may differ in length; see [`NumberingGrid::is_rectangular`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberingGrid {
    rows: Vec<Vec<ElectrodeId>>,
}

impl NumberingGrid {
    /// Creates a grid from its rows.
    pub fn new(rows: Vec<Vec<ElectrodeId>>) -> Self {
        Self { rows }
    }

    /// The rows of the grid.
    #[inline]
    pub fn rows(&self) -> &[Vec<ElectrodeId>] {
        &self.rows
    }

    /// The number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The ID at `(row, col)`, if present.
    pub fn get(&self, row: usize, col: usize) -> Option<ElectrodeId> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Returns `true` if every row has the same length.
    pub fn is_rectangular(&self) -> bool {
        self.rows.windows(2).all(|w| w[0].len() == w[1].len())
    }

    /// Iterates over all IDs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ElectrodeId> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// The total number of IDs.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Returns `true` if the grid holds no IDs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// IDs appearing more than once, with their counts, sorted by ID.
    pub fn duplicates(&self) -> Vec<DuplicateCount> {
        let mut counts: BTreeMap<ElectrodeId, usize> = BTreeMap::new();
        for id in self.iter() {
            *counts.entry(id).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(value, count)| DuplicateCount { value, count })
            .collect()
    }
}

impl From<Vec<Vec<ElectrodeId>>> for NumberingGrid {
    fn from(rows: Vec<Vec<ElectrodeId>>) -> Self {
        Self::new(rows)
    }
}

/// The expected old→new ID correspondence.
///
/// When an old ID is listed more than once, the last entry wins and the ID is
/// recorded in [`MappingTable::duplicate_keys`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingTable {
    map: IndexMap<ElectrodeId, ElectrodeId>,
    duplicate_keys: BTreeSet<ElectrodeId>,
}

impl MappingTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the previous new ID for `old` if any.
    pub fn insert(&mut self, old: ElectrodeId, new: ElectrodeId) -> Option<ElectrodeId> {
        let prev = self.map.insert(old, new);
        if prev.is_some() {
            self.duplicate_keys.insert(old);
        }
        prev
    }

    /// The expected new ID for `old`.
    #[inline]
    pub fn get(&self, old: ElectrodeId) -> Option<ElectrodeId> {
        self.map.get(&old).copied()
    }

    /// Returns `true` if the table has an entry for `old`.
    #[inline]
    pub fn contains(&self, old: ElectrodeId) -> bool {
        self.map.contains_key(&old)
    }

    /// The number of distinct old IDs.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over the distinct old IDs, in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = ElectrodeId> + '_ {
        self.map.keys().copied()
    }

    /// Old IDs that were listed more than once, sorted.
    pub fn duplicate_keys(&self) -> Vec<ElectrodeId> {
        self.duplicate_keys.iter().copied().collect()
    }
}

impl FromIterator<(ElectrodeId, ElectrodeId)> for MappingTable {
    fn from_iter<T: IntoIterator<Item = (ElectrodeId, ElectrodeId)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (old, new) in iter {
            table.insert(old, new);
        }
        table
    }
}

/// A grid position whose old ID has no reference entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    /// The grid row.
    pub row: usize,
    /// The grid column.
    pub col: usize,
    /// The old ID at this position.
    pub old: ElectrodeId,
    /// The new ID at this position.
    pub actual_new: ElectrodeId,
}

/// A grid position whose new ID contradicts the reference table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    /// The grid row.
    pub row: usize,
    /// The grid column.
    pub col: usize,
    /// The old ID at this position.
    pub old: ElectrodeId,
    /// The new ID the reference table assigns to `old`.
    pub expected_new: ElectrodeId,
    /// The new ID found at this position.
    pub actual_new: ElectrodeId,
}

/// An ID occurring `count` times in one grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCount {
    /// The repeated ID.
    pub value: ElectrodeId,
    /// How often it occurs.
    pub count: usize,
}

/// Describes how two numbering grids differ in shape.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShapeMismatch {
    /// The number of rows of the old grid.
    pub old_rows: usize,
    /// The number of rows of the new grid.
    pub new_rows: usize,
    /// Common rows whose column counts differ.
    pub ragged_rows: Vec<usize>,
}

/// The overall verdict of a mapping check.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Every position matched and no anomaly was found.
    Clean,
    /// No mismatch, but the report lists other anomalies.
    Soft,
    /// At least one position contradicts the reference table.
    Hard,
}

impl Outcome {
    /// Returns `true` only for [`Outcome::Hard`].
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Hard)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Clean => write!(f, "clean"),
            Self::Soft => write!(f, "passed with warnings"),
            Self::Hard => write!(f, "failed"),
        }
    }
}

/// Everything found by [`check_mapping`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiscrepancyReport {
    /// The number of positions compared.
    pub total_positions: usize,
    /// Positions contradicting the table, in row-major order.
    pub mismatches: Vec<Mismatch>,
    /// Positions whose old ID has no table entry, in row-major order.
    pub missing: Vec<MissingEntry>,
    /// Repeated IDs of the old grid, sorted by ID.
    pub duplicate_old: Vec<DuplicateCount>,
    /// Repeated IDs of the new grid, sorted by ID.
    pub duplicate_new: Vec<DuplicateCount>,
    /// Table keys never occurring in the old grid, sorted.
    pub unused: Vec<ElectrodeId>,
    /// Table keys listed more than once, sorted.
    pub duplicate_keys: Vec<ElectrodeId>,
    /// Set if the grids differ in shape.
    pub shape_mismatch: Option<ShapeMismatch>,
    /// The diagnostics logged during the check.
    pub issues: IssueSet,
}

impl DiscrepancyReport {
    /// The overall verdict.
    pub fn outcome(&self) -> Outcome {
        if !self.mismatches.is_empty() {
            Outcome::Hard
        } else if self.missing.is_empty()
            && self.unused.is_empty()
            && self.duplicate_old.is_empty()
            && self.duplicate_new.is_empty()
            && self.duplicate_keys.is_empty()
            && self.shape_mismatch.is_none()
        {
            Outcome::Clean
        } else {
            Outcome::Soft
        }
    }
}

impl Display for DiscrepancyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Mapping check summary ===")?;
        writeln!(f, "Total positions checked: {}", self.total_positions)?;
        writeln!(f, "Missing 'old' entries in reference: {}", self.missing.len())?;
        writeln!(f, "Mismatches: {}", self.mismatches.len())?;
        writeln!(f, "Reference 'old' values unused in old numbering: {}", self.unused.len())?;
        writeln!(
            f,
            "Duplicate IDs: {} in old, {} in new",
            self.duplicate_old.len(),
            self.duplicate_new.len()
        )?;
        if !self.duplicate_keys.is_empty() {
            writeln!(f, "Duplicate reference keys: {:?}", self.duplicate_keys)?;
        }
        if self.shape_mismatch.is_some() {
            writeln!(f, "Grid shapes differ; compared the common region only")?;
        }
        write!(f, "Result: {}", self.outcome())
    }
}

/// Compares `old` and `new` position by position against `table`.
///
/// If the grids differ in shape, only the common rows and, within each row,
/// the common columns are compared.
pub fn check_mapping(
    old: &NumberingGrid,
    new: &NumberingGrid,
    table: &MappingTable,
) -> DiscrepancyReport {
    let span = span!(Level::INFO, "check_mapping", positions = old.len());
    let _guard = span.enter();

    let mut report = DiscrepancyReport::default();

    let nrows = old.num_rows().min(new.num_rows());
    let ragged_rows: Vec<usize> = (0..nrows)
        .filter(|&r| old.rows[r].len() != new.rows[r].len())
        .collect();
    if old.num_rows() != new.num_rows() || !ragged_rows.is_empty() {
        let mismatch = ShapeMismatch {
            old_rows: old.num_rows(),
            new_rows: new.num_rows(),
            ragged_rows,
        };
        report.issues.report(
            Cause::ShapeMismatch {
                old_rows: mismatch.old_rows,
                new_rows: mismatch.new_rows,
                ragged_rows: mismatch.ragged_rows.clone(),
            },
            Severity::Warning,
        );
        report.shape_mismatch = Some(mismatch);
    }

    for (row, (row_old, row_new)) in old.rows.iter().zip(&new.rows).enumerate() {
        for (col, (&old_id, &actual_new)) in row_old.iter().zip(row_new).enumerate() {
            report.total_positions += 1;
            match table.get(old_id) {
                None => report.missing.push(MissingEntry {
                    row,
                    col,
                    old: old_id,
                    actual_new,
                }),
                Some(expected_new) if expected_new != actual_new => {
                    tracing::debug!(row, col, old_id, expected_new, actual_new, "mismatch");
                    report.mismatches.push(Mismatch {
                        row,
                        col,
                        old: old_id,
                        expected_new,
                        actual_new,
                    })
                }
                Some(_) => (),
            }
        }
    }

    let used: BTreeSet<ElectrodeId> = old.iter().collect();
    let mut unused: Vec<ElectrodeId> = table.keys().filter(|k| !used.contains(k)).collect();
    unused.sort_unstable();
    report.unused = unused;
    report.duplicate_old = old.duplicates();
    report.duplicate_new = new.duplicates();
    report.duplicate_keys = table.duplicate_keys();

    if !report.duplicate_keys.is_empty() {
        report.issues.report(
            Cause::DuplicateReferenceKeys {
                keys: report.duplicate_keys.clone(),
            },
            Severity::Warning,
        );
    }
    for (scheme, dups) in [
        (Scheme::Old, &report.duplicate_old),
        (Scheme::New, &report.duplicate_new),
    ] {
        if !dups.is_empty() {
            let values = dups.iter().map(|d| d.value).collect();
            report
                .issues
                .report(Cause::DuplicateIds { scheme, values }, Severity::Warning);
        }
    }
    if !report.missing.is_empty() {
        report.issues.report(
            Cause::MissingReferenceEntries {
                count: report.missing.len(),
            },
            Severity::Info,
        );
    }
    if !report.unused.is_empty() {
        report.issues.report(
            Cause::UnusedReferenceEntries {
                count: report.unused.len(),
            },
            Severity::Info,
        );
    }
    if !report.mismatches.is_empty() {
        report.issues.report(
            Cause::Mismatches {
                count: report.mismatches.len(),
            },
            Severity::Error,
        );
    }

    report
}
