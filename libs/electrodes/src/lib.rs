//! Electrode extraction and numbering validation for multi-electrode arrays.
//!
//! Two independent workflows live here:
//!
//! * [`extract`]: layout polygons are filtered, deduplicated, rescaled onto a
//!   simulator grid and labeled, producing an [`ElectrodeLayout`].
//! * [`mapping`]: two numbering schemes of the same array are compared
//!   against a reference old→new table, producing a [`DiscrepancyReport`].
//!
//! # Examples
//!
//! ```
//! # use electrodes::mapping::{check_mapping, NumberingGrid, Outcome};
//! let old = NumberingGrid::new(vec![vec![1, 2], vec![3, 4]]);
//! let new = NumberingGrid::new(vec![vec![10, 20], vec![30, 40]]);
//! let table = [(1, 10), (2, 20), (3, 30), (4, 40)].into_iter().collect();
//! let report = check_mapping(&old, &new, &table);
//! assert_eq!(report.outcome(), Outcome::Clean);
//! ```
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod grid;
pub mod io;
pub mod issues;
pub mod label;
pub mod mapping;
pub mod normalize;
pub mod set;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use geometry;

pub use config::{Config, CountPolicy, GridConfig, NormalizeConfig};
pub use error::{Error, Result};
pub use extract::{ElectrodeLayout, ElectrodeRecord, Extraction, Extractor, PolygonRecord};
pub use grid::{fill_missing, GridFill, GridSpec};
pub use issues::{Issue, IssueSet, Severity};
pub use label::LabeledElectrode;
pub use mapping::{check_mapping, DiscrepancyReport, MappingTable, NumberingGrid, Outcome};
pub use normalize::{normalize, Normalization};
pub use set::ElectrodeSet;
