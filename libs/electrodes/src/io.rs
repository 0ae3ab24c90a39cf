//! Readers and writers for the external file formats.
//!
//! Every reader checks that its input exists first and fails with
//! [`Error::InputAbsent`] otherwise, before any parsing happens.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use geometry::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extract::{ElectrodeLayout, PolygonRecord};
use crate::mapping::{DiscrepancyReport, MappingTable, NumberingGrid};

/// File name of the mismatch list.
pub const MISMATCHES_FILE: &str = "mismatches.csv";
/// File name of the missing-entry list.
pub const MISSING_FILE: &str = "missing_old_entries.csv";
/// File name of the unused-entry list.
pub const UNUSED_FILE: &str = "unused_csv_old.csv";
/// File name of the duplicate counts in the old numbering.
pub const DUPLICATE_OLD_FILE: &str = "duplicate_old_numbers.csv";
/// File name of the duplicate counts in the new numbering.
pub const DUPLICATE_NEW_FILE: &str = "duplicate_new_numbers.csv";

/// Fails with [`Error::InputAbsent`] if `path` does not exist.
pub fn require(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        Ok(())
    } else {
        Err(Error::InputAbsent {
            path: path.to_path_buf(),
        })
    }
}

/// Reads a required file into a string.
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    require(path)?;
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    Ok(text)
}

/// Reads a JSON array of polygon records.
pub fn read_polygons(path: impl AsRef<Path>) -> Result<Vec<PolygonRecord>> {
    let path = path.as_ref();
    let polygons: Vec<PolygonRecord> = serde_json::from_str(&read_to_string(path)?)?;
    tracing::debug!(path = %path.display(), polygons = polygons.len(), "read polygon records");
    Ok(polygons)
}

#[derive(Deserialize)]
struct PointList {
    #[serde(default)]
    pos: Vec<serde_yaml::Value>,
}

/// Parses the `pos` list of a YAML document.
///
/// Entries that are `null`, not a pair, or contain a non-numeric value are
/// skipped.
pub fn parse_point_list(yaml: &str) -> Result<Vec<Point>> {
    let list: PointList = serde_yaml::from_str(yaml)?;
    let total = list.pos.len();
    let points: Vec<Point> = list
        .pos
        .iter()
        .filter_map(|entry| match entry.as_sequence()?.as_slice() {
            [x, y] => Some(Point::new(x.as_f64()?, y.as_f64()?)),
            _ => None,
        })
        .collect();
    if points.len() < total {
        tracing::debug!(skipped = total - points.len(), "skipped invalid positions");
    }
    Ok(points)
}

/// Reads a YAML position list. See [`parse_point_list`].
pub fn read_point_list(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    parse_point_list(&read_to_string(path)?)
}

/// The old and new numbering of one array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingPair {
    /// The legacy numbering.
    pub old: NumberingGrid,
    /// The replacement numbering.
    pub new: NumberingGrid,
}

/// Reads a YAML (or JSON) document with `old` and `new` numbering grids.
pub fn read_numbering(path: impl AsRef<Path>) -> Result<NumberingPair> {
    Ok(serde_yaml::from_str(&read_to_string(path)?)?)
}

/// Parses a CSV mapping table with `old` and `new` columns.
///
/// Other columns are ignored.
pub fn parse_mapping_table(reader: impl Read) -> Result<MappingTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            Error::InvalidInput(format!("mapping table must have a `{name}` column"))
        })
    };
    let (old_col, new_col) = (column("old")?, column("new")?);

    let mut table = MappingTable::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let field = |col: usize| -> Result<i64> {
            let value = record.get(col).unwrap_or_default();
            value.parse().map_err(|_| {
                Error::InvalidInput(format!(
                    "mapping table row {}: `{}` is not an integer",
                    line + 1,
                    value
                ))
            })
        };
        table.insert(field(old_col)?, field(new_col)?);
    }
    Ok(table)
}

/// Reads a CSV mapping table. See [`parse_mapping_table`].
pub fn read_mapping_table(path: impl AsRef<Path>) -> Result<MappingTable> {
    let path = path.as_ref();
    require(path)?;
    let table = parse_mapping_table(File::open(path)?)?;
    tracing::debug!(path = %path.display(), entries = table.len(), "read mapping table");
    Ok(table)
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Writes `value` as pretty-printed JSON, creating parent directories as needed.
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    create_parent(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes an electrode layout as JSON.
pub fn write_layout(path: impl AsRef<Path>, layout: &ElectrodeLayout) -> Result<()> {
    write_json(path, layout)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the non-empty lists of `report` as CSV files in `dir`.
///
/// Returns the paths of the files written.
pub fn write_report(dir: impl AsRef<Path>, report: &DiscrepancyReport) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    if !report.mismatches.is_empty() {
        let path = dir.join(MISMATCHES_FILE);
        write_rows(&path, &report.mismatches)?;
        written.push(path);
    }
    if !report.missing.is_empty() {
        let path = dir.join(MISSING_FILE);
        write_rows(&path, &report.missing)?;
        written.push(path);
    }
    if !report.unused.is_empty() {
        let path = dir.join(UNUSED_FILE);
        let mut wtr = csv::Writer::from_path(&path)?;
        wtr.write_record(["unused_csv_old"])?;
        for value in &report.unused {
            wtr.write_record([value.to_string()])?;
        }
        wtr.flush()?;
        written.push(path);
    }
    for (name, dups) in [
        (DUPLICATE_OLD_FILE, &report.duplicate_old),
        (DUPLICATE_NEW_FILE, &report.duplicate_new),
    ] {
        if !dups.is_empty() {
            let path = dir.join(name);
            write_rows(&path, dups)?;
            written.push(path);
        }
    }

    for path in &written {
        tracing::info!(path = %path.display(), "wrote report file");
    }
    Ok(written)
}
