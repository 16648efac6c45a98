//! Records, the restriction mask, and the delimited-text loader.
//!
//! Input is comma-delimited text. The first row is the restriction mask: one
//! flag per column, `1` for a numeric column that participates in distance
//! and `0` for a pass-through column kept only for display. Every following
//! row is a record and must have exactly as many columns as the mask.
//!
//! ```text
//! 1,0,1
//! 2.0,label,3.0      -> active [2.0, 3.0], "label" retained for display
//! ```
//!
//! The mask is resolved once into a [`Schema`]; rows are then parsed column by
//! column against it, so a record's numeric projection is computed at load
//! time and never re-derived.

use crate::error::{Error, Result};
use core::fmt;
use std::io;
use std::path::Path;

/// Role of a column under the restriction mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Parsed as `f64` and used in distance computations.
    Active,
    /// Kept verbatim for display.
    PassThrough,
}

/// Per-column schema derived from the restriction mask.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    columns: Vec<ColumnKind>,
}

impl Schema {
    /// Create a schema from explicit column kinds.
    pub fn new(columns: Vec<ColumnKind>) -> Self {
        Self { columns }
    }

    /// A schema where all `width` columns are numeric-active.
    pub fn all_active(width: usize) -> Self {
        Self::new(vec![ColumnKind::Active; width])
    }

    /// Parse mask cells (`1` active, `0` pass-through).
    pub fn parse_mask<'a>(cells: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let columns = cells
            .into_iter()
            .enumerate()
            .map(|(column, cell)| match cell.trim() {
                "1" => Ok(ColumnKind::Active),
                "0" => Ok(ColumnKind::PassThrough),
                other => Err(Error::InvalidMask {
                    column,
                    value: other.to_string(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns })
    }

    /// Number of columns (mask length).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of numeric-active columns.
    pub fn active_width(&self) -> usize {
        self.columns
            .iter()
            .filter(|&&c| c == ColumnKind::Active)
            .count()
    }

    /// Kind of column `i`.
    pub fn kind(&self, i: usize) -> Option<ColumnKind> {
        self.columns.get(i).copied()
    }

    /// Iterate over column kinds in order.
    pub fn iter(&self) -> impl Iterator<Item = ColumnKind> + '_ {
        self.columns.iter().copied()
    }

    /// Parse one row against this schema.
    ///
    /// Returns the display record together with its numeric-active projection.
    pub fn parse_row<'a>(
        &self,
        row: usize,
        cells: impl IntoIterator<Item = &'a str>,
    ) -> Result<(Record, Vec<f64>)> {
        let cells: Vec<&str> = cells.into_iter().collect();
        if cells.len() != self.width() {
            return Err(Error::InconsistentRecordWidth {
                row,
                expected: self.width(),
                found: cells.len(),
            });
        }

        let mut values = Vec::with_capacity(cells.len());
        let mut active = Vec::with_capacity(self.active_width());
        for (column, (kind, cell)) in self.columns.iter().zip(cells).enumerate() {
            match kind {
                ColumnKind::Active => {
                    let x = cell
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|x| x.is_finite())
                        .ok_or_else(|| Error::InvalidNumber {
                            row,
                            column,
                            value: cell.to_string(),
                        })?;
                    active.push(x);
                    values.push(Value::Number(x));
                }
                ColumnKind::PassThrough => values.push(Value::Text(cell.to_string())),
            }
        }
        Ok((Record { values }, active))
    }
}

/// A single cell of a loaded record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric-active cell.
    Number(f64),
    /// Pass-through cell.
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// A loaded row, aligned to the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    /// All cells in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// An immutable, loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    schema: Schema,
    records: Vec<Record>,
    points: Vec<Vec<f64>>,
}

impl Dataset {
    /// Parse rows of cells against a schema.
    pub fn from_rows<'a, R, C>(schema: Schema, rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = &'a str>,
    {
        let mut records = Vec::new();
        let mut points = Vec::new();
        for (row, cells) in rows.into_iter().enumerate() {
            let (record, point) = schema.parse_row(row, cells)?;
            records.push(record);
            points.push(point);
        }
        Ok(Self {
            schema,
            records,
            points,
        })
    }

    /// Build a dataset where every column is numeric-active.
    pub fn from_points(points: Vec<Vec<f64>>) -> Result<Self> {
        let width = points.first().map_or(0, Vec::len);
        if let Some(p) = points.iter().find(|p| p.len() != width) {
            return Err(Error::DimensionMismatch {
                expected: width,
                found: p.len(),
            });
        }
        let records = points
            .iter()
            .map(|p| Record {
                values: p.iter().map(|&x| Value::Number(x)).collect(),
            })
            .collect();
        Ok(Self {
            schema: Schema::all_active(width),
            records,
            points,
        })
    }

    /// Load comma-delimited text whose first row is the restriction mask.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        // Blank lines never reach here; the csv reader skips them.
        let mut rows = rdr.records();

        let schema = match rows.next() {
            Some(mask) => Schema::parse_mask(mask?.iter())?,
            None => {
                return Err(Error::InvalidParameter {
                    name: "input",
                    message: "missing restriction mask row",
                })
            }
        };

        let rows = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        let dataset = Self::from_rows(schema, rows.iter().map(|r| r.iter()))?;
        log::debug!(
            "loaded {} records ({} columns, {} active)",
            dataset.len(),
            dataset.schema.width(),
            dataset.schema.active_width()
        );
        Ok(dataset)
    }

    /// Load a file; see [`Dataset::from_reader`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Column schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Records in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Numeric-active projection of every record, in load order.
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records were loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_selects_active_columns() {
        let data = Dataset::from_reader("1,0,1\n2.0,label,3.0\n".as_bytes()).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.points()[0], vec![2.0, 3.0]);
        assert_eq!(
            data.records()[0].values()[1],
            Value::Text("label".to_string())
        );
        assert_eq!(data.schema().active_width(), 2);
        assert_eq!(data.records()[0].to_string(), "2,label,3");
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        let err = Dataset::from_reader("1,1\n1.0,2.0\n3.0\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::InconsistentRecordWidth {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_bad_mask_flag() {
        let err = Dataset::from_reader("1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidMask { column: 1, .. }));
    }

    #[test]
    fn test_non_numeric_active_cell() {
        let err = Dataset::from_reader("1\nabc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { row: 0, column: 0, .. }));

        let err = Dataset::from_reader("1\nNaN\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { .. }));
    }

    #[test]
    fn test_blank_lines_and_whitespace() {
        let data = Dataset::from_reader("1, 1\n\n 0, 1\n5 ,6\n".as_bytes()).unwrap();
        assert_eq!(data.points(), &[vec![0.0, 1.0], vec![5.0, 6.0]]);
    }

    #[test]
    fn test_empty_cells_are_not_skipped() {
        let err = Dataset::from_reader("1,1\n0,0\n,\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { row: 1, column: 0, .. }));

        let data = Dataset::from_reader("0,0\na,b\n,\n".as_bytes()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.records()[1].to_string(), ",");
    }

    #[test]
    fn test_missing_mask() {
        assert!(Dataset::from_reader("".as_bytes()).is_err());
    }

    #[test]
    fn test_mask_only_is_empty_dataset() {
        let data = Dataset::from_reader("1,0\n".as_bytes()).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.schema().width(), 2);
    }

    #[test]
    fn test_from_points_checks_dimensions() {
        assert!(Dataset::from_points(vec![vec![0.0, 1.0], vec![2.0]]).is_err());
        let data = Dataset::from_points(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
        assert_eq!(data.schema().active_width(), 2);
    }
}
