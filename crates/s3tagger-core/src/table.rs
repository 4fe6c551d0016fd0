//! The row/column table shared between CSV I/O and the tag operations.
//!
//! Row 0 is the header: cell 0 is the bucket-name column (conventionally
//! [`NAME_COLUMN`]), cells `1..` are tag keys. Every following row holds a
//! bucket name and the tag values aligned with the header.

use std::collections::HashMap;
use std::io::{Read, Write};

use crate::error::{TaggerError, TaggerResult};

/// Header of the bucket-name column.
pub const NAME_COLUMN: &str = "Name";

/// Split a comma-delimited tag-key list.
///
/// Entries are trimmed and empty entries dropped; order is preserved.
///
/// # Examples
///
/// ```
/// use s3tagger_core::parse_tag_keys;
///
/// assert_eq!(parse_tag_keys("env, team,,owner"), vec!["env", "team", "owner"]);
/// ```
#[must_use]
pub fn parse_tag_keys(keys: &str) -> Vec<String> {
    keys.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Rows of string cells; row 0 is the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table holding only the header row `[leading, keys...]`.
    #[must_use]
    pub fn with_headers<S: AsRef<str>>(leading: &str, keys: &[S]) -> Self {
        let header = std::iter::once(leading.to_owned())
            .chain(keys.iter().map(|k| k.as_ref().to_owned()))
            .collect();
        Self { rows: vec![header] }
    }

    /// Build a table from raw rows, checking its shape.
    ///
    /// # Errors
    ///
    /// Returns [`TaggerError::InvalidTable`] if there is no header, the header
    /// has no bucket-name cell, a row's width differs from the header's, or a
    /// data row has an empty bucket name.
    pub fn from_rows(rows: Vec<Vec<String>>) -> TaggerResult<Self> {
        let Some(header) = rows.first() else {
            return Err(TaggerError::InvalidTable("missing header row".to_owned()));
        };
        if header.is_empty() {
            return Err(TaggerError::InvalidTable(
                "header row has no bucket-name column".to_owned(),
            ));
        }

        let width = header.len();
        for (idx, row) in rows.iter().enumerate().skip(1) {
            if row.len() != width {
                return Err(TaggerError::InvalidTable(format!(
                    "row {idx} has {} cells, header has {width}",
                    row.len()
                )));
            }
            if row[0].trim().is_empty() {
                return Err(TaggerError::InvalidTable(format!(
                    "row {idx} has an empty bucket name"
                )));
            }
        }

        Ok(Self { rows })
    }

    /// Append a row for `bucket`, one cell per header tag key.
    ///
    /// Keys absent from `tags` yield an empty cell.
    pub fn push_tags(&mut self, bucket: &str, tags: &HashMap<String, String>) {
        let row = std::iter::once(bucket.to_owned())
            .chain(
                self.tag_keys()
                    .iter()
                    .map(|k| tags.get(k).cloned().unwrap_or_default()),
            )
            .collect();
        self.rows.push(row);
    }

    /// The header row.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// The tag keys of the header (every cell after the bucket-name column).
    #[must_use]
    pub fn tag_keys(&self) -> &[String] {
        &self.rows[0][1..]
    }

    /// Data rows, excluding the header.
    #[must_use]
    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    /// All rows, header first.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Consume the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Parse a CSV document into a table.
    ///
    /// # Errors
    ///
    /// Returns [`TaggerError::Csv`] on malformed CSV and
    /// [`TaggerError::InvalidTable`] if the rows do not form a valid table.
    pub fn read_csv<R: Read>(reader: R) -> TaggerResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let rows = csv_reader
            .records()
            .map(|record| record.map(|r| r.iter().map(ToOwned::to_owned).collect()))
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Self::from_rows(rows)
    }

    /// Write the table as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> TaggerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
