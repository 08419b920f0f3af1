//! A minimal table of labeled rows.
//!
//! Rows are string cells addressed by column name. Loading from CSV, Parquet,
//! or a database is left to the caller; the sampler only needs to group rows
//! by one column and append another.

use crate::{Error, Result};

/// Rows of string cells under named columns.
///
/// ```rust
/// use fewshot::Table;
///
/// let mut table = Table::new(["text", "category"]);
/// table.push_row(["goal!", "sports"]).unwrap();
/// table.push_row(["vote", "politics"]).unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(1, "category"), Some("politics"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given columns.
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from columns and rows, checking row widths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowWidth`] for the first row whose length differs
    /// from the column count.
    pub fn from_rows<C, S>(columns: C, rows: Vec<Vec<String>>) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = Self::new(columns);
        let expected = table.columns.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(Error::RowWidth {
                row,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { rows, ..table })
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowWidth`] if the row length differs from the column count.
    pub fn push_row<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(Error::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Position of a column, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if the column does not exist.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// One cell, if the row and column exist.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// Column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, each as wide as [`columns`](Self::columns).
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Set every row's value in `column` (appending the column if absent).
    ///
    /// `values` must yield one value per row.
    pub(crate) fn set_column<I>(&mut self, column: &str, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        let idx = match self.column_index(column) {
            Some(idx) => idx,
            None => {
                self.columns.push(column.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.columns.len() - 1
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = value;
        }
    }
}
