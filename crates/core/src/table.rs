//! The tabular result type handlers hand back to the dispatcher.
//!
//! A [`Table`] with no rows is the "no data" sentinel: handlers return it for
//! expected empty-result conditions instead of raising an error, and the
//! dispatcher surfaces it as a user-facing message.

use std::cmp::Ordering;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
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

    /// Appends a row. Rows shorter than the header are padded with empty
    /// cells so later column access stays in bounds.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Sorts rows by the named column, comparing numerically when both cells
    /// parse as numbers and lexicographically otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] if the column does not exist.
    pub fn sort_by_column(&mut self, name: &str, descend: bool) -> Result<()> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;

        self.rows
            .sort_by(|left, right| compare_cells(&left[index], &right[index]));
        if descend {
            self.rows.reverse();
        }
        Ok(())
    }

    /// Keeps the first `limit` rows.
    #[must_use]
    pub fn take(mut self, limit: usize) -> Self {
        self.rows.truncate(limit);
        self
    }

    /// Keeps the last `limit` rows, preserving their order.
    #[must_use]
    pub fn take_last(mut self, limit: usize) -> Self {
        let excess = self.rows.len().saturating_sub(limit);
        self.rows.drain(..excess);
        self
    }

    /// Drops the first `skip` rows.
    #[must_use]
    pub fn skip(mut self, skip: usize) -> Self {
        let skip = skip.min(self.rows.len());
        self.rows.drain(..skip);
        self
    }

    /// Keeps only rows for which `predicate` returns true.
    #[must_use]
    pub fn retain_rows<F>(mut self, predicate: F) -> Self
    where
        F: FnMut(&Vec<String>) -> bool,
    {
        self.rows.retain(predicate);
        self
    }
}

fn compare_cells(left: &str, right: &str) -> Ordering {
    match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => left.cmp(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["Name", "TVL"]);
        table.push_row(["Curve", "9.1"]);
        table.push_row(["Maker", "12.4"]);
        table.push_row(["Aave", "10.8"]);
        table
    }

    #[test]
    fn test_empty_table_is_the_no_data_sentinel() {
        let table = Table::new(["Name"]);
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_numeric_sort_ascending_and_descending() {
        let mut table = sample();
        table.sort_by_column("TVL", false).unwrap();
        let first: Vec<&str> = table.rows().iter().map(|row| row[0].as_str()).collect();
        assert_eq!(first, vec!["Curve", "Aave", "Maker"]);

        table.sort_by_column("TVL", true).unwrap();
        let first: Vec<&str> = table.rows().iter().map(|row| row[0].as_str()).collect();
        assert_eq!(first, vec!["Maker", "Aave", "Curve"]);
    }

    #[test]
    fn test_lexicographic_sort_for_text_columns() {
        let mut table = sample();
        table.sort_by_column("Name", false).unwrap();
        assert_eq!(table.rows()[0][0], "Aave");
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let mut table = sample();
        let result = table.sort_by_column("Volume", false);
        assert!(matches!(result, Err(Error::UnknownColumn(name)) if name == "Volume"));
    }

    #[test]
    fn test_take_skip_and_take_last() {
        assert_eq!(sample().take(2).len(), 2);
        assert_eq!(sample().skip(2).rows()[0][0], "Aave");
        let last = sample().take_last(1);
        assert_eq!(last.rows()[0][0], "Aave");
        assert_eq!(sample().take(100).len(), 3);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(["A", "B", "C"]);
        table.push_row(["only"]);
        assert_eq!(table.rows()[0].len(), 3);
    }
}
