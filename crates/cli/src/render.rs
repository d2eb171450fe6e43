//! Terminal output: column-aligned tables, unicode bar figures and one-line
//! diagnostics.

use itertools::Itertools;

use crossterm::style::Stylize;

use coinshell_core::{Presenter, Result, Table};

const BAR_WIDTH: usize = 40;

/// Renders tables and figures as plain styled text on stdout, diagnostics on
/// stderr.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn render_table(&mut self, command: &str, table: &Table) -> Result<()> {
        println!();
        println!("{}", command.bold());

        let widths = column_widths(table);

        let header = table
            .columns()
            .iter()
            .zip(widths.iter().copied())
            .map(|(column, width)| format!("{column:width$}"))
            .join("  ");
        println!("{}", header.bold());

        for row in table.rows() {
            let line = row
                .iter()
                .zip(widths.iter().copied())
                .map(|(cell, width)| format!("{cell:width$}"))
                .join("  ");
            println!("{line}");
        }
        println!();
        Ok(())
    }

    fn render_figure(&mut self, command: &str, table: &Table) -> Result<()> {
        let Some(index) = last_numeric_column(table) else {
            return Ok(());
        };

        let values: Vec<f64> = table
            .rows()
            .iter()
            .map(|row| row[index].parse().unwrap_or(0.0))
            .collect();
        let peak = values.iter().cloned().fold(0.0_f64, f64::max);
        if peak <= 0.0 {
            return Ok(());
        }

        println!("{}", format!("{command} ({})", table.columns()[index]).bold());
        let label_width = table
            .rows()
            .iter()
            .map(|row| row[0].len())
            .max()
            .unwrap_or(0);

        for (row, value) in table.rows().iter().zip(&values) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let length = ((value / peak) * BAR_WIDTH as f64).round().max(0.0) as usize;
            println!("{:label_width$}  {}", row[0], "█".repeat(length));
        }
        println!();
        Ok(())
    }

    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{}", message.yellow());
    }
}

fn column_widths(table: &Table) -> Vec<usize> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            table
                .rows()
                .iter()
                .map(|row| row[index].len())
                .chain([column.len()])
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Index of the last column whose cells all parse as numbers, skipping
/// column 0 so row labels never chart themselves.
fn last_numeric_column(table: &Table) -> Option<usize> {
    (1..table.columns().len()).rev().find(|&index| {
        !table.rows().is_empty()
            && table
                .rows()
                .iter()
                .all(|row| row[index].parse::<f64>().is_ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["Name", "Category", "TVL"]);
        table.push_row(["Maker", "lending", "12.4"]);
        table.push_row(["Curve", "dexes", "9.1"]);
        table
    }

    #[test]
    fn test_column_widths_cover_headers_and_cells() {
        let widths = column_widths(&sample());
        assert_eq!(widths, vec![5, 8, 3]);
    }

    #[test]
    fn test_last_numeric_column_skips_text() {
        assert_eq!(last_numeric_column(&sample()), Some(2));

        let text_only = {
            let mut table = Table::new(["Name", "Chain"]);
            table.push_row(["Maker", "ethereum"]);
            table
        };
        assert_eq!(last_numeric_column(&text_only), None);
    }

    #[test]
    fn test_empty_table_has_no_numeric_column() {
        let table = Table::new(["Name", "TVL"]);
        assert_eq!(last_numeric_column(&table), None);
    }
}
