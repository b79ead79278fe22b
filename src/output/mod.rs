//! Plain-text table output
//!
//! [`GridTable`] renders rows in the familiar "grid" layout:
//!
//! ```text
//! +---------------------+--------------------------+
//! | Docker Image Name   |   Docker Image Size (GB) |
//! +=====================+==========================+
//! | web:latest          |                        2 |
//! +---------------------+--------------------------+
//! ```
//!
//! Text columns are left-aligned. Numeric columns are printed with `%g` style formatting,
//! aligned on the decimal point and then right-aligned.

use std::fmt::Write;

/// Extra width every column gets beyond its header
const MIN_PADDING: usize = 2;

/// Significant digits used by [`format_general`]
const SIGNIFICANT_DIGITS: i32 = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => format_general(*value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Left,
    Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl GridTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table. Rows shorter than the header are padded with empty cells.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let column_count = self.headers.len();
        let mut columns = Vec::with_capacity(column_count);

        for (index, header) in self.headers.iter().enumerate() {
            let cells: Vec<&Cell> = self.rows.iter().filter_map(|row| row.get(index)).collect();
            let alignment = if !cells.is_empty()
                && cells.len() == self.rows.len()
                && cells.iter().all(|cell| matches!(cell, Cell::Number(_)))
            {
                Alignment::Decimal
            } else {
                Alignment::Left
            };

            let rendered: Vec<String> = self
                .rows
                .iter()
                .map(|row| row.get(index).map(Cell::render).unwrap_or_default())
                .collect();

            let min_width = header.chars().count() + MIN_PADDING;
            let (width, cells) = align_column(&rendered, alignment, min_width);
            let header = match alignment {
                Alignment::Left => pad_right(header, width),
                Alignment::Decimal => pad_left(header, width),
            };
            columns.push((width, header, cells));
        }

        let border = |fill: char| -> String {
            let mut line = String::from("+");
            for (width, _, _) in &columns {
                line.extend(std::iter::repeat_n(fill, width + 2));
                line.push('+');
            }
            line
        };
        let row_line = |cells: Vec<&str>| -> String {
            let mut line = String::from("|");
            for cell in cells {
                line.push(' ');
                line.push_str(cell);
                line.push_str(" |");
            }
            line
        };

        let mut out = String::new();
        writeln!(out, "{}", border('-'))?;
        writeln!(
            out,
            "{}",
            row_line(columns.iter().map(|(_, header, _)| header.as_str()).collect())
        )?;
        write!(out, "{}", border('='))?;

        for row_index in 0..self.rows.len() {
            if row_index > 0 {
                write!(out, "\n{}", border('-'))?;
            }
            let cells = columns
                .iter()
                .map(|(_, _, cells)| cells[row_index].as_str())
                .collect();
            write!(out, "\n{}", row_line(cells))?;
        }

        write!(out, "\n{}", border('-'))?;
        Ok(out)
    }
}

/// Align the cells of one column and return the final column width with them.
fn align_column(cells: &[String], alignment: Alignment, min_width: usize) -> (usize, Vec<String>) {
    let cells: Vec<String> = match alignment {
        Alignment::Left => cells.to_vec(),
        Alignment::Decimal => {
            let decimals: Vec<Option<usize>> = cells.iter().map(|c| digits_after_point(c)).collect();
            let max_decimals = decimals.iter().flatten().copied().max();
            cells
                .iter()
                .zip(&decimals)
                .map(|(cell, decimals)| match max_decimals {
                    // integers count as -1 digits, so they also reserve room for the point
                    Some(max) => {
                        let own = decimals.map(|d| d as isize).unwrap_or(-1);
                        let pad = (max as isize - own).max(0) as usize;
                        format!("{}{}", cell, " ".repeat(pad))
                    }
                    None => cell.clone(),
                })
                .collect()
        }
    };

    let width = cells
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max(min_width);

    let aligned = cells
        .iter()
        .map(|cell| match alignment {
            Alignment::Left => pad_right(cell, width),
            Alignment::Decimal => pad_left(cell, width),
        })
        .collect();

    (width, aligned)
}

/// Number of characters after the decimal point (or before the exponent), `None` for integers.
fn digits_after_point(number: &str) -> Option<usize> {
    let lower = number.to_ascii_lowercase();
    let position = lower.rfind('.').or_else(|| lower.rfind('e'))?;
    Some(number.len() - position - 1)
}

fn pad_right(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

fn pad_left(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}

/// Format a float like C's `%g`: six significant digits, trailing zeros removed, and
/// scientific notation for exponents below -4 or at least six.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = (SIGNIFICANT_DIGITS - 1) as usize;
    let scientific = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let mantissa = strip_trailing_zeros(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(2.0), "2");
        assert_eq!(format_general(0.5), "0.5");
        assert_eq!(format_general(1.0 / 3.0), "0.333333");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(50_000.0 / 1_073_741_824.0), "4.65661e-05");
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(9.999999), "10");
    }

    #[test]
    fn test_render_grid() {
        let mut table = GridTable::new(["Docker Image Name", "Docker Image Size (GB)"]);
        table.add_row(vec![Cell::Text("web:latest".to_string()), Cell::Number(2.0)]);
        table.add_row(vec![Cell::Text("app:latest".to_string()), Cell::Number(1.0)]);

        let expected = "\
+---------------------+--------------------------+
| Docker Image Name   |   Docker Image Size (GB) |
+=====================+==========================+
| web:latest          |                        2 |
+---------------------+--------------------------+
| app:latest          |                        1 |
+---------------------+--------------------------+";
        assert_eq!(table.render().unwrap(), expected);
    }

    #[test]
    fn test_decimal_alignment() {
        let mut table = GridTable::new(["Name", "Size"]);
        table.add_row(vec![Cell::Text("a".to_string()), Cell::Number(2.0)]);
        table.add_row(vec![Cell::Text("b".to_string()), Cell::Number(0.25)]);

        let expected = "\
+--------+--------+
| Name   |   Size |
+========+========+
| a      |   2    |
+--------+--------+
| b      |   0.25 |
+--------+--------+";
        assert_eq!(table.render().unwrap(), expected);
    }

    #[test]
    fn test_wide_cells_grow_the_column() {
        let mut table = GridTable::new(["Name", "Size"]);
        table.add_row(vec![
            Cell::Text("platform/very-long-service-name:latest".to_string()),
            Cell::Number(12.5),
        ]);

        let rendered = table.render().unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[3], "| platform/very-long-service-name:latest |   12.5 |");
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn test_render_empty() {
        let table = GridTable::new(["Docker Image Name", "Docker Image Size (GB)"]);
        assert!(table.is_empty());

        let expected = "\
+---------------------+--------------------------+
| Docker Image Name   | Docker Image Size (GB)   |
+=====================+==========================+
+---------------------+--------------------------+";
        assert_eq!(table.render().unwrap(), expected);
    }
}
