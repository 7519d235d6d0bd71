//! Delimited numeric tables with one named sample per column.
//!
//! The first line holds the column names. Columns may have different lengths:
//! a short row leaves the remaining columns missing. Empty cells and the usual
//! `NaN`/`NA`/`null` spellings are missing values and are kept as `NaN`.
//!
//! Quoting, the header and ragged rows are handled by the polars CSV reader.
//! Every column is read as text and converted here so that the missing-value
//! and decimal-comma rules apply the same way to every field.

use std::{fs, io::Cursor, path::Path};

use anyhow::Context;
use polars::prelude::*;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TableFormat {
    pub separator: char,
    pub decimal_comma: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct Table {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

/// Parses a `--separator` value: `,`, `;` or a tab (`\t`, `tab`).
pub(crate) fn parse_separator(s: &str) -> Result<char, String> {
    match s {
        "," => Ok(','),
        ";" => Ok(';'),
        "\t" | r"\t" | "tab" => Ok('\t'),
        _ => Err(format!("unsupported separator '{s}' (expected ',', ';' or '\\t')")),
    }
}

impl Table {
    pub fn read<P>(path: P, format: TableFormat) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read table file: {}", path.display()))?;
        let table = Self::from_bytes(bytes, format)
            .with_context(|| format!("Failed to parse table file: {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            columns = table.headers.len(),
            "loaded table"
        );
        Ok(table)
    }

    #[cfg(test)]
    pub fn parse(text: &str, format: TableFormat) -> anyhow::Result<Self> {
        Self::from_bytes(text.as_bytes().to_vec(), format)
    }

    fn from_bytes(mut bytes: Vec<u8>, format: TableFormat) -> anyhow::Result<Self> {
        if bytes.starts_with(UTF8_BOM) {
            bytes.drain(..UTF8_BOM.len());
        }
        anyhow::ensure!(
            bytes.iter().any(|b| !b.is_ascii_whitespace()),
            "table has no header line"
        );
        let separator = u8::try_from(format.separator)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("separator {:?} is not an ASCII character", format.separator))?;

        // a zero-length schema inference reads every column as text
        let read_options = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|opts| opts.with_separator(separator));
        let df = CsvReader::new(Cursor::new(bytes))
            .with_options(read_options)
            .finish()?;

        let mut headers = Vec::with_capacity(df.width());
        let mut columns = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            let name = column.name().trim().to_owned();
            let values = column
                .str()?
                .into_iter()
                .enumerate()
                .map(|(row, cell)| {
                    parse_cell(cell.unwrap_or_default(), format.decimal_comma).with_context(|| {
                        format!(
                            "column '{name}', row {}: invalid number '{}'",
                            row + 1,
                            cell.unwrap_or_default()
                        )
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            headers.push(name);
            columns.push(values);
        }

        Ok(Self { headers, columns })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All cells of the named column, missing cells as `NaN`.
    pub fn column(&self, name: &str) -> anyhow::Result<&[f64]> {
        let index = self
            .headers
            .iter()
            .position(|header| header == name)
            .with_context(|| {
                format!(
                    "column '{name}' not found (available: {})",
                    self.headers.join(", ")
                )
            })?;
        Ok(&self.columns[index])
    }

    /// Present values of the named column, for drawing samples from.
    pub fn pool(&self, name: &str) -> anyhow::Result<Vec<f64>> {
        Ok(self
            .column(name)?
            .iter()
            .copied()
            .filter(|value| !value.is_nan())
            .collect())
    }
}

fn parse_cell(cell: &str, decimal_comma: bool) -> anyhow::Result<f64> {
    let cell = cell.trim();
    if cell.is_empty()
        || ["nan", "na", "null"]
            .iter()
            .any(|missing| cell.eq_ignore_ascii_case(missing))
    {
        return Ok(f64::NAN);
    }
    let value: f64 = if decimal_comma {
        cell.replace(',', ".").parse()?
    } else {
        cell.parse()?
    };
    Ok(value)
}

#[cfg(test)]
#[expect(clippy::float_cmp)]
mod tests {
    use super::*;

    const SEMICOLON: TableFormat = TableFormat {
        separator: ';',
        decimal_comma: false,
    };

    #[test]
    fn test_ragged_columns() {
        let table = Table::parse("normal;flat\n1.5;2\n2.5;\n3.5\n", SEMICOLON).unwrap();
        assert_eq!(table.headers(), ["normal", "flat"]);
        assert_eq!(table.column("normal").unwrap(), [1.5, 2.5, 3.5]);
        let flat = table.column("flat").unwrap();
        assert_eq!(flat[0], 2.0);
        assert!(flat[1].is_nan() && flat[2].is_nan());
        assert_eq!(table.pool("flat").unwrap(), [2.0]);
    }

    #[test]
    fn test_decimal_comma() {
        let format = TableFormat {
            decimal_comma: true,
            ..SEMICOLON
        };
        let table = Table::parse("a;b\n\"1,25\";-3,5\r\n", format).unwrap();
        assert_eq!(table.column("a").unwrap(), [1.25]);
        assert_eq!(table.column("b").unwrap(), [-3.5]);
    }

    #[test]
    fn test_missing_spellings() {
        let format = TableFormat {
            separator: ',',
            decimal_comma: false,
        };
        let table = Table::parse("x\nNaN\nNA\n7\nnull\n \n", format).unwrap();
        assert_eq!(table.pool("x").unwrap(), [7.0]);
    }

    #[test]
    fn test_quoted_separator_with_decimal_comma() {
        let format = TableFormat {
            separator: ',',
            decimal_comma: true,
        };
        let table = Table::parse("a,b\n\"1,5\",\"2,25\"\n3,\n", format).unwrap();
        assert_eq!(table.pool("a").unwrap(), [1.5, 3.0]);
        assert_eq!(table.pool("b").unwrap(), [2.25]);
        assert!(table.column("b").unwrap()[1].is_nan());
    }

    #[test]
    fn test_byte_order_mark() {
        let table = Table::parse("\u{feff}normal;flat\n1;2\n", SEMICOLON).unwrap();
        assert_eq!(table.headers(), ["normal", "flat"]);
        assert_eq!(table.pool("normal").unwrap(), [1.0]);
    }

    #[test]
    fn test_header_names_are_trimmed() {
        let table = Table::parse(" normal ; flat\r\n1;2\r\n", SEMICOLON).unwrap();
        assert_eq!(table.headers(), ["normal", "flat"]);
        assert_eq!(table.pool("flat").unwrap(), [2.0]);
    }

    #[test]
    fn test_errors() {
        assert!(Table::parse("", SEMICOLON).is_err());
        assert!(Table::parse("a\n1;2\n", SEMICOLON).is_err());
        assert!(Table::parse("a\nabc\n", SEMICOLON).is_err());
        let table = Table::parse("a\n1\n", SEMICOLON).unwrap();
        assert!(table.column("b").is_err());
    }

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator(","), Ok(','));
        assert_eq!(parse_separator(r"\t"), Ok('\t'));
        assert!(parse_separator("|").is_err());
    }
}
