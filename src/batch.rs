//! Batch calculation from CSV uploads.
//!
//! The input must start with the `totalIncome,wht,donation` header. Any bad
//! row fails the whole batch; rows are never skipped.

use crate::tax::{calculate, Allowance, AllowanceKind, CalculationResult, Deductions, TaxError};
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;
use taxcalc_derive::CsvColumns;

/// Column of a CSV record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumn {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, CsvColumns)]
pub struct BatchRow {
    /// Total annual income
    #[column(name = "totalIncome")]
    pub total_income: Decimal,
    /// Withholding tax already paid (0 up to totalIncome)
    #[column(name = "wht")]
    pub wht: Decimal,
    /// Charitable donation, capped at 100,000
    #[column(name = "donation")]
    pub donation: Decimal,
}

/// A decoded row and the input line it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchEntry {
    pub line: u64,
    pub row: BatchRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub row: BatchRow,
    pub result: CalculationResult,
}

pub fn read_batch<R: Read>(reader: R) -> Result<Vec<BatchEntry>, TaxError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = rdr.records();
    let header = match records.next() {
        Some(record) => record.map_err(malformed)?,
        None => {
            return Err(TaxError::MalformedBatchRow {
                line: 1,
                reason: "missing header".to_string(),
            })
        }
    };
    let expected = BatchRow::csv_columns();
    if header.len() != expected.len()
        || header.iter().zip(expected).any(|(got, column)| got != column.name)
    {
        return Err(TaxError::MalformedBatchRow {
            line: line_of(&header),
            reason: format!(
                "expected header '{}', got '{}'",
                BatchRow::csv_header(),
                header.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }

    let mut entries = Vec::new();
    for record in records {
        let record = record.map_err(malformed)?;
        let line = line_of(&record);
        if record.len() != expected.len() {
            return Err(TaxError::MalformedBatchRow {
                line,
                reason: format!("expected {} fields, got {}", expected.len(), record.len()),
            });
        }
        let field = |i: usize| parse_amount(&record[i], expected[i].name, line);
        entries.push(BatchEntry {
            line,
            row: BatchRow {
                total_income: field(0)?,
                wht: field(1)?,
                donation: field(2)?,
            },
        });
    }
    Ok(entries)
}

/// Calculate every row against the same configuration snapshot.
/// The first failing row rejects the batch.
pub fn calculate_batch(
    entries: &[BatchEntry],
    config: &Deductions,
) -> Result<Vec<BatchResult>, TaxError> {
    entries
        .iter()
        .map(|entry| {
            let row = entry.row;
            let allowances = [Allowance::new(AllowanceKind::Donation, row.donation)];
            calculate(row.total_income, row.wht, &allowances, config)
                .map(|result| BatchResult { row, result })
                .inspect_err(|err| log::warn!("Batch rejected at line {}: {}", entry.line, err))
        })
        .collect()
}

/// Locale decimal commas are accepted: `"1234,5"` parses as `1234.5`
fn parse_amount(field: &str, column: &str, line: u64) -> Result<Decimal, TaxError> {
    let normalized = field.replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| TaxError::MalformedBatchRow {
        line,
        reason: format!("invalid {}: '{}'", column, field),
    })
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn malformed(err: csv::Error) -> TaxError {
    TaxError::MalformedBatchRow {
        line: err.position().map_or(0, |p| p.line()),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn taxes(csv: &str) -> Result<Vec<Decimal>, TaxError> {
        let entries = read_batch(csv.as_bytes())?;
        let results = calculate_batch(&entries, &Deductions::default())?;
        Ok(results.iter().map(|r| r.result.tax_due).collect())
    }

    #[test]
    fn columns_from_derive() {
        let names: Vec<_> = BatchRow::csv_columns().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["totalIncome", "wht", "donation"]);
        assert_eq!(BatchRow::csv_header(), "totalIncome,wht,donation");
        assert_eq!(BatchRow::csv_columns()[0].description, "Total annual income");
    }

    #[test]
    fn calculates_each_row() {
        let csv = "totalIncome,wht,donation\n500000,0,0\n600000,40000,20000\n750000,50000,15000\n";
        assert_eq!(taxes(csv).unwrap(), vec![dec!(29000), dec!(0), dec!(11250)]);
    }

    #[test]
    fn fields_are_trimmed() {
        let csv = "totalIncome,wht,donation\n\t500000, 0 ,0\n  750000,50000,15000";
        assert_eq!(taxes(csv).unwrap(), vec![dec!(29000), dec!(11250)]);
    }

    #[test]
    fn decimal_comma_normalized() {
        let csv = "totalIncome,wht,donation\n\"500000,50\",0,0\n";
        let entries = read_batch(csv.as_bytes()).unwrap();
        assert_eq!(entries[0].row.total_income, dec!(500000.50));
        assert_eq!(entries[0].line, 2);
    }

    #[test]
    fn header_only_is_empty_batch() {
        assert_eq!(taxes("totalIncome,wht,donation\n").unwrap(), vec![]);
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!(
            read_batch("".as_bytes()).unwrap_err(),
            TaxError::MalformedBatchRow {
                line: 1,
                reason: "missing header".to_string(),
            }
        );
    }

    #[test]
    fn missing_header_rejected() {
        let err = read_batch("500000,0,0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, TaxError::MalformedBatchRow { line: 1, .. }));
    }

    #[test]
    fn wrong_column_count_rejects_batch() {
        let csv = "totalIncome,wht,donation\n500000,0,0\n600000,0\n";
        let err = read_batch(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            TaxError::MalformedBatchRow {
                line: 3,
                reason: "expected 3 fields, got 2".to_string(),
            }
        );
    }

    #[test]
    fn non_numeric_field_rejects_batch() {
        let csv = "totalIncome,wht,donation\n500000,abc,0\n";
        let err = read_batch(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            TaxError::MalformedBatchRow {
                line: 2,
                reason: "invalid wht: 'abc'".to_string(),
            }
        );
    }

    #[test]
    fn invalid_withholding_rejects_batch() {
        let csv = "totalIncome,wht,donation\n500000,0,0\n1000,2000,0\n";
        let err = taxes(csv).unwrap_err();
        assert!(matches!(err, TaxError::InvalidWithholding { .. }));
    }
}
