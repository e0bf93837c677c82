//! CSV loader with date validation and bucket derivation.
//!
//! Rows with unparseable dates (or unparseable numeric cells) are dropped
//! from the working set with a diagnostic, never an error: a damaged row
//! should not take the dashboard down. Diagnostics are kept on the loaded
//! [`Dataset`] so callers can surface them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::warn;

use types::{DailyRecord, MonthKey, Quarter, QuarterFilter};

use crate::DatasetError;
use crate::schema::{DATE_FORMAT, HEADER};

/// A record annotated with its calendar buckets, derived once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketedRecord {
    /// The raw daily record.
    pub record: DailyRecord,
    /// Year-month grouping key.
    pub month: MonthKey,
    /// Calendar quarter.
    pub quarter: Quarter,
}

impl BucketedRecord {
    fn new(record: DailyRecord) -> Self {
        let month = record.month_key();
        let quarter = record.quarter();
        Self {
            record,
            month,
            quarter,
        }
    }
}

/// A dropped row: where it was and which cell could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    /// 1-based line number in the source file (0 when unknown).
    pub line: u64,
    /// Column that failed to parse, or `"row"` for structural errors.
    pub field: &'static str,
    /// The offending raw value or error description.
    pub value: String,
}

/// The loaded, immutable working set.
///
/// Built once (from a file or directly from generated records) and read-only
/// afterwards; there are no writers after load, so no locking anywhere.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<BucketedRecord>,
    diagnostics: Vec<RowDiagnostic>,
}

impl Dataset {
    /// Build a dataset directly from in-memory records (generate-then-serve
    /// without touching disk). Buckets are derived here.
    pub fn from_records(records: Vec<DailyRecord>) -> Self {
        Self {
            records: records.into_iter().map(BucketedRecord::new).collect(),
            diagnostics: Vec::new(),
        }
    }

    /// All loaded records, in file order.
    pub fn records(&self) -> &[BucketedRecord] {
        &self.records
    }

    /// Diagnostics for rows dropped during loading.
    pub fn diagnostics(&self) -> &[RowDiagnostic] {
        &self.diagnostics
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the working set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last record dates, if any records loaded.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.record.date).min()?;
        let last = self.records.iter().map(|r| r.record.date).max()?;
        Some((first, last))
    }

    /// Records passing the quarter filter; `All` passes everything through.
    pub fn filter_quarter(&self, filter: QuarterFilter) -> Vec<&BucketedRecord> {
        self.records
            .iter()
            .filter(|r| filter.matches(r.quarter))
            .collect()
    }
}

/// Column positions resolved from the header row.
struct ColumnIndex {
    columns: [usize; 14],
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        let mut columns = [0usize; 14];
        for (slot, name) in columns.iter_mut().zip(HEADER) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or(DatasetError::MissingColumn(name))?;
        }
        Ok(Self { columns })
    }

    fn get<'a>(&self, row: &'a StringRecord, column: usize) -> &'a str {
        row.get(self.columns[column]).unwrap_or("")
    }
}

/// Load a dataset from any reader.
///
/// Structural errors (missing columns, unreadable input) are fatal; bad
/// cells only drop their row with a diagnostic.
pub fn load_from_reader<R: Read>(input: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let index = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut diagnostics = Vec::new();

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                warn!(line, error = %e, "dropping malformed row");
                diagnostics.push(RowDiagnostic {
                    line,
                    field: "row",
                    value: e.to_string(),
                });
                continue;
            }
        };
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        match parse_row(&index, &row) {
            Ok(record) => records.push(BucketedRecord::new(record)),
            Err((field, value)) => {
                warn!(line, field, value = %value, "dropping row with unparseable cell");
                diagnostics.push(RowDiagnostic { line, field, value });
            }
        }
    }

    if !diagnostics.is_empty() {
        warn!(
            dropped = diagnostics.len(),
            loaded = records.len(),
            "dataset loaded with dropped rows"
        );
    }

    Ok(Dataset {
        records,
        diagnostics,
    })
}

/// Load a dataset from a file path.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let file = File::open(path)?;
    load_from_reader(BufReader::new(file))
}

/// Parse one row; on failure returns the offending field and raw value.
fn parse_row(
    index: &ColumnIndex,
    row: &StringRecord,
) -> Result<DailyRecord, (&'static str, String)> {
    let date_raw = index.get(row, 0);
    let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT)
        .map_err(|_| ("date", date_raw.to_string()))?;

    let number = |column: usize| -> Result<f64, (&'static str, String)> {
        let raw = index.get(row, column);
        raw.trim()
            .parse::<f64>()
            .map_err(|_| (HEADER[column], raw.to_string()))
    };

    Ok(DailyRecord {
        date,
        temperature_c: number(1)?,
        humidity_pct: number(2)?,
        rainfall_mm: number(3)?,
        yield_kg: number(4)?,
        price_eur_per_kg: number(5)?,
        cost_eur_per_kg: number(6)?,
        revenue_eur: number(7)?,
        total_cost_eur: number(8)?,
        profit_eur: number(9)?,
        quality_score: number(10)?,
        satisfaction_index: number(11)?,
        margin_ratio: number(12)?,
        efficiency_index: number(13)?,
    })
}

// =============================================================================
// Tests
// =============================================================================
