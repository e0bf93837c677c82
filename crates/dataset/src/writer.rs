//! CSV writer for the dataset artifact.
//!
//! Output is byte-stable: the same record series always serializes to the
//! same bytes, which is what makes a fixed seed reproducible on disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use types::DailyRecord;

use crate::DatasetError;
use crate::schema::{HEADER, format_row};

/// Write records as CSV to any writer, header row first.
pub fn write_records<W: Write>(out: W, records: &[DailyRecord]) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record(&format_row(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records as CSV to a file path.
pub fn write_records_to_path<P: AsRef<Path>>(
    path: P,
    records: &[DailyRecord],
) -> Result<(), DatasetError> {
    let file = File::create(path)?;
    write_records(BufWriter::new(file), records)
}
