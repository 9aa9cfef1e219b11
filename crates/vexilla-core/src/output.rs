//! Report formatting for the average-color JSON and CSV artifacts and the
//! cluster report.
//!
//! Both formats render channel values the same way: plain decimal notation,
//! never scientific, with integral values keeping a trailing `.0`.

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::types::ColorRecord;

/// CSV header line, without the newline.
pub const CSV_HEADER: &str = "file,r,g,b";

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON array
    Json,
    /// Unquoted comma-separated values with a header line
    Csv,
}

/// A writer that serializes color records as JSON or CSV.
pub struct ReportWriter<W: Write> {
    writer: W,
    format: ReportFormat,
    records_written: usize,
}

impl<W: Write> ReportWriter<W> {
    /// Create a new report writer.
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self {
            writer,
            format,
            records_written: 0,
        }
    }

    /// Write the full report for `records`, preserving their order.
    pub fn write_all(&mut self, records: &[ColorRecord]) -> io::Result<()> {
        match self.format {
            ReportFormat::Json => write_pretty_json(&mut self.writer, records)?,
            ReportFormat::Csv => {
                writeln!(self.writer, "{CSV_HEADER}")?;
                for record in records {
                    writeln!(
                        self.writer,
                        "{},{},{},{}",
                        record.file,
                        format_decimal(record.r),
                        format_decimal(record.g),
                        format_decimal(record.b)
                    )?;
                }
            }
        }
        self.records_written += records.len();
        Ok(())
    }

    /// Get the number of records written.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the writer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Pretty-print `value` as JSON with a trailing newline, floats in decimal form.
fn write_pretty_json<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, DecimalFormatter::new());
    value.serialize(&mut ser).map_err(io::Error::other)?;
    writeln!(writer)
}

/// Render `value` in plain decimal notation with at least one fractional digit.
pub fn format_decimal(value: f64) -> String {
    // f64's Display is shortest-roundtrip and never uses an exponent.
    let mut s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// Serialize `records` to the JSON report text.
pub fn to_json(records: &[ColorRecord]) -> io::Result<String> {
    render(records, ReportFormat::Json)
}

/// Serialize `records` to the CSV report text.
pub fn to_csv(records: &[ColorRecord]) -> io::Result<String> {
    render(records, ReportFormat::Csv)
}

fn render(records: &[ColorRecord], format: ReportFormat) -> io::Result<String> {
    let mut writer = ReportWriter::new(Vec::new(), format);
    writer.write_all(records)?;
    String::from_utf8(writer.into_inner()).map_err(io::Error::other)
}

/// Write one report file, creating its directory if needed.
///
/// Existing files are overwritten.
pub fn write_report(
    path: &Path,
    records: &[ColorRecord],
    format: ReportFormat,
) -> PipelineResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::write(parent, e))?;
    }

    let file = File::create(path).map_err(|e| PipelineError::write(path, e))?;
    let mut writer = ReportWriter::new(BufWriter::new(file), format);
    writer
        .write_all(records)
        .and_then(|_| writer.flush())
        .map_err(|e| PipelineError::write(path, e))?;

    tracing::debug!("Wrote {} records to {:?}", writer.records_written(), path);
    Ok(())
}

/// Read the records of a JSON color report.
pub fn read_report(path: &Path) -> PipelineResult<Vec<ColorRecord>> {
    let file = File::open(path).map_err(|e| PipelineError::ReportRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| PipelineError::ReportRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write `value` as a pretty JSON file, creating its directory if needed.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> PipelineResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::write(parent, e))?;
    }

    let file = File::create(path).map_err(|e| PipelineError::write(path, e))?;
    let mut writer = BufWriter::new(file);
    write_pretty_json(&mut writer, value)
        .and_then(|_| writer.flush())
        .map_err(|e| PipelineError::write(path, e))
}

/// Two-space pretty printer that keeps floats out of exponent notation.
struct DecimalFormatter {
    inner: PrettyFormatter<'static>,
}

impl DecimalFormatter {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for DecimalFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(format_decimal(value).as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_value(writer)
    }
}
