use std::io::Write;

use super::WiggleEntry;
use crate::counting::PositionSeries;
use crate::{Result, RiboMethSeqError};

/// How values are rendered on data lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Shortest text that parses back to the same value (`3`, `0.25`).
    Exact,
    /// Fixed four decimal places (`0.2500`).
    Fixed4,
}

/// `variableStep` writer bound to one chromosome and span.
///
/// The header is written on construction. Dropping the writer closes the
/// underlying sink on every path; [`WiggleWriter::finish`] additionally
/// flushes and reports flush errors.
#[derive(Debug)]
pub struct WiggleWriter<W: Write> {
    inner: W,
    chrom: String,
    span: u64,
    lines_written: usize,
}

impl<W: Write> WiggleWriter<W> {
    /// Write the header and return a writer for data lines.
    pub fn new(mut inner: W, chrom: impl Into<String>, span: u64) -> Result<Self> {
        let chrom = chrom.into();
        writeln!(inner, "variableStep chrom={} span={}", chrom, span)?;
        Ok(Self {
            inner,
            chrom,
            span,
            lines_written: 0,
        })
    }

    /// Chromosome named in the header.
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Data lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Write a value at a 0-based position.
    pub fn write_value(&mut self, position: u64, value: f64, precision: Precision) -> Result<()> {
        let position = position.checked_add(1).ok_or_else(|| {
            RiboMethSeqError::InvalidInputFormat(format!("position {} is out of range", position))
        })?;
        match precision {
            Precision::Exact => writeln!(self.inner, "{}\t{}", position, value)?,
            Precision::Fixed4 => writeln!(self.inner, "{}\t{:.4}", position, value)?,
        }
        self.lines_written += 1;
        Ok(())
    }

    /// Write a decoded entry, checking it against the header.
    pub fn write_entry(&mut self, entry: &WiggleEntry, precision: Precision) -> Result<()> {
        if entry.chrom.as_ref() != self.chrom {
            return Err(RiboMethSeqError::ChromosomeMismatch {
                expected: self.chrom.clone(),
                found: entry.chrom.to_string(),
            });
        }
        let span = entry.end - entry.start;
        if span != self.span {
            return Err(RiboMethSeqError::InvalidInputFormat(format!(
                "span mismatch: {}, {}",
                span, self.span
            )));
        }
        self.write_value(entry.start, entry.value, precision)
    }

    /// Write every point of a series. Requires a span-1 writer.
    pub fn write_series(&mut self, series: &PositionSeries, precision: Precision) -> Result<()> {
        if self.span != 1 {
            return Err(RiboMethSeqError::InvalidInputFormat(format!(
                "span mismatch: 1, {}",
                self.span
            )));
        }
        for (position, value) in series.iter() {
            self.write_value(position, value, precision)?;
        }
        Ok(())
    }

    /// Flush and hand back the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Render a span-1 series as wiggle text (useful for tests and snapshots).
pub fn render_series(chrom: &str, series: &PositionSeries, precision: Precision) -> Result<String> {
    let mut writer = WiggleWriter::new(Vec::new(), chrom, 1)?;
    writer.write_series(series, precision)?;
    let buffer = writer.finish()?;
    String::from_utf8(buffer)
        .map_err(|_| RiboMethSeqError::InvalidInputFormat("rendered wiggle is not valid UTF-8".into()))
}
