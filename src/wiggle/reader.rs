use std::io::{BufRead, Lines};
use std::sync::Arc;

use crate::{Result, RiboMethSeqError};

/// Largest 0-based exclusive end a wiggle run may reach.
///
/// Positions stay within `i64` so they round-trip through BAM coordinates.
pub const MAX_POSITION: u64 = i64::MAX as u64;

/// One data line: `value` over the 0-based half-open range `start..end`.
#[derive(Debug, Clone, PartialEq)]
pub struct WiggleEntry {
    /// Chromosome from the governing header.
    pub chrom: Arc<str>,
    /// First covered 0-based position.
    pub start: u64,
    /// One past the last covered position.
    pub end: u64,
    /// Value shared by every covered position.
    pub value: f64,
}

impl WiggleEntry {
    /// Expand the run into individual `(position, value)` points.
    pub fn positions(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        (self.start..self.end).map(move |position| (position, self.value))
    }
}

/// Streaming parser over `variableStep` wiggle text.
///
/// Comment, blank, `track` and `browser` lines are skipped. A second header,
/// a `fixedStep` header, or data before any header is an error.
#[derive(Debug)]
pub struct WiggleReader<R> {
    lines: Lines<R>,
    line_no: usize,
    chrom: Option<Arc<str>>,
    span: u64,
}

impl<R: BufRead> WiggleReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            chrom: None,
            span: 1,
        }
    }

    /// Chromosome named by the header, once it has been read.
    pub fn chrom(&self) -> Option<&str> {
        self.chrom.as_deref()
    }

    /// Span declared by the header (1 until a header is read).
    pub fn span(&self) -> u64 {
        self.span
    }

    fn invalid(&self, msg: impl std::fmt::Display) -> RiboMethSeqError {
        RiboMethSeqError::InvalidInputFormat(format!("line {}: {}", self.line_no, msg))
    }

    fn parse_header(&mut self, line: &str) -> Result<()> {
        if self.chrom.is_some() {
            return Err(self.invalid("cannot set mode more than once per file"));
        }

        let mut chrom = None;
        let mut span = 1u64;
        for field in line.split_whitespace().skip(1) {
            let (key, value) = field
                .split_once('=')
                .ok_or_else(|| self.invalid(format!("malformed header field '{}'", field)))?;
            match key {
                "chrom" => chrom = Some(Arc::from(value)),
                "span" => {
                    span = value
                        .parse()
                        .map_err(|_| self.invalid(format!("invalid span '{}'", value)))?;
                }
                _ => {}
            }
        }

        if span == 0 {
            return Err(self.invalid("span must be at least 1"));
        }
        let chrom = chrom.ok_or_else(|| self.invalid("header without chrom"))?;
        self.chrom = Some(chrom);
        self.span = span;
        Ok(())
    }

    fn parse_data(&self, chrom: Arc<str>, line: &str) -> Result<WiggleEntry> {
        let mut fields = line.split_whitespace();
        let (Some(position), Some(value), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(self.invalid(format!("unexpected line: {}", line)));
        };

        let position: u64 = position
            .parse()
            .map_err(|_| self.invalid(format!("invalid position '{}'", position)))?;
        if position == 0 {
            return Err(self.invalid("wiggle positions are 1-based"));
        }
        let value: f64 = value
            .parse()
            .map_err(|_| self.invalid(format!("invalid value '{}'", value)))?;

        let start = position - 1;
        let end = start
            .checked_add(self.span)
            .filter(|&end| end <= MAX_POSITION)
            .ok_or_else(|| {
                self.invalid(format!(
                    "position {} with span {} is out of range",
                    position, self.span
                ))
            })?;
        Ok(WiggleEntry {
            chrom,
            start,
            end,
            value,
        })
    }
}

impl<R: BufRead> Iterator for WiggleReader<R> {
    type Item = Result<WiggleEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            self.line_no += 1;

            let line = line.trim_end();
            if line.trim_start().is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            if line.starts_with("variableStep") {
                if let Err(err) = self.parse_header(line) {
                    return Some(Err(err));
                }
                continue;
            }
            if line.starts_with("fixedStep") {
                return Some(Err(self.invalid("fixedStep tracks are not supported")));
            }

            return Some(match self.chrom.clone() {
                Some(chrom) => self.parse_data(chrom, line),
                None => Err(self.invalid(format!("unexpected line: {}", line))),
            });
        }
    }
}
