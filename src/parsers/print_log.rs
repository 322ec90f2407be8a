//! `;`-delimited print log reader

use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::InputConfig;
use crate::types::{PageTallyError, RawRecord, Result};

/// Records read from one log, plus how many lines were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    pub records: Vec<RawRecord>,
    pub skipped_lines: usize,
}

/// Positions of the required columns in the header
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    name: usize,
    color: usize,
    mono: usize,
    date: usize,
}

/// Parser for printer fleet print logs
pub struct PrintLogParser {
    config: InputConfig,
}

impl PrintLogParser {
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    pub fn parse_file(&self, path: &Path) -> Result<ParsedLog> {
        let file = File::open(path).map_err(PageTallyError::Io)?;
        info!("reading print log {}", path.display());
        self.parse_reader(file)
    }

    /// Parse a log stream. Lines whose field count differs from the header
    /// are skipped; missing required columns fail the whole read.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<ParsedLog> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.config.delimiter_byte()?)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.byte_headers()?.clone();
        let columns = self.locate_columns(&headers)?;
        let width = headers.len();

        let mut log = ParsedLog::default();
        let mut record = ByteRecord::new();

        loop {
            match rdr.read_byte_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {}
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!("skipping unreadable line: {}", e);
                    log.skipped_lines += 1;
                    continue;
                }
            }

            if record.len() != width {
                debug!(
                    "skipping line {}: expected {} fields, found {}",
                    line_of(&record),
                    width,
                    record.len()
                );
                log.skipped_lines += 1;
                continue;
            }

            log.records.push(self.to_raw(&record, columns));
        }

        if log.skipped_lines > 0 {
            warn!("skipped {} malformed line(s)", log.skipped_lines);
        }
        info!("read {} record(s)", log.records.len());

        Ok(log)
    }

    fn locate_columns(&self, headers: &ByteRecord) -> Result<ColumnIndex> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| {
                self.config
                    .encoding
                    .decode(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();

        let find = |wanted: &str| names.iter().position(|n| n == wanted);
        let c = &self.config;

        match (
            find(&c.name_column),
            find(&c.color_column),
            find(&c.mono_column),
            find(&c.date_column),
        ) {
            (Some(name), Some(color), Some(mono), Some(date)) => Ok(ColumnIndex {
                name,
                color,
                mono,
                date,
            }),
            (name, color, mono, date) => {
                let missing: Vec<&str> = [
                    (name, &c.name_column),
                    (color, &c.color_column),
                    (mono, &c.mono_column),
                    (date, &c.date_column),
                ]
                .into_iter()
                .filter(|(found, _)| found.is_none())
                .map(|(_, column)| column.as_str())
                .collect();
                Err(PageTallyError::Parse(format!(
                    "missing required column(s): {}",
                    missing.join(", ")
                )))
            }
        }
    }

    fn to_raw(&self, record: &ByteRecord, columns: ColumnIndex) -> RawRecord {
        let field = |i: usize| {
            record
                .get(i)
                .map(|b| self.config.encoding.decode(b))
                .unwrap_or_default()
        };
        RawRecord {
            full_name: field(columns.name),
            color_pages: field(columns.color),
            mono_pages: field(columns.mono),
            printed_at: field(columns.date),
        }
    }
}

impl Default for PrintLogParser {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

fn line_of(record: &ByteRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
