//! Read → aggregate → render, plus the status line shown to the operator

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::parsers::PrintLogParser;
use crate::services::aggregator::Aggregator;
use crate::services::renderer::{RenderOptions, ReportRenderer};
use crate::types::{AggregatedRow, DateRange, PageTallyError, Result};

pub const SUCCESS_STATUS: &str = "Dados filtrados e salvos no Excel com formatação.";
pub const INPUT_MISSING_STATUS: &str = "Nenhum arquivo foi selecionado.";

/// Everything the caller supplies for one report
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub source: Option<PathBuf>,
    pub range: DateRange,
    pub destination: PathBuf,
    pub options: RenderOptions,
}

/// Result of a successful report run
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub rows: Vec<AggregatedRow>,
    pub destination: PathBuf,
    pub skipped_lines: usize,
}

/// Aggregated table plus read diagnostics
#[derive(Debug, Clone)]
pub struct Summary {
    pub rows: Vec<AggregatedRow>,
    pub skipped_lines: usize,
}

pub struct ReportPipeline {
    parser: PrintLogParser,
    aggregator: Aggregator,
    renderer: ReportRenderer,
}

impl ReportPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            parser: PrintLogParser::new(config.input.clone()),
            aggregator: Aggregator::with_timestamp_format(config.input.timestamp_format.clone()),
            renderer: ReportRenderer::new(config.output.sheet_name.clone()),
        }
    }

    /// Read and aggregate without writing anything
    pub fn summarize(&self, source: Option<&Path>, range: &DateRange) -> Result<Summary> {
        let source = source.ok_or(PageTallyError::InputMissing)?;
        let log = self.parser.parse_file(source)?;
        let rows = self.aggregator.aggregate(&log.records, range);
        Ok(Summary {
            rows,
            skipped_lines: log.skipped_lines,
        })
    }

    /// Full run. The destination's parent directory is created if needed.
    pub fn run(&self, request: &ReportRequest) -> Result<ReportOutcome> {
        let summary = self.summarize(request.source.as_deref(), &request.range)?;

        if let Some(parent) = request.destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("creating output directory {}", parent.display());
                std::fs::create_dir_all(parent)?;
            }
        }

        self.renderer
            .render(&summary.rows, &request.destination, request.options)?;
        info!("report saved to {}", request.destination.display());

        Ok(ReportOutcome {
            rows: summary.rows,
            destination: request.destination.clone(),
            skipped_lines: summary.skipped_lines,
        })
    }
}

impl Default for ReportPipeline {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Status line for a failed run
pub fn failure_status(err: &PageTallyError) -> String {
    match err {
        PageTallyError::InputMissing => INPUT_MISSING_STATUS.to_string(),
        PageTallyError::Parse(detail) => format!("Erro ao ler o CSV: {}", detail),
        other => format!("Erro ao processar o arquivo: {}", other),
    }
}

/// Status line for any report run
pub fn report_status<T>(result: &Result<T>) -> String {
    match result {
        Ok(_) => SUCCESS_STATUS.to_string(),
        Err(e) => failure_status(e),
    }
}
