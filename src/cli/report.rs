//! `pagetally report`: the full filter → aggregate → render run

use clap::Args;
use std::path::PathBuf;

use super::summary::skipped_note;
use super::SourceArgs;
use crate::config::Config;
use crate::services::pipeline::{failure_status, report_status};
use crate::services::{RenderOptions, ReportOutcome, ReportPipeline, ReportRequest};

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Destination workbook (default: salvos/resultado.xlsx)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip the bar and line charts
    #[arg(long)]
    pub no_charts: bool,
}

impl ReportArgs {
    pub fn request(&self, config: &Config) -> crate::types::Result<ReportRequest> {
        Ok(ReportRequest {
            source: self.source.file.clone(),
            range: self.source.range()?,
            destination: self
                .output
                .clone()
                .unwrap_or_else(|| config.output.default_path.clone()),
            options: RenderOptions {
                include_charts: !self.no_charts,
            },
        })
    }

    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let request = self
            .request(config)
            .map_err(|e| anyhow::anyhow!(failure_status(&e)))?;

        let result = ReportPipeline::new(config).run(&request);
        let status = report_status(&result);

        match result {
            Ok(outcome) => {
                println!("{}", status);
                print!("{}", format_outcome(&outcome));
                Ok(())
            }
            Err(_) => Err(anyhow::anyhow!(status)),
        }
    }
}

/// Lines printed under the success status: destination, people, skipped lines
pub fn format_outcome(outcome: &ReportOutcome) -> String {
    // the last row is always the total
    let people = outcome.rows.len().saturating_sub(1);
    let total_pages = outcome.rows.last().map(|r| r.page_total).unwrap_or_default();

    let mut out = format!(
        "{}\n{} pessoa(s), {} página(s)\n",
        outcome.destination.display(),
        people,
        total_pages
    );
    if outcome.skipped_lines > 0 {
        out.push_str(&skipped_note(outcome.skipped_lines));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AggregatedRow;

    fn args(output: Option<&str>, no_charts: bool) -> ReportArgs {
        ReportArgs {
            source: SourceArgs {
                file: Some(PathBuf::from("log.csv")),
                start: Some("01/08/2024".into()),
                end: None,
            },
            output: output.map(PathBuf::from),
            no_charts,
        }
    }

    #[test]
    fn test_request_uses_config_default_path() {
        let request = args(None, false).request(&Config::default()).unwrap();
        assert_eq!(
            request.destination,
            PathBuf::from("salvos").join("resultado.xlsx")
        );
        assert!(request.options.include_charts);
        assert!(request.range.start().is_some());
        assert!(request.range.end().is_none());
    }

    #[test]
    fn test_request_output_override_and_no_charts() {
        let request = args(Some("x.xlsx"), true)
            .request(&Config::default())
            .unwrap();
        assert_eq!(request.destination, PathBuf::from("x.xlsx"));
        assert!(!request.options.include_charts);
    }

    fn outcome(skipped_lines: usize) -> ReportOutcome {
        ReportOutcome {
            rows: vec![
                AggregatedRow {
                    name: "Ana".into(),
                    color_total: 4,
                    mono_total: 2,
                    page_total: 6,
                },
                AggregatedRow {
                    name: "Total".into(),
                    color_total: 4,
                    mono_total: 2,
                    page_total: 6,
                },
            ],
            destination: PathBuf::from("out.xlsx"),
            skipped_lines,
        }
    }

    #[test]
    fn test_format_outcome_reports_skipped_lines() {
        assert_eq!(
            format_outcome(&outcome(2)),
            "out.xlsx\n1 pessoa(s), 6 página(s)\n2 linha(s) malformada(s) ignorada(s).\n"
        );
    }

    #[test]
    fn test_format_outcome_clean_read() {
        assert_eq!(format_outcome(&outcome(0)), "out.xlsx\n1 pessoa(s), 6 página(s)\n");
    }
}
