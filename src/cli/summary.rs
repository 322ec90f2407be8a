//! `pagetally summary`: print the aggregated table to stdout

use clap::Args;

use super::SourceArgs;
use crate::config::Config;
use crate::services::pipeline::failure_status;
use crate::services::renderer::HEADER;
use crate::services::ReportPipeline;
use crate::types::AggregatedRow;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SummaryArgs {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let summary = self
            .source
            .range()
            .and_then(|range| {
                ReportPipeline::new(config).summarize(self.source.file.as_deref(), &range)
            })
            .map_err(|e| anyhow::anyhow!(failure_status(&e)))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary.rows)?);
        } else {
            print!("{}", format_table(&summary.rows));
            if summary.skipped_lines > 0 {
                println!("{}", skipped_note(summary.skipped_lines));
            }
        }
        Ok(())
    }
}

/// Operator note about malformed lines left out of the totals
pub fn skipped_note(skipped_lines: usize) -> String {
    format!("{} linha(s) malformada(s) ignorada(s).", skipped_lines)
}

/// Plain-text table, name column padded to the longest name
pub fn format_table(rows: &[AggregatedRow]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once(HEADER[0].len()))
        .max()
        .unwrap_or_default();

    let mut out = format!(
        "{:<w$}  {:>10}  {:>10}  {:>10}\n",
        HEADER[0],
        HEADER[1],
        HEADER[2],
        HEADER[3],
        w = name_width
    );
    for row in rows {
        out.push_str(&format!(
            "{:<w$}  {:>10}  {:>10}  {:>10}\n",
            row.name,
            row.color_total,
            row.mono_total,
            row.page_total,
            w = name_width
        ));
    }
    out
}
