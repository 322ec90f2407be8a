//! Report renderer: lays out the aggregated table and writes the `.xlsx`
//!
//! Rendering happens in two steps. [`SheetLayout::build`] decides every cell
//! value, its emphasis and the chart ranges; [`ReportRenderer::render`] then
//! replays that layout onto a `rust_xlsxwriter` workbook. The layout is plain
//! data so it can be inspected without opening a spreadsheet.

use rust_xlsxwriter::{
    Chart, ChartType, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use std::path::Path;
use tracing::info;

use crate::types::{AggregatedRow, Result};

/// Output column labels, left to right
pub const HEADER: [&str; 4] = ["Nome", "Colorido", "P&B", "Pagina"];

pub const BAR_CHART_TITLE: &str = "Total de Páginas Coloridas e P&B por Nome";
pub const LINE_CHART_TITLE: &str = "Total de Páginas por Nome";
const X_AXIS_TITLE: &str = "Nome";
const Y_AXIS_TITLE: &str = "Total de Páginas";
const CHART_STYLE: u8 = 13;

/// F5
const BAR_CHART_ANCHOR: CellRef = CellRef { row: 4, col: 5 };
/// F20
const LINE_CHART_ANCHOR: CellRef = CellRef { row: 19, col: 5 };

const NAME_COL: u16 = 0;
const COLOR_COL: u16 = 1;
const MONO_COL: u16 = 2;
const PAGES_COL: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub include_charts: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_charts: true,
        }
    }
}

/// Zero-based cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(u64),
}

/// Which band of the table a cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Data,
    Total,
}

impl RowKind {
    pub fn is_bold(self) -> bool {
        matches!(self, RowKind::Header | RowKind::Total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellSpec {
    pub at: CellRef,
    pub value: CellValue,
    pub kind: RowKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Clustered vertical bars
    Bar,
    Line,
}

/// One chart series: its title cell and a single-column value range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSpec {
    pub title: CellRef,
    pub col: u16,
    pub first_row: u32,
    pub last_row: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub anchor: CellRef,
    /// Category labels: rows `first_row..=last_row` of the name column
    pub categories: SeriesSpec,
    pub series: Vec<SeriesSpec>,
}

/// Complete description of the report sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub cells: Vec<CellSpec>,
    pub charts: Vec<ChartSpec>,
}

impl SheetLayout {
    /// Lay out header, one row per aggregated row and, optionally, the two
    /// charts. The last row in `rows` is the total and gets total emphasis.
    pub fn build(rows: &[AggregatedRow], options: RenderOptions) -> Self {
        let mut cells = Vec::with_capacity((rows.len() + 1) * HEADER.len());

        for (col, label) in (0u16..).zip(HEADER) {
            cells.push(CellSpec {
                at: CellRef { row: 0, col },
                value: CellValue::Text(label.to_string()),
                kind: RowKind::Header,
            });
        }

        for (i, agg) in rows.iter().enumerate() {
            let row = (i + 1) as u32;
            let kind = if i + 1 == rows.len() {
                RowKind::Total
            } else {
                RowKind::Data
            };
            let values = [
                CellValue::Text(agg.name.clone()),
                CellValue::Number(agg.color_total),
                CellValue::Number(agg.mono_total),
                CellValue::Number(agg.page_total),
            ];
            for (col, value) in (0u16..).zip(values) {
                cells.push(CellSpec {
                    at: CellRef { row, col },
                    value,
                    kind,
                });
            }
        }

        let charts = if options.include_charts && !rows.is_empty() {
            Self::charts(rows.len() as u32)
        } else {
            Vec::new()
        };

        Self { cells, charts }
    }

    /// Both charts span data and total rows (`1..=last_row`)
    fn charts(last_row: u32) -> Vec<ChartSpec> {
        let series = |col: u16| SeriesSpec {
            title: CellRef { row: 0, col },
            col,
            first_row: 1,
            last_row,
        };

        vec![
            ChartSpec {
                kind: ChartKind::Bar,
                title: BAR_CHART_TITLE,
                anchor: BAR_CHART_ANCHOR,
                categories: series(NAME_COL),
                series: vec![series(COLOR_COL), series(MONO_COL)],
            },
            ChartSpec {
                kind: ChartKind::Line,
                title: LINE_CHART_TITLE,
                anchor: LINE_CHART_ANCHOR,
                categories: series(NAME_COL),
                series: vec![series(PAGES_COL)],
            },
        ]
    }

    /// Index of the last populated row
    pub fn last_row(&self) -> u32 {
        self.cells.iter().map(|c| c.at.row).max().unwrap_or(0)
    }
}

/// Writes the report workbook
pub struct ReportRenderer {
    sheet_name: String,
}

impl ReportRenderer {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// Write `rows` to `destination` as a single-sheet workbook.
    /// The file is created (or replaced), fully written and closed here.
    pub fn render(
        &self,
        rows: &[AggregatedRow],
        destination: &Path,
        options: RenderOptions,
    ) -> Result<()> {
        let layout = SheetLayout::build(rows, options);

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;
        self.write_layout(sheet, &layout)?;

        workbook.save(destination)?;
        info!(
            "wrote {} row(s), {} chart(s) to {}",
            layout.last_row() + 1,
            layout.charts.len(),
            destination.display()
        );
        Ok(())
    }

    fn write_layout(&self, sheet: &mut Worksheet, layout: &SheetLayout) -> Result<()> {
        let plain = cell_format(false);
        let bold = cell_format(true);

        for cell in &layout.cells {
            let format = if cell.kind.is_bold() { &bold } else { &plain };
            let CellRef { row, col } = cell.at;
            match &cell.value {
                CellValue::Text(text) => {
                    sheet.write_string_with_format(row, col, text, format)?;
                }
                CellValue::Number(n) => {
                    sheet.write_number_with_format(row, col, *n as f64, format)?;
                }
            }
        }
        sheet.autofit();

        for spec in &layout.charts {
            let chart = self.build_chart(spec);
            sheet.insert_chart(spec.anchor.row, spec.anchor.col, &chart)?;
        }

        Ok(())
    }

    fn build_chart(&self, spec: &ChartSpec) -> Chart {
        let mut chart = match spec.kind {
            ChartKind::Bar => Chart::new(ChartType::Column),
            ChartKind::Line => Chart::new(ChartType::Line),
        };
        chart.set_style(CHART_STYLE);
        chart.title().set_name(spec.title);
        chart.x_axis().set_name(X_AXIS_TITLE);
        chart.y_axis().set_name(Y_AXIS_TITLE);

        let name = self.sheet_name.as_str();
        let cats = spec.categories;
        for s in &spec.series {
            chart
                .add_series()
                .set_name((name, s.title.row, s.title.col))
                .set_categories((name, cats.first_row, cats.col, cats.last_row, cats.col))
                .set_values((name, s.first_row, s.col, s.last_row, s.col));
        }
        chart
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new("Sheet1")
    }
}

/// Thin border on all sides, centered both ways
fn cell_format(bold: bool) -> Format {
    let format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    if bold {
        format.set_bold()
    } else {
        format
    }
}
