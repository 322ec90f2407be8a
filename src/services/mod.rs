//! Services for filtering, aggregation and report output

pub mod aggregator;
pub mod normalizer;
pub mod pipeline;
pub mod renderer;

pub use aggregator::Aggregator;
pub use normalizer::{coerce_pages, normalize_name, normalize_record, parse_timestamp};
pub use pipeline::{report_status, ReportOutcome, ReportPipeline, ReportRequest, Summary};
pub use renderer::{RenderOptions, ReportRenderer, SheetLayout};
