//! Readers for printer fleet log exports

mod print_log;

pub use print_log::{ParsedLog, PrintLogParser};
