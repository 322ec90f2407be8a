//! pagetally: per-person page usage reports from printer fleet logs.
//!
//! The pipeline reads a `;`-delimited print log ([`parsers`]), filters and
//! groups it ([`services::aggregator`]) and writes a styled workbook with
//! charts ([`services::renderer`]).

pub mod cli;
pub mod config;
pub mod parsers;
pub mod services;
pub mod types;
