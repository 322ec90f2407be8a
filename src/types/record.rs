//! Record types flowing through the filter → aggregate → render pipeline

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Name of the synthetic grand-total row
pub const TOTAL_LABEL: &str = "Total";

/// One row of the source print log, exactly as read (after decoding).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub full_name: String,
    pub color_pages: String,
    pub mono_pages: String,
    pub printed_at: String,
}

impl RawRecord {
    pub fn new(
        full_name: impl Into<String>,
        color_pages: impl Into<String>,
        mono_pages: impl Into<String>,
        printed_at: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            color_pages: color_pages.into(),
            mono_pages: mono_pages.into(),
            printed_at: printed_at.into(),
        }
    }
}

/// A record after trimming, timestamp parsing and page-count coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintEntry {
    pub name: String,
    pub color_pages: u64,
    pub mono_pages: u64,
    /// `None` when the source timestamp could not be parsed
    pub printed_at: Option<NaiveDateTime>,
}

impl PrintEntry {
    pub fn total_pages(&self) -> u64 {
        self.color_pages.saturating_add(self.mono_pages)
    }
}

/// One output row: a person, or the trailing grand total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub name: String,
    pub color_total: u64,
    pub mono_total: u64,
    pub page_total: u64,
}

impl AggregatedRow {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add(&mut self, entry: &PrintEntry) {
        self.color_total = self.color_total.saturating_add(entry.color_pages);
        self.mono_total = self.mono_total.saturating_add(entry.mono_pages);
        self.page_total = self.page_total.saturating_add(entry.total_pages());
    }

    /// Column-wise sum of `rows`, labelled as the total row
    pub fn total_of(rows: &[AggregatedRow]) -> Self {
        rows.iter().fold(Self::named(TOTAL_LABEL), |mut acc, row| {
            acc.color_total = acc.color_total.saturating_add(row.color_total);
            acc.mono_total = acc.mono_total.saturating_add(row.mono_total);
            acc.page_total = acc.page_total.saturating_add(row.page_total);
            acc
        })
    }
}
