//! Aggregation engine: filter by date, group by person, append the total row

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::services::normalizer::{normalize_record, TIMESTAMP_FORMAT};
use crate::types::{AggregatedRow, DateRange, PrintEntry, RawRecord};

/// Aggregator for per-person page usage
pub struct Aggregator {
    timestamp_format: String,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::with_timestamp_format(TIMESTAMP_FORMAT)
    }

    pub fn with_timestamp_format(format: impl Into<String>) -> Self {
        Self {
            timestamp_format: format.into(),
        }
    }

    /// Full engine run: one row per person in first-appearance order,
    /// followed by the `Total` row.
    pub fn aggregate(&self, records: &[RawRecord], range: &DateRange) -> Vec<AggregatedRow> {
        if range.is_empty() {
            warn!("start date is after end date; no record can match");
        }

        let entries = self.filter(records, range);
        let mut rows = Self::by_person(&entries);
        info!(
            "aggregated {} record(s) into {} row(s)",
            entries.len(),
            rows.len()
        );

        rows.push(AggregatedRow::total_of(&rows));
        rows
    }

    /// Normalize every record and keep the ones inside `range`.
    /// Order is preserved.
    pub fn filter(&self, records: &[RawRecord], range: &DateRange) -> Vec<PrintEntry> {
        let mut undated = 0usize;
        let entries: Vec<PrintEntry> = records
            .iter()
            .map(|r| normalize_record(r, &self.timestamp_format))
            .inspect(|e| {
                if e.printed_at.is_none() {
                    undated += 1;
                }
            })
            .filter(|e| range.contains(e.printed_at))
            .collect();

        if undated > 0 {
            if range.is_unbounded() {
                debug!("{} record(s) without a usable timestamp kept", undated);
            } else {
                debug!("{} record(s) without a usable timestamp dropped", undated);
            }
        }

        entries
    }

    /// Group entries by name, in order of first appearance.
    /// Entries with a blank name belong to no group.
    pub fn by_person(entries: &[PrintEntry]) -> Vec<AggregatedRow> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut rows: Vec<AggregatedRow> = Vec::new();

        for entry in entries {
            if entry.name.is_empty() {
                debug!("dropping entry with blank name");
                continue;
            }

            let slot = *index.entry(entry.name.as_str()).or_insert_with(|| {
                rows.push(AggregatedRow::named(entry.name.clone()));
                rows.len() - 1
            });
            rows[slot].add(entry);
        }

        rows
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TOTAL_LABEL;
    use chrono::NaiveDate;

    fn make_record(name: &str, color: &str, mono: &str, at: &str) -> RawRecord {
        RawRecord::new(name, color, mono, at)
    }

    fn range(start: Option<(u32, u32, i32)>, end: Option<(u32, u32, i32)>) -> DateRange {
        let to_date = |(d, m, y): (u32, u32, i32)| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        DateRange::new(start.map(to_date), end.map(to_date))
    }

    fn row(name: &str, color: u64, mono: u64, pages: u64) -> AggregatedRow {
        AggregatedRow {
            name: name.into(),
            color_total: color,
            mono_total: mono,
            page_total: pages,
        }
    }

    fn assert_total_matches(rows: &[AggregatedRow]) {
        let (total, people) = rows.split_last().unwrap();
        assert_eq!(total.name, TOTAL_LABEL);
        assert_eq!(
            total.color_total,
            people.iter().map(|r| r.color_total).sum::<u64>()
        );
        assert_eq!(
            total.mono_total,
            people.iter().map(|r| r.mono_total).sum::<u64>()
        );
        assert_eq!(
            total.page_total,
            people.iter().map(|r| r.page_total).sum::<u64>()
        );
    }

    // ========== aggregate() tests ==========

    #[test]
    fn test_aggregate_end_to_end_scenario() {
        let records = vec![
            make_record("Ana", "3", "2", "01/08/2024 10:00"),
            make_record("Ana", "1", "0", "02/08/2024 09:00"),
            make_record("Bea", "0", "4", "05/08/2024 08:00"),
        ];
        let rows =
            Aggregator::new().aggregate(&records, &range(Some((1, 8, 2024)), Some((5, 8, 2024))));

        assert_eq!(
            rows,
            vec![
                row("Ana", 4, 2, 6),
                row("Bea", 0, 4, 4),
                row("Total", 4, 6, 10),
            ]
        );
    }

    #[test]
    fn test_aggregate_empty_input_yields_zero_total() {
        let rows = Aggregator::new().aggregate(&[], &DateRange::unbounded());
        assert_eq!(rows, vec![row("Total", 0, 0, 0)]);
    }

    #[test]
    fn test_aggregate_whitespace_names_collapse() {
        let records = vec![
            make_record("Ana", "1", "0", "01/08/2024 10:00"),
            make_record("  Ana", "1", "0", "01/08/2024 10:00"),
            make_record("Ana \t", "1", "0", "01/08/2024 10:00"),
        ];
        let rows = Aggregator::new().aggregate(&records, &DateRange::unbounded());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], row("Ana", 3, 0, 3));
    }

    #[test]
    fn test_aggregate_first_appearance_order() {
        let records = vec![
            make_record("Zeca", "1", "0", "01/08/2024 10:00"),
            make_record("Ana", "1", "0", "01/08/2024 10:00"),
            make_record("Mara", "1", "0", "01/08/2024 10:00"),
            make_record("Ana", "1", "0", "01/08/2024 10:00"),
        ];
        let rows = Aggregator::new().aggregate(&records, &DateRange::unbounded());
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Zeca", "Ana", "Mara", "Total"]);
    }

    #[test]
    fn test_aggregate_order_follows_filtered_input() {
        // Zeca's only in-range record comes after Ana's
        let records = vec![
            make_record("Zeca", "1", "0", "01/07/2024 10:00"),
            make_record("Ana", "1", "0", "01/08/2024 10:00"),
            make_record("Zeca", "1", "0", "02/08/2024 10:00"),
        ];
        let rows = Aggregator::new().aggregate(&records, &range(Some((1, 8, 2024)), None));
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Ana", "Zeca", "Total"]);
    }

    #[test]
    fn test_aggregate_blank_color_coerced() {
        let records = vec![make_record("Caio", "", "5", "03/08/2024 14:30")];
        let rows = Aggregator::new().aggregate(&records, &DateRange::unbounded());

        assert_eq!(rows[0], row("Caio", 0, 5, 5));
        assert_total_matches(&rows);
    }

    #[test]
    fn test_aggregate_total_is_column_sum() {
        let records = vec![
            make_record("Ana", "3", "x", "01/08/2024 10:00"),
            make_record("Bea", "7", "11", "01/08/2024 10:00"),
            make_record("Caio", "", "", "01/08/2024 10:00"),
            make_record("Bea", "2.0", "1", "01/08/2024 10:00"),
        ];
        let rows = Aggregator::new().aggregate(&records, &DateRange::unbounded());
        assert_total_matches(&rows);
        assert_eq!(rows.last().unwrap(), &row("Total", 12, 12, 24));
    }

    // ========== date filter tests ==========

    #[test]
    fn test_undated_record_kept_without_bounds() {
        let records = vec![make_record("Ana", "1", "1", "sem data")];
        let rows = Aggregator::new().aggregate(&records, &DateRange::unbounded());
        assert_eq!(rows[0], row("Ana", 1, 1, 2));
    }

    #[test]
    fn test_undated_record_dropped_with_any_bound() {
        let records = vec![
            make_record("Ana", "1", "1", "sem data"),
            make_record("Bea", "1", "0", "01/08/2024 10:00"),
        ];

        for r in [
            range(Some((1, 1, 2000)), None),
            range(None, Some((1, 1, 2100))),
            range(Some((1, 1, 2000)), Some((1, 1, 2100))),
        ] {
            let rows = Aggregator::new().aggregate(&records, &r);
            assert_eq!(rows, vec![row("Bea", 1, 0, 1), row("Total", 1, 0, 1)]);
        }
    }

    #[test]
    fn test_end_day_inclusive_next_day_excluded() {
        let records = vec![
            make_record("Ana", "1", "0", "05/08/2024 00:00"),
            make_record("Bea", "1", "0", "05/08/2024 23:59"),
            make_record("Caio", "1", "0", "06/08/2024 00:00"),
        ];
        let rows = Aggregator::new().aggregate(&records, &range(None, Some((5, 8, 2024))));
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Ana", "Bea", "Total"]);
    }

    #[test]
    fn test_inverted_range_yields_only_total() {
        let records = vec![make_record("Ana", "1", "0", "03/08/2024 10:00")];
        let rows =
            Aggregator::new().aggregate(&records, &range(Some((5, 8, 2024)), Some((1, 8, 2024))));
        assert_eq!(rows, vec![row("Total", 0, 0, 0)]);
    }

    #[test]
    fn test_custom_timestamp_format() {
        let records = vec![make_record("Ana", "1", "0", "2024-08-03 10:00")];
        let aggregator = Aggregator::with_timestamp_format("%Y-%m-%d %H:%M");
        let rows = aggregator.aggregate(&records, &range(Some((3, 8, 2024)), Some((3, 8, 2024))));
        assert_eq!(rows[0], row("Ana", 1, 0, 1));
    }

    // ========== by_person() tests ==========

    #[test]
    fn test_by_person_empty() {
        assert!(Aggregator::by_person(&[]).is_empty());
    }

    #[test]
    fn test_by_person_blank_name_dropped() {
        let entries = vec![
            PrintEntry {
                name: String::new(),
                color_pages: 9,
                mono_pages: 9,
                printed_at: None,
            },
            PrintEntry {
                name: "Ana".into(),
                color_pages: 1,
                mono_pages: 2,
                printed_at: None,
            },
        ];
        let rows = Aggregator::by_person(&entries);
        assert_eq!(rows, vec![row("Ana", 1, 2, 3)]);
    }
}
