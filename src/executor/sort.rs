// ============================================================================
// src/executor/sort.rs - Record comparator and stable sort
// ============================================================================
//
// Every extracted value is reduced once to a SortKey, and keys are compared
// by a fixed kind rank first:
//
//   Date < Number < Flag < Text
//
// - Date: epoch millis. In a date column every value is a date and
//   unparseable ones count as epoch 0.
// - Number: numbers and numeric strings; missing values count as 0.
// - Flag: booleans, false < true.
// - Text: lowercased, lexicographic.
//
// Keys are totally ordered, so mixed columns (decimals sent as numbers for
// some rows and as strings for others) sort without surprises.
//
// Ties keep their input order: the sort is stable, and that is the only
// tie-break.
//
// ============================================================================

use crate::core::dates::{parse_date, value_to_millis};
use crate::core::{Record, Value};
use crate::expression::extract;
use crate::query::SortSpec;
use std::borrow::Borrow;
use std::cmp::{Ordering, Reverse};

// ============================================================================
// SORT KEY
// ============================================================================

/// Comparable form of one extracted value.
#[derive(Debug, Clone)]
pub enum SortKey {
    Date(i64),
    Number(f64),
    Flag(bool),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Date(_) => 0,
            Self::Number(_) => 1,
            Self::Flag(_) => 2,
            Self::Text(_) => 3,
        }
    }

    fn number(n: f64) -> Self {
        // -0.0 and 0.0 are the same amount
        Self::Number(if n == 0.0 { 0.0 } else { n })
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Flag(a), Self::Flag(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

// ============================================================================
// RECORD COMPARATOR
// ============================================================================

/// How a column's values become keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyMode {
    /// Date-named field: everything is epoch millis
    Dates,
    /// Each value keyed by its own kind
    Mixed,
}

/// Compares records by one sort spec.
pub struct RecordComparator {
    spec: SortSpec,
    mode: KeyMode,
}

impl RecordComparator {
    /// Date-named fields (`createdAt`, `timestamps.created`) sort as dates.
    pub fn new(spec: SortSpec) -> Self {
        let mode = if spec.field.is_date_hint() {
            KeyMode::Dates
        } else {
            KeyMode::Mixed
        };
        Self { spec, mode }
    }

    /// Like `new`, but a date-named column that holds no dates at all
    /// (`updatedBy`) sorts by its values instead.
    pub fn for_records<T: Borrow<Record>>(spec: SortSpec, records: &[T]) -> Self {
        let mut comparator = Self::new(spec);
        if comparator.mode == KeyMode::Dates {
            let has_dates = records
                .iter()
                .any(|r| value_to_millis(&extract(r.borrow(), &comparator.spec.field), true).is_some());
            if !has_dates {
                comparator.mode = KeyMode::Mixed;
            }
        }
        comparator
    }

    pub fn spec(&self) -> &SortSpec {
        &self.spec
    }

    /// Key of the record's sort field.
    pub fn key(&self, record: &Record) -> SortKey {
        self.key_of(&extract(record, &self.spec.field))
    }

    pub fn key_of(&self, value: &Value) -> SortKey {
        match self.mode {
            KeyMode::Dates => SortKey::Date(value_to_millis(value, true).unwrap_or(0)),
            KeyMode::Mixed => match value {
                Value::Null => SortKey::number(0.0),
                Value::Integer(i) => SortKey::number(*i as f64),
                Value::Float(f) => SortKey::number(*f),
                Value::Boolean(b) => SortKey::Flag(*b),
                Value::Text(s) => {
                    if let Some(n) = value.as_number() {
                        SortKey::number(n)
                    } else if let Some(dt) = parse_date(s) {
                        SortKey::Date(dt.timestamp_millis())
                    } else {
                        SortKey::Text(s.to_lowercase())
                    }
                }
            },
        }
    }

    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = self.key(a).cmp(&self.key(b));

        if self.spec.direction.is_descending() {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Natural (ascending) order of two extracted values.
    pub fn compare_values(&self, a: &Value, b: &Value) -> Ordering {
        self.key_of(a).cmp(&self.key_of(b))
    }
}

/// Comparator closure for `spec`.
pub fn build_comparator(spec: &SortSpec) -> impl Fn(&Record, &Record) -> Ordering + use<> {
    let comparator = RecordComparator::new(spec.clone());
    move |a, b| comparator.compare(a, b)
}

pub struct SortExecutor;

impl SortExecutor {
    /// Stable in-place sort. Works on owned records or references. Each
    /// record's key is extracted once.
    pub fn sort<T: Borrow<Record>>(records: &mut [T], spec: &SortSpec) {
        if records.len() < 2 {
            return;
        }
        let comparator = RecordComparator::for_records(spec.clone(), records);
        if spec.direction.is_descending() {
            records.sort_by_cached_key(|r| Reverse(comparator.key(r.borrow())));
        } else {
            records.sort_by_cached_key(|r| comparator.key(r.borrow()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn amounts(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r.data()["amount"].as_i64().unwrap_or(-1))
            .collect()
    }

    fn with_amounts(values: &[i64]) -> Vec<Record> {
        values.iter().map(|v| Record::new(json!({"amount": v}))).collect()
    }

    #[test]
    fn test_numeric_sort_both_directions() {
        let mut records = with_amounts(&[100, 300, 200]);
        SortExecutor::sort(&mut records, &SortSpec::desc("amount"));
        assert_eq!(amounts(&records), vec![300, 200, 100]);

        SortExecutor::sort(&mut records, &SortSpec::asc("amount"));
        assert_eq!(amounts(&records), vec![100, 200, 300]);
    }

    #[test]
    fn test_missing_numbers_sort_as_zero() {
        let mut records = with_amounts(&[5, -3]);
        records.push(Record::new(json!({"name": "no amount"})));
        SortExecutor::sort(&mut records, &SortSpec::asc("amount"));
        assert_eq!(amounts(&records), vec![-3, -1, 5]);
    }

    #[test]
    fn test_numeric_strings_sort_with_numbers() {
        let comparator = RecordComparator::new(SortSpec::asc("amount"));
        assert_eq!(
            comparator.compare_values(&Value::Text("75.25".into()), &Value::Float(120.5)),
            Ordering::Less
        );
        assert_eq!(
            comparator.compare_values(&Value::Text("10".into()), &Value::Text("9".into())),
            Ordering::Greater
        );
        // plain text ranks after every number
        assert_eq!(
            comparator.compare_values(&Value::Text("n/a".into()), &Value::Integer(1_000_000)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_mixed_amount_column_is_totally_ordered() {
        let mut records: Vec<Record> = (0..400)
            .map(|i| {
                let amount = match i % 4 {
                    0 => json!(i as f64 + 0.5),
                    1 => json!(format!("{}", i)),
                    2 => json!(format!("{}", i % 10)),
                    _ => json!(format!("pending-{}", i % 7)),
                };
                Record::new(json!({"_id": i, "amount": amount}))
            })
            .collect();

        SortExecutor::sort(&mut records, &SortSpec::asc("amount"));

        let comparator = RecordComparator::new(SortSpec::asc("amount"));
        for pair in records.windows(2) {
            assert_ne!(comparator.compare(&pair[0], &pair[1]), Ordering::Greater);
        }
        assert_eq!(records[0].data()["amount"], "0");
        assert_eq!(records[399].data()["amount"], "pending-6");

        let cmp = build_comparator(&SortSpec::desc("amount"));
        records.sort_by(|a, b| cmp(a, b));
        assert_eq!(records[0].data()["amount"], "pending-6");
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let mut records = vec![
            Record::new(json!({"name": "bravo"})),
            Record::new(json!({"name": "Alpha"})),
            Record::new(json!({"name": "charlie"})),
        ];
        SortExecutor::sort(&mut records, &SortSpec::asc("name"));
        let names: Vec<&str> = records.iter().map(|r| r.data()["name"].as_str().unwrap_or("")).collect();
        assert_eq!(names, vec!["Alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_dates_sort_chronologically() {
        let mut records = vec![
            Record::new(json!({"id": 1, "createdAt": "2025-03-01T08:00:00+05:00"})),
            Record::new(json!({"id": 2, "createdAt": "2025-02-28T23:00:00Z"})),
            Record::new(json!({"id": 3})),
            Record::new(json!({"id": 4, "createdAt": "soon"})),
        ];
        SortExecutor::sort(&mut records, &SortSpec::desc("createdAt"));
        let ids: Vec<Option<String>> = records.iter().map(Record::id).collect();
        // 08:00+05:00 is 03:00Z on March 1st; undated and unparseable both sort as epoch 0
        assert_eq!(
            ids,
            vec![Some("1".into()), Some("2".into()), Some("3".into()), Some("4".into())]
        );
    }

    #[test]
    fn test_date_named_column_without_dates_sorts_as_text() {
        let mut records = vec![
            Record::new(json!({"updatedBy": "bob"})),
            Record::new(json!({"updatedBy": "Alice"})),
        ];
        SortExecutor::sort(&mut records, &SortSpec::asc("updatedBy"));
        assert_eq!(records[0].data()["updatedBy"], "Alice");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut records = vec![
            Record::new(json!({"id": "a", "status": "open"})),
            Record::new(json!({"id": "b", "status": "closed"})),
            Record::new(json!({"id": "c", "status": "open"})),
        ];
        SortExecutor::sort(&mut records, &SortSpec::desc("status"));
        let ids: Vec<String> = records.iter().filter_map(Record::id).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_reference_field_sorts_by_name() {
        let mut records = vec![
            Record::new(json!({"company": {"_id": "2", "name": "Zenith"}})),
            Record::new(json!({"company": {"_id": "1", "name": "Atlas"}})),
        ];
        let cmp = build_comparator(&SortSpec::asc("company"));
        records.sort_by(|a, b| cmp(a, b));
        assert_eq!(records[0].data()["company"]["name"], "Atlas");
    }
}
