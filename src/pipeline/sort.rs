// src/pipeline/sort.rs

//! Sort engine.
//!
//! Grouped numeric columns (the amount) are compared by the number recovered
//! from their display string; every other column compares lowercase text.
//! Ties may come out in any order.

use std::borrow::Borrow;
use std::cmp::{Ordering, Reverse};

use crate::models::{Field, Record, SortDirection};
use crate::utils::parse_amount;

/// Comparable key for one record under one column.
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    pub fn of(record: &Record, column: Field) -> Self {
        let value = record.value(column);
        if column.spec().grouped {
            SortKey::Number(parse_amount(value).unwrap_or(0.0))
        } else {
            SortKey::Text(value.to_lowercase())
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Sort records in place by `column` and `direction`.
///
/// Keys are computed once per record; the records themselves are only
/// moved, never cloned.
pub fn sort_records<R: Borrow<Record>>(records: &mut [R], column: Field, direction: SortDirection) {
    let key = |record: &R| SortKey::of(Borrow::<Record>::borrow(record), column);
    match direction {
        SortDirection::Asc => records.sort_by_cached_key(key),
        SortDirection::Desc => records.sort_by_cached_key(|record| Reverse(key(record))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sorted(records: &[Record], column: Field, direction: SortDirection) -> Vec<Record> {
        let mut copy = records.to_vec();
        sort_records(&mut copy, column, direction);
        copy
    }

    fn amounts(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.value(Field::Amount)).collect()
    }

    #[test]
    fn test_amount_sorts_numerically() {
        let records = vec![
            Record::new("a", 100.0, "1", "", ""),
            Record::new("b", 2500.0, "2", "", ""),
            Record::new("c", 50.0, "3", "", ""),
        ];

        let asc = sorted(&records, Field::Amount, SortDirection::Asc);
        assert_eq!(amounts(&asc), vec!["50", "100", "2,500"]);

        let desc = sorted(&records, Field::Amount, SortDirection::Desc);
        assert_eq!(amounts(&desc), vec!["2,500", "100", "50"]);
    }

    #[test]
    fn test_text_sorts_case_insensitively() {
        let records = vec![
            Record::new("banana", 1.0, "", "", ""),
            Record::new("Apple", 1.0, "", "", ""),
            Record::new("cherry", 1.0, "", "", ""),
        ];
        let asc = sorted(&records, Field::Narration, SortDirection::Asc);
        let names: Vec<&str> = asc.iter().map(|r| r.value(Field::Narration)).collect();
        assert_eq!(names, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_cheque_numbers_sort_as_text() {
        let records = vec![
            Record::new("", 1.0, "900", "", ""),
            Record::new("", 1.0, "1000", "", ""),
        ];
        let asc = sorted(&records, Field::ChequeNo, SortDirection::Asc);
        assert_eq!(asc[0].value(Field::ChequeNo), "1000");
    }

    #[test]
    fn test_desc_is_reverse_of_asc_without_ties() {
        let records: Vec<Record> = [7.0, 3.5, 12000.0, 0.0, 450.25]
            .into_iter()
            .map(|amount| Record::new("x", amount, "", "", ""))
            .collect();

        let asc = sorted(&records, Field::Amount, SortDirection::Asc);
        let mut desc = sorted(&records, Field::Amount, SortDirection::Desc);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_shared_records_sort_without_copying() {
        let records: Vec<Arc<Record>> = [300.0, 10.0, 20.0]
            .into_iter()
            .map(|amount| Arc::new(Record::new("x", amount, "", "", "")))
            .collect();
        let mut view = records.clone();

        sort_records(&mut view, Field::Amount, SortDirection::Asc);
        assert!(Arc::ptr_eq(&view[0], &records[1]));
        assert!(Arc::ptr_eq(&view[1], &records[2]));
        assert!(Arc::ptr_eq(&view[2], &records[0]));
    }

    #[test]
    fn test_sort_key_of_formatted_amount() {
        let record = Record::new("", 1234567.5, "", "", "");
        assert_eq!(
            SortKey::of(&record, Field::Amount),
            SortKey::Number(1234567.5)
        );
    }
}
