use chrono::{DateTime, Utc};

use super::purchase_record::PurchaseRecord;

/// Date field used to order purchase records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    PurchaseDate,
    OriginalPurchaseDate,
}

impl SortKey {
    fn time_of(self, record: &PurchaseRecord) -> DateTime<Utc> {
        match self {
            Self::PurchaseDate => record.purchase_time(),
            Self::OriginalPurchaseDate => record.original_purchase_time(),
        }
    }
}

pub trait PurchaseRecordsExt {
    /// Returns a copy sorted ascending by `key`. Records with equal keys keep
    /// their relative order.
    fn sorted(&self, key: SortKey) -> Vec<PurchaseRecord>;

    /// The record that sorts last by `key`, i.e. the one with the greatest
    /// timestamp (the later one among equals). `None` if there are no records.
    fn latest(&self, key: SortKey) -> Option<&PurchaseRecord>;
}

impl PurchaseRecordsExt for [PurchaseRecord] {
    fn sorted(&self, key: SortKey) -> Vec<PurchaseRecord> {
        let mut records = self.to_vec();
        records.sort_by_key(|r| key.time_of(r));
        records
    }

    fn latest(&self, key: SortKey) -> Option<&PurchaseRecord> {
        // max_by_key returns the last of several equal maxima, matching the
        // final element of a stable ascending sort.
        self.iter().max_by_key(|r| key.time_of(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, purchase_ms: i64, original_ms: i64) -> PurchaseRecord {
        PurchaseRecord {
            transaction_id: id.to_owned(),
            purchase_date_ms: purchase_ms,
            original_purchase_date_ms: original_ms,
            ..Default::default()
        }
    }

    fn ids(records: &[PurchaseRecord]) -> Vec<&str> {
        records.iter().map(|r| r.transaction_id.as_str()).collect()
    }

    fn sample() -> Vec<PurchaseRecord> {
        vec![
            record("a", 1_527_811_200_002, 1_527_811_200_000),
            record("b", 1_527_811_200_001, 1_527_811_200_004),
            record("c", 1_527_811_200_000, 1_527_811_200_001),
            record("d", 1_527_811_200_005, 1_527_811_200_003),
        ]
    }

    #[test]
    fn sorts_ascending_by_purchase_date() {
        let sorted = sample().sorted(SortKey::PurchaseDate);
        assert_eq!(ids(&sorted), ["c", "b", "a", "d"]);
    }

    #[test]
    fn sorts_ascending_by_original_purchase_date() {
        let sorted = sample().sorted(SortKey::OriginalPurchaseDate);
        assert_eq!(ids(&sorted), ["a", "c", "d", "b"]);
    }

    #[test]
    fn latest_is_last_of_sorted() {
        let records = sample();
        for key in [SortKey::PurchaseDate, SortKey::OriginalPurchaseDate] {
            assert_eq!(records.latest(key), records.sorted(key).last());
        }
        assert_eq!(records.latest(SortKey::PurchaseDate).unwrap().transaction_id, "d");
    }

    #[test]
    fn sorting_is_idempotent() {
        let once = sample().sorted(SortKey::PurchaseDate);
        assert_eq!(once.sorted(SortKey::PurchaseDate), once);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records = vec![
            record("first", 10, 0),
            record("early", 5, 0),
            record("second", 10, 0),
        ];
        let sorted = records.sorted(SortKey::PurchaseDate);
        assert_eq!(ids(&sorted), ["early", "first", "second"]);
        assert_eq!(
            records.latest(SortKey::PurchaseDate).unwrap().transaction_id,
            "second"
        );
    }

    #[test]
    fn empty_input_has_no_latest() {
        let records: Vec<PurchaseRecord> = Vec::new();
        assert_eq!(records.latest(SortKey::PurchaseDate), None);
        assert!(records.sorted(SortKey::OriginalPurchaseDate).is_empty());
    }
}
