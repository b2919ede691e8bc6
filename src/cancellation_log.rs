use crate::types::CancelledRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Append-only history of cancellations, one ordered list per day. Kept
/// across date changes; never consulted when booking.
#[derive(Debug, Clone, Default)]
pub struct CancellationLog {
    records: BTreeMap<NaiveDate, Vec<CancelledRecord>>,
}

impl CancellationLog {
    pub fn append(&mut self, record: CancelledRecord) {
        self.records.entry(record.date).or_default().push(record);
    }

    pub fn records_for(&self, date: NaiveDate) -> &[CancelledRecord] {
        self.records.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn total_records(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(day: u32, time: &str, name: &str) -> CancelledRecord {
        CancelledRecord {
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            time: time.parse().unwrap(),
            name: name.into(),
            purpose: "Checkup".into(),
            reason: "client request".into(),
        }
    }

    #[test]
    fn records_are_grouped_by_date_in_append_order() {
        let mut log = CancellationLog::default();
        log.append(record(19, "15:00", "Stefan"));
        log.append(record(20, "09:00", "Peter"));
        log.append(record(19, "09:00", "Alice"));

        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let names: Vec<&str> = log
            .records_for(day)
            .iter()
            .map(|record| record.name.as_str())
            .collect();
        assert_eq!(names, vec!["Stefan", "Alice"]);
        assert_eq!(log.total_records(), 3);
    }

    #[test]
    fn unknown_date_has_no_records() {
        let log = CancellationLog::default();
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(log.records_for(day).is_empty());
        assert_eq!(log.total_records(), 0);
    }
}
