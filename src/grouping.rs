//! Time bucketing of audit rows.
//!
//! Rows are partitioned by one time component of their creation timestamp.
//! Which component is decided by the active [`Granularity`]: day of month,
//! hour of day, or minute of hour. Groups keep the host's row order and are
//! iterated in ascending key order.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use crate::domain::{day_ordinal, parse_local_timestamp, Granularity, RECORD_CREATED};
use crate::error::{AuditError, AuditResult};
use crate::host::DataTable;

/// Partition `items` by `key_fn`, keeping input order inside each group.
pub fn group_by<T, K, F, I>(items: I, mut key_fn: F) -> BTreeMap<K, Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}

impl Granularity {
    pub fn bucket_key(&self, created: &NaiveDateTime) -> u32 {
        match self {
            Self::Month => created.day(),
            Self::Day => created.hour(),
            Self::Hour => created.minute(),
        }
    }

    /// Label for the bucket that `first` opened.
    pub fn header_text(&self, first: &NaiveDateTime) -> String {
        match self {
            Self::Month => format!("{} {}", first.format("%B"), day_ordinal(first.day())),
            Self::Day => {
                let end = *first + Duration::hours(1);
                format!("{} - {}", first.format("%H:00"), end.format("%H:00"))
            }
            Self::Hour => {
                let end = *first + Duration::minutes(1);
                format!("{} - {}", first.format("%H:%M"), end.format("%H:%M"))
            }
        }
    }
}

/// Rows of one render pass grouped under a single granularity.
#[derive(Debug)]
pub struct TimeGroups<'a, R> {
    granularity: Granularity,
    groups: BTreeMap<u32, Vec<TimedRow<'a, R>>>,
}

#[derive(Debug)]
struct TimedRow<'a, R> {
    row: &'a R,
    created: NaiveDateTime,
}

impl<'a, R> TimeGroups<'a, R> {
    /// Group every row of `table`. Fails on the first row whose creation
    /// timestamp does not parse.
    pub fn build<T>(table: &'a T, granularity: Granularity) -> AuditResult<Self>
    where
        T: DataTable<Row = R>,
    {
        let timed = table
            .rows()
            .iter()
            .map(|row| {
                let value = table.cell_text(row, RECORD_CREATED);
                match parse_local_timestamp(&value) {
                    Some(created) => Ok(TimedRow { row, created }),
                    None => Err(AuditError::InvalidTimestamp {
                        row_id: table.row_id(row),
                        value,
                    }),
                }
            })
            .collect::<AuditResult<Vec<_>>>()?;

        let groups = group_by(timed, |timed| granularity.bucket_key(&timed.created));
        tracing::debug!(
            "Grouped {} rows into {} {} buckets",
            table.rows().len(),
            groups.len(),
            granularity
        );
        Ok(Self {
            granularity,
            groups,
        })
    }

    /// Bucket keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.groups.keys().copied()
    }

    pub fn rows(&self, key: u32) -> Option<Vec<&'a R>> {
        self.groups
            .get(&key)
            .map(|rows| rows.iter().map(|timed| timed.row).collect())
    }

    pub fn header_text(&self, key: u32) -> AuditResult<String> {
        let first = self
            .groups
            .get(&key)
            .and_then(|rows| rows.first())
            .ok_or(AuditError::UnknownBucket(key))?;
        Ok(self.granularity.header_text(&first.created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Property, RECORD_CREATED_BY};
    use crate::host::{MemoryDataTable, MemoryRow};

    fn table(created: &[&str]) -> MemoryDataTable {
        let rows = created
            .iter()
            .enumerate()
            .map(|(i, c)| {
                MemoryRow::new(
                    i.to_string(),
                    [(RECORD_CREATED, *c), (RECORD_CREATED_BY, "alice")],
                )
            })
            .collect();
        MemoryDataTable::new(vec![Property::new(RECORD_CREATED, "Created")], rows)
    }

    fn ids(groups: &TimeGroups<'_, MemoryRow>, key: u32) -> Vec<String> {
        groups
            .rows(key)
            .expect("bucket exists")
            .into_iter()
            .map(|row| row.id.clone())
            .collect()
    }

    fn at(value: &str) -> NaiveDateTime {
        parse_local_timestamp(value).expect("timestamp")
    }

    #[test]
    fn group_by_is_stable_and_sorted() {
        let groups = group_by(vec![5, 12, 7, 15, 2, 10], |n| n % 3);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(groups[&0], vec![12, 15]);
        assert_eq!(groups[&1], vec![7, 10]);
        assert_eq!(groups[&2], vec![5, 2]);
    }

    #[test]
    fn day_groups_by_hour_in_row_order() {
        let table = table(&[
            "2021-04-03T10:15:00",
            "2021-04-03T11:40:00",
            "2021-04-03T11:05:00",
        ]);
        let groups = TimeGroups::build(&table, Granularity::Day).expect("build groups");

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec![10, 11]);
        assert_eq!(ids(&groups, 10), vec!["0"]);
        assert_eq!(ids(&groups, 11), vec!["1", "2"]);
    }

    #[test]
    fn hour_groups_by_minute() {
        let table = table(&[
            "2021-04-03T10:15:00",
            "2021-04-03T11:40:00",
            "2021-04-03T11:05:00",
        ]);
        let groups = TimeGroups::build(&table, Granularity::Hour).expect("build groups");
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec![5, 15, 40]);
    }

    #[test]
    fn month_groups_by_day_of_month() {
        let table = table(&[
            "2021-04-03T10:15:00",
            "2021-04-30T08:00:00",
            "2021-04-03T23:59:59",
        ]);
        let groups = TimeGroups::build(&table, Granularity::Month).expect("build groups");

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec![3, 30]);
        assert_eq!(ids(&groups, 3), vec!["0", "2"]);
        assert_eq!(groups.header_text(3).expect("header"), "April 3rd");
        assert_eq!(groups.header_text(30).expect("header"), "April 30th");
    }

    #[test]
    fn every_row_lands_in_exactly_one_bucket() {
        let created = [
            "2021-04-01T00:00:00",
            "2021-04-07T13:59:00",
            "2021-04-07T13:00:00",
            "2021-04-21T06:30:00",
            "2021-04-01T18:45:00",
        ];
        let table = table(&created);
        for granularity in [Granularity::Month, Granularity::Day, Granularity::Hour] {
            let groups = TimeGroups::build(&table, granularity).expect("build groups");
            let mut seen: Vec<String> = groups.keys().flat_map(|k| ids(&groups, k)).collect();
            seen.sort();
            assert_eq!(seen, vec!["0", "1", "2", "3", "4"]);
            assert!(groups.keys().all(|k| granularity.key_range().contains(&k)));
        }
    }

    #[test]
    fn malformed_timestamp_fails_the_build() {
        let table = table(&["2021-04-03T10:15:00", "not a date"]);
        let err = TimeGroups::build(&table, Granularity::Day).expect_err("bad row");
        match err {
            AuditError::InvalidTimestamp { row_id, value } => {
                assert_eq!(row_id, "1");
                assert_eq!(value, "not a date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_for_missing_bucket_is_an_error() {
        let table = table(&["2021-04-03T10:15:00"]);
        let groups = TimeGroups::build(&table, Granularity::Day).expect("build groups");
        assert!(matches!(groups.header_text(3), Err(AuditError::UnknownBucket(3))));
    }

    #[test]
    fn range_headers_end_one_unit_after_the_first_row() {
        assert_eq!(Granularity::Day.header_text(&at("2021-04-03T10:15:00")), "10:00 - 11:00");
        assert_eq!(Granularity::Day.header_text(&at("2021-04-03T23:10:00")), "23:00 - 00:00");
        assert_eq!(Granularity::Hour.header_text(&at("2021-04-03T10:15:42")), "10:15 - 10:16");
        assert_eq!(Granularity::Hour.header_text(&at("2021-04-03T10:59:00")), "10:59 - 11:00");
    }

    #[test]
    fn month_header_uses_ordinal_day() {
        assert_eq!(Granularity::Month.header_text(&at("2021-01-01T00:00:00")), "January 1st");
        assert_eq!(Granularity::Month.header_text(&at("2021-12-22T09:00:00")), "December 22nd");
        assert_eq!(Granularity::Month.header_text(&at("2021-02-11T09:00:00")), "February 11th");
    }
}
