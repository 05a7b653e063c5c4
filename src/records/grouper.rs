use std::collections::BTreeMap;

use crate::{foundation::core::YearRange, records::model::TimelineRecord};

/// Records bucketed by year, each bucket sorted by full sort key.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct GroupedRecords {
    by_year: BTreeMap<i32, Vec<TimelineRecord>>,
    dropped: usize,
}

impl GroupedRecords {
    /// Records for `year`, empty when the year has none.
    pub fn year(&self, year: i32) -> &[TimelineRecord] {
        self.by_year.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Years that have at least one record, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.by_year.keys().copied()
    }

    /// Number of records whose sort key carried no parseable year.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Total number of grouped records.
    pub fn len(&self) -> usize {
        self.by_year.values().map(Vec::len).sum()
    }

    /// Whether no record survived grouping.
    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }

    /// `(year, index within year, record)` in ascending year order.
    ///
    /// This is the order in which the column layout emits instance transforms.
    pub fn iter(&self) -> impl Iterator<Item = (i32, usize, &TimelineRecord)> + '_ {
        self.by_year
            .iter()
            .flat_map(|(&year, recs)| recs.iter().enumerate().map(move |(i, r)| (year, i, r)))
    }

    /// [`Self::iter`] restricted to the years of `range`.
    pub fn iter_in(
        &self,
        range: YearRange,
    ) -> impl Iterator<Item = (i32, usize, &TimelineRecord)> + '_ {
        self.iter().filter(move |(year, _, _)| range.contains(*year))
    }
}

/// Group records by the year encoded in their sort key.
///
/// Records without a parseable year are dropped and counted, never reported as
/// an error.
#[tracing::instrument(skip(records), fields(count = records.len()))]
pub fn group_by_year(records: &[TimelineRecord]) -> GroupedRecords {
    let mut by_year = BTreeMap::<i32, Vec<TimelineRecord>>::new();
    let mut dropped = 0usize;

    for record in records {
        match record.year() {
            Some(year) => by_year.entry(year).or_default().push(record.clone()),
            None => {
                dropped += 1;
                tracing::warn!(sorting_key = %record.sorting_key, "dropping record without a year");
            }
        }
    }

    for recs in by_year.values_mut() {
        recs.sort_by(|a, b| a.sorting_key.cmp(&b.sorting_key));
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = records.len() - dropped, "grouped records");
    }

    GroupedRecords { by_year, dropped }
}

#[cfg(test)]
#[path = "../../tests/unit/records/grouper.rs"]
mod tests;
