use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};

use crate::hour_index::{hours_in_year, start_of_year, truncate_to_hour};
use crate::reference::ReferenceCurve;
use crate::types::{AnnualGrid, FilledGrid, FilledHour, GridEntry, HourlyBin, Slot};

#[derive(Debug, Clone, Copy)]
pub enum FillPolicy<'a> {
    Reference(&'a ReferenceCurve),
    Constant(f64),
}

impl FillPolicy<'_> {
    pub fn value_at(&self, instant: &NaiveDateTime) -> f64 {
        match self {
            FillPolicy::Reference(curve) => curve.value_at(instant),
            FillPolicy::Constant(v) => *v,
        }
    }
}

fn hourly_sequence(first: NaiveDateTime, count: usize) -> impl Iterator<Item = NaiveDateTime> {
    (0..count as i64).map(move |h| first + Duration::hours(h))
}

fn place_bins(
    channels: usize,
    bins: &[HourlyBin],
    hours: impl Iterator<Item = NaiveDateTime>,
) -> AnnualGrid {
    let mut by_hour: HashMap<NaiveDateTime, &HourlyBin> =
        bins.iter().map(|b| (b.hour, b)).collect();

    let entries: Vec<GridEntry> = hours
        .map(|timestamp| {
            let slot = match by_hour.remove(&timestamp) {
                Some(bin) => Slot::Present(bin.values.clone()),
                None => Slot::Missing,
            };
            GridEntry { timestamp, slot }
        })
        .collect();

    if !by_hour.is_empty() {
        warn!(dropped = by_hour.len(), "hourly bins fell outside the grid");
    }
    let missing = entries.iter().filter(|e| e.slot == Slot::Missing).count();
    debug!(hours = entries.len(), missing, "reindexed hourly bins");

    AnnualGrid { channels, entries }
}

pub fn reindex(channels: usize, bins: &[HourlyBin], year: i32) -> AnnualGrid {
    match start_of_year(year) {
        Some(first) => place_bins(channels, bins, hourly_sequence(first, hours_in_year(year))),
        None => place_bins(channels, bins, std::iter::empty()),
    }
}

pub fn reindex_range(
    channels: usize,
    bins: &[HourlyBin],
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> AnnualGrid {
    let first = truncate_to_hour(start);
    let last = truncate_to_hour(end);
    let count = if last < first {
        0
    } else {
        (last - first).num_hours() as usize + 1
    };
    place_bins(channels, bins, hourly_sequence(first, count))
}

pub fn fill(grid: &AnnualGrid, policy: FillPolicy<'_>) -> FilledGrid {
    let mut gaps_filled = 0;
    let hours = grid
        .entries
        .iter()
        .map(|entry| {
            let values = match &entry.slot {
                Slot::Present(values) => values
                    .iter()
                    .map(|&v| {
                        v.unwrap_or_else(|| {
                            gaps_filled += 1;
                            policy.value_at(&entry.timestamp)
                        })
                    })
                    .collect(),
                Slot::Missing => {
                    gaps_filled += grid.channels;
                    vec![policy.value_at(&entry.timestamp); grid.channels]
                }
            };
            FilledHour {
                timestamp: entry.timestamp,
                values,
            }
        })
        .collect();

    debug!(gaps_filled, "filled grid gaps");
    FilledGrid { hours, gaps_filled }
}
