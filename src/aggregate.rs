use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{Error, Result};
use crate::hour_index::truncate_to_hour;
use crate::types::{HourlyBin, Sample, SeriesKind};

struct Accumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
    samples: usize,
}

impl Accumulator {
    fn new(channels: usize) -> Self {
        Self {
            sums: vec![0.0; channels],
            counts: vec![0; channels],
            samples: 0,
        }
    }

    fn push(&mut self, values: &[f64]) {
        self.samples += 1;
        for ((sum, count), &v) in self.sums.iter_mut().zip(self.counts.iter_mut()).zip(values) {
            if v.is_finite() {
                *sum += v;
                *count += 1;
            }
        }
    }

    fn into_bin(self, hour: NaiveDateTime) -> HourlyBin {
        let values = self
            .sums
            .iter()
            .zip(&self.counts)
            .map(|(&sum, &count)| (count > 0).then(|| sum / count as f64))
            .collect();
        HourlyBin {
            hour,
            values,
            samples: self.samples,
        }
    }
}

pub fn check_channels(kind: SeriesKind, sample: &Sample) -> Result<()> {
    let expected = kind.channels();
    if sample.values.len() != expected {
        return Err(Error::ChannelCount {
            kind,
            expected,
            got: sample.values.len(),
        });
    }
    Ok(())
}

pub fn aggregate<'s>(
    kind: SeriesKind,
    samples: impl IntoIterator<Item = &'s Sample>,
) -> Result<Vec<HourlyBin>> {
    let channels = kind.channels();
    let mut hours: BTreeMap<NaiveDateTime, Accumulator> = BTreeMap::new();
    let mut count = 0usize;

    for sample in samples {
        check_channels(kind, sample)?;
        count += 1;
        hours
            .entry(truncate_to_hour(&sample.timestamp))
            .or_insert_with(|| Accumulator::new(channels))
            .push(&sample.values);
    }

    debug!(
        ?kind,
        samples = count,
        bins = hours.len(),
        "aggregated samples into hourly bins"
    );
    Ok(hours
        .into_iter()
        .map(|(hour, acc)| acc.into_bin(hour))
        .collect())
}
