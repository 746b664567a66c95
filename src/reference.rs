use chrono::NaiveDateTime;
use tracing::debug;

use crate::angles::{self, days_in_months};
use crate::error::{Error, Result};
use crate::hour_index::{self, HOURS_LEAP, HOURS_NON_LEAP, HOURS_PER_DAY};
use crate::types::ObserverLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Daily,
    Hourly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurve {
    resolution: Resolution,
    values: Vec<f64>,
}

pub fn doy_to_month_day(year: i32, doy: u32) -> (u32, u32) {
    let mut remaining = doy;
    for (month_idx, &dim) in days_in_months(year).iter().enumerate() {
        if remaining <= dim {
            return (month_idx as u32 + 1, remaining);
        }
        remaining -= dim;
    }
    (12, 31)
}

impl ReferenceCurve {
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        let resolution = match values.len() {
            365 | 366 => Resolution::Daily,
            HOURS_NON_LEAP | HOURS_LEAP => Resolution::Hourly,
            n => return Err(Error::ReferenceCurveSize(n)),
        };
        Ok(Self { resolution, values })
    }

    /// Hourly curve of ideal tracker rolls for `year`, sampled at half past
    /// each hour. Hours with the sun at or below the horizon hold 0.
    pub fn idealized_tracker(location: &ObserverLocation, year: i32) -> Self {
        let n_days = angles::days_in_year(year);
        let mut values = Vec::with_capacity(n_days as usize * HOURS_PER_DAY);

        for doy in 1..=n_days {
            let (month, day) = doy_to_month_day(year, doy);
            for hour in 0..HOURS_PER_DAY as u32 {
                let roll = chrono::NaiveDate::from_ymd_opt(year, month, day)
                    .and_then(|d| d.and_hms_opt(hour, 30, 0))
                    .map(|local| angles::solar_position(location, &local))
                    .filter(|pos| pos.elevation > 0.0)
                    .map_or(0.0, |pos| pos.roll);
                values.push(roll);
            }
        }

        debug!(year, entries = values.len(), "generated idealized tracker curve");
        Self {
            resolution: Resolution::Hourly,
            values,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn covers_leap_day(&self) -> bool {
        matches!(self.values.len(), 366 | HOURS_LEAP)
    }

    /// Fallback value for the hour containing `instant`. Curves sized for a
    /// non-leap year are read on a folded calendar in leap years.
    pub fn value_at(&self, instant: &NaiveDateTime) -> f64 {
        let idx = match (self.resolution, self.covers_leap_day()) {
            (Resolution::Daily, true) => hour_index::day_index(instant),
            (Resolution::Daily, false) => hour_index::non_leap_day_index(instant),
            (Resolution::Hourly, true) => hour_index::index_of(instant),
            (Resolution::Hourly, false) => hour_index::non_leap_index_of(instant),
        };
        self.values[idx.min(self.values.len() - 1)]
    }
}
