use chrono::{Datelike, NaiveDateTime};
use tracing::info;

use crate::aggregate::aggregate;
use crate::error::{Error, Result};
use crate::grid::{fill, reindex, reindex_range, FillPolicy};
use crate::reference::ReferenceCurve;
use crate::types::{
    AnnualGrid, DerivationPolicy, FilledGrid, GridPolicy, ObservationWindow, ObserverLocation,
    Sample, SeriesKind, TrackerRow, WeatherFile,
};
use crate::weather::derive;

pub const WEATHER_FILL_VALUE: f64 = 0.0;

impl ObservationWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        (self.start..=self.end).contains(instant)
    }

    pub fn calendar_year(&self) -> Result<i32> {
        let (start_year, end_year) = (self.start.year(), self.end.year());
        if start_year != end_year {
            return Err(Error::DateRangeSpansMultipleYears {
                start_year,
                end_year,
            });
        }
        Ok(start_year)
    }

    pub fn utc_bounds(&self, location: &ObserverLocation) -> (NaiveDateTime, NaiveDateTime) {
        (location.to_utc(self.start), location.to_utc(self.end))
    }
}

pub fn build_grid(
    kind: SeriesKind,
    samples: &[Sample],
    window: &ObservationWindow,
    grid_policy: GridPolicy,
) -> Result<AnnualGrid> {
    let year = match grid_policy {
        GridPolicy::CalendarYear => Some(window.calendar_year()?),
        GridPolicy::ExactRange => None,
    };
    let in_window = samples.iter().filter(|s| window.contains(&s.timestamp));
    let bins = aggregate(kind, in_window)?;
    Ok(match year {
        Some(year) => reindex(kind.channels(), &bins, year),
        None => reindex_range(kind.channels(), &bins, &window.start, &window.end),
    })
}

pub fn reconcile(
    kind: SeriesKind,
    samples: &[Sample],
    window: &ObservationWindow,
    grid_policy: GridPolicy,
    fill_policy: FillPolicy<'_>,
) -> Result<FilledGrid> {
    let grid = build_grid(kind, samples, window, grid_policy)?;
    let filled = fill(&grid, fill_policy);
    info!(
        ?kind,
        ?grid_policy,
        hours = filled.hours.len(),
        gaps_filled = filled.gaps_filled,
        "reconciled series"
    );
    Ok(filled)
}

#[derive(Debug, Clone)]
pub struct Reconciler<'a> {
    location: &'a ObserverLocation,
    policy: DerivationPolicy,
}

impl<'a> Reconciler<'a> {
    pub fn new(location: &'a ObserverLocation) -> Self {
        Self {
            location,
            policy: DerivationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DerivationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn location(&self) -> &ObserverLocation {
        self.location
    }

    pub fn tracker_angles(
        &self,
        samples: &[Sample],
        window: &ObservationWindow,
        grid_policy: GridPolicy,
        curve: &ReferenceCurve,
    ) -> Result<Vec<TrackerRow>> {
        let filled = reconcile(
            SeriesKind::TrackerAngle,
            samples,
            window,
            grid_policy,
            FillPolicy::Reference(curve),
        )?;
        Ok(filled
            .hours
            .into_iter()
            .map(|h| TrackerRow {
                timestamp: h.timestamp,
                angle: h.values[0],
            })
            .collect())
    }

    pub fn weather(
        &self,
        samples: &[Sample],
        window: &ObservationWindow,
        grid_policy: GridPolicy,
    ) -> Result<WeatherFile> {
        let filled = reconcile(
            SeriesKind::Weather,
            samples,
            window,
            grid_policy,
            FillPolicy::Constant(WEATHER_FILL_VALUE),
        )?;
        Ok(WeatherFile {
            header: self.location.weather_header(),
            rows: derive(&filled, self.location, &self.policy)?,
        })
    }
}
