use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    TrackerAngle,
    Weather,
}

impl SeriesKind {
    pub fn channels(self) -> usize {
        self.channel_names().len()
    }

    pub fn channel_names(self) -> &'static [&'static str] {
        match self {
            SeriesKind::TrackerAngle => &["angle"],
            SeriesKind::Weather => &["ghi", "dhi", "temperature", "humidity", "wind_speed", "wind_direction"],
        }
    }
}

// Column order of a weather sample.
pub const GHI: usize = 0;
pub const DHI: usize = 1;
pub const DRY_BULB: usize = 2;
pub const HUMIDITY: usize = 3;
pub const WIND_SPEED: usize = 4;
pub const WIND_DIRECTION: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub name: String,
    pub source: String,
    pub state: String,
    pub country: String,
    pub location_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverLocation {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) utc_offset_hours: f64,
    pub(crate) dst: bool,
    pub(crate) elevation_m: f64,
    pub(crate) albedo: f64,
    pub(crate) metadata: SiteMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    pub utc: NaiveDateTime,
    pub azimuth: f64,
    pub elevation: f64,
    pub roll: f64,
    pub aoi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerGeometry {
    pub roll: f64,
    pub aoi: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub values: Vec<f64>,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, values: Vec<f64>) -> Self {
        Self { timestamp, values }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyBin {
    pub hour: NaiveDateTime,
    pub values: Vec<Option<f64>>,
    pub samples: usize,
}

/// Local-time request window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationWindow {
    pub(crate) start: NaiveDateTime,
    pub(crate) end: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridPolicy {
    #[default]
    CalendarYear,
    ExactRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Present(Vec<Option<f64>>),
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridEntry {
    pub timestamp: NaiveDateTime,
    pub slot: Slot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnualGrid {
    pub channels: usize,
    pub entries: Vec<GridEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilledHour {
    pub timestamp: NaiveDateTime,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilledGrid {
    pub hours: Vec<FilledHour>,
    pub gaps_filled: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerRow {
    pub timestamp: NaiveDateTime,
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherRow {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub ghi: f64,
    pub dni: f64,
    pub dhi: f64,
    pub dry_bulb: f64,
    pub wet_bulb: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub albedo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherHeader {
    pub source: String,
    pub location_id: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub time_zone: f64,
    pub elevation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherFile {
    pub header: WeatherHeader,
    pub rows: Vec<WeatherRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivationPolicy {
    pub pressure_mbar: f64,
    pub tracker_roll_limit: Option<f64>,
}

impl Default for DerivationPolicy {
    fn default() -> Self {
        Self {
            pressure_mbar: 1013.25,
            tracker_roll_limit: None,
        }
    }
}
