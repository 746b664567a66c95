use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ObserverLocation, SiteMetadata, WeatherHeader};

const MAX_UTC_OFFSET_HOURS: f64 = 14.0;
const DEFAULT_ALBEDO: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: f64,
    #[serde(default)]
    pub dst: bool,
    #[serde(default)]
    pub elevation_m: f64,
    #[serde(default = "default_albedo")]
    pub albedo: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub location_id: String,
}

fn default_albedo() -> f64 {
    DEFAULT_ALBEDO
}

impl LocationConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl TryFrom<LocationConfig> for ObserverLocation {
    type Error = Error;

    fn try_from(cfg: LocationConfig) -> Result<Self> {
        let metadata = SiteMetadata {
            name: cfg.name,
            source: cfg.source,
            state: cfg.state,
            country: cfg.country,
            location_id: cfg.location_id,
        };
        ObserverLocation::new(cfg.latitude, cfg.longitude, cfg.utc_offset_hours)?
            .with_dst(cfg.dst)
            .with_elevation(cfg.elevation_m)?
            .with_albedo(cfg.albedo)
            .map(|loc| loc.with_metadata(metadata))
    }
}

fn check_range(field: &'static str, value: f64, lo: f64, hi: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidLocation {
            field,
            value: value.to_string(),
            reason: "not a finite number",
        });
    }
    if value < lo || value > hi {
        return Err(Error::InvalidLocation {
            field,
            value: value.to_string(),
            reason: "out of range",
        });
    }
    Ok(value)
}

impl ObserverLocation {
    pub fn new(latitude: f64, longitude: f64, utc_offset_hours: f64) -> Result<Self> {
        Ok(Self {
            latitude: check_range("latitude", latitude, -90.0, 90.0)?,
            longitude: check_range("longitude", longitude, -180.0, 180.0)?,
            utc_offset_hours: check_range(
                "utc_offset_hours",
                utc_offset_hours,
                -MAX_UTC_OFFSET_HOURS,
                MAX_UTC_OFFSET_HOURS,
            )?,
            dst: false,
            elevation_m: 0.0,
            albedo: DEFAULT_ALBEDO,
            metadata: SiteMetadata::default(),
        })
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        LocationConfig::load(path)?.try_into()
    }

    pub fn with_dst(mut self, dst: bool) -> Self {
        self.dst = dst;
        self
    }

    pub fn with_elevation(mut self, elevation_m: f64) -> Result<Self> {
        self.elevation_m = check_range("elevation_m", elevation_m, f64::MIN, f64::MAX)?;
        Ok(self)
    }

    pub fn with_albedo(mut self, albedo: f64) -> Result<Self> {
        self.albedo = check_range("albedo", albedo, 0.0, 1.0)?;
        Ok(self)
    }

    pub fn with_metadata(mut self, metadata: SiteMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn utc_offset_hours(&self) -> f64 {
        self.utc_offset_hours
    }

    pub fn dst(&self) -> bool {
        self.dst
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }

    pub fn albedo(&self) -> f64 {
        self.albedo
    }

    pub fn metadata(&self) -> &SiteMetadata {
        &self.metadata
    }

    pub fn effective_offset_hours(&self) -> f64 {
        self.utc_offset_hours + if self.dst { 1.0 } else { 0.0 }
    }

    fn offset(&self) -> Duration {
        Duration::seconds((self.effective_offset_hours() * 3600.0).round() as i64)
    }

    pub fn to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        local - self.offset()
    }

    pub fn to_local(&self, utc: NaiveDateTime) -> NaiveDateTime {
        utc + self.offset()
    }

    pub fn weather_header(&self) -> WeatherHeader {
        WeatherHeader {
            source: self.metadata.source.clone(),
            location_id: self.metadata.location_id.clone(),
            city: self.metadata.name.clone(),
            state: self.metadata.state.clone(),
            country: self.metadata.country.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            time_zone: self.utc_offset_hours,
            elevation: self.elevation_m,
        }
    }
}
