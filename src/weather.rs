use chrono::{Datelike, Timelike};
use tracing::{debug, warn};

use crate::angles::{deg_to_rad, solar_position};
use crate::error::{Error, Result};
use crate::types::{
    DerivationPolicy, FilledGrid, FilledHour, ObserverLocation, SeriesKind, SunPosition,
    WeatherRow, DHI, DRY_BULB, GHI, HUMIDITY, WIND_DIRECTION, WIND_SPEED,
};

pub const HUMIDITY_GUARD: f64 = 70.0;
pub const MIN_COS_ZENITH: f64 = 0.01;

// Stull (2011), valid near sea-level pressure.
pub fn wet_bulb_temperature(dry_bulb: f64, humidity: f64) -> f64 {
    let (t, rh) = (dry_bulb, humidity);
    t * (0.151977 * (rh + 8.313659).sqrt()).atan() + (t + rh).atan() - (rh - 1.6767331).atan()
        + 0.00391838 * rh.powf(1.5) * (0.023101 * rh).atan()
        - 4.686035
}

pub fn direct_normal_irradiance(ghi: f64, dhi: f64, elevation: f64) -> Result<f64> {
    let zenith = 90.0 - elevation;
    let cos_zenith = deg_to_rad(zenith).cos();
    if cos_zenith < MIN_COS_ZENITH {
        return Err(Error::DivisionNearZero { zenith });
    }
    Ok((ghi - dhi) / cos_zenith)
}

pub fn is_unreliable(sun: &SunPosition, humidity: f64, policy: &DerivationPolicy) -> bool {
    sun.elevation < 0.0
        || !(-HUMIDITY_GUARD..=HUMIDITY_GUARD).contains(&humidity)
        || policy
            .tracker_roll_limit
            .is_some_and(|limit| sun.roll.abs() > limit)
}

pub fn derive_row(
    hour: &FilledHour,
    sun: &SunPosition,
    location: &ObserverLocation,
    policy: &DerivationPolicy,
) -> Result<WeatherRow> {
    let v = &hour.values;
    let expected = SeriesKind::Weather.channels();
    if v.len() != expected {
        return Err(Error::ChannelCount {
            kind: SeriesKind::Weather,
            expected,
            got: v.len(),
        });
    }
    let (dry_bulb, humidity) = (v[DRY_BULB], v[HUMIDITY]);

    let mut wet_bulb = wet_bulb_temperature(dry_bulb, humidity);
    if !wet_bulb.is_finite() {
        warn!(timestamp = %hour.timestamp, humidity, "wet bulb undefined; using dry bulb");
        wet_bulb = dry_bulb;
    }

    let (ghi, dni, dhi) = if is_unreliable(sun, humidity, policy) {
        (0.0, 0.0, 0.0)
    } else {
        let dni = direct_normal_irradiance(v[GHI], v[DHI], sun.elevation).unwrap_or_else(|err| {
            debug!(timestamp = %hour.timestamp, "{err}; reporting zero DNI");
            0.0
        });
        (v[GHI], dni, v[DHI])
    };

    let t = hour.timestamp;
    Ok(WeatherRow {
        year: t.year(),
        month: t.month(),
        day: t.day(),
        hour: t.hour(),
        ghi,
        dni,
        dhi,
        dry_bulb,
        wet_bulb,
        humidity,
        pressure: policy.pressure_mbar,
        wind_speed: v[WIND_SPEED],
        wind_direction: v[WIND_DIRECTION],
        albedo: location.albedo(),
    })
}

pub fn derive(
    grid: &FilledGrid,
    location: &ObserverLocation,
    policy: &DerivationPolicy,
) -> Result<Vec<WeatherRow>> {
    grid.hours
        .iter()
        .map(|hour| {
            let sun = solar_position(location, &hour.timestamp);
            derive_row(hour, &sun, location, policy)
        })
        .collect()
}
