use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::trace;

use crate::error::{Error, Result};
use crate::types::{ObserverLocation, SunPosition, TrackerGeometry};

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_year(year: i32) -> u32 {
    if leap_year(year) {
        366
    } else {
        365
    }
}

pub fn days_in_months(year: i32) -> [u32; 12] {
    [
        31,
        if leap_year(year) { 29 } else { 28 },
        31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
    ]
}

pub fn day_of_year(year: i32, month: u32, day: u32) -> i32 {
    let dim = days_in_months(year);
    let sum: u32 = dim[..(month - 1) as usize].iter().sum();
    (sum + day) as i32
}

pub fn intermediate_angle_b(n: i32) -> f64 {
    deg_to_rad((n - 1) as f64 * (360.0 / 365.0))
}

pub fn equation_of_time(n: i32) -> f64 {
    let b = intermediate_angle_b(n);
    229.18
        * (0.000075
            + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

pub fn utc_lst_correction(longitude: f64, eot: f64) -> f64 {
    (4.0 * longitude + eot) / 60.0
}

pub fn hour_angle(local_solar_time: f64) -> f64 {
    DEGREES_PER_HOUR * (local_solar_time - 12.0)
}

pub fn solar_declination(n: i32) -> f64 {
    EARTH_AXIAL_TILT * deg_to_rad(360.0 * ((284 + n) as f64 / 365.0)).sin()
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let cos_zenith =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(cos_zenith.clamp(-1.0, 1.0).acos())
}

pub fn solar_altitude(zenith_angle: f64) -> f64 {
    90.0 - zenith_angle
}

pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_az = -dec_rad.cos() * ha_rad.sin();
    let cos_az = dec_rad.sin() * lat_rad.cos() - dec_rad.cos() * lat_rad.sin() * ha_rad.cos();
    let az_rad = sin_az.atan2(cos_az);
    normalize_angle(rad_to_deg(az_rad))
}

pub fn azimuth_elevation(latitude: f64, longitude: f64, utc: &NaiveDateTime) -> (f64, f64) {
    let utc_hours = utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
    let n = day_of_year(utc.year(), utc.month(), utc.day());
    let eot = equation_of_time(n);
    let decl = solar_declination(n);
    let lst = (utc_hours + utc_lst_correction(longitude, eot)).rem_euclid(24.0);
    let ha = hour_angle(lst);
    let zenith = solar_zenith_angle(latitude, decl, ha);
    (solar_azimuth(latitude, decl, ha), solar_altitude(zenith))
}

/// Rotation of an ideal north-south horizontal single-axis tracker, rounded
/// to two decimals. Positive rolls tilt the module toward the east.
pub fn tracker_roll(azimuth: f64, elevation: f64) -> f64 {
    let roll = rad_to_deg((deg_to_rad(azimuth).sin() / deg_to_rad(elevation).tan()).atan());
    (roll * 100.0).round() / 100.0
}

/// Angle between the module normal at `roll` and the sun. Negated while the
/// sun sits in the northern half of the sky (azimuth < 90 or > 270).
pub fn angle_of_incidence(azimuth: f64, elevation: f64, roll: f64) -> f64 {
    let (az, el, r) = (deg_to_rad(azimuth), deg_to_rad(elevation), deg_to_rad(roll));
    let n_track = [r.sin(), r.cos(), 0.0];
    let n_sun = [el.cos() * az.sin(), el.sin(), el.cos() * az.cos()];
    let dot: f64 = n_track.iter().zip(n_sun.iter()).map(|(a, b)| a * b).sum();
    let aoi = rad_to_deg(dot.clamp(-1.0, 1.0).acos());
    if azimuth < 90.0 || azimuth > 270.0 {
        -aoi
    } else {
        aoi
    }
}

pub fn tracker_geometry(azimuth: f64, elevation: f64) -> Result<TrackerGeometry> {
    let roll = tracker_roll(azimuth, elevation);
    let aoi = angle_of_incidence(azimuth, elevation, roll);
    if roll.is_finite() && aoi.is_finite() {
        Ok(TrackerGeometry { roll, aoi })
    } else {
        Err(Error::DegenerateGeometry { azimuth, elevation })
    }
}

pub fn solar_position(location: &ObserverLocation, local: &NaiveDateTime) -> SunPosition {
    let utc = location.to_utc(*local);
    let (azimuth, elevation) = azimuth_elevation(location.latitude(), location.longitude(), &utc);
    let TrackerGeometry { roll, aoi } = tracker_geometry(azimuth, elevation).unwrap_or_else(|err| {
        trace!(%local, "{err}; stowing flat");
        TrackerGeometry {
            roll: 0.0,
            aoi: angle_of_incidence(azimuth, elevation, 0.0),
        }
    });
    SunPosition {
        utc,
        azimuth,
        elevation,
        roll,
        aoi,
    }
}
