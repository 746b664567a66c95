use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::America::Phoenix;

use solar_series::angles::*;
use solar_series::{Error, ObserverLocation};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn springfield() -> ObserverLocation {
    ObserverLocation::new(39.8, -89.6, -6.0).unwrap()
}

fn tucson() -> ObserverLocation {
    ObserverLocation::new(32.1025, -110.8142, -7.0).unwrap()
}

// ── DayOfYear ──

#[test]
fn test_day_of_year_known_dates() {
    assert_eq!(day_of_year(2026, 1, 1), 1);
    assert_eq!(day_of_year(2026, 3, 21), 80);
    assert_eq!(day_of_year(2026, 12, 31), 365);
}

#[test]
fn test_day_of_year_leap_year() {
    assert_eq!(day_of_year(2024, 2, 29), 60);
    assert_eq!(day_of_year(2024, 3, 1), 61);
    assert_eq!(day_of_year(2024, 12, 31), 366);
}

#[test]
fn test_day_of_year_century_leap_rules() {
    assert_eq!(day_of_year(2000, 2, 29), 60);
    assert_eq!(day_of_year(1900, 2, 28), 59);
    assert!(!leap_year(1900));
    assert!(leap_year(2000));
    assert_eq!(days_in_year(2015), 365);
    assert_eq!(days_in_year(2016), 366);
}

// ── NormalizeAngle ──

#[test]
fn test_normalize_angle_basic() {
    let cases: &[(f64, f64)] = &[
        (0.0, 0.0),
        (360.0, 0.0),
        (-1.0, 359.0),
        (-90.0, 270.0),
        (405.0, 45.0),
    ];
    for &(input, expected) in cases {
        assert_approx!(normalize_angle(input), expected, 0.1);
    }
}

// ── SolarDeclination ──

#[test]
fn test_solar_declination_solstices_equinoxes() {
    assert_approx!(solar_declination(172), 23.45, 0.5);
    assert_approx!(solar_declination(355), -23.45, 0.5);
    assert_approx!(solar_declination(80), 0.0, 1.0);
}

// ── Azimuth / elevation ──

#[test]
fn test_springfield_equinox_noon() {
    let pos = solar_position(&springfield(), &at(2026, 3, 21, 12, 0));
    assert_approx!(pos.elevation, 50.0, 2.0);
    assert!(
        pos.azimuth >= 174.0 && pos.azimuth <= 185.0,
        "azimuth={}",
        pos.azimuth
    );
}

#[test]
fn test_summer_higher_than_winter() {
    let summer = solar_position(&springfield(), &at(2026, 6, 21, 12, 0));
    let winter = solar_position(&springfield(), &at(2026, 12, 21, 12, 0));
    assert!(summer.elevation > 50.0, "summer={}", summer.elevation);
    assert!(winter.elevation < 50.0, "winter={}", winter.elevation);
}

#[test]
fn test_midnight_below_horizon() {
    let pos = solar_position(&tucson(), &at(2015, 6, 21, 0, 0));
    assert!(pos.elevation < 0.0);
    assert!(pos.roll.is_finite());
    assert!(pos.aoi.is_finite());
}

#[test]
fn test_azimuth_elevation_direct() {
    let utc = at(2026, 3, 21, 18, 0);
    let (az, el) = azimuth_elevation(39.8, -89.6, &utc);
    let pos = solar_position(&springfield(), &at(2026, 3, 21, 12, 0));
    assert_approx!(az, pos.azimuth, 1e-9);
    assert_approx!(el, pos.elevation, 1e-9);
}

// ── Local to UTC ──

#[test]
fn test_position_reports_utc_instant() {
    let pos = solar_position(&tucson(), &at(2015, 6, 21, 12, 0));
    assert_eq!(pos.utc, at(2015, 6, 21, 19, 0));
}

#[test]
fn test_fixed_offset_matches_phoenix_zone() {
    let local = at(2015, 7, 4, 13, 30);
    let expected = Phoenix
        .from_local_datetime(&local)
        .single()
        .unwrap()
        .naive_utc();
    assert_eq!(tucson().to_utc(local), expected);
    assert_eq!(tucson().to_local(expected), local);
}

#[test]
fn test_dst_flag_adds_an_hour() {
    let pacific = ObserverLocation::new(37.39, -122.05, -8.0)
        .unwrap()
        .with_dst(true);
    assert_approx!(pacific.effective_offset_hours(), -7.0, 1e-12);
    assert_eq!(pacific.to_utc(at(2015, 7, 1, 12, 0)), at(2015, 7, 1, 19, 0));
}

// ── Tracker roll ──

#[test]
fn test_roll_formula() {
    assert_approx!(tracker_roll(90.0, 45.0), 45.0, 1e-9);
    assert_approx!(tracker_roll(270.0, 45.0), -45.0, 1e-9);
    assert_approx!(tracker_roll(60.0, 30.0), 56.31, 1e-9);
    assert_eq!(tracker_roll(180.0, 30.0), 0.0);
}

#[test]
fn test_roll_rounded_to_two_decimals() {
    for &(az, el) in &[(100.0, 20.0), (123.4, 56.7), (250.0, 10.0)] {
        let roll = tracker_roll(az, el);
        assert_approx!(roll * 100.0, (roll * 100.0).round(), 1e-6);
    }
}

#[test]
fn test_roll_near_zero_at_noon() {
    let pos = solar_position(&springfield(), &at(2026, 3, 21, 12, 0));
    assert_approx!(pos.roll, 0.0, 5.0);
}

#[test]
fn test_roll_positive_morning_negative_afternoon() {
    assert!(solar_position(&springfield(), &at(2026, 3, 21, 9, 0)).roll > 0.0);
    assert!(solar_position(&springfield(), &at(2026, 3, 21, 15, 0)).roll < 0.0);
}

// ── Angle of incidence ──

#[test]
fn test_aoi_magnitude() {
    let roll = tracker_roll(60.0, 30.0);
    assert_approx!(angle_of_incidence(60.0, 30.0, roll), -25.66, 0.05);
    let roll = tracker_roll(120.0, 30.0);
    assert_approx!(angle_of_incidence(120.0, 30.0, roll), 25.66, 0.05);
}

#[test]
fn test_aoi_sign_by_quadrant() {
    let sign = |az: f64| {
        let g = tracker_geometry(az, 30.0).unwrap();
        g.aoi
    };
    assert!(sign(60.0) < 0.0);
    assert!(sign(120.0) > 0.0);
    assert!(sign(240.0) > 0.0);
    assert!(sign(300.0) < 0.0);
}

#[test]
fn test_aoi_sign_flips_at_boundaries() {
    let aoi = |az: f64| angle_of_incidence(az, 30.0, tracker_roll(az, 30.0));
    assert!(aoi(89.0) < 0.0);
    assert!(aoi(91.0) > 0.0);
    assert!(aoi(90.0) >= 0.0);
    assert!(aoi(269.0) > 0.0);
    assert!(aoi(270.0) >= 0.0);
    assert!(aoi(271.0) < 0.0);
}

#[test]
fn test_aoi_sign_from_real_sky() {
    // Tucson midsummer: sun rises north of east.
    let dawn = solar_position(&tucson(), &at(2015, 6, 21, 6, 0));
    assert!(dawn.azimuth < 90.0);
    assert!(dawn.aoi < 0.0);
    let noon = solar_position(&tucson(), &at(2015, 6, 21, 12, 0));
    assert!(noon.azimuth > 90.0 && noon.azimuth < 270.0);
    assert!(noon.aoi > 0.0);
}

#[test]
fn test_degenerate_geometry() {
    let err = tracker_geometry(0.0, 0.0).unwrap_err();
    assert!(matches!(err, Error::DegenerateGeometry { .. }));
}

#[test]
fn test_extreme_but_finite_geometry_near_horizon() {
    let g = tracker_geometry(90.0, 0.0).unwrap();
    assert_approx!(g.roll, 90.0, 1e-9);
    assert!(g.aoi.is_finite());
}
