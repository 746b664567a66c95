use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};

use solar_series::reference::*;
use solar_series::{Error, ObserverLocation};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn ramp(n: usize) -> ReferenceCurve {
    ReferenceCurve::from_values((0..n).map(|i| i as f64).collect()).unwrap()
}

static TUCSON_2015: LazyLock<ReferenceCurve> = LazyLock::new(|| {
    let loc = ObserverLocation::new(32.1025, -110.8142, -7.0).unwrap();
    ReferenceCurve::idealized_tracker(&loc, 2015)
});

// ── Sizes ──

#[test]
fn test_accepted_sizes() {
    assert_eq!(ramp(365).resolution(), Resolution::Daily);
    assert_eq!(ramp(366).resolution(), Resolution::Daily);
    assert_eq!(ramp(8760).resolution(), Resolution::Hourly);
    assert_eq!(ramp(8784).resolution(), Resolution::Hourly);
}

#[test]
fn test_rejected_sizes() {
    for n in [0, 24, 364, 367, 8759, 8761] {
        let err = ReferenceCurve::from_values(vec![0.0; n]).unwrap_err();
        assert!(matches!(err, Error::ReferenceCurveSize(got) if got == n));
    }
}

// ── Lookup ──

#[test]
fn test_daily_value_broadcast_across_day() {
    let curve = ramp(365);
    for h in 0..24 {
        assert_eq!(curve.value_at(&at(2015, 2, 1, h)), 31.0);
    }
    assert_eq!(curve.value_at(&at(2015, 1, 1, 0)), 0.0);
    assert_eq!(curve.value_at(&at(2015, 12, 31, 23)), 364.0);
}

#[test]
fn test_daily_curve_folds_leap_day() {
    let curve = ramp(365);
    assert_eq!(curve.value_at(&at(2016, 2, 28, 5)), 58.0);
    assert_eq!(curve.value_at(&at(2016, 2, 29, 5)), 58.0);
    assert_eq!(curve.value_at(&at(2016, 3, 1, 5)), 59.0);
    assert_eq!(curve.value_at(&at(2016, 12, 31, 23)), 364.0);
}

#[test]
fn test_leap_sized_curves_index_directly() {
    assert_eq!(ramp(366).value_at(&at(2016, 12, 31, 0)), 365.0);
    assert_eq!(ramp(366).value_at(&at(2016, 2, 29, 0)), 59.0);
    assert_eq!(ramp(8784).value_at(&at(2016, 12, 31, 23)), 8783.0);
}

#[test]
fn test_hourly_lookup() {
    let curve = ramp(8760);
    assert_eq!(curve.value_at(&at(2015, 1, 2, 3)), 27.0);
    assert_eq!(curve.value_at(&at(2015, 12, 31, 23)), 8759.0);
    assert_eq!(curve.value_at(&at(2016, 3, 1, 0)), (59 * 24) as f64);
    assert_eq!(curve.value_at(&at(2016, 12, 31, 23)), 8759.0);
}

#[test]
fn test_lookup_is_deterministic() {
    let curve = ramp(365);
    let t = at(2015, 7, 4, 10);
    assert_eq!(curve.value_at(&t), curve.value_at(&t));
}

// ── doy_to_month_day ──

#[test]
fn test_doy_boundary_days() {
    assert_eq!(doy_to_month_day(2026, 1), (1, 1));
    assert_eq!(doy_to_month_day(2026, 60), (3, 1));
    assert_eq!(doy_to_month_day(2024, 60), (2, 29));
    assert_eq!(doy_to_month_day(2026, 365), (12, 31));
    assert_eq!(doy_to_month_day(2024, 366), (12, 31));
}

// ── Idealized tracker curve ──

#[test]
fn test_idealized_curve_sizes() {
    assert_eq!(TUCSON_2015.len(), 8760);
    assert_eq!(TUCSON_2015.resolution(), Resolution::Hourly);
    let loc = ObserverLocation::new(32.1025, -110.8142, -7.0).unwrap();
    assert_eq!(ReferenceCurve::idealized_tracker(&loc, 2016).len(), 8784);
}

#[test]
fn test_idealized_curve_stows_at_night() {
    for day in [1, 100, 200, 300] {
        let midnight = (day - 1) * 24;
        assert_eq!(TUCSON_2015.values()[midnight], 0.0, "day {}", day);
    }
}

#[test]
fn test_idealized_curve_tracks_the_sun() {
    assert!(TUCSON_2015.value_at(&at(2015, 6, 21, 9)) > 0.0);
    assert!(TUCSON_2015.value_at(&at(2015, 6, 21, 15)) < 0.0);
    assert!(TUCSON_2015.values().iter().all(|v| v.is_finite() && v.abs() <= 90.0));
}
