use chrono::{Duration, NaiveDate};

use solar_series::{
    solar_position, GridPolicy, ObservationWindow, ObserverLocation, Reconciler, Sample,
    SiteMetadata,
};

fn main() -> solar_series::Result<()> {
    let location = ObserverLocation::new(32.1025, -110.8142, -7.0)?
        .with_elevation(8.0)?
        .with_albedo(0.2)?
        .with_metadata(SiteMetadata {
            name: "Tucson".into(),
            source: "field data".into(),
            state: "Arizona".into(),
            country: "USA".into(),
            location_id: "123456".into(),
        });

    let start = NaiveDate::from_ymd_opt(2015, 6, 21)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| solar_series::Error::InvalidInstant("2015-06-21".into()))?;
    let end = start + Duration::hours(23) + Duration::minutes(55);

    // One day of 5-minute weather-station readings.
    let samples: Vec<Sample> = (0..288)
        .map(|i| {
            let t = start + Duration::minutes(5 * i);
            let sun = solar_position(&location, &t);
            let ghi = (1000.0 * solar_series::deg_to_rad(sun.elevation).sin()).max(0.0);
            Sample::new(t, vec![ghi, 0.15 * ghi, 30.0, 20.0, 3.0, 180.0])
        })
        .collect();

    let window = ObservationWindow::new(start, end)?;
    let file = Reconciler::new(&location).weather(&samples, &window, GridPolicy::CalendarYear)?;

    println!("=== Annual Weather File ===");
    println!("Location: {} ({:.4}, {:.4})", file.header.city, file.header.latitude, file.header.longitude);
    println!("Rows: {}", file.rows.len());
    println!();
    println!("--- 2015-06-21 ---");
    for row in file.rows.iter().filter(|r| r.month == 6 && r.day == 21) {
        println!(
            "{:02}:00  GHI {:7.1}  DNI {:7.1}  DHI {:6.1}  Twet {:5.2}",
            row.hour, row.ghi, row.dni, row.dhi, row.wet_bulb
        );
    }
    Ok(())
}
