use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::hour_index::parse_timestamp;
use crate::reference::ReferenceCurve;
use crate::types::{ObserverLocation, Sample, SeriesKind, TrackerRow, WeatherFile, WeatherHeader};

pub const WEATHER_SITE_COLUMNS: [&str; 9] = [
    "Source",
    "Location ID",
    "City",
    "State",
    "Country",
    "Latitude",
    "Longitude",
    "Time Zone",
    "Elevation",
];

pub const WEATHER_DATA_COLUMNS: [&str; 14] = [
    "Year", "Month", "Day", "Hour", "GHI", "DNI", "DHI", "Tdry", "Twet", "RH", "Pres", "Wspd",
    "Wdir", "Albedo",
];

const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_reading(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    field.parse::<f64>().ok()
}

pub fn read_samples<R: Read>(reader: R, kind: SeriesKind) -> Result<Vec<Sample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let expected = kind.channels();
    let mut samples = Vec::new();
    let mut unreadable = 0usize;

    for record in rdr.records() {
        let record = record?;
        let got = record.len().saturating_sub(1);
        if got != expected {
            return Err(Error::ChannelCount {
                kind,
                expected,
                got,
            });
        }
        let timestamp = parse_timestamp(record.get(0).unwrap_or_default())?;
        let values = record
            .iter()
            .skip(1)
            .map(|field| {
                parse_reading(field).unwrap_or_else(|| {
                    unreadable += 1;
                    f64::NAN
                })
            })
            .collect();
        samples.push(Sample::new(timestamp, values));
    }

    if unreadable > 0 {
        warn!(unreadable, "sample readings missing or not numeric");
    }
    debug!(?kind, samples = samples.len(), "read samples");
    Ok(samples)
}

pub fn read_samples_path(path: impl AsRef<Path>, kind: SeriesKind) -> Result<Vec<Sample>> {
    read_samples(File::open(path)?, kind)
}

pub fn samples_to_local(samples: Vec<Sample>, location: &ObserverLocation) -> Vec<Sample> {
    samples
        .into_iter()
        .map(|s| Sample::new(location.to_local(s.timestamp), s.values))
        .collect()
}

pub fn read_reference_curve<R: Read>(reader: R) -> Result<ReferenceCurve> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let field = record.get(1).or_else(|| record.get(0)).unwrap_or_default();
        let value = parse_reading(field).ok_or_else(|| Error::InvalidReferenceValue {
            line: line + 1,
            value: field.to_string(),
        })?;
        values.push(value);
    }
    ReferenceCurve::from_values(values)
}

pub fn read_reference_curve_path(path: impl AsRef<Path>) -> Result<ReferenceCurve> {
    read_reference_curve(File::open(path)?)
}

fn writer<W: Write>(w: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(w)
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

fn site_record(header: &WeatherHeader) -> [String; 9] {
    [
        header.source.clone(),
        header.location_id.clone(),
        header.city.clone(),
        header.state.clone(),
        header.country.clone(),
        header.latitude.to_string(),
        header.longitude.to_string(),
        format_number(header.time_zone),
        format_number(header.elevation),
    ]
}

pub fn write_tracker_rows<W: Write>(w: W, rows: &[TrackerRow]) -> Result<()> {
    let mut wtr = writer(w);
    for row in rows {
        wtr.write_record([
            row.timestamp.format(TIMESTAMP_OUTPUT_FORMAT).to_string(),
            row.angle.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_weather_file<W: Write>(w: W, file: &WeatherFile) -> Result<()> {
    let mut wtr = writer(w);
    wtr.write_record(WEATHER_SITE_COLUMNS)?;
    wtr.write_record(site_record(&file.header))?;
    wtr.write_record(WEATHER_DATA_COLUMNS)?;
    for row in &file.rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_tracker_rows_path(path: impl AsRef<Path>, rows: &[TrackerRow]) -> Result<()> {
    write_tracker_rows(File::create(path)?, rows)
}

pub fn write_weather_file_path(path: impl AsRef<Path>, file: &WeatherFile) -> Result<()> {
    write_weather_file(File::create(path)?, file)
}
