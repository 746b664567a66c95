pub mod aggregate;
pub mod angles;
pub mod config;
pub mod error;
pub mod grid;
pub mod hour_index;
pub mod io;
pub mod pipeline;
pub mod reference;
pub mod types;
pub mod weather;

pub use aggregate::aggregate;

pub use angles::{
    angle_of_incidence, azimuth_elevation, day_of_year, deg_to_rad, leap_year, normalize_angle,
    rad_to_deg, solar_position, tracker_geometry, tracker_roll,
};

pub use config::LocationConfig;

pub use error::{Error, Result};

pub use grid::{fill, reindex, reindex_range, FillPolicy};

pub use hour_index::{hours_in_year, index_of, index_of_str, parse_timestamp};

pub use pipeline::{build_grid, reconcile, Reconciler};

pub use reference::{ReferenceCurve, Resolution};

pub use types::{
    AnnualGrid, DerivationPolicy, FilledGrid, FilledHour, GridEntry, GridPolicy, HourlyBin,
    ObservationWindow, ObserverLocation, Sample, SeriesKind, SiteMetadata, Slot, SunPosition,
    TrackerGeometry, TrackerRow, WeatherFile, WeatherHeader, WeatherRow,
};

pub use weather::{derive, direct_normal_irradiance, wet_bulb_temperature};
