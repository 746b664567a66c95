use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;

use solar_series::io::{
    read_reference_curve_path, read_samples_path, samples_to_local, write_tracker_rows_path,
    write_weather_file_path,
};
use solar_series::{
    parse_timestamp, DerivationPolicy, GridPolicy, ObservationWindow, ObserverLocation,
    Reconciler, ReferenceCurve, SeriesKind,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hourly annual series for solar simulation tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an hourly tracker-angle file from field angle samples
    Angles(AnglesArgs),
    /// Build an hourly weather file from weather-station samples
    Weather(WeatherArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Site description (JSON)
    #[arg(long, value_hint = ValueHint::FilePath)]
    site: PathBuf,

    /// Sample CSV: header row, timestamp column, then channel columns
    #[arg(long, value_hint = ValueHint::FilePath)]
    samples: PathBuf,

    /// Window start, local time (e.g. "2015-03-10 07:00")
    #[arg(long)]
    start: String,

    /// Window end, local time
    #[arg(long)]
    end: String,

    /// Hourly grid to produce
    #[arg(long, value_enum, default_value_t = GridOpt::Year)]
    grid: GridOpt,

    /// Sample timestamps are UTC and must be shifted to local time
    #[arg(long, action = ArgAction::SetTrue)]
    utc_input: bool,

    /// Output CSV path (defaults to a name derived from the site and window)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct AnglesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Fallback angle curve (365 daily or 8760 hourly values, second column)
    #[arg(long, value_hint = ValueHint::FilePath)]
    reference: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct WeatherArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Zero irradiance when the ideal tracker roll exceeds this many degrees
    #[arg(long)]
    roll_limit: Option<f64>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum GridOpt {
    /// Every hour of the window's calendar year
    Year,
    /// Only the hours between start and end
    Range,
}

impl From<GridOpt> for GridPolicy {
    fn from(opt: GridOpt) -> Self {
        match opt {
            GridOpt::Year => GridPolicy::CalendarYear,
            GridOpt::Range => GridPolicy::ExactRange,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = match &cli.command {
        Command::Angles(args) => args.common.verbose,
        Command::Weather(args) => args.common.verbose,
    };
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Angles(args) => handle_angles(args),
        Command::Weather(args) => handle_weather(args),
    }
}

struct Prepared {
    location: ObserverLocation,
    window: ObservationWindow,
    grid: GridPolicy,
    samples: Vec<solar_series::Sample>,
}

fn prepare(common: &CommonArgs, kind: SeriesKind) -> Result<Prepared> {
    let location = ObserverLocation::from_config_file(&common.site)
        .with_context(|| format!("failed to load site {}", common.site.display()))?;
    let window = ObservationWindow::new(
        parse_timestamp(&common.start).context("invalid --start")?,
        parse_timestamp(&common.end).context("invalid --end")?,
    )?;
    let grid = GridPolicy::from(common.grid);
    if grid == GridPolicy::CalendarYear {
        window.calendar_year()?;
    }

    let mut samples = read_samples_path(&common.samples, kind)
        .with_context(|| format!("failed to read samples {}", common.samples.display()))?;
    if common.utc_input {
        samples = samples_to_local(samples, &location);
    }
    let read = samples.len();
    samples.retain(|s| window.contains(&s.timestamp));
    let (utc_start, utc_end) = window.utc_bounds(&location);
    info!(read, in_window = samples.len(), %utc_start, %utc_end, "loaded samples");

    Ok(Prepared {
        location,
        window,
        grid,
        samples,
    })
}

fn window_stamp(window: &ObservationWindow, grid: GridPolicy) -> String {
    match grid {
        GridPolicy::CalendarYear => window.start().year().to_string(),
        GridPolicy::ExactRange => format!(
            "({} - {})",
            window.start().format("%m%d%y%H"),
            window.end().format("%m%d%y%H")
        ),
    }
}

fn output_path(explicit: &Option<PathBuf>, default_name: String) -> PathBuf {
    explicit
        .clone()
        .unwrap_or_else(|| Path::new(".").join(default_name))
}

fn handle_angles(args: AnglesArgs) -> Result<()> {
    let p = prepare(&args.common, SeriesKind::TrackerAngle)?;
    let curve = match &args.reference {
        Some(path) => read_reference_curve_path(path)
            .with_context(|| format!("failed to load reference curve {}", path.display()))?,
        None => {
            info!("no reference curve supplied; using idealized tracker angles");
            ReferenceCurve::idealized_tracker(&p.location, p.window.start().year())
        }
    };

    let rows = Reconciler::new(&p.location).tracker_angles(&p.samples, &p.window, p.grid, &curve)?;

    let meta = p.location.metadata();
    let path = output_path(
        &args.common.output,
        format!(
            "Angles at {}({})_{}.csv",
            meta.name,
            meta.location_id,
            window_stamp(&p.window, p.grid)
        ),
    );
    write_tracker_rows_path(&path, &rows)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(rows = rows.len(), "Wrote tracker angles: {}", path.display());
    Ok(())
}

fn handle_weather(args: WeatherArgs) -> Result<()> {
    let p = prepare(&args.common, SeriesKind::Weather)?;
    let policy = DerivationPolicy {
        tracker_roll_limit: args.roll_limit,
        ..DerivationPolicy::default()
    };

    let file = Reconciler::new(&p.location)
        .with_policy(policy)
        .weather(&p.samples, &p.window, p.grid)?;

    let meta = p.location.metadata();
    let path = output_path(
        &args.common.output,
        format!(
            "{}({})_{}.csv",
            meta.name,
            meta.location_id,
            window_stamp(&p.window, p.grid)
        ),
    );
    write_weather_file_path(&path, &file)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(rows = file.rows.len(), "Wrote weather file: {}", path.display());
    Ok(())
}
