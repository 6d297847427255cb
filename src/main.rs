use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;

use sat_footprint::catalog::{Catalog, CountryAtlas};
use sat_footprint::coverage::{sweep, CoverageFilter, SweepRequest, TargetSpec};
use sat_footprint::geometry::{slant_ground_distance_km, GroundPoint, LookAngles};
use sat_footprint::solver::{AzimuthReference, LocationFix, SolverKind};
use sat_footprint::web::{self, AppState, Config};
use sat_footprint::CoverageComposer;

#[derive(Parser)]
#[command(name = "sat-footprint")]
#[command(about = "Geostationary satellite look angles and coverage areas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the ground point that sees a satellite at the given look angles
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        azimuth: f64,
        #[arg(long, allow_negative_numbers = true)]
        elevation: f64,
        /// Satellite orbital longitude, degrees east
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        #[arg(long, value_enum, default_value_t = SolverKind::Grid)]
        solver: SolverKind,
        #[arg(long, value_enum, default_value_t = AzimuthReference::Geographic)]
        reference: AzimuthReference,
    },
    /// Distance from the sub-satellite point at which the satellite sits at
    /// the given elevation
    Radius {
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        elevation: f64,
    },
    /// Serviceable area of catalog satellites
    Coverage {
        #[arg(long)]
        config: String,
        #[arg(long)]
        satellite: Option<String>,
        /// "min-max" or a single value
        #[arg(long, default_value = "")]
        azimuth: String,
        /// "min-max" or a single value
        #[arg(long, default_value = "")]
        elevation: String,
        /// Repeatable; every catalog band when omitted
        #[arg(long = "band")]
        bands: Vec<String>,
        /// Repeatable
        #[arg(long = "country")]
        countries: Vec<String>,
        /// Ground station as "lat, lon"
        #[arg(long, allow_hyphen_values = true)]
        station: Option<String>,
    },
    /// Validate a configuration file and the data it points to
    Validate {
        #[arg(long)]
        config: String,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        config: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Locate {
            azimuth,
            elevation,
            longitude,
            solver,
            reference,
        } => locate(
            LookAngles::new(azimuth, elevation),
            longitude,
            solver,
            reference,
        ),
        Commands::Radius {
            longitude,
            elevation,
        } => radius(longitude, elevation),
        Commands::Coverage {
            config,
            satellite,
            azimuth,
            elevation,
            bands,
            countries,
            station,
        } => coverage(
            &config,
            satellite,
            &azimuth,
            &elevation,
            CoverageFilter { bands, countries },
            station.as_deref(),
        ),
        Commands::Validate { config } => validate(&config),
        Commands::Serve { config } => serve(&config),
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &str) -> Option<Config> {
    match Config::from_file(path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            None
        }
    }
}

fn load_data(config: &Config) -> Option<(Catalog, CountryAtlas)> {
    let catalog = match Catalog::load(&config.catalog) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading catalog {}: {}", config.catalog.display(), e);
            return None;
        }
    };
    let atlas = match CountryAtlas::load(&config.countries) {
        Ok(a) => a,
        Err(e) => {
            eprintln!(
                "Error loading countries {}: {}",
                config.countries.display(),
                e
            );
            return None;
        }
    };
    Some((catalog, atlas))
}

#[derive(Serialize)]
struct LocateOutput {
    #[serde(flatten)]
    fix: LocationFix,
    visible: bool,
}

fn locate(
    target: LookAngles,
    longitude: f64,
    solver: SolverKind,
    reference: AzimuthReference,
) -> ExitCode {
    log::debug!("Resolving {:?} with {} solver", target, solver);
    let point = solver.build(reference).resolve(target, longitude);
    let fix = LocationFix::evaluate(point, longitude);
    if !fix.is_visible() {
        eprintln!("Warning: satellite is below the horizon at the resolved point");
    }
    print_json(&LocateOutput {
        visible: fix.is_visible(),
        fix,
    })
}

#[derive(Serialize)]
struct RadiusOutput {
    longitude: f64,
    elevation: f64,
    radius_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    slant_ground_distance_km: Option<f64>,
}

fn radius(longitude: f64, elevation: f64) -> ExitCode {
    if !(0.0..=90.0).contains(&elevation) {
        eprintln!("Elevation must be within [0, 90], got {}", elevation);
        return ExitCode::FAILURE;
    }
    let radius_km = CoverageComposer::default().visibility_radius_km(longitude, elevation);
    print_json(&RadiusOutput {
        longitude,
        elevation,
        radius_km,
        slant_ground_distance_km: slant_ground_distance_km(elevation).ok(),
    })
}

fn coverage(
    config: &str,
    satellite: Option<String>,
    azimuth: &str,
    elevation: &str,
    filter: CoverageFilter,
    station: Option<&str>,
) -> ExitCode {
    let Some(config) = load_config(config) else {
        return ExitCode::FAILURE;
    };
    let Some((catalog, atlas)) = load_data(&config) else {
        return ExitCode::FAILURE;
    };

    if let Some(name) = &satellite {
        if let Err(e) = catalog.find(name) {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    let target = match TargetSpec::parse(azimuth, elevation) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let station = match station.map(|s| (s, GroundPoint::from_coordinates(s))) {
        Some((_, Some(point))) => Some(point),
        Some((text, None)) => {
            eprintln!("Invalid station coordinates: {}", text);
            return ExitCode::FAILURE;
        }
        None => None,
    };

    let request = SweepRequest {
        satellite,
        target,
        filter: filter.with_default_bands(&catalog),
        station,
    };
    let results = sweep(&config.composer(), &catalog, &atlas, &request);
    print_json(&results)
}

fn validate(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };
    let Some((catalog, atlas)) = load_data(&config) else {
        return ExitCode::FAILURE;
    };

    println!(
        "Configuration is valid ({} solver, {} azimuth)",
        config.solver.strategy, config.solver.azimuth_reference
    );
    for (group, satellites) in &catalog.groups {
        println!("  {}: {} satellites", group, satellites.len());
        for satellite in satellites {
            let bands: Vec<&str> = satellite.bands.keys().map(String::as_str).collect();
            println!(
                "    {} @ {} [{}]",
                satellite.name,
                satellite.orbital_longitude,
                bands.join(", ")
            );
        }
    }
    println!("  {} countries", atlas.len());
    ExitCode::SUCCESS
}

fn serve(path: &str) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };
    let state = match AppState::load(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading data: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(state)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
