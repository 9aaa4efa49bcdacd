//! Impact Sim - Asteroid Impact Effect Estimator
//!
//! Command-line front end: estimate impact effects directly, list the
//! near-Earth object catalog, or simulate an impact at a map location.

use std::error::Error;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use impact_sim::catalog::{CatalogSource, CatalogState, FileCatalog, NeoWsClient};
use impact_sim::config::SimConfig;
use impact_sim::effects::{ImpactEffects, NoEffects, TracingEffects};
use impact_sim::impact::estimate;
use impact_sim::simulation::{ImpactReport, PanelText, Simulator};
use impact_sim::types::LatLng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Asteroid impact effect estimator")]
struct Args {
    /// NeoWs API key (default: $NASA_API_KEY or DEMO_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Catalog endpoint (default: $NEO_CATALOG_URL or NASA's neo/browse)
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// RNG seed for velocities and random locations (default: $IMPACT_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Don't log sound/visual effect cues
    #[arg(long, global = true)]
    quiet_effects: bool,

    #[command(subcommand)]
    command: Command,
}

/// Where to read the catalog from, and how to print results.
#[derive(ClapArgs, Debug)]
struct SimArgs {
    /// Catalog id of the asteroid (default: first in catalog)
    #[arg(long)]
    asteroid: Option<String>,

    /// Read a saved neo/browse response instead of calling the API
    #[arg(long)]
    file: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate impact effects from diameter and velocity
    Estimate {
        /// Asteroid diameter (meters)
        #[arg(long)]
        diameter: f64,

        /// Impact velocity (km/s)
        #[arg(long)]
        velocity: f64,

        /// Print full-precision JSON
        #[arg(long)]
        json: bool,
    },

    /// List near-Earth objects in the catalog
    Catalog {
        /// Read a saved neo/browse response instead of calling the API
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Simulate an impact at a map location
    Simulate {
        /// Latitude (degrees)
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude (degrees)
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Fixed impact velocity (km/s) instead of a random one
        #[arg(long)]
        velocity: Option<f64>,

        #[command(flatten)]
        sim: SimArgs,
    },

    /// Simulate an impact at a random location
    Random {
        #[command(flatten)]
        sim: SimArgs,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = SimConfig::from_env()?;
    if let Some(key) = args.api_key {
        config.api_key = key;
    }
    if let Some(url) = args.catalog_url {
        config.catalog_url = url;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    match args.command {
        Command::Estimate {
            diameter,
            velocity,
            json,
        } => {
            let result = estimate(diameter, velocity)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let d = result.display();
                println!("Energy (Mt):        {}", d.energy);
                println!("Crater (m):         {}", d.crater);
                println!("Shockwave (m):      {}", d.shock);
                println!("Seismic:            {}", d.seismic);
                println!("Global effect:      {}", d.global);
            }
        }
        Command::Catalog { file } => {
            let state = load_catalog(&config, file)?;
            match state.catalog() {
                Some(catalog) => {
                    for record in catalog.records() {
                        println!(
                            "{}\t{}\t{:.0} m{}",
                            record.id,
                            record.name,
                            record.max_diameter_m(),
                            if record.is_potentially_hazardous_asteroid {
                                "\thazardous"
                            } else {
                                ""
                            }
                        );
                    }
                }
                None => {
                    for option in state.options() {
                        println!("{}", option.label);
                    }
                }
            }
        }
        Command::Simulate {
            lat,
            lng,
            velocity,
            sim,
        } => {
            let at = LatLng::new(lat, lng);
            run_simulation(&config, args.quiet_effects, sim, |s| match velocity {
                Some(v) => s.simulate_with_velocity(at, v),
                None => s.simulate(at),
            })?;
        }
        Command::Random { sim } => {
            run_simulation(&config, args.quiet_effects, sim, |s| s.random_impact())?;
        }
    }

    Ok(())
}

fn load_catalog(
    config: &SimConfig,
    file: Option<PathBuf>,
) -> Result<CatalogState, Box<dyn Error>> {
    let source: Box<dyn CatalogSource> = match file {
        Some(path) => Box::new(FileCatalog::new(path)),
        None => Box::new(NeoWsClient::new(config)?),
    };
    Ok(CatalogState::load(source.as_ref()))
}

fn run_simulation(
    config: &SimConfig,
    quiet_effects: bool,
    sim: SimArgs,
    run: impl FnOnce(
        &mut Simulator<Box<dyn ImpactEffects>>,
    ) -> Result<ImpactReport, impact_sim::simulation::SimulationError>,
) -> Result<(), Box<dyn Error>> {
    let state = load_catalog(config, sim.file)?;
    let effects: Box<dyn ImpactEffects> = if quiet_effects {
        Box::new(NoEffects)
    } else {
        Box::new(TracingEffects)
    };

    let mut simulator = Simulator::new(config.clone(), state, effects)?;
    if let Some(id) = sim.asteroid {
        simulator.select(&id)?;
    }

    let report = run(&mut simulator)?;
    if sim.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_panel(&report.panel());
        if let Some(view) = report.view {
            println!("Recenter map:       {} (zoom {})", view.center.display(), view.zoom);
        }
    }
    Ok(())
}

fn print_panel(panel: &PanelText) {
    println!("Asteroid:           {}", panel.name);
    println!("Location:           {}", panel.location);
    println!("Diameter (m):       {}", panel.diameter);
    println!("Velocity (km/s):    {}", panel.velocity);
    println!("Energy (Mt):        {}", panel.energy);
    println!("Crater (m):         {}", panel.crater);
    println!("Shockwave (m):      {}", panel.shock);
    println!("Seismic:            {}", panel.seismic);
    println!("Global effect:      {}", panel.global);
}
