mod cli;

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use cli::{Cli, Commands};
use cropcal::advisory::{collect_advisories, StaticAdvisories};
use cropcal::catalog::validate_crop;
use cropcal::report::{render_calendar, render_calendar_json, render_crop_list};
use cropcal::{
    CalendarComposer, CalendarRequest, Config, CropRegistry, Location, TelemetrySyncService,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.clone()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Crops { json } => {
            let composer = build_composer(&config)?;
            let crops = composer.list_supported_crops();
            if json {
                println!("{}", serde_json::to_string_pretty(&crops)?);
            } else {
                print!("{}", render_crop_list(&crops));
            }
        }
        Commands::Generate {
            crop,
            lat,
            lon,
            area,
            date,
            telemetry,
            json,
        } => {
            let composer = build_composer(&config)?;
            let location = resolve_location(&config, lat, lon)?;
            let Some(area) = area.or(config.defaults.area_hectares) else {
                bail!("No area given: pass --area or set defaults.area_hectares");
            };

            let snapshot = match telemetry {
                Some(path) => TelemetrySyncService::load_snapshot(&path)
                    .with_context(|| format!("Failed to read telemetry from {}", path.display()))?,
                None => TelemetrySyncService::new(&config).fetch(location).await,
            };

            let request = CalendarRequest::new(crop, location, area);
            let now = match date {
                Some(d) => planning_instant(d)?,
                None => Utc::now(),
            };
            let calendar = composer.generate_at(&request, &snapshot, now)?;
            let recommendations = collect_advisories(&calendar, &StaticAdvisories::default());

            if json {
                println!("{}", render_calendar_json(&calendar, &recommendations)?);
            } else {
                print!("{}", render_calendar(&calendar, &recommendations));
            }
        }
        Commands::Check => run_check(&config, cli.config).await?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_composer(config: &Config) -> anyhow::Result<CalendarComposer> {
    let registry = CropRegistry::from_config(&config.catalog).context("Failed to load crop catalog")?;
    Ok(CalendarComposer::new(Arc::new(registry), config.engine))
}

fn resolve_location(config: &Config, lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<Location> {
    match (
        lat.or(config.defaults.latitude),
        lon.or(config.defaults.longitude),
    ) {
        (Some(latitude), Some(longitude)) => Ok(Location::new(latitude, longitude)),
        _ => bail!("No location given: pass --lat/--lon or set defaults.latitude/longitude"),
    }
}

fn planning_instant(date: NaiveDate) -> anyhow::Result<chrono::DateTime<Utc>> {
    let midday = date
        .and_hms_opt(12, 0, 0)
        .context("Invalid planning date")?;
    Ok(midday.and_utc())
}

async fn run_check(config: &Config, config_override: Option<PathBuf>) -> anyhow::Result<()> {
    match config_override {
        Some(path) => println!("Config: {} OK", path.display()),
        None => println!("Config: OK"),
    }
    println!(
        "  planting grace {}d, harvest grace {}d, out-of-season horizon {}d, healthy NDVI {:.2}",
        config.engine.planting_grace_days,
        config.engine.harvest_grace_days,
        config.engine.out_of_season_days,
        config.engine.healthy_ndvi
    );

    let registry = CropRegistry::from_config(&config.catalog).context("Failed to load crop catalog")?;
    println!("Catalog: {} crops", registry.len());
    for crop in registry.iter() {
        let issues = validate_crop(crop);
        if issues.is_empty() {
            println!("  ✓ {}", crop.name);
        } else {
            println!("  ⚠ {}", crop.name);
            for issue in issues {
                println!("      {}", issue);
            }
        }
    }

    let service = TelemetrySyncService::new(config);
    let probe = Location::new(
        config.defaults.latitude.unwrap_or(0.0),
        config.defaults.longitude.unwrap_or(0.0),
    );
    match service.check_connection(probe).await {
        Some(true) => println!("OpenWeatherMap: OK"),
        Some(false) => println!("OpenWeatherMap: FAILED (calendars will use neutral telemetry)"),
        None => println!("OpenWeatherMap: not configured"),
    }

    Ok(())
}
