use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropcal",
    version,
    about = "Crop calendar generator: dated, area-scaled growth schedules"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported crops
    Crops {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Generate a crop calendar for a field
    Generate {
        /// Crop name or alias, e.g. "wheat" or "paddy"
        #[arg(long)]
        crop: String,

        /// Field latitude (defaults.latitude in config)
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Field longitude (defaults.longitude in config)
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Cultivated area in hectares (defaults.area_hectares in config)
        #[arg(long)]
        area: Option<f64>,

        /// Plan as if today were this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Read telemetry from a JSON snapshot instead of the weather provider
        #[arg(long)]
        telemetry: Option<PathBuf>,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
    /// Validate config and catalog, and test the weather provider
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "cropcal", "generate", "--crop", "wheat", "--lat", "-33.9", "--lon", "18.4",
            "--area", "2", "--date", "2025-09-20", "-v",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Generate {
                crop,
                lat,
                lon,
                area,
                date,
                json,
                ..
            } => {
                assert_eq!(crop, "wheat");
                assert_eq!(lat, Some(-33.9));
                assert_eq!(lon, Some(18.4));
                assert_eq!(area, Some(2.0));
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 20));
                assert!(!json);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn crop_is_required_for_generate() {
        assert!(Cli::try_parse_from(["cropcal", "generate"]).is_err());
    }

    #[test]
    fn parses_crops_json() {
        let cli = Cli::try_parse_from(["cropcal", "--config", "c.yaml", "crops", "--json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
        assert!(matches!(cli.command, Commands::Crops { json: true }));
    }
}
