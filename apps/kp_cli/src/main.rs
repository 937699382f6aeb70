mod ephemeris;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use kp_engine::angle::Dms;
use kp_engine::vedic::sublord::sub_lord_segments;
use kp_engine::{
    decompose, house_for, parse_birth_date, parse_birth_time, sub_lord, ChartEngine, HouseSystem,
    Numerology, TimezoneResolver,
};
use serde_json::json;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "kp", author, version, about = "Krishnamurti Paddhati chart calculator")]
struct Cli {
    /// Config file (default: configs/kp.toml, then ../../configs/kp.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print single-line JSON instead of pretty output.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a full chart for a birth date, local time and place
    Chart {
        /// Birth date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        date: String,
        /// Local birth time (HH:MM[:SS] or h:MM AM/PM)
        #[arg(long)]
        time: String,
        /// Place name from the config gazetteer, or "lat,lon"
        #[arg(long)]
        place: String,
        /// Timezone override (IANA name or offset such as +05:30)
        #[arg(long)]
        tz: Option<String>,
        /// JSON file with precomputed tropical positions instead of Swiss Ephemeris
        #[arg(long)]
        positions: Option<PathBuf>,
        /// Instant for the running dasha lookup (RFC 3339, default: now)
        #[arg(long)]
        as_of: Option<String>,
        /// House system overriding the config (placidus, koch, equal, whole_sign, ...)
        #[arg(long)]
        house_system: Option<String>,
        /// Native's name, for the Chaldean name number
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign, nakshatra, pada and sub-lord of a sidereal longitude
    Decompose {
        /// Sidereal longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// House containing a longitude for twelve cusps
    House {
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Twelve comma-separated cusp longitudes, house 1 first
        #[arg(long)]
        cusps: String,
    },
    /// Chaldean name number and life path number
    Numerology {
        /// Birth date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        date: String,
        /// Name to score
        #[arg(long)]
        name: Option<String>,
    },
}

/// Timezone supplied on the command line, used for every location.
struct ZoneOverride(String);

impl TimezoneResolver for ZoneOverride {
    fn resolve_timezone(&self, _lat: f64, _lon: f64) -> Option<String> {
        Some(self.0.clone())
    }
}

fn parse_cusps(text: &str) -> anyhow::Result<[f64; 12]> {
    let values = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid cusp value '{}'", part.trim()))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;
    values
        .try_into()
        .map_err(|v: Vec<f64>| anyhow::anyhow!("Expected 12 cusps, got {}", v.len()))
}

fn parse_as_of(text: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match text {
        Some(text) => Ok(DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("Invalid --as-of '{text}' (expected RFC 3339)"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn parse_house_system(text: &str) -> anyhow::Result<HouseSystem> {
    HouseSystem::from_str(text).map_err(|e| anyhow::anyhow!("Invalid --house-system: {e}"))
}

fn print_json(value: &serde_json::Value, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{text}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            date,
            time,
            place,
            tz,
            positions,
            as_of,
            house_system,
            name,
        } => {
            let mut config = match kp_config::load_config(cli.config.as_deref()) {
                Ok(config) => config,
                Err(e) if cli.config.is_none() => {
                    log::warn!("{e}; using built-in defaults");
                    kp_config::KpConfig::default()
                }
                Err(e) => return Err(e),
            };
            let date = parse_birth_date(&date)?;
            let time = parse_birth_time(&time)?;
            let as_of = parse_as_of(as_of.as_deref())?;
            if let Some(system) = house_system.as_deref() {
                config.chart.house_system = parse_house_system(system)?;
            }
            let backend = ephemeris::open(positions.as_deref(), &config)?;

            let chart = match tz {
                Some(zone) => ChartEngine::new(
                    backend.as_ref(),
                    config.places.clone(),
                    ZoneOverride(zone),
                    config.chart,
                )?
                .compute_chart_at(date, time, &place, as_of)?,
                None => ChartEngine::new(
                    backend.as_ref(),
                    config.places.clone(),
                    config.places.clone(),
                    config.chart,
                )?
                .compute_chart_at(date, time, &place, as_of)?,
            };
            if chart.birth.zone.is_fallback() {
                log::warn!("no timezone known for '{}'; birth time was read as UTC", place);
            }
            let mut value = serde_json::to_value(&chart)?;
            value["numerology"] = serde_json::to_value(Numerology::new(name.as_deref(), date))?;
            print_json(&value, cli.compact)?;
        }

        Commands::Decompose { lon } => {
            let placement = decompose(lon);
            let segments = sub_lord_segments(placement.nakshatra_index);
            let value = json!({
                "placement": placement,
                "dms": Dms::from_degrees(placement.degree_in_sign).to_string(),
                "subLord": sub_lord(lon),
                "subDivisions": segments
                    .iter()
                    .map(|s| json!({ "lord": s.lord, "start": s.start, "end": s.end }))
                    .collect::<Vec<_>>(),
            });
            print_json(&value, cli.compact)?;
        }

        Commands::House { lon, cusps } => {
            let cusps = parse_cusps(&cusps)?;
            let value = json!({ "longitude": lon, "house": house_for(lon, &cusps) });
            print_json(&value, cli.compact)?;
        }

        Commands::Numerology { date, name } => {
            let date = parse_birth_date(&date)?;
            let value = serde_json::to_value(Numerology::new(name.as_deref(), date))?;
            print_json(&value, cli.compact)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cusps() {
        let cusps = parse_cusps("10,40,70,100,130,160,190,220,250,280,310,340").expect("cusps");
        assert_eq!(cusps[0], 10.0);
        assert_eq!(cusps[11], 340.0);
        assert!(parse_cusps("10,40").is_err());
        assert!(parse_cusps("10,x,70,100,130,160,190,220,250,280,310,340").is_err());
    }

    #[test]
    fn test_parse_as_of() {
        let at = parse_as_of(Some("2020-01-01T05:30:00+05:30")).expect("as-of");
        assert_eq!(at.to_rfc3339(), "2020-01-01T00:00:00+00:00");
        assert!(parse_as_of(Some("yesterday")).is_err());
    }

    #[test]
    fn test_cli_parses_chart_command() {
        let cli = Cli::try_parse_from([
            "kp", "chart", "--date", "2010-04-02", "--time", "07:33", "--place", "Bhubaneswar",
        ])
        .expect("parses");
        assert!(matches!(cli.command, Commands::Chart { .. }));
    }

    #[test]
    fn test_cli_accepts_negative_longitudes() {
        let cli = Cli::try_parse_from(["kp", "decompose", "-10"]).expect("parses");
        assert!(matches!(cli.command, Commands::Decompose { lon } if lon == -10.0));
        let cli = Cli::try_parse_from([
            "kp", "house", "--lon", "-10.5", "--cusps", "0,30,60,90,120,150,180,210,240,270,300,330",
        ])
        .expect("parses");
        assert!(matches!(cli.command, Commands::House { lon, .. } if lon == -10.5));
    }

    #[test]
    fn test_house_system_override() {
        assert_eq!(parse_house_system("Whole Sign").expect("known"), HouseSystem::WholeSign);
        assert_eq!(parse_house_system("koch").expect("known"), HouseSystem::Koch);
        assert!(parse_house_system("topocentric-ish").is_err());
        let cli = Cli::try_parse_from([
            "kp", "chart", "--date", "2010-04-02", "--time", "07:33", "--place", "Bhubaneswar",
            "--house-system", "equal", "--name", "Rama",
        ])
        .expect("parses");
        match cli.command {
            Commands::Chart { house_system, name, .. } => {
                assert_eq!(house_system.as_deref(), Some("equal"));
                assert_eq!(name.as_deref(), Some("Rama"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_numerology_command() {
        let cli = Cli::try_parse_from(["kp", "numerology", "--date", "02/04/2010", "--name", "Rama"])
            .expect("parses");
        match cli.command {
            Commands::Numerology { date, name } => {
                let date = parse_birth_date(&date).expect("date");
                let numbers = Numerology::new(name.as_deref(), date);
                assert_eq!(numbers.name_number, Some(8));
                assert_eq!(numbers.life_path, 9);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
