//! weekscout - which activity suits a place this week.
//!
//! Usage:
//! ```bash
//! # Geocode a place and rank activities for the next 7 days
//! weekscout outlook "Zermatt"
//!
//! # Same, for raw coordinates, as JSON
//! weekscout outlook-at --lat 46.02 --lng 7.75 --json
//!
//! # Score a saved forecast payload without touching the network
//! weekscout score forecast.json --activity Surfing
//! ```

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use weekscout_core::{AppError, Config, ConfigError, NetworkError, ReqwestErrorExt};
use weekscout_weather::{
    score_for_location, DailyMetrics, ForecastProvider, Geocoder, Outlook, WeatherError,
};

#[derive(Parser)]
#[command(
    name = "weekscout",
    version,
    about = "Rank skiing, surfing and sightseeing for a place over the next 7 days"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file override
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a place by name and rank activities there
    Outlook {
        place: String,

        #[arg(long)]
        json: bool,
    },

    /// Rank activities at a coordinate
    OutlookAt {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        #[arg(long)]
        json: bool,
    },

    /// Score a forecast JSON file (a full response or just its `daily` object)
    Score {
        file: PathBuf,

        /// Print only this activity's score
        #[arg(long)]
        activity: Option<String>,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = weekscout_core::init(cli.verbose) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_config(cli.config.as_deref(), &cli.command)?;

    match cli.command {
        Command::Outlook { place, json } => {
            let geocoder = Geocoder::new(
                config.geocoding.base_url.as_str(),
                &config.geocoding.user_agent,
                Duration::from_secs(config.geocoding.timeout_secs),
            )
            .map_err(weather_error)?;

            let found = geocoder
                .search(&place)
                .await
                .map_err(weather_error)?
                .ok_or_else(|| AppError::PlaceNotFound(place.clone()))?;

            let title = report::place_title(&found.name, &found.country);
            let country = Some(found.country.as_str()).filter(|c| !c.is_empty());
            show_outlook(
                &config,
                &title,
                found.latitude,
                found.longitude,
                country,
                Some(found.name.as_str()),
                json,
            )
            .await
        }
        Command::OutlookAt { lat, lng, json } => {
            let title = format!("{:.4}, {:.4}", lat, lng);
            show_outlook(&config, &title, lat, lng, None, None, json).await
        }
        Command::Score {
            file,
            activity,
            json,
        } => score_file(&file, activity.as_deref(), json, config.display.show_reasons),
    }
}

async fn show_outlook(
    config: &Config,
    title: &str,
    latitude: f64,
    longitude: f64,
    country: Option<&str>,
    city: Option<&str>,
    json: bool,
) -> Result<(), AppError> {
    let provider = ForecastProvider::new(
        config.forecast.base_url.as_str(),
        Duration::from_secs(config.forecast.timeout_secs),
    )
    .map_err(weather_error)?;

    let forecast = provider
        .fetch(latitude, longitude)
        .await
        .map_err(weather_error)?;
    let outlook = Outlook::build(Some(&forecast.daily), country, city);

    if json {
        print_json(&outlook)?;
    } else {
        print!(
            "{}",
            report::render_outlook(title, &outlook, config.display.show_reasons)
        );
    }
    Ok(())
}

fn score_file(
    path: &Path,
    activity: Option<&str>,
    json: bool,
    show_reasons: bool,
) -> Result<(), AppError> {
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| AppError::Other(anyhow::anyhow!("{}: {}", path.display(), e)))?;

    // Accept either a full forecast response or the bare daily object
    let payload = match value.get("daily") {
        Some(daily) => daily,
        None => &value,
    };
    let daily = DailyMetrics::from_value(payload);

    if let Some(name) = activity {
        let score = score_for_location(daily.as_ref(), None, None, Some(name));
        if json {
            print_json(&serde_json::json!({ "activity": name, "score": score }))?;
        } else {
            println!("{}: {}/10", name, score);
        }
        return Ok(());
    }

    let outlook = Outlook::build(daily.as_ref(), None, None);
    tracing::debug!("Top activity for {}: {}", path.display(), outlook.top().activity);
    if json {
        print_json(&outlook)?;
    } else {
        let title = path.display().to_string();
        print!("{}", report::render_outlook(&title, &outlook, show_reasons));
    }
    Ok(())
}

/// `score` works offline: without `--config` it uses built-in defaults
/// rather than creating a config file.
fn load_config(path: Option<&Path>, command: &Command) -> Result<Config, AppError> {
    match (path, command) {
        (None, Command::Score { .. }) => Ok(Config::default()),
        (path, _) => {
            let (config, _) = Config::load_validated(path).map_err(config_error)?;
            Ok(config)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.into()))?;
    println!("{}", text);
    Ok(())
}

fn config_error(e: anyhow::Error) -> AppError {
    match e.downcast::<ConfigError>() {
        Ok(config) => AppError::Config(config),
        Err(other) => AppError::Other(other),
    }
}

fn weather_error(e: WeatherError) -> AppError {
    match e {
        WeatherError::Network(e) => AppError::Network(e.into_network_error()),
        WeatherError::Api { status } => AppError::Network(NetworkError::ServerError {
            status,
            message: format!("HTTP {}", status),
        }),
        other => AppError::Weather(other.to_string()),
    }
}
