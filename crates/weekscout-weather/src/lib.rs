//! Activity outlook for weekscout
//!
//! Turns a seven-day daily forecast into a ranked list of activities
//! (skiing, surfing, outdoor and indoor sightseeing) and picks the best
//! days for each one. Scoring is pure; the forecast provider and geocoder
//! are thin async collaborators over Open-Meteo and Nominatim.

pub mod aggregate;
pub mod geocode;
pub mod metrics;
pub mod outlook;
pub mod provider;
pub mod retry;
pub mod scoring;
pub mod types;

pub use aggregate::Conditions;
pub use geocode::Geocoder;
pub use metrics::{DailyMetrics, Metric, Series, DAYS};
pub use outlook::{format_day, Outlook};
pub use provider::ForecastProvider;
pub use retry::RetryConfig;
pub use scoring::{
    best_days, best_days_named, evaluate, rank, score_for_location, Ranking, Reason, Verdict,
};
pub use types::*;
