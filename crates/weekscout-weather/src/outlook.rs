//! Everything a summary view needs for one location: the ranking plus the
//! best days of each activity.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::metrics::DailyMetrics;
use crate::scoring::{best_days, rank, Ranking};
use crate::types::Activity;

/// Render an ISO date as e.g. "Mon, Jan 5". Unparsable input is returned as is.
pub fn format_day(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(day) => day.format("%a, %b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlook {
    pub rankings: [Ranking; 4],
    pub best_days: BTreeMap<Activity, Vec<usize>>,
    /// Forecast dates, for display only
    pub dates: Vec<String>,
}

impl Outlook {
    pub fn build(daily: Option<&DailyMetrics>, country: Option<&str>, city: Option<&str>) -> Self {
        let rankings = rank(daily, country, city);
        let best_days = Activity::ALL
            .into_iter()
            .map(|activity| (activity, best_days(daily, activity, country, city)))
            .collect();
        let dates = daily.map(|d| d.dates().to_vec()).unwrap_or_default();

        Self {
            rankings,
            best_days,
            dates,
        }
    }

    /// The highest-ranked entry
    pub fn top(&self) -> &Ranking {
        &self.rankings[0]
    }

    /// Formatted labels for an activity's best days. Days without a date
    /// fall back to "Day N".
    pub fn best_day_labels(&self, activity: Activity) -> Vec<String> {
        self.best_days
            .get(&activity)
            .map(|days| {
                days.iter()
                    .map(|&index| match self.dates.get(index) {
                        Some(date) if !date.is_empty() => format_day(date),
                        _ => format!("Day {}", index + 1),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Reason;
    use serde_json::json;

    fn ski_week() -> DailyMetrics {
        DailyMetrics::from_value(&json!({
            "time": ["2026-01-05", "2026-01-06", "2026-01-07", "2026-01-08",
                     "2026-01-09", "2026-01-10", "2026-01-11"],
            "temperature_2m_max": [2, 3, 4, 5, 6, 7, 8],
            "snowfall_sum": [12, 11, 10, 9, 8, 7, 6],
            "windspeed_10m_max": [10, 15, 20, 25, 30, 35, 40],
            "humidity_2m_max": [60, 65, 70, 75, 80, 85, 90],
            "daylight_hours": [8, 8, 8, 8, 8, 8, 8],
        }))
        .unwrap()
    }

    #[test]
    fn test_format_day() {
        assert_eq!(format_day("2026-01-05"), "Mon, Jan 5");
        assert_eq!(format_day("2026-10-16"), "Fri, Oct 16");
        assert_eq!(format_day("not a date"), "not a date");
    }

    #[test]
    fn test_outlook_covers_every_activity() {
        let daily = ski_week();
        let outlook = Outlook::build(Some(&daily), None, None);
        assert_eq!(outlook.best_days.len(), 4);
        assert_eq!(outlook.best_days[&Activity::Skiing], vec![0]);
        assert_eq!(outlook.top().activity, Activity::IndoorSightseeing);
        assert_eq!(outlook.dates.len(), 7);
    }

    #[test]
    fn test_best_day_labels() {
        let daily = ski_week();
        let outlook = Outlook::build(Some(&daily), None, None);
        assert_eq!(outlook.best_day_labels(Activity::Skiing), vec!["Mon, Jan 5"]);
        assert_eq!(
            outlook.best_day_labels(Activity::IndoorSightseeing),
            vec!["Mon, Jan 5", "Tue, Jan 6", "Wed, Jan 7"]
        );
    }

    #[test]
    fn test_labels_without_dates() {
        let daily = DailyMetrics::from_value(&json!({
            "temperature_2m_max": [2, 3, 4, 5, 6, 7, 8],
        }))
        .unwrap();
        let outlook = Outlook::build(Some(&daily), None, None);
        assert_eq!(
            outlook.best_day_labels(Activity::IndoorSightseeing),
            vec!["Day 1", "Day 2", "Day 3"]
        );
    }

    #[test]
    fn test_outlook_without_data() {
        let outlook = Outlook::build(None, None, None);
        assert!(outlook.rankings.iter().all(|r| r.reason == Reason::NoWeatherData));
        assert!(outlook.best_days.values().all(Vec::is_empty));
        assert!(outlook.dates.is_empty());
    }

    #[test]
    fn test_outlook_serializes_activity_keys() {
        let daily = ski_week();
        let value = serde_json::to_value(Outlook::build(Some(&daily), None, None)).unwrap();
        assert_eq!(value["best_days"]["Skiing"], json!([0]));
        assert_eq!(value["rankings"][0]["activity"], json!("Indoor sightseeing"));
    }
}
