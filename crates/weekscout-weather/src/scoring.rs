//! Activity scoring.
//!
//! [`evaluate`] holds the decision tree for each activity. [`rank`] feeds it
//! the weekly means; [`best_days`] feeds it one day at a time. All thresholds
//! are strict: a value sitting exactly on a boundary falls through to the
//! next branch.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::aggregate::{Conditions, ResolvedWeek};
use crate::metrics::{DailyMetrics, DAYS};
use crate::types::Activity;

/// Branch taken by the decision tree, rendered as a short explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    NoWeatherData,
    SkiExcellent,
    SkiGood,
    SkiSomeSnow,
    SkiMarginal,
    SkiPoor,
    SurfExcellent,
    SurfDecent,
    SurfCool,
    SurfPoor,
    OutdoorIdeal,
    OutdoorOkay,
    OutdoorLessIdeal,
    OutdoorPoor,
    IndoorBest,
    IndoorGood,
    IndoorUnneeded,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoWeatherData => "No weather data.",
            Self::SkiExcellent => "Excellent snow depth, cold temps, and good daylight.",
            Self::SkiGood => "Good snow and cold temperatures.",
            Self::SkiSomeSnow => "Some snow and cool temperatures.",
            Self::SkiMarginal => "Marginal snow or a bit warm.",
            Self::SkiPoor => "Not enough snow or too warm.",
            Self::SurfExcellent => "Warm, breezy, good daylight, and low pollen.",
            Self::SurfDecent => "Decent wind and mild weather.",
            Self::SurfCool => "Cool but surfable conditions.",
            Self::SurfPoor => "Too cold, calm, or short days for good surfing.",
            Self::OutdoorIdeal => "Mild, dry, good daylight, and low pollen.",
            Self::OutdoorOkay => "Okay weather, some rain or pollen possible.",
            Self::OutdoorLessIdeal => "Somewhat rainy or less ideal temperatures.",
            Self::OutdoorPoor => "Likely rainy, uncomfortable, or high pollen.",
            Self::IndoorBest => "Best to stay indoors due to weather or pollen.",
            Self::IndoorGood => "Indoor activities are a good option.",
            Self::IndoorUnneeded => "Outdoor activities are more appealing.",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Reason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Score (0-10) and the branch that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub score: u8,
    pub reason: Reason,
}

impl Verdict {
    const fn new(score: u8, reason: Reason) -> Self {
        Self { score, reason }
    }
}

/// One entry of the activity ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub activity: Activity,
    pub score: u8,
    pub reason: Reason,
}

/// Run one activity's decision tree over a set of conditions.
pub fn evaluate(activity: Activity, c: &Conditions) -> Verdict {
    match activity {
        Activity::Skiing => skiing(c),
        Activity::Surfing => surfing(c),
        Activity::OutdoorSightseeing => outdoor(c),
        Activity::IndoorSightseeing => indoor(c),
    }
}

fn skiing(c: &Conditions) -> Verdict {
    let (snow, temp, wind) = (c.snowfall, c.temperature_max, c.wind_speed);
    if snow > 10.0 && temp < 3.0 && wind < 30.0 && c.humidity < 80.0 && c.daylight_hours > 7.0 {
        Verdict::new(10, Reason::SkiExcellent)
    } else if snow > 5.0 && temp < 5.0 && wind < 40.0 && c.daylight_hours > 6.0 {
        Verdict::new(8, Reason::SkiGood)
    } else if snow > 2.0 && temp < 8.0 && wind < 50.0 {
        Verdict::new(6, Reason::SkiSomeSnow)
    } else if snow > 0.5 && temp < 10.0 {
        Verdict::new(4, Reason::SkiMarginal)
    } else {
        Verdict::new(1, Reason::SkiPoor)
    }
}

fn surfing(c: &Conditions) -> Verdict {
    let (temp, wind, daylight) = (c.temperature_max, c.wind_speed, c.daylight_hours);
    if temp > 20.0
        && wind > 15.0
        && wind < 40.0
        && daylight > 8.0
        && c.humidity < 85.0
        && c.pollen < 50.0
    {
        Verdict::new(10, Reason::SurfExcellent)
    } else if temp > 17.0 && wind > 10.0 && daylight > 7.0 {
        Verdict::new(8, Reason::SurfDecent)
    } else if temp > 14.0 && wind > 7.0 {
        Verdict::new(6, Reason::SurfCool)
    } else {
        Verdict::new(3, Reason::SurfPoor)
    }
}

fn outdoor(c: &Conditions) -> Verdict {
    let (precip, temp) = (c.precipitation, c.temperature_max);
    if precip < 2.0
        && temp > 15.0
        && temp < 28.0
        && c.uv_index < 8.0
        && c.daylight_hours > 8.0
        && c.pollen < 80.0
    {
        Verdict::new(10, Reason::OutdoorIdeal)
    } else if precip < 5.0 && temp > 10.0 && temp < 32.0 && c.daylight_hours > 7.0 {
        Verdict::new(8, Reason::OutdoorOkay)
    } else if precip < 8.0 && temp > 5.0 && temp < 35.0 {
        Verdict::new(5, Reason::OutdoorLessIdeal)
    } else {
        Verdict::new(2, Reason::OutdoorPoor)
    }
}

fn indoor(c: &Conditions) -> Verdict {
    let (precip, temp, pollen, daylight) =
        (c.precipitation, c.temperature_max, c.pollen, c.daylight_hours);
    if precip > 8.0 || temp < 5.0 || temp > 32.0 || pollen > 120.0 || daylight < 6.0 {
        Verdict::new(10, Reason::IndoorBest)
    } else if precip > 4.0 || temp < 10.0 || temp > 28.0 || pollen > 80.0 || daylight < 7.0 {
        Verdict::new(8, Reason::IndoorGood)
    } else {
        Verdict::new(4, Reason::IndoorUnneeded)
    }
}

/// Rank all four activities for the week, best first.
///
/// `country` and `city` are accepted for callers that have them; scoring
/// depends on the weather alone. Without data every activity scores 0.
pub fn rank(
    daily: Option<&DailyMetrics>,
    country: Option<&str>,
    city: Option<&str>,
) -> [Ranking; 4] {
    let Some(daily) = daily else {
        return Activity::ALL.map(|activity| Ranking {
            activity,
            score: 0,
            reason: Reason::NoWeatherData,
        });
    };

    let averages = ResolvedWeek::resolve(daily).average();
    tracing::debug!(?country, ?city, ?averages, "Ranking activities");

    let mut rankings = Activity::ALL.map(|activity| {
        let verdict = evaluate(activity, &averages);
        Ranking {
            activity,
            score: verdict.score,
            reason: verdict.reason,
        }
    });
    // Stable: ties keep emission order
    rankings.sort_by(|a, b| b.score.cmp(&a.score));
    rankings
}

/// Indices of the days that share the highest single-day score for
/// `activity`, ascending. Empty without data.
pub fn best_days(
    daily: Option<&DailyMetrics>,
    activity: Activity,
    country: Option<&str>,
    city: Option<&str>,
) -> Vec<usize> {
    let Some(daily) = daily else {
        return Vec::new();
    };

    let week = ResolvedWeek::resolve(daily);
    let scores: Vec<u8> = (0..DAYS)
        .filter_map(|index| week.day(index))
        .map(|day| evaluate(activity, &day).score)
        .collect();

    let Some(best) = scores.iter().copied().max() else {
        return Vec::new();
    };
    tracing::debug!(%activity, ?country, ?city, ?scores, best, "Scored individual days");

    scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score == best)
        .map(|(index, _)| index)
        .collect()
}

/// [`best_days`] for an activity given by name. Unknown names yield no days.
pub fn best_days_named(
    daily: Option<&DailyMetrics>,
    activity: &str,
    country: Option<&str>,
    city: Option<&str>,
) -> Vec<usize> {
    match activity.parse::<Activity>() {
        Ok(activity) => best_days(daily, activity, country, city),
        Err(e) => {
            tracing::debug!("{}", e);
            Vec::new()
        }
    }
}

/// Score of one activity for a location, or the top score when no
/// activity is named. Used for map overlays.
///
/// Returns 0 for a missing or empty payload and for an unknown activity.
pub fn score_for_location(
    daily: Option<&DailyMetrics>,
    country: Option<&str>,
    city: Option<&str>,
    activity: Option<&str>,
) -> u8 {
    let Some(daily) = daily.filter(|d| !d.is_empty()) else {
        return 0;
    };
    let rankings = rank(Some(daily), country, city);

    match activity.filter(|name| !name.is_empty()) {
        Some(name) => match name.parse::<Activity>() {
            Ok(activity) => rankings
                .iter()
                .find(|r| r.activity == activity)
                .map_or(0, |r| r.score),
            Err(_) => 0,
        },
        None => rankings.first().map_or(0, |r| r.score),
    }
}
