//! Whole-payload checks for ranking, best days and the location score.

use serde_json::json;
use weekscout_weather::{
    best_days, best_days_named, rank, score_for_location, Activity, DailyMetrics, Reason, DAYS,
};

fn daily(value: serde_json::Value) -> DailyMetrics {
    DailyMetrics::from_value(&value).unwrap()
}

fn payloads() -> Vec<DailyMetrics> {
    vec![
        daily(json!({
            "temperature_2m_max": [2, 3, 4, 5, 6, 7, 8],
            "temperature_2m_min": [0, 1, 2, 3, 4, 5, 6],
            "precipitation_sum": [0, 1, 2, 3, 4, 5, 6],
            "snowfall_sum": [12, 11, 10, 9, 8, 7, 6],
            "windspeed_10m_max": [10, 15, 20, 25, 30, 35, 40],
            "humidity_2m_max": [60, 65, 70, 75, 80, 85, 90],
            "uv_index_max": [3, 4, 5, 6, 7, 8, 9],
            "daylight_hours": [8, 8, 8, 8, 8, 8, 8],
            "pollen_count": [10, 20, 30, 40, 50, 60, 70],
        })),
        daily(json!({
            "temperature_2m_max": [25, 26, 27, 28, 29, 30, 31],
            "precipitation_sum": [0, 0, 0, 0, 0, 0, 0],
            "windspeed_10m_max": [20, 21, 22, 23, 24, 25, 26],
            "daylight_hours": [10, 10, 10, 10, 10, 10, 10],
            "pollen_count": [10, 10, 10, 10, 10, 10, 10],
        })),
        daily(json!({
            "precipitation_sum": [20, 15, 9, 0, 1, 30, 12],
            "pollen_count": [200, 150, 90, 20, 10, 0, 130],
            "daylight_hours": [5, 5.5, 6, 6.5, 7, 7.5, 8],
        })),
        daily(json!({ "snowfall_sum": "n/a", "temperature_2m_max": [1, 2] })),
        DailyMetrics::default(),
    ]
}

#[test]
fn test_full_sample_ranking() {
    let rankings = rank(Some(&payloads()[0]), Some("Country"), Some("City"));
    assert_eq!(rankings.len(), 4);
    assert!(rankings[0].score >= rankings[1].score);

    let skiing = rankings.iter().find(|r| r.activity == Activity::Skiing).unwrap();
    assert_eq!(skiing.reason, Reason::SkiSomeSnow);
}

#[test]
fn test_every_ranking_is_complete_sorted_and_bounded() {
    for payload in payloads() {
        let rankings = rank(Some(&payload), None, None);
        let mut seen: Vec<Activity> = rankings.iter().map(|r| r.activity).collect();
        seen.sort();
        assert_eq!(seen, Activity::ALL);
        assert!(rankings.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(rankings.iter().all(|r| r.score <= 10));
    }
}

#[test]
fn test_best_days_reference_a_common_maximum() {
    for payload in payloads() {
        for activity in Activity::ALL {
            let days = best_days(Some(&payload), activity, None, None);
            assert!(!days.is_empty());
            assert!(days.windows(2).all(|w| w[0] < w[1]));
            assert!(days.iter().all(|&d| d < DAYS));
            assert_eq!(days, best_days(Some(&payload), activity, None, None));
        }
    }
}

#[test]
fn test_rainy_week_best_indoor_and_outdoor_days() {
    let payload = &payloads()[2];
    // Days 0, 1, 2, 5 and 6 are wet, pollen-heavy or dark enough to score 10
    assert_eq!(
        best_days(Some(payload), Activity::IndoorSightseeing, None, None),
        vec![0, 1, 2, 5, 6]
    );
    // Day 4: dry, mild, 7h of daylight (not > 7) -> 5; day 3 likewise
    assert_eq!(
        best_days(Some(payload), Activity::OutdoorSightseeing, None, None),
        vec![3, 4]
    );
}

#[test]
fn test_degenerate_inputs_never_fail() {
    let rankings = rank(None, None, None);
    assert!(rankings
        .iter()
        .all(|r| r.score == 0 && r.reason.to_string() == "No weather data."));

    assert!(best_days(None, Activity::Surfing, None, None).is_empty());
    assert!(best_days_named(Some(&payloads()[0]), "UnknownActivity", None, None).is_empty());

    assert_eq!(score_for_location(None, None, None, None), 0);
    assert_eq!(score_for_location(Some(&daily(json!({}))), None, None, None), 0);
    assert_eq!(
        score_for_location(Some(&payloads()[1]), None, None, Some("UnknownActivity")),
        0
    );
}

#[test]
fn test_location_score_with_unknown_keys_only() {
    // Not empty, so every series takes its default: outdoor scores 8 on top
    let payload = daily(json!({ "weathercode": [0, 0, 0, 0, 0, 0, 0] }));
    assert_eq!(score_for_location(Some(&payload), None, None, None), 8);
}
