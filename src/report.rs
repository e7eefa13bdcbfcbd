//! Plain-text rendering of an outlook for the terminal.

use std::fmt::Write;

use weekscout_weather::{Outlook, Ranking};

/// Render the ranking with best days, one activity per block.
pub fn render_outlook(title: &str, outlook: &Outlook, show_reasons: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (next 7 days)", title);

    for (position, ranking) in outlook.rankings.iter().enumerate() {
        let _ = writeln!(out, "{}", render_ranking(position + 1, ranking, show_reasons));

        let labels = outlook.best_day_labels(ranking.activity);
        if !labels.is_empty() && ranking.score > 0 {
            let noun = if labels.len() > 1 { "Best days" } else { "Best day" };
            let _ = writeln!(out, "     {}: {}", noun, labels.join(" / "));
        }
    }
    out
}

fn render_ranking(position: usize, ranking: &Ranking, show_reasons: bool) -> String {
    let activity = ranking.activity;
    let mut line = format!(
        "  {}. {} {:<20} {:>2}/10",
        position,
        activity.icon(),
        activity.name(),
        ranking.score
    );
    if show_reasons {
        line.push_str("  ");
        line.push_str(ranking.reason.as_str());
    }
    line
}

/// Place heading, e.g. "Zermatt, Switzerland"
pub fn place_title(name: &str, country: &str) -> String {
    if country.is_empty() || country == name {
        name.to_string()
    } else {
        format!("{}, {}", name, country)
    }
}
