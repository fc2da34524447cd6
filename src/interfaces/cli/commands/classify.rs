//! Classify command: explain the channel of a single location

use colored::Colorize;

use crate::attribution::{QueryAttribution, QueryParams, Signals, classify, explain};

pub fn classify_location(location: &str, referrer: Option<&str>) {
    let params = QueryParams::from_location(location);
    let attribution = QueryAttribution::from_parts(Some(location), referrer);
    let signals = Signals::new(
        attribution.utm_source.as_deref(),
        attribution.utm_campaign.as_deref(),
        attribution.utm_medium.as_deref(),
        attribution.gclid.as_deref(),
        referrer,
    );

    println!("{} {}", "Location:".bold(), location.blue());
    println!(
        "{} {}",
        "Referrer:".bold(),
        referrer.filter(|r| !r.is_empty()).unwrap_or("-")
    );
    if params.is_empty() {
        println!("{}", "  (no query parameters)".dimmed());
    }

    println!();
    for (name, value) in [
        ("utm_source", &attribution.utm_source),
        ("utm_campaign", &attribution.utm_campaign),
        ("utm_medium", &attribution.utm_medium),
        ("gclid", &attribution.gclid),
    ] {
        match value {
            Some(v) => println!("  {:<13} {}", name, v.cyan()),
            None => println!("  {:<13} {}", name, "-".dimmed()),
        }
    }
    println!();

    let rule = explain(&signals)
        .map(|r| r.name)
        .unwrap_or("fallback");
    println!(
        "{} {} {}",
        "Channel:".bold(),
        classify(&signals).as_str().green().bold(),
        format!("(rule: {})", rule).dimmed()
    );
}
