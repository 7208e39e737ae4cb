//! Plain-text rendering of a weather snapshot.
//!
//! Times are rendered in the timezone passed in (the local one for the CLI);
//! everything else comes straight from the snapshot.

use chrono::TimeZone;
use std::fmt::{Display, Write};
use weather_core::{WeatherSnapshot, model::unix_to_utc};

const HOURLY_ENTRIES: usize = 20;
const DAILY_ENTRIES: usize = 7;
/// Humidity below this is not worth showing next to a forecast entry.
const HUMIDITY_THRESHOLD: u8 = 30;
const HPA_TO_MM_HG: f64 = 100.0 / 133.332;
const HOUR_SECS: i64 = 3600;

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub place: String,
    pub temperature: String,
    pub description: String,
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyEntry {
    pub time: String,
    pub value: String,
    pub humidity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyEntry {
    pub day: String,
    pub max: String,
    pub min: String,
    pub humidity: String,
}

pub fn header(snapshot: &WeatherSnapshot) -> Header {
    let today = snapshot.today();

    Header {
        place: snapshot.place_name().replace('_', " "),
        temperature: degrees(snapshot.current.temp),
        description: snapshot
            .current
            .condition()
            .map(|c| first_capitalized(&c.description))
            .unwrap_or_default(),
        min: today.map(|d| format!("Min: {}", degrees(d.temp.min))),
        max: today.map(|d| format!("Max: {}", degrees(d.temp.max))),
    }
}

pub fn hourly_strip<Tz>(snapshot: &WeatherSnapshot, tz: &Tz) -> Vec<HourlyEntry>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let hours = &snapshot.hourly[..snapshot.hourly.len().min(HOURLY_ENTRIES)];
    let sunrise = snapshot.current.sunrise;
    let sunset = snapshot.current.sunset;

    hours
        .iter()
        .enumerate()
        .map(|(index, hour)| {
            let next = snapshot
                .hourly
                .get(index + 1)
                .map_or(hour.dt + HOUR_SECS, |h| h.dt);
            let within = |ts: i64| ts >= hour.dt && ts < next;

            let (time, value) = if index == 0 {
                ("Now".to_string(), degrees(hour.temp))
            } else if within(sunset) {
                (clock(sunset, tz), "Sunset".to_string())
            } else if within(sunrise) {
                (clock(sunrise, tz), "Sunrise".to_string())
            } else {
                (format_ts(hour.dt, tz, "%H"), degrees(hour.temp))
            };

            HourlyEntry {
                time,
                value,
                humidity: humidity(hour.humidity),
            }
        })
        .collect()
}

/// The days after today.
pub fn daily_forecast<Tz>(snapshot: &WeatherSnapshot, tz: &Tz) -> Vec<DailyEntry>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    snapshot
        .daily
        .iter()
        .skip(1)
        .take(DAILY_ENTRIES)
        .map(|day| DailyEntry {
            day: format_ts(day.dt, tz, "%A"),
            max: format!("{:.0}", day.temp.max),
            min: format!("{:.0}", day.temp.min),
            humidity: humidity(day.humidity),
        })
        .collect()
}

pub fn information(snapshot: &WeatherSnapshot) -> Option<String> {
    let condition = snapshot.current.condition()?;
    let today = snapshot.today()?;

    Some(format!(
        "Today: {}. The high will be {}.",
        first_capitalized(&condition.description),
        degrees(today.temp.night)
    ))
}

pub fn details<Tz>(snapshot: &WeatherSnapshot, tz: &Tz) -> Vec<(&'static str, String)>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let current = &snapshot.current;

    vec![
        ("Sunrise", clock(current.sunrise, tz)),
        ("Sunset", clock(current.sunset, tz)),
        ("Humidity", format!("{} %", current.humidity)),
        ("Wind", format!("{:.1} m/s", current.wind_speed)),
        ("Feels like", degrees(current.feels_like)),
        ("Pressure", format!("{:.1} mm Hg", f64::from(current.pressure) * HPA_TO_MM_HG)),
        ("Visibility", format!("{:.1} km", current.visibility / 1000.0)),
        ("UV index", format!("{:.0}", current.uvi)),
    ]
}

/// Full report: header, information line, hourly strip, daily list, details.
pub fn report<Tz>(snapshot: &WeatherSnapshot, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let head = header(snapshot);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", head.place);
    let _ = writeln!(out, "{}  {}", head.temperature, head.description);
    if let (Some(min), Some(max)) = (&head.min, &head.max) {
        let _ = writeln!(out, "{min}  {max}");
    }

    if let Some(info) = information(snapshot) {
        let _ = writeln!(out, "\n{info}");
    }

    let _ = writeln!(out, "\nHourly");
    for entry in hourly_strip(snapshot, tz) {
        let _ = writeln!(out, "  {:<6} {:>8} {:>6}", entry.time, entry.value, entry.humidity);
    }

    let _ = writeln!(out, "\nNext days");
    for entry in daily_forecast(snapshot, tz) {
        let _ = writeln!(
            out,
            "  {:<10} {:>6} {:>4} {:>4}",
            entry.day, entry.humidity, entry.max, entry.min
        );
    }

    let _ = writeln!(out);
    for (label, value) in details(snapshot, tz) {
        let _ = writeln!(out, "  {label:<11} {value}");
    }

    out
}

fn degrees(value: f64) -> String {
    format!("{value:.0}°")
}

fn humidity(pct: u8) -> String {
    if pct >= HUMIDITY_THRESHOLD { format!("{pct} %") } else { String::new() }
}

fn clock<Tz>(ts: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_ts(ts, tz, "%H:%M")
}

fn format_ts<Tz>(ts: i64, tz: &Tz, fmt: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    unix_to_utc(ts)
        .map(|utc| utc.with_timezone(tz).format(fmt).to_string())
        .unwrap_or_else(|| "--".to_string())
}

fn first_capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
