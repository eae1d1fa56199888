//! Text reports for the utility commands.
//!
//! Every report is randomised from the caller's generator and dated from the
//! caller's clock, so the same seed and time always produce the same text.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::config::FORTUNES_TEXT;

const BAR_WIDTH: usize = 20;

/// `[=====     ] 25%` style usage bar.
fn usage_bar(percent: u32) -> String {
    let filled = ((percent as f32 / 100.0) * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}] {}%",
        "=".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        percent
    )
}

pub fn system_status(now: DateTime<Local>, rng: &mut SmallRng) -> String {
    let cpu = rng.gen_range(10..90);
    let memory = rng.gen_range(20..90);
    let disk = rng.gen_range(30..90);
    let network = rng.gen_range(5..95);

    let peak = cpu.max(memory).max(disk).max(network);
    let health = match peak {
        91.. => "CRITICAL",
        71..=90 => "WARNING",
        _ => "NORMAL",
    };

    [
        "=== SYSTEM STATUS ===".to_string(),
        format!("Date: {}", now.format("%-m/%-d/%Y")),
        format!("Time: {}", now.format("%-I:%M:%S %p")),
        String::new(),
        format!("CPU Usage:     {}", usage_bar(cpu)),
        format!("Memory Usage:  {}", usage_bar(memory)),
        format!("Disk Usage:    {}", usage_bar(disk)),
        format!("Network Load:  {}", usage_bar(network)),
        String::new(),
        format!("System Status: {}", health),
        format!("Processes Running: {}", rng.gen_range(50..150)),
        format!("Last Boot: {} hours ago", rng.gen_range(1..49)),
    ]
    .join("\n")
}

pub fn fortunes() -> impl Iterator<Item = &'static str> {
    FORTUNES_TEXT.lines().map(str::trim).filter(|l| !l.is_empty())
}

const CAT: &str = r"        \
         \
          /\_/\
         ( o.o )
          > ^ <";

/// A random saying in a speech bubble, spoken by a cat.
pub fn fortune(rng: &mut SmallRng) -> String {
    let all: Vec<&str> = fortunes().collect();
    let quote = all.choose(rng).copied().unwrap_or("No fortune today.");
    speech_bubble(quote)
}

fn speech_bubble(text: &str) -> String {
    let width = (text.chars().count() + 4).max(20);
    let inner = width - 2;
    let pad = inner.saturating_sub(text.chars().count() + 2);
    [
        format!(" {}", "_".repeat(inner)),
        format!("/ {}{} \\", text, " ".repeat(pad)),
        format!("\\{}/", "_".repeat(inner)),
        CAT.to_string(),
    ]
    .join("\n")
}

const CONDITIONS: [&str; 6] = ["Sunny", "Partly Cloudy", "Cloudy", "Rainy", "Stormy", "Snowy"];

fn weather_art(condition: &str) -> &'static str {
    match condition {
        "Sunny" => {
            r"    \   /
     .-.
  ― (   ) ―
     `-'
    /   \"
        }
        "Partly Cloudy" => {
            r"   \  /
 _ /''.-.
   \_(   ).
   /(___(__)"
        }
        "Cloudy" => {
            r"     .--.
  .-(    ).
 (___.__)__)"
        }
        "Rainy" => {
            r"     .-.
    (   ).
   (___(__)
    ' ' ' '
   ' ' ' '"
        }
        "Stormy" => {
            r"     .-.
    (   ).
   (___(__)
    ⚡' '⚡'
   ' '⚡' '"
        }
        _ => {
            r"     .-.
    (   ).
   (___(__)
    *  *  *
   *  *  *"
        }
    }
}

pub fn weather(location: &str, rng: &mut SmallRng) -> String {
    let index = rng.gen_range(0..CONDITIONS.len());
    let condition = CONDITIONS[index];
    let temperature = rng.gen_range(40..75);
    let humidity = rng.gen_range(30..70);
    let wind = rng.gen_range(1..21);
    let precipitation = match condition {
        "Rainy" => rng.gen_range(50..100),
        "Stormy" | "Snowy" => rng.gen_range(60..100),
        "Cloudy" => rng.gen_range(10..40),
        _ => rng.gen_range(0..10),
    };

    let mut lines = vec![
        format!("=== Weather Forecast for {} ===", location),
        String::new(),
        weather_art(condition).to_string(),
        String::new(),
        format!("Condition: {}", condition),
        format!("Temperature: {}°F", temperature),
        format!("Humidity: {}%", humidity),
        format!("Wind: {} mph", wind),
        format!("Precipitation: {}%", precipitation),
        String::new(),
        "=== 3-Day Forecast ===".to_string(),
    ];

    for (day, label) in ["Tomorrow", "Day 2", "Day 3"].iter().enumerate() {
        let spread = if day == 0 { 1 } else { 2 };
        let drift = rng.gen_range(-spread..=spread);
        let next = (index as i32 + drift).clamp(0, CONDITIONS.len() as i32 - 1) as usize;
        let temp = temperature + rng.gen_range(-5..=5);
        lines.push(format!("{}: {}, {}°F", label, CONDITIONS[next], temp));
    }

    lines.join("\n")
}

const EVENTS: [&str; 10] = [
    "System maintenance",
    "Security audit",
    "Software update",
    "Team meeting",
    "Backup scheduled",
    "Performance review",
    "Database cleanup",
    "Network upgrade",
    "Project deadline",
    "Training session",
];

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(31, |d| d.day())
}

/// Month grid with today bracketed, followed by a few made-up events.
pub fn calendar(now: DateTime<Local>, rng: &mut SmallRng) -> String {
    let today = now.day();
    let days = days_in_month(now.year(), now.month());
    let first_weekday = now
        .with_day(1)
        .map_or(0, |d| d.weekday().num_days_from_sunday()) as usize;

    let mut lines = vec![
        format!("    {}", now.format("%B %Y")),
        " Su Mo Tu We Th Fr Sa".to_string(),
    ];

    let mut row = "  ".repeat(first_weekday);
    let mut column = first_weekday;
    for day in 1..=days {
        if day == today {
            row.push_str(&format!("[{:>2}]", day));
        } else {
            row.push_str(&format!(" {:>2} ", day));
        }
        column += 1;
        if column == 7 {
            lines.push(std::mem::take(&mut row));
            column = 0;
        }
    }
    if !row.is_empty() {
        lines.push(row);
    }

    lines.push(String::new());
    lines.push("Upcoming Events:".to_string());
    let month = now.format("%b").to_string();
    for i in 0..rng.gen_range(3..6) {
        let day = (today + i + 1 + rng.gen_range(0..7)).min(days);
        let event = EVENTS.choose(rng).copied().unwrap_or(EVENTS[0]);
        lines.push(format!("- {} {}: {}", month, day, event));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 2, 14, 9, 5, 3)
            .single()
            .expect("valid local time")
    }

    #[test]
    fn test_usage_bar() {
        assert_eq!(usage_bar(50), format!("[{}{}] 50%", "=".repeat(10), " ".repeat(10)));
        assert_eq!(usage_bar(0), format!("[{}] 0%", " ".repeat(20)));
        assert_eq!(usage_bar(100), format!("[{}] 100%", "=".repeat(20)));
    }

    #[test]
    fn test_system_status_layout() {
        let mut rng = SmallRng::seed_from_u64(3);
        let report = system_status(fixed_now(), &mut rng);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "=== SYSTEM STATUS ===");
        assert_eq!(lines[1], "Date: 2/14/2024");
        assert_eq!(lines[2], "Time: 9:05:03 AM");
        assert!(lines[4].starts_with("CPU Usage:     ["));
        assert!(lines[9].starts_with("System Status: "));
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn test_fortune_box_fits_text() {
        let bubble = speech_bubble("Hi");
        let lines: Vec<&str> = bubble.lines().collect();
        assert_eq!(lines[0], format!(" {}", "_".repeat(18)));
        assert_eq!(lines[1].chars().count(), 20);
        assert!(lines[1].starts_with("/ Hi"));
        assert!(bubble.contains("( o.o )"));
    }

    #[test]
    fn test_fortunes_load() {
        assert!(fortunes().count() > 10);
        let mut rng = SmallRng::seed_from_u64(8);
        let text = fortune(&mut rng);
        assert!(fortunes().any(|f| text.contains(f)));
    }

    #[test]
    fn test_weather_mentions_location() {
        let mut rng = SmallRng::seed_from_u64(4);
        let report = weather("Springfield", &mut rng);
        assert!(report.starts_with("=== Weather Forecast for Springfield ==="));
        assert!(report.contains("=== 3-Day Forecast ==="));
        assert!(report.contains("Tomorrow: "));
        assert!(report.contains("Day 3: "));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_calendar_marks_today() {
        let mut rng = SmallRng::seed_from_u64(6);
        let cal = calendar(fixed_now(), &mut rng);
        assert!(cal.starts_with("    February 2024"));
        assert!(cal.contains("[14]"));
        assert!(cal.contains(" 29 "));
        assert!(!cal.contains(" 30 "));

        let events = cal
            .lines()
            .skip_while(|l| *l != "Upcoming Events:")
            .skip(1)
            .count();
        assert!((3..=5).contains(&events));
        assert!(cal.contains("- Feb "));
    }
}
