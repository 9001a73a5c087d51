// Human duration parsing for the remind command: "30 minutes", "2h", "1 day".

use std::time::Duration;

/// Parse a duration like `45s`, `30 minutes`, `2h`, `1 day`, `1 week`.
/// Returns `None` for anything without a leading count and a known unit.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();

    let digits_end = input
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)?;
    if digits_end == 0 {
        return None;
    }

    let count: u64 = input[..digits_end].parse().ok()?;
    let unit = unit_seconds(input[digits_end..].trim())?;

    count.checked_mul(unit).map(Duration::from_secs)
}

fn unit_seconds(unit: &str) -> Option<u64> {
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Some(1),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(60),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(3600),
        "d" | "day" | "days" => Some(86_400),
        "w" | "week" | "weeks" => Some(604_800),
        _ => None,
    }
}

/// Human-readable rendering, at most two components: "1 hour and 5 minutes".
pub fn format_duration(duration: Duration) -> String {
    const UNITS: [(u64, &str); 4] = [
        (86_400, "day"),
        (3_600, "hour"),
        (60, "minute"),
        (1, "second"),
    ];

    let total = duration.as_secs();
    if total == 0 {
        return "0 seconds".to_string();
    }

    let mut remaining = total;
    let mut parts = Vec::new();
    for (secs, label) in UNITS {
        let count = remaining / secs;
        if count > 0 {
            parts.push(pluralize(count, label));
            remaining %= secs;
        }
        if parts.len() == 2 {
            break;
        }
    }

    parts.join(" and ")
}

fn pluralize(count: u64, label: &str) -> String {
    if count == 1 {
        format!("1 {label}")
    } else {
        format!("{count} {label}s")
    }
}
