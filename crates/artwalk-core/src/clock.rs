//! Wall-clock helpers for "HH:MM" plan times.
//!
//! All plan times are naive wall-clock strings for the plan's date; there
//! is no timezone handling. Conversions are total: a malformed field reads
//! as zero rather than failing, so the recalculator can never error out
//! mid-pass.

/// Parse an "HH:MM" string into minutes since midnight.
pub fn to_minutes(hhmm: &str) -> i64 {
    let mut parts = hhmm.splitn(2, ':');
    let hours: i64 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0);
    let minutes: i64 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0);
    hours * 60 + minutes
}

/// Render minutes since midnight as a zero-padded "HH:MM" string.
pub fn from_minutes(total: i64) -> String {
    format!("{:02}:{:02}", total.div_euclid(60), total.rem_euclid(60))
}

/// Check that a string is a well-formed "HH:MM" value.
///
/// Used to validate caller-supplied times (manual overrides, config);
/// engine-produced times always pass.
pub fn is_valid_hhmm(value: &str) -> bool {
    let mut parts = value.splitn(2, ':');
    let hours = parts.next().and_then(|p| p.parse::<u32>().ok());
    let minutes = parts.next().and_then(|p| p.parse::<u32>().ok());
    matches!((hours, minutes), (Some(h), Some(m)) if h < 24 && m < 60)
}

/// Human-readable duration.
///
/// Under an hour renders as `"{m} min"`, exact hours as `"{h} hr"`,
/// otherwise `"{h} hr {m} min"`. An absent or negative duration renders
/// as `"?? min"` -- callers must tolerate unresolved transit durations
/// mid-reconciliation, so this is an explicit contract, not an error.
pub fn format_duration(minutes: Option<i64>) -> String {
    match minutes {
        Some(m) if m >= 0 => {
            if m < 60 {
                format!("{m} min")
            } else if m % 60 == 0 {
                format!("{} hr", m / 60)
            } else {
                format!("{} hr {} min", m / 60, m % 60)
            }
        }
        _ => "?? min".to_string(),
    }
}

/// Human-readable distance: metres under 1 km, otherwise kilometres
/// with one decimal.
pub fn format_distance(meters: i64) -> String {
    if meters < 1000 {
        format!("{meters} m")
    } else {
        format!("{:.1} km", meters as f64 / 1000.0)
    }
}
