//! Duration parsing utilities.
//!
//! Simulation windows are expressed in whole minutes. Configuration files may
//! give them as a bare number of minutes or as a string with a unit suffix
//! (e.g., "60m", "1h", "3600s").

/// Parse a duration string into whole minutes
///
/// Supported formats:
/// - Raw minutes: "60"
/// - Minutes: "60m", "60min", "60mins", "60minute", "60minutes"
/// - Hours: "2h", "2hr", "2hrs", "2hour", "2hours"
/// - Seconds: "3600s", "3600sec", "3600secs", "3600second", "3600seconds"
///   (must be a whole number of minutes)
///
/// # Examples
/// ```
/// use edgesim::utils::duration::parse_duration_to_minutes;
///
/// assert_eq!(parse_duration_to_minutes("60"), Ok(60));
/// assert_eq!(parse_duration_to_minutes("1h"), Ok(60));
/// assert_eq!(parse_duration_to_minutes("120s"), Ok(2));
/// assert!(parse_duration_to_minutes("90s").is_err());
/// ```
pub fn parse_duration_to_minutes(duration: &str) -> Result<u64, String> {
    let duration = duration.trim();
    let (number, unit) = split_number_and_unit(duration);

    if number.is_empty() {
        return Err(format!("Invalid duration format: '{}'", duration));
    }
    let value = number
        .parse::<u64>()
        .map_err(|_| format!("Invalid duration value: '{}'", duration))?;

    match unit {
        "" | "m" | "min" | "mins" | "minute" | "minutes" => Ok(value),
        "h" | "hr" | "hrs" | "hour" | "hours" => value
            .checked_mul(60)
            .ok_or_else(|| format!("Duration overflows: '{}'", duration)),
        "s" | "sec" | "secs" | "second" | "seconds" => {
            if value % 60 != 0 {
                return Err(format!(
                    "Duration '{}' is not a whole number of minutes",
                    duration
                ));
            }
            Ok(value / 60)
        }
        _ => Err(format!("Unknown duration unit in '{}'", duration)),
    }
}

/// Split "30min" into ("30", "min")
fn split_number_and_unit(duration: &str) -> (&str, &str) {
    let end = duration
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(duration.len());
    (&duration[..end], duration[end..].trim())
}
