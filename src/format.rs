//! Human-readable route summaries.

/// `"850 m"` under a kilometer, `"2.4 km"` above. Zero or invalid input
/// renders as `"N/A"`.
pub fn format_distance(meters: f64) -> String {
    if !(meters.is_finite() && meters > 0.0) {
        return "N/A".to_string();
    }

    let rounded = meters.round();
    if rounded >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", rounded)
    }
}

/// `"1h 5m"` from an hour up, `"12m"` below. Zero or invalid input renders
/// as `"N/A"`.
pub fn format_duration(seconds: f64) -> String {
    if !(seconds.is_finite() && seconds > 0.0) {
        return "N/A".to_string();
    }

    let whole = seconds.floor() as u64;
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
