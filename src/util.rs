// Formatting helpers and timing constants for the file manager

use std::time::{Duration, SystemTime};

// ============================================================================
// Constants
// ============================================================================

/// Event loop polling interval in milliseconds
pub const EVENT_POLL_MS: u64 = 50;

/// How long a status message stays on screen
pub const STATUS_DISPLAY_SECS: u64 = 3;

// ============================================================================
// Byte Formatting
// ============================================================================

/// Format bytes with short suffixes (e.g., "1.5G", "250K")
/// Used in file list size columns where space is limited
pub fn format_size(bytes: u64) -> String {
    const UNITS: [(u64, &str); 4] = [
        (1 << 40, "T"),
        (1 << 30, "G"),
        (1 << 20, "M"),
        (1 << 10, "K"),
    ];

    for (scale, suffix) in UNITS {
        if bytes >= scale {
            return format!("{:.1}{}", bytes as f64 / scale as f64, suffix);
        }
    }
    bytes.to_string()
}

// ============================================================================
// Time Formatting
// ============================================================================

/// Relative age of a modification time, e.g. "5m ago"
pub fn format_age(modified: Option<SystemTime>, now: SystemTime) -> String {
    let Some(modified) = modified else {
        return "-".to_string();
    };
    // Clock skew puts some files in the future
    let age = now.duration_since(modified).unwrap_or(Duration::ZERO).as_secs();

    match age {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", age / 60),
        3600..86_400 => format!("{}h ago", age / 3600),
        _ => format!("{}d ago", age / 86_400),
    }
}

/// Shorten a name to `max` columns, marking the cut with '~'
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut short: String = name.chars().take(max - 1).collect();
    short.push('~');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0");
        assert_eq!(format_size(512), "512");
        assert_eq!(format_size(1024), "1.0K");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(1024 * 1024), "1.0M");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.0G");
    }

    #[test]
    fn test_format_age() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let ago = |secs| Some(now - Duration::from_secs(secs));

        assert_eq!(format_age(None, now), "-");
        assert_eq!(format_age(ago(10), now), "just now");
        assert_eq!(format_age(ago(300), now), "5m ago");
        assert_eq!(format_age(ago(7200), now), "2h ago");
        assert_eq!(format_age(ago(3 * 86_400), now), "3d ago");
        assert_eq!(format_age(Some(now + Duration::from_secs(60)), now), "just now");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("a_long_name.txt", 6), "a_lon~");
        assert_eq!(truncate_name("ünïcödé", 4), "ünï~");
        assert_eq!(truncate_name("abc", 0), "");
    }
}
