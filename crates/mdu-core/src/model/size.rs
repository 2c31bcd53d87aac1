//! Human-readable byte counts in the style of `du -h`.
//!
//! Totals are always `u64` bytes; floating point only appears here, at the
//! display boundary. Units are binary (1K = 1024 bytes).

/// Format `bytes` as `512B`, `1.5K`, `23M`, `4.0G`, ...
///
/// Values below ten units keep one decimal place; larger values are
/// rounded to a whole number.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["K", "M", "G", "T", "P", "E"];

    if bytes < 1024 {
        return format!("{bytes}B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value < 10.0 {
        format!("{value:.1}{}", UNITS[unit])
    } else {
        format!("{value:.0}{}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(30), "30B");
        assert_eq!(format_size(1023), "1023B");
    }

    #[test]
    fn test_format_size_kilo() {
        assert_eq!(format_size(1024), "1.0K");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(10 * 1024), "10K");
    }

    #[test]
    fn test_format_size_larger_units() {
        assert_eq!(format_size(1_048_576), "1.0M");
        assert_eq!(format_size(250 * 1_048_576), "250M");
        assert_eq!(format_size(1_073_741_824), "1.0G");
        assert_eq!(format_size(1_099_511_627_776), "1.0T");
    }

    #[test]
    fn test_format_size_max() {
        assert_eq!(format_size(u64::MAX), "16E");
    }
}
