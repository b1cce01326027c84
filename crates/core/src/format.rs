use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Human-readable size with binary thresholds. Bytes are shown whole, larger
/// units with one decimal place.
pub fn format_size(bytes: u64) -> String {
    let value = bytes as f64;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", value / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", value / MB as f64)
    } else {
        format!("{:.1} GB", value / GB as f64)
    }
}

/// ISO-8601 combined date and time with a space separator. Display only.
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `format_timestamp` in the machine's local zone, for rows and summaries a
/// person reads.
pub fn format_local_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp(&timestamp.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Local, TimeZone, Utc};

    use super::{format_local_timestamp, format_size, format_timestamp};

    #[test]
    fn formats_bytes_without_decimals() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn formats_larger_units_with_one_decimal() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(2_000_000), "1.9 MB");
        assert_eq!(format_size(5_000_000), "4.8 MB");
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
        assert_eq!(format_size(5 * 1_099_511_627_776), "5120.0 GB");
    }

    #[test]
    fn formats_timestamp_in_its_own_zone() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_timestamp(&utc), "2024-03-09 07:05:01");

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp(&utc.with_timezone(&offset)),
            "2024-03-09 09:05:01"
        );
    }

    #[test]
    fn local_timestamp_uses_the_local_offset() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let local = Local.from_utc_datetime(&utc.naive_utc());
        assert_eq!(
            format_local_timestamp(&utc),
            local.format("%Y-%m-%d %H:%M:%S").to_string()
        );
    }
}
