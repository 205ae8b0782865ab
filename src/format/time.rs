use chrono::{DateTime, Local};

pub(crate) fn format_display_time(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_value_is_shown_verbatim() {
        assert_eq!(format_display_time("yesterday"), "yesterday");
    }

    #[test]
    fn iso_timestamp_is_shortened() {
        let shown = format_display_time("2024-05-01T08:30:00.000Z");
        assert_eq!(shown.len(), "2024-05-01 08:30".len());
        assert!(shown.starts_with("2024-0"));
    }
}
