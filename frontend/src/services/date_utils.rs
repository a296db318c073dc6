use chrono::{DateTime, Local, NaiveDate, Utc};
use shared::Event;

use calendar_domain::time;

/// Current date in the browser's time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Column header for week and day views, e.g. "Tue 2"
pub fn format_day_header(date: NaiveDate) -> String {
    date.format("%a %-d").to_string()
}

/// "09:00 - 09:30" in local time
pub fn format_event_times(event: &Event) -> String {
    format!(
        "{} - {}",
        time::format_time(event.start, &Local),
        time::format_time(event.end, &Local)
    )
}

/// Hover text for an event chip
pub fn event_tooltip(event: &Event, owner: Option<&str>) -> String {
    let mut text = format!(
        "{}\n{}\n{}",
        event.title,
        event.start.with_timezone(&Local).format("%A, %B %-d, %Y"),
        format_event_times(event)
    );
    if let Some(owner) = owner {
        text.push_str(&format!("\nOwner: {}", owner));
    }
    text
}

/// Hour row label, e.g. "07:00"
pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(format_day_header(date), "Tue 2");
        assert_eq!(hour_label(7), "07:00");
    }
}
