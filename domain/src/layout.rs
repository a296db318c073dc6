//! # Grid Layout
//!
//! Pure layout for the calendar grid. The week and day views are one
//! column per day with events positioned by minute of day; the month view
//! is a Sunday-first grid of day cells. The geometry helpers map between
//! pixel offsets and minutes for clicks, drags and resizes.
//!
//! Nothing here holds state: every function is recomputed from the event
//! set and the cursor on each render.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use shared::{DateRange, Event};

use crate::time::{self, MINUTES_PER_DAY};

/// Pixel metrics of the time grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMetrics {
    /// Height of one hour row; 60px means one pixel per minute
    pub hour_height_px: f64,
    /// Events shorter than this are still drawn this tall
    pub min_event_height_px: f64,
    /// Clicks, drops and resizes snap to this many minutes
    pub snap_minutes: u32,
    /// A resize never shrinks an event below this
    pub min_duration_minutes: i64,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            hour_height_px: 60.0,
            min_event_height_px: 20.0,
            snap_minutes: 15,
            min_duration_minutes: 15,
        }
    }
}

impl GridMetrics {
    pub fn px_per_minute(&self) -> f64 {
        self.hour_height_px / 60.0
    }

    pub fn day_height_px(&self) -> f64 {
        self.hour_height_px * 24.0
    }

    fn snap(&self) -> u32 {
        self.snap_minutes.clamp(1, MINUTES_PER_DAY)
    }
}

/// An event placed inside one day column
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEvent {
    pub event: Event,
    pub top_px: f64,
    pub height_px: f64,
    /// Overlap lane of this event and the number of lanes in its cluster
    pub lane: usize,
    pub lanes: usize,
    /// The event started on an earlier day
    pub continues_before: bool,
    /// The event ends on a later day
    pub continues_after: bool,
}

impl PositionedEvent {
    /// Horizontal placement as percentages of the column width
    pub fn left_percent(&self) -> f64 {
        100.0 * self.lane as f64 / self.lanes.max(1) as f64
    }

    pub fn width_percent(&self) -> f64 {
        100.0 / self.lanes.max(1) as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub events: Vec<PositionedEvent>,
}

/// Week or day view layout
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    pub days: Vec<DayColumn>,
    pub hour_height_px: f64,
}

impl TimeGrid {
    pub fn hours(&self) -> impl Iterator<Item = u32> {
        0..24
    }
}

/// Lay out `events` in one column per day of `range`.
///
/// Events spanning midnight appear in every day they touch, clipped to
/// that day. Events hidden by `filter` are skipped.
pub fn time_grid<Tz, F>(
    range: &DateRange,
    events: &[Event],
    tz: &Tz,
    metrics: &GridMetrics,
    filter: F,
) -> TimeGrid
where
    Tz: TimeZone,
    F: Fn(&Event) -> bool,
{
    let visible: Vec<&Event> = events.iter().filter(|event| filter(event)).collect();
    let days = time::dates_in(range, tz)
        .into_iter()
        .map(|date| DayColumn {
            date,
            events: position_day(date, &visible, tz, metrics),
        })
        .collect();

    TimeGrid {
        days,
        hour_height_px: metrics.hour_height_px,
    }
}

fn position_day<Tz: TimeZone>(
    date: NaiveDate,
    events: &[&Event],
    tz: &Tz,
    metrics: &GridMetrics,
) -> Vec<PositionedEvent> {
    let day_start = time::at_local_minute(date, 0, tz);
    let day_end = time::at_local_minute(date + Duration::days(1), 0, tz);
    let day_minutes = (day_end - day_start).num_minutes().max(1) as f64;
    let day_px = metrics.day_height_px();
    let ppm = day_px / day_minutes;

    let mut placed: Vec<PositionedEvent> = events
        .iter()
        .filter(|event| {
            (event.start < day_end && event.end > day_start)
                || (event.start == event.end && event.start >= day_start && event.start < day_end)
        })
        .map(|event| {
            let start = event.start.max(day_start);
            let end = event.end.min(day_end).max(start);
            let top = (start - day_start).num_minutes() as f64 * ppm;
            let height = ((end - start).num_minutes() as f64 * ppm).max(metrics.min_event_height_px);
            PositionedEvent {
                event: (*event).clone(),
                top_px: top.min((day_px - height).max(0.0)),
                height_px: height.min(day_px),
                lane: 0,
                lanes: 1,
                continues_before: event.start < day_start,
                continues_after: event.end > day_end,
            }
        })
        .collect();

    placed.sort_by(|a, b| {
        a.top_px
            .total_cmp(&b.top_px)
            .then_with(|| b.height_px.total_cmp(&a.height_px))
            .then_with(|| a.event.id.cmp(&b.event.id))
    });
    assign_lanes(&mut placed);
    placed
}

/// Greedy lane assignment over clusters of visually overlapping events
fn assign_lanes(placed: &mut [PositionedEvent]) {
    let mut cluster_start = 0;
    let mut cluster_bottom = f64::MIN;
    let mut lane_bottoms: Vec<f64> = Vec::new();

    for index in 0..placed.len() {
        let top = placed[index].top_px;
        let bottom = top + placed[index].height_px;

        if top >= cluster_bottom {
            finish_cluster(&mut placed[cluster_start..index], lane_bottoms.len());
            cluster_start = index;
            lane_bottoms.clear();
        }

        let lane = match lane_bottoms.iter().position(|&lane_bottom| lane_bottom <= top) {
            Some(lane) => {
                lane_bottoms[lane] = bottom;
                lane
            }
            None => {
                lane_bottoms.push(bottom);
                lane_bottoms.len() - 1
            }
        };
        placed[index].lane = lane;
        cluster_bottom = if index == cluster_start { bottom } else { cluster_bottom.max(bottom) };
    }
    let lanes = lane_bottoms.len();
    finish_cluster(&mut placed[cluster_start..], lanes);
}

fn finish_cluster(cluster: &mut [PositionedEvent], lanes: usize) {
    for positioned in cluster {
        positioned.lanes = lanes.max(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Trailing days of the previous month
    PaddingBefore,
    MonthDay,
    /// Leading days of the next month
    PaddingAfter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub kind: CellKind,
    /// Events touching this local date, ordered by start
    pub events: Vec<Event>,
}

/// Month view layout: whole Sunday-first weeks
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub month: NaiveDate,
    pub weeks: Vec<Vec<MonthCell>>,
}

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Lay out the month containing `month` as weeks of seven cells
pub fn month_grid<Tz, F>(month: NaiveDate, events: &[Event], tz: &Tz, filter: F) -> MonthGrid
where
    Tz: TimeZone,
    F: Fn(&Event) -> bool,
{
    let first = time::first_of_month(month);
    let range = time::visible_range(first, time::ViewMode::Month);
    let last = range.end.date_naive() - Duration::days(1);
    let grid_start = time::start_of_week(first);
    let grid_end = time::start_of_week(last) + Duration::days(6);

    let mut sorted: Vec<&Event> = events.iter().filter(|event| filter(event)).collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    let mut date = grid_start;
    while date <= grid_end {
        let kind = if date < first {
            CellKind::PaddingBefore
        } else if date > last {
            CellKind::PaddingAfter
        } else {
            CellKind::MonthDay
        };
        let day_start = time::at_local_minute(date, 0, tz);
        let day_end = time::at_local_minute(date + Duration::days(1), 0, tz);
        let day = DateRange::new(day_start, day_end);
        week.push(MonthCell {
            date,
            kind,
            events: sorted
                .iter()
                .filter(|event| event.intersects(&day))
                .map(|event| (*event).clone())
                .collect(),
        });
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
        date += Duration::days(1);
    }

    MonthGrid { month: first, weeks }
}

/// Minutes after midnight under a vertical offset, snapped down
pub fn minutes_at(y_px: f64, metrics: &GridMetrics) -> u32 {
    let snap = metrics.snap();
    let raw = (y_px.max(0.0) / metrics.px_per_minute()).floor() as u32;
    let snapped = raw - raw % snap;
    snapped.min(MINUTES_PER_DAY - snap)
}

/// Vertical offset of a minute of the day
pub fn offset_of(minutes: u32, metrics: &GridMetrics) -> f64 {
    f64::from(minutes.min(MINUTES_PER_DAY)) * metrics.px_per_minute()
}

/// Instant under a click on an empty slot of `day`'s column
pub fn slot_at<Tz: TimeZone>(day: NaiveDate, y_px: f64, tz: &Tz, metrics: &GridMetrics) -> DateTime<Utc> {
    time::at_local_minute(day, minutes_at(y_px, metrics), tz)
}

/// New interval for `event` dropped at `y_px` in `day`'s column; the duration is kept
pub fn drop_at<Tz: TimeZone>(
    day: NaiveDate,
    y_px: f64,
    event: &Event,
    tz: &Tz,
    metrics: &GridMetrics,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = slot_at(day, y_px, tz, metrics);
    (start, start + (event.end - event.start))
}

/// New interval for `event` dropped on a month cell; the local time of day is kept
pub fn drop_on_date<Tz: TimeZone>(
    date: NaiveDate,
    event: &Event,
    tz: &Tz,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let minute = time::minute_of_day(event.start, tz);
    let start = time::at_local_minute(date, minute, tz);
    (start, start + (event.end - event.start))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Top,
    Bottom,
}

/// New interval after dragging one edge of `event` by `delta_px`.
/// The moved edge snaps to the grid and never crosses the minimum duration.
pub fn resize(
    edge: ResizeEdge,
    event: &Event,
    delta_px: f64,
    metrics: &GridMetrics,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let snap = f64::from(metrics.snap());
    let delta_minutes = ((delta_px / metrics.px_per_minute()) / snap).round() * snap;
    let delta = Duration::minutes(delta_minutes as i64);
    let min_duration = Duration::minutes(metrics.min_duration_minutes.max(1));

    match edge {
        ResizeEdge::Bottom => {
            let end = (event.end + delta).max(event.start + min_duration);
            (event.start, end)
        }
        ResizeEdge::Top => {
            let start = (event.start + delta).min(event.end - min_duration);
            (start, event.end)
        }
    }
}

/// Scroll position that puts `now` a third of the way down the viewport
pub fn scroll_offset<Tz: TimeZone>(
    now: DateTime<Utc>,
    tz: &Tz,
    viewport_px: f64,
    metrics: &GridMetrics,
) -> f64 {
    let current = offset_of(time::minute_of_day(now, tz), metrics);
    (current - viewport_px / 3.0).clamp(0.0, (metrics.day_height_px() - viewport_px).max(0.0))
}

/// Whether `date` is a weekend day (Sunday or Saturday)
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday().num_days_from_sunday(), 0 | 6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use shared::Priority;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            title: id.to_string(),
            start,
            end,
            user_id: "user-a".to_string(),
            priority: Priority::Medium,
            category_id: None,
        }
    }

    fn day_range(d: u32) -> DateRange {
        DateRange::new(utc(2024, 1, d, 0, 0), utc(2024, 1, d + 1, 0, 0))
    }

    #[test]
    fn test_event_positioned_by_minute_of_day() {
        let metrics = GridMetrics::default();
        let events = vec![event("standup", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30))];
        let grid = time_grid(&day_range(2), &events, &Utc, &metrics, |_| true);

        assert_eq!(grid.days.len(), 1);
        let placed = &grid.days[0].events[0];
        assert_eq!(placed.top_px, 540.0);
        assert_eq!(placed.height_px, 30.0);
        assert!(!placed.continues_before && !placed.continues_after);
    }

    #[test]
    fn test_short_event_gets_minimum_height() {
        let metrics = GridMetrics::default();
        let events = vec![event("ping", utc(2024, 1, 2, 10, 0), utc(2024, 1, 2, 10, 5))];
        let grid = time_grid(&day_range(2), &events, &Utc, &metrics, |_| true);
        assert_eq!(grid.days[0].events[0].height_px, 20.0);
    }

    #[test]
    fn test_late_short_event_stays_inside_day() {
        let metrics = GridMetrics::default();
        let events = vec![event("late", utc(2024, 1, 2, 23, 55), utc(2024, 1, 3, 0, 0))];
        let grid = time_grid(&day_range(2), &events, &Utc, &metrics, |_| true);
        let placed = &grid.days[0].events[0];
        assert_eq!(placed.top_px + placed.height_px, metrics.day_height_px());
    }

    #[test]
    fn test_overnight_event_clipped_per_day() {
        let metrics = GridMetrics::default();
        let range = DateRange::new(utc(2024, 1, 2, 0, 0), utc(2024, 1, 4, 0, 0));
        let events = vec![event("night", utc(2024, 1, 2, 22, 0), utc(2024, 1, 3, 2, 0))];
        let grid = time_grid(&range, &events, &Utc, &metrics, |_| true);

        let first = &grid.days[0].events[0];
        assert_eq!(first.top_px, 22.0 * 60.0);
        assert_eq!(first.height_px, 120.0);
        assert!(first.continues_after);

        let second = &grid.days[1].events[0];
        assert_eq!(second.top_px, 0.0);
        assert_eq!(second.height_px, 120.0);
        assert!(second.continues_before);
    }

    #[test]
    fn test_positions_follow_local_time_zone() {
        let metrics = GridMetrics::default();
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let events = vec![event("standup", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30))];
        let grid = time_grid(&day_range(2), &events, &tz, &metrics, |_| true);
        assert_eq!(grid.days[0].events[0].top_px, 11.0 * 60.0);
    }

    #[test]
    fn test_overlapping_events_share_columns() {
        let metrics = GridMetrics::default();
        let events = vec![
            event("a", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 10, 0)),
            event("b", utc(2024, 1, 2, 9, 30), utc(2024, 1, 2, 10, 30)),
            event("c", utc(2024, 1, 2, 12, 0), utc(2024, 1, 2, 13, 0)),
        ];
        let grid = time_grid(&day_range(2), &events, &Utc, &metrics, |_| true);
        let placed = &grid.days[0].events;

        assert_eq!((placed[0].lane, placed[0].lanes), (0, 2));
        assert_eq!((placed[1].lane, placed[1].lanes), (1, 2));
        assert_eq!((placed[2].lane, placed[2].lanes), (0, 1));
        assert_eq!(placed[1].left_percent(), 50.0);
        assert_eq!(placed[2].width_percent(), 100.0);
    }

    #[test]
    fn test_filter_hides_events() {
        let metrics = GridMetrics::default();
        let mut work = event("work", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 10, 0));
        work.category_id = Some("work".to_string());
        let events = vec![work, event("free", utc(2024, 1, 2, 11, 0), utc(2024, 1, 2, 12, 0))];
        let grid = time_grid(&day_range(2), &events, &Utc, &metrics, |e| {
            e.category_id.as_deref() != Some("work")
        });
        assert_eq!(grid.days[0].events.len(), 1);
        assert_eq!(grid.days[0].events[0].event.id, "free");
    }

    #[test]
    fn test_month_grid_padding() {
        // February 2024 starts on a Thursday and ends on a Thursday
        let grid = month_grid(date(2024, 2, 14), &[], &Utc, |_| true);
        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks.iter().all(|week| week.len() == 7));

        let first_week = &grid.weeks[0];
        assert_eq!(first_week[0].date, date(2024, 1, 28));
        assert_eq!(first_week[0].kind, CellKind::PaddingBefore);
        assert_eq!(first_week[4].date, date(2024, 2, 1));
        assert_eq!(first_week[4].kind, CellKind::MonthDay);

        let last_week = &grid.weeks[4];
        assert_eq!(last_week[4].date, date(2024, 2, 29));
        assert_eq!(last_week[5].kind, CellKind::PaddingAfter);
        assert_eq!(last_week[6].date, date(2024, 3, 2));
    }

    #[test]
    fn test_month_grid_places_events_on_each_day() {
        let events = vec![
            event("trip", utc(2024, 1, 10, 18, 0), utc(2024, 1, 12, 9, 0)),
            event("early", utc(2024, 1, 10, 8, 0), utc(2024, 1, 10, 9, 0)),
        ];
        let grid = month_grid(date(2024, 1, 1), &events, &Utc, |_| true);
        let cells: Vec<&MonthCell> = grid.weeks.iter().flatten().collect();
        let on = |d: u32| {
            cells
                .iter()
                .find(|cell| cell.date == date(2024, 1, d))
                .map(|cell| cell.events.iter().map(|e| e.id.as_str()).collect::<Vec<_>>())
                .unwrap()
        };
        assert_eq!(on(10), vec!["early", "trip"]);
        assert_eq!(on(11), vec!["trip"]);
        assert_eq!(on(12), vec!["trip"]);
        assert!(on(13).is_empty());
    }

    #[test]
    fn test_pixel_minute_mapping() {
        let metrics = GridMetrics::default();
        assert_eq!(minutes_at(545.0, &metrics), 540);
        assert_eq!(minutes_at(-10.0, &metrics), 0);
        assert_eq!(minutes_at(5000.0, &metrics), 1440 - 15);
        assert_eq!(offset_of(540, &metrics), 540.0);

        let half = GridMetrics {
            hour_height_px: 30.0,
            ..GridMetrics::default()
        };
        assert_eq!(minutes_at(270.0, &half), 540);
        assert_eq!(offset_of(540, &half), 270.0);
    }

    #[test]
    fn test_snap_longer_than_a_day_pins_to_midnight() {
        let coarse: GridMetrics = serde_json::from_str(r#"{"snap_minutes": 2000}"#).unwrap();
        assert_eq!(coarse.snap_minutes, 2000);
        assert_eq!(minutes_at(600.0, &coarse), 0);
        assert_eq!(minutes_at(5000.0, &coarse), 0);
    }

    #[test]
    fn test_drop_keeps_duration() {
        let metrics = GridMetrics::default();
        let standup = event("standup", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30));
        let (start, end) = drop_at(date(2024, 1, 4), 14.0 * 60.0 + 7.0, &standup, &Utc, &metrics);
        assert_eq!(start, utc(2024, 1, 4, 14, 0));
        assert_eq!(end, utc(2024, 1, 4, 14, 30));
    }

    #[test]
    fn test_drop_on_month_date_keeps_time_of_day() {
        let standup = event("standup", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30));
        let (start, end) = drop_on_date(date(2024, 1, 20), &standup, &Utc);
        assert_eq!(start, utc(2024, 1, 20, 9, 0));
        assert_eq!(end, utc(2024, 1, 20, 9, 30));
    }

    #[test]
    fn test_resize_edges() {
        let metrics = GridMetrics::default();
        let standup = event("standup", utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 30));

        assert_eq!(
            resize(ResizeEdge::Bottom, &standup, 31.0, &metrics),
            (utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 10, 0))
        );
        assert_eq!(
            resize(ResizeEdge::Top, &standup, -60.0, &metrics),
            (utc(2024, 1, 2, 8, 0), utc(2024, 1, 2, 9, 30))
        );
        // cannot shrink below the minimum duration
        assert_eq!(
            resize(ResizeEdge::Bottom, &standup, -120.0, &metrics),
            (utc(2024, 1, 2, 9, 0), utc(2024, 1, 2, 9, 15))
        );
        assert_eq!(
            resize(ResizeEdge::Top, &standup, 120.0, &metrics),
            (utc(2024, 1, 2, 9, 15), utc(2024, 1, 2, 9, 30))
        );
    }

    #[test]
    fn test_scroll_offset() {
        let metrics = GridMetrics::default();
        assert_eq!(scroll_offset(utc(2024, 1, 2, 10, 0), &Utc, 600.0, &metrics), 400.0);
        assert_eq!(scroll_offset(utc(2024, 1, 2, 1, 0), &Utc, 600.0, &metrics), 0.0);
        assert_eq!(scroll_offset(utc(2024, 1, 2, 23, 59), &Utc, 600.0, &metrics), 840.0);
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date(2024, 1, 6)));
        assert!(is_weekend(date(2024, 1, 7)));
        assert!(!is_weekend(date(2024, 1, 8)));
    }
}
