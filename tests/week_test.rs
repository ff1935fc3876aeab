use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use maromba::clock::{week_start_for, Clock};

#[test]
fn midweek_instant_resolves_to_monday_of_same_week() {
    // Wednesday 2025-06-04, midday UTC (local Wednesday as well)
    let instant = Utc.with_ymd_and_hms(2025, 6, 4, 15, 0, 0).unwrap();
    assert_eq!(week_start_for(instant), "2025-06-02");
}

#[test]
fn sunday_resolves_to_monday_six_days_back() {
    let sunday = Utc.with_ymd_and_hms(2025, 6, 8, 12, 0, 0).unwrap();
    assert_eq!(week_start_for(sunday), "2025-06-02");
}

#[test]
fn resolution_uses_the_fixed_timezone_not_utc() {
    // 01:00 UTC on Monday is still 22:00 Sunday at UTC-03:00, so the week
    // has not rolled over yet.
    let early_monday_utc = Utc.with_ymd_and_hms(2025, 6, 2, 1, 0, 0).unwrap();
    assert_eq!(week_start_for(early_monday_utc), "2025-05-26");
}

#[test]
fn month_boundary_yields_monday_in_previous_month() {
    // Sunday 2025-06-01: its Monday is 2025-05-26
    let sunday = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(week_start_for(sunday), "2025-05-26");
}

#[test]
fn year_boundary_yields_monday_in_previous_year() {
    // Thursday 2026-01-01: its Monday is 2025-12-29
    let new_year = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    assert_eq!(week_start_for(new_year), "2025-12-29");
}

#[test]
fn week_start_is_always_a_monday() {
    let base = Utc.with_ymd_and_hms(2025, 2, 20, 12, 0, 0).unwrap();
    for offset in 0..21 {
        let instant = base + Duration::days(offset);
        let week = week_start_for(instant);
        let date = NaiveDate::parse_from_str(&week, "%Y-%m-%d").unwrap();
        assert_eq!(date.weekday(), Weekday::Mon, "not a Monday for offset {}", offset);
    }
}

#[test]
fn week_start_is_stable_within_a_week() {
    let monday = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    let sunday = Utc.with_ymd_and_hms(2025, 6, 8, 12, 0, 0).unwrap();
    assert_eq!(week_start_for(monday), week_start_for(sunday));
}

#[test]
fn fixed_clock_agrees_with_the_free_function() {
    let instant = Utc.with_ymd_and_hms(2025, 6, 4, 15, 0, 0).unwrap();
    let clock = Clock::fixed(instant);
    assert_eq!(clock.week_start(), week_start_for(instant));
    assert_eq!(clock.today(), "2025-06-04");
    assert_eq!(clock.timestamp_millis(), instant.timestamp_millis());
}
