use std::time::Duration;

use jiff::{
    civil::date,
    tz::{offset, TimeZone},
    Timestamp,
};

use crate::{
    error::PomodoroError,
    models::{Category, Interval, IntervalState},
};

fn create_test_interval(category: Category) -> Interval {
    Interval {
        id: 42,
        start_time: Some(Timestamp::from_second(1640995200).unwrap()), // 2022-01-01 00:00:00 UTC
        planned_duration: Duration::from_secs(25 * 60),
        actual_duration: Duration::from_secs(10 * 60),
        category,
        state: IntervalState::Paused,
    }
}

#[test]
fn test_state_codes_round_trip() {
    for state in [
        IntervalState::NotStarted,
        IntervalState::Running,
        IntervalState::Paused,
        IntervalState::Done,
        IntervalState::Cancelled,
    ] {
        assert_eq!(IntervalState::from_code(state.code()).unwrap(), state);
    }
}

#[test]
fn test_unknown_state_code_is_invalid_state() {
    let err = IntervalState::from_code(9).unwrap_err();
    assert!(matches!(err, PomodoroError::InvalidState { code: 9 }));
}

#[test]
fn test_terminal_states() {
    assert!(IntervalState::Done.is_terminal());
    assert!(IntervalState::Cancelled.is_terminal());
    assert!(!IntervalState::Running.is_terminal());
    assert!(!IntervalState::Paused.is_terminal());
    assert!(!IntervalState::NotStarted.is_terminal());
}

#[test]
fn test_state_from_str() {
    assert_eq!("Paused".parse::<IntervalState>().unwrap(), IntervalState::Paused);
    assert_eq!("canceled".parse::<IntervalState>().unwrap(), IntervalState::Cancelled);
    assert!("stopped".parse::<IntervalState>().is_err());
}

#[test]
fn test_category_parse_is_case_sensitive() {
    assert_eq!("ShortBreak".parse::<Category>().unwrap(), Category::ShortBreak);
    assert!("shortbreak".parse::<Category>().is_err());
}

#[test]
fn test_category_filter_strips_wildcards() {
    assert!(Category::ShortBreak.matches_filter("%Break"));
    assert!(Category::LongBreak.matches_filter("%Break%"));
    assert!(!Category::Pomodoro.matches_filter("%Break"));
    assert!(Category::Pomodoro.matches_filter("%Pomodoro"));
    assert!(!Category::Pomodoro.matches_filter("pomodoro"));
    assert!(Category::Pomodoro.matches_filter(""));
}

#[test]
fn test_is_break() {
    assert!(!Category::Pomodoro.is_break());
    assert!(Category::ShortBreak.is_break());
    assert!(Category::LongBreak.is_break());
}

#[test]
fn test_new_interval_defaults() {
    let interval = Interval::new(Category::LongBreak, Duration::from_secs(900));
    assert_eq!(interval.id, 0);
    assert_eq!(interval.start_time, None);
    assert_eq!(interval.actual_duration, Duration::ZERO);
    assert_eq!(interval.state, IntervalState::NotStarted);
}

#[test]
fn test_remaining_saturates() {
    let mut interval = create_test_interval(Category::Pomodoro);
    assert_eq!(interval.remaining(), Duration::from_secs(15 * 60));

    interval.actual_duration = Duration::from_secs(30 * 60);
    assert_eq!(interval.remaining(), Duration::ZERO);
}

#[test]
fn test_started_on_uses_given_zone() {
    let interval = create_test_interval(Category::Pomodoro);

    assert!(interval.started_on_in(date(2022, 1, 1), &TimeZone::UTC));
    assert!(!interval.started_on_in(date(2022, 1, 2), &TimeZone::UTC));

    // Midnight UTC is still the previous evening at UTC-05.
    let utc_minus_five = TimeZone::fixed(offset(-5));
    assert!(interval.started_on_in(date(2021, 12, 31), &utc_minus_five));
}

#[test]
fn test_never_started_matches_no_day() {
    let interval = Interval::new(Category::Pomodoro, Duration::from_secs(60));
    assert!(!interval.started_on_in(date(2022, 1, 1), &TimeZone::UTC));
}

#[test]
fn test_serializes_durations_as_millis() {
    let interval = create_test_interval(Category::ShortBreak);
    let json = serde_json::to_string(&interval).unwrap();

    assert!(json.contains("\"planned_duration\":1500000"));
    assert!(json.contains("\"actual_duration\":600000"));
    assert!(json.contains("\"category\":\"ShortBreak\""));
    assert!(json.contains("\"state\":\"paused\""));

    let back: Interval = serde_json::from_str(&json).unwrap();
    assert_eq!(back, interval);
}
