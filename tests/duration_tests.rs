//! Codec tests: ISO-8601 duration encode/decode and decimal hours.

use chrono::Duration;
use timecard::utils::duration::{decode, encode};

#[test]
fn encodes_hours_and_minutes() {
    assert_eq!(encode(Duration::seconds(8 * 3600 + 30 * 60)), "PT8H30M");
}

#[test]
fn encodes_zero_as_pt0s() {
    assert_eq!(encode(Duration::seconds(0)), "PT0S");
}

#[test]
fn encodes_whole_days_without_time_part() {
    assert_eq!(encode(Duration::seconds(2 * 86_400)), "P2D");
}

#[test]
fn encodes_mixed_components() {
    let d = Duration::seconds(86_400 + 2 * 3600 + 3 * 60 + 4);
    assert_eq!(encode(d), "P1DT2H3M4S");
}

#[test]
fn decodes_full_form() {
    let parts = decode("P2DT3H4M5S").unwrap();
    assert_eq!(parts.days, 2);
    assert_eq!(parts.hours, 3);
    assert_eq!(parts.minutes, 4);
    assert_eq!(parts.seconds, 5.0);
    assert_eq!(parts.total_seconds(), (2 * 86_400 + 3 * 3600 + 4 * 60 + 5) as f64);
}

#[test]
fn decodes_eight_and_a_half_hours() {
    let parts = decode("PT8H30M").unwrap();
    assert!((parts.total_hours() - 8.5).abs() < 1e-9);
}

#[test]
fn decodes_fractional_seconds() {
    let parts = decode("PT0.5S").unwrap();
    assert!((parts.seconds - 0.5).abs() < 1e-9);
}

#[test]
fn round_trip_preserves_elapsed_seconds() {
    for secs in [0i64, 1, 59, 60, 3599, 3600, 8 * 3600 + 30 * 60, 86_400, 90_061] {
        let text = encode(Duration::seconds(secs));
        let parts = decode(&text).unwrap();
        assert_eq!(parts.total_seconds(), secs as f64, "round-trip of {}", text);
    }
}

#[test]
fn rejects_malformed_literals() {
    for bad in ["", "P", "PT", "T8H", "8h30m", "PT3X", "PTH", "PT1H2H", "PT2M1H", "P1DT"] {
        assert!(decode(bad).is_err(), "expected error for {:?}", bad);
    }
}
