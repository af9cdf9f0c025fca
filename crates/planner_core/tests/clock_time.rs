use planner_core::{ClockTime, Meridiem};

#[test]
fn twelve_hour_round_trip_covers_every_picker_value() {
    for meridiem in [Meridiem::Am, Meridiem::Pm] {
        for hour in 1..=12u8 {
            for minute in 0..=59u8 {
                let clock = ClockTime::new(hour, minute, meridiem).unwrap();
                let (hour_24, minute_24) = clock.to_24_hour();
                assert!(hour_24 < 24);
                assert_eq!(minute_24, minute);

                let back = ClockTime::from_24_hour(hour_24, minute_24).unwrap();
                assert_eq!(back, clock, "{clock} did not survive a round trip");
                assert_eq!(ClockTime::from_naive_time(clock.to_naive_time()), clock);
            }
        }
    }
}

#[test]
fn every_24_hour_value_has_exactly_one_picker_value() {
    let mut seen = std::collections::HashSet::new();
    for hour in 0..24u8 {
        let clock = ClockTime::from_24_hour(hour, 0).unwrap();
        assert_eq!(clock.to_24_hour(), (hour, 0));
        assert!(seen.insert((clock.hour(), clock.meridiem())));
    }
    assert_eq!(seen.len(), 24);
}

#[test]
fn boundary_hours_map_as_expected() {
    let cases = [
        ("12:00 AM", "00:00"),
        ("12:59 AM", "00:59"),
        ("1:00 AM", "01:00"),
        ("11:59 AM", "11:59"),
        ("12:00 PM", "12:00"),
        ("1:00 PM", "13:00"),
        ("11:59 PM", "23:59"),
    ];
    for (label, expected) in cases {
        let clock: ClockTime = label.parse().unwrap();
        assert_eq!(clock.label_24_hour(), expected, "{label}");
        assert_eq!(clock.to_string(), label);
    }
}
