//! Clock-regression tolerance. With simulated regression `D < T`, emission
//! self-heals; with `D > T`, it fails with `ClockRegressed`.

use core::time::Duration;
use std::thread;

use snowid::{BitLayout, Config, Error, Generator, ManualClock};

#[test]
fn regression_within_tolerance_self_heals() {
    let clock = ManualClock::new(50_000);
    let config = Config::builder(1)
        .epoch_ms(0)
        .max_clock_backward(Duration::from_millis(200))
        .layout(BitLayout::L41_10_12_1MS)
        .build();
    let test_clock = clock.clone();
    let generator = Generator::with_clock(config, clock).unwrap();

    let first = generator.emit().unwrap();

    // Regress by 20ms, well within the 200ms tolerance, and have another
    // thread heal it partway through the recovery sleep.
    test_clock.set(49_980);
    let healer = test_clock.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(5));
        healer.set(50_030);
    });

    let second = generator.emit().unwrap();
    assert!(second.int64() > first.int64());
    assert_eq!(generator.metrics().clock_backward_err(), 0);
}

#[test]
fn regression_beyond_tolerance_fails_without_self_healing() {
    let clock = ManualClock::new(10_000);
    let config = Config::builder(1)
        .epoch_ms(0)
        .max_clock_backward(Duration::from_millis(5))
        .layout(BitLayout::L41_10_12_1MS)
        .build();
    let test_clock = clock.clone();
    let generator = Generator::with_clock(config, clock).unwrap();

    let _first = generator.emit().unwrap();

    test_clock.set(1_000);
    let result = generator.emit();

    assert!(matches!(result, Err(Error::ClockRegressed { recovered: false, .. })));
    assert!(generator.metrics().clock_backward_err() >= 1);
}
