//! Layout round-trip across every preset, and bit-layout validator
//! completeness.

use core::time::Duration;

use snowid::{BitLayout, Config, Error, Generator};

const PRESETS: [BitLayout; 8] = [
    BitLayout::L41_10_12_1MS,
    BitLayout::L40_14_9_1MS,
    BitLayout::L39_17_7_1MS,
    BitLayout::L39_15_9_1MS,
    BitLayout::L42_12_9_1MS,
    BitLayout::L39_16_8_10MS,
    BitLayout::L40_16_7_10MS,
    BitLayout::L40_17_6_10MS,
];

#[test]
fn every_preset_round_trips_components() {
    for layout in PRESETS {
        let epoch_ms = 1_700_000_000_000i64;
        let worker = layout.shifts().max_worker_mask as i64;
        let generator = Generator::new(Config::builder(worker).epoch_ms(epoch_ms).layout(layout).build()).unwrap();

        let id = generator.emit().unwrap();
        let components = id.components(&layout, epoch_ms);

        assert!(components.timestamp_ms >= epoch_ms, "{layout:?}");
        assert_eq!(components.worker_id, worker, "{layout:?}");
        assert!(
            (0..=layout.shifts().max_sequence_mask as i64).contains(&components.sequence),
            "{layout:?}"
        );
    }
}

#[test]
fn validator_rejects_bad_sum() {
    let bad = BitLayout {
        timestamp_bits: 41,
        worker_bits: 10,
        sequence_bits: 13,
        time_unit: Duration::from_millis(1),
    };
    assert!(matches!(bad.validate(), Err(Error::Configuration { .. })));
}

#[test]
fn validator_rejects_out_of_range_fields() {
    let too_few_timestamp_bits = BitLayout {
        timestamp_bits: 30,
        worker_bits: 20,
        sequence_bits: 13,
        time_unit: Duration::from_millis(1),
    };
    assert!(too_few_timestamp_bits.validate().is_err());

    let too_many_worker_bits = BitLayout {
        timestamp_bits: 38,
        worker_bits: 19,
        sequence_bits: 6,
        time_unit: Duration::from_millis(1),
    };
    assert!(too_many_worker_bits.validate().is_err());

    let too_few_sequence_bits = BitLayout {
        timestamp_bits: 42,
        worker_bits: 16,
        sequence_bits: 5,
        time_unit: Duration::from_millis(1),
    };
    assert!(too_few_sequence_bits.validate().is_err());
}

#[test]
fn validator_rejects_non_positive_time_unit() {
    let bad = BitLayout {
        time_unit: Duration::ZERO,
        ..BitLayout::L41_10_12_1MS
    };
    assert!(bad.validate().is_err());
}

#[test]
fn validator_accepts_every_preset() {
    for layout in PRESETS {
        assert!(layout.validate().is_ok(), "{layout:?}");
    }
}
