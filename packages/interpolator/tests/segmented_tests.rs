#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![allow(clippy::cast_precision_loss)]

mod common;

use common::{assert_close, process_segmented, process_whole, random_source, source_len};
use moosicbox_interpolator::{InterpolatorF32, InterpolatorState};
use test_case::test_case;

// Dyadic rates keep every read position exactly representable, so the
// segmented and single-call runs evaluate identical windows.
#[test_case(0.125; "upsample_by_8")]
#[test_case(0.25; "upsample_by_4")]
#[test_case(0.5; "upsample_by_2")]
#[test_case(1.0; "unit_rate")]
#[test_case(1.5; "downsample_by_1_5")]
#[test_case(2.0; "downsample_by_2")]
#[test_case(3.75; "downsample_by_3_75")]
#[test_case(4.0; "downsample_by_4")]
fn test_segmented_matches_whole_f32(rate: f32) {
    let count = 512;
    let src = random_source::<f32>(source_len(count, f64::from(rate)), 1);

    let whole = process_whole(&src, count, rate);
    let segmented = process_segmented(&src, count, rate, 8, 1);

    assert_close(&whole, &segmented, 1e-5);
}

#[test_case(0.1; "rate_0_1")]
#[test_case(0.3; "rate_0_3")]
#[test_case(0.7; "rate_0_7")]
#[test_case(1.1; "rate_1_1")]
#[test_case(2.9; "rate_2_9")]
#[test_case(7.3; "rate_7_3")]
fn test_segmented_matches_whole_f64(rate: f64) {
    let count = 4096;
    let src = random_source::<f64>(source_len(count, rate), 7);

    let whole = process_whole(&src, count, rate);
    let segmented = process_segmented(&src, count, rate, 8, 7);

    assert_close(&whole, &segmented, 1e-6);
}

#[test_case(1; "seed_1")]
#[test_case(2; "seed_2")]
#[test_case(3; "seed_3")]
#[test_case(42; "seed_42")]
fn test_rate_four_random_segments(seed: u64) {
    let count = 512;
    let rate = 4.0_f32;
    let src = random_source::<f32>(source_len(count, 4.0), seed);

    let whole = process_whole(&src, count, rate);
    let segmented = process_segmented(&src, count, rate, 8, seed);

    assert_close(&whole, &segmented, 1e-5);
}

#[test_case(1; "single_sample_segments")]
#[test_case(2; "up_to_two_samples")]
#[test_case(3; "up_to_three_samples")]
fn test_short_segments(max_segment: usize) {
    let count = 256;
    let rate = 0.375_f32;
    let src = random_source::<f32>(source_len(count, 0.375), 11);

    let whole = process_whole(&src, count, rate);
    let segmented = process_segmented(&src, count, rate, max_segment, 11);

    assert_close(&whole, &segmented, 1e-5);
}

#[test_log::test]
fn test_single_sample_sources_trigger_compaction() {
    let count = 128;
    let rate = 0.25_f32;
    let src = random_source::<f32>(source_len(count, 0.25), 5);
    let whole = process_whole(&src, count, rate);

    let mut dst = vec![0.0; count];
    let mut interpolator = InterpolatorF32::new(count, 0.0);
    let mut max_len = 0;
    let mut compactions = 0;

    for sample in src.chunks(1) {
        let len_before = interpolator.context_len();
        interpolator.process(&mut dst, sample, rate);
        let len_after = interpolator.context_len();

        max_len = max_len.max(len_after);
        if len_after <= len_before {
            compactions += 1;
        }

        if interpolator.is_done() {
            break;
        }
    }

    assert!(interpolator.is_done());
    assert_eq!(max_len, moosicbox_interpolator::DEFAULT_CONTEXT_SIZE);
    assert!(compactions > 0);
    assert_close(&whole, &dst, 1e-5);
}

#[test_log::test]
fn test_fixed_source_chunks_into_one_destination() {
    let count = 512;
    let rate = 0.1_f64;
    let src: Vec<f64> = (1..=source_len(count, rate)).map(|i| i as f64).collect();

    let whole = process_whole(&src, count, rate);

    let mut dst = vec![0.0; count];
    let mut interpolator = moosicbox_interpolator::InterpolatorF64::new(count, 0.0);

    for chunk in src.chunks(8) {
        let state = interpolator.process(&mut dst, chunk, rate);
        assert_ne!(state, InterpolatorState::DestExhausted);

        if state == InterpolatorState::Done {
            break;
        }
    }

    assert!(interpolator.is_done());
    assert_close(&whole, &dst, 1e-9);

    // A cubic through a linear ramp is the ramp itself, so nothing drifts.
    for (i, value) in dst.iter().enumerate() {
        let expected = (i as f64).mul_add(rate, 1.0);
        assert!((value - expected).abs() < 1e-9, "{i}: {value} != {expected}");
    }
}
