#![allow(dead_code, clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use moosicbox_interpolator::{Interpolator, InterpolatorState, Sample};
use rand::{Rng as _, SeedableRng as _, rngs::SmallRng};

/// Upper bound on `process` calls for a single run before a test gives up.
pub const MAX_CALLS: usize = 1_000_000;

/// Source length that lets `count` outputs at `rate` complete, including the
/// two trailing samples the cubic window reads past the last position.
pub fn source_len(count: usize, rate: f64) -> usize {
    (count as f64 * rate).ceil() as usize + 2
}

pub fn random_source<T: Sample>(len: usize, seed: u64) -> Vec<T> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..len).map(|_| T::from_f64(rng.random::<f64>())).collect()
}

/// Runs the whole stream through a single `process` call.
pub fn process_whole<T: Sample>(src: &[T], count: usize, rate: T) -> Vec<T> {
    let mut dst = vec![T::ZERO; count];
    let mut interpolator: Interpolator<T> = Interpolator::new(count, T::ZERO);

    let state = interpolator.process(&mut dst, src, rate);

    assert_eq!(state, InterpolatorState::Done);
    assert_eq!(interpolator.remaining(), 0);

    dst
}

/// Splits both source and destination into buffers of random length in
/// `1..=max_segment` and drives `process` until the run is done.
///
/// Every call is checked for monotonic progress: `remaining` drops by exactly
/// the number of samples written into the destination buffer.
pub fn process_segmented<T: Sample>(
    src: &[T],
    count: usize,
    rate: T,
    max_segment: usize,
    seed: u64,
) -> Vec<T> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut interpolator: Interpolator<T> = Interpolator::new(count, T::ZERO);

    let mut output = Vec::with_capacity(count);
    let mut src_offset = 0;
    let mut src_segment: &[T] = &[];
    let mut dst_segment: Vec<T> = Vec::new();

    for _ in 0..MAX_CALLS {
        let state = interpolator.state();

        if matches!(
            state,
            InterpolatorState::Init | InterpolatorState::SourceExhausted
        ) {
            let len = rng
                .random_range(1..=max_segment)
                .min(src.len() - src_offset);
            src_segment = &src[src_offset..src_offset + len];
            src_offset += len;
        }

        if matches!(
            state,
            InterpolatorState::Init | InterpolatorState::DestExhausted
        ) {
            let len = rng.random_range(1..=max_segment).min(count - output.len());
            dst_segment = vec![T::ZERO; len];
        }

        let remaining = interpolator.remaining();
        let dst_index = interpolator.dst_index();

        let state = interpolator.process(&mut dst_segment, src_segment, rate);

        let written = match state {
            InterpolatorState::DestExhausted => dst_segment.len() - dst_index,
            _ => interpolator.dst_index() - dst_index,
        };
        assert_eq!(remaining - interpolator.remaining(), written);
        assert_eq!(
            state == InterpolatorState::Done,
            interpolator.remaining() == 0
        );

        match state {
            InterpolatorState::DestExhausted => output.extend_from_slice(&dst_segment),
            InterpolatorState::Done => {
                output.extend_from_slice(&dst_segment);
                return output;
            }
            InterpolatorState::SourceExhausted | InterpolatorState::Init => {}
        }
    }

    panic!("Segmented run did not finish within {MAX_CALLS} calls");
}

pub fn assert_close<T: Sample>(expected: &[T], actual: &[T], tolerance: f64) {
    assert_eq!(expected.len(), actual.len());

    for (i, (a, b)) in expected.iter().zip(actual).enumerate() {
        let diff = (a.to_f64() - b.to_f64()).abs();
        assert!(
            diff <= tolerance,
            "sample {i} differs: expected={a} actual={b} diff={diff}"
        );
    }
}
