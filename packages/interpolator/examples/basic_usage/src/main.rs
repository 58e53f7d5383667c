#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Basic usage example for `moosicbox_interpolator`
//!
//! Runs three self-checks against the interpolator:
//! - Unit rate: interpolating at integral positions returns the source
//! - Segmented: random source/destination chunking over a sweep of rates
//!   matches a single call over the whole stream
//! - Drift: a ramp fed in fixed 8-sample chunks stays on the ramp

use clap::{Parser, ValueEnum};
use moosicbox_interpolator::{Interpolator, InterpolatorState, Sample};
use rand::{Rng as _, SeedableRng as _, rngs::SmallRng};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Precision {
    F32,
    F64,
}

#[derive(Parser, Debug)]
#[command(about = "Self-checks for the cubic interpolator")]
struct Args {
    /// Number of output samples per run
    #[arg(short, long, default_value_t = 512)]
    count: usize,

    /// First rate of the segmented sweep
    #[arg(long, default_value_t = 0.1)]
    rate: f64,

    /// Exclusive end of the segmented sweep
    #[arg(long, default_value_t = 8.0)]
    rate_end: f64,

    #[arg(long, default_value_t = 0.1)]
    rate_step: f64,

    /// Longest random source/destination chunk
    #[arg(long, default_value_t = 8)]
    max_segment: usize,

    #[arg(long, default_value_t = 1)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Precision::F64)]
    precision: Precision,

    /// Largest accepted difference between chunked and single-call output
    #[arg(long, default_value_t = 1e-5)]
    tolerance: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.rate <= 0.0 || args.rate_step <= 0.0 {
        return Err("rate and rate step must be greater than zero".into());
    }
    if args.max_segment == 0 {
        return Err("max segment must be at least 1".into());
    }

    let errors = match args.precision {
        Precision::F32 => run_checks::<f32>(&args),
        Precision::F64 => run_checks::<f64>(&args),
    };

    if errors > 0 {
        return Err(format!("{errors} errors encountered").into());
    }

    println!("All checks passed");

    Ok(())
}

fn run_checks<T: Sample>(args: &Args) -> usize {
    let mut errors = unit_rate_check::<T>(args.count, args.seed);

    let mut rate = args.rate;
    while rate < args.rate_end {
        errors += segmented_check::<T>(args, rate);
        rate += args.rate_step;
    }

    errors + drift_check::<T>(args.count, args.rate, args.tolerance)
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn source_len(count: usize, rate: f64) -> usize {
    (count as f64 * rate).ceil() as usize + 2
}

fn random_source<T: Sample>(len: usize, rng: &mut SmallRng) -> Vec<T> {
    (0..len).map(|_| T::from_f64(rng.random::<f64>())).collect()
}

fn process_whole<T: Sample>(src: &[T], count: usize, rate: T) -> Vec<T> {
    let mut dst = vec![T::ZERO; count];
    let mut interpolator: Interpolator<T> = Interpolator::new(count, T::ZERO);
    interpolator.process(&mut dst, src, rate);
    dst
}

fn count_mismatches<T: Sample>(expected: &[T], actual: &[T], tolerance: f64) -> usize {
    expected
        .iter()
        .zip(actual)
        .enumerate()
        .filter(|(i, (a, b))| {
            let mismatch = (a.to_f64() - b.to_f64()).abs() > tolerance;
            if mismatch {
                log::error!("sample {i}: expected={a} actual={b}");
            }
            mismatch
        })
        .count()
}

/// At unit rate every output lands on a knot, so the output is the source.
fn unit_rate_check<T: Sample>(count: usize, seed: u64) -> usize {
    let mut rng = SmallRng::seed_from_u64(seed);
    let src = random_source::<T>(count + 2, &mut rng);

    let dst = process_whole(&src, count, T::ONE);
    let errors = count_mismatches(&src[..count], &dst, 0.0);

    println!("Unit rate check done, {errors} errors encountered.");
    errors
}

fn segmented_check<T: Sample>(args: &Args, rate: f64) -> usize {
    let count = args.count;
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let src = random_source::<T>(source_len(count, rate), &mut rng);
    let rate_t = T::from_f64(rate);

    let mut interpolator: Interpolator<T> = Interpolator::new(count, T::ZERO);
    let mut output = Vec::with_capacity(count);
    let mut src_offset = 0;
    let mut src_segment: &[T] = &[];
    let mut dst_segment: Vec<T> = Vec::new();
    let mut calls = 0_usize;

    loop {
        let state = interpolator.state();

        if matches!(
            state,
            InterpolatorState::Init | InterpolatorState::SourceExhausted
        ) {
            if src_offset == src.len() && state == InterpolatorState::SourceExhausted {
                log::error!("rate {rate:.2}: source ran out after {calls} calls");
                return 1;
            }
            let len = rng
                .random_range(1..=args.max_segment)
                .min(src.len() - src_offset);
            src_segment = &src[src_offset..src_offset + len];
            src_offset += len;
        }

        if matches!(
            state,
            InterpolatorState::Init | InterpolatorState::DestExhausted
        ) {
            let len = rng
                .random_range(1..=args.max_segment)
                .min(count - output.len());
            dst_segment = vec![T::ZERO; len];
        }

        calls += 1;

        match interpolator.process(&mut dst_segment, src_segment, rate_t) {
            InterpolatorState::DestExhausted => output.extend_from_slice(&dst_segment),
            InterpolatorState::Done => {
                output.extend_from_slice(&dst_segment);
                break;
            }
            InterpolatorState::SourceExhausted | InterpolatorState::Init => {}
        }
    }

    let reference = process_whole(&src, count, rate_t);
    let errors = count_mismatches(&reference, &output, args.tolerance);

    log::debug!("rate {rate:.2}: {calls} calls");
    println!("Segmented RW test at rate {rate:.2} done, {errors} errors encountered.");
    errors
}

/// Feeds a ramp in fixed 8-sample chunks into one destination buffer.
#[allow(clippy::cast_precision_loss)]
fn drift_check<T: Sample>(count: usize, rate: f64, tolerance: f64) -> usize {
    let rate_t = T::from_f64(rate);
    let src: Vec<T> = (1..=source_len(count, rate))
        .map(T::from_usize)
        .collect();

    let mut dst = vec![T::ZERO; count];
    let mut interpolator: Interpolator<T> = Interpolator::new(count, T::ZERO);

    for chunk in src.chunks(8) {
        if interpolator.process(&mut dst, chunk, rate_t) == InterpolatorState::Done {
            break;
        }
    }

    let reference = process_whole(&src, count, rate_t);
    let mut errors = count_mismatches(&reference, &dst, tolerance);

    // Rounding accumulates in the read position, so the tolerance against the
    // exact ramp grows with the run length.
    let ramp: Vec<T> = (0..count)
        .map(|i| T::from_f64((i as f64).mul_add(rate, 1.0)))
        .collect();
    errors += count_mismatches(&ramp, &dst, tolerance * count as f64);

    println!("Drift test at rate {rate:.2} done, {errors} errors encountered.");
    errors
}
