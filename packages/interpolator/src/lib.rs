//! Incremental, arbitrary-rate 4-point cubic interpolation.
//!
//! This crate converts a mono sample stream from one rate to another by
//! evaluating a 4-point cubic at fractional read positions. The caller may
//! split both the source and the destination into buffers of any length and
//! drive [`Interpolator::process`] repeatedly; the output equals what a
//! single call over the whole stream would produce. A small overlap context
//! of past source samples and a fractional position carry the stream across
//! buffer boundaries.
//!
//! After each call [`Interpolator::state`] tells the caller what to supply
//! next:
//!
//! * [`InterpolatorState::SourceExhausted`]: pass a new source buffer and
//!   keep the same destination buffer.
//! * [`InterpolatorState::DestExhausted`]: pass a new destination buffer and
//!   keep the same source buffer.
//! * [`InterpolatorState::Done`]: the requested number of samples has been
//!   written.
//!
//! # Example
//!
//! ```rust
//! # use moosicbox_interpolator::{InterpolatorF32, InterpolatorState};
//! // Upsample a ramp by a factor of 2 (rate is the source step per output
//! // sample). The initial sample stands in for the sample before `src[0]`.
//! let src = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let mut dst = [0.0_f32; 8];
//!
//! let mut interpolator = InterpolatorF32::new(dst.len(), -1.0);
//! let state = interpolator.process(&mut dst, &src, 0.5);
//!
//! assert_eq!(state, InterpolatorState::Done);
//! assert_eq!(dst, [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5]);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod context;
pub mod error;
pub mod kernel;
pub mod sample;

pub use context::DEFAULT_CONTEXT_SIZE;
pub use error::{Error, Result};
pub use sample::Sample;

use context::Context;

/// Why the last [`Interpolator::process`] call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolatorState {
    /// All requested samples have been written.
    Done,
    /// Freshly created or reset; `process` has not been called yet.
    Init,
    /// The source buffer is consumed. Supply the next source buffer together
    /// with the same destination buffer.
    SourceExhausted,
    /// The destination buffer is full. Supply a new destination buffer
    /// together with the same source buffer.
    DestExhausted,
}

/// Single precision interpolator with the default context size.
pub type InterpolatorF32 = Interpolator<f32>;

/// Double precision interpolator with the default context size.
pub type InterpolatorF64 = Interpolator<f64>;

/// Stateful cubic interpolator for one sample stream.
///
/// `N` is the capacity of the overlap context and must exceed
/// [`context::COMPACTED_LEN`].
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolator<T, const N: usize = DEFAULT_CONTEXT_SIZE> {
    context: Context<T, N>,
    /// Read position relative to the current source buffer.
    position: T,
    /// Write offset into the current destination buffer.
    dst_index: usize,
    remaining: usize,
    state: InterpolatorState,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<T: Sample, const N: usize> Interpolator<T, N> {
    /// Creates an interpolator that will write `num_to_write` samples.
    ///
    /// `initial` stands in for the source sample preceding the stream so the
    /// first output can be computed without earlier history.
    #[must_use]
    pub fn new(num_to_write: usize, initial: T) -> Self {
        log::debug!("new: num_to_write={num_to_write} initial={initial} context_size={N}");

        Self {
            context: Context::new(initial),
            position: T::ZERO,
            dst_index: 0,
            remaining: num_to_write,
            state: InterpolatorState::Init,
        }
    }

    /// Restores the freshly created state for a new run.
    pub fn reset(&mut self, num_to_write: usize, initial: T) {
        *self = Self::new(num_to_write, initial);
    }

    #[must_use]
    pub const fn state(&self) -> InterpolatorState {
        self.state
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == InterpolatorState::Done
    }

    /// Number of samples still owed for the whole run.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    #[must_use]
    pub const fn position(&self) -> T {
        self.position
    }

    /// Offset at which the next call continues the current destination
    /// buffer.
    #[must_use]
    pub const fn dst_index(&self) -> usize {
        self.dst_index
    }

    #[must_use]
    pub fn context_len(&self) -> usize {
        self.context.len()
    }

    #[must_use]
    pub const fn context_origin(&self) -> isize {
        self.context.origin()
    }

    #[must_use]
    pub const fn context(&self) -> &Context<T, N> {
        &self.context
    }

    /// Writes interpolated samples into `dst` while reading `src` at steps
    /// of `rate` source samples per output sample.
    ///
    /// Returns the new [`InterpolatorState`].
    ///
    /// # Panics
    ///
    /// * If `rate` is not finite and greater than zero
    /// * If `dst` is shorter than [`Self::dst_index`] when continuing a
    ///   destination buffer
    pub fn process(&mut self, dst: &mut [T], src: &[T], rate: T) -> InterpolatorState {
        match self.try_process(dst, src, rate) {
            Ok(state) => state,
            Err(e) => panic!("Invalid interpolator input: {e}"),
        }
    }

    /// Checked variant of [`Self::process`].
    ///
    /// # Errors
    ///
    /// * If `rate` is not finite and greater than zero
    /// * If `dst` is shorter than [`Self::dst_index`]
    pub fn try_process(&mut self, dst: &mut [T], src: &[T], rate: T) -> Result<InterpolatorState> {
        if !rate.is_finite() || rate <= T::ZERO {
            return Err(Error::InvalidRate(rate.to_f64()));
        }
        if dst.len() < self.dst_index {
            return Err(Error::DestinationTooShort {
                len: dst.len(),
                offset: self.dst_index,
            });
        }

        // A call following DestExhausted continues the same source buffer,
        // whose leading samples are already in the context.
        if self.state != InterpolatorState::DestExhausted {
            self.context.ingest(src);
        }

        self.state = InterpolatorState::Done;

        let available = dst.len() - self.dst_index;
        let mut n = if available < self.remaining {
            self.state = InterpolatorState::DestExhausted;
            available
        } else {
            self.remaining
        };

        n = self.read_from_context(dst, rate, n);

        if n > 0 {
            n = self.fit_to_source(src.len(), rate, n);
            self.read_from_src(dst, src, rate, n);
        }

        match self.state {
            InterpolatorState::SourceExhausted => {
                self.position -= T::from_usize(src.len());
                self.context.rebuild(src);
            }
            InterpolatorState::DestExhausted => {
                self.dst_index = 0;
            }
            InterpolatorState::Done | InterpolatorState::Init => {}
        }

        log::trace!(
            "process: state={:?} remaining={} position={} dst_index={} src_len={} dst_len={}",
            self.state,
            self.remaining,
            self.position,
            self.dst_index,
            src.len(),
            dst.len(),
        );

        Ok(self.state)
    }

    /// Writes up to `n` samples whose windows lie entirely in the context.
    /// Returns how many of the `n` are still owed.
    fn read_from_context(&mut self, dst: &mut [T], rate: T, mut n: usize) -> usize {
        let max_position = self.context.max_position();
        let mut pos = self.position;
        let mut written = 0;
        let mut ipos = pos.floor().to_isize();

        while ipos <= max_position && n > 0 {
            // Positions at call start never fall below the buffered range, so
            // every window up to `max_position` is present.
            let window = self.context.window(ipos);
            debug_assert!(
                window.is_some(),
                "position {pos} is before context origin {}",
                self.context.origin()
            );
            let Some(window) = window else {
                break;
            };

            dst[self.dst_index + written] = kernel::cubic(window, pos - T::from_isize(ipos));

            pos += rate;
            n -= 1;
            written += 1;
            ipos = pos.floor().to_isize();
        }

        self.position = pos;
        self.remaining -= written;
        self.dst_index += written;

        n
    }

    /// Shrinks `n` to the number of samples `src` can still provide windows
    /// for, marking the source as exhausted when it falls short.
    #[allow(clippy::cast_possible_wrap)]
    fn fit_to_source(&mut self, src_len: usize, rate: T, n: usize) -> usize {
        let src_len = src_len as isize;
        let last_pos = self.position + T::from_usize(n - 1) * rate;

        if last_pos.floor().to_isize() <= src_len - 3 {
            return n;
        }

        self.state = InterpolatorState::SourceExhausted;

        let fits = ((T::from_isize(src_len - 2) - self.position) / rate)
            .ceil()
            .to_isize();

        usize::try_from(fits).map_or(0, |fits| fits.min(n))
    }

    fn read_from_src(&mut self, dst: &mut [T], src: &[T], rate: T, n: usize) {
        let mut pos = self.position;
        let mut written = 0;

        while written < n {
            let ipos = pos.floor().to_isize();
            let window = usize::try_from(ipos - 1)
                .ok()
                .and_then(|start| src.get(start..start + kernel::WINDOW_LEN));

            // Rounding in the accumulated position can step one sample
            // further than `fit_to_source` predicted.
            let Some(window) = window else {
                self.state = InterpolatorState::SourceExhausted;
                break;
            };

            dst[self.dst_index + written] = kernel::cubic(window, pos - T::from_isize(ipos));

            pos += rate;
            written += 1;
        }

        self.position = pos;
        self.remaining -= written;
        self.dst_index += written;
    }
}
