//! Overlap context carried between [`crate::Interpolator::process`] calls.
//!
//! The context holds the most recent source samples that the cubic window
//! may still need once the current source buffer is gone. `context[k]`
//! holds the sample at position `origin + k` in the coordinate frame of the
//! current source buffer, so the window for integer position `ipos` starts
//! at `ipos - origin - 1`.

use arrayvec::ArrayVec;

use crate::{Sample, kernel::WINDOW_LEN};

/// Default context capacity.
///
/// Any capacity above [`COMPACTED_LEN`] works; compaction needs at least one
/// slot to free.
pub const DEFAULT_CONTEXT_SIZE: usize = 9;

/// Number of trailing samples kept when the buffer is compacted, and the
/// length of the buffer rebuilt after a source depletion.
pub const COMPACTED_LEN: usize = 5;

/// Number of leading samples of every new source buffer copied into the
/// context.
pub const LOOKAHEAD: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Context<T, const N: usize> {
    samples: ArrayVec<T, N>,
    origin: isize,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<T: Sample, const N: usize> Context<T, N> {
    /// Creates a context holding `initial` as the sample just before the
    /// first source sample.
    #[must_use]
    pub fn new(initial: T) -> Self {
        const {
            assert!(
                N > COMPACTED_LEN,
                "Interpolator context capacity must exceed the compacted length"
            );
        }

        let mut samples = ArrayVec::new();
        samples.push(initial);

        Self {
            samples,
            origin: -1,
        }
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub const fn origin(&self) -> isize {
        self.origin
    }

    #[must_use]
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// Highest integer position whose whole window lies inside the context.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn max_position(&self) -> isize {
        self.origin + self.samples.len() as isize - 3
    }

    /// Returns the four samples around integer position `ipos`, or `None`
    /// if they are not all buffered.
    #[must_use]
    pub fn window(&self, ipos: isize) -> Option<&[T]> {
        let start = usize::try_from(ipos - self.origin - 1).ok()?;
        self.samples.get(start..start + WINDOW_LEN)
    }

    /// Appends up to [`LOOKAHEAD`] leading samples of `src`, compacting the
    /// buffer whenever it is full.
    pub fn ingest(&mut self, src: &[T]) {
        for &sample in src.iter().take(LOOKAHEAD) {
            if self.samples.is_full() {
                self.compact();
            }
            self.samples.push(sample);
        }
    }

    /// Keeps only the trailing [`COMPACTED_LEN`] samples, shifting the
    /// origin so every kept sample retains its position.
    #[allow(clippy::cast_possible_wrap)]
    fn compact(&mut self) {
        let dropped = self.samples.len() - COMPACTED_LEN;
        self.samples.drain(..dropped);
        self.origin += dropped as isize;

        log::trace!(
            "compact: dropped={dropped} origin={} len={}",
            self.origin,
            self.samples.len()
        );
    }

    /// Re-targets the context to the next source buffer once `src` has been
    /// consumed.
    ///
    /// Buffers longer than [`LOOKAHEAD`] replace the context with the two
    /// newest buffered samples followed by the last three of `src`. Shorter
    /// buffers were ingested completely, so only the origin moves.
    #[allow(clippy::cast_possible_wrap)]
    pub fn rebuild(&mut self, src: &[T]) {
        let src_len = src.len();

        if src_len > LOOKAHEAD {
            let len = self.samples.len();
            let tail = [
                self.samples[len - 2],
                self.samples[len - 1],
                src[src_len - 3],
                src[src_len - 2],
                src[src_len - 1],
            ];

            self.samples.clear();
            self.samples.extend(tail);
            self.origin = -(COMPACTED_LEN as isize);
        } else {
            self.origin -= src_len as isize;
        }

        log::trace!(
            "rebuild: src_len={src_len} origin={} len={}",
            self.origin,
            self.samples.len()
        );
    }
}
