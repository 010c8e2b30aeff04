/*MIT License

Copyright (c) 2026 cqt-rs contributors

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Streaming pseudo constant-Q transform.
//!
//! This crate turns a raw audio-rate sample stream into complex time-frequency
//! frames whose effective frequency resolution widens with frequency, much like
//! a wavelet or constant-Q analysis. It is computed cheaply: an ordinary framed
//! FFT followed by an adaptive one-pole smoothing filter run twice across the
//! frequency axis of every frame (see [`smoothing`]).
//!
//! Two implementations share one contract and are numerically interchangeable:
//! [`StreamingCqt`], the straightforward reference, and
//! [`accel::AcceleratedCqt`], which parallelizes across frames. Both accept
//! arbitrarily chunked input: samples left over after the last complete frame
//! are carried into the next `push_samples` call, so frame boundaries do not
//! depend on how callers split the stream.

use num_traits::{Float, FromPrimitive};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftNum, FftPlanner};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

pub mod accel;
pub mod simd;
pub mod smoothing;

pub mod prelude {
    pub use crate::accel::AcceleratedCqt;
    pub use crate::{
        ConfigError, CqtConfig, CqtTransform, Spectrogram, SpectrumFrame, StreamingCqt,
        WindowType, generate_window,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    Hann,
    Hamming,
    Blackman,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError<T: Float + fmt::Debug> {
    /// FFT length must be even, at least 4, and no shorter than the window.
    InvalidFftSize { fft_size: usize, window_len: usize },
    EmptyWindow,
    /// Overlap fraction must lie in `[0, 1)`.
    InvalidOverlap { value: T },
    /// Hop must be at least 1 and no longer than the window.
    InvalidHopSize,
}

impl<T: Float + fmt::Display + fmt::Debug> fmt::Display for ConfigError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFftSize {
                fft_size,
                window_len,
            } => {
                write!(
                    f,
                    "Invalid FFT size {}: must be even, >= 4 and >= window length {}",
                    fft_size, window_len
                )
            }
            ConfigError::EmptyWindow => write!(f, "Analysis window is empty"),
            ConfigError::InvalidOverlap { value } => {
                write!(f, "Overlap fraction {} outside [0, 1)", value)
            }
            ConfigError::InvalidHopSize => write!(f, "Invalid hop size"),
        }
    }
}

impl<T: Float + fmt::Display + fmt::Debug> std::error::Error for ConfigError<T> {}

/// Analysis parameters shared by both transform implementations.
///
/// The window weights, hop and FFT length are fixed at construction; the
/// smoothing coefficients derived from them (see
/// [`smoothing::cqt_coefficients`]) are computed once and never change.
#[derive(Clone)]
pub struct CqtConfig<T: Float> {
    pub window: Vec<T>,
    pub hop: usize,
    pub fft_size: usize,
}

impl<T: Float + FromPrimitive + fmt::Debug> CqtConfig<T> {
    /// Explicit-hop form: window weights, hop in samples, FFT length.
    pub fn new(window: Vec<T>, hop: usize, fft_size: usize) -> Result<Self, ConfigError<T>> {
        if window.is_empty() {
            return Err(ConfigError::EmptyWindow);
        }
        if fft_size < 4 || fft_size % 2 != 0 || fft_size < window.len() {
            return Err(ConfigError::InvalidFftSize {
                fft_size,
                window_len: window.len(),
            });
        }
        // A hop beyond the window length would skip samples no frame ever
        // covers and break the consumed-a-multiple-of-hop accounting.
        if hop == 0 || hop > window.len() {
            return Err(ConfigError::InvalidHopSize);
        }

        Ok(Self {
            window,
            hop,
            fft_size,
        })
    }

    /// Overlap form: hop is derived as `round(window_len * (1 - overlap))`,
    /// clamped to at least one sample.
    pub fn from_overlap(
        overlap: T,
        window: Vec<T>,
        fft_size: usize,
    ) -> Result<Self, ConfigError<T>> {
        if overlap < T::zero() || overlap >= T::one() {
            return Err(ConfigError::InvalidOverlap { value: overlap });
        }
        let window_len = T::from(window.len()).unwrap();
        let hop = (window_len * (T::one() - overlap))
            .round()
            .to_usize()
            .unwrap_or(0)
            .max(1);
        Self::new(window, hop, fft_size)
    }

    /// Number of one-sided frequency bins per frame (`fft_size / 2`; the
    /// Nyquist bin is not part of the output).
    pub fn freq_bins(&self) -> usize {
        self.fft_size / 2
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Axis labels for a spectrogram of the given `(bins, frames)` shape.
    ///
    /// Time indices are the sample offset of each frame's start within the
    /// pushed signal (`k * hop`); callers that stream across multiple pushes
    /// must add their own running offset. Frequency indices are `bins` values
    /// evenly spaced over `[0, pi)` radians per sample.
    pub fn time_and_freq_indices(&self, shape: (usize, usize)) -> (Vec<usize>, Vec<T>) {
        let (bins, frames) = shape;
        let time: Vec<usize> = (0..frames).map(|k| k * self.hop).collect();
        let pi = T::from(std::f64::consts::PI).unwrap();
        let bins_t = T::from(bins).unwrap();
        let freq: Vec<T> = (0..bins)
            .map(|k| pi * T::from(k).unwrap() / bins_t)
            .collect();
        (time, freq)
    }
}

/// Generate analysis window weights of the given length.
pub fn generate_window<T: Float + FromPrimitive>(window_type: WindowType, size: usize) -> Vec<T> {
    let pi = T::from(std::f64::consts::PI).unwrap();
    let two = T::from(2.0).unwrap();

    match window_type {
        WindowType::Hann => (0..size)
            .map(|i| {
                let half = T::from(0.5).unwrap();
                let one = T::one();
                let i_t = T::from(i).unwrap();
                let size_m1 = T::from(size - 1).unwrap();
                half * (one - (two * pi * i_t / size_m1).cos())
            })
            .collect(),
        WindowType::Hamming => (0..size)
            .map(|i| {
                let i_t = T::from(i).unwrap();
                let size_m1 = T::from(size - 1).unwrap();
                T::from(0.54).unwrap() - T::from(0.46).unwrap() * (two * pi * i_t / size_m1).cos()
            })
            .collect(),
        WindowType::Blackman => (0..size)
            .map(|i| {
                let i_t = T::from(i).unwrap();
                let size_m1 = T::from(size - 1).unwrap();
                let angle = two * pi * i_t / size_m1;
                T::from(0.42).unwrap() - T::from(0.5).unwrap() * angle.cos()
                    + T::from(0.08).unwrap() * (two * angle).cos()
            })
            .collect(),
    }
}

/// One smoothed complex spectrum, `freq_bins` one-sided bins.
#[derive(Clone)]
pub struct SpectrumFrame<T: Float> {
    pub freq_bins: usize,
    pub data: Vec<Complex<T>>,
}

impl<T: Float> SpectrumFrame<T> {
    pub fn from_data(data: Vec<Complex<T>>) -> Self {
        let freq_bins = data.len();
        Self { freq_bins, data }
    }
}

/// The frames produced by one `push_samples` call, oldest first. Not a
/// cumulative history.
pub type Spectrogram<T> = Vec<SpectrumFrame<T>>;

/// Shared contract of the reference and accelerated implementations.
///
/// Implementations hold the only cross-call state (the carry of unconsumed
/// samples) as an owned field; the `&mut self` receiver on
/// [`push_samples`](CqtTransform::push_samples) enforces single-writer
/// discipline. Non-finite input samples are not sanitized: NaN/Inf propagate
/// through windowing, FFT and smoothing unchanged.
pub trait CqtTransform<T: Float + FftNum + FromPrimitive + fmt::Debug> {
    fn config(&self) -> &CqtConfig<T>;

    /// The per-bin smoothing coefficients, `freq_bins - 1` complex values.
    fn coefficients(&self) -> &[Complex<T>];

    /// Append `samples` to the carried remainder and emit every complete
    /// frame this makes available.
    ///
    /// Each frame covers `window_len` consecutive samples, advanced by `hop`;
    /// whatever is left after the last complete frame (always fewer than
    /// `window_len` samples) is retained for the next call. Splitting a signal
    /// into chunks and concatenating the per-call outputs yields the same
    /// frames as pushing it whole.
    fn push_samples(&mut self, samples: &[T]) -> Spectrogram<T>;

    /// A trailing partial window is never zero-padded into a frame; it stays
    /// in the carry so a later push continues seamlessly.
    fn flush(&mut self) -> Spectrogram<T> {
        Vec::new()
    }

    /// Discard carried samples, returning to the freshly constructed state.
    fn reset(&mut self);

    /// Number of carried samples awaiting the next complete frame.
    fn buffered_samples(&self) -> usize;

    fn window(&self) -> &[T] {
        &self.config().window
    }

    fn hop(&self) -> usize {
        self.config().hop
    }

    fn time_and_freq_indices(&self, shape: (usize, usize)) -> (Vec<usize>, Vec<T>) {
        self.config().time_and_freq_indices(shape)
    }
}

/// Reference implementation: one frame at a time off a `VecDeque` carry.
pub struct StreamingCqt<T: Float + FftNum> {
    config: CqtConfig<T>,
    coefficients: Vec<Complex<T>>,
    fft: Arc<dyn Fft<T>>,
    input_buffer: VecDeque<T>,
}

impl<T: Float + FftNum + FromPrimitive + fmt::Debug> StreamingCqt<T> {
    pub fn new(config: CqtConfig<T>) -> Self {
        let coefficients = smoothing::cqt_coefficients(config.window_len(), config.fft_size);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);

        Self {
            config,
            coefficients,
            fft,
            input_buffer: VecDeque::new(),
        }
    }
}

impl<T: Float + FftNum + FromPrimitive + fmt::Debug> CqtTransform<T> for StreamingCqt<T> {
    fn config(&self) -> &CqtConfig<T> {
        &self.config
    }

    fn coefficients(&self) -> &[Complex<T>] {
        &self.coefficients
    }

    fn push_samples(&mut self, samples: &[T]) -> Spectrogram<T> {
        self.input_buffer.extend(samples.iter().copied());

        let window_len = self.config.window_len();
        let freq_bins = self.config.freq_bins();
        let mut frames = Vec::new();
        let mut fft_buffer = vec![Complex::new(T::zero(), T::zero()); self.config.fft_size];

        while self.input_buffer.len() >= window_len {
            for i in 0..window_len {
                fft_buffer[i] =
                    Complex::new(self.input_buffer[i] * self.config.window[i], T::zero());
            }
            // Zero padding must be restored every frame; the FFT overwrites it.
            for slot in fft_buffer[window_len..].iter_mut() {
                *slot = Complex::new(T::zero(), T::zero());
            }

            self.fft.process(&mut fft_buffer);

            let mut data: Vec<Complex<T>> = fft_buffer[..freq_bins].to_vec();
            smoothing::smooth_frame(&mut data, &self.coefficients);
            frames.push(SpectrumFrame::from_data(data));

            self.input_buffer.drain(..self.config.hop);
        }

        frames
    }

    fn reset(&mut self) {
        self.input_buffer.clear();
    }

    fn buffered_samples(&self) -> usize {
        self.input_buffer.len()
    }
}
