//! Throughput-optimized transform.
//!
//! Numerically interchangeable with [`crate::StreamingCqt`]: within one push
//! no frame's FFT or smoothing reads another frame's data or the carry, so
//! the per-frame work fans out across a rayon pool. Frame starts are computed
//! up front from a contiguous carry buffer instead of draining a deque one
//! hop at a time, and windowing goes through the vectorized kernel in
//! [`crate::simd`].

use num_traits::{Float, FromPrimitive};
use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftNum, FftPlanner};
use std::fmt;
use std::sync::Arc;

use crate::{simd, smoothing, CqtConfig, CqtTransform, SpectrumFrame, Spectrogram};

pub struct AcceleratedCqt<T: Float + FftNum> {
    config: CqtConfig<T>,
    coefficients: Vec<Complex<T>>,
    fft: Arc<dyn Fft<T>>,
    carry: Vec<T>,
}

impl<T: Float + FftNum + FromPrimitive + fmt::Debug> AcceleratedCqt<T> {
    pub fn new(config: CqtConfig<T>) -> Self {
        let coefficients = smoothing::cqt_coefficients(config.window_len(), config.fft_size);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);

        Self {
            config,
            coefficients,
            fft,
            carry: Vec::new(),
        }
    }
}

impl<T: Float + FftNum + FromPrimitive + fmt::Debug> CqtTransform<T> for AcceleratedCqt<T> {
    fn config(&self) -> &CqtConfig<T> {
        &self.config
    }

    fn coefficients(&self) -> &[Complex<T>] {
        &self.coefficients
    }

    fn push_samples(&mut self, samples: &[T]) -> Spectrogram<T> {
        self.carry.extend_from_slice(samples);

        let window_len = self.config.window_len();
        if self.carry.len() < window_len {
            return Vec::new();
        }

        let hop = self.config.hop;
        let fft_size = self.config.fft_size;
        let freq_bins = self.config.freq_bins();
        let num_frames = (self.carry.len() - window_len) / hop + 1;

        let carry = &self.carry;
        let window = &self.config.window;
        let fft = &self.fft;
        let coefficients = &self.coefficients;

        let frames: Vec<SpectrumFrame<T>> = (0..num_frames)
            .into_par_iter()
            .map(|frame_idx| {
                let start = frame_idx * hop;
                let mut windowed = vec![T::zero(); window_len];
                simd::apply_window(&carry[start..start + window_len], window, &mut windowed);

                let mut fft_buffer = vec![Complex::new(T::zero(), T::zero()); fft_size];
                for (slot, &sample) in fft_buffer.iter_mut().zip(windowed.iter()) {
                    *slot = Complex::new(sample, T::zero());
                }
                fft.process(&mut fft_buffer);

                let mut data: Vec<Complex<T>> = fft_buffer[..freq_bins].to_vec();
                smoothing::smooth_frame(&mut data, coefficients);
                SpectrumFrame::from_data(data)
            })
            .collect();

        // Consume whole hops only; the tail stays carried for the next push.
        self.carry.drain(..num_frames * hop);

        frames
    }

    fn reset(&mut self) {
        self.carry.clear();
    }

    fn buffered_samples(&self) -> usize {
        self.carry.len()
    }
}
