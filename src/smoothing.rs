//! Coefficient generation and frequency-domain smoothing.
//!
//! The transform's wavelet-like character comes entirely from here: every
//! spectrum is filtered twice across the frequency axis with a one-pole
//! recursive smoother (`out = c * prev + (1 - c) * cur`), once ascending and
//! once descending, so the net kernel is symmetric without the phase skew a
//! single-direction IIR pass would introduce. The coefficient magnitude grows
//! with bin index, so the effective smoothing window widens toward high
//! frequencies at O(bins) cost per frame instead of a per-octave filter bank.

use num_traits::{Float, FromPrimitive};
use rustfft::num_complex::Complex;

/// Derive the per-bin smoothing coefficients for a window/FFT length pair.
///
/// The magnitude envelope is the natural log of a linear ramp from 0.01 to
/// 100 over `fft_size / 2` points, shifted and scaled so it climbs from 0 to
/// 1 (the ramp endpoints steer how quickly the effective window shrinks
/// across frequency). Every value is then rotated by the single constant
/// phasor `exp(j * pi * window_len / fft_size)`, which re-centers the
/// equivalent time window of the smoother.
///
/// The rotation angle is the same for every bin, not bin-dependent; existing
/// numeric fixtures depend on that exact output, so it is kept as-is even
/// though a frequency-dependent design might be expected here.
///
/// Returns `fft_size / 2 - 1` values: coefficient `i` drives the filtering
/// step that reads bin `i + 1`, so the count of bins minus one. Magnitudes
/// are non-decreasing, with `|c[0]| = 0` and the last magnitude just short
/// of 1.
pub fn cqt_coefficients<T: Float + FromPrimitive>(
    window_len: usize,
    fft_size: usize,
) -> Vec<Complex<T>> {
    let bins = fft_size / 2;
    debug_assert!(window_len >= 1 && bins >= 2 && fft_size >= window_len);

    let lo = T::from(0.01).unwrap();
    let hi = T::from(100.0).unwrap();
    let step = (hi - lo) / T::from(bins - 1).unwrap();
    let envelope: Vec<T> = (0..bins)
        .map(|i| (lo + step * T::from(i).unwrap()).ln())
        .collect();

    // ln of an increasing ramp is increasing: min at the front, max at the back.
    let min = envelope[0];
    let range = envelope[bins - 1] - min;

    let pi = T::from(std::f64::consts::PI).unwrap();
    let theta = pi * T::from(window_len).unwrap() / T::from(fft_size).unwrap();
    let rotation = Complex::new(theta.cos(), theta.sin());

    envelope[..bins - 1]
        .iter()
        .map(|&value| rotation * ((value - min) / range))
        .collect()
}

/// Smooth one spectrum in place across the bin axis, ascending then
/// descending.
///
/// Pure function of `(frame, coefficients)`; no state crosses frames. Bin 0
/// is never written and the last bin is written only by the ascending pass —
/// each edge bin sits outside the range of one pass, and that asymmetry is
/// part of the numeric contract.
pub fn smooth_frame<T: Float>(frame: &mut [Complex<T>], coefficients: &[Complex<T>]) {
    debug_assert_eq!(coefficients.len() + 1, frame.len());

    let one = Complex::new(T::one(), T::zero());

    // Ascending fold: each bin blends with the already-smoothed bin below it.
    let mut prev = frame[0];
    for (bin, &c) in frame[1..].iter_mut().zip(coefficients.iter()) {
        *bin = c * prev + (one - c) * *bin;
        prev = *bin;
    }

    // Descending fold over the interior bins, seeded from the last bin.
    let bins = frame.len();
    let mut prev = frame[bins - 1];
    for i in (1..bins - 1).rev() {
        let c = coefficients[i - 1];
        frame[i] = c * prev + (one - c) * frame[i];
        prev = frame[i];
    }
}
