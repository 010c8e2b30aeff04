/// Common test utilities

use cqt_rs::SpectrumFrame;

/// Largest complex-magnitude difference between two spectrograms.
pub fn max_frame_error(a: &[SpectrumFrame<f64>], b: &[SpectrumFrame<f64>]) -> f64 {
    assert_eq!(a.len(), b.len(), "frame count mismatch");

    let mut max_error = 0.0f64;
    for (frame_a, frame_b) in a.iter().zip(b.iter()) {
        assert_eq!(frame_a.freq_bins, frame_b.freq_bins);
        for (x, y) in frame_a.data.iter().zip(frame_b.data.iter()) {
            max_error = max_error.max((x - y).norm());
        }
    }
    max_error
}

/// Deterministic test signal: two tones plus a mid-signal impulse.
pub fn test_signal(len: usize) -> Vec<f64> {
    let mut signal: Vec<f64> = (0..len)
        .map(|i| {
            let t = i as f64;
            0.4 * (0.031 * t).sin() + 0.2 * (0.47 * t).cos()
        })
        .collect();
    if len > 0 {
        signal[len / 2] += 2.0;
    }
    signal
}
