//! Chunked streaming analysis of a noisy tone with an impulse in the middle.
//!
//! Run with `cargo run --example streaming`.

use cqt_rs::prelude::*;

fn main() {
    let win_len = 512;
    let fft_len = win_len * 8;
    let overlap = 1.0 - 1.0 / 8.0;

    let window: Vec<f64> = generate_window(WindowType::Hamming, win_len);
    let config = CqtConfig::from_overlap(overlap, window, fft_len).expect("valid config");
    let hop = config.hop;
    let mut cqt = AcceleratedCqt::new(config);

    // Half a second at 44.1 kHz: a tone with an impulse in the middle.
    let sig_len = 44100 / 2;
    let sin_freq = 2.0 * std::f64::consts::PI / 5.0;
    let mut input: Vec<f64> = (0..sig_len).map(|i| (sin_freq * i as f64).sin()).collect();
    input[sig_len / 2] = 100.0;

    let mut frames = Vec::new();
    for chunk in input.chunks(1024) {
        frames.extend(cqt.push_samples(chunk));
    }

    println!(
        "{} frames of {} bins (hop {} samples, {} samples carried)",
        frames.len(),
        frames.first().map_or(0, |f| f.freq_bins),
        hop,
        cqt.buffered_samples()
    );

    let (time, freq) = cqt.time_and_freq_indices((fft_len / 2, frames.len()));
    for (k, frame) in frames.iter().enumerate().step_by(frames.len() / 8) {
        let (peak_bin, peak) = frame
            .data
            .iter()
            .enumerate()
            .map(|(bin, c)| (bin, c.norm()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .expect("non-empty frame");
        println!(
            "t = {:>6} samples: peak {:.3} at {:.4} rad/sample (bin {})",
            time[k], peak, freq[peak_bin], peak_bin
        );
    }
}
