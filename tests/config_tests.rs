use cqt_rs::prelude::*;

#[test]
fn test_odd_fft_size_rejected() {
    let window: Vec<f64> = generate_window(WindowType::Hamming, 100);
    let config = CqtConfig::new(window, 50, 121);
    assert!(matches!(config, Err(ConfigError::InvalidFftSize { .. })));
}

#[test]
fn test_fft_shorter_than_window_rejected() {
    let window: Vec<f64> = generate_window(WindowType::Hamming, 256);
    let config = CqtConfig::new(window, 64, 128);
    assert!(matches!(config, Err(ConfigError::InvalidFftSize { .. })));
}

#[test]
fn test_tiny_fft_rejected() {
    let config = CqtConfig::new(vec![1.0f64, 1.0], 1, 2);
    assert!(matches!(config, Err(ConfigError::InvalidFftSize { .. })));
}

#[test]
fn test_empty_window_rejected() {
    let config = CqtConfig::<f64>::new(Vec::new(), 64, 256);
    assert!(matches!(config, Err(ConfigError::EmptyWindow)));
}

#[test]
fn test_zero_hop_rejected() {
    let window: Vec<f64> = generate_window(WindowType::Hann, 128);
    let config = CqtConfig::new(window, 0, 128);
    assert!(matches!(config, Err(ConfigError::InvalidHopSize)));
}

#[test]
fn test_hop_longer_than_window_rejected() {
    let window: Vec<f64> = generate_window(WindowType::Hamming, 64);
    let config = CqtConfig::new(window, 100, 128);
    assert!(matches!(config, Err(ConfigError::InvalidHopSize)));
}

#[test]
fn test_hop_equal_to_window_accepted() {
    let window: Vec<f64> = generate_window(WindowType::Hamming, 64);
    let config = CqtConfig::new(window, 64, 128).unwrap();
    assert_eq!(config.hop, 64);
}

#[test]
fn test_derived_hop_rounds_to_nearest() {
    // 100 * (1 - 0.333) = 66.7: rounds up rather than truncating.
    let window: Vec<f64> = generate_window(WindowType::Hann, 100);
    let config = CqtConfig::from_overlap(0.333, window, 128).unwrap();
    assert_eq!(config.hop, 67);
}

#[test]
fn test_overlap_out_of_range_rejected() {
    for overlap in [-0.1, 1.0, 1.5] {
        let window: Vec<f64> = generate_window(WindowType::Hann, 128);
        let config = CqtConfig::from_overlap(overlap, window, 128);
        assert!(
            matches!(config, Err(ConfigError::InvalidOverlap { .. })),
            "overlap {}",
            overlap
        );
    }
}

#[test]
fn test_both_construction_forms_agree() {
    let window: Vec<f64> = generate_window(WindowType::Hamming, 200);
    let explicit = CqtConfig::new(window.clone(), 50, 512).unwrap();
    let derived = CqtConfig::from_overlap(0.75, window, 512).unwrap();

    assert_eq!(explicit.hop, derived.hop);
    assert_eq!(explicit.fft_size, derived.fft_size);
    assert_eq!(explicit.freq_bins(), derived.freq_bins());
}
