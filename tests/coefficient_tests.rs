use cqt_rs::prelude::*;
use cqt_rs::smoothing::cqt_coefficients;
use rustfft::num_complex::Complex;

#[test]
fn test_coefficient_vector_length() {
    let coeffs: Vec<Complex<f64>> = cqt_coefficients(256, 256);
    assert_eq!(coeffs.len(), 127);

    let coeffs: Vec<Complex<f64>> = cqt_coefficients(512, 4096);
    assert_eq!(coeffs.len(), 2047);
}

#[test]
fn test_magnitudes_non_decreasing() {
    let coeffs: Vec<Complex<f64>> = cqt_coefficients(512, 4096);
    for pair in coeffs.windows(2) {
        assert!(pair[1].norm() >= pair[0].norm());
    }
}

#[test]
fn test_magnitude_endpoints() {
    let coeffs: Vec<Complex<f64>> = cqt_coefficients(256, 512);
    assert!(coeffs[0].norm() < 1e-12);

    let last = coeffs[coeffs.len() - 1].norm();
    assert!(last > 0.99 && last <= 1.0, "last magnitude {}", last);
}

#[test]
fn test_rotation_angle_uniform() {
    // The phase shift is one constant angle, pi * window_len / fft_size,
    // applied to every coefficient.
    for (window_len, fft_size) in [(256usize, 256usize), (512, 4096), (100, 120)] {
        let theta = std::f64::consts::PI * window_len as f64 / fft_size as f64;
        let coeffs: Vec<Complex<f64>> = cqt_coefficients(window_len, fft_size);
        for c in coeffs.iter().filter(|c| c.norm() > 1e-9) {
            assert!(
                (c.arg() - theta).abs() < 1e-9,
                "({}, {}): phase {} != {}",
                window_len,
                fft_size,
                c.arg(),
                theta
            );
        }
    }
}

#[test]
fn test_transform_exposes_coefficients() {
    let window: Vec<f64> = generate_window(WindowType::Hamming, 256);
    let config = CqtConfig::from_overlap(0.5, window, 256).unwrap();
    let cqt = StreamingCqt::new(config);

    let coeffs = cqt.coefficients();
    assert_eq!(coeffs.len(), 127);
    let expected: Vec<Complex<f64>> = cqt_coefficients(256, 256);
    for (a, b) in coeffs.iter().zip(expected.iter()) {
        assert_eq!(a, b);
    }
}
