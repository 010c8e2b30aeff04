//! Vectorized windowing kernel used by the accelerated transform.
//!
//! Only the elementwise window multiply is worth SIMD here: the frequency
//! smoothing recursion carries a loop dependency within each pass of a frame,
//! so throughput comes from parallelizing across frames instead (see
//! [`crate::accel`]).

use num_traits::Float;

#[cfg(feature = "simd")]
use pulp::Arch;

/// Multiply `signal` by `window` elementwise into `output`.
///
/// Dispatches to a pulp-vectorized path for `f32`/`f64` when the `simd`
/// feature is enabled; otherwise a plain scalar loop. Both paths perform the
/// same multiplies in the same order, so results are identical.
#[inline]
pub fn apply_window<T: Float + 'static>(signal: &[T], window: &[T], output: &mut [T]) {
    debug_assert_eq!(signal.len(), window.len());
    debug_assert_eq!(signal.len(), output.len());

    #[cfg(feature = "simd")]
    {
        let simd = Arch::new();
        match (
            std::any::TypeId::of::<T>(),
            std::any::TypeId::of::<f32>(),
            std::any::TypeId::of::<f64>(),
        ) {
            (t, f32_id, _) if t == f32_id => {
                apply_window_f32(
                    simd,
                    unsafe { std::mem::transmute::<&[T], &[f32]>(signal) },
                    unsafe { std::mem::transmute::<&[T], &[f32]>(window) },
                    unsafe { std::mem::transmute::<&mut [T], &mut [f32]>(output) },
                );
                return;
            }
            (t, _, f64_id) if t == f64_id => {
                apply_window_f64(
                    simd,
                    unsafe { std::mem::transmute::<&[T], &[f64]>(signal) },
                    unsafe { std::mem::transmute::<&[T], &[f64]>(window) },
                    unsafe { std::mem::transmute::<&mut [T], &mut [f64]>(output) },
                );
                return;
            }
            _ => {}
        }
    }

    for i in 0..signal.len() {
        output[i] = signal[i] * window[i];
    }
}

#[cfg(feature = "simd")]
macro_rules! apply_window_impl {
    ($name:ident, $ty:ty) => {
        fn $name(simd: Arch, signal: &[$ty], window: &[$ty], output: &mut [$ty]) {
            simd.dispatch(|| {
                let (signal_head, signal_tail) = pulp::as_arrays::<4, _>(signal);
                let (window_head, window_tail) = pulp::as_arrays::<4, _>(window);
                let (output_head, output_tail) = pulp::as_arrays_mut::<4, _>(output);

                for i in 0..signal_head.len() {
                    output_head[i] = [
                        signal_head[i][0] * window_head[i][0],
                        signal_head[i][1] * window_head[i][1],
                        signal_head[i][2] * window_head[i][2],
                        signal_head[i][3] * window_head[i][3],
                    ];
                }

                for i in 0..signal_tail.len() {
                    output_tail[i] = signal_tail[i] * window_tail[i];
                }
            });
        }
    };
}

#[cfg(feature = "simd")]
apply_window_impl!(apply_window_f32, f32);
#[cfg(feature = "simd")]
apply_window_impl!(apply_window_f64, f64);
