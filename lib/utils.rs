//! Miscellaneous tools.

use std::fmt;
use ndarray as nd;
use ndrustfft as ndfft;
use num_complex::Complex64 as C64;

/// Generate an array of frequency-space coordinates to accompany a FFT of `n`
/// points for sampling interval `d`.
///
/// Coordinates follow the unshifted FFT ordering: non-negative frequencies
/// first, starting with exactly zero at index 0, followed by the negative
/// frequencies in increasing order.
pub fn fft_freq(n: usize, d: f64) -> nd::Array1<f64> {
    let half = (n + 1) / 2;
    let scale = (n as f64 * d).recip();
    (0..n)
        .map(|k| {
            if k < half {
                k as f64 * scale
            } else {
                -((n - k) as f64) * scale
            }
        })
        .collect()
}

/// Generate a centered array of `n` real-space coordinates with spacing `d`,
/// running over `[-⌊n/2⌋, n - ⌊n/2⌋) * d`.
pub fn centered_axis(n: usize, d: f64) -> nd::Array1<f64> {
    let offs = (n / 2) as f64;
    (0..n).map(|k| (k as f64 - offs) * d).collect()
}

/// Compute `dv * Σ |x|²`, i.e. the Riemann sum of the squared modulus of a
/// sampled function over a grid with volume element `dv`.
pub fn norm_sqr_sum<S, D>(x: &nd::ArrayBase<S, D>, dv: f64) -> f64
where
    S: nd::Data<Elem = C64>,
    D: nd::Dimension,
{
    dv * x.iter().map(|xk| xk.norm_sqr()).sum::<f64>()
}

/// Pre-planned multidimensional complex FFT over arrays of a fixed shape.
///
/// Transforms are applied as a sequence of one-dimensional FFTs along each
/// axis, with one [`FftHandler`][ndfft::FftHandler] per axis. The forward
/// transform is unnormalized; the inverse transform divides by the length of
/// each axis in turn, so that `inverse(forward(x)) == x` up to floating-point
/// error.
#[derive(Clone)]
pub struct FftPlan {
    shape: Vec<usize>,
    handlers: Vec<ndfft::FftHandler<f64>>,
}

impl fmt::Debug for FftPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftPlan").field("shape", &self.shape).finish()
    }
}

impl FftPlan {
    /// Plan forward and inverse transforms for arrays of shape `shape`.
    pub fn new(shape: &[usize]) -> Self {
        let handlers: Vec<ndfft::FftHandler<f64>>
            = shape.iter().map(|&n| ndfft::FftHandler::new(n)).collect();
        Self { shape: shape.to_vec(), handlers }
    }

    /// Return the array shape this plan was made for.
    pub fn shape(&self) -> &[usize] { &self.shape }

    /// Perform the complex-valued forward FFT in place.
    ///
    /// *Panics if `x` does not have the planned shape*.
    pub fn forward<S, D>(&mut self, x: &mut nd::ArrayBase<S, D>)
    where
        S: nd::DataMut<Elem = C64>,
        D: nd::Dimension,
    {
        assert_eq!(x.shape(), self.shape.as_slice(), "FftPlan: shape mismatch");
        let mut buf: nd::Array<C64, D>;
        for (axis, handler) in self.handlers.iter_mut().enumerate() {
            buf = x.to_owned();
            ndfft::ndfft(&buf, x, handler, axis);
        }
    }

    /// Perform the complex-valued inverse FFT in place, including the `1/N`
    /// normalization.
    ///
    /// *Panics if `x` does not have the planned shape*.
    pub fn inverse<S, D>(&mut self, x: &mut nd::ArrayBase<S, D>)
    where
        S: nd::DataMut<Elem = C64>,
        D: nd::Dimension,
    {
        assert_eq!(x.shape(), self.shape.as_slice(), "FftPlan: shape mismatch");
        let mut buf: nd::Array<C64, D>;
        for (axis, handler) in self.handlers.iter_mut().enumerate() {
            buf = x.to_owned();
            ndfft::ndifft(&buf, x, handler, axis);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Dimension;

    fn test_array(shape: &[usize]) -> nd::ArrayD<C64> {
        nd::ArrayD::from_shape_fn(nd::IxDyn(shape), |ix| {
            let s: usize = ix.as_array_view().iter().sum();
            C64::new((s as f64 * 0.37).sin(), (s as f64 * 1.3).cos() - 0.2)
        })
    }

    #[test]
    fn fft_freq_even_and_odd() {
        let f = fft_freq(4, 0.5);
        assert_eq!(f.to_vec(), vec![0.0, 0.5, -1.0, -0.5]);
        let f = fft_freq(5, 1.0);
        assert_eq!(f.to_vec(), vec![0.0, 0.2, 0.4, -0.4, -0.2]);
        assert_eq!(fft_freq(1, 1.0).to_vec(), vec![0.0]);
    }

    #[test]
    fn centered_axis_matches_arange() {
        let x = centered_axis(4, 0.5);
        assert_eq!(x.to_vec(), vec![-1.0, -0.5, 0.0, 0.5]);
        let x = centered_axis(5, 1.0);
        assert_eq!(x.to_vec(), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn forward_of_delta_is_flat() {
        let mut plan = FftPlan::new(&[4, 6]);
        let mut x: nd::ArrayD<C64> = nd::ArrayD::zeros(nd::IxDyn(&[4, 6]));
        x[[0, 0].as_slice()] = C64::new(1.0, 0.0);
        plan.forward(&mut x);
        x.iter().for_each(|xk| {
            assert_abs_diff_eq!(xk.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(xk.im, 0.0, epsilon = 1e-12);
        });
    }

    #[test]
    fn forward_matches_direct_dft_1d() {
        let n = 7;
        let x0 = test_array(&[n]);
        let mut x = x0.clone();
        FftPlan::new(&[n]).forward(&mut x);
        for k in 0..n {
            let direct: C64
                = (0..n)
                .map(|j| {
                    let ang = -std::f64::consts::TAU * (j * k) as f64 / n as f64;
                    x0[[j].as_slice()] * C64::cis(ang)
                })
                .sum();
            assert_abs_diff_eq!((x[[k].as_slice()] - direct).norm(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn forward_matches_direct_dft_2d() {
        let (n0, n1) = (3, 4);
        let x0 = test_array(&[n0, n1]);
        let mut x = x0.clone();
        FftPlan::new(&[n0, n1]).forward(&mut x);
        for k0 in 0..n0 {
            for k1 in 0..n1 {
                let direct: C64
                    = x0.indexed_iter()
                    .map(|(ix, xj)| {
                        let ang
                            = -std::f64::consts::TAU
                            * ((ix[0] * k0) as f64 / n0 as f64
                                + (ix[1] * k1) as f64 / n1 as f64);
                        xj * C64::cis(ang)
                    })
                    .sum();
                assert_abs_diff_eq!(
                    (x[[k0, k1].as_slice()] - direct).norm(), 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn inverse_of_flat_is_delta() {
        let mut plan = FftPlan::new(&[5, 2, 3]);
        let mut x: nd::ArrayD<C64> = nd::ArrayD::from_elem(nd::IxDyn(&[5, 2, 3]), C64::from(1.0));
        plan.inverse(&mut x);
        x.indexed_iter().for_each(|(ix, xk)| {
            let expected = if ix.as_array_view().iter().all(|&i| i == 0) { 1.0 } else { 0.0 };
            assert_abs_diff_eq!((xk - C64::from(expected)).norm(), 0.0, epsilon = 1e-12);
        });
    }

    #[test]
    fn round_trip_recovers_input() {
        for shape in [vec![16], vec![8, 5], vec![4, 6, 3]] {
            let x0 = test_array(&shape);
            let mut x = x0.clone();
            let mut plan = FftPlan::new(&shape);
            plan.forward(&mut x);
            plan.inverse(&mut x);
            x.iter().zip(&x0).for_each(|(xk, x0k)| {
                assert_abs_diff_eq!((xk - x0k).norm(), 0.0, epsilon = 1e-12);
            });
        }
    }

    #[test]
    fn norm_sqr_sum_is_riemann_sum() {
        let x: nd::Array2<C64> = nd::Array2::from_elem((64, 64), C64::new(0.5, 0.0));
        assert_abs_diff_eq!(norm_sqr_sum(&x, 0.25), 256.0, epsilon = 1e-9);
    }
}
