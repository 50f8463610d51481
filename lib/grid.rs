//! Discretized real- and Fourier-space coordinates for 1D, 2D, and 3D
//! rectangular lattices.
//!
//! All mesh arrays use matrix (`ij`) indexing, so that axis 0 runs over x, axis
//! 1 over y, and axis 2 over z. Fourier-space coordinates are stored in
//! unshifted FFT order (zero frequency at index 0) so that they can be
//! multiplied directly against the output of a forward FFT.

use std::f64::consts::TAU;
use ndarray as nd;
use crate::{
    error::GridError,
    utils::{ centered_axis, fft_freq },
};

pub type GridResult<T> = Result<T, GridError>;

/// An immutable rectangular lattice with its conjugate Fourier lattice.
///
/// Real-space coordinates along an axis of `N` points with spacing `dx` are
/// `(k - ⌊N/2⌋) * dx` for `k = 0..N`. The conjugate axis has spacing
/// `dk = 2π / (N * dx)` and holds the FFT frequencies (scaled by `2π`), with
/// `0` at index 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    points: Vec<usize>,
    spacings: Vec<f64>,
    axes: Vec<nd::Array1<f64>>,
    fourier_axes: Vec<nd::Array1<f64>>,
    meshes: Vec<nd::ArrayD<f64>>,
    fourier_meshes: Vec<nd::ArrayD<f64>>,
    wave_number: nd::ArrayD<f64>,
    grid_spacing_product: f64,
}

// broadcast a 1D axis along `axis` of an array with the given shape
fn mesh_from_axis(shape: &[usize], axis: usize, coords: &nd::Array1<f64>)
    -> nd::ArrayD<f64>
{
    nd::ArrayD::from_shape_fn(nd::IxDyn(shape), |ix| coords[ix[axis]])
}

impl Grid {
    /// Create a new grid from per-axis point counts and grid spacings.
    ///
    /// Fails if `points` and `spacings` differ in length, if there are not 1,
    /// 2, or 3 axes, if any point count is zero, or if any spacing is not
    /// positive and finite.
    pub fn new(points: &[usize], spacings: &[f64]) -> GridResult<Self> {
        GridError::check_dimension(points, spacings)?;
        points.iter().enumerate()
            .try_for_each(|(ax, &n)| GridError::check_points(ax, n))?;
        spacings.iter().enumerate()
            .try_for_each(|(ax, &d)| GridError::check_spacing(ax, d))?;

        let axes: Vec<nd::Array1<f64>>
            = points.iter().zip(spacings)
            .map(|(&n, &d)| centered_axis(n, d))
            .collect();
        let fourier_axes: Vec<nd::Array1<f64>>
            = points.iter().zip(spacings)
            .map(|(&n, &d)| TAU * fft_freq(n, d))
            .collect();
        let meshes: Vec<nd::ArrayD<f64>>
            = axes.iter().enumerate()
            .map(|(ax, coords)| mesh_from_axis(points, ax, coords))
            .collect();
        let fourier_meshes: Vec<nd::ArrayD<f64>>
            = fourier_axes.iter().enumerate()
            .map(|(ax, coords)| mesh_from_axis(points, ax, coords))
            .collect();
        let mut wave_number: nd::ArrayD<f64>
            = nd::ArrayD::zeros(nd::IxDyn(points));
        fourier_meshes.iter()
            .for_each(|k| { wave_number += &k.mapv(|kk| kk * kk); });
        let grid_spacing_product: f64 = spacings.iter().product();

        log::debug!(
            "constructed {}D grid with points {:?} and spacings {:?}",
            points.len(), points, spacings,
        );
        Ok(Self {
            points: points.to_vec(),
            spacings: spacings.to_vec(),
            axes,
            fourier_axes,
            meshes,
            fourier_meshes,
            wave_number,
            grid_spacing_product,
        })
    }

    /// Create a new 1D grid.
    pub fn new_1d(nx: usize, dx: f64) -> GridResult<Self> {
        Self::new(&[nx], &[dx])
    }

    /// Create a new 2D grid.
    pub fn new_2d(points: (usize, usize), spacings: (f64, f64))
        -> GridResult<Self>
    {
        Self::new(&[points.0, points.1], &[spacings.0, spacings.1])
    }

    /// Create a new 3D grid.
    pub fn new_3d(points: (usize, usize, usize), spacings: (f64, f64, f64))
        -> GridResult<Self>
    {
        Self::new(
            &[points.0, points.1, points.2],
            &[spacings.0, spacings.1, spacings.2],
        )
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize { self.points.len() }

    /// Number of points along each axis; this is the shape of every array
    /// defined on the grid.
    pub fn shape(&self) -> &[usize] { &self.points }

    /// Grid spacing along each axis.
    pub fn spacings(&self) -> &[f64] { &self.spacings }

    /// Conjugate Fourier-space spacing along each axis.
    pub fn fourier_spacings(&self) -> Vec<f64> {
        self.points.iter().zip(&self.spacings)
            .map(|(&n, &d)| TAU / (n as f64 * d))
            .collect()
    }

    /// Physical length (points × spacing) along each axis.
    pub fn lengths(&self) -> Vec<f64> {
        self.points.iter().zip(&self.spacings)
            .map(|(&n, &d)| n as f64 * d)
            .collect()
    }

    /// Total number of grid points.
    pub fn num_points(&self) -> usize { self.points.iter().product() }

    /// Product of all grid spacings, i.e. the volume element for Riemann sums
    /// over the grid.
    pub fn grid_spacing_product(&self) -> f64 { self.grid_spacing_product }

    /// 1D real-space coordinates along `axis`.
    ///
    /// *Panics if `axis` is out of bounds*.
    pub fn axis(&self, axis: usize) -> &nd::Array1<f64> { &self.axes[axis] }

    /// 1D Fourier-space coordinates along `axis`, in unshifted FFT order.
    ///
    /// *Panics if `axis` is out of bounds*.
    pub fn fourier_axis(&self, axis: usize) -> &nd::Array1<f64> {
        &self.fourier_axes[axis]
    }

    /// Full real-space mesh of coordinates along `axis`.
    ///
    /// *Panics if `axis` is out of bounds*.
    pub fn mesh(&self, axis: usize) -> &nd::ArrayD<f64> { &self.meshes[axis] }

    /// Full Fourier-space mesh of coordinates along `axis`.
    ///
    /// *Panics if `axis` is out of bounds*.
    pub fn fourier_mesh(&self, axis: usize) -> &nd::ArrayD<f64> {
        &self.fourier_meshes[axis]
    }

    /// Spectral kinetic operator `Σ k_i²` over all axes.
    pub fn wave_number(&self) -> &nd::ArrayD<f64> { &self.wave_number }
}
