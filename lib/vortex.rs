//! Phase profiles for imprinting vortices on 2D wavefunctions.
//!
//! Every generator returns an `nx × ny` array of phases suitable for
//! [`Wavefunction::apply_phase`][crate::wavefunction::Wavefunction::apply_phase].

use std::f64::consts::{ PI, TAU };
use ndarray as nd;
use rand::Rng;
use crate::{ error::VortexError, grid::Grid };

pub type VortexResult<T> = Result<T, VortexError>;

/// Maximum number of random draws made by [`generate_positions`].
pub const MAX_DRAWS: usize = 10_000;

// number of periodic images summed on either side of the box
const IMAGES: i32 = 5;

/// A point vortex with integer winding number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vortex {
    pub x: f64,
    pub y: f64,
    pub winding: i32,
}

/// Phase of a collection of point vortices on an infinite plane,
/// `Σ_v w_v atan2(y - y_v, x - x_v)`.
///
/// Not periodic over the grid box; see [`dipole_phase`] for a periodic
/// alternative.
pub fn phase_profile(grid: &Grid, vortices: &[Vortex]) -> VortexResult<nd::Array2<f64>> {
    VortexError::check_2d(grid.ndim())?;
    let (xs, ys) = (grid.axis(0), grid.axis(1));
    let phase: nd::Array2<f64>
        = nd::Array2::from_shape_fn((xs.len(), ys.len()), |(i, j)| {
            vortices.iter()
                .map(|v| v.winding as f64 * (ys[j] - v.y).atan2(xs[i] - v.x))
                .sum()
        });
    Ok(phase)
}

fn heaviside(x: f64) -> f64 { if x < 0.0 { 0.0 } else { 1.0 } }

/// Phase of a vortex dipole that is periodic over the grid box, with a
/// negatively charged vortex at `minus` and a positively charged vortex at
/// `plus`.
///
/// The profile sums the phase of the dipole over periodic images in `y` and
/// subtracts the linear background needed to make the phase periodic in `x`.
pub fn dipole_phase(grid: &Grid, minus: (f64, f64), plus: (f64, f64))
    -> VortexResult<nd::Array2<f64>>
{
    VortexError::check_2d(grid.ndim())?;
    let (xs, ys) = (grid.axis(0), grid.axis(1));
    let lengths = grid.lengths();
    let (lx, ly) = (lengths[0], lengths[1]);
    let y_min = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let (x_pos_minus, y_pos_minus) = minus;
    let (x_pos_plus, y_pos_plus) = plus;

    let phase: nd::Array2<f64>
        = nd::Array2::from_shape_fn((xs.len(), ys.len()), |(i, j)| {
            let (x, y) = (xs[i], ys[j]);
            let x_minus = TAU / lx * (x - x_pos_minus);
            let y_minus = TAU / ly * (y - y_pos_minus);
            let x_plus = TAU / lx * (x - x_pos_plus);
            let y_plus = TAU / ly * (y - y_pos_plus);
            let step = PI * (heaviside(x_plus) - heaviside(x_minus));
            let images: f64
                = (-IMAGES..=IMAGES)
                .map(|nn| {
                    let shift = TAU * nn as f64;
                    (((y_minus + shift) / 2.0).tanh() * ((x_minus - PI) / 2.0).tan()).atan()
                    - (((y_plus + shift) / 2.0).tanh() * ((x_plus - PI) / 2.0).tan()).atan()
                    + step
                })
                .sum();
            images - TAU * (y - y_min) * (x_pos_plus - x_pos_minus) / (ly * lx)
        });
    Ok(phase)
}

/// Periodic phase of a single vortex dipole centered on the origin, with the
/// two vortices separated by `separation` along x (negative charge on the
/// left).
pub fn dipole_pair(grid: &Grid, separation: f64) -> VortexResult<nd::Array2<f64>> {
    dipole_phase(grid, (-separation / 2.0, 0.0), (separation / 2.0, 0.0))
}

/// Draw up to `num` positions uniformly over the grid box such that each is at
/// least `threshold` (Euclidean distance) from every previously accepted
/// position.
///
/// At most [`MAX_DRAWS`] draws are made; if not every position could be
/// placed, a warning is logged and the positions found so far are returned.
pub fn generate_positions<R>(grid: &Grid, num: usize, threshold: f64, rng: &mut R)
    -> VortexResult<Vec<(f64, f64)>>
where R: Rng + ?Sized
{
    VortexError::check_2d(grid.ndim())?;
    VortexError::check_threshold(threshold)?;
    let lengths = grid.lengths();
    let (hx, hy) = (lengths[0] / 2.0, lengths[1] / 2.0);

    let mut positions: Vec<(f64, f64)> = Vec::with_capacity(num);
    let mut draws: usize = 0;
    while positions.len() < num && draws < MAX_DRAWS {
        let pos: (f64, f64) = (rng.gen_range(-hx..hx), rng.gen_range(-hy..hy));
        let far_enough
            = positions.iter()
            .all(|(x, y)| (pos.0 - x).hypot(pos.1 - y) >= threshold);
        if far_enough {
            positions.push(pos);
        }
        draws += 1;
    }
    if positions.len() < num {
        log::warn!(
            "placed only {} of {} vortices after {} draws",
            positions.len(), num, draws,
        );
    } else {
        log::debug!("placed {} vortices in {} draws", num, draws);
    }
    Ok(positions)
}

/// Periodic phase of `num_vortices / 2` vortex dipoles at random positions
/// separated by at least `threshold`.
///
/// Positions are generated by [`generate_positions`] and paired consecutively
/// as (negative, positive) dipoles; a trailing unpaired position is ignored.
pub fn random_dipoles<R>(grid: &Grid, num_vortices: usize, threshold: f64, rng: &mut R)
    -> VortexResult<nd::Array2<f64>>
where R: Rng + ?Sized
{
    let positions = generate_positions(grid, num_vortices, threshold, rng)?;
    let mut phase: nd::Array2<f64> = nd::Array2::zeros((grid.shape()[0], grid.shape()[1]));
    for pair in positions.chunks_exact(2) {
        phase += &dipole_phase(grid, pair[0], pair[1])?;
    }
    Ok(phase)
}
