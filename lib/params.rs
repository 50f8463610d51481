//! Physical and numerical constants passed to every evolution step.

use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{ error::ShapeError, grid::Grid };

/// Time step of an evolution.
///
/// The variant, not the value, decides whether a step is treated as
/// imaginary-time evolution: a `Complex` time step always triggers
/// renormalization, even if its imaginary part is zero.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeStep {
    /// Real-time step.
    Real(f64),
    /// Complex (usually purely imaginary) time step, written in TOML as
    /// `[re, im]`.
    Complex(C64),
}

impl Default for TimeStep {
    fn default() -> Self { Self::Real(1e-2) }
}

impl From<f64> for TimeStep {
    fn from(dt: f64) -> Self { Self::Real(dt) }
}

impl From<C64> for TimeStep {
    fn from(dt: C64) -> Self { Self::Complex(dt) }
}

impl TimeStep {
    /// Imaginary-time step `-i * tau`.
    pub fn imaginary(tau: f64) -> Self { Self::Complex(C64::new(0.0, -tau)) }

    /// Return the step as a complex number.
    pub fn value(self) -> C64 {
        match self {
            Self::Real(dt) => dt.into(),
            Self::Complex(dt) => dt,
        }
    }

    /// Return `true` if `self` is `Complex`.
    pub fn is_complex(self) -> bool { matches!(self, Self::Complex(_)) }

    /// Magnitude of the step.
    pub fn norm(self) -> f64 { self.value().norm() }
}

/// External trapping potential.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Trap {
    /// Spatially uniform potential.
    Uniform(f64),
    /// Potential sampled on the grid; must have the grid's shape.
    Array(nd::ArrayD<f64>),
}

impl Default for Trap {
    fn default() -> Self { Self::Uniform(0.0) }
}

impl Trap {
    /// Harmonic trap `Σ_i ω_i² x_i² / 2` over the axes of `grid`.
    ///
    /// *Panics if `omegas` has length different from the number of grid
    /// axes*.
    pub fn harmonic(grid: &Grid, omegas: &[f64]) -> Self {
        assert_eq!(omegas.len(), grid.ndim(), "Trap::harmonic: one frequency per axis");
        let mut v: nd::ArrayD<f64> = nd::ArrayD::zeros(nd::IxDyn(grid.shape()));
        omegas.iter().enumerate()
            .for_each(|(ax, &w)| {
                v.zip_mut_with(grid.mesh(ax), |vk, &xk| { *vk += 0.5 * (w * xk).powi(2); });
            });
        Self::Array(v)
    }

    /// Return a view of the potential that broadcasts to the shape of
    /// `grid`.
    ///
    /// A uniform trap is returned as a zero-dimensional view, so no array is
    /// allocated; an array trap is checked against the grid and borrowed.
    pub fn on_grid(&self, grid: &Grid) -> Result<nd::ArrayViewD<'_, f64>, ShapeError> {
        match self {
            Self::Uniform(v) => Ok(nd::aview0(v).into_dyn()),
            Self::Array(v) => {
                ShapeError::check(grid.shape(), v.shape())?;
                Ok(v.view())
            },
        }
    }
}

/// Named physical constants for all four spin multiplicities.
///
/// Every field has a default, so a configuration only needs to name the
/// constants relevant to the multiplicity being simulated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Time step.
    pub dt: TimeStep,
    /// Number of steps requested by a driver.
    pub nt: usize,
    /// Simulation time counter.
    pub t: f64,
    /// Phenomenological dissipation.
    pub gamma: f64,
    /// External potential.
    pub trap: Trap,
    /// Target density used by ground states.
    pub n0: f64,
    /// Scalar interaction strength.
    pub g: f64,
    /// Spin-1/2 intra-component interaction for the plus component.
    pub g_plus: f64,
    /// Spin-1/2 intra-component interaction for the minus component.
    pub g_minus: f64,
    /// Spin-1/2 inter-component interaction.
    pub g_pm: f64,
    /// Density-dependent spinor interaction.
    pub c0: f64,
    /// Spin-dependent spinor interaction.
    pub c2: f64,
    /// Spin-singlet interaction (spin-2 only).
    pub c4: f64,
    /// Linear Zeeman energy.
    pub p: f64,
    /// Quadratic Zeeman energy.
    pub q: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: TimeStep::default(),
            nt: 0,
            t: 0.0,
            gamma: 0.0,
            trap: Trap::default(),
            n0: 1.0,
            g: 0.0,
            g_plus: 0.0,
            g_minus: 0.0,
            g_pm: 0.0,
            c0: 0.0,
            c2: 0.0,
            c4: 0.0,
            p: 0.0,
            q: 0.0,
        }
    }
}

impl Parameters {
    /// `dt * (1 - iγ)`.
    pub fn effective_dt(&self) -> C64 {
        self.dt.value() * C64::new(1.0, -self.gamma)
    }

    /// Return `true` if evolution under these parameters does not conserve
    /// atom number, i.e. if `dt` is complex or `γ ≠ 0`.
    pub fn needs_renormalisation(&self) -> bool {
        self.dt.is_complex() || self.gamma != 0.0
    }

    /// Increment the time counter by `|dt|`.
    pub fn advance_time(&mut self) { self.t += self.dt.norm(); }

    /// All real scalar constants, by name.
    pub fn named_scalars(&self) -> [(&'static str, f64); 12] {
        [
            ("t", self.t),
            ("gamma", self.gamma),
            ("n0", self.n0),
            ("g", self.g),
            ("g_plus", self.g_plus),
            ("g_minus", self.g_minus),
            ("g_pm", self.g_pm),
            ("c0", self.c0),
            ("c2", self.c2),
            ("c4", self.c4),
            ("p", self.p),
            ("q", self.q),
        ]
    }
}
