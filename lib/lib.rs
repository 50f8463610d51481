//! Provides split-step Fourier solvers for the Gross-Pitaevskii equation
//! describing scalar and spinor Bose-Einstein condensates on periodic 1D, 2D,
//! and 3D grids.
//!
//! Supported condensates:
//! - Scalar (single-component)
//! - Two-component (pseudo-spin-1/2)
//! - Spin-1, with linear and quadratic Zeeman shifts
//! - Spin-2, including the spin-singlet interaction
//!
//! Every condensate shares the same [`Grid`][grid::Grid],
//! [`Wavefunction`][wavefunction::Wavefunction], and
//! [`Parameters`][params::Parameters] types, and is advanced in real or
//! imaginary time by the generic functions in [`timedep`]. Vortex phase
//! profiles are provided by [`vortex`], `.npz` output by [`data`], and TOML
//! configuration by [`config`].
//!
//! ```
//! use ndarray as nd;
//! use num_complex::Complex64 as C64;
//! use spinor_gpe::{
//!     grid::Grid,
//!     params::{ Parameters, TimeStep },
//!     scalar::{ Scalar, ScalarWavefunction },
//!     timedep::evolve,
//! };
//!
//! let grid = Grid::new_2d((32, 32), (0.5, 0.5))?;
//! let mut psi = ScalarWavefunction::new(&grid);
//! let gauss: nd::ArrayD<C64>
//!     = nd::Zip::from(grid.mesh(0)).and(grid.mesh(1))
//!     .map_collect(|&x, &y| C64::from((-(x * x + y * y) / 4.0).exp()));
//! psi.set_component(Scalar::Psi, gauss)?;
//! let atom_num = psi.atom_num(Scalar::Psi);
//!
//! // relax toward the ground state in imaginary time
//! let mut params = Parameters {
//!     dt: TimeStep::imaginary(1e-2),
//!     g: 1.0,
//!     ..Parameters::default()
//! };
//! psi.fft();
//! evolve(&mut psi, &mut params, 10)?;
//! psi.ifft();
//! assert!((psi.calculate_atom_num(Scalar::Psi) - atom_num).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod component;
pub mod config;
pub mod data;
pub mod error;
pub mod grid;
pub mod params;
pub mod scalar;
pub mod spinhalf;
pub mod spinone;
pub mod spintwo;
pub mod timedep;
pub mod utils;
pub mod vortex;
pub mod wavefunction;

pub mod docs;
