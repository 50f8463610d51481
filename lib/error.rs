//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::path::PathBuf;
use thiserror::Error;

/// Returned when an operation requiring an array of the grid's shape
/// encounters an array of some other shape.
#[derive(Debug, Error)]
#[error("encountered array with incompatible shape; expected {expected:?} but got {got:?}")]
pub struct ShapeError {
    pub expected: Vec<usize>,
    pub got: Vec<usize>,
}

impl ShapeError {
    pub(crate) fn check(expected: &[usize], got: &[usize]) -> Result<(), Self> {
        (expected == got).then_some(())
            .ok_or_else(|| Self { expected: expected.to_vec(), got: got.to_vec() })
    }
}

/// Returned from [`Grid`][crate::grid::Grid] construction.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when the number of axes is zero or greater than three.
    #[error("grids must have 1, 2, or 3 dimensions; got {0}")]
    BadDimension(usize),

    /// Returned when point counts and grid spacings are given for different
    /// numbers of axes.
    #[error("points and grid spacings must have equal length; got {0} and {1}")]
    ArityMismatch(usize, usize),

    /// Returned when an axis is given zero points.
    #[error("point counts must be positive; got 0 on axis {axis}")]
    BadPoints { axis: usize },

    /// Returned when an axis is given a non-positive or non-finite spacing.
    #[error("grid spacings must be positive and finite; got {spacing} on axis {axis}")]
    BadSpacing { axis: usize, spacing: f64 },
}

impl GridError {
    pub(crate) fn check_dimension(points: &[usize], spacings: &[f64])
        -> Result<(), Self>
    {
        let (np, ns) = (points.len(), spacings.len());
        (np == ns).then_some(()).ok_or(Self::ArityMismatch(np, ns))?;
        (1..=3).contains(&np).then_some(()).ok_or(Self::BadDimension(np))
    }

    pub(crate) fn check_points(axis: usize, points: usize) -> Result<(), Self> {
        (points != 0).then_some(()).ok_or(Self::BadPoints { axis })
    }

    pub(crate) fn check_spacing(axis: usize, spacing: f64) -> Result<(), Self> {
        (spacing.is_finite() && spacing > 0.0).then_some(())
            .ok_or(Self::BadSpacing { axis, spacing })
    }
}

/// Returned from [`Wavefunction`][crate::wavefunction::Wavefunction]
/// operations and from parsing textual component/state names.
#[derive(Debug, Error)]
pub enum FieldError {
    /// [`ShapeError`]
    #[error("array shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Returned when a normal distribution cannot be constructed for noise.
    #[error("noise standard deviation must be non-negative and finite; got {0}")]
    BadNoise(f64),

    /// Returned when a component name is not recognized.
    #[error("{0:?} is not a component of this wavefunction")]
    UnknownComponent(String),

    /// Returned when a component selector is not recognized.
    #[error("{0:?} is not a supported component selector")]
    UnknownSelector(String),

    /// Returned when a ground state name is not recognized.
    #[error("{0:?} is not a supported ground state")]
    UnknownGroundState(String),
}

impl FieldError {
    pub(crate) fn check_std_dev(std_dev: f64) -> Result<(), Self> {
        (std_dev.is_finite() && std_dev >= 0.0).then_some(())
            .ok_or(Self::BadNoise(std_dev))
    }
}

/// Returned from time-evolution functions.
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// [`FieldError`]
    #[error("field error: {0}")]
    Field(#[from] FieldError),
}

impl From<ShapeError> for EvolutionError {
    fn from(err: ShapeError) -> Self { Self::Field(err.into()) }
}

/// Returned from phase-profile generators in [`vortex`][crate::vortex].
#[derive(Debug, Error)]
pub enum VortexError {
    /// Returned when a phase profile is requested for a non-2D grid.
    #[error("vortex phase profiles require a 2D grid; got {0} dimensions")]
    NotTwoDimensional(usize),

    /// Returned when a negative or non-finite separation threshold is given.
    #[error("vortex separation threshold must be non-negative; got {0}")]
    BadThreshold(f64),
}

impl VortexError {
    pub(crate) fn check_2d(ndim: usize) -> Result<(), Self> {
        (ndim == 2).then_some(()).ok_or(Self::NotTwoDimensional(ndim))
    }

    pub(crate) fn check_threshold(threshold: f64) -> Result<(), Self> {
        (threshold.is_finite() && threshold >= 0.0).then_some(())
            .ok_or(Self::BadThreshold(threshold))
    }
}

/// Returned from loading simulation configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when a configuration file cannot be read.
    #[error("unable to read config file {path:?}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    /// Returned when a configuration file is not valid TOML for a
    /// [`Config`][crate::config::Config].
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`FieldError`]
    #[error("field error: {0}")]
    Field(#[from] FieldError),
}

/// Returned from [`DataManager`][crate::data::DataManager] output operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Returned when the output file cannot be created.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when an array cannot be written to the archive.
    #[error("npz write error: {0}")]
    Npz(#[from] ndarray_npy::WriteNpzError),
}
