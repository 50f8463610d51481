//! TOML-backed simulation configuration.
//!
//! A configuration file names the grid, the physical [`Parameters`], and
//! optionally an initial ground state and noise to seed it with:
//! ```toml
//! ground_state = "polar"
//!
//! [grid]
//! points = [64, 64]
//! spacings = [0.5, 0.5]
//!
//! [parameters]
//! dt = [0.0, -0.01] # complex: imaginary time
//! nt = 1000
//! c0 = 10.0
//! c2 = -0.5
//! q = 0.25
//!
//! [noise]
//! components = "outer"
//! mean = 0.0
//! std_dev = 1e-3
//! ```
//! Every `[parameters]` entry is optional; see [`Parameters`] for defaults.

use std::{ fs, path::Path, str::FromStr };
use serde::{ Deserialize, Serialize };
use crate::{
    component::{ Component, Select },
    error::{ ConfigError, FieldError },
    grid::Grid,
    params::Parameters,
};

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Grid point counts and spacings, one entry per axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub points: Vec<usize>,
    pub spacings: Vec<f64>,
}

/// Complex Gaussian noise added to an initial state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Component selector, e.g. `"all"`, `"outer"`, or `"plus, minus"`.
    #[serde(default = "all_components")]
    pub components: String,
    #[serde(default)]
    pub mean: f64,
    pub std_dev: f64,
}

fn all_components() -> String { "all".to_string() }

/// A complete simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub grid: GridConfig,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub ground_state: Option<String>,
    #[serde(default)]
    pub noise: Option<NoiseConfig>,
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse the configuration file at `path`.
    pub fn load<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        log::debug!("loaded config from {:?}", path);
        Self::from_toml_str(&text)
    }

    /// Build the configured grid.
    pub fn grid(&self) -> ConfigResult<Grid> {
        Ok(Grid::new(&self.grid.points, &self.grid.spacings)?)
    }

    /// Parse the configured ground state name, if any.
    pub fn ground_state<G>(&self) -> ConfigResult<Option<G>>
    where G: FromStr<Err = FieldError>
    {
        Ok(self.ground_state.as_deref().map(G::from_str).transpose()?)
    }

    /// Parse the configured noise selector, if any, returning it alongside
    /// the mean and standard deviation.
    pub fn noise<C>(&self) -> ConfigResult<Option<(Select<C>, f64, f64)>>
    where C: Component
    {
        let noise
            = self.noise.as_ref()
            .map(|n| {
                n.components.parse::<Select<C>>()
                    .map(|select| (select, n.mean, n.std_dev))
            })
            .transpose()?;
        Ok(noise)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_toml_str(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64 as C64;
    use crate::{
        error::GridError,
        params::{ TimeStep, Trap },
        spinone::{ SpinOne, SpinOneGroup, SpinOneGroundState },
    };

    const FULL: &str = r#"
        ground_state = "BA"

        [grid]
        points = [32, 16]
        spacings = [0.5, 0.25]

        [parameters]
        dt = [0.0, -0.01]
        nt = 500
        c0 = 10.0
        c2 = -0.5
        p = 0.1
        q = 0.25
        trap = 0.5

        [noise]
        components = "outer"
        std_dev = 1e-3
    "#;

    #[test]
    fn parse_full() {
        let config = Config::from_toml_str(FULL).unwrap();
        let grid = config.grid().unwrap();
        assert_eq!(grid.shape(), &[32, 16]);
        assert_eq!(grid.spacings(), &[0.5, 0.25]);
        let params = &config.parameters;
        assert_eq!(params.dt, TimeStep::Complex(C64::new(0.0, -0.01)));
        assert_eq!(params.nt, 500);
        assert_eq!(params.c2, -0.5);
        assert_eq!(params.trap, Trap::Uniform(0.5));
        // unnamed parameters keep their defaults
        assert_eq!(params.n0, 1.0);
        assert_eq!(params.gamma, 0.0);
        assert_eq!(
            config.ground_state::<SpinOneGroundState>().unwrap(),
            Some(SpinOneGroundState::BrokenAxisymmetry),
        );
        let (select, mean, std_dev) = config.noise::<SpinOne>().unwrap().unwrap();
        assert_eq!(select, Select::Group(SpinOneGroup::Outer));
        assert_eq!(mean, 0.0);
        assert_eq!(std_dev, 1e-3);
    }

    #[test]
    fn parse_minimal() {
        let config: Config = r#"
            [grid]
            points = [64]
            spacings = [0.5]
        "#.parse().unwrap();
        assert_eq!(config.parameters, Parameters::default());
        assert_eq!(config.ground_state::<SpinOneGroundState>().unwrap(), None);
        assert!(config.noise::<SpinOne>().unwrap().is_none());
        let params: Parameters = toml::from_str("dt = 0.05").unwrap();
        assert_eq!(params.dt, TimeStep::Real(0.05));
    }

    #[test]
    fn bad_grid() {
        let config = Config::from_toml_str(r#"
            [grid]
            points = [64, 64]
            spacings = [0.5]
        "#).unwrap();
        assert!(matches!(
            config.grid(),
            Err(ConfigError::Grid(GridError::ArityMismatch(2, 1))),
        ));
    }

    #[test]
    fn bad_names() {
        let config = Config::from_toml_str(r#"
            ground_state = "chiral"

            [grid]
            points = [8]
            spacings = [1.0]

            [noise]
            components = "up"
            std_dev = 0.1
        "#).unwrap();
        assert!(matches!(
            config.ground_state::<SpinOneGroundState>(),
            Err(ConfigError::Field(FieldError::UnknownGroundState(_))),
        ));
        assert!(matches!(
            config.noise::<SpinOne>(),
            Err(ConfigError::Field(FieldError::UnknownSelector(_))),
        ));
    }

    #[test]
    fn missing_grid_is_a_parse_error() {
        assert!(matches!(
            Config::from_toml_str("[parameters]\ng = 1.0\n"),
            Err(ConfigError::Parse(_)),
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Config::load("this/file/does/not/exist.toml"),
            Err(ConfigError::Read { .. }),
        ));
    }
}
