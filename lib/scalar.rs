//! Single-component (scalar) condensates.
//!
//! The Gross-Pitaevskii equation for a scalar field is
//! ```text
//! i ∂ψ/∂t = [-∇²/2 + V + g |ψ|²] ψ
//! ```
//! and is evolved with the generic split-step scheme in
//! [`timedep`][crate::timedep].

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    component::{ Component, NoGroup, component_from_str },
    params::Parameters,
    timedep::{ EvolutionResult, Evolve, apply_kinetic },
    wavefunction::{ Renormalisation, Wavefunction },
};

/// The only component of a scalar condensate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scalar {
    Psi,
}

impl Component for Scalar {
    type Group = NoGroup;

    const ALL: &'static [Self] = &[Self::Psi];

    fn index(self) -> usize { 0 }

    fn label(self) -> &'static str { "psi" }

    fn m(self) -> f64 { 0.0 }

    fn members(group: NoGroup) -> &'static [Self] { match group { } }

    fn parse_group(_s: &str) -> Option<NoGroup> { None }
}

component_from_str!(Scalar);

pub type ScalarWavefunction<'g> = Wavefunction<'g, Scalar>;

/// Multiply the Fourier-space component by `exp(-i dt_eff k² / 4)`.
pub fn kinetic_step(wfn: &mut ScalarWavefunction<'_>, params: &Parameters) {
    let dt = params.effective_dt();
    let wave_number = wfn.grid().wave_number();
    apply_kinetic(wfn.fourier_component_mut(Scalar::Psi), wave_number, dt, 0.0);
}

/// Multiply the real-space component by `exp(-i dt_eff (V + g |ψ|²))`.
pub fn potential_step(wfn: &mut ScalarWavefunction<'_>, params: &Parameters)
    -> EvolutionResult<()>
{
    let dt = params.effective_dt();
    let trap = params.trap.on_grid(wfn.grid())?;
    let g = params.g;
    nd::Zip::from(wfn.component_mut(Scalar::Psi)).and_broadcast(&trap)
        .for_each(|psi, &v| {
            *psi *= (-C64::i() * dt * (v + g * psi.norm_sqr())).exp();
        });
    Ok(())
}

impl Evolve for Scalar {
    const RENORMALISATION: Renormalisation = Renormalisation::PerComponent;

    fn kinetic_step(wfn: &mut ScalarWavefunction<'_>, params: &Parameters) {
        kinetic_step(wfn, params)
    }

    fn interaction_step(wfn: &mut ScalarWavefunction<'_>, params: &Parameters)
        -> EvolutionResult<()>
    {
        potential_step(wfn, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::{
        grid::Grid,
        params::{ TimeStep, Trap },
        timedep::step_wavefunction,
    };

    fn uniform(grid: &Grid, v: C64) -> nd::ArrayD<C64> {
        nd::ArrayD::from_elem(nd::IxDyn(grid.shape()), v)
    }

    #[test]
    fn labels() {
        assert_eq!(Scalar::Psi.label(), "psi");
        assert_eq!("psi".parse::<Scalar>().unwrap(), Scalar::Psi);
        assert_eq!(Scalar::Psi.to_string(), "psi");
    }

    #[test]
    fn potential_phase() {
        let grid = Grid::new_1d(16, 0.5).unwrap();
        let mut psi = ScalarWavefunction::new(&grid);
        psi.set_component(Scalar::Psi, uniform(&grid, C64::new(2.0, 0.0))).unwrap();
        let params = Parameters {
            dt: TimeStep::Real(0.1),
            g: 0.5,
            trap: Trap::Uniform(1.0),
            ..Parameters::default()
        };
        potential_step(&mut psi, &params).unwrap();
        let expected = 2.0 * C64::cis(-0.1 * (1.0 + 0.5 * 4.0));
        psi.component(Scalar::Psi).iter()
            .for_each(|z| assert_abs_diff_eq!((z - expected).norm(), 0.0, epsilon = 1e-13));
    }

    #[test]
    fn potential_phase_follows_trap_array() {
        let grid = Grid::new_1d(16, 0.5).unwrap();
        let mut psi = ScalarWavefunction::new(&grid);
        psi.set_component(Scalar::Psi, uniform(&grid, C64::from(1.0))).unwrap();
        let params = Parameters {
            dt: TimeStep::Real(0.1),
            trap: Trap::harmonic(&grid, &[2.0]),
            ..Parameters::default()
        };
        potential_step(&mut psi, &params).unwrap();
        psi.component(Scalar::Psi).iter().zip(grid.mesh(0))
            .for_each(|(z, &x)| {
                let expected = C64::cis(-0.1 * 2.0 * x * x);
                assert_abs_diff_eq!((z - expected).norm(), 0.0, epsilon = 1e-13);
            });
    }

    #[test]
    fn trap_shape_mismatch_is_an_error() {
        let grid = Grid::new_1d(16, 0.5).unwrap();
        let mut psi = ScalarWavefunction::new(&grid);
        let params = Parameters {
            trap: Trap::Array(nd::ArrayD::zeros(nd::IxDyn(&[8]))),
            ..Parameters::default()
        };
        assert!(step_wavefunction(&mut psi, &params).is_err());
    }

    #[test]
    fn uniform_state_real_time() {
        let grid = Grid::new_2d((32, 32), (0.5, 0.5)).unwrap();
        let mut psi = ScalarWavefunction::new(&grid);
        psi.set_component(Scalar::Psi, uniform(&grid, C64::new(1.0, 0.0))).unwrap();
        psi.fft();
        let params = Parameters {
            dt: TimeStep::Real(1e-2),
            g: 1.0,
            ..Parameters::default()
        };
        for _ in 0..20 {
            step_wavefunction(&mut psi, &params).unwrap();
        }
        psi.ifft();
        psi.component_density(Scalar::Psi).iter()
            .for_each(|&n| assert_abs_diff_eq!(n, 1.0, epsilon = 1e-10));
        // uniform phase rotation at the chemical potential
        let expected = C64::cis(-20.0 * 1e-2);
        psi.component(Scalar::Psi).iter()
            .for_each(|z| assert_abs_diff_eq!((z - expected).norm(), 0.0, epsilon = 1e-10));
    }

    #[test]
    fn dissipation_keeps_atom_number() {
        let grid = Grid::new_1d(64, 0.5).unwrap();
        let mut psi = ScalarWavefunction::new(&grid);
        let data: nd::ArrayD<C64>
            = grid.mesh(0).mapv(|x| C64::new((-x * x / 4.0).exp(), 0.0));
        psi.set_component(Scalar::Psi, data).unwrap();
        let target = psi.atom_num(Scalar::Psi);
        psi.fft();
        let params = Parameters {
            dt: TimeStep::Real(1e-2),
            gamma: 0.1,
            g: 1.0,
            ..Parameters::default()
        };
        for _ in 0..10 {
            step_wavefunction(&mut psi, &params).unwrap();
        }
        psi.ifft();
        assert_abs_diff_eq!(psi.calculate_atom_num(Scalar::Psi), target, epsilon = 1e-9);
    }
}
