//! Two-component (pseudo-)spin-1/2 condensates.
//!
//! Each component feels the trap, its own density through `g_plus` or
//! `g_minus`, and the other component's density through `g_pm`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    component::{ Component, NoGroup, component_from_str },
    params::Parameters,
    timedep::{ EvolutionResult, Evolve, apply_kinetic },
    wavefunction::{ Renormalisation, Wavefunction },
};

/// Components of a spin-1/2 condensate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpinHalf {
    Plus,
    Minus,
}

impl Component for SpinHalf {
    type Group = NoGroup;

    const ALL: &'static [Self] = &[Self::Plus, Self::Minus];

    fn index(self) -> usize {
        match self {
            Self::Plus => 0,
            Self::Minus => 1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
        }
    }

    fn m(self) -> f64 {
        match self {
            Self::Plus => 0.5,
            Self::Minus => -0.5,
        }
    }

    fn members(group: NoGroup) -> &'static [Self] { match group { } }

    fn parse_group(_s: &str) -> Option<NoGroup> { None }
}

component_from_str!(SpinHalf);

pub type SpinHalfWavefunction<'g> = Wavefunction<'g, SpinHalf>;

/// Apply a free-particle kinetic half-step to both Fourier-space components.
pub fn kinetic_step(wfn: &mut SpinHalfWavefunction<'_>, params: &Parameters) {
    let dt = params.effective_dt();
    let wave_number = wfn.grid().wave_number();
    wfn.fourier_components_array_mut::<2>().iter_mut()
        .for_each(|psi_k| apply_kinetic(psi_k, wave_number, dt, 0.0));
}

/// Apply the trap and mean-field interactions to both real-space components
/// over a full step, using the densities from before the step.
pub fn potential_step(wfn: &mut SpinHalfWavefunction<'_>, params: &Parameters)
    -> EvolutionResult<()>
{
    let dt = params.effective_dt();
    let trap = params.trap.on_grid(wfn.grid())?;
    let [plus, minus] = wfn.components_array_mut::<2>();
    nd::Zip::from(plus).and(minus).and_broadcast(&trap)
        .for_each(|p, m, &v| {
            let [pn, mn] = potential_at([*p, *m], v, params, dt);
            *p = pn;
            *m = mn;
        });
    Ok(())
}

fn potential_at(psi: [C64; 2], trap: f64, params: &Parameters, dt: C64)
    -> [C64; 2]
{
    let [p, m] = psi;
    let (np, nm) = (p.norm_sqr(), m.norm_sqr());
    let energy_p = trap + params.g_plus * np + params.g_pm * nm;
    let energy_m = trap + params.g_minus * nm + params.g_pm * np;
    [
        p * (-C64::i() * dt * energy_p).exp(),
        m * (-C64::i() * dt * energy_m).exp(),
    ]
}

impl Evolve for SpinHalf {
    const RENORMALISATION: Renormalisation = Renormalisation::PerComponent;

    fn kinetic_step(wfn: &mut SpinHalfWavefunction<'_>, params: &Parameters) {
        kinetic_step(wfn, params)
    }

    fn interaction_step(wfn: &mut SpinHalfWavefunction<'_>, params: &Parameters)
        -> EvolutionResult<()>
    {
        potential_step(wfn, params)
    }
}
