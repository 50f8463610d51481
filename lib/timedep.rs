//! Generic split-step Fourier time evolution.
//!
//! A single step for every spin multiplicity is the symmetric (Strang)
//! sequence
//! 1. kinetic half-step in Fourier space
//! 2. inverse FFT to real space
//! 3. full interaction/potential step in real space
//! 4. forward FFT to Fourier space
//! 5. kinetic half-step in Fourier space
//! 6. renormalization, if the time step is complex or there is dissipation
//!
//! which is second-order accurate in `dt`. Sub-steps are supplied per
//! multiplicity through the [`Evolve`] trait; see [`scalar`][crate::scalar],
//! [`spinhalf`][crate::spinhalf], [`spinone`][crate::spinone], and
//! [`spintwo`][crate::spintwo].
//!
//! Before the first step the Fourier-space data must be current, i.e.
//! [`Wavefunction::fft`] must be called after initializing components in real
//! space.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    component::Component,
    error::EvolutionError,
    params::Parameters,
    wavefunction::{ Renormalisation, Wavefunction },
};

pub type EvolutionResult<T> = Result<T, EvolutionError>;

/// Per-multiplicity split-step sub-steps.
pub trait Evolve: Component {
    /// How atom number is restored after a non-unitary step.
    const RENORMALISATION: Renormalisation;

    /// Apply a kinetic half-step to the Fourier-space data.
    fn kinetic_step(wfn: &mut Wavefunction<'_, Self>, params: &Parameters);

    /// Apply a full interaction step to the real-space data.
    fn interaction_step(wfn: &mut Wavefunction<'_, Self>, params: &Parameters)
        -> EvolutionResult<()>;
}

/// Advance `wfn` by one full time step.
///
/// Fourier-space data is read at the start and is current at the end;
/// real-space data is current only after a subsequent
/// [`ifft`][Wavefunction::ifft]. The time counter in `params` is not touched;
/// see [`evolve`].
pub fn step_wavefunction<C>(wfn: &mut Wavefunction<'_, C>, params: &Parameters)
    -> EvolutionResult<()>
where C: Evolve
{
    C::kinetic_step(wfn, params);
    wfn.ifft();
    C::interaction_step(wfn, params)?;
    wfn.fft();
    C::kinetic_step(wfn, params);
    if params.needs_renormalisation() {
        wfn.renormalise(C::RENORMALISATION);
    }
    Ok(())
}

/// Perform `steps` full time steps, advancing the time counter in `params`
/// after each.
pub fn evolve<C>(wfn: &mut Wavefunction<'_, C>, params: &mut Parameters, steps: usize)
    -> EvolutionResult<()>
where C: Evolve
{
    evolve_with(wfn, params, steps, |_, _, _| Ok::<(), EvolutionError>(()))
}

/// Like [`evolve`], but call `on_step` with the step index, wavefunction, and
/// parameters after every step, e.g. to save snapshots.
///
/// Iteration stops at the first error returned by either a step or
/// `on_step`.
pub fn evolve_with<C, F, E>(
    wfn: &mut Wavefunction<'_, C>,
    params: &mut Parameters,
    steps: usize,
    mut on_step: F,
) -> Result<(), E>
where
    C: Evolve,
    F: FnMut(usize, &mut Wavefunction<'_, C>, &Parameters) -> Result<(), E>,
    E: From<EvolutionError>,
{
    for k in 0..steps {
        step_wavefunction(wfn, params)?;
        params.advance_time();
        on_step(k, wfn, params)?;
    }
    Ok(())
}

// multiply Fourier-space data by `exp(-i dt (k² / 4 + shift))`, i.e. a kinetic
// half-step, with an optional energy shift
pub(crate) fn apply_kinetic(
    psi_k: &mut nd::ArrayD<C64>,
    wave_number: &nd::ArrayD<f64>,
    dt: C64,
    shift: f64,
) {
    psi_k.zip_mut_with(wave_number, |pk, &k2| {
        *pk *= (-C64::i() * dt * (0.25 * k2 + shift)).exp();
    });
}
