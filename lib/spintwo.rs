//! Spin-2 condensates.
//!
//! The five components `ψ = (ψ₊₂, ψ₊₁, ψ₀, ψ₋₁, ψ₋₂)` evolve under the
//! spin-2 Gross-Pitaevskii equation with density (`c0`), spin (`c2`), and
//! spin-singlet (`c4`) interactions. The interaction step is split into two
//! exactly solvable pieces applied in sequence:
//! 1. the spin-singlet rotation, parameterized by the density `n` and the
//!    singlet pair amplitude `a20 = (ψ₀² - 2ψ₊₁ψ₋₁ + 2ψ₊₂ψ₋₂) / √5`;
//! 2. the spin rotation `exp(-i c2 dt F · f)`, expanded exactly as a quartic
//!    polynomial in `(F · f) / |F|`.
//!
//! A final per-component phase then applies the `c0 + c4` mean field, the trap,
//! and the Zeeman shifts `-p m + q m²`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    component::{ Component, NoGroup, component_from_str },
    error::FieldError,
    params::Parameters,
    timedep::{ EvolutionResult, Evolve, apply_kinetic },
    wavefunction::{ GroundState, Renormalisation, Wavefunction },
};

/// Components of a spin-2 condensate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpinTwo {
    Plus2,
    Plus1,
    Zero,
    Minus1,
    Minus2,
}

impl Component for SpinTwo {
    type Group = NoGroup;

    const ALL: &'static [Self] = &[
        Self::Plus2, Self::Plus1, Self::Zero, Self::Minus1, Self::Minus2,
    ];

    fn index(self) -> usize {
        match self {
            Self::Plus2 => 0,
            Self::Plus1 => 1,
            Self::Zero => 2,
            Self::Minus1 => 3,
            Self::Minus2 => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Plus2 => "plus2",
            Self::Plus1 => "plus1",
            Self::Zero => "zero",
            Self::Minus1 => "minus1",
            Self::Minus2 => "minus2",
        }
    }

    fn m(self) -> f64 { 2.0 - self.index() as f64 }

    fn members(group: NoGroup) -> &'static [Self] { match group { } }

    fn parse_group(_s: &str) -> Option<NoGroup> { None }
}

component_from_str!(SpinTwo);

pub type SpinTwoWavefunction<'g> = Wavefunction<'g, SpinTwo>;

/// Closed-form uniform stationary states of a spin-2 condensate with density
/// `n0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpinTwoGroundState {
    /// Uniaxial nematic: `ψ₀ = √n0`.
    UniaxialNematic,
    /// Biaxial nematic: `ψ₊₂ = ψ₋₂ = √(n0 / 2)`.
    BiaxialNematic,
    /// Ferromagnetic, all atoms in `m = +2`.
    Ferromagnetic2Plus,
    /// Ferromagnetic, all atoms in `m = -2`.
    Ferromagnetic2Minus,
    /// Ferromagnetic, all atoms in `m = +1`.
    Ferromagnetic1Plus,
    /// Ferromagnetic, all atoms in `m = -1`.
    Ferromagnetic1Minus,
    /// Two-component cyclic state in `m = +2` and `m = -1` with longitudinal
    /// magnetization `fz = p + q / (c2 n0)`.
    Cyclic,
}

impl std::str::FromStr for SpinTwoGroundState {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "UN" => Ok(Self::UniaxialNematic),
            "BN" => Ok(Self::BiaxialNematic),
            "F2p" => Ok(Self::Ferromagnetic2Plus),
            "F2m" => Ok(Self::Ferromagnetic2Minus),
            "F1p" => Ok(Self::Ferromagnetic1Plus),
            "F1m" => Ok(Self::Ferromagnetic1Minus),
            "cyclic" => Ok(Self::Cyclic),
            other => Err(FieldError::UnknownGroundState(other.to_string())),
        }
    }
}

impl GroundState for SpinTwoGroundState {
    type Component = SpinTwo;

    fn amplitudes(&self, params: &Parameters) -> Vec<C64> {
        let sqrt_n = params.n0.sqrt();
        let single = |c: SpinTwo| -> [f64; 5] {
            let mut amps = [0.0; 5];
            amps[c.index()] = sqrt_n;
            amps
        };
        let amps: [f64; 5]
            = match self {
                Self::UniaxialNematic => single(SpinTwo::Zero),
                Self::BiaxialNematic => {
                    let a = sqrt_n / 2.0_f64.sqrt();
                    [a, 0.0, 0.0, 0.0, a]
                },
                Self::Ferromagnetic2Plus => single(SpinTwo::Plus2),
                Self::Ferromagnetic2Minus => single(SpinTwo::Minus2),
                Self::Ferromagnetic1Plus => single(SpinTwo::Plus1),
                Self::Ferromagnetic1Minus => single(SpinTwo::Minus1),
                Self::Cyclic => {
                    let fz = params.p + params.q / (params.c2 * params.n0);
                    [
                        sqrt_n * ((1.0 + fz) / 3.0).sqrt(),
                        0.0,
                        0.0,
                        sqrt_n * ((2.0 - fz) / 3.0).sqrt(),
                        0.0,
                    ]
                },
            };
        amps.iter().map(|a| C64::from(*a)).collect()
    }
}

/// Apply a free-particle kinetic half-step to all Fourier-space components.
pub fn kinetic_step(wfn: &mut SpinTwoWavefunction<'_>, params: &Parameters) {
    let dt = params.effective_dt();
    let wave_number = wfn.grid().wave_number();
    wfn.fourier_components_array_mut::<5>().iter_mut()
        .for_each(|psi_k| apply_kinetic(psi_k, wave_number, dt, 0.0));
}

/// Apply the full interaction step to the real-space components.
pub fn interaction_step(wfn: &mut SpinTwoWavefunction<'_>, params: &Parameters)
    -> EvolutionResult<()>
{
    let dt = params.effective_dt();
    let trap = params.trap.on_grid(wfn.grid())?;
    let [p2, p1, z, m1, m2] = wfn.components_array_mut::<5>();
    nd::Zip::from(p2).and(p1).and(z).and(m1).and(m2).and_broadcast(&trap)
        .for_each(|p2, p1, z, m1, m2, &v| {
            let out = interaction_at([*p2, *p1, *z, *m1, *m2], v, params, dt);
            *p2 = out[0];
            *p1 = out[1];
            *z = out[2];
            *m1 = out[3];
            *m2 = out[4];
        });
    Ok(())
}

fn interaction_at(psi: [C64; 5], trap: f64, params: &Parameters, dt: C64)
    -> [C64; 5]
{
    let n = density_at(&psi);
    let a20 = singlet_duo_at(&psi);
    let psi = evolve_singlet(psi, n, a20, params.c4, dt);
    let mut psi = rotate_spin(psi, params.c2, dt);
    let mean_field = (params.c0 + params.c4) * n + trap;
    psi.iter_mut().zip(SpinTwo::ALL)
        .for_each(|(x, c)| {
            let m = c.m();
            *x *= (-C64::i() * dt * (mean_field - params.p * m + params.q * m * m)).exp();
        });
    psi
}

fn density_at(psi: &[C64; 5]) -> f64 { psi.iter().map(|x| x.norm_sqr()).sum() }

fn singlet_duo_at(psi: &[C64; 5]) -> C64 {
    let [p2, p1, z, m1, m2] = *psi;
    (z * z - 2.0 * p1 * m1 + 2.0 * p2 * m2) / 5.0_f64.sqrt()
}

// spin-singlet rotation over a full step
fn evolve_singlet(psi: [C64; 5], n: f64, a20: C64, c4: f64, dt: C64) -> [C64; 5] {
    let s2 = n * n - a20.norm_sqr();
    let s = if s2 > 0.0 { s2.sqrt() } else { 0.0 };
    let cos_term = (c4 * s * dt).cos();
    let sin_term
        = if s > 0.0 { (c4 * s * dt).sin() / s } else { C64::zero() };
    let [p2, p1, z, m1, m2] = psi;
    let i = C64::i();
    [
        p2 * cos_term + i * (n * p2 - a20 * m2.conj()) * sin_term,
        p1 * cos_term + i * (n * p1 + a20 * m1.conj()) * sin_term,
        z * cos_term + i * (n * z - a20 * z.conj()) * sin_term,
        m1 * cos_term + i * (n * m1 + a20 * p1.conj()) * sin_term,
        m2 * cos_term + i * (n * m2 - a20 * p2.conj()) * sin_term,
    ]
}

// transverse (F₋ = Fx - iFy) and longitudinal spin at a single point
fn spin_at(psi: &[C64; 5]) -> (C64, f64) {
    let [t0, t1, t2, t3, t4] = *psi;
    let f_minus
        = 6.0_f64.sqrt() * (t1 * t2.conj() + t2 * t3.conj())
        + 2.0 * (t3 * t4.conj() + t0 * t1.conj());
    let f_z
        = 2.0 * (t0.norm_sqr() - t4.norm_sqr()) + t1.norm_sqr() - t3.norm_sqr();
    (f_minus, f_z)
}

// action of the normalized spin operator (F · f) / |F| on `x`
fn spin_op(fz: f64, fp: C64, x: &[C64; 5]) -> [C64; 5] {
    let r = 1.5_f64.sqrt();
    let fm = fp.conj();
    [
        2.0 * fz * x[0] + fp * x[1],
        fm * x[0] + fz * x[1] + r * fp * x[2],
        r * (fm * x[1] + fp * x[3]),
        r * fm * x[2] - fz * x[3] + fp * x[4],
        fm * x[3] - 2.0 * fz * x[4],
    ]
}

// spin rotation `exp(-i c2 dt F · f)` over a full step
fn rotate_spin(psi: [C64; 5], c2: f64, dt: C64) -> [C64; 5] {
    let (fp, fz) = spin_at(&psi);
    let mod_f = (fz * fz + fp.norm_sqr()).sqrt();

    let theta = c2 * mod_f * dt;
    let (cos1, sin1) = (theta.cos(), theta.sin());
    let (cos2, sin2) = ((2.0 * theta).cos(), (2.0 * theta).sin());
    let i = C64::i();
    let q1_factor = i * (-4.0 / 3.0 * sin1 + 1.0 / 6.0 * sin2);
    let q2_factor = -5.0 / 4.0 + 4.0 / 3.0 * cos1 - 1.0 / 12.0 * cos2;
    let q3_factor = i * (1.0 / 3.0 * sin1 - 1.0 / 6.0 * sin2);
    let q4_factor = 1.0 / 4.0 - 1.0 / 3.0 * cos1 + 1.0 / 12.0 * cos2;

    // zero spin means no rotation
    let (fzq, fpq)
        = if mod_f > 0.0 { (fz / mod_f, fp / mod_f) } else { (0.0, C64::zero()) };
    let q1 = spin_op(fzq, fpq, &psi);
    let q2 = spin_op(fzq, fpq, &q1);
    let q3 = spin_op(fzq, fpq, &q2);
    let q4 = spin_op(fzq, fpq, &q3);

    let mut out = psi;
    out.iter_mut().enumerate()
        .for_each(|(k, x)| {
            *x += q1_factor * q1[k] + q2_factor * q2[k]
                + q3_factor * q3[k] + q4_factor * q4[k];
        });
    out
}

/// Compute the transverse spin `F₋ = Fx - iFy` and longitudinal spin `Fz` of
/// the current real-space data.
///
/// Note that the transverse part has the opposite handedness to
/// [`spinone::spin_vectors`][crate::spinone::spin_vectors], which returns
/// `F₊ = Fx + iFy`.
pub fn spin_vectors(wfn: &SpinTwoWavefunction<'_>) -> (nd::ArrayD<C64>, nd::ArrayD<f64>) {
    let points = pointwise(wfn);
    let f_minus: nd::ArrayD<C64> = points.mapv(|psi| spin_at(&psi).0);
    let f_z: nd::ArrayD<f64> = points.mapv(|psi| spin_at(&psi).1);
    (f_minus, f_z)
}

/// Compute the singlet pair amplitude `a20` of the current real-space data.
pub fn singlet_duo(wfn: &SpinTwoWavefunction<'_>) -> nd::ArrayD<C64> {
    pointwise(wfn).mapv(|psi| singlet_duo_at(&psi))
}

// gather all components at each point
fn pointwise(wfn: &SpinTwoWavefunction<'_>) -> nd::ArrayD<[C64; 5]> {
    let [p2, p1, z, m1, m2]
        = [SpinTwo::Plus2, SpinTwo::Plus1, SpinTwo::Zero, SpinTwo::Minus1, SpinTwo::Minus2]
        .map(|c| wfn.component(c));
    nd::Zip::from(p2).and(p1).and(z).and(m1).and(m2)
        .map_collect(|p2, p1, z, m1, m2| [*p2, *p1, *z, *m1, *m2])
}

impl Evolve for SpinTwo {
    const RENORMALISATION: Renormalisation = Renormalisation::Total;

    fn kinetic_step(wfn: &mut SpinTwoWavefunction<'_>, params: &Parameters) {
        kinetic_step(wfn, params)
    }

    fn interaction_step(wfn: &mut SpinTwoWavefunction<'_>, params: &Parameters)
        -> EvolutionResult<()>
    {
        interaction_step(wfn, params)
    }
}
