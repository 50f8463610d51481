//! Spin-1 condensates.
//!
//! The three components `ψ = (ψ₊, ψ₀, ψ₋)` evolve under
//! ```text
//! i ∂ψ_m/∂t = [-∇²/2 + V - p m + q m² + c0 n] ψ_m + c2 (F · f ψ)_m
//! ```
//! where `n = Σ_m |ψ_m|²` is the total density and `F = ψ† f ψ` the spin
//! density. The interaction step exponentiates the spin-dependent term in
//! closed form: with transverse spin `F⊥ = √2 (ψ₊* ψ₀ + ψ₀* ψ₋)`, longitudinal
//! spin `Fz = |ψ₊|² - |ψ₋|²` and `|F| = √(|F⊥|² + Fz²)`, the operator
//! `exp(-i c2 dt F · f)` is `cos(c2 |F| dt) - i sin(c2 |F| dt) (F · f) / |F|`
//! since `(F · f)³ = |F|² (F · f)` for spin 1.

use std::f64::consts::FRAC_1_SQRT_2;
use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    component::{ Component, component_from_str },
    error::FieldError,
    params::Parameters,
    timedep::{ EvolutionResult, Evolve, apply_kinetic },
    wavefunction::{ GroundState, Renormalisation, Wavefunction },
};

/// Components of a spin-1 condensate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpinOne {
    Plus,
    Zero,
    Minus,
}

/// Named groups of spin-1 components.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpinOneGroup {
    /// The `m = ±1` components.
    Outer,
}

impl Component for SpinOne {
    type Group = SpinOneGroup;

    const ALL: &'static [Self] = &[Self::Plus, Self::Zero, Self::Minus];

    fn index(self) -> usize {
        match self {
            Self::Plus => 0,
            Self::Zero => 1,
            Self::Minus => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Zero => "zero",
            Self::Minus => "minus",
        }
    }

    fn m(self) -> f64 {
        match self {
            Self::Plus => 1.0,
            Self::Zero => 0.0,
            Self::Minus => -1.0,
        }
    }

    fn members(group: SpinOneGroup) -> &'static [Self] {
        match group {
            SpinOneGroup::Outer => &[Self::Plus, Self::Minus],
        }
    }

    fn parse_group(s: &str) -> Option<SpinOneGroup> {
        (s == "outer").then_some(SpinOneGroup::Outer)
    }
}

component_from_str!(SpinOne);

pub type SpinOneWavefunction<'g> = Wavefunction<'g, SpinOne>;

/// Closed-form uniform stationary states of a spin-1 condensate with density
/// `n0`.
///
/// Amplitudes involving `p / c2` or `1 / q` are computed without guarding
/// against zero denominators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpinOneGroundState {
    /// `ψ₀ = √n0`.
    Polar,
    /// `ψ₊ = √n0`.
    Ferromagnetic,
    /// `ψ± = √n0 √((1 ± p/c2) / 2)`.
    Antiferromagnetic,
    /// Broken-axisymmetry state, with all three components occupied.
    BrokenAxisymmetry,
}

impl std::str::FromStr for SpinOneGroundState {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "polar" => Ok(Self::Polar),
            "ferromagnetic" => Ok(Self::Ferromagnetic),
            "antiferromagnetic" => Ok(Self::Antiferromagnetic),
            "BA" | "broken-axisymmetry" => Ok(Self::BrokenAxisymmetry),
            other => Err(FieldError::UnknownGroundState(other.to_string())),
        }
    }
}

impl GroundState for SpinOneGroundState {
    type Component = SpinOne;

    fn amplitudes(&self, params: &Parameters) -> Vec<C64> {
        let Parameters { n0: n, p, q, c2, .. } = *params;
        let sqrt_n = n.sqrt();
        let (plus, zero, minus): (f64, f64, f64)
            = match self {
                Self::Polar => (0.0, sqrt_n, 0.0),
                Self::Ferromagnetic => (sqrt_n, 0.0, 0.0),
                Self::Antiferromagnetic => (
                    sqrt_n * ((1.0 + p / c2) / 2.0).sqrt(),
                    0.0,
                    sqrt_n * ((1.0 - p / c2) / 2.0).sqrt(),
                ),
                Self::BrokenAxisymmetry => {
                    let outer
                        = ((q * q - p * p + 2.0 * c2 * n * q) / (2.0 * c2 * n * q))
                        .sqrt();
                    let zero
                        = (
                            (q * q - p * p) * (2.0 * c2 * n * q - p * p - q * q)
                            / (4.0 * c2 * n * q.powi(3))
                        ).sqrt();
                    (
                        sqrt_n * (q + p) / (2.0 * q) * outer,
                        sqrt_n * zero,
                        sqrt_n * (q - p) / (2.0 * q) * outer,
                    )
                },
            };
        vec![plus.into(), zero.into(), minus.into()]
    }
}

/// Apply the kinetic and quadratic Zeeman half-step to the Fourier-space
/// components: `exp(-i dt_eff (k² + 2q) / 4)` for `m = ±1` and
/// `exp(-i dt_eff k² / 4)` for `m = 0`.
pub fn kinetic_zeeman_step(wfn: &mut SpinOneWavefunction<'_>, params: &Parameters) {
    let dt = params.effective_dt();
    let q = params.q;
    let wave_number = wfn.grid().wave_number();
    let [plus, zero, minus] = wfn.fourier_components_array_mut::<3>();
    apply_kinetic(plus, wave_number, dt, 0.5 * q);
    apply_kinetic(zero, wave_number, dt, 0.0);
    apply_kinetic(minus, wave_number, dt, 0.5 * q);
}

/// Apply the full interaction step to the real-space components: the exact
/// spin rotation generated by `c2`, followed by the trap, linear Zeeman, and
/// density (`c0`) phases evaluated with the density from before the step.
pub fn interaction_step(wfn: &mut SpinOneWavefunction<'_>, params: &Parameters)
    -> EvolutionResult<()>
{
    let dt = params.effective_dt();
    let trap = params.trap.on_grid(wfn.grid())?;
    let [plus, zero, minus] = wfn.components_array_mut::<3>();
    nd::Zip::from(plus).and(zero).and(minus).and_broadcast(&trap)
        .for_each(|p, z, m, &v| {
            let [pn, zn, mn] = interaction_at([*p, *z, *m], v, params, dt);
            *p = pn;
            *z = zn;
            *m = mn;
        });
    Ok(())
}

// transverse (F₊ = Fx + iFy) and longitudinal spin at a single point
fn spin_at(psi: &[C64; 3]) -> (C64, f64) {
    let [p, z, m] = *psi;
    let f_perp = std::f64::consts::SQRT_2 * (p.conj() * z + z.conj() * m);
    let f_z = p.norm_sqr() - m.norm_sqr();
    (f_perp, f_z)
}

fn interaction_at(psi: [C64; 3], trap: f64, params: &Parameters, dt: C64)
    -> [C64; 3]
{
    let (f_perp, f_z) = spin_at(&psi);
    let spin_mag = (f_perp.norm_sqr() + f_z * f_z).sqrt();
    let dens: f64 = psi.iter().map(|x| x.norm_sqr()).sum();

    let cos_term = (params.c2 * spin_mag * dt).cos();
    // zero spin means no rotation
    let sin_term
        = if spin_mag > 0.0 {
            C64::i() * (params.c2 * spin_mag * dt).sin() / spin_mag
        } else {
            C64::zero()
        };

    let [p, z, m] = psi;
    let p_rot
        = cos_term * p - sin_term * (f_z * p + f_perp.conj() * FRAC_1_SQRT_2 * z);
    let z_rot
        = cos_term * z - sin_term * FRAC_1_SQRT_2 * (f_perp * p + f_perp.conj() * m);
    let m_rot
        = cos_term * m - sin_term * (f_perp * FRAC_1_SQRT_2 * z - f_z * m);

    let phase = |shift: f64| -> C64 {
        (-C64::i() * dt * (trap + shift + params.c0 * dens)).exp()
    };
    [
        p_rot * phase(-params.p),
        z_rot * phase(0.0),
        m_rot * phase(params.p),
    ]
}

/// Compute the transverse spin `F₊ = Fx + iFy` and longitudinal spin `Fz` of
/// the current real-space data.
pub fn spin_vectors(wfn: &SpinOneWavefunction<'_>) -> (nd::ArrayD<C64>, nd::ArrayD<f64>) {
    let plus = wfn.component(SpinOne::Plus);
    let zero = wfn.component(SpinOne::Zero);
    let minus = wfn.component(SpinOne::Minus);
    let f_perp: nd::ArrayD<C64>
        = nd::Zip::from(plus).and(zero).and(minus)
        .map_collect(|p, z, m| spin_at(&[*p, *z, *m]).0);
    let f_z: nd::ArrayD<f64>
        = nd::Zip::from(plus).and(minus)
        .map_collect(|p, m| p.norm_sqr() - m.norm_sqr());
    (f_perp, f_z)
}

impl Evolve for SpinOne {
    const RENORMALISATION: Renormalisation = Renormalisation::Total;

    fn kinetic_step(wfn: &mut SpinOneWavefunction<'_>, params: &Parameters) {
        kinetic_zeeman_step(wfn, params)
    }

    fn interaction_step(wfn: &mut SpinOneWavefunction<'_>, params: &Parameters)
        -> EvolutionResult<()>
    {
        interaction_step(wfn, params)
    }
}
