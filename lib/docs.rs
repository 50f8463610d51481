//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units](#units)
//! - [Split-step evolution](#split-step-evolution)
//! - [Spinor interactions](#spinor-interactions)
//! - [Imaginary time and dissipation](#imaginary-time-and-dissipation)
//!
//! # Background
//! In the mean-field limit, a dilute Bose-Einstein condensate of atoms with
//! hyperfine spin *f* is described by a (2*f* + 1)-component order parameter
//! ψ<sub>*m*</sub>(**r**, *t*), *m* ∊ {*f*, ..., -*f*}, whose evolution is
//! governed by the Gross-Pitaevskii equation (GPE)
//! ```text
//!   ∂ψ_m
//! i ---- = [-∇²/2 + V(r) - p m + q m²] ψ_m + (interaction terms)
//!    ∂t
//! ```
//! where *V* is an external trapping potential and *p* and *q* are the linear
//! and quadratic Zeeman shifts. The interaction terms depend on the spin:
//! - *f* = 0 (scalar): `g |ψ|² ψ`
//! - two-component (pseudo-spin-1/2): `(g± |ψ±|² + g₊₋ |ψ∓|²) ψ±`
//! - *f* = 1: `c₀ n ψ_m + c₂ (F · f)_{m m'} ψ_m'`
//! - *f* = 2: the *f* = 1 terms plus a spin-singlet term weighted by `c₄`
//!
//! where *n* = Σ<sub>*m*</sub> |ψ<sub>*m*</sub>|² is the total density,
//! **F** = ψ<sup>†</sup> **f** ψ is the local spin density, and **f** are the
//! spin-*f* matrices.
//!
//! # Units
//! All quantities are dimensionless. Lengths are measured in some
//! characteristic length ℓ, times in *m* ℓ²/ħ, and energies in ħ²/*m* ℓ², so
//! that the kinetic operator takes the form -∇²/2 with no prefactor. Every
//! interaction constant and Zeeman shift is given in these same units, and
//! *n0* is a target density in units of ℓ<sup>-*d*</sup> on a *d*-dimensional
//! grid.
//!
//! # Split-step evolution
//! As in the single-particle case, the right-hand side of the GPE splits into
//! a kinetic part, diagonal in momentum space, and a "potential" part that is
//! diagonal in position space but now depends on the local field:
//! ```text
//!   ∂ψ
//! i -- = (H_k + H_v[ψ]) ψ
//!   ∂t
//!
//! H_k = k²/2 (+ q m² for spin-1)
//! H_v = V + interactions (+ Zeeman)
//! ```
//! Sandwiching a full *H*<sub>*v*</sub> step between two half-sized
//! *H*<sub>*k*</sub> steps gives an error of *O*(*dt*³) per step:
//! ```text
//!               -i H_k dt/2  -i H_v dt  -i H_k dt/2
//! ψ(t + dt) = [e            e          e           ] ψ(t) + O(dt³)
//! ```
//! The kinetic factor is applied pointwise to the Fourier-space data,
//! `exp(-i dt k² / 4)` for each half-step. The Fourier transform follows the
//! usual discrete convention, with the forward transform unnormalized and the
//! inverse carrying the `1/N` factor, and the wave numbers
//! `k = 2π × (0, 1, ..., -1) / (N dx)` have the zero frequency at index 0.
//!
//! One step is then
//! ```text
//!     ψ(t, k)
//!        |
//!        V
//!   -i dt k²/4
//!  e
//!        |
//!        '--> iFFT ---.
//!                     |
//!                     V
//!                -i dt H_v[ψ(x)]
//!               e
//!                     |
//!        .--- FFT <---'
//!        |
//!        V
//!   -i dt k²/4
//!  e
//!        |
//!        V
//!   ψ(t + dt, k)
//! ```
//! with *H*<sub>*v*</sub> evaluated from the densities at the start of the
//! position-space step.
//!
//! # Spinor interactions
//! For spin-1, the spin-dependent interaction acts at each point as a rotation
//! generated by the local spin. Writing
//! ```text
//! F⊥ = √2 (ψ₊* ψ₀ + ψ₀* ψ₋)
//! Fz = |ψ₊|² - |ψ₋|²
//! |F| = √(|F⊥|² + Fz²)
//! ```
//! the exact solution over a step is
//! ```text
//! ψ ← [cos(c₂ |F| dt) - i sin(c₂ |F| dt) (F · f) / |F|] ψ
//! ```
//! because (**F** · **f**)/|**F**| has eigenvalues in {-1, 0, 1} for spin-1.
//! The density-dependent term `exp(-i dt (V + c₀ n ∓ p))` is applied
//! afterwards, and the quadratic Zeeman shift is folded into the kinetic
//! step of the ±1 components.
//!
//! For spin-2, the spin rotation `exp(-i c₂ |F| dt (F · f) / |F|)` is
//! expanded as a fourth-order polynomial in (**F** · **f**)/|**F**|, whose
//! eigenvalues are {-2, ..., 2}. The singlet term depends on the amplitude of
//! the spin-singlet pair
//! ```text
//! A₂₀ = (ψ₀² - 2 ψ₁ ψ₋₁ + 2 ψ₂ ψ₋₂) / √5
//! ```
//! and is applied as a rotation between ψ<sub>*m*</sub> and
//! ψ<sub>-*m*</sub><sup>\*</sup> with frequency
//! `c₄ √(n² - |A₂₀|²)`. Whenever the spin magnitude or singlet frequency
//! vanishes at a point, the corresponding rotation is the identity there.
//!
//! # Imaginary time and dissipation
//! Taking *t* → -*i* *t* turns the GPE into a diffusion equation in which
//! every excited contribution decays faster than the lowest-energy state, so
//! repeated imaginary-time steps relax any initial state with non-zero
//! overlap to the ground state. A complex time step of the form `-i τ`
//! selects this mode. A phenomenological dissipation γ is included by
//! replacing `dt` with `dt (1 - i γ)` everywhere.
//!
//! Neither transformation preserves the norm, so after every such step the
//! components are rescaled to restore their stored atom numbers: each
//! component separately for scalar and two-component fields, or the total
//! for spin-1 and spin-2, where spin-changing collisions legitimately move
//! atoms between components.
