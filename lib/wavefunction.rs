//! Multi-component complex fields on a [`Grid`].
//!
//! A [`Wavefunction`] owns one real-space and one Fourier-space array per
//! component. The two representations are not kept in sync automatically:
//! [`Wavefunction::fft`] refreshes the Fourier-space arrays from the
//! real-space ones and [`Wavefunction::ifft`] does the reverse. Per-component
//! atom numbers are stored alongside and recomputed from real-space data
//! whenever components are replaced, noise is added, or a ground state is set;
//! they serve as the targets for renormalization.

use std::{ fmt, marker::PhantomData };
use ndarray as nd;
use num_complex::Complex64 as C64;
use rand::{ self as rnd, Rng };
use rand_distr::{ Distribution, Normal };
use crate::{
    component::{ Component, Select },
    error::{ FieldError, ShapeError },
    grid::Grid,
    params::Parameters,
    utils::{ FftPlan, norm_sqr_sum },
};

pub type FieldResult<T> = Result<T, FieldError>;

/// Renormalization target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Renormalisation {
    /// Restore each component's stored atom number separately.
    PerComponent,
    /// Restore the total stored atom number, scaling all components by the
    /// same factor.
    Total,
}

/// A named closed-form stationary state.
pub trait GroundState: Copy + fmt::Debug {
    type Component: Component;

    /// Uniform amplitude of each component, in storage order.
    fn amplitudes(&self, params: &Parameters) -> Vec<C64>;
}

/// A wavefunction with components `C` on a borrowed grid.
#[derive(Clone, Debug)]
pub struct Wavefunction<'g, C: Component> {
    grid: &'g Grid,
    plan: FftPlan,
    components: Vec<nd::ArrayD<C64>>,
    fourier_components: Vec<nd::ArrayD<C64>>,
    atom_num: Vec<f64>,
    _comp: PhantomData<C>,
}

impl<'g, C: Component> Wavefunction<'g, C> {
    /// Create a new, zero-valued wavefunction on `grid`.
    pub fn new(grid: &'g Grid) -> Self {
        let n = C::ALL.len();
        let zeros: nd::ArrayD<C64> = nd::ArrayD::zeros(nd::IxDyn(grid.shape()));
        Self {
            grid,
            plan: FftPlan::new(grid.shape()),
            components: vec![zeros.clone(); n],
            fourier_components: vec![zeros; n],
            atom_num: vec![0.0; n],
            _comp: PhantomData,
        }
    }

    /// Return the grid the wavefunction is defined on.
    pub fn grid(&self) -> &'g Grid { self.grid }

    /// Real-space data of a single component.
    pub fn component(&self, c: C) -> &nd::ArrayD<C64> {
        &self.components[c.index()]
    }

    /// Mutable real-space data of a single component.
    ///
    /// Stored atom numbers are not updated; see
    /// [`update_atom_num`][Self::update_atom_num].
    pub fn component_mut(&mut self, c: C) -> &mut nd::ArrayD<C64> {
        &mut self.components[c.index()]
    }

    /// Fourier-space data of a single component.
    pub fn fourier_component(&self, c: C) -> &nd::ArrayD<C64> {
        &self.fourier_components[c.index()]
    }

    /// Mutable Fourier-space data of a single component.
    pub fn fourier_component_mut(&mut self, c: C) -> &mut nd::ArrayD<C64> {
        &mut self.fourier_components[c.index()]
    }

    /// Real-space data of all components, in storage order.
    pub fn components(&self) -> &[nd::ArrayD<C64>] { &self.components }

    /// Fourier-space data of all components, in storage order.
    pub fn fourier_components(&self) -> &[nd::ArrayD<C64>] {
        &self.fourier_components
    }

    // real-space components as a fixed-size array for pointwise kernels
    pub(crate) fn components_array_mut<const N: usize>(&mut self)
        -> &mut [nd::ArrayD<C64>; N]
    {
        match <&mut [nd::ArrayD<C64>; N]>::try_from(self.components.as_mut_slice()) {
            Ok(arr) => arr,
            Err(_) => unreachable!("wavefunction holds {} components", C::ALL.len()),
        }
    }

    // Fourier-space components as a fixed-size array
    pub(crate) fn fourier_components_array_mut<const N: usize>(&mut self)
        -> &mut [nd::ArrayD<C64>; N]
    {
        match <&mut [nd::ArrayD<C64>; N]>::try_from(self.fourier_components.as_mut_slice()) {
            Ok(arr) => arr,
            Err(_) => unreachable!("wavefunction holds {} components", C::ALL.len()),
        }
    }

    /// Replace the real-space data of a single component and recompute its
    /// atom number.
    ///
    /// Fourier-space data is left untouched.
    pub fn set_component<S, D>(&mut self, c: C, data: nd::ArrayBase<S, D>)
        -> FieldResult<()>
    where
        S: nd::Data<Elem = C64>,
        D: nd::Dimension,
    {
        ShapeError::check(self.grid.shape(), data.shape())?;
        self.components[c.index()] = data.into_owned().into_dyn();
        self.update_atom_num(c);
        Ok(())
    }

    /// Replace the real-space data of several components and recompute their
    /// atom numbers.
    ///
    /// All shapes are checked before any component is replaced. Fourier-space
    /// data is left untouched.
    pub fn set_wavefunction<I, S, D>(&mut self, data: I) -> FieldResult<()>
    where
        I: IntoIterator<Item = (C, nd::ArrayBase<S, D>)>,
        S: nd::Data<Elem = C64>,
        D: nd::Dimension,
    {
        let data: Vec<(C, nd::ArrayBase<S, D>)> = data.into_iter().collect();
        data.iter()
            .try_for_each(|(_, arr)| ShapeError::check(self.grid.shape(), arr.shape()))?;
        for (c, arr) in data.into_iter() {
            self.components[c.index()] = arr.into_owned().into_dyn();
            self.update_atom_num(c);
        }
        Ok(())
    }

    /// Add complex Gaussian noise to the selected components using a fresh
    /// thread-local RNG.
    ///
    /// See [`add_noise_with_rng`][Self::add_noise_with_rng].
    pub fn add_noise(&mut self, select: &Select<C>, mean: f64, std_dev: f64)
        -> FieldResult<()>
    {
        self.add_noise_with_rng(select, mean, std_dev, &mut rnd::thread_rng())
    }

    /// Add complex Gaussian noise to the selected real-space components and
    /// recompute their atom numbers.
    ///
    /// Real and imaginary parts at each point are drawn independently from
    /// `Normal(mean, std_dev)`. Fails if `std_dev` is negative or not finite.
    pub fn add_noise_with_rng<R>(
        &mut self,
        select: &Select<C>,
        mean: f64,
        std_dev: f64,
        rng: &mut R,
    ) -> FieldResult<()>
    where R: Rng + ?Sized
    {
        FieldError::check_std_dev(std_dev)?;
        let normal = Normal::new(mean, std_dev)
            .map_err(|_| FieldError::BadNoise(std_dev))?;
        for c in select.components().into_iter() {
            self.components[c.index()].map_inplace(|z| {
                *z += C64::new(normal.sample(rng), normal.sample(rng));
            });
            self.update_atom_num(c);
        }
        Ok(())
    }

    /// Multiply the selected real-space components elementwise by
    /// `exp(i * phase)`.
    pub fn apply_phase<S, D>(&mut self, phase: &nd::ArrayBase<S, D>, select: &Select<C>)
        -> FieldResult<()>
    where
        S: nd::Data<Elem = f64>,
        D: nd::Dimension,
    {
        ShapeError::check(self.grid.shape(), phase.shape())?;
        let phase = phase.view().into_dyn();
        for c in select.components().into_iter() {
            self.components[c.index()]
                .zip_mut_with(&phase, |z, &ph| { *z *= C64::cis(ph); });
        }
        Ok(())
    }

    /// Transform every component from real space to Fourier space.
    pub fn fft(&mut self) {
        let plan = &mut self.plan;
        self.components.iter().zip(self.fourier_components.iter_mut())
            .for_each(|(x, k)| {
                k.assign(x);
                plan.forward(k);
            });
    }

    /// Transform every component from Fourier space to real space.
    pub fn ifft(&mut self) {
        let plan = &mut self.plan;
        self.fourier_components.iter().zip(self.components.iter_mut())
            .for_each(|(k, x)| {
                x.assign(k);
                plan.inverse(x);
            });
    }

    /// Total density `Σ_c |ψ_c|²` of the current real-space data.
    pub fn density(&self) -> nd::ArrayD<f64> {
        let mut dens: nd::ArrayD<f64> = nd::ArrayD::zeros(nd::IxDyn(self.grid.shape()));
        self.components.iter()
            .for_each(|x| { dens.zip_mut_with(x, |nk, xk| { *nk += xk.norm_sqr(); }); });
        dens
    }

    /// Density `|ψ_c|²` of a single component.
    pub fn component_density(&self, c: C) -> nd::ArrayD<f64> {
        self.components[c.index()].mapv(|x| x.norm_sqr())
    }

    /// Stored atom number of a single component.
    pub fn atom_num(&self, c: C) -> f64 { self.atom_num[c.index()] }

    /// Stored atom numbers of all components, in storage order.
    pub fn atom_nums(&self) -> &[f64] { &self.atom_num }

    /// Sum of all stored atom numbers.
    pub fn total_atom_num(&self) -> f64 { self.atom_num.iter().sum() }

    /// Atom number of a single component computed from the current
    /// real-space data, without updating the stored value.
    pub fn calculate_atom_num(&self, c: C) -> f64 {
        norm_sqr_sum(&self.components[c.index()], self.grid.grid_spacing_product())
    }

    /// Total atom number computed from the current real-space data, without
    /// updating the stored values.
    pub fn calculate_total_atom_num(&self) -> f64 {
        C::ALL.iter().map(|c| self.calculate_atom_num(*c)).sum()
    }

    /// Recompute the stored atom number of a single component from the
    /// current real-space data.
    pub fn update_atom_num(&mut self, c: C) {
        self.atom_num[c.index()] = self.calculate_atom_num(c);
    }

    /// Recompute all stored atom numbers from the current real-space data.
    pub fn update_atom_nums(&mut self) {
        C::ALL.iter().for_each(|c| self.update_atom_num(*c));
    }

    /// Rescale components to restore the stored atom numbers.
    ///
    /// Real-space data is first refreshed from Fourier space and the
    /// Fourier-space data is refreshed afterward. Components (or totals) whose
    /// current atom number is zero are left unscaled. Stored atom numbers are
    /// not modified.
    pub fn renormalise(&mut self, mode: Renormalisation) {
        self.ifft();
        match mode {
            Renormalisation::PerComponent => {
                for c in C::ALL.iter().copied() {
                    let scale = rescale_factor(self.atom_num(c), self.calculate_atom_num(c));
                    log::trace!("renormalise {}: scale factor {}", c.label(), scale);
                    self.components[c.index()].map_inplace(|x| { *x *= scale; });
                }
            },
            Renormalisation::Total => {
                let scale = rescale_factor(
                    self.total_atom_num(), self.calculate_total_atom_num());
                log::trace!("renormalise total: scale factor {}", scale);
                self.components.iter_mut()
                    .for_each(|x| { x.map_inplace(|xk| { *xk *= scale; }); });
            },
        }
        self.fft();
    }

    /// Set every component to the uniform amplitude given by a named ground
    /// state and recompute atom numbers.
    pub fn set_ground_state<G>(&mut self, state: G, params: &Parameters)
    where G: GroundState<Component = C>
    {
        log::debug!("setting ground state {:?}", state);
        let amps = state.amplitudes(params);
        self.components.iter_mut().zip(amps)
            .for_each(|(x, a)| { x.fill(a); });
        self.update_atom_nums();
    }
}

fn rescale_factor(target: f64, current: f64) -> f64 {
    if current > 0.0 { (target / current).sqrt() } else { 1.0 }
}
