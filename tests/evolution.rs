use std::io::Cursor;
use ndarray as nd;
use ndarray_npy::NpzReader;
use num_complex::Complex64 as C64;
use rand::{ SeedableRng, rngs::StdRng };
use spinor_gpe::{
    component::{ Component, Select },
    config::Config,
    data::DataManager,
    grid::Grid,
    params::{ Parameters, TimeStep, Trap },
    scalar::{ Scalar, ScalarWavefunction },
    spinhalf::SpinHalf,
    spinone::{ self, SpinOne, SpinOneGroundState, SpinOneWavefunction },
    spintwo::SpinTwo,
    timedep::{ Evolve, evolve, evolve_with },
    vortex,
    wavefunction::Wavefunction,
};

fn gaussian(grid: &Grid, width: f64) -> nd::ArrayD<C64> {
    let r2: nd::ArrayD<f64>
        = (0..grid.ndim())
        .fold(nd::ArrayD::zeros(nd::IxDyn(grid.shape())), |acc, ax| {
            acc + grid.mesh(ax).mapv(|x| x * x)
        });
    r2.mapv(|r2| C64::from((-r2 / (2.0 * width * width)).exp()))
}

// seed every component with a noisy gaussian, relax in imaginary time, and
// check that the total atom number is restored after every step
fn relax<C: Evolve>(grid: &Grid, params: Parameters, steps: usize) -> f64 {
    let mut rng = StdRng::seed_from_u64(10546);
    let mut psi: Wavefunction<'_, C> = Wavefunction::new(grid);
    let data = gaussian(grid, 2.0);
    psi.set_wavefunction(C::ALL.iter().map(|&c| (c, data.clone()))).unwrap();
    psi.add_noise_with_rng(&Select::All, 0.0, 1e-2, &mut rng).unwrap();
    let target = psi.total_atom_num();
    let mut params = params;
    psi.fft();
    evolve_with(&mut psi, &mut params, steps, |_, wfn, _| {
        wfn.ifft();
        let total = wfn.calculate_total_atom_num();
        assert!((total - target).abs() < 1e-8 * target, "{} != {}", total, target);
        Ok::<(), spinor_gpe::error::EvolutionError>(())
    })
    .unwrap();
    psi.ifft();
    assert!(psi.components().iter().all(|x| x.iter().all(|z| z.is_finite())));
    params.t
}

#[test]
fn scalar_imaginary_time_keeps_atom_number() {
    let grid = Grid::new_2d((64, 64), (0.5, 0.5)).unwrap();
    let mut psi = ScalarWavefunction::new(&grid);
    psi.set_component(Scalar::Psi, nd::ArrayD::from_elem(nd::IxDyn(&[64, 64]), C64::from(1.0)))
        .unwrap();
    assert!((psi.atom_num(Scalar::Psi) - 1024.0).abs() < 1e-10);
    let mut params = Parameters {
        dt: TimeStep::imaginary(0.01),
        g: 1.0,
        ..Parameters::default()
    };
    psi.fft();
    evolve(&mut psi, &mut params, 100).unwrap();
    psi.ifft();
    assert!((psi.calculate_atom_num(Scalar::Psi) - 1024.0).abs() < 1e-8);
    assert!((params.t - 1.0).abs() < 1e-12);
}

#[test]
fn scalar_harmonic_trap_relaxes() {
    let grid = Grid::new_1d(128, 0.2).unwrap();
    let mut psi = ScalarWavefunction::new(&grid);
    // start off-center; relaxation pulls the density back to the trap minimum
    let shifted: nd::ArrayD<C64>
        = grid.mesh(0).mapv(|x| C64::from((-(x - 2.0) * (x - 2.0) / 2.0).exp()));
    psi.set_component(Scalar::Psi, shifted).unwrap();
    let mut params = Parameters {
        dt: TimeStep::imaginary(0.01),
        trap: Trap::harmonic(&grid, &[1.0]),
        ..Parameters::default()
    };
    psi.fft();
    evolve(&mut psi, &mut params, 2000).unwrap();
    psi.ifft();
    let density = psi.component_density(Scalar::Psi);
    let mean_x: f64
        = (&density * grid.mesh(0)).sum() / density.sum();
    assert!(mean_x.abs() < 1e-2, "{}", mean_x);
}

#[test]
fn every_multiplicity_relaxes() {
    let grid = Grid::new_2d((32, 32), (0.5, 0.5)).unwrap();
    let params = Parameters {
        dt: TimeStep::imaginary(1e-3),
        g: 1.0,
        g_plus: 1.0,
        g_minus: 1.2,
        g_pm: 0.5,
        c0: 1.0,
        c2: -0.1,
        c4: 0.2,
        p: 0.05,
        q: 0.1,
        ..Parameters::default()
    };
    let t = relax::<Scalar>(&grid, params.clone(), 20);
    assert!((t - 0.02).abs() < 1e-12);
    relax::<SpinHalf>(&grid, params.clone(), 20);
    relax::<SpinOne>(&grid, params.clone(), 20);
    relax::<SpinTwo>(&grid, params, 20);
}

#[test]
fn dissipative_real_time_keeps_atom_number() {
    let grid = Grid::new_1d(64, 0.5).unwrap();
    let params = Parameters {
        dt: TimeStep::Real(1e-2),
        gamma: 0.05,
        c0: 2.0,
        c2: 0.5,
        q: -0.1,
        ..Parameters::default()
    };
    relax::<SpinOne>(&grid, params, 50);
}

#[test]
fn polar_state_is_stationary() {
    let grid = Grid::new_2d((16, 16), (0.5, 0.5)).unwrap();
    let mut params = Parameters {
        dt: TimeStep::Real(1e-2),
        n0: 2.0,
        c0: 1.0,
        c2: -0.5,
        q: 0.3,
        ..Parameters::default()
    };
    let mut psi = SpinOneWavefunction::new(&grid);
    psi.set_ground_state(SpinOneGroundState::Polar, &params);
    psi.fft();
    evolve(&mut psi, &mut params, 50).unwrap();
    psi.ifft();
    let (f_perp, f_z) = spinone::spin_vectors(&psi);
    assert!(f_perp.iter().all(|f| f.norm() < 1e-12));
    assert!(f_z.iter().all(|f| f.abs() < 1e-12));
    assert!(psi.component_density(SpinOne::Zero).iter().all(|n| (n - 2.0).abs() < 1e-10));
}

#[test]
fn vortex_dipole_real_time_keeps_norm() {
    let grid = Grid::new_2d((64, 64), (0.5, 0.5)).unwrap();
    let mut params = Parameters {
        dt: TimeStep::Real(5e-3),
        c0: 5.0,
        c2: -0.2,
        q: 0.1,
        ..Parameters::default()
    };
    let mut psi = SpinOneWavefunction::new(&grid);
    psi.set_ground_state(SpinOneGroundState::Polar, &params);
    let mut rng = StdRng::seed_from_u64(7);
    psi.add_noise_with_rng(&"outer".parse().unwrap(), 0.0, 1e-3, &mut rng).unwrap();
    let phase = vortex::dipole_pair(&grid, 8.0).unwrap();
    psi.apply_phase(&phase, &Select::All).unwrap();
    let target = psi.calculate_total_atom_num();
    psi.fft();
    evolve(&mut psi, &mut params, 40).unwrap();
    psi.ifft();
    assert!((psi.calculate_total_atom_num() - target).abs() < 1e-8 * target);
}

#[test]
fn config_driven_run() {
    let config = Config::from_toml_str(r#"
        ground_state = "antiferromagnetic"

        [grid]
        points = [32]
        spacings = [0.5]

        [parameters]
        dt = [0.0, -0.005]
        nt = 40
        c0 = 3.0
        c2 = 0.5
        p = 0.1

        [noise]
        components = "zero"
        std_dev = 1e-2
    "#).unwrap();
    let grid = config.grid().unwrap();
    let mut params = config.parameters.clone();
    let mut psi = SpinOneWavefunction::new(&grid);
    let state: SpinOneGroundState = config.ground_state().unwrap().unwrap();
    psi.set_ground_state(state, &params);
    let (select, mean, std_dev) = config.noise::<SpinOne>().unwrap().unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    psi.add_noise_with_rng(&select, mean, std_dev, &mut rng).unwrap();
    let target = psi.total_atom_num();
    psi.fft();
    let nt = params.nt;
    evolve(&mut psi, &mut params, nt).unwrap();
    psi.ifft();
    assert!((psi.calculate_total_atom_num() - target).abs() < 1e-8 * target);
    assert!((params.t - 0.2).abs() < 1e-12);
}

#[test]
fn snapshots_during_evolution() {
    let grid = Grid::new_1d(32, 0.5).unwrap();
    let mut params = Parameters {
        dt: TimeStep::Real(1e-2),
        g: 1.0,
        ..Parameters::default()
    };
    let mut psi = ScalarWavefunction::new(&grid);
    psi.set_component(Scalar::Psi, gaussian(&grid, 1.5)).unwrap();
    psi.fft();
    let mut data = DataManager::new(Cursor::new(Vec::new()), &psi, &params).unwrap();
    data.save_wavefunction(&mut psi, params.t).unwrap();
    evolve_with(&mut psi, &mut params, 20, |k, wfn, params| {
        if (k + 1) % 5 == 0 {
            data.save_wavefunction(wfn, params.t)?;
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
    .unwrap();
    assert_eq!(data.time_index(), 5);
    let mut cursor = data.finish().unwrap();
    cursor.set_position(0);

    let mut npz = NpzReader::new(cursor).unwrap();
    let last_time: nd::Array0<f64>
        = npz.by_name("time/4")
        .or_else(|_| npz.by_name("time/4.npy"))
        .unwrap();
    assert!((last_time.into_scalar() - 0.2).abs() < 1e-12);
    let last: nd::ArrayD<C64>
        = npz.by_name("wavefunction/psi/4")
        .or_else(|_| npz.by_name("wavefunction/psi/4.npy"))
        .unwrap();
    assert_eq!(last.shape(), &[32]);
}

#[test]
fn component_labels_are_unique() {
    fn check<C: Component>() {
        let mut labels: Vec<&str> = C::ALL.iter().map(|c| c.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), C::ALL.len());
    }
    check::<Scalar>();
    check::<SpinHalf>();
    check::<SpinOne>();
    check::<SpinTwo>();
}
