use std::{ error::Error, fs, path::PathBuf };
use ndarray as nd;
use num_complex::Complex64 as C64;
use spinor_gpe::{
    data::DataManager,
    grid::Grid,
    params::{ Parameters, TimeStep, Trap },
    scalar::{ Scalar, ScalarWavefunction },
    timedep::evolve_with,
};

// relax a displaced gaussian to the ground state of a repulsive condensate in
// an anisotropic harmonic trap, saving snapshots along the way

const STEPS: usize = 2000;
const SAVE_EVERY: usize = 100;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .format_timestamp_secs()
        .init();

    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)?;

    let grid = Grid::new_2d((128, 128), (0.25, 0.25))?;
    let mut params = Parameters {
        dt: TimeStep::imaginary(5e-3),
        nt: STEPS,
        g: 50.0,
        trap: Trap::harmonic(&grid, &[1.0, 1.5]),
        ..Parameters::default()
    };

    let mut psi = ScalarWavefunction::new(&grid);
    let init: nd::ArrayD<C64>
        = nd::Zip::from(grid.mesh(0)).and(grid.mesh(1))
        .map_collect(|&x, &y| {
            C64::from((-((x - 1.0).powi(2) + y * y) / 2.0).exp())
        });
    psi.set_component(Scalar::Psi, init)?;
    psi.fft();

    let mut data = DataManager::create(outdir.join("scalar_relax.npz"), &psi, &params)?;
    data.save_wavefunction(&mut psi, params.t)?;
    evolve_with(&mut psi, &mut params, STEPS, |k, wfn, params| {
        if (k + 1) % SAVE_EVERY == 0 {
            data.save_wavefunction(wfn, params.t)?;
            log::info!("step {}/{}: t = {:.3}", k + 1, STEPS, params.t);
        }
        Ok::<(), Box<dyn Error>>(())
    })?;
    data.finish()?;

    psi.ifft();
    let peak = psi.component_density(Scalar::Psi)
        .iter().copied()
        .fold(0.0, f64::max);
    println!("atom number: {:.6}", psi.calculate_atom_num(Scalar::Psi));
    println!("peak density: {:.6}", peak);
    Ok(())
}
