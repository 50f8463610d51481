use std::{ env, error::Error, fs, path::PathBuf };
use rand::{ SeedableRng, rngs::StdRng };
use spinor_gpe::{
    component::Select,
    config::Config,
    data::DataManager,
    spinone::{ self, SpinOne, SpinOneGroundState, SpinOneWavefunction },
    timedep::evolve_with,
    vortex,
};

// imprint a random gas of vortex dipoles on a noisy polar spin-1 condensate
// and evolve it in real time
//
// usage: spinone_vortices [config.toml]

const DEFAULT_CONFIG: &str = r#"
ground_state = "polar"

[grid]
points = [128, 128]
spacings = [0.5, 0.5]

[parameters]
dt = 5e-3
nt = 2000
c0 = 10.0
c2 = -0.5
q = 0.1

[noise]
components = "outer"
std_dev = 1e-3
"#;

const NUM_VORTICES: usize = 16;
const THRESHOLD: f64 = 4.0;
const SAVE_EVERY: usize = 200;
const SEED: u64 = 10546;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .format_timestamp_secs()
        .init();

    let config
        = match env::args().nth(1) {
            Some(path) => Config::load(path)?,
            None => Config::from_toml_str(DEFAULT_CONFIG)?,
        };
    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)?;

    let grid = config.grid()?;
    let mut params = config.parameters.clone();
    let mut rng = StdRng::seed_from_u64(SEED);

    let mut psi = SpinOneWavefunction::new(&grid);
    let state: SpinOneGroundState
        = config.ground_state()?.unwrap_or(SpinOneGroundState::Polar);
    psi.set_ground_state(state, &params);
    if let Some((select, mean, std_dev)) = config.noise::<SpinOne>()? {
        psi.add_noise_with_rng(&select, mean, std_dev, &mut rng)?;
    }
    let phase = vortex::random_dipoles(&grid, NUM_VORTICES, THRESHOLD, &mut rng)?;
    psi.apply_phase(&phase, &Select::All)?;
    psi.fft();

    let steps = params.nt;
    let mut data = DataManager::create(outdir.join("spinone_vortices.npz"), &psi, &params)?;
    data.save_wavefunction(&mut psi, params.t)?;
    evolve_with(&mut psi, &mut params, steps, |k, wfn, params| {
        if (k + 1) % SAVE_EVERY == 0 {
            data.save_wavefunction(wfn, params.t)?;
            let (_, f_z) = spinone::spin_vectors(wfn);
            log::info!(
                "step {}/{}: t = {:.3}, max |Fz| = {:.3e}",
                k + 1, steps, params.t,
                f_z.iter().fold(0.0_f64, |acc, f| acc.max(f.abs())),
            );
        }
        Ok::<(), Box<dyn Error>>(())
    })?;
    data.finish()?;

    psi.ifft();
    println!("total atom number: {:.6}", psi.calculate_total_atom_num());
    for c in [SpinOne::Plus, SpinOne::Zero, SpinOne::Minus] {
        println!("  {}: {:.6}", c, psi.calculate_atom_num(c));
    }
    Ok(())
}
