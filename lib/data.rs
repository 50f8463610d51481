//! Snapshot output to NumPy `.npz` archives.
//!
//! A [`DataManager`] writes the grid and parameters once, on creation, and
//! then appends one real-space snapshot of every component per call to
//! [`DataManager::save_wavefunction`]. Arrays are named with `/`-separated
//! paths:
//! ```text
//! grid/nx, grid/dx, ...             point counts and spacings per axis
//! parameters/<name>                 scalar parameters, dt, nt, trap
//! wavefunction/<label>/<index>      component snapshots
//! time/<index>                      simulation time of each snapshot
//! ```

use std::{
    fs::File,
    io::{ BufWriter, Seek, Write },
    path::Path,
};
use ndarray as nd;
use ndarray_npy::NpzWriter;
use crate::{
    component::Component,
    error::DataError,
    params::{ Parameters, TimeStep, Trap },
    wavefunction::Wavefunction,
};

pub type DataResult<T> = Result<T, DataError>;

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// Incremental `.npz` writer for simulation snapshots.
pub struct DataManager<W: Write + Seek> {
    npz: NpzWriter<W>,
    time_index: usize,
}

impl DataManager<BufWriter<File>> {
    /// Create (or truncate) the archive at `path` and write the grid and
    /// parameters to it.
    pub fn create<P, C>(path: P, wfn: &Wavefunction<'_, C>, params: &Parameters)
        -> DataResult<Self>
    where
        P: AsRef<Path>,
        C: Component,
    {
        let file = File::create(path.as_ref())?;
        log::debug!("writing snapshots to {:?}", path.as_ref());
        Self::new(BufWriter::new(file), wfn, params)
    }
}

impl<W: Write + Seek> DataManager<W> {
    /// Wrap `writer` and write the grid and parameters to it.
    pub fn new<C>(writer: W, wfn: &Wavefunction<'_, C>, params: &Parameters)
        -> DataResult<Self>
    where C: Component
    {
        let mut npz = NpzWriter::new(writer);
        write_grid(&mut npz, wfn)?;
        write_parameters(&mut npz, params)?;
        Ok(Self { npz, time_index: 0 })
    }

    /// Index the next snapshot will be written under.
    pub fn time_index(&self) -> usize { self.time_index }

    /// Bring `wfn` to real space and write every component along with the
    /// current simulation time.
    pub fn save_wavefunction<C>(&mut self, wfn: &mut Wavefunction<'_, C>, time: f64)
        -> DataResult<()>
    where C: Component
    {
        wfn.ifft();
        let index = self.time_index;
        for &c in C::ALL.iter() {
            self.npz.add_array(
                format!("wavefunction/{}/{}", c.label(), index),
                wfn.component(c),
            )?;
        }
        self.npz.add_array(format!("time/{}", index), &nd::arr0(time))?;
        log::trace!("saved snapshot {} at t = {:.6}", index, time);
        self.time_index += 1;
        Ok(())
    }

    /// Finish the archive and return the underlying writer.
    pub fn finish(self) -> DataResult<W> {
        Ok(self.npz.finish()?)
    }
}

fn write_grid<W, C>(npz: &mut NpzWriter<W>, wfn: &Wavefunction<'_, C>)
    -> DataResult<()>
where
    W: Write + Seek,
    C: Component,
{
    let grid = wfn.grid();
    let axes = grid.shape().iter().zip(grid.spacings()).zip(AXIS_NAMES);
    for ((&n, &d), name) in axes {
        npz.add_array(format!("grid/n{}", name), &nd::arr0(n as u64))?;
        npz.add_array(format!("grid/d{}", name), &nd::arr0(d))?;
    }
    Ok(())
}

fn write_parameters<W>(npz: &mut NpzWriter<W>, params: &Parameters)
    -> DataResult<()>
where W: Write + Seek
{
    for (name, value) in params.named_scalars() {
        npz.add_array(format!("parameters/{}", name), &nd::arr0(value))?;
    }
    match params.dt {
        TimeStep::Real(dt) => npz.add_array("parameters/dt", &nd::arr0(dt))?,
        TimeStep::Complex(dt) => npz.add_array("parameters/dt", &nd::arr0(dt))?,
    }
    npz.add_array("parameters/nt", &nd::arr0(params.nt as u64))?;
    match &params.trap {
        Trap::Uniform(v) => npz.add_array("parameters/trap", &nd::arr0(*v))?,
        Trap::Array(v) => npz.add_array("parameters/trap", v)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use ndarray_npy::{ NpzReader, ReadableElement };
    use num_complex::Complex64 as C64;
    use crate::{ grid::Grid, spinhalf::SpinHalf };

    // tolerate either naming convention for the stored entries
    fn read<T, D>(npz: &mut NpzReader<Cursor<Vec<u8>>>, name: &str) -> nd::Array<T, D>
    where
        T: ReadableElement,
        D: nd::Dimension,
    {
        npz.by_name(name)
            .or_else(|_| npz.by_name(&format!("{}.npy", name)))
            .unwrap()
    }

    #[test]
    fn writes_grid_parameters_and_snapshots() {
        let grid = Grid::new_2d((8, 4), (0.5, 0.25)).unwrap();
        let mut psi: Wavefunction<'_, SpinHalf> = Wavefunction::new(&grid);
        let plus: nd::ArrayD<C64>
            = grid.mesh(0).mapv(|x| C64::new(x, 1.0));
        psi.set_component(SpinHalf::Plus, plus.clone()).unwrap();
        psi.fft();
        let params = Parameters {
            dt: TimeStep::imaginary(0.01),
            nt: 20,
            g_pm: 0.75,
            ..Parameters::default()
        };

        let mut data = DataManager::new(Cursor::new(Vec::new()), &psi, &params)
            .unwrap();
        data.save_wavefunction(&mut psi, 0.0).unwrap();
        data.save_wavefunction(&mut psi, 0.5).unwrap();
        assert_eq!(data.time_index(), 2);
        let mut cursor = data.finish().unwrap();
        cursor.set_position(0);

        let mut npz = NpzReader::new(cursor).unwrap();
        let nx: nd::Array0<u64> = read(&mut npz, "grid/nx");
        let dy: nd::Array0<f64> = read(&mut npz, "grid/dy");
        assert_eq!(nx.into_scalar(), 8);
        assert_eq!(dy.into_scalar(), 0.25);
        let dt: nd::Array0<C64> = read(&mut npz, "parameters/dt");
        assert_eq!(dt.into_scalar(), C64::new(0.0, -0.01));
        let g_pm: nd::Array0<f64> = read(&mut npz, "parameters/g_pm");
        assert_eq!(g_pm.into_scalar(), 0.75);
        let nt: nd::Array0<u64> = read(&mut npz, "parameters/nt");
        assert_eq!(nt.into_scalar(), 20);
        let saved: nd::ArrayD<C64> = read(&mut npz, "wavefunction/plus/1");
        saved.iter().zip(plus.iter())
            .for_each(|(a, b)| assert!((a - b).norm() < 1e-12));
        let minus: nd::ArrayD<C64> = read(&mut npz, "wavefunction/minus/0");
        assert!(minus.iter().all(|z| z.norm() == 0.0));
        let t: nd::Array0<f64> = read(&mut npz, "time/1");
        assert_eq!(t.into_scalar(), 0.5);
    }

    #[test]
    fn array_trap_is_stored_whole() {
        let grid = Grid::new_1d(16, 0.5).unwrap();
        let psi: Wavefunction<'_, SpinHalf> = Wavefunction::new(&grid);
        let params = Parameters {
            trap: Trap::harmonic(&grid, &[1.0]),
            ..Parameters::default()
        };
        let data = DataManager::new(Cursor::new(Vec::new()), &psi, &params)
            .unwrap();
        let mut cursor = data.finish().unwrap();
        cursor.set_position(0);
        let mut npz = NpzReader::new(cursor).unwrap();
        let trap: nd::ArrayD<f64> = read(&mut npz, "parameters/trap");
        assert_eq!(trap.shape(), &[16]);
    }
}
