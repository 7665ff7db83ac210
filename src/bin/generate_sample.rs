use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gyre_output::{DatasetValue, Document};
use num_complex::Complex64;

/// Large frequency separation of the sample star (µHz).
const DELTA_NU: f64 = 135.0;
const EPSILON: f64 = 1.45;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Fisher-Yates shuffle, standing in for modes arriving from MPI ranks.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = (self.next_u64() % (i as u64 + 1)) as usize;
            items.swap(i, j);
        }
    }
}

/// An l = 1 summary file: p modes following the asymptotic relation plus a
/// few mixed modes, written in shuffled order.
fn eigval_document(rng: &mut SimpleRng) -> Document {
    let l = 1;
    let mut rows: Vec<(Complex64, i64, i64, f64)> = (1..=20)
        .map(|n_p: i64| {
            let nu = DELTA_NU * (n_p as f64 + l as f64 / 2.0 + EPSILON);
            (Complex64::new(nu, 0.0), n_p, 0, 1.0 / (n_p as f64).powi(2))
        })
        .collect();
    for n_g in 1..=4 {
        let nu = DELTA_NU * (8.2 + 0.25 * n_g as f64);
        rows.push((Complex64::new(nu, 0.0), 8, n_g, 10.0 * n_g as f64));
    }
    rng.shuffle(&mut rows);

    Document::new()
        .with_attr("n", 2400)
        .with_attr("l", l)
        .with_attr("freq_units", "UHZ")
        .with_dataset("freq", rows.iter().map(|r| r.0).collect::<Vec<_>>())
        .with_dataset("n_p", rows.iter().map(|r| r.1).collect::<Vec<_>>())
        .with_dataset("n_g", rows.iter().map(|r| r.2).collect::<Vec<_>>())
        .with_dataset("E", rows.iter().map(|r| r.3).collect::<Vec<_>>())
}

/// A single n_p = 12 mode on a uniform grid, two dependent variables.
fn eigfunc_document() -> Document {
    let n = 200;
    let n_p = 12;
    let k = std::f64::consts::PI * n_p as f64;
    let x: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let y: Vec<Vec<Complex64>> = x
        .iter()
        .map(|&xi| {
            vec![
                Complex64::new(xi * (k * xi).sin(), 0.0),
                Complex64::new((k * xi).cos(), 1e-6 * xi),
            ]
        })
        .collect();
    let de_dx: Vec<f64> = x.iter().map(|&xi| (xi * (k * xi).sin()).powi(2)).collect();

    Document::new()
        .with_attr("n", n as i64)
        .with_attr("n_e", 2)
        .with_attr("n_p", n_p)
        .with_attr("n_g", 0)
        .with_attr("lambda_0", 2.0)
        .with_attr("l", 1)
        .with_attr("freq", Complex64::new(DELTA_NU * (n_p as f64 + 0.5 + EPSILON), 0.0))
        .with_attr("freq_units", "UHZ")
        .with_dataset("x", x)
        .with_dataset("y", DatasetValue::table(y))
        .with_dataset("dE_dx", de_dx)
}

fn write_samples(dir: &Path, stem: &str, doc: &Document) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let json_path = dir.join(format!("{stem}.json"));
    doc.write_json(&json_path)
        .with_context(|| format!("writing {}", json_path.display()))?;
    written.push(json_path);

    #[cfg(feature = "hdf5")]
    {
        let h5_path = dir.join(format!("{stem}.h5"));
        gyre_output::write_hdf5(doc, &h5_path)
            .with_context(|| format!("writing {}", h5_path.display()))?;
        written.push(h5_path);
    }

    Ok(written)
}

fn main() -> Result<()> {
    env_logger::init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);

    for path in write_samples(&dir, "sample_summary", &eigval_document(&mut rng))? {
        let table = gyre_output::read_eigval(&path)
            .with_context(|| format!("reading back {}", path.display()))?;
        log::info!(
            "{}: {} modes, {:.2}..{:.2} {}",
            path.display(),
            table.len(),
            table.freq.first().map_or(0.0, |f| f.re),
            table.freq.last().map_or(0.0, |f| f.re),
            table.freq_units
        );
    }

    for path in write_samples(&dir, "sample_mode", &eigfunc_document())? {
        let record = gyre_output::read_eigfunc(&path)
            .with_context(|| format!("reading back {}", path.display()))?;
        log::info!(
            "{}: {} points, n_pg = {}, freq = {:.2} {}",
            path.display(),
            record.len(),
            record.n_cowl,
            record.freq.re,
            record.freq_units
        );
    }

    println!("Wrote sample GYRE output to {}", dir.display());
    Ok(())
}
