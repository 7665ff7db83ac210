use std::path::Path;

use super::container::{self, Container, Format};
use super::model::{EigenfunctionRecord, EigenvalueTable};
use super::order::{argsort_by_real, is_sorted_by_real, permute};
use crate::error::{GyreError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a GYRE eigenvalue (summary) file. The format is picked from the
/// file extension, see [`Format::from_path`].
///
/// Modes are returned in ascending order of the real part of their
/// frequency; modes with equal real frequency keep their file order.
pub fn read_eigval(path: impl AsRef<Path>) -> Result<EigenvalueTable> {
    let path = path.as_ref();
    read_eigval_as(path, Format::from_path(path)?)
}

/// Like [`read_eigval`], with an explicit file format.
pub fn read_eigval_as(path: impl AsRef<Path>, format: Format) -> Result<EigenvalueTable> {
    let file = container::open(path.as_ref(), format)?;
    eigval_from(file.as_ref())
}

/// Load a GYRE eigenfunction (mode) file. The format is picked from the
/// file extension. Grid points are returned in file order.
pub fn read_eigfunc(path: impl AsRef<Path>) -> Result<EigenfunctionRecord> {
    let path = path.as_ref();
    read_eigfunc_as(path, Format::from_path(path)?)
}

/// Like [`read_eigfunc`], with an explicit file format.
pub fn read_eigfunc_as(path: impl AsRef<Path>, format: Format) -> Result<EigenfunctionRecord> {
    let file = container::open(path.as_ref(), format)?;
    eigfunc_from(file.as_ref())
}

// ---------------------------------------------------------------------------
// Record assembly
// ---------------------------------------------------------------------------

/// Build an [`EigenvalueTable`] from an already open container.
pub fn eigval_from<C: Container + ?Sized>(file: &C) -> Result<EigenvalueTable> {
    let n = file.attr_count("n")?;
    let l = file.attr_int("l")?;
    let freq_units = file.attr_string("freq_units")?;

    let freq = file.dataset_complex("freq")?;
    let n_p = file.dataset_int("n_p")?;
    let n_g = file.dataset_int("n_g")?;
    let e = file.dataset_real("E")?;

    let rows = freq.len();
    check_len("n_p", rows, n_p.len())?;
    check_len("n_g", rows, n_g.len())?;
    check_len("E", rows, e.len())?;

    // Parallel runs can write modes out of order.
    if !is_sorted_by_real(&freq) {
        log::warn!("Eigenvalues are not in frequency order, sorting {rows} modes");
    }
    let order = argsort_by_real(&freq);

    let freq = permute(&freq, &order);
    let n_p = permute(&n_p, &order);
    let n_g = permute(&n_g, &order);
    let e = permute(&e, &order);

    let n_cowl = n_p.iter().zip(&n_g).map(|(p, g)| p - g).collect();

    log::debug!("Loaded {rows} modes with l = {l} ({freq_units})");

    Ok(EigenvalueTable {
        n,
        l: vec![l; rows],
        freq,
        freq_units,
        n_p,
        n_g,
        n_cowl,
        e,
    })
}

/// Build an [`EigenfunctionRecord`] from an already open container.
pub fn eigfunc_from<C: Container + ?Sized>(file: &C) -> Result<EigenfunctionRecord> {
    let n = file.attr_count("n")?;
    let n_e = file.attr_count("n_e")?;
    let n_p = file.attr_int("n_p")?;
    let n_g = file.attr_int("n_g")?;
    let lambda_0 = file.attr_real("lambda_0")?;
    let l = file.attr_int("l")?;
    let freq = file.attr_complex("freq")?;
    let freq_units = file.attr_string("freq_units")?;

    let x = file.dataset_real("x")?;
    let y = file.dataset_complex_table("y")?;
    let de_dx = file.dataset_real("dE_dx")?;

    check_len("x", n, x.len())?;
    check_len("y", n, y.n_rows())?;
    check_len("dE_dx", n, de_dx.len())?;

    log::debug!(
        "Loaded eigenfunction l = {l}, n_p = {n_p}, n_g = {n_g} on {n} points ({} variables)",
        y.n_cols()
    );

    Ok(EigenfunctionRecord {
        n,
        n_e,
        n_p,
        n_g,
        n_cowl: n_p - n_g,
        lambda_0,
        l,
        freq,
        freq_units,
        x,
        y,
        de_dx,
    })
}

fn check_len(name: &str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(GyreError::shape_mismatch(name, expected, found));
    }
    Ok(())
}
