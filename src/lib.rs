//! # gyre-output
//!
//! Readers for the output files of the GYRE stellar oscillation code.
//!
//! * [`read_eigval`] loads a summary file of mode eigenvalues into an
//!   [`EigenvalueTable`]. Parallel GYRE runs may write modes in any order,
//!   so the table is sorted by the real part of the frequency.
//! * [`read_eigfunc`] loads a single mode's eigenfunction into an
//!   [`EigenfunctionRecord`], keeping the file's grid order.
//!
//! Files are read from HDF5 (the `hdf5` feature, on by default) or from a
//! JSON document carrying the same attributes and datasets.
//!
//! ```no_run
//! let table = gyre_output::read_eigval("summary.h5")?;
//! for mode in table.modes() {
//!     println!("n_pg = {:3}  freq = {}", mode.n_cowl, mode.freq);
//! }
//! # Ok::<(), gyre_output::GyreError>(())
//! ```

pub mod data;
pub mod error;

pub use data::container::{Container, Format};
pub use data::document::{AttrValue, ComplexValue, DatasetValue, Document};
#[cfg(feature = "hdf5")]
pub use data::h5::{write_document as write_hdf5, Hdf5Container};
pub use data::loader::{
    eigfunc_from, eigval_from, read_eigfunc, read_eigfunc_as, read_eigval, read_eigval_as,
};
pub use data::model::{ComplexTable, EigenfunctionRecord, EigenvalueTable, Mode};
pub use error::{GyreError, Result};
