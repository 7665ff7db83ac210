use std::path::Path;

use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Container as H5Container, File, H5Type};
use num_complex::Complex64;

use super::container::Container;
use super::document::{AttrValue, DatasetValue, Document};
use super::model::ComplexTable;
use crate::error::{GyreError, Result};

/// Longest fixed-length string attribute we accept.
const MAX_FIXED_STRING: usize = 256;

/// HDF5 has no native complex type. GYRE writes a compound with `re`/`im`
/// members; the h5py `r`/`i` layout is read straight into [`Complex64`].
#[derive(H5Type, Debug, Clone, Copy, PartialEq)]
#[repr(C)]
struct ReIm {
    re: f64,
    im: f64,
}

impl From<ReIm> for Complex64 {
    fn from(p: ReIm) -> Self {
        Complex64::new(p.re, p.im)
    }
}

impl From<Complex64> for ReIm {
    fn from(c: Complex64) -> Self {
        ReIm { re: c.re, im: c.im }
    }
}

// ---------------------------------------------------------------------------
// Type classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Int,
    Real,
    ComplexReIm,
    ComplexRI,
    Text,
    Other,
}

fn classify(desc: &TypeDescriptor) -> Kind {
    match desc {
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => Kind::Int,
        TypeDescriptor::Float(_) => Kind::Real,
        TypeDescriptor::Complex(_) => Kind::ComplexRI,
        TypeDescriptor::Compound(compound) if compound.fields.len() == 2 => {
            let has = |name: &str| compound.fields.iter().any(|f| f.name == name);
            if has("re") && has("im") {
                Kind::ComplexReIm
            } else if has("r") && has("i") {
                Kind::ComplexRI
            } else {
                Kind::Other
            }
        }
        TypeDescriptor::VarLenUnicode
        | TypeDescriptor::VarLenAscii
        | TypeDescriptor::FixedAscii(_)
        | TypeDescriptor::FixedUnicode(_) => Kind::Text,
        _ => Kind::Other,
    }
}

fn kind_of(c: &H5Container) -> Result<Kind> {
    Ok(classify(&c.dtype()?.to_descriptor()?))
}

/// Read every element of an attribute or dataset in memory order.
fn read_values<T: H5Type>(c: &H5Container) -> Result<Vec<T>> {
    if c.ndim() == 0 {
        return Ok(vec![c.read_scalar::<T>()?]);
    }
    if c.size() == 0 {
        return Ok(Vec::new());
    }
    Ok(c.read_raw::<T>()?)
}

/// Unwrap a scalar attribute, which may also be stored as a one-element array.
fn single<T>(name: &str, mut values: Vec<T>) -> Result<T> {
    if values.len() != 1 {
        return Err(GyreError::shape_mismatch(name, 1, values.len()));
    }
    Ok(values.remove(0))
}

fn read_ints(name: &str, c: &H5Container) -> Result<Vec<i64>> {
    match kind_of(c)? {
        Kind::Int => read_values::<i64>(c),
        _ => Err(GyreError::type_mismatch(name, "an integer")),
    }
}

fn read_reals(name: &str, c: &H5Container) -> Result<Vec<f64>> {
    match kind_of(c)? {
        Kind::Int | Kind::Real => read_values::<f64>(c),
        _ => Err(GyreError::type_mismatch(name, "a real number")),
    }
}

fn read_complex(name: &str, c: &H5Container) -> Result<Vec<Complex64>> {
    match kind_of(c)? {
        Kind::Int | Kind::Real => Ok(read_values::<f64>(c)?
            .into_iter()
            .map(|re| Complex64::new(re, 0.0))
            .collect()),
        Kind::ComplexReIm => Ok(read_values::<ReIm>(c)?.into_iter().map(Complex64::from).collect()),
        Kind::ComplexRI => read_values::<Complex64>(c),
        _ => Err(GyreError::type_mismatch(name, "a complex number")),
    }
}

fn read_text(name: &str, c: &H5Container) -> Result<String> {
    let text = match c.dtype()?.to_descriptor()? {
        TypeDescriptor::VarLenUnicode => c.read_scalar::<VarLenUnicode>()?.as_str().to_owned(),
        TypeDescriptor::VarLenAscii => c.read_scalar::<VarLenAscii>()?.as_str().to_owned(),
        TypeDescriptor::FixedAscii(len) if len <= MAX_FIXED_STRING => c
            .read_scalar::<FixedAscii<MAX_FIXED_STRING>>()?
            .as_str()
            .to_owned(),
        TypeDescriptor::FixedUnicode(len) if len <= MAX_FIXED_STRING => c
            .read_scalar::<FixedUnicode<MAX_FIXED_STRING>>()?
            .as_str()
            .to_owned(),
        _ => return Err(GyreError::type_mismatch(name, "a string")),
    };
    // Fortran writers pad fixed-length strings.
    Ok(text.trim_end_matches(|ch: char| ch == '\0' || ch == ' ').to_string())
}

fn require_1d(name: &str, c: &H5Container) -> Result<()> {
    match c.ndim() {
        1 => Ok(()),
        rank => Err(GyreError::BadRank {
            name: name.to_string(),
            rank,
        }),
    }
}

// ---------------------------------------------------------------------------
// Hdf5Container – reading
// ---------------------------------------------------------------------------

/// An open HDF5 file. The underlying handle is closed on drop.
pub struct Hdf5Container {
    file: File,
}

impl Hdf5Container {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Hdf5Container {
            file: File::open(path)?,
        })
    }

    fn attr(&self, name: &str) -> Result<hdf5::Attribute> {
        if !self.file.attr_names()?.iter().any(|a| a == name) {
            return Err(GyreError::MissingAttribute(name.to_string()));
        }
        Ok(self.file.attr(name)?)
    }

    fn dataset(&self, name: &str) -> Result<hdf5::Dataset> {
        if !self.file.link_exists(name) {
            return Err(GyreError::MissingDataset(name.to_string()));
        }
        Ok(self.file.dataset(name)?)
    }
}

impl Container for Hdf5Container {
    fn attr_int(&self, name: &str) -> Result<i64> {
        let attr = self.attr(name)?;
        single(name, read_ints(name, &attr)?)
    }

    fn attr_real(&self, name: &str) -> Result<f64> {
        let attr = self.attr(name)?;
        single(name, read_reals(name, &attr)?)
    }

    fn attr_complex(&self, name: &str) -> Result<Complex64> {
        let attr = self.attr(name)?;
        single(name, read_complex(name, &attr)?)
    }

    fn attr_string(&self, name: &str) -> Result<String> {
        let attr = self.attr(name)?;
        match kind_of(&attr)? {
            Kind::Text => read_text(name, &attr),
            _ => Err(GyreError::type_mismatch(name, "a string")),
        }
    }

    fn dataset_int(&self, name: &str) -> Result<Vec<i64>> {
        let ds = self.dataset(name)?;
        require_1d(name, &ds)?;
        read_ints(name, &ds)
    }

    fn dataset_real(&self, name: &str) -> Result<Vec<f64>> {
        let ds = self.dataset(name)?;
        require_1d(name, &ds)?;
        read_reals(name, &ds)
    }

    fn dataset_complex(&self, name: &str) -> Result<Vec<Complex64>> {
        let ds = self.dataset(name)?;
        require_1d(name, &ds)?;
        read_complex(name, &ds)
    }

    fn dataset_complex_table(&self, name: &str) -> Result<ComplexTable> {
        let ds = self.dataset(name)?;
        let (rows, cols) = match ds.shape().as_slice() {
            [rows] => (*rows, 1),
            [rows, cols] => (*rows, *cols),
            other => {
                return Err(GyreError::BadRank {
                    name: name.to_string(),
                    rank: other.len(),
                })
            }
        };
        ComplexTable::from_flat(name, rows, cols, read_complex(name, &ds)?)
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write a [`Document`] as an HDF5 file laid out the way GYRE writes its
/// output: scalar attributes at the root, datasets beside them, complex
/// values as `re`/`im` compounds.
pub fn write_document(doc: &Document, path: &Path) -> Result<()> {
    let file = File::create(path)?;

    for (name, value) in &doc.attrs {
        match value {
            AttrValue::Int(v) => file.new_attr::<i64>().create(name.as_str())?.write_scalar(v)?,
            AttrValue::Real(v) => file.new_attr::<f64>().create(name.as_str())?.write_scalar(v)?,
            AttrValue::Complex { re, im } => file
                .new_attr::<ReIm>()
                .create(name.as_str())?
                .write_scalar(&ReIm { re: *re, im: *im })?,
            AttrValue::Text(s) => {
                let text: VarLenUnicode = s
                    .parse()
                    .map_err(|_| GyreError::type_mismatch(name, "a string without NUL bytes"))?;
                file.new_attr::<VarLenUnicode>()
                    .create(name.as_str())?
                    .write_scalar(&text)?
            }
        }
    }

    for (name, value) in &doc.datasets {
        match value {
            DatasetValue::Int(v) => write_1d(&file, name, v)?,
            DatasetValue::Real(v) => write_1d(&file, name, v)?,
            DatasetValue::Complex(v) => {
                let pairs: Vec<ReIm> = v.iter().map(|&c| ReIm::from(Complex64::from(c))).collect();
                write_1d(&file, name, &pairs)?
            }
            DatasetValue::Table(rows) => {
                let table = ComplexTable::from_rows(
                    name,
                    rows.iter()
                        .map(|row| row.iter().map(|&c| Complex64::from(c)).collect())
                        .collect(),
                )?;
                let pairs: Vec<ReIm> = table.as_slice().iter().map(|&c| ReIm::from(c)).collect();
                let ds = file
                    .new_dataset::<ReIm>()
                    .shape((table.n_rows(), table.n_cols()))
                    .create(name.as_str())?;
                if !pairs.is_empty() {
                    ds.write_raw(pairs.as_slice())?;
                }
            }
        }
    }

    log::debug!("Wrote {}", path.display());
    Ok(())
}

fn write_1d<T: H5Type>(file: &File, name: &str, values: &[T]) -> Result<()> {
    let ds = file.new_dataset::<T>().shape(values.len()).create(name)?;
    if !values.is_empty() {
        ds.write_raw(values)?;
    }
    Ok(())
}
