use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use num_complex::Complex64;

use super::model::ComplexTable;
use crate::error::{GyreError, Result};

// ---------------------------------------------------------------------------
// Container – named attribute / dataset lookup
// ---------------------------------------------------------------------------

/// Read access to a self-describing file of scalar attributes and
/// one-dimensional (or tabular) datasets.
///
/// Numeric accessors promote where no information is lost: integer values
/// are accepted as reals, and real values as complex numbers with a zero
/// imaginary part. Anything else is a [`GyreError::TypeMismatch`].
pub trait Container {
    fn attr_int(&self, name: &str) -> Result<i64>;
    fn attr_real(&self, name: &str) -> Result<f64>;
    fn attr_complex(&self, name: &str) -> Result<Complex64>;
    fn attr_string(&self, name: &str) -> Result<String>;

    fn dataset_int(&self, name: &str) -> Result<Vec<i64>>;
    fn dataset_real(&self, name: &str) -> Result<Vec<f64>>;
    fn dataset_complex(&self, name: &str) -> Result<Vec<Complex64>>;
    /// A 2-D dataset as a table; a 1-D dataset comes back as one column.
    fn dataset_complex_table(&self, name: &str) -> Result<ComplexTable>;

    /// Read an integer attribute that counts something and so must not be negative.
    fn attr_count(&self, name: &str) -> Result<usize> {
        let value = self.attr_int(name)?;
        usize::try_from(value).map_err(|_| GyreError::type_mismatch(name, "a non-negative integer"))
    }
}

// ---------------------------------------------------------------------------
// Format – which backend reads a given file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// GYRE's native HDF5 output.
    Hdf5,
    /// A JSON document with the same attributes and datasets.
    Json,
}

/// Bytes that open an HDF5 superblock.
const HDF5_SIGNATURE: [u8; 8] = *b"\x89HDF\r\n\x1a\n";

/// Look for the HDF5 signature at offset 0 and after any user block
/// (512, 1024, 2048, ... bytes).
fn has_hdf5_signature(path: &Path) -> Result<bool> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut offset = 0u64;
    while offset + HDF5_SIGNATURE.len() as u64 <= len {
        let mut buf = [0u8; 8];
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut buf)?;
        if buf == HDF5_SIGNATURE {
            return Ok(true);
        }
        offset = if offset == 0 { 512 } else { offset * 2 };
    }
    Ok(false)
}

impl Format {
    /// Pick a format from the file extension. Files with any other
    /// extension (or none) are read as HDF5 when they carry its signature.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "h5" | "hdf5" | "hdf" => Ok(Format::Hdf5),
            "json" => Ok(Format::Json),
            _ if has_hdf5_signature(path)? => Ok(Format::Hdf5),
            other => Err(GyreError::UnsupportedFormat(format!(
                "unknown file extension '.{other}' and no HDF5 signature"
            ))),
        }
    }
}

/// Open `path` with the backend for `format`. The file is released when the
/// returned container is dropped.
pub fn open(path: &Path, format: Format) -> Result<Box<dyn Container>> {
    log::debug!("Opening {} as {format:?}", path.display());
    match format {
        Format::Json => Ok(Box::new(super::document::Document::open(path)?)),
        #[cfg(feature = "hdf5")]
        Format::Hdf5 => Ok(Box::new(super::h5::Hdf5Container::open(path)?)),
        #[cfg(not(feature = "hdf5"))]
        Format::Hdf5 => Err(GyreError::UnsupportedFormat(
            "HDF5 support was not compiled in (enable the `hdf5` feature)".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("summary.h5")).unwrap(), Format::Hdf5);
        assert_eq!(Format::from_path(Path::new("mode.HDF5")).unwrap(), Format::Hdf5);
        assert_eq!(Format::from_path(Path::new("mode.json")).unwrap(), Format::Json);
    }

    #[test]
    fn unknown_extensions_are_sniffed() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("summary.txt");
        std::fs::write(&plain, "freq n_p n_g E").unwrap();
        assert!(matches!(
            Format::from_path(&plain),
            Err(GyreError::UnsupportedFormat(_))
        ));

        let bare = dir.path().join("summary");
        let mut bytes = HDF5_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0u8; 64]);
        std::fs::write(&bare, &bytes).unwrap();
        assert_eq!(Format::from_path(&bare).unwrap(), Format::Hdf5);

        let user_block = dir.path().join("mode.out");
        let mut bytes = vec![0u8; 512];
        bytes.extend_from_slice(&HDF5_SIGNATURE);
        std::fs::write(&user_block, &bytes).unwrap();
        assert_eq!(Format::from_path(&user_block).unwrap(), Format::Hdf5);

        let short = dir.path().join("tiny");
        std::fs::write(&short, b"\x89HD").unwrap();
        assert!(Format::from_path(&short).is_err());

        assert!(matches!(
            Format::from_path(&dir.path().join("absent")),
            Err(GyreError::Io(_))
        ));
    }
}
