/// Data layer: record types, container backends, and loading.
///
/// Architecture:
/// ```text
///   .h5 / .json
///        │
///        ▼
///   ┌───────────┐
///   │ container  │  attribute / dataset lookup (HDF5 or JSON document)
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  extract fields, check shapes, sort modes by frequency
///   └──────────┘
///        │
///        ▼
///   EigenvalueTable / EigenfunctionRecord
/// ```

pub mod container;
pub mod document;
#[cfg(feature = "hdf5")]
pub mod h5;
pub mod loader;
pub mod model;
pub mod order;
