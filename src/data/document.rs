use std::collections::BTreeMap;
use std::path::Path;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::container::Container;
use super::model::ComplexTable;
use crate::error::{GyreError, Result};

// ---------------------------------------------------------------------------
// Values – attribute and dataset payloads
// ---------------------------------------------------------------------------

/// A scalar attribute.
///
/// In JSON an integer is written as `3`, a real as `3.5`, a complex number
/// as `{"re": 1.0, "im": -0.5}` and a string as `"UHZ"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Real(f64),
    Complex { re: f64, im: f64 },
    Text(String),
}

/// One element of a complex dataset: either a bare number or a `re`/`im` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComplexValue {
    Real(f64),
    Pair { re: f64, im: f64 },
}

impl From<ComplexValue> for Complex64 {
    fn from(v: ComplexValue) -> Self {
        match v {
            ComplexValue::Real(re) => Complex64::new(re, 0.0),
            ComplexValue::Pair { re, im } => Complex64::new(re, im),
        }
    }
}

impl From<Complex64> for ComplexValue {
    fn from(c: Complex64) -> Self {
        ComplexValue::Pair { re: c.re, im: c.im }
    }
}

/// A dataset. Variants are tried in order, so an all-integer array is
/// `Int` and a nested array is a `Table` with one inner array per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetValue {
    Int(Vec<i64>),
    Real(Vec<f64>),
    Complex(Vec<ComplexValue>),
    Table(Vec<Vec<ComplexValue>>),
}

impl DatasetValue {
    /// Build a table dataset from complex rows.
    pub fn table(rows: Vec<Vec<Complex64>>) -> Self {
        DatasetValue::Table(
            rows.into_iter()
                .map(|row| row.into_iter().map(ComplexValue::from).collect())
                .collect(),
        )
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v.into())
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Real(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<Complex64> for AttrValue {
    fn from(c: Complex64) -> Self {
        AttrValue::Complex { re: c.re, im: c.im }
    }
}

impl From<Vec<i64>> for DatasetValue {
    fn from(v: Vec<i64>) -> Self {
        DatasetValue::Int(v)
    }
}

impl From<Vec<f64>> for DatasetValue {
    fn from(v: Vec<f64>) -> Self {
        DatasetValue::Real(v)
    }
}

impl From<Vec<Complex64>> for DatasetValue {
    fn from(v: Vec<Complex64>) -> Self {
        DatasetValue::Complex(v.into_iter().map(ComplexValue::from).collect())
    }
}

// ---------------------------------------------------------------------------
// Document – an in-memory container, persisted as JSON
// ---------------------------------------------------------------------------

/// An in-memory set of named attributes and datasets.
///
/// This is both the JSON file backend and a convenient way to build GYRE
/// output in memory. On disk it looks like:
///
/// ```json
/// {
///   "attrs":    { "n": 100, "l": 1, "freq_units": "UHZ" },
///   "datasets": { "freq": [{"re": 1.2, "im": 0.0}], "n_p": [3], "n_g": [0], "E": [0.5] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub attrs: BTreeMap<String, AttrValue>,
    #[serde(default)]
    pub datasets: BTreeMap<String, DatasetValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn with_dataset(mut self, name: &str, value: impl Into<DatasetValue>) -> Self {
        self.datasets.insert(name.to_string(), value.into());
        self
    }

    /// Read and parse a JSON document. The file is closed before parsing.
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    fn attr(&self, name: &str) -> Result<&AttrValue> {
        self.attrs
            .get(name)
            .ok_or_else(|| GyreError::MissingAttribute(name.to_string()))
    }

    fn dataset(&self, name: &str) -> Result<&DatasetValue> {
        self.datasets
            .get(name)
            .ok_or_else(|| GyreError::MissingDataset(name.to_string()))
    }
}

impl Container for Document {
    fn attr_int(&self, name: &str) -> Result<i64> {
        match self.attr(name)? {
            AttrValue::Int(v) => Ok(*v),
            _ => Err(GyreError::type_mismatch(name, "an integer")),
        }
    }

    fn attr_real(&self, name: &str) -> Result<f64> {
        match self.attr(name)? {
            AttrValue::Int(v) => Ok(*v as f64),
            AttrValue::Real(v) => Ok(*v),
            _ => Err(GyreError::type_mismatch(name, "a real number")),
        }
    }

    fn attr_complex(&self, name: &str) -> Result<Complex64> {
        match self.attr(name)? {
            AttrValue::Int(v) => Ok(Complex64::new(*v as f64, 0.0)),
            AttrValue::Real(v) => Ok(Complex64::new(*v, 0.0)),
            AttrValue::Complex { re, im } => Ok(Complex64::new(*re, *im)),
            AttrValue::Text(_) => Err(GyreError::type_mismatch(name, "a complex number")),
        }
    }

    fn attr_string(&self, name: &str) -> Result<String> {
        match self.attr(name)? {
            AttrValue::Text(s) => Ok(s.clone()),
            _ => Err(GyreError::type_mismatch(name, "a string")),
        }
    }

    fn dataset_int(&self, name: &str) -> Result<Vec<i64>> {
        match self.dataset(name)? {
            DatasetValue::Int(v) => Ok(v.clone()),
            _ => Err(GyreError::type_mismatch(name, "a 1-D integer dataset")),
        }
    }

    fn dataset_real(&self, name: &str) -> Result<Vec<f64>> {
        match self.dataset(name)? {
            DatasetValue::Int(v) => Ok(v.iter().map(|&i| i as f64).collect()),
            DatasetValue::Real(v) => Ok(v.clone()),
            _ => Err(GyreError::type_mismatch(name, "a 1-D real dataset")),
        }
    }

    fn dataset_complex(&self, name: &str) -> Result<Vec<Complex64>> {
        match self.dataset(name)? {
            DatasetValue::Int(v) => Ok(v.iter().map(|&i| Complex64::new(i as f64, 0.0)).collect()),
            DatasetValue::Real(v) => Ok(v.iter().map(|&r| Complex64::new(r, 0.0)).collect()),
            DatasetValue::Complex(v) => Ok(v.iter().copied().map(Complex64::from).collect()),
            DatasetValue::Table(_) => Err(GyreError::type_mismatch(name, "a 1-D complex dataset")),
        }
    }

    fn dataset_complex_table(&self, name: &str) -> Result<ComplexTable> {
        match self.dataset(name)? {
            DatasetValue::Table(rows) => ComplexTable::from_rows(
                name,
                rows.iter()
                    .map(|row| row.iter().copied().map(Complex64::from).collect())
                    .collect(),
            ),
            _ => Ok(ComplexTable::from_column(self.dataset_complex(name)?)),
        }
    }
}
