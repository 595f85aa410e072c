//! Minimal column-oriented numeric table
//!
//! Backs the survey cleaning routine with vectorized column operations:
//! derivation, renaming, row masking, and projection. Column order is
//! preserved so projections produce deterministic feature layouts.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Column-oriented table of `f64` values with named, ordered columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    names: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows. Zero for a frame with no columns.
    pub fn n_rows(&self) -> usize {
        self.names
            .first()
            .and_then(|name| self.columns.get(name))
            .map_or(0, Vec::len)
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    /// Column names, in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Append a column. Its length must match existing columns.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(Error::DuplicateColumn(name));
        }
        if !self.names.is_empty() && values.len() != self.n_rows() {
            return Err(Error::ShapeMismatch {
                expected: self.n_rows(),
                got: values.len(),
            });
        }
        self.names.push(name.clone());
        self.columns.insert(name, values);
        Ok(())
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Rename a column, keeping its position.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> Result<()> {
        let to = to.into();
        if self.columns.contains_key(&to) {
            return Err(Error::DuplicateColumn(to));
        }
        let values = self
            .columns
            .remove(from)
            .ok_or_else(|| Error::ColumnNotFound(from.to_string()))?;
        for name in &mut self.names {
            if name == from {
                *name = to.clone();
            }
        }
        self.columns.insert(to, values);
        Ok(())
    }

    /// Keep only the rows where `mask` is true, across every column.
    pub fn retain_rows(&mut self, mask: &[bool]) -> Result<()> {
        if mask.len() != self.n_rows() {
            return Err(Error::ShapeMismatch {
                expected: self.n_rows(),
                got: mask.len(),
            });
        }
        for values in self.columns.values_mut() {
            let mut keep = mask.iter();
            values.retain(|_| *keep.next().unwrap_or(&false));
        }
        Ok(())
    }

    /// Project to the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Frame> {
        let mut out = Frame::new();
        for &name in names {
            out.push_column(name, self.column(name)?.to_vec())?;
        }
        Ok(out)
    }
}
