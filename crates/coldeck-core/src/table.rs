//! Table Data Model
//!
//! This module defines the in-memory representation of a coldeck table:
//! an ordered set of named, typed columns sharing one row count.
//!
//! ## What is a Table?
//! A table is the unit of encoding and decoding. Think of it as a small
//! dataframe: every column has a name, a declared type, and exactly
//! `row_count` values. Column order is significant - it defines the on-disk
//! layout, and names are only used for lookup.
//!
//! ## Column Types
//! - **Int32**: 32-bit signed integers, 4 bytes per value
//! - **Float64**: 64-bit floats, 8 bytes per value
//! - **String**: UTF-8 strings, each value carrying its own 4-byte length
//!   prefix on disk
//!
//! ## Validation
//! `Table::new` checks that there is at least one column, that every column
//! has the same number of values, and that no name repeats. A table with
//! zero rows but a known schema is valid.
//!
//! ## Example
//! ```ignore
//! use coldeck_core::{Column, Table};
//!
//! let table = Table::new(vec![
//!     Column::int32("id", vec![1, 2, 3]),
//!     Column::string("name", vec!["Alice".into(), "Bob".into(), "Charlie".into()]),
//! ])?;
//! assert_eq!(table.row_count, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Data type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DataType {
    Int32 = 1,
    Float64 = 2,
    String = 3,
}

impl DataType {
    /// The on-disk type code for this data type
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Bytes per value for fixed-width types, None for String
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            DataType::Int32 => Some(4),
            DataType::Float64 => Some(8),
            DataType::String => None,
        }
    }

    /// Lowercase name for display
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int32 => "int32",
            DataType::Float64 => "float64",
            DataType::String => "string",
        }
    }
}

impl TryFrom<u8> for DataType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(DataType::Int32),
            2 => Ok(DataType::Float64),
            3 => Ok(DataType::String),
            _ => Err(Error::UnknownDataType(value)),
        }
    }
}

/// The values of one column, tagged by type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValues {
    Int32(Vec<i32>),
    Float64(Vec<f64>),
    String(Vec<String>),
}

impl ColumnValues {
    /// Number of values (the column's row count)
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int32(v) => v.len(),
            ColumnValues::Float64(v) => v.len(),
            ColumnValues::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The data type these values carry
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnValues::Int32(_) => DataType::Int32,
            ColumnValues::Float64(_) => DataType::Float64,
            ColumnValues::String(_) => DataType::String,
        }
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within a table
    pub name: String,

    /// The column's values
    pub values: ColumnValues,
}

impl Column {
    /// Create an Int32 column
    pub fn int32(name: impl Into<String>, values: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Int32(values),
        }
    }

    /// Create a Float64 column
    pub fn float64(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Float64(values),
        }
    }

    /// Create a String column
    pub fn string(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::String(values),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.values.data_type()
    }

    /// Number of values in this column
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered set of columns sharing one row count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Columns in layout order
    pub columns: Vec<Column>,

    /// Number of rows in every column
    pub row_count: u32,
}

impl Table {
    /// Build a table from columns, validating shape
    ///
    /// Fails if there are no columns, if any column's length disagrees with
    /// the first column's, or if a name repeats.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::InvalidColumnCount(0));
        }
        if columns[0].len() > u32::MAX as usize {
            return Err(Error::InvalidLayout(format!(
                "row count {} exceeds u32 range",
                columns[0].len()
            )));
        }

        let row_count = columns[0].len() as u32;
        let mut seen = std::collections::HashSet::new();
        for column in &columns {
            if column.len() as u32 != row_count {
                return Err(Error::RowCountMismatch {
                    column: column.name.clone(),
                    expected: row_count,
                    actual: column.len() as u32,
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(Error::DuplicateColumn(column.name.clone()));
            }
        }

        Ok(Self {
            columns,
            row_count,
        })
    }

    /// Look up a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of columns
    pub fn column_count(&self) -> u32 {
        self.columns.len() as u32
    }
}
