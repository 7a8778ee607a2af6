pub mod codec;
pub mod error;
pub mod table;

pub use error::{Error, Result};
pub use table::{Column, ColumnValues, DataType, Table};
