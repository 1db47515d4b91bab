//! Cell types: values, annotations, and addressing

mod address;
mod value;

pub use address::{
    column_to_letters, letters_to_column, CellAddress, CellRange, CellRangeIterator,
};
pub use value::{AnnotatedCell, Cell, ChartKind, Scalar};
