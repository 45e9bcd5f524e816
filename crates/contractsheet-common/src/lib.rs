pub mod address;
pub mod range;
pub mod value;

pub use address::{AddressError, CellAddress, MAX_COL, MAX_ROW, column_index, column_letters};
pub use range::CellRange;
pub use value::CellValue;
