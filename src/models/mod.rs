pub mod cell;
pub mod dataset;
pub mod row;

pub use cell::CellValue;
pub use dataset::Dataset;
pub use row::TimesheetRow;
