pub mod formatting;
pub mod path;
pub mod table;

pub use formatting::hours2readable;
