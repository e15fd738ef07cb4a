pub mod accumulator;
pub mod aggregate;
pub mod batch;
pub mod catalog;
pub mod cell_parser;
pub mod extractor;
pub mod filter;
pub mod layout;
pub mod month;
pub mod session;

pub use catalog::Catalog;
pub use filter::{Dimension, Facets, Selection};
pub use session::Session;
